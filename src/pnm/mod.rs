//! Netpbm family: P1/P4 (PBM), P2/P5 (PGM), P3/P6 (PPM).
//!
//! The header is parsed once into a [`MagicNumber`]; the sample type of the
//! requested [`Image`] then selects the family codec and the magic number's
//! [`Encoding`] selects the plain or raw body reader.

mod bits;
mod cursor;
mod header;
mod pbm;
mod pgm;
mod ppm;

pub use header::{Encoding, Family, Header, MagicNumber};

pub(crate) use header::parse_header;

use alloc::format;
use alloc::vec::Vec;
use enough::Stop;

use crate::error::NetpbmError;
use crate::image::Image;
use crate::info::ImageInfo;
use crate::limits::Limits;
use crate::raster::Raster;
use crate::sample::Sample;
use cursor::{Cursor, parse_decimal};

/// Probe header for ImageInfo without decoding.
pub(crate) fn probe_header(data: &[u8]) -> Result<ImageInfo, NetpbmError> {
    let (header, _) = parse_header(data)?;
    Ok(ImageInfo::from_header(&header))
}

/// Decode a whole image whose family must match `S`.
pub(crate) fn decode<S: Sample>(
    data: &[u8],
    limits: Option<&Limits>,
    stop: &dyn Stop,
) -> Result<Image<S>, NetpbmError> {
    let (header, body) = parse_header(data)?;
    decode_with_header(header, body, limits, stop)
}

pub(crate) fn decode_with_header<S: Sample>(
    header: Header,
    body: &[u8],
    limits: Option<&Limits>,
    stop: &dyn Stop,
) -> Result<Image<S>, NetpbmError> {
    if header.magic().family() != S::FAMILY {
        return Err(NetpbmError::UnsupportedVariant(format!(
            "expected a {:?} but found {}",
            S::FAMILY,
            header.magic()
        )));
    }

    let (w, h, total) = dimensions(&header)?;
    if let Some(limits) = limits {
        limits.check_raster(header.width(), header.height(), core::mem::size_of::<S>())?;
    }

    stop.check()?;

    let samples = S::decode_body(&header, body, stop)?;
    let raster = Raster::from_vec(w, h, samples).ok_or(NetpbmError::InconsistentDimensions {
        width: header.width(),
        height: header.height(),
        actual: total,
    })?;
    Image::from_parts(header, raster)
}

/// Encode `image` under `magic`, which must belong to the image's family.
pub(crate) fn encode<S: Sample>(
    image: &Image<S>,
    magic: MagicNumber,
    stop: &dyn Stop,
) -> Result<Vec<u8>, NetpbmError> {
    if magic.family() != S::FAMILY {
        return Err(NetpbmError::UnsupportedVariant(format!(
            "cannot write a {:?} as {magic}",
            S::FAMILY
        )));
    }
    let src = image.header();
    let header = Header::new(magic, src.width(), src.height(), src.max_value())?;

    let (w, h, total) = dimensions(&header)?;
    let raster = image.raster();
    if raster.width() != w || raster.height() != h || raster.samples().len() != total {
        return Err(NetpbmError::InconsistentDimensions {
            width: header.width(),
            height: header.height(),
            actual: raster.samples().len(),
        });
    }

    stop.check()?;

    log::debug!("encoding {}x{} image as {magic}", header.width(), header.height());
    let mut out = Vec::with_capacity(32 + S::body_len_hint(&header));
    header::write_header(&header, &mut out);
    S::encode_body(&header, raster.samples(), &mut out, stop)?;
    Ok(out)
}

/// `(width, height, width * height)` as `usize`, overflow-checked.
fn dimensions(header: &Header) -> Result<(usize, usize, usize), NetpbmError> {
    let w = header.width() as usize;
    let h = header.height() as usize;
    let total = w.checked_mul(h).ok_or(NetpbmError::DimensionsTooLarge {
        width: header.width(),
        height: header.height(),
    })?;
    Ok((w, h, total))
}

/// Capacity for a plain body: every sample takes at least one input byte,
/// so never reserve more than the input could possibly fill.
fn ascii_capacity(total: usize, body: &[u8]) -> usize {
    total.min(body.len())
}

fn short_body(header: &Header, x: usize, y: usize) -> NetpbmError {
    NetpbmError::MalformedHeader(format!(
        "plain raster ends at column {x} of row {y}, header declares {}x{}",
        header.width(),
        header.height()
    ))
}

/// Read one plain gray/RGB channel value.
fn next_ascii_value(
    cursor: &mut Cursor<'_>,
    header: &Header,
    max: u8,
    x: usize,
    y: usize,
) -> Result<u8, NetpbmError> {
    let token = cursor.next_token().ok_or_else(|| short_body(header, x, y))?;
    match parse_decimal(token) {
        Some(v) if v <= u32::from(max) => Ok(v as u8),
        Some(v) => Err(NetpbmError::InvalidData(format!(
            "sample {v} at ({x}, {y}) exceeds max value {max}"
        ))),
        None => Err(NetpbmError::InvalidData(format!(
            "sample at ({x}, {y}) is not a number: {:?}",
            alloc::string::String::from_utf8_lossy(token)
        ))),
    }
}

/// Append the decimal text of `v`.
fn push_decimal(out: &mut Vec<u8>, v: u8) {
    if v >= 100 {
        out.push(b'0' + v / 100);
    }
    if v >= 10 {
        out.push(b'0' + (v / 10) % 10);
    }
    out.push(b'0' + v % 10);
}

fn max_value_of(header: &Header) -> Result<u8, NetpbmError> {
    header.max_value().ok_or_else(|| {
        NetpbmError::InvalidMaxValue(format!("{} header has no max value", header.magic()))
    })
}

//! # netpbm-raster
//!
//! Netpbm (PBM, PGM, PPM) codec with in-memory raster editing.
//!
//! ## Supported Formats
//!
//! - **P1** / **P4** (PBM) — bitmaps, plain text or packed bits
//! - **P2** / **P5** (PGM) — 8-bit grayscale, plain text or raw bytes
//! - **P3** / **P6** (PPM) — 8-bit RGB, plain text or raw bytes
//!
//! Max values from 1 to 255 are accepted. 16-bit samples (max value above
//! 255), PAM (`P7`) and PFM are rejected as
//! [`NetpbmError::UnsupportedVariant`].
//!
//! ## Editing
//!
//! Every family supports [`invert`](Image::invert), [`flip`](Image::flip),
//! [`flop`](Image::flop), [`rotate_90_cw`](Image::rotate_90_cw) and
//! [`rescale_max`](Image::rescale_max). Pixmaps convert down to graymaps and
//! bitmaps, and double as a canvas for lines, rectangles, circles, triangles
//! and polygons. Drawing clips at the canvas edge.
//!
//! ## Usage
//!
//! ```
//! use netpbm_raster::{AnyImage, EncodeRequest, Encoding, ImageInfo, Point, Unstoppable, RGB8};
//!
//! let data = b"P3\n2 2\n255\n0 0 0 0 0 0\n0 0 0 0 0 0\n";
//!
//! // Probe without decoding
//! let info = ImageInfo::from_bytes(data)?;
//! assert_eq!((info.width, info.height), (2, 2));
//!
//! let AnyImage::Pixmap(mut img) = netpbm_raster::decode(data, Unstoppable)? else {
//!     unreachable!()
//! };
//! img.draw_line(Point::new(0, 0), Point::new(1, 1), RGB8::new(255, 0, 0));
//! img.rotate_90_cw();
//!
//! let raw = EncodeRequest::new(&img)
//!     .with_encoding(Encoding::Binary)
//!     .encode(Unstoppable)?;
//! assert!(raw.starts_with(b"P6\n2 2\n255\n"));
//! # Ok::<(), netpbm_raster::NetpbmError>(())
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

mod error;
mod info;
mod limits;

pub mod pnm;

mod decode;
mod draw;
mod encode;
mod export;
mod image;
mod raster;
mod sample;
mod transform;

// Re-exports
pub use decode::{AnyImage, DecodeRequest, decode};
pub use draw::Point;
pub use encode::EncodeRequest;
pub use enough::{Stop, Unstoppable};
pub use error::NetpbmError;
pub use export::RgbaView;
pub use image::{Bitmap, Graymap, Image, Pixmap};
pub use info::ImageInfo;
pub use limits::Limits;
pub use pnm::{Encoding, Family, Header, MagicNumber};
pub use raster::Raster;
pub use rgb::{RGB8, RGBA8};
pub use sample::Sample;

use alloc::string::String;
use enough::StopReason;

/// Errors from Netpbm decoding, encoding and raster editing.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum NetpbmError {
    #[error("malformed header: {0}")]
    MalformedHeader(String),

    #[error("unsupported format variant: {0}")]
    UnsupportedVariant(String),

    #[error("unexpected end of pixel data")]
    TruncatedData,

    #[error("invalid pixel data: {0}")]
    InvalidData(String),

    #[error("raster holds {actual} samples but header declares {width}x{height}")]
    InconsistentDimensions {
        width: u32,
        height: u32,
        actual: usize,
    },

    #[error("invalid max value: {0}")]
    InvalidMaxValue(String),

    #[error("pixel ({x}, {y}) is outside a {width}x{height} raster")]
    IndexOutOfRange {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    },

    #[error("dimensions too large: {width}x{height}")]
    DimensionsTooLarge { width: u32, height: u32 },

    #[error("limit exceeded: {0}")]
    LimitExceeded(String),

    #[error("operation cancelled")]
    Cancelled(StopReason),

    #[cfg(feature = "std")]
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<StopReason> for NetpbmError {
    fn from(r: StopReason) -> Self {
        NetpbmError::Cancelled(r)
    }
}

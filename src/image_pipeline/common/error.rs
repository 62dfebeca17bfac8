use thiserror::Error;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Failed to read input file: {0}")]
    InputReadError(String),

    #[error("Failed to parse batch input: {0}")]
    InputParseError(#[from] serde_json::Error),

    #[error("Error downloading image from {url}: {reason}")]
    FetchError { url: String, reason: String },

    #[error("Failed to build HTTP client: {0}")]
    ClientError(String),

    #[error("Failed to download image from {url}: status code {status}")]
    HttpStatus { url: String, status: u16 },

    #[error("Failed to decode image: {0}")]
    DecodeError(String),

    #[error("Invalid image dimensions: width={0}, height={1}")]
    InvalidDimensions(usize, usize),

    #[error("Invalid stride: {stride} bytes per row, at least {min} required")]
    InvalidStride { stride: usize, min: usize },

    #[error("Pixel buffer too short: {len} bytes, at least {required} required")]
    BufferTooShort { len: usize, required: usize },

    #[error("Unsupported channel count: {0}")]
    UnsupportedChannelCount(usize),

    #[error("Palette index {index} out of range for palette of {len} entries")]
    PaletteIndexOutOfRange { index: u8, len: usize },

    #[error("Image dimensions differ: base {base_width}x{base_height}, candidate {candidate_width}x{candidate_height}")]
    DimensionMismatch {
        base_width: usize,
        base_height: usize,
        candidate_width: usize,
        candidate_height: usize,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, PipelineError>;

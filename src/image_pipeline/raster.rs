//! Raster decoding and normalization module
//!
//! Turns encoded image bytes into validated, canonical RGBA rasters that the
//! comparator can walk without knowing anything about the source format.

mod decoder;
mod standard_decoder;
mod normalizer;
pub mod types;


pub use decoder::RasterDecoder;
pub use standard_decoder::StandardDecoder;
pub use normalizer::Normalizer;
pub use types::{ColorModel, DecodedImage, ImagePair, MismatchCount, RasterImage, RGBA_CHANNELS};

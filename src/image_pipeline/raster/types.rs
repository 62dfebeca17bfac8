//! Raster data types

use std::fmt;

use crate::image_pipeline::common::error::{PipelineError, Result};

/// Channel count of every normalized raster (red, green, blue, alpha).
pub const RGBA_CHANNELS: usize = 4;

/// Native colour model of a decoded image, before normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColorModel {
    /// One intensity byte per pixel
    Gray,
    /// Intensity followed by alpha
    GrayAlpha,
    /// Interleaved [R, G, B]
    Rgb,
    /// Interleaved [R, G, B, A]
    Rgba,
    /// One palette index byte per pixel; entries are RGBA quadruples
    Indexed { palette: Vec<[u8; 4]> },
}

impl ColorModel {
    pub fn bytes_per_pixel(&self) -> usize {
        match self {
            ColorModel::Gray | ColorModel::Indexed { .. } => 1,
            ColorModel::GrayAlpha => 2,
            ColorModel::Rgb => 3,
            ColorModel::Rgba => 4,
        }
    }
}

/// Output of a [`RasterDecoder`](crate::image_pipeline::raster::RasterDecoder).
#[derive(Debug, Clone)]
pub struct DecodedImage {
    /// Width of the image in pixels
    pub width: usize,
    /// Height of the image in pixels
    pub height: usize,
    /// Bytes per row, may include padding
    pub stride: usize,
    /// Colour model of `data`
    pub model: ColorModel,
    /// Row-major sample bytes
    pub data: Vec<u8>,
}

/// A validated, immutable raster buffer.
///
/// Construction checks every shape invariant up front so that consumers can
/// index the buffer without re-validating:
///
/// * `width > 0` and `height > 0`
/// * `channel_count` is 3 or 4
/// * `stride >= width * channel_count`
/// * `pixels.len() >= height * stride`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterImage {
    width: usize,
    height: usize,
    channel_count: usize,
    stride: usize,
    pixels: Vec<u8>,
}

impl RasterImage {
    pub fn new(
        width: usize,
        height: usize,
        channel_count: usize,
        stride: usize,
        pixels: Vec<u8>,
    ) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(PipelineError::InvalidDimensions(width, height));
        }

        if channel_count != 3 && channel_count != RGBA_CHANNELS {
            return Err(PipelineError::UnsupportedChannelCount(channel_count));
        }

        let min_stride = width
            .checked_mul(channel_count)
            .ok_or(PipelineError::InvalidDimensions(width, height))?;
        if stride < min_stride {
            return Err(PipelineError::InvalidStride { stride, min: min_stride });
        }

        let required = height
            .checked_mul(stride)
            .ok_or(PipelineError::InvalidDimensions(width, height))?;
        if pixels.len() < required {
            return Err(PipelineError::BufferTooShort { len: pixels.len(), required });
        }

        Ok(Self {
            width,
            height,
            channel_count,
            stride,
            pixels,
        })
    }

    /// Packed RGBA buffer, `stride = width * 4`.
    pub fn from_rgba(width: usize, height: usize, pixels: Vec<u8>) -> Result<Self> {
        let stride = width.saturating_mul(RGBA_CHANNELS);
        Self::new(width, height, RGBA_CHANNELS, stride, pixels)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn channel_count(&self) -> usize {
        self.channel_count
    }

    pub fn stride(&self) -> usize {
        self.stride
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }
}

/// Number of pixel positions that differ between two rasters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MismatchCount(u64);

impl MismatchCount {
    pub fn new(count: u64) -> Self {
        Self(count)
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for MismatchCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A base/candidate pair of normalized rasters along with where each came from.
#[derive(Debug, Clone)]
pub struct ImagePair {
    base_url: String,
    candidate_url: String,
    base: RasterImage,
    candidate: RasterImage,
}

impl ImagePair {
    pub fn new(
        base_url: impl Into<String>,
        base: RasterImage,
        candidate_url: impl Into<String>,
        candidate: RasterImage,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            candidate_url: candidate_url.into(),
            base,
            candidate,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn candidate_url(&self) -> &str {
        &self.candidate_url
    }

    pub fn base(&self) -> &RasterImage {
        &self.base
    }

    pub fn candidate(&self) -> &RasterImage {
        &self.candidate
    }

    pub fn dimensions_match(&self) -> bool {
        self.base.dimensions() == self.candidate.dimensions()
    }
}

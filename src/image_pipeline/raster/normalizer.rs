use tracing::debug;

use crate::image_pipeline::common::error::{PipelineError, Result};
use crate::image_pipeline::raster::types::{ColorModel, DecodedImage, RasterImage, RGBA_CHANNELS};

const OPAQUE: u8 = u8::MAX;

/// Converts decoded images of any colour model into packed RGBA rasters.
///
/// Grayscale is replicated into R, G and B, palettes are looked up, and
/// sources without alpha get a fully opaque one. The output stride is always
/// `width * 4`, whatever padding the source rows carried.
pub struct Normalizer;

impl Normalizer {
    pub fn normalize(&self, decoded: &DecodedImage) -> Result<RasterImage> {
        let (width, height, stride) = (decoded.width, decoded.height, decoded.stride);
        let model = &decoded.model;
        let data = &decoded.data;

        if width == 0 || height == 0 {
            return Err(PipelineError::InvalidDimensions(width, height));
        }

        let bpp = model.bytes_per_pixel();
        let row_len = width
            .checked_mul(bpp)
            .ok_or(PipelineError::InvalidDimensions(width, height))?;
        if stride < row_len {
            return Err(PipelineError::InvalidStride { stride, min: row_len });
        }

        let required = height
            .checked_mul(stride)
            .ok_or(PipelineError::InvalidDimensions(width, height))?;
        if data.len() < required {
            return Err(PipelineError::BufferTooShort { len: data.len(), required });
        }

        debug!("Normalizing {}x{} {:?} image to RGBA", width, height, model);

        let mut pixels = Vec::with_capacity(width * height * RGBA_CHANNELS);
        for row in data[..required].chunks_exact(stride) {
            let row = &row[..row_len];
            match model {
                ColorModel::Gray => {
                    for &v in row {
                        pixels.extend_from_slice(&[v, v, v, OPAQUE]);
                    }
                }
                ColorModel::GrayAlpha => {
                    for px in row.chunks_exact(2) {
                        pixels.extend_from_slice(&[px[0], px[0], px[0], px[1]]);
                    }
                }
                ColorModel::Rgb => {
                    for px in row.chunks_exact(3) {
                        pixels.extend_from_slice(&[px[0], px[1], px[2], OPAQUE]);
                    }
                }
                ColorModel::Rgba => pixels.extend_from_slice(row),
                ColorModel::Indexed { palette } => {
                    for &index in row {
                        let entry = palette.get(index as usize).ok_or(
                            PipelineError::PaletteIndexOutOfRange {
                                index,
                                len: palette.len(),
                            },
                        )?;
                        pixels.extend_from_slice(entry);
                    }
                }
            }
        }

        RasterImage::from_rgba(width, height, pixels)
    }
}

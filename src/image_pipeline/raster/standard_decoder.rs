//! Decoder backed by the `image` and `png` crates.
//!
//! Indexed PNGs are read with the `png` crate directly so that the palette
//! survives decoding and is expanded by the [`Normalizer`](super::Normalizer).
//! Everything else goes through `image::load_from_memory`.

use std::io::Cursor;

use image::DynamicImage;
use png::{BitDepth, ColorType, Transformations};
use tracing::debug;

use crate::image_pipeline::common::error::{PipelineError, Result};
use crate::image_pipeline::raster::decoder::RasterDecoder;
use crate::image_pipeline::raster::types::{ColorModel, DecodedImage};

const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

/// Alpha assigned to palette entries without a tRNS value.
const OPAQUE: u8 = u8::MAX;

pub struct StandardDecoder;

impl RasterDecoder for StandardDecoder {
    /// Decodes an encoded image into its native colour model.
    ///
    /// 8-bit grayscale, grayscale+alpha, RGB and RGBA sources keep their
    /// model. 16-bit and float sources are reduced to 8-bit RGBA here, since
    /// the comparison works on one byte per channel.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use pixmatch_rs::image_pipeline::{RasterDecoder, StandardDecoder};
    ///
    /// let bytes = std::fs::read("screenshot.png").unwrap();
    /// let decoded = StandardDecoder.decode(&bytes).unwrap();
    /// println!("{}x{}", decoded.width, decoded.height);
    /// ```
    fn decode(&self, data: &[u8]) -> Result<DecodedImage> {
        debug!("Decoding image, {} bytes", data.len());

        if data.starts_with(&PNG_SIGNATURE) && is_indexed_png(data)? {
            return decode_indexed_png(data);
        }

        let image = image::load_from_memory(data)
            .map_err(|e| PipelineError::DecodeError(e.to_string()))?;

        let decoded = from_dynamic(image);
        debug!(
            "Decoded image: {}x{} ({:?})",
            decoded.width, decoded.height, decoded.model
        );
        Ok(decoded)
    }
}

fn png_error(e: png::DecodingError) -> PipelineError {
    PipelineError::DecodeError(format!("PNG decode error: {}", e))
}

fn is_indexed_png(data: &[u8]) -> Result<bool> {
    let reader = png::Decoder::new(Cursor::new(data))
        .read_info()
        .map_err(png_error)?;
    Ok(reader.info().color_type == ColorType::Indexed)
}

fn decode_indexed_png(data: &[u8]) -> Result<DecodedImage> {
    let mut decoder = png::Decoder::new(Cursor::new(data));
    decoder.set_transformations(Transformations::IDENTITY);
    let mut reader = decoder.read_info().map_err(png_error)?;

    let width = reader.info().width as usize;
    let height = reader.info().height as usize;
    let bits = match reader.info().bit_depth {
        BitDepth::One => 1,
        BitDepth::Two => 2,
        BitDepth::Four => 4,
        BitDepth::Eight => 8,
        BitDepth::Sixteen => {
            return Err(PipelineError::DecodeError(
                "16-bit indexed PNG is not valid".to_string(),
            ));
        }
    };

    let palette = {
        let info = reader.info();
        let rgb = info
            .palette
            .as_ref()
            .ok_or_else(|| PipelineError::DecodeError("indexed PNG without PLTE chunk".to_string()))?;
        let trns = info.trns.as_deref().unwrap_or(&[]);
        rgb.chunks_exact(3)
            .enumerate()
            .map(|(i, c)| [c[0], c[1], c[2], trns.get(i).copied().unwrap_or(OPAQUE)])
            .collect::<Vec<_>>()
    };

    let buf_size = reader
        .output_buffer_size()
        .ok_or_else(|| PipelineError::DecodeError("failed to get output buffer size".to_string()))?;
    let mut buf = vec![0; buf_size];
    let frame = reader.next_frame(&mut buf).map_err(png_error)?;
    let line_size = frame.line_size;

    // Unpack sub-byte indices so the normalizer always sees one byte per pixel.
    let mask = ((1u16 << bits) - 1) as u8;
    let mut indices = Vec::with_capacity(width * height);
    for row in buf[..frame.buffer_size()].chunks(line_size.max(1)).take(height) {
        for x in 0..width {
            let bit = x * bits;
            let shift = 8 - bits - (bit % 8);
            let byte = row.get(bit / 8).copied().unwrap_or(0);
            indices.push((byte >> shift) & mask);
        }
    }

    debug!(
        "Decoded indexed PNG: {}x{}, {}-bit, {} palette entries",
        width,
        height,
        bits,
        palette.len()
    );

    Ok(DecodedImage {
        width,
        height,
        stride: width,
        model: ColorModel::Indexed { palette },
        data: indices,
    })
}

fn from_dynamic(image: DynamicImage) -> DecodedImage {
    let width = image.width() as usize;
    let height = image.height() as usize;

    let (model, data) = match image {
        DynamicImage::ImageLuma8(buf) => (ColorModel::Gray, buf.into_raw()),
        DynamicImage::ImageLumaA8(buf) => (ColorModel::GrayAlpha, buf.into_raw()),
        DynamicImage::ImageRgb8(buf) => (ColorModel::Rgb, buf.into_raw()),
        DynamicImage::ImageRgba8(buf) => (ColorModel::Rgba, buf.into_raw()),
        other => (ColorModel::Rgba, other.to_rgba8().into_raw()),
    };

    let stride = width * model.bytes_per_pixel();
    DecodedImage {
        width,
        height,
        stride,
        model,
        data,
    }
}

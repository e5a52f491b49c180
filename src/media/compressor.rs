// SPDX-License-Identifier: MPL-2.0
//! Image compression engine.
//!
//! Decodes the input, corrects JPEG orientation, resizes to the target size,
//! picks the output type and re-encodes. In strict mode an output that grew
//! without any resize or type change is discarded in favour of the input.

use super::dimensions::{target_size, DimensionBounds};
use super::orientation::{apply_orientation, read_orientation};
use super::CompressOptions;
use crate::error::{Error, Result};
use image_rs::codecs::jpeg::JpegEncoder;
use image_rs::codecs::png::{CompressionType, FilterType as PngFilter, PngEncoder};
use image_rs::codecs::webp::WebPEncoder;
use image_rs::imageops::FilterType;
use image_rs::{DynamicImage, GenericImageView, Limits, Rgb, RgbImage, Rgba};
use std::sync::Arc;

pub const MIME_JPEG: &str = "image/jpeg";
pub const MIME_PNG: &str = "image/png";
pub const MIME_WEBP: &str = "image/webp";

/// Encoded input handed to a compressor.
#[derive(Debug, Clone)]
pub struct SourceImage {
    pub bytes: Arc<[u8]>,
    pub mime_type: String,
}

/// Encoded result of a compression run.
#[derive(Debug, Clone)]
pub struct CompressedOutput {
    pub bytes: Arc<[u8]>,
    pub mime_type: String,
    pub width: u32,
    pub height: u32,
}

/// Seam between the orchestrator and the encoding engine.
pub trait Compressor: Send + Sync {
    fn compress(&self, input: &SourceImage, options: &CompressOptions) -> Result<CompressedOutput>;
}

/// Upper bound for the resized buffer when `image` sets no allocation limit.
const FALLBACK_MAX_ALLOC: u64 = 512 * 1024 * 1024;

/// Default engine backed by the `image` crate.
#[derive(Debug, Clone, Copy)]
pub struct ImageCompressor {
    /// Return the input when the output grew and nothing else changed.
    pub strict: bool,
    pub resize_filter: FilterType,
    /// Largest resize buffer in bytes; bigger targets are rejected.
    pub max_alloc: u64,
}

impl Default for ImageCompressor {
    fn default() -> Self {
        Self {
            strict: true,
            resize_filter: FilterType::Lanczos3,
            max_alloc: Limits::default().max_alloc.unwrap_or(FALLBACK_MAX_ALLOC),
        }
    }
}

/// Bytes per pixel of the `Rgba<f32>` buffer used by the horizontal resize pass.
const SAMPLING_BYTES_PER_PIXEL: u64 = 16;

/// Rejects a resize whose buffers would exceed `max_alloc` bytes.
///
/// Counts the intermediate sampling buffer (`width` x `source_height`) and
/// the output buffer. An allocation that large aborts the process instead of
/// failing.
pub fn check_resize_budget(
    source_height: u32,
    width: u32,
    height: u32,
    bytes_per_pixel: u8,
    max_alloc: u64,
) -> Result<()> {
    let sampling = u64::from(width)
        .saturating_mul(u64::from(source_height))
        .saturating_mul(SAMPLING_BYTES_PER_PIXEL);
    let output = u64::from(width)
        .saturating_mul(u64::from(height))
        .saturating_mul(u64::from(bytes_per_pixel));
    let required = sampling.saturating_add(output);
    if required > max_alloc {
        return Err(Error::Encode(format!(
            "target size {width}x{height} needs {required} bytes, limit is {max_alloc}"
        )));
    }
    Ok(())
}

/// Encoder quality in 1..=100 for a 0.0..=1.0 setting.
pub fn encoder_quality(quality: f32) -> u8 {
    ((quality * 100.0).round() as i32).clamp(1, 100) as u8
}

/// Output media type for an input of the given type and size.
///
/// Types listed for conversion switch to JPEG above the size threshold.
/// Types the engine cannot encode fall back to PNG.
pub fn output_mime_type(input_mime: &str, input_size: u64, options: &CompressOptions) -> &'static str {
    let converts = options.convert_types.iter().any(|t| t == input_mime)
        && options.convert_size.is_some_and(|threshold| input_size > threshold);
    if converts {
        return MIME_JPEG;
    }
    match input_mime {
        MIME_JPEG => MIME_JPEG,
        MIME_WEBP => MIME_WEBP,
        _ => MIME_PNG,
    }
}

/// Composites the image over white and drops the alpha channel.
fn flatten_onto_white(image: &DynamicImage) -> RgbImage {
    if !image.color().has_alpha() {
        return image.to_rgb8();
    }
    let rgba = image.to_rgba8();
    let mut out = RgbImage::new(rgba.width(), rgba.height());
    for (x, y, Rgba([r, g, b, a])) in rgba.enumerate_pixels().map(|(x, y, p)| (x, y, *p)) {
        let alpha = u32::from(a);
        let blend = |c: u8| ((u32::from(c) * alpha + 255 * (255 - alpha) + 127) / 255) as u8;
        out.put_pixel(x, y, Rgb([blend(r), blend(g), blend(b)]));
    }
    out
}

/// Converts to 8-bit RGB or RGBA, which every encoder accepts.
fn to_8bit(image: DynamicImage) -> DynamicImage {
    match image {
        DynamicImage::ImageRgb8(_) | DynamicImage::ImageRgba8(_) => image,
        other if other.color().has_alpha() => DynamicImage::ImageRgba8(other.to_rgba8()),
        other => DynamicImage::ImageRgb8(other.to_rgb8()),
    }
}

fn encode(image: DynamicImage, mime_type: &str, quality: f32) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    match mime_type {
        MIME_JPEG => {
            let rgb = DynamicImage::ImageRgb8(flatten_onto_white(&image));
            let encoder = JpegEncoder::new_with_quality(&mut bytes, encoder_quality(quality));
            rgb.write_with_encoder(encoder)?;
        }
        MIME_PNG => {
            let encoder =
                PngEncoder::new_with_quality(&mut bytes, CompressionType::Best, PngFilter::Adaptive);
            to_8bit(image).write_with_encoder(encoder)?;
        }
        MIME_WEBP => {
            // Lossless only, quality does not apply.
            let encoder = WebPEncoder::new_lossless(&mut bytes);
            to_8bit(image).write_with_encoder(encoder)?;
        }
        other => return Err(Error::UnsupportedType(other.to_string())),
    }
    Ok(bytes)
}

impl Compressor for ImageCompressor {
    fn compress(&self, input: &SourceImage, options: &CompressOptions) -> Result<CompressedOutput> {
        let mut image = image_rs::load_from_memory(&input.bytes)?;

        if input.mime_type == MIME_JPEG {
            if let Some(orientation) = read_orientation(&input.bytes) {
                image = apply_orientation(image, orientation);
            }
        }

        let (natural_width, natural_height) = image.dimensions();
        let bounds = DimensionBounds {
            max_width: options.max_width,
            max_height: options.max_height,
            width: options.width,
            height: options.height,
        };
        let (width, height) = target_size(natural_width, natural_height, &bounds);
        let resized = (width, height) != (natural_width, natural_height);
        if resized {
            check_resize_budget(
                natural_height,
                width,
                height,
                image.color().bytes_per_pixel(),
                self.max_alloc,
            )?;
            image = image.resize_exact(width, height, self.resize_filter);
        }

        let input_size = input.bytes.len() as u64;
        let mime_type = output_mime_type(&input.mime_type, input_size, options);
        let bytes = encode(image, mime_type, options.quality)?;

        tracing::debug!(
            input_size,
            output_size = bytes.len(),
            mime_type,
            width,
            height,
            "encoded image"
        );

        if self.strict && bytes.len() as u64 > input_size && mime_type == input.mime_type && !resized {
            tracing::debug!("output larger than input, keeping input bytes");
            return Ok(CompressedOutput {
                bytes: Arc::clone(&input.bytes),
                mime_type: input.mime_type.clone(),
                width: natural_width,
                height: natural_height,
            });
        }

        Ok(CompressedOutput {
            bytes: bytes.into(),
            mime_type: mime_type.to_string(),
            width,
            height,
        })
    }
}

/// Runs a compressor on the blocking pool.
pub async fn compress_in_background(
    compressor: Arc<dyn Compressor>,
    input: SourceImage,
    options: CompressOptions,
) -> Result<CompressedOutput> {
    tokio::task::spawn_blocking(move || compressor.compress(&input, &options)).await?
}

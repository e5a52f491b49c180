// SPDX-License-Identifier: MPL-2.0
//! Image records, compression settings and the compression engine.
//!
//! - [`intake`]: reading files and classifying their media type
//! - [`preview`]: revocable preview handles
//! - [`compressor`]: the [`Compressor`] seam and its `image` crate backend
//! - [`metrics`]: size formatting and savings

pub mod compressor;
pub mod dimensions;
pub mod intake;
pub mod metrics;
pub mod orientation;
pub mod preview;

pub use compressor::{CompressedOutput, Compressor, ImageCompressor, SourceImage};
pub use intake::IncomingFile;
pub use preview::{PreviewHandle, PreviewRegistry};

use crate::config::defaults::{
    DEFAULT_CONVERT_SIZE, DEFAULT_CONVERT_TYPES, DEFAULT_MAX_HEIGHT, DEFAULT_MAX_WIDTH,
    DEFAULT_QUALITY,
};
use std::sync::Arc;

/// Name prefix of successfully compressed images.
pub const COMPRESSED_NAME_PREFIX: &str = "compressed_";

/// An encoded image together with its preview.
#[derive(Debug, Clone)]
pub struct ImageRecord {
    pub payload: Arc<[u8]>,
    pub mime_type: String,
    pub preview: PreviewHandle,
    pub size: u64,
    pub name: String,
}

impl ImageRecord {
    /// Builds a record and registers its preview.
    pub fn new(
        name: impl Into<String>,
        mime_type: impl Into<String>,
        payload: Arc<[u8]>,
        registry: &mut PreviewRegistry,
    ) -> Self {
        let preview = registry.create(&payload);
        Self {
            size: payload.len() as u64,
            payload,
            mime_type: mime_type.into(),
            preview,
            name: name.into(),
        }
    }

    /// Builds the original record from a file that passed intake.
    pub fn from_file(file: IncomingFile, registry: &mut PreviewRegistry) -> Self {
        Self::new(file.name, file.mime_type, file.bytes.into(), registry)
    }

    /// Builds the record of a successful compression of `original`.
    pub fn from_output(
        original: &ImageRecord,
        output: CompressedOutput,
        registry: &mut PreviewRegistry,
    ) -> Self {
        Self::new(
            format!("{COMPRESSED_NAME_PREFIX}{}", original.name),
            output.mime_type,
            output.bytes,
            registry,
        )
    }

    pub fn source(&self) -> SourceImage {
        SourceImage {
            bytes: Arc::clone(&self.payload),
            mime_type: self.mime_type.clone(),
        }
    }
}

/// User-editable compression settings.
#[derive(Debug, Clone, PartialEq)]
pub struct CompressionSettings {
    /// Encoder quality in `0.0..=1.0`.
    pub quality: f32,
    pub max_width: Option<u32>,
    pub max_height: Option<u32>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    /// Inputs larger than this (bytes) with a type in `convert_types` become JPEG.
    pub convert_size: Option<u64>,
    pub convert_types: Vec<String>,
}

impl Default for CompressionSettings {
    fn default() -> Self {
        Self {
            quality: DEFAULT_QUALITY,
            max_width: Some(DEFAULT_MAX_WIDTH),
            max_height: Some(DEFAULT_MAX_HEIGHT),
            width: None,
            height: None,
            convert_size: Some(DEFAULT_CONVERT_SIZE),
            convert_types: DEFAULT_CONVERT_TYPES.iter().map(|t| (*t).to_string()).collect(),
        }
    }
}

/// The two independent dimension switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DimensionToggles {
    pub limit_dimensions: bool,
    pub specific_dimensions: bool,
}

impl Default for DimensionToggles {
    fn default() -> Self {
        Self {
            limit_dimensions: true,
            specific_dimensions: false,
        }
    }
}

/// Options handed to a [`Compressor`].
#[derive(Debug, Clone, PartialEq)]
pub struct CompressOptions {
    pub quality: f32,
    pub max_width: Option<u32>,
    pub max_height: Option<u32>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub convert_size: Option<u64>,
    pub convert_types: Vec<String>,
}

impl CompressOptions {
    /// Maps panel settings to compressor options.
    ///
    /// The max box is only sent while limiting is on. The explicit size is only
    /// sent while specific dimensions are on and both sides are set. Both may
    /// apply at once.
    pub fn from_settings(settings: &CompressionSettings, toggles: DimensionToggles) -> Self {
        let (max_width, max_height) = if toggles.limit_dimensions {
            (settings.max_width, settings.max_height)
        } else {
            (None, None)
        };
        let (width, height) = match (toggles.specific_dimensions, settings.width, settings.height) {
            (true, Some(w), Some(h)) => (Some(w), Some(h)),
            _ => (None, None),
        };

        Self {
            quality: settings.quality,
            max_width,
            max_height,
            width,
            height,
            convert_size: settings.convert_size,
            convert_types: settings.convert_types.clone(),
        }
    }
}

/// How the compressed record came to be.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompressionOutcome {
    Compressed,
    /// The compressor failed and the original stands in for the result.
    FallbackToOriginal { reason: String },
}

/// The compressed side of a session.
#[derive(Debug, Clone)]
pub struct CompressedImage {
    pub record: ImageRecord,
    pub outcome: CompressionOutcome,
}

impl CompressedImage {
    pub fn is_fallback(&self) -> bool {
        matches!(self.outcome, CompressionOutcome::FallbackToOriginal { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> CompressionSettings {
        CompressionSettings {
            width: Some(800),
            height: Some(600),
            ..CompressionSettings::default()
        }
    }

    fn toggles(limit: bool, specific: bool) -> DimensionToggles {
        DimensionToggles {
            limit_dimensions: limit,
            specific_dimensions: specific,
        }
    }

    #[test]
    fn defaults_match_initial_panel_state() {
        let defaults = CompressionSettings::default();
        assert!((defaults.quality - 0.8).abs() < f32::EPSILON);
        assert_eq!(defaults.max_width, Some(1920));
        assert_eq!(defaults.max_height, Some(1080));
        assert_eq!(defaults.width, None);
        assert_eq!(defaults.convert_size, Some(5_000_000));
        assert_eq!(defaults.convert_types, vec!["image/png".to_string()]);
        assert_eq!(DimensionToggles::default(), toggles(true, false));
    }

    #[test]
    fn limit_only_sends_max_box() {
        let options = CompressOptions::from_settings(&settings(), toggles(true, false));
        assert_eq!((options.max_width, options.max_height), (Some(1920), Some(1080)));
        assert_eq!((options.width, options.height), (None, None));
    }

    #[test]
    fn specific_only_sends_explicit_size() {
        let options = CompressOptions::from_settings(&settings(), toggles(false, true));
        assert_eq!((options.max_width, options.max_height), (None, None));
        assert_eq!((options.width, options.height), (Some(800), Some(600)));
    }

    #[test]
    fn both_toggles_are_additive() {
        let options = CompressOptions::from_settings(&settings(), toggles(true, true));
        assert_eq!(options.max_width, Some(1920));
        assert_eq!(options.width, Some(800));
    }

    #[test]
    fn neither_toggle_sends_no_dimensions() {
        let options = CompressOptions::from_settings(&settings(), toggles(false, false));
        assert_eq!(options.max_width, None);
        assert_eq!(options.width, None);
        assert_eq!(options.convert_size, Some(5_000_000));
    }

    #[test]
    fn explicit_size_requires_both_sides() {
        let half = CompressionSettings {
            height: None,
            ..settings()
        };
        let options = CompressOptions::from_settings(&half, toggles(false, true));
        assert_eq!((options.width, options.height), (None, None));
    }

    #[test]
    fn quality_passes_through() {
        let custom = CompressionSettings {
            quality: 0.3,
            ..settings()
        };
        let options = CompressOptions::from_settings(&custom, toggles(true, false));
        assert!((options.quality - 0.3).abs() < f32::EPSILON);
    }

    #[test]
    fn records_measure_their_payload() {
        let mut registry = PreviewRegistry::new();
        let record = ImageRecord::new("a.png", "image/png", Arc::from(&[1u8, 2, 3][..]), &mut registry);
        assert_eq!(record.size, 3);
        assert_eq!(registry.live_count(), 1);
    }

    #[test]
    fn compressed_records_are_prefixed() {
        let mut registry = PreviewRegistry::new();
        let original = ImageRecord::new("cat.png", "image/png", Arc::from(&[0u8; 10][..]), &mut registry);
        let output = CompressedOutput {
            bytes: Arc::from(&[0u8; 4][..]),
            mime_type: "image/jpeg".to_string(),
            width: 1,
            height: 1,
        };
        let compressed = ImageRecord::from_output(&original, output, &mut registry);
        assert_eq!(compressed.name, "compressed_cat.png");
        assert_eq!(compressed.mime_type, "image/jpeg");
        assert_eq!(compressed.size, 4);
        assert!(!compressed.preview.same_preview(&original.preview));
    }
}

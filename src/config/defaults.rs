// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! This module serves as the single source of truth for default values
//! used across the application. Constants are organized by category.
//!
//! # Categories
//!
//! - **Quality**: Compression quality bounds and slider step
//! - **Dimensions**: Default maximum box for the "limit dimensions" switch
//! - **Conversion**: Size threshold and source types converted to JPEG
//! - **Comparison**: Split-view slider bounds

// ==========================================================================
// Quality Defaults
// ==========================================================================

/// Default compression quality (fraction of 1.0).
pub const DEFAULT_QUALITY: f32 = 0.8;

/// Minimum quality selectable from the slider.
pub const MIN_QUALITY: f32 = 0.1;

/// Maximum quality selectable from the slider.
pub const MAX_QUALITY: f32 = 1.0;

/// Slider step for quality adjustments.
pub const QUALITY_STEP: f32 = 0.1;

// ==========================================================================
// Dimension Defaults
// ==========================================================================

/// Default maximum output width when dimensions are limited.
pub const DEFAULT_MAX_WIDTH: u32 = 1920;

/// Default maximum output height when dimensions are limited.
pub const DEFAULT_MAX_HEIGHT: u32 = 1080;

/// Placeholder shown in the exact width input.
pub const PLACEHOLDER_WIDTH: u32 = 800;

/// Placeholder shown in the exact height input.
pub const PLACEHOLDER_HEIGHT: u32 = 600;

// ==========================================================================
// Conversion Defaults
// ==========================================================================

/// Files of a convertible type larger than this many bytes are written as JPEG.
pub const DEFAULT_CONVERT_SIZE: u64 = 5_000_000;

/// MIME types eligible for JPEG conversion.
pub const DEFAULT_CONVERT_TYPES: &[&str] = &["image/png"];

// ==========================================================================
// Comparison Defaults
// ==========================================================================

/// Initial split position of the comparison slider, in percent.
pub const DEFAULT_SPLIT_PERCENT: u8 = 50;

/// Maximum split position, in percent.
pub const MAX_SPLIT_PERCENT: u8 = 100;

// ==========================================================================
// Compile-time Validation
// ==========================================================================

const _: () = {
    assert!(MIN_QUALITY > 0.0);
    assert!(MAX_QUALITY <= 1.0);
    assert!(DEFAULT_QUALITY >= MIN_QUALITY);
    assert!(DEFAULT_QUALITY <= MAX_QUALITY);
    assert!(QUALITY_STEP > 0.0);

    assert!(DEFAULT_MAX_WIDTH > 0);
    assert!(DEFAULT_MAX_HEIGHT > 0);

    assert!(DEFAULT_SPLIT_PERCENT <= MAX_SPLIT_PERCENT);
};

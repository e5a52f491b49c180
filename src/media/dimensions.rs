// SPDX-License-Identifier: MPL-2.0
//! Output size computation.
//!
//! Requested sizes are fitted inside their box while keeping the aspect ratio.
//! The explicit width/height box is applied first, then clamped by the maximum
//! box. Without an explicit box the natural size is used, so images are never
//! upscaled by the maximum box alone.

/// Dimension constraints of a compression run. `None` means unbounded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DimensionBounds {
    pub max_width: Option<u32>,
    pub max_height: Option<u32>,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

/// Removes floating point noise such as `0.1 + 0.2 = 0.30000000000000004`.
fn normalize(value: f64) -> f64 {
    const TIMES: f64 = 100_000_000_000.0;
    if value.abs() < TIMES {
        (value * TIMES).round() / TIMES
    } else {
        value
    }
}

/// Completes a partial box from the aspect ratio, shrinking the wider side
/// when both sides are given.
fn contain(aspect: f64, width: Option<f64>, height: Option<f64>) -> (Option<f64>, Option<f64>) {
    match (width, height) {
        (Some(w), Some(h)) => {
            if h * aspect > w {
                (Some(w), Some(w / aspect))
            } else {
                (Some(h * aspect), Some(h))
            }
        }
        (Some(w), None) => (Some(w), Some(w / aspect)),
        (None, Some(h)) => (Some(h * aspect), Some(h)),
        (None, None) => (None, None),
    }
}

fn positive(value: Option<u32>) -> Option<f64> {
    value.filter(|v| *v > 0).map(f64::from)
}

/// Computes the output size for an image of the given natural size.
///
/// The result is at least 1×1.
pub fn target_size(natural_width: u32, natural_height: u32, bounds: &DimensionBounds) -> (u32, u32) {
    if natural_width == 0 || natural_height == 0 {
        return (natural_width.max(1), natural_height.max(1));
    }
    let aspect = f64::from(natural_width) / f64::from(natural_height);

    let (max_w, max_h) = contain(aspect, positive(bounds.max_width), positive(bounds.max_height));
    let (w, h) = contain(aspect, positive(bounds.width), positive(bounds.height));

    let width = w.unwrap_or(f64::from(natural_width)).min(max_w.unwrap_or(f64::INFINITY));
    let height = h.unwrap_or(f64::from(natural_height)).min(max_h.unwrap_or(f64::INFINITY));

    let clamp = |value: f64| (normalize(value).floor() as u32).max(1);
    (clamp(width), clamp(height))
}

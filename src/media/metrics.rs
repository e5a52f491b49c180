// SPDX-License-Identifier: MPL-2.0
//! Derived size metrics shown by the comparison and download panels.

const UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];
const KIB: f64 = 1024.0;

/// Rounds half-way cases towards positive infinity (`-2.5` → `-2`, `2.5` → `3`).
fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

/// Percentage of the original size removed by compression, rounded to an
/// integer. `None` for an empty original.
///
/// Negative when the compressed file is larger.
pub fn size_reduction_percent(original: u64, compressed: u64) -> Option<i64> {
    if original == 0 {
        return None;
    }
    let ratio = (original as f64 - compressed as f64) / original as f64 * 100.0;
    Some(round_half_up(ratio))
}

/// Absolute and relative savings of a compressed file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Savings {
    pub bytes_saved: i64,
    pub percent_saved: i64,
}

impl Savings {
    /// Computes savings; `None` when there is no compressed file.
    pub fn between(original: u64, compressed: Option<u64>) -> Option<Self> {
        let compressed = compressed?;
        Some(Self {
            bytes_saved: original as i64 - compressed as i64,
            percent_saved: size_reduction_percent(original, compressed).unwrap_or(0),
        })
    }
}

/// Human readable size using 1024-based units and at most two decimals
/// (`1536` → `1.5 KB`, `0` → `0 Bytes`).
pub fn format_file_size(bytes: i64) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }
    let sign = if bytes < 0 { "-" } else { "" };
    let value = bytes.unsigned_abs() as f64;
    let exponent = ((value.ln() / KIB.ln()).floor() as usize).min(UNITS.len() - 1);
    let scaled = value / KIB.powi(exponent as i32);

    format!("{sign}{} {}", trim_decimals(scaled), UNITS[exponent])
}

fn trim_decimals(value: f64) -> String {
    let fixed = format!("{value:.2}");
    let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
    trimmed.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reduction_of_sixty_percent() {
        assert_eq!(size_reduction_percent(1_000_000, 400_000), Some(60));
    }

    #[test]
    fn reduction_rounds_to_nearest() {
        // 33.33..% and 66.66..%
        assert_eq!(size_reduction_percent(3, 2), Some(33));
        assert_eq!(size_reduction_percent(3, 1), Some(67));
        // exact half rounds up
        assert_eq!(size_reduction_percent(200, 199), Some(1));
    }

    #[test]
    fn identical_sizes_reduce_by_zero() {
        assert_eq!(size_reduction_percent(1234, 1234), Some(0));
    }

    #[test]
    fn growth_is_negative() {
        assert_eq!(size_reduction_percent(100, 150), Some(-50));
    }

    #[test]
    fn empty_original_has_no_reduction() {
        assert_eq!(size_reduction_percent(0, 10), None);
    }

    #[test]
    fn savings_hidden_without_compressed_file() {
        assert_eq!(Savings::between(1000, None), None);
    }

    #[test]
    fn savings_report_bytes_and_percent() {
        let savings = Savings::between(1_000_000, Some(400_000)).unwrap();
        assert_eq!(savings.bytes_saved, 600_000);
        assert_eq!(savings.percent_saved, 60);
    }

    #[test]
    fn format_zero_bytes() {
        assert_eq!(format_file_size(0), "0 Bytes");
    }

    #[test]
    fn format_small_sizes_in_bytes() {
        assert_eq!(format_file_size(500), "500 Bytes");
    }

    #[test]
    fn format_trims_trailing_zeros() {
        assert_eq!(format_file_size(1024), "1 KB");
        assert_eq!(format_file_size(1536), "1.5 KB");
        assert_eq!(format_file_size(1_572_864), "1.5 MB");
    }

    #[test]
    fn format_keeps_two_decimals() {
        assert_eq!(format_file_size(1_000_000), "976.56 KB");
    }

    #[test]
    fn format_handles_extreme_values() {
        assert_eq!(format_file_size(i64::MIN), "-8589934592 GB");
        assert_eq!(format_file_size(i64::MAX), "8589934592 GB");
    }

    #[test]
    fn format_caps_at_gigabytes() {
        assert_eq!(format_file_size(2 * 1024_i64.pow(4)), "2048 GB");
    }

    #[test]
    fn format_negative_sizes_with_sign() {
        assert_eq!(format_file_size(-2048), "-2 KB");
    }
}

//! Numeric conversion helpers centralizing safe numeric casts.

use num_traits::cast::cast;

/// Round a f64 and clamp it to the i32 range, returning 0 for NaN values.
#[must_use]
pub fn round_f64_to_i32(value: f64) -> i32 {
    if value.is_nan() {
        return 0;
    }
    let min = cast::<i32, f64>(i32::MIN).unwrap_or(f64::MIN);
    let max = cast::<i32, f64>(i32::MAX).unwrap_or(f64::MAX);
    let clamped = value.clamp(min, max).round();
    cast::<f64, i32>(clamped).unwrap_or(0)
}

/// Convert i64 to f64 while allowing precision loss in a single location.
#[must_use]
pub fn i64_to_f64(value: i64) -> f64 {
    cast::<i64, f64>(value).unwrap_or(0.0)
}

/// Convert usize to f64 while allowing precision loss in a single location.
#[must_use]
pub fn usize_to_f64(value: usize) -> f64 {
    cast::<usize, f64>(value).unwrap_or(0.0)
}

/// Whole dollars represented by an amount of cents.
#[must_use]
pub fn cents_to_dollars(cents: i64) -> f64 {
    i64_to_f64(cents) / 100.0
}

/// Arithmetic mean of `sum` over `count` samples, `None` when there are none.
#[must_use]
pub fn mean(sum: u64, count: usize) -> Option<f64> {
    if count == 0 {
        return None;
    }
    let sum = cast::<u64, f64>(sum)?;
    let count = cast::<usize, f64>(count)?;
    Some(sum / count)
}

/// Format cents as a dollar string (`$12.50`).
#[must_use]
pub fn format_cents(cents: i64) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let abs = cents.unsigned_abs();
    format!("{sign}${}.{:02}", abs / 100, abs % 100)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounders_cover_ranges() {
        assert_eq!(round_f64_to_i32(1.6), 2);
        assert_eq!(round_f64_to_i32(-4.4), -4);
        assert_eq!(round_f64_to_i32(f64::NAN), 0);
        assert_eq!(round_f64_to_i32(f64::from(i32::MAX) * 2.0), i32::MAX);
    }

    #[test]
    fn float_conversions_keep_small_values_exact() {
        assert_eq!(i64_to_f64(-250), -250.0);
        assert_eq!(usize_to_f64(12), 12.0);
    }

    #[test]
    fn mean_handles_empty_samples() {
        assert_eq!(mean(10, 0), None);
        assert_eq!(mean(900, 2), Some(450.0));
    }

    #[test]
    fn cents_render_as_dollars() {
        assert_eq!(format_cents(80_000), "$800.00");
        assert_eq!(format_cents(1_205), "$12.05");
        assert_eq!(format_cents(-50), "-$0.50");
        assert!((cents_to_dollars(12_000) - 120.0).abs() < f64::EPSILON);
    }
}

//! Capacity tag parsing and marker scaling.

use crate::config::MarkerConfig;

/// Parse the leading decimal integer of a tag value.
///
/// Leading whitespace and a single sign are skipped, then the longest run of
/// ASCII digits is read; anything after it is ignored. Returns `None` when no
/// digit follows. Only base 10 is recognised: `"0x10"` reads as `0`, where
/// JavaScript's `parseInt` would switch to hexadecimal.
///
/// # Examples
/// ```
/// use bikeway_render::marker::leading_integer;
///
/// assert_eq!(leading_integer("12"), Some(12.0));
/// assert_eq!(leading_integer(" 8 spaces"), Some(8.0));
/// assert_eq!(leading_integer("1.5"), Some(1.0));
/// assert_eq!(leading_integer("-3"), Some(-3.0));
/// assert_eq!(leading_integer("0x10"), Some(0.0));
/// assert_eq!(leading_integer("many"), None);
/// ```
#[must_use]
pub fn leading_integer(raw: &str) -> Option<f64> {
    let trimmed = raw.trim_start();
    let unsigned = trimmed.strip_prefix(['-', '+']).unwrap_or(trimmed);
    let digit_count = unsigned
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(unsigned.len());
    if digit_count == 0 {
        return None;
    }
    let sign_len = trimmed.len() - unsigned.len();
    trimmed.get(..sign_len + digit_count)?.parse::<f64>().ok()
}

/// Marker scale for a parsed capacity.
///
/// `default_scale + capacity / capacity_divisor`, capped at `max_scale`. A
/// missing capacity yields NaN, which the cap leaves untouched.
#[must_use]
#[expect(
    clippy::float_arithmetic,
    reason = "scale grows linearly with capacity"
)]
pub fn capacity_scale(capacity: Option<f64>, config: &MarkerConfig) -> f64 {
    let Some(count) = capacity else {
        return f64::NAN;
    };
    let scale = config.default_scale + count / config.capacity_divisor;
    if scale > config.max_scale {
        config.max_scale
    } else {
        scale
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn config() -> MarkerConfig {
        MarkerConfig::default()
    }

    #[rstest]
    #[case("0", Some(0.0))]
    #[case("+7", Some(7.0))]
    #[case("\t42", Some(42.0))]
    #[case("20-30", Some(20.0))]
    #[case("-12", Some(-12.0))]
    #[case("0x10", Some(0.0))]
    #[case("+-3", None)]
    #[case("12abc", Some(12.0))]
    #[case("", None)]
    #[case("-", None)]
    #[case("abc12", None)]
    #[case("½", None)]
    fn parses_leading_digits(#[case] raw: &str, #[case] expected: Option<f64>) {
        assert_eq!(leading_integer(raw), expected);
    }

    #[rstest]
    #[case(0.0, 0.5)]
    #[case(15.0, 1.0)]
    #[case(45.0, 2.0)]
    #[case(300.0, 2.0)]
    fn scales_with_capacity(config: MarkerConfig, #[case] capacity: f64, #[case] expected: f64) {
        let scale = capacity_scale(Some(capacity), &config);
        assert!(
            (scale - expected).abs() < 1e-9,
            "capacity {capacity} gave {scale}"
        );
    }

    #[rstest]
    fn missing_capacity_is_nan(config: MarkerConfig) {
        assert!(capacity_scale(None, &config).is_nan());
    }

    #[rstest]
    fn negative_capacity_shrinks_marker(config: MarkerConfig) {
        assert!(capacity_scale(Some(-15.0), &config).abs() < 1e-9);
    }
}

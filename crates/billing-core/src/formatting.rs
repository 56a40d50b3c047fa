/// Round `value` to `decimal_places`, half away from zero.
///
/// # Examples
///
/// ```
/// use billing_core::formatting::round_to;
///
/// assert_eq!(round_to(12.345_6, 2), 12.35);
/// assert_eq!(round_to(-0.125, 1), -0.1);
/// assert_eq!(round_to(7.0, 0), 7.0);
/// ```
pub fn round_to(value: f64, decimal_places: u32) -> f64 {
    let factor = 10_f64.powi(decimal_places as i32);
    (value * factor).round() / factor
}

/// Format a floating-point number with thousands separators and a fixed number
/// of decimal places.
///
/// # Examples
///
/// ```
/// use billing_core::formatting::format_number;
///
/// assert_eq!(format_number(1234.5,  1), "1,234.5");
/// assert_eq!(format_number(1234567.0, 0), "1,234,567");
/// assert_eq!(format_number(0.0, 2), "0.00");
/// assert_eq!(format_number(-9876.5, 1), "-9,876.5");
/// ```
pub fn format_number(value: f64, decimals: u32) -> String {
    let factor = 10_f64.powi(decimals as i32);
    // Scale up by one ULP first so that 1.005 at 2 places becomes 1.01.
    let magnitude = (value.abs() * factor * (1.0 + f64::EPSILON)).round() / factor;

    let fixed = format!("{:.*}", decimals as usize, magnitude);
    let mut out = match fixed.split_once('.') {
        Some((whole, frac)) => format!("{}.{}", group_thousands(whole), frac),
        None => group_thousands(&fixed),
    };

    if value < 0.0 && magnitude != 0.0 {
        out.insert(0, '-');
    }
    out
}

/// Format a billed amount with two decimal places and thousands separators.
///
/// # Examples
///
/// ```
/// use billing_core::formatting::format_amount;
///
/// assert_eq!(format_amount(1234.5), "1,234.50");
/// assert_eq!(format_amount(0.0), "0.00");
/// ```
pub fn format_amount(amount: f64) -> String {
    format_number(amount, 2)
}

/// Calculate `(part / whole) * 100`, rounded to `decimal_places`.
///
/// Returns `None` when `whole` is zero or not finite.
///
/// # Examples
///
/// ```
/// use billing_core::formatting::percentage;
///
/// assert_eq!(percentage(50.0, 200.0, 1), Some(25.0));
/// assert_eq!(percentage(1.0, 0.0, 2), None);
/// ```
pub fn percentage(part: f64, whole: f64, decimal_places: u32) -> Option<f64> {
    if whole == 0.0 || !whole.is_finite() {
        return None;
    }
    Some(round_to((part / whole) * 100.0, decimal_places))
}

// ── Internal helpers ──────────────────────────────────────────────────────────

/// `"1234567"` becomes `"1,234,567"`. Expects ASCII digits only.
fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    // ── round_to ─────────────────────────────────────────────────────────────

    #[test]
    fn test_round_to_two_places() {
        assert!((round_to(100.004, 2) - 100.0).abs() < 1e-9);
        assert!((round_to(33.336, 2) - 33.34).abs() < 1e-9);
    }

    #[test]
    fn test_round_to_zero_places() {
        assert_eq!(round_to(2.6, 0), 3.0);
    }

    // ── format_number ────────────────────────────────────────────────────────

    #[test]
    fn test_format_number_zero() {
        assert_eq!(format_number(0.0, 0), "0");
        assert_eq!(format_number(0.0, 2), "0.00");
    }

    #[test]
    fn test_format_number_with_thousands() {
        assert_eq!(format_number(1_234.5, 1), "1,234.5");
        assert_eq!(format_number(1_234_567.0, 0), "1,234,567");
    }

    #[test]
    fn test_format_number_negative() {
        assert_eq!(format_number(-9_876.5, 1), "-9,876.5");
    }

    #[test]
    fn test_format_number_negative_rounding_to_zero_drops_sign() {
        assert_eq!(format_number(-0.001, 2), "0.00");
    }

    #[test]
    fn test_format_number_group_boundaries() {
        assert_eq!(format_number(999.0, 0), "999");
        assert_eq!(format_number(1_000.0, 0), "1,000");
        assert_eq!(format_number(999.999, 2), "1,000.00");
        assert_eq!(format_number(123_456.0, 1), "123,456.0");
    }

    #[test]
    fn test_format_number_rounds_up() {
        assert_eq!(format_number(1.005, 2), "1.01");
    }

    // ── format_amount ────────────────────────────────────────────────────────

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(150.0), "150.00");
        assert_eq!(format_amount(1_000_000.0), "1,000,000.00");
    }

    // ── percentage ───────────────────────────────────────────────────────────

    #[test]
    fn test_percentage_basic() {
        let p = percentage(100.0, 250.0, 2).expect("non-zero whole");
        assert!((p - 40.0).abs() < 1e-9, "percentage = {p}");
    }

    #[test]
    fn test_percentage_zero_whole() {
        assert_eq!(percentage(10.0, 0.0, 2), None);
    }

    #[test]
    fn test_percentage_nan_whole() {
        assert_eq!(percentage(10.0, f64::NAN, 2), None);
    }

    #[test]
    fn test_percentage_rounding() {
        let p = percentage(1.0, 3.0, 2).expect("non-zero whole");
        assert!((p - 33.33).abs() < 1e-9, "percentage = {p}");
    }
}

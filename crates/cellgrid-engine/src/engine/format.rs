/// Format a procedure result with exactly two decimals.
///
/// Non-finite results keep Rust's spelling (`NaN`, `inf`, `-inf`) so that a
/// formula reading them back still parses a float.
pub fn format_fixed(n: f64) -> String {
    format!("{:.2}", n)
}

/// Format a number literal for display (shortest round-trip form).
pub fn format_number(n: f64) -> String {
    n.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_fixed() {
        assert_eq!(format_fixed(6.0), "6.00");
        assert_eq!(format_fixed(2.0 / 3.0), "0.67");
        assert_eq!(format_fixed(-0.5), "-0.50");
        assert_eq!(format_fixed(f64::NAN), "NaN");
        assert_eq!(format_fixed(f64::INFINITY), "inf");
    }

    #[test]
    fn test_non_finite_results_parse_back() {
        for n in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            assert!(format_fixed(n).parse::<f64>().is_ok());
        }
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(5.0), "5");
        assert_eq!(format_number(0.25), "0.25");
        assert_eq!(format_number(-3.5), "-3.5");
    }
}

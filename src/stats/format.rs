/// Display defaults for rate fields missing from an upload
pub const AVG_DEFAULT: &str = ".000";
pub const TWO_PLACE_DEFAULT: &str = "0.00";
pub const ONE_PLACE_DEFAULT: &str = "0.0";
pub const INDEX_DEFAULT: &str = "0";

/// Read a displayed stat back into a number.
///
/// Accepts `.300`, `3.45`, `72.5%`, `+12` and treats anything unreadable as 0.
pub fn parse_stat(value: &str) -> f64 {
    let cleaned = value.trim().trim_end_matches('%').trim_start_matches('+');
    cleaned
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

/// Three decimals without the leading zero: `.400`, `1.000`
pub fn format_avg(value: f64) -> String {
    let fixed = format!("{:.3}", value);
    if let Some(rest) = fixed.strip_prefix("0.") {
        format!(".{}", rest)
    } else if let Some(rest) = fixed.strip_prefix("-0.") {
        format!("-.{}", rest)
    } else {
        fixed
    }
}

pub fn format_fixed(value: f64, places: usize) -> String {
    format!("{:.*}", places, value)
}

/// `+`/`-` suffixed index stats (OPS+, ERA+, FIP-) are whole numbers
pub fn format_index(value: f64) -> String {
    format!("{}", value.round() as i64)
}

/// One decimal, keeping a `%` suffix when the source carried one
pub fn format_percent(value: f64, with_suffix: bool) -> String {
    let fixed = format_fixed(value, 1);
    if with_suffix { format!("{}%", fixed) } else { fixed }
}

/// `(a·wa + b·wb) / (wa + wb)`, or 0 when there is no weight at all
pub fn weighted(a: f64, weight_a: f64, b: f64, weight_b: f64) -> f64 {
    let total = weight_a + weight_b;
    if total <= 0.0 {
        return 0.0;
    }
    (a * weight_a + b * weight_b) / total
}

pub fn ratio(numerator: f64, denominator: f64) -> Option<f64> {
    (denominator > 0.0).then(|| numerator / denominator)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_stat_handles_display_forms() {
        assert_eq!(parse_stat(".300"), 0.3);
        assert_eq!(parse_stat("3.45"), 3.45);
        assert_eq!(parse_stat("72.5%"), 72.5);
        assert_eq!(parse_stat("+12"), 12.0);
        assert_eq!(parse_stat(""), 0.0);
        assert_eq!(parse_stat("n/a"), 0.0);
    }

    #[test]
    fn avg_drops_leading_zero() {
        assert_eq!(format_avg(0.4), ".400");
        assert_eq!(format_avg(0.0), ".000");
        assert_eq!(format_avg(1.0), "1.000");
        assert_eq!(format_avg(0.33333), ".333");
        assert_eq!(format_avg(-0.25), "-.250");
    }

    #[test]
    fn index_and_percent_formats() {
        assert_eq!(format_index(112.5), "113");
        assert_eq!(format_index(87.4), "87");
        assert_eq!(format_percent(8.26, true), "8.3%");
        assert_eq!(format_percent(8.0, false), "8.0");
    }

    #[test]
    fn weighted_average_guards_zero_weight() {
        assert_eq!(weighted(3.0, 0.0, 5.0, 0.0), 0.0);
        assert_eq!(weighted(2.0, 1.0, 4.0, 3.0), 3.5);
    }

    #[test]
    fn ratio_requires_positive_denominator() {
        assert_eq!(ratio(3.0, 0.0), None);
        assert_eq!(ratio(8.0, 20.0), Some(0.4));
    }
}

//! Number formatting helpers shared by the TUI views.

/// Format an integer count with thousands separators.
///
/// # Examples
///
/// ```
/// use attend_core::formatting::format_count;
///
/// assert_eq!(format_count(0), "0");
/// assert_eq!(format_count(1234), "1,234");
/// assert_eq!(format_count(1234567), "1,234,567");
/// ```
pub fn format_count(value: u64) -> String {
    group_thousands(&value.to_string())
}

/// Format a floating-point value with a fixed number of decimal places and
/// thousands separators on the integer part.
///
/// # Examples
///
/// ```
/// use attend_core::formatting::format_number;
///
/// assert_eq!(format_number(1234.5, 1), "1,234.5");
/// assert_eq!(format_number(0.0, 2), "0.00");
/// ```
pub fn format_number(value: f64, decimals: usize) -> String {
    let formatted = format!("{:.prec$}", value, prec = decimals);
    match formatted.split_once('.') {
        Some((int_part, frac_part)) => {
            format!("{}.{}", group_thousands(int_part), frac_part)
        }
        None => group_thousands(&formatted),
    }
}

/// Format a percentage with one decimal place, e.g. `"75.0%"`.
pub fn format_percent(value: f64) -> String {
    format!("{:.1}%", value)
}

/// Insert `,` separators every three digits from the right.
fn group_thousands(digits: &str) -> String {
    let (sign, digits) = match digits.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", digits),
    };
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("{sign}{grouped}")
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_count_small_values_ungrouped() {
        assert_eq!(format_count(7), "7");
        assert_eq!(format_count(999), "999");
    }

    #[test]
    fn test_format_count_grouping() {
        assert_eq!(format_count(1_000), "1,000");
        assert_eq!(format_count(25_431), "25,431");
        assert_eq!(format_count(1_234_567), "1,234,567");
    }

    #[test]
    fn test_format_number_decimals() {
        assert_eq!(format_number(1.5, 1), "1.5");
        assert_eq!(format_number(1234.567, 2), "1,234.57");
        assert_eq!(format_number(12345.0, 0), "12,345");
    }

    #[test]
    fn test_format_number_negative() {
        assert_eq!(format_number(-9876.5, 1), "-9,876.5");
    }

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(75.0), "75.0%");
        assert_eq!(format_percent(33.333), "33.3%");
        assert_eq!(format_percent(0.0), "0.0%");
    }
}

use crate::core::date_math::{parse_date, ParsedDate};

pub const DATES_NOT_SET_LABEL: &str = "Dates not set";
pub const INVALID_RANGE_LABEL: &str = "Invalid date range";

/// `Jun 1 → Jun 3, 2024`
pub fn format_date_range(start: Option<&str>, end: Option<&str>) -> String {
    match (parse_date(start), parse_date(end)) {
        (ParsedDate::Missing, _) | (_, ParsedDate::Missing) => DATES_NOT_SET_LABEL.to_string(),
        (ParsedDate::Valid(start), ParsedDate::Valid(end)) => format!(
            "{} → {}",
            start.date_naive().format("%b %-d"),
            end.date_naive().format("%b %-d, %Y")
        ),
        _ => INVALID_RANGE_LABEL.to_string(),
    }
}

/// Whole dollars with thousands separators, e.g. `$1,234`.
pub fn format_currency(amount: i64) -> String {
    let digits = amount.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if amount < 0 {
        format!("-${}", grouped)
    } else {
        format!("${}", grouped)
    }
}

pub fn format_duration(days: u32) -> String {
    if days == 1 {
        "1 day".to_string()
    } else {
        format!("{} days", days)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_date_range() {
        assert_eq!(
            format_date_range(Some("2024-06-01"), Some("2024-06-03")),
            "Jun 1 → Jun 3, 2024"
        );
        assert_eq!(format_date_range(None, Some("2024-06-03")), DATES_NOT_SET_LABEL);
        assert_eq!(format_date_range(Some("2024-06-01"), Some("tbd")), INVALID_RANGE_LABEL);
    }

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(0), "$0");
        assert_eq!(format_currency(945), "$945");
        assert_eq!(format_currency(1234), "$1,234");
        assert_eq!(format_currency(1_234_567), "$1,234,567");
        assert_eq!(format_currency(-50), "-$50");
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(1), "1 day");
        assert_eq!(format_duration(5), "5 days");
    }
}

//! Date helper functions

use chrono::NaiveDateTime;

/// Format a date using a Moment.js-compatible format string
///
/// # Examples
/// ```ignore
/// format_date(&date, "YYYY-MM-DD") // -> "2024-01-15"
/// format_date(&date, "MMMM DD, YYYY") // -> "January 15, 2024"
/// ```
pub fn format_date(date: &NaiveDateTime, format: &str) -> String {
    let chrono_format = moment_to_chrono_format(format);
    date.format(&chrono_format).to_string()
}

/// Format a date in ISO 8601, for `<time datetime=...>` attributes
pub fn date_xml(date: &NaiveDateTime) -> String {
    date.format("%Y-%m-%dT%H:%M:%S").to_string()
}

/// Convert Moment.js format to chrono format
fn moment_to_chrono_format(format: &str) -> String {
    // Longest tokens first so "MMMM" is not eaten by "MM"
    let replacements = [
        ("YYYY", "%Y"),
        ("YY", "%y"),
        ("MMMM", "%B"),
        ("MMM", "%b"),
        ("MM", "%m"),
        ("DDDD", "%j"),
        ("DD", "%d"),
        ("HH", "%H"),
        ("hh", "%I"),
        ("mm", "%M"),
        ("ss", "%S"),
        ("dddd", "%A"),
        ("ddd", "%a"),
    ];

    let mut result = format.to_string();

    for (from, to) in replacements {
        result = result.replace(from, to);
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn sample() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 15)
            .unwrap()
            .and_hms_opt(10, 30, 0)
            .unwrap()
    }

    #[test]
    fn test_format_date() {
        assert_eq!(format_date(&sample(), "YYYY-MM-DD"), "2024-01-15");
        assert_eq!(format_date(&sample(), "YYYY/MM/DD"), "2024/01/15");
        assert_eq!(format_date(&sample(), "MMMM DD, YYYY"), "January 15, 2024");
    }

    #[test]
    fn test_date_xml() {
        assert_eq!(date_xml(&sample()), "2024-01-15T10:30:00");
    }

    #[test]
    fn test_moment_to_chrono() {
        assert_eq!(moment_to_chrono_format("YYYY-MM-DD"), "%Y-%m-%d");
        assert_eq!(moment_to_chrono_format("HH:mm:ss"), "%H:%M:%S");
    }
}

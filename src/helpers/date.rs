//! Date helper functions

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, Utc};

const SECONDS_PER_DAY: i64 = 60 * 60 * 24;

const MONTHS_PT: [&str; 12] = [
    "janeiro",
    "fevereiro",
    "março",
    "abril",
    "maio",
    "junho",
    "julho",
    "agosto",
    "setembro",
    "outubro",
    "novembro",
    "dezembro",
];

/// Parse a front-matter date in various formats.
///
/// A date without a time component means midnight. Values carrying an
/// offset are normalized to UTC.
pub fn parse_date(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();

    let datetime_formats = [
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y/%m/%d %H:%M:%S",
        "%Y/%m/%d %H:%M",
    ];
    for fmt in datetime_formats {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
    }

    for fmt in ["%Y-%m-%d", "%Y/%m/%d"] {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return d.and_hms_opt(0, 0, 0);
        }
    }

    // RFC 3339 / ISO 8601 with offset
    DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.naive_utc())
}

/// Current time in UTC, the clock [`parse_date`] normalizes offsets to
pub fn utc_now() -> NaiveDateTime {
    Utc::now().naive_utc()
}

/// Whole days elapsed from `date` to `now`, rounded down.
///
/// Dates in the future give negative values.
pub fn days_since(date: &NaiveDateTime, now: &NaiveDateTime) -> i64 {
    now.signed_duration_since(*date)
        .num_seconds()
        .div_euclid(SECONDS_PER_DAY)
}

/// Long date in Portuguese, like "15 de janeiro de 2024"
pub fn full_date(date: &NaiveDateTime) -> String {
    let month = MONTHS_PT[date.month0() as usize];
    format!("{} de {} de {}", date.day(), month, date.year())
}

/// Coarse relative age, like "2a atrás" or "Hoje".
///
/// Compares calendar components, not elapsed time: a positive year
/// difference wins, then the month difference, then the day difference.
pub fn relative_date(date: &NaiveDateTime, today: &NaiveDate) -> String {
    let years = today.year() - date.year();
    let months = today.month() as i32 - date.month() as i32;
    let days = today.day() as i32 - date.day() as i32;

    if years > 0 {
        format!("{}a atrás", years)
    } else if months > 0 {
        format!("{}m atrás", months)
    } else if days > 0 {
        format!("{}d atrás", days)
    } else {
        "Hoje".to_string()
    }
}

/// Format a post date, optionally followed by its relative age in parentheses
pub fn format_date(date: &NaiveDateTime, include_relative: bool, today: &NaiveDate) -> String {
    let full = full_date(date);
    if include_relative {
        format!("{} ({})", full, relative_date(date, today))
    } else {
        full
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn midnight(y: i32, m: u32, d: u32) -> NaiveDateTime {
        day(y, m, d).and_hms_opt(0, 0, 0).unwrap()
    }

    #[test]
    fn test_parse_date_only_is_midnight() {
        assert_eq!(parse_date("2024-01-15"), Some(midnight(2024, 1, 15)));
        assert_eq!(parse_date(" 2024/01/15 "), Some(midnight(2024, 1, 15)));
    }

    #[test]
    fn test_parse_date_with_time() {
        let dt = parse_date("2024-01-15T10:30:00").unwrap();
        assert_eq!(dt.format("%Y-%m-%d %H:%M").to_string(), "2024-01-15 10:30");

        let dt = parse_date("2024-01-15T10:30:00-03:00").unwrap();
        assert_eq!(dt.format("%H:%M").to_string(), "13:30");
    }

    #[test]
    fn test_parse_date_rejects_garbage() {
        assert_eq!(parse_date("yesterday"), None);
        assert_eq!(parse_date("2024-13-01"), None);
    }

    #[test]
    fn test_days_since_rounds_down() {
        let now = midnight(2024, 6, 11) + chrono::Duration::hours(12);
        assert_eq!(days_since(&midnight(2024, 6, 1), &now), 10);
        assert_eq!(days_since(&midnight(2024, 6, 12), &now), -1);
    }

    #[test]
    fn test_offset_dates_share_the_utc_clock() {
        let east = chrono::FixedOffset::east_opt(14 * 3600).unwrap();
        let west = chrono::FixedOffset::west_opt(12 * 3600).unwrap();
        let published = Utc::now() - chrono::Duration::minutes(1);

        for offset in [east, west] {
            let raw = published.with_timezone(&offset).to_rfc3339();
            let parsed = parse_date(&raw).unwrap();
            assert_eq!(days_since(&parsed, &utc_now()), 0, "{raw}");
        }
    }

    #[test]
    fn test_full_date() {
        assert_eq!(full_date(&midnight(2024, 1, 15)), "15 de janeiro de 2024");
        assert_eq!(full_date(&midnight(2023, 3, 1)), "1 de março de 2023");
    }

    #[test]
    fn test_relative_date() {
        let today = day(2024, 6, 20);
        assert_eq!(relative_date(&midnight(2022, 8, 1), &today), "2a atrás");
        assert_eq!(relative_date(&midnight(2024, 3, 25), &today), "3m atrás");
        assert_eq!(relative_date(&midnight(2024, 6, 15), &today), "5d atrás");
        assert_eq!(relative_date(&midnight(2024, 6, 20), &today), "Hoje");
    }

    #[test]
    fn test_format_date_with_relative() {
        let today = day(2024, 6, 20);
        assert_eq!(
            format_date(&midnight(2024, 6, 15), true, &today),
            "15 de junho de 2024 (5d atrás)"
        );
        assert_eq!(
            format_date(&midnight(2024, 6, 15), false, &today),
            "15 de junho de 2024"
        );
    }
}

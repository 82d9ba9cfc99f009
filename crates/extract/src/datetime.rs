//! Date and time extractors
//!
//! Dates resolve against a caller-supplied "today" so the extractors stay
//! pure. Absolute `dd/mm/yyyy` wins over partial `dd/mm` (current year),
//! which wins over relative "hôm nay"/"ngày mai".

use chrono::{Duration, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::combined;

static FULL_DATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d{1,2})/(\d{1,2})/(\d{4})").unwrap());

static SPOKEN_DATE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)ngày\s+(\d{1,2})\s+tháng\s+(\d{1,2})(?:\s+năm\s+(\d{4}))?").unwrap()
});

static PARTIAL_DATE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\d{1,2})/(\d{1,2})").unwrap());

static TIME_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        Regex::new(r"(?i)lúc\s+(\d{1,2}):(\d{2})").unwrap(),
        Regex::new(r"(\d{1,2}):(\d{2})").unwrap(),
        Regex::new(r"(?i)(\d{1,2})\s*giờ\s*(\d{2})?").unwrap(),
        Regex::new(r"(?i)(\d{1,2})h(\d{2})?").unwrap(),
    ]
});

/// Extract a date, trying absolute, spoken, partial, then relative forms
pub fn extract_date(primary: &str, context: &str, today: NaiveDate) -> Option<NaiveDate> {
    let text = combined(primary, context);

    if let Some(caps) = FULL_DATE.captures(&text) {
        if let Some(date) = date_from_parts(&caps[1], &caps[2], Some(&caps[3]), today) {
            return Some(date);
        }
    }

    if let Some(caps) = SPOKEN_DATE.captures(&text) {
        let year = caps.get(3).map(|m| m.as_str());
        if let Some(date) = date_from_parts(&caps[1], &caps[2], year, today) {
            return Some(date);
        }
    }

    if let Some(caps) = PARTIAL_DATE.captures(&text) {
        if let Some(date) = date_from_parts(&caps[1], &caps[2], None, today) {
            return Some(date);
        }
    }

    let lower = text.to_lowercase();
    if lower.contains("hôm nay") || lower.contains("today") {
        return Some(today);
    }
    if lower.contains("ngày mai") || lower.contains("tomorrow") {
        return Some(today + Duration::days(1));
    }

    None
}

fn date_from_parts(day: &str, month: &str, year: Option<&str>, today: NaiveDate) -> Option<NaiveDate> {
    let day: u32 = day.parse().ok()?;
    let month: u32 = month.parse().ok()?;
    let year: i32 = match year {
        Some(y) => y.parse().ok()?,
        None => chrono::Datelike::year(&today),
    };
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Extract a time of day, normalized to `HH:MM`
pub fn extract_time(primary: &str, context: &str) -> Option<String> {
    let text = combined(primary, context);
    for pattern in TIME_PATTERNS.iter() {
        if let Some(caps) = pattern.captures(&text) {
            let hour: u32 = caps.get(1)?.as_str().parse().ok()?;
            let minute: u32 = caps
                .get(2)
                .map(|m| m.as_str().parse().unwrap_or(0))
                .unwrap_or(0);
            if hour <= 23 && minute <= 59 {
                return Some(format!("{hour:02}:{minute:02}"));
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 12, 20).unwrap()
    }

    #[test]
    fn test_full_date() {
        let date = extract_date("nhận phòng ngày 25/12/2024", "", today());
        assert_eq!(date, NaiveDate::from_ymd_opt(2024, 12, 25));
    }

    #[test]
    fn test_spoken_date() {
        let date = extract_date("ngày 5 tháng 1 năm 2025", "", today());
        assert_eq!(date, NaiveDate::from_ymd_opt(2025, 1, 5));
    }

    #[test]
    fn test_partial_date_uses_current_year() {
        let date = extract_date("đi ngày 25/12 nhé", "", today());
        assert_eq!(date, NaiveDate::from_ymd_opt(2024, 12, 25));
    }

    #[test]
    fn test_relative_dates() {
        assert_eq!(extract_date("đi hôm nay", "", today()), Some(today()));
        assert_eq!(
            extract_date("ngày mai khởi hành", "", today()),
            NaiveDate::from_ymd_opt(2024, 12, 21)
        );
    }

    #[test]
    fn test_invalid_date_rejected() {
        assert_eq!(extract_date("ngày 32/13/2024", "", today()), None);
    }

    #[test]
    fn test_date_absent() {
        assert_eq!(extract_date("đặt phòng ở Huế", "", today()), None);
    }

    #[test]
    fn test_time_forms() {
        assert_eq!(extract_time("đón lúc 15:30", "").as_deref(), Some("15:30"));
        assert_eq!(extract_time("9 giờ sáng", "").as_deref(), Some("09:00"));
        assert_eq!(extract_time("14h45", "").as_deref(), Some("14:45"));
        assert_eq!(extract_time("không rõ giờ nào", ""), None);
    }

    #[test]
    fn test_time_out_of_range() {
        assert_eq!(extract_time("25:70", ""), None);
    }
}

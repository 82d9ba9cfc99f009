//! Contact and free-text field extractors

use once_cell::sync::Lazy;
use regex::Regex;

use crate::{combined, title_case};

static NAME_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        Regex::new(r"(?i)(?:tên tôi là|tôi tên là|tôi tên|tôi là|my name is)\s+([A-Za-zÀ-ỹ][A-Za-zÀ-ỹ\s]{1,40})").unwrap(),
        Regex::new(r"(?i)họ tên\s*[:=]\s*([A-Za-zÀ-ỹ][A-Za-zÀ-ỹ\s]{1,40})").unwrap(),
        Regex::new(r"(?i)tên\s*[:=]\s*([A-Za-zÀ-ỹ][A-Za-zÀ-ỹ\s]{1,40})").unwrap(),
    ]
});

static PHONE_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        Regex::new(r"(?i)(?:sđt|số điện thoại|điện thoại|phone)\s*[:=]?\s*(\+?\d[\d\s.\-]{7,14})")
            .unwrap(),
        Regex::new(r"(\+?84\d{9}|0[3-9]\d{8})").unwrap(),
    ]
});

static EMAIL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}").unwrap());

static HOTEL_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        Regex::new(r"(?i)khách sạn\s+([A-Za-zÀ-ỹ0-9][A-Za-zÀ-ỹ0-9\s]{1,40})").unwrap(),
        Regex::new(r"(?i)hotel\s+([A-Za-z0-9][A-Za-z0-9\s]{1,40})").unwrap(),
        Regex::new(r"(?i)(?:tại|ở)\s+([A-Za-zÀ-ỹ\s]*(?:hotel|resort|inn)[A-Za-zÀ-ỹ\s]*)").unwrap(),
    ]
});

static REQUEST_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        Regex::new(r"(?i)(?:yêu cầu đặc biệt|yêu cầu|ghi chú|notes?|requests?)\s*[:=]\s*(.+)")
            .unwrap(),
        Regex::new(r"(?i)(?:đặc biệt|special)\s*[:=]\s*(.+)").unwrap(),
    ]
});

/// Words that terminate a captured name/hotel span when the user keeps
/// talking without punctuation
const SPAN_STOPS: [&str; 8] = [
    " sđt", " số điện thoại", " điện thoại", " phone", " email", " ở ", " tại ", " ngày ",
];

fn truncate_at_stops(captured: &str) -> String {
    let lower = captured.to_lowercase();
    let mut end = captured.len();
    for stop in SPAN_STOPS {
        if let Some(idx) = lower.find(stop) {
            end = end.min(idx);
        }
    }
    captured.get(..end).unwrap_or(captured).trim().to_string()
}

/// Extract a customer name ("Tên tôi là X", "Tôi là X", labeled "tên: X")
pub fn extract_customer_name(primary: &str, context: &str) -> Option<String> {
    let text = combined(primary, context);
    for pattern in NAME_PATTERNS.iter() {
        if let Some(caps) = pattern.captures(&text) {
            let name = truncate_at_stops(caps.get(1)?.as_str());
            if name.chars().count() > 1 {
                return Some(title_case(&name));
            }
        }
    }
    None
}

/// Extract a phone number, normalized to digits with an optional leading `+`
pub fn extract_phone(primary: &str, context: &str) -> Option<String> {
    let text = combined(primary, context);
    for pattern in PHONE_PATTERNS.iter() {
        for caps in pattern.captures_iter(&text) {
            let raw = caps.get(1).map(|m| m.as_str()).unwrap_or_default();
            let mut normalized = String::new();
            for (i, c) in raw.chars().enumerate() {
                if c.is_ascii_digit() || (c == '+' && i == 0) {
                    normalized.push(c);
                }
            }
            let digits = normalized.chars().filter(char::is_ascii_digit).count();
            if digits >= 9 {
                return Some(normalized);
            }
        }
    }
    None
}

/// Extract an email address
pub fn extract_email(primary: &str, context: &str) -> Option<String> {
    let text = combined(primary, context);
    EMAIL_PATTERN.find(&text).map(|m| m.as_str().to_string())
}

/// Extract a hotel name ("khách sạn X", "hotel X", "... resort")
pub fn extract_hotel_name(primary: &str, context: &str) -> Option<String> {
    let text = combined(primary, context);
    for pattern in HOTEL_PATTERNS.iter() {
        if let Some(caps) = pattern.captures(&text) {
            let hotel = truncate_at_stops(caps.get(1)?.as_str());
            // "khách sạn ở Huế" names a place, not a hotel
            let lower = hotel.to_lowercase();
            if ["ở ", "tại ", "gần "].iter().any(|p| lower.starts_with(p)) {
                continue;
            }
            if hotel.chars().count() > 2 {
                return Some(title_case(&hotel));
            }
        }
    }
    None
}

/// Extract a labeled free-text special request ("yêu cầu: ...", "ghi chú: ...")
pub fn extract_special_requests(primary: &str, context: &str) -> Option<String> {
    let text = combined(primary, context);
    for pattern in REQUEST_PATTERNS.iter() {
        if let Some(caps) = pattern.captures(&text) {
            let request = caps.get(1)?.as_str().trim().to_string();
            if request.chars().count() > 5 {
                return Some(request);
            }
        }
    }
    None
}

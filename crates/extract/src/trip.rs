//! Trip-planning field extractors
//!
//! These feed the trip-plan slot set: destination, dates, duration,
//! participants, budget, visa/health status, and soft preferences. Units are
//! normalized at extraction time (weeks and months become days, triệu/nghìn
//! become VND amounts).

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

use travel_agent_core::keywords::contains_any;
use travel_agent_core::records::{Budget, Participants, TripPreferences};

use crate::{combined, datetime, title_case};

static DESTINATION_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        Regex::new(r"(?i)(?:đến|tới|to)\s+([A-Za-zÀ-ỹ][A-Za-zÀ-ỹ\s]{1,40})").unwrap(),
        Regex::new(r"(?i)điểm đến\s*[:=]\s*([A-Za-zÀ-ỹ][A-Za-zÀ-ỹ\s]{1,40})").unwrap(),
    ]
});

static DURATION_PATTERNS: Lazy<Vec<(Regex, u32)>> = Lazy::new(|| {
    vec![
        (Regex::new(r"(?i)(\d+)\s*(?:ngày|days?)").unwrap(), 1),
        (Regex::new(r"(?i)(\d+)\s*(?:tuần|weeks?)").unwrap(), 7),
        (Regex::new(r"(?i)(\d+)\s*(?:tháng|months?)").unwrap(), 30),
    ]
});

static ADULTS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(\d+)\s*(?:người lớn|adults?)").unwrap());
static CHILDREN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(\d+)\s*(?:trẻ em|children)").unwrap());
static FAMILY_TOTAL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(?:gia đình|family)\s*(\d+)\s*(?:người|members)").unwrap());
static TOTAL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(\d+)\s*(?:người|khách|people)").unwrap());

static LABELED_BUDGET: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(?:ngân sách|budget)\s*[:=]?\s*([0-9][0-9,.]*)\s*(đồng|vnd|usd|\$)").unwrap()
});
static MILLIONS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)([0-9][0-9,.]*)\s*(?:triệu|million)").unwrap());
static THOUSANDS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)([0-9][0-9,.]*)\s*(?:nghìn|thousand)").unwrap());

/// Travel dates: either a concrete start date or a flexible timeframe
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TravelDates {
    Fixed(NaiveDate),
    Flexible { timeframe: String },
}

impl TravelDates {
    /// String form stored on the committed travel plan
    pub fn as_record_string(&self) -> String {
        match self {
            TravelDates::Fixed(date) => date.format("%Y-%m-%d").to_string(),
            TravelDates::Flexible { timeframe } => timeframe.clone(),
        }
    }
}

/// Destination from "đến X" / "tới X" / "điểm đến: X" phrasing
pub fn extract_destination(primary: &str, context: &str) -> Option<String> {
    let text = combined(primary, context);
    for pattern in DESTINATION_PATTERNS.iter() {
        if let Some(caps) = pattern.captures(&text) {
            let destination = caps.get(1)?.as_str().trim();
            if destination.chars().count() > 2 {
                return Some(title_case(destination));
            }
        }
    }
    None
}

/// Concrete start date, or a flexible near-future timeframe
pub fn extract_travel_dates(primary: &str, context: &str, today: NaiveDate) -> Option<TravelDates> {
    if let Some(date) = datetime::extract_date(primary, context, today) {
        return Some(TravelDates::Fixed(date));
    }
    let text = combined(primary, context);
    if contains_any(&text, &["tuần sau", "tháng sau", "sắp tới"]) {
        return Some(TravelDates::Flexible {
            timeframe: "tương lai gần".to_string(),
        });
    }
    None
}

/// Trip length in days; weeks count as 7, months as 30
pub fn extract_duration_days(primary: &str, context: &str) -> Option<u32> {
    let text = combined(primary, context);
    for (pattern, factor) in DURATION_PATTERNS.iter() {
        if let Some(caps) = pattern.captures(&text) {
            if let Some(number) = caps.get(1).and_then(|m| m.as_str().parse::<u32>().ok()) {
                return Some(number * factor);
            }
        }
    }
    None
}

/// Participants breakdown; the total is always adults + children
pub fn extract_participants(primary: &str, context: &str) -> Option<Participants> {
    let text = combined(primary, context);

    let adults = ADULTS
        .captures(&text)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse::<u32>().ok());
    let children = CHILDREN
        .captures(&text)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse::<u32>().ok());

    if adults.is_some() || children.is_some() {
        let adults = adults.unwrap_or(1);
        let children = children.unwrap_or(0);
        return Some(Participants {
            adults,
            children,
            total: adults + children,
        });
    }

    let total = FAMILY_TOTAL
        .captures(&text)
        .or_else(|| TOTAL.captures(&text))
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse::<u32>().ok())?;
    Some(Participants {
        adults: total,
        children: 0,
        total,
    })
}

fn parse_amount(raw: &str) -> Option<u64> {
    raw.replace([',', '.'], "").parse().ok()
}

/// Budget amount with currency; "triệu"/"nghìn" multiply into VND
pub fn extract_budget(primary: &str, context: &str) -> Option<Budget> {
    let text = combined(primary, context);

    if let Some(caps) = LABELED_BUDGET.captures(&text) {
        let amount = parse_amount(caps.get(1)?.as_str())?;
        let unit = caps.get(2)?.as_str().to_lowercase();
        let currency = if unit == "usd" || unit == "$" { "USD" } else { "VND" };
        return Some(Budget {
            amount,
            currency: currency.to_string(),
        });
    }
    if let Some(caps) = MILLIONS.captures(&text) {
        let amount = parse_amount(caps.get(1)?.as_str())?;
        return Some(Budget {
            amount: amount * 1_000_000,
            currency: "VND".to_string(),
        });
    }
    if let Some(caps) = THOUSANDS.captures(&text) {
        let amount = parse_amount(caps.get(1)?.as_str())?;
        return Some(Budget {
            amount: amount * 1_000,
            currency: "VND".to_string(),
        });
    }
    None
}

/// Visa status when the user mentions visas or passports at all
pub fn extract_visa_requirement(primary: &str, context: &str) -> Option<String> {
    let text = combined(primary, context);
    if !contains_any(&text, &["visa", "thị thực", "hộ chiếu", "passport"]) {
        return None;
    }
    let status = if contains_any(&text, &["có sẵn", "đã có", "ready"]) {
        "ready"
    } else if contains_any(&text, &["cần xin", "chưa có", "need to apply"]) {
        "need_to_apply"
    } else {
        "unknown"
    };
    Some(status.to_string())
}

/// Vaccination status when health topics come up
pub fn extract_health_requirement(primary: &str, context: &str) -> Option<String> {
    let text = combined(primary, context);
    if !contains_any(&text, &["vaccine", "vắc xin", "tiêm chủng", "y tế", "health"]) {
        return None;
    }
    let status = if contains_any(&text, &["đã tiêm", "completed", "done"]) {
        "completed"
    } else {
        "needed"
    };
    Some(status.to_string())
}

const STYLE_TABLE: [(&str, &[&str]); 6] = [
    ("budget", &["tiết kiệm", "rẻ", "budget", "cheap"]),
    ("luxury", &["sang trọng", "cao cấp", "luxury", "premium"]),
    ("adventure", &["phiêu lưu", "adventure", "thám hiểm"]),
    ("cultural", &["văn hóa", "culture", "lịch sử"]),
    ("relaxation", &["thư giãn", "nghỉ dưỡng", "relaxation"]),
    ("family", &["gia đình", "family"]),
];

/// Travel style from keyword table
pub fn extract_travel_style(primary: &str, context: &str) -> Option<String> {
    let text = combined(primary, context);
    STYLE_TABLE
        .iter()
        .find(|(_, keywords)| contains_any(&text, keywords))
        .map(|(style, _)| (*style).to_string())
}

const ACTIVITY_TABLE: [(&str, &[&str]); 8] = [
    ("sightseeing", &["tham quan", "ngắm cảnh", "sightseeing"]),
    ("food_tour", &["ẩm thực", "food", "đặc sản"]),
    ("shopping", &["mua sắm", "shopping"]),
    ("photography", &["chụp ảnh", "photography"]),
    ("outdoor", &["ngoài trời", "outdoor", "trekking"]),
    ("beach", &["biển", "beach", "bơi lội"]),
    ("cultural", &["văn hóa", "cultural", "bảo tàng", "museum"]),
    ("nightlife", &["đêm", "nightlife", "bar"]),
];

/// All activities whose keywords appear in the text, in table order
pub fn extract_activities(primary: &str, context: &str) -> Vec<String> {
    let text = combined(primary, context);
    ACTIVITY_TABLE
        .iter()
        .filter(|(_, keywords)| contains_any(&text, keywords))
        .map(|(activity, _)| (*activity).to_string())
        .collect()
}

fn extract_accommodation(text: &str) -> Option<String> {
    const TABLE: [(&str, &[&str]); 4] = [
        ("hotel", &["khách sạn", "hotel"]),
        ("resort", &["resort"]),
        ("homestay", &["homestay"]),
        ("hostel", &["hostel"]),
    ];
    TABLE
        .iter()
        .find(|(_, keywords)| contains_any(text, keywords))
        .map(|(kind, _)| (*kind).to_string())
}

fn extract_transportation(text: &str) -> Option<String> {
    const TABLE: [(&str, &[&str]); 4] = [
        ("flight", &["máy bay", "flight", "fly"]),
        ("train", &["tàu", "train"]),
        ("bus", &["xe buýt", "bus"]),
        ("car", &["xe hơi", "ô tô"]),
    ];
    TABLE
        .iter()
        .find(|(_, keywords)| contains_any(text, keywords))
        .map(|(kind, _)| (*kind).to_string())
}

fn extract_meals(text: &str) -> Option<String> {
    if contains_any(text, &["ăn chay", "vegetarian"]) {
        Some("vegetarian".to_string())
    } else if contains_any(text, &["halal"]) {
        Some("halal".to_string())
    } else {
        None
    }
}

/// Soft preferences bundle: style, activities, accommodation, transport, meals
pub fn extract_trip_preferences(primary: &str, context: &str) -> TripPreferences {
    let text = combined(primary, context);
    TripPreferences {
        travel_style: extract_travel_style(primary, context),
        activities: extract_activities(primary, context),
        accommodation: extract_accommodation(&text),
        transportation: extract_transportation(&text),
        meals: extract_meals(&text),
    }
}

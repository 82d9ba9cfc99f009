//! Integer-count and enumerated-category extractors
//!
//! Callers apply the documented defaults when a count is absent:
//! nights=1, guests=2, rooms=1, seats=4.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::combined;

pub const DEFAULT_NIGHTS: u32 = 1;
pub const DEFAULT_GUESTS: u32 = 2;
pub const DEFAULT_ROOMS: u32 = 1;
pub const DEFAULT_SEATS: u32 = 4;

static NIGHTS: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)(\d+)\s*(?:đêm|nights?)").unwrap());
static GUESTS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(\d+)\s*(?:người|khách|guests?)").unwrap());
static ROOMS: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)(\d+)\s*(?:phòng|rooms?)").unwrap());
static SEATS: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)(\d+)\s*(?:chỗ|seats?)").unwrap());

fn first_count(pattern: &Regex, text: &str) -> Option<u32> {
    pattern
        .captures(text)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

/// Number of nights ("2 đêm")
pub fn extract_nights(primary: &str, context: &str) -> Option<u32> {
    first_count(&NIGHTS, &combined(primary, context))
}

/// Number of guests ("4 người", "2 khách")
pub fn extract_guests(primary: &str, context: &str) -> Option<u32> {
    first_count(&GUESTS, &combined(primary, context))
}

/// Number of rooms ("2 phòng")
pub fn extract_rooms(primary: &str, context: &str) -> Option<u32> {
    first_count(&ROOMS, &combined(primary, context))
}

/// Number of seats ("7 chỗ")
pub fn extract_seats(primary: &str, context: &str) -> Option<u32> {
    first_count(&SEATS, &combined(primary, context))
}

/// Hotel room categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RoomType {
    #[default]
    Standard,
    Deluxe,
    Suite,
    Family,
    Single,
    Double,
    Twin,
}

impl RoomType {
    const TABLE: [(RoomType, &'static [&'static str]); 7] = [
        (RoomType::Deluxe, &["deluxe", "cao cấp"]),
        (RoomType::Suite, &["suite", "hạng sang"]),
        (RoomType::Family, &["family", "gia đình"]),
        (RoomType::Twin, &["twin", "sinh đôi"]),
        (RoomType::Double, &["double", "phòng đôi"]),
        (RoomType::Single, &["single", "phòng đơn"]),
        (RoomType::Standard, &["standard", "tiêu chuẩn"]),
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RoomType::Standard => "standard",
            RoomType::Deluxe => "deluxe",
            RoomType::Suite => "suite",
            RoomType::Family => "family",
            RoomType::Single => "single",
            RoomType::Double => "double",
            RoomType::Twin => "twin",
        }
    }
}

/// Room type from keyword table; absent keywords mean "not stated"
pub fn extract_room_type(primary: &str, context: &str) -> Option<RoomType> {
    let lower = combined(primary, context).to_lowercase();
    RoomType::TABLE
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|k| lower.contains(k)))
        .map(|(room_type, _)| *room_type)
}

/// Car categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CarType {
    #[default]
    FourSeat,
    SevenSeat,
    SixteenSeat,
    Taxi,
    Luxury,
}

impl CarType {
    const TABLE: [(CarType, &'static [&'static str]); 5] = [
        (CarType::SixteenSeat, &["16 chỗ", "minibus", "16 seats"]),
        (CarType::SevenSeat, &["7 chỗ", "suv", "7 seats"]),
        (CarType::FourSeat, &["4 chỗ", "sedan", "4 seats"]),
        (CarType::Taxi, &["taxi"]),
        (CarType::Luxury, &["luxury", "sang trọng"]),
    ];

    /// Display string used in confirmations and committed records
    pub fn as_str(&self) -> &'static str {
        match self {
            CarType::FourSeat => "4 chỗ",
            CarType::SevenSeat => "7 chỗ",
            CarType::SixteenSeat => "16 chỗ",
            CarType::Taxi => "taxi",
            CarType::Luxury => "luxury",
        }
    }

    pub fn default_seats(&self) -> u32 {
        match self {
            CarType::FourSeat | CarType::Taxi | CarType::Luxury => 4,
            CarType::SevenSeat => 7,
            CarType::SixteenSeat => 16,
        }
    }
}

/// Car type from keyword table
pub fn extract_car_type(primary: &str, context: &str) -> Option<CarType> {
    let lower = combined(primary, context).to_lowercase();
    CarType::TABLE
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|k| lower.contains(k)))
        .map(|(car_type, _)| *car_type)
}

/// Budget levels for trip planning
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BudgetLevel {
    Budget,
    Mid,
    Luxury,
}

impl BudgetLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            BudgetLevel::Budget => "budget",
            BudgetLevel::Mid => "mid",
            BudgetLevel::Luxury => "luxury",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.to_lowercase().as_str() {
            "budget" | "tiết kiệm" => Some(BudgetLevel::Budget),
            "mid" | "trung bình" => Some(BudgetLevel::Mid),
            "luxury" | "sang trọng" | "cao cấp" => Some(BudgetLevel::Luxury),
            _ => None,
        }
    }
}

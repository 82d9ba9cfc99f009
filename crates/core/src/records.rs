//! Committed booking and plan records
//!
//! These are the payloads handed to the persistence collaborator after the
//! user confirms. The dialogue core builds them from a completed slot set;
//! it never mutates them afterwards.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle status of a committed record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    #[default]
    Pending,
    Confirmed,
    Cancelled,
}

impl std::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BookingStatus::Pending => write!(f, "pending"),
            BookingStatus::Confirmed => write!(f, "confirmed"),
            BookingStatus::Cancelled => write!(f, "cancelled"),
        }
    }
}

/// Hotel booking record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HotelBooking {
    pub customer_name: String,
    pub customer_phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_email: Option<String>,
    pub hotel_name: String,
    pub location: String,
    /// Check-in date, `YYYY-MM-DD`
    pub check_in_date: String,
    /// Derived from check-in + nights when both are known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub check_out_date: Option<String>,
    pub nights: u32,
    pub guests: u32,
    pub rooms: u32,
    pub room_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub special_requests: Option<String>,
    pub status: BookingStatus,
    pub created_at: DateTime<Utc>,
}

/// Car booking record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CarBooking {
    pub customer_name: String,
    pub customer_phone: String,
    pub pickup_location: String,
    pub destination: String,
    /// Pickup time, `HH:MM`
    pub pickup_time: String,
    pub car_type: String,
    pub seats: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub status: BookingStatus,
    pub created_at: DateTime<Utc>,
}

/// Travel participants breakdown
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Participants {
    pub adults: u32,
    pub children: u32,
    pub total: u32,
}

impl Default for Participants {
    fn default() -> Self {
        Self {
            adults: 1,
            children: 0,
            total: 1,
        }
    }
}

/// Budget for a travel plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Budget {
    pub amount: u64,
    /// "VND" or "USD"
    pub currency: String,
}

/// Optional trip preferences collected during planning
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TripPreferences {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub travel_style: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub activities: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accommodation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transportation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meals: Option<String>,
}

/// Travel plan record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TravelPlan {
    pub destination: String,
    /// Start date `YYYY-MM-DD`, or a flexible timeframe description
    pub dates: String,
    pub duration_days: u32,
    pub participants: Participants,
    pub budget: Budget,
    /// Visa status: "ready", "need_to_apply", "unknown", "not_needed"
    pub visa_requirement: String,
    /// Vaccination status: "completed", "needed", "none"
    pub health_requirement: String,
    #[serde(default)]
    pub preferences: TripPreferences,
    pub status: BookingStatus,
    pub created_at: DateTime<Utc>,
}

//! Text extraction utilities for the travel assistant
//!
//! Stateless pattern-based extractors that pull typed values out of free-form
//! Vietnamese/English text. Every extractor follows the same contract:
//!
//! - Input is `(primary, context)`; the primary text is scanned before the
//!   carried-over context.
//! - Absence is success: "nothing found" is `None`, never an error and never
//!   an empty-string sentinel.
//! - Extractors are pure and deterministic; when several patterns could
//!   match, the first pattern in the fixed priority list wins. There is no
//!   scoring across extractors.

mod counts;
mod datetime;
mod fields;
pub mod location;
mod trip;

pub use counts::{
    extract_car_type, extract_guests, extract_nights, extract_room_type, extract_rooms,
    extract_seats, BudgetLevel, CarType, RoomType, DEFAULT_GUESTS, DEFAULT_NIGHTS, DEFAULT_ROOMS,
    DEFAULT_SEATS,
};
pub use datetime::{extract_date, extract_time};
pub use fields::{
    extract_customer_name, extract_email, extract_hotel_name, extract_phone,
    extract_special_requests,
};
pub use location::{
    find_location, resolve_location, LocationKind, ResolvedLocation, DEFAULT_LOCATION,
};
pub use trip::{
    extract_activities, extract_budget, extract_destination, extract_duration_days,
    extract_health_requirement, extract_participants, extract_travel_dates, extract_travel_style,
    extract_trip_preferences, extract_visa_requirement, TravelDates,
};

/// Join primary and context text for extractors that scan both at once
pub(crate) fn combined(primary: &str, context: &str) -> String {
    let mut text = String::with_capacity(primary.len() + context.len() + 1);
    text.push_str(primary);
    text.push(' ');
    text.push_str(context);
    text
}

/// Title-case each whitespace-separated word, Unicode-aware
pub(crate) fn title_case(text: &str) -> String {
    text.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_case_vietnamese() {
        assert_eq!(title_case("đà nẵng"), "Đà Nẵng");
        assert_eq!(title_case("nguyễn văn an"), "Nguyễn Văn An");
        assert_eq!(title_case(""), "");
    }
}

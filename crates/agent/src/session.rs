//! Per-session dialogue state
//!
//! State is explicit: the agent receives a [`SessionState`] with each turn
//! and mutates it in place. Nothing dialogue-related lives in globals.
//!
//! Slot sets grow monotonically within one booking flow: a newly extracted
//! value overwrites the old one, extraction misses never erase a previously
//! captured value. A slot set is destroyed when the user commits, rejects,
//! or switches to a different slot-filling tool.

use chrono::{Duration, NaiveDate, Utc};

use travel_agent_core::records::{
    Budget, CarBooking, HotelBooking, Participants, TravelPlan, TripPreferences,
};
use travel_agent_core::{BookingStatus, ToolIntent};
use travel_agent_extract::{
    CarType, RoomType, TravelDates, DEFAULT_GUESTS, DEFAULT_ROOMS,
};

/// Overwrite a slot only when a newer value was actually extracted
pub(crate) fn merge<T>(slot: &mut Option<T>, newer: Option<T>) {
    if newer.is_some() {
        *slot = newer;
    }
}

/// Collected hotel-booking fields
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HotelSlots {
    pub customer_name: Option<String>,
    pub customer_phone: Option<String>,
    pub customer_email: Option<String>,
    pub hotel_name: Option<String>,
    pub location: Option<String>,
    pub check_in_date: Option<NaiveDate>,
    pub nights: Option<u32>,
    pub guests: Option<u32>,
    pub rooms: Option<u32>,
    pub room_type: Option<RoomType>,
    pub special_requests: Option<String>,
}

impl HotelSlots {
    /// Required fields still unfilled, in prompt order
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.customer_name.is_none() {
            missing.push("customer_name");
        }
        if self.customer_phone.is_none() {
            missing.push("customer_phone");
        }
        if self.hotel_name.is_none() {
            missing.push("hotel_name");
        }
        if self.location.is_none() {
            missing.push("location");
        }
        if self.check_in_date.is_none() {
            missing.push("check_in_date");
        }
        if self.nights.is_none() {
            missing.push("nights");
        }
        missing
    }

    /// Build the pending record once every required field is present.
    ///
    /// Optional fields fall back to their defaults here, never earlier, so
    /// an explicit later mention can still overwrite them.
    pub fn build_booking(&self) -> Option<HotelBooking> {
        let check_in = self.check_in_date?;
        let nights = self.nights?;
        let check_out = check_in + Duration::days(i64::from(nights));
        Some(HotelBooking {
            customer_name: self.customer_name.clone()?,
            customer_phone: self.customer_phone.clone()?,
            customer_email: self.customer_email.clone(),
            hotel_name: self.hotel_name.clone()?,
            location: self.location.clone()?,
            check_in_date: check_in.format("%Y-%m-%d").to_string(),
            check_out_date: Some(check_out.format("%Y-%m-%d").to_string()),
            nights,
            guests: self.guests.unwrap_or(DEFAULT_GUESTS),
            rooms: self.rooms.unwrap_or(DEFAULT_ROOMS),
            room_type: self.room_type.unwrap_or_default().as_str().to_string(),
            special_requests: self.special_requests.clone(),
            status: BookingStatus::Pending,
            created_at: Utc::now(),
        })
    }
}

/// Collected car-booking fields
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CarSlots {
    pub customer_name: Option<String>,
    pub customer_phone: Option<String>,
    pub pickup_location: Option<String>,
    pub destination: Option<String>,
    pub pickup_time: Option<String>,
    pub car_type: Option<CarType>,
    pub seats: Option<u32>,
    pub notes: Option<String>,
}

impl CarSlots {
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.customer_name.is_none() {
            missing.push("customer_name");
        }
        if self.customer_phone.is_none() {
            missing.push("customer_phone");
        }
        if self.pickup_location.is_none() {
            missing.push("pickup_location");
        }
        if self.destination.is_none() {
            missing.push("destination");
        }
        if self.pickup_time.is_none() {
            missing.push("pickup_time");
        }
        if self.car_type.is_none() {
            missing.push("car_type");
        }
        missing
    }

    pub fn build_booking(&self) -> Option<CarBooking> {
        let car_type = self.car_type?;
        Some(CarBooking {
            customer_name: self.customer_name.clone()?,
            customer_phone: self.customer_phone.clone()?,
            pickup_location: self.pickup_location.clone()?,
            destination: self.destination.clone()?,
            pickup_time: self.pickup_time.clone()?,
            car_type: car_type.as_str().to_string(),
            seats: self.seats.unwrap_or_else(|| car_type.default_seats()),
            notes: self.notes.clone(),
            status: BookingStatus::Pending,
            created_at: Utc::now(),
        })
    }
}

/// Collected travel-plan fields
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TripSlots {
    pub destination: Option<String>,
    pub dates: Option<TravelDates>,
    pub duration_days: Option<u32>,
    pub participants: Option<Participants>,
    pub budget: Option<Budget>,
    pub visa_requirement: Option<String>,
    pub health_requirement: Option<String>,
    pub preferences: TripPreferences,
}

impl TripSlots {
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.destination.is_none() {
            missing.push("destination");
        }
        if self.dates.is_none() {
            missing.push("dates");
        }
        if self.duration_days.is_none() {
            missing.push("duration_days");
        }
        if self.participants.is_none() {
            missing.push("participants");
        }
        if self.budget.is_none() {
            missing.push("budget");
        }
        if self.visa_requirement.is_none() {
            missing.push("visa_requirement");
        }
        if self.health_requirement.is_none() {
            missing.push("health_requirement");
        }
        missing
    }

    pub fn build_plan(&self) -> Option<TravelPlan> {
        Some(TravelPlan {
            destination: self.destination.clone()?,
            dates: self.dates.as_ref()?.as_record_string(),
            duration_days: self.duration_days?,
            participants: self.participants.clone()?,
            budget: self.budget.clone()?,
            visa_requirement: self.visa_requirement.clone()?,
            health_requirement: self.health_requirement.clone()?,
            preferences: self.preferences.clone(),
            status: BookingStatus::Pending,
            created_at: Utc::now(),
        })
    }
}

/// The slot set of the one in-flight slot-filling tool, if any
#[derive(Debug, Clone, PartialEq)]
pub enum ActiveSlots {
    Hotel(HotelSlots),
    Car(CarSlots),
    TripPlan(TripSlots),
}

impl ActiveSlots {
    pub fn intent(&self) -> ToolIntent {
        match self {
            ActiveSlots::Hotel(_) => ToolIntent::Hotel,
            ActiveSlots::Car(_) => ToolIntent::Car,
            ActiveSlots::TripPlan(_) => ToolIntent::TripPlan,
        }
    }
}

/// A fully built record awaiting the user's yes/no
#[derive(Debug, Clone)]
pub enum PendingPayload {
    Hotel(HotelBooking),
    Car(CarBooking),
    TripPlan(TravelPlan),
}

impl PendingPayload {
    pub fn intent(&self) -> ToolIntent {
        match self {
            PendingPayload::Hotel(_) => ToolIntent::Hotel,
            PendingPayload::Car(_) => ToolIntent::Car,
            PendingPayload::TripPlan(_) => ToolIntent::TripPlan,
        }
    }
}

/// Confirmation gate state: the record and the summary shown to the user
#[derive(Debug, Clone)]
pub struct PendingConfirmation {
    pub payload: PendingPayload,
    pub summary: String,
}

/// All dialogue state carried across turns for one session
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    active: Option<ActiveSlots>,
    pending: Option<PendingConfirmation>,
    /// Query for which a general-knowledge fallback was offered last turn
    general_offer: Option<String>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn awaiting_confirmation(&self) -> bool {
        self.pending.is_some()
    }

    pub fn pending(&self) -> Option<&PendingConfirmation> {
        self.pending.as_ref()
    }

    pub(crate) fn set_pending(&mut self, pending: PendingConfirmation) {
        self.pending = Some(pending);
    }

    pub(crate) fn clear_pending(&mut self) {
        self.pending = None;
    }

    pub fn active_intent(&self) -> Option<ToolIntent> {
        self.active.as_ref().map(ActiveSlots::intent)
    }

    pub(crate) fn clear_active(&mut self) {
        self.active = None;
    }

    /// Hotel slot set, starting fresh if another tool was active
    pub(crate) fn hotel_slots(&mut self) -> &mut HotelSlots {
        if !matches!(self.active, Some(ActiveSlots::Hotel(_))) {
            self.active = Some(ActiveSlots::Hotel(HotelSlots::default()));
        }
        match self.active {
            Some(ActiveSlots::Hotel(ref mut slots)) => slots,
            _ => unreachable!("hotel slots just installed"),
        }
    }

    pub(crate) fn car_slots(&mut self) -> &mut CarSlots {
        if !matches!(self.active, Some(ActiveSlots::Car(_))) {
            self.active = Some(ActiveSlots::Car(CarSlots::default()));
        }
        match self.active {
            Some(ActiveSlots::Car(ref mut slots)) => slots,
            _ => unreachable!("car slots just installed"),
        }
    }

    pub(crate) fn trip_slots(&mut self) -> &mut TripSlots {
        if !matches!(self.active, Some(ActiveSlots::TripPlan(_))) {
            self.active = Some(ActiveSlots::TripPlan(TripSlots::default()));
        }
        match self.active {
            Some(ActiveSlots::TripPlan(ref mut slots)) => slots,
            _ => unreachable!("trip slots just installed"),
        }
    }

    pub(crate) fn offer_general(&mut self, query: impl Into<String>) {
        self.general_offer = Some(query.into());
    }

    pub(crate) fn take_general_offer(&mut self) -> Option<String> {
        self.general_offer.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_keeps_old_value_on_miss() {
        let mut slot = Some("Nguyễn Văn An".to_string());
        merge(&mut slot, None);
        assert_eq!(slot.as_deref(), Some("Nguyễn Văn An"));

        merge(&mut slot, Some("Trần Thị Bích".to_string()));
        assert_eq!(slot.as_deref(), Some("Trần Thị Bích"));
    }

    #[test]
    fn test_hotel_booking_gated_on_required_fields() {
        let mut slots = HotelSlots {
            customer_name: Some("Nguyễn Văn An".to_string()),
            customer_phone: Some("0987654321".to_string()),
            hotel_name: Some("Sheraton".to_string()),
            location: Some("Đà Nẵng".to_string()),
            check_in_date: NaiveDate::from_ymd_opt(2024, 12, 25),
            ..Default::default()
        };
        assert_eq!(slots.missing_fields(), vec!["nights"]);
        assert!(slots.build_booking().is_none());

        slots.nights = Some(2);
        let booking = slots.build_booking().unwrap();
        assert_eq!(booking.check_in_date, "2024-12-25");
        assert_eq!(booking.check_out_date.as_deref(), Some("2024-12-27"));
        assert_eq!(booking.guests, DEFAULT_GUESTS);
        assert_eq!(booking.room_type, "standard");
        assert_eq!(booking.status, BookingStatus::Pending);
    }

    #[test]
    fn test_car_seats_default_from_car_type() {
        let slots = CarSlots {
            customer_name: Some("An".to_string()),
            customer_phone: Some("0987654321".to_string()),
            pickup_location: Some("Sân bay Đà Nẵng".to_string()),
            destination: Some("Hội An".to_string()),
            pickup_time: Some("15:30".to_string()),
            car_type: Some(CarType::SevenSeat),
            ..Default::default()
        };
        let booking = slots.build_booking().unwrap();
        assert_eq!(booking.car_type, "7 chỗ");
        assert_eq!(booking.seats, 7);
    }

    #[test]
    fn test_switching_tool_resets_slots() {
        let mut state = SessionState::new();
        state.hotel_slots().customer_name = Some("An".to_string());
        assert_eq!(state.active_intent(), Some(ToolIntent::Hotel));

        let car = state.car_slots();
        assert!(car.customer_name.is_none());
        assert_eq!(state.active_intent(), Some(ToolIntent::Car));

        // returning to the same tool keeps accumulated fields
        state.car_slots().destination = Some("Huế".to_string());
        assert_eq!(state.car_slots().destination.as_deref(), Some("Huế"));
    }
}

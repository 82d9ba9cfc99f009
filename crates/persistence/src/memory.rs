//! In-memory booking store

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::RwLock;
use tracing::info;
use uuid::Uuid;

use travel_agent_core::{
    BookingStore, CarBooking, Error as CoreError, HotelBooking, TravelPlan, TurnRole,
};

/// Process-local store keyed by generated record ids
#[derive(Default)]
pub struct MemoryStore {
    hotel_bookings: RwLock<HashMap<String, HotelBooking>>,
    car_bookings: RwLock<HashMap<String, CarBooking>>,
    trip_plans: RwLock<HashMap<String, TravelPlan>>,
    conversations: RwLock<HashMap<String, Vec<(TurnRole, String)>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one turn to a conversation transcript
    pub fn append_turn(&self, conversation_id: &str, role: TurnRole, text: impl Into<String>) {
        self.conversations
            .write()
            .entry(conversation_id.to_string())
            .or_default()
            .push((role, text.into()));
    }

    pub fn hotel_bookings(&self) -> Vec<HotelBooking> {
        self.hotel_bookings.read().values().cloned().collect()
    }

    pub fn car_bookings(&self) -> Vec<CarBooking> {
        self.car_bookings.read().values().cloned().collect()
    }

    pub fn trip_plans(&self) -> Vec<TravelPlan> {
        self.trip_plans.read().values().cloned().collect()
    }
}

#[async_trait]
impl BookingStore for MemoryStore {
    async fn save_hotel_booking(&self, booking: &HotelBooking) -> Result<(), CoreError> {
        let id = Uuid::new_v4().to_string();
        info!(%id, hotel = %booking.hotel_name, "hotel booking saved");
        self.hotel_bookings.write().insert(id, booking.clone());
        Ok(())
    }

    async fn save_car_booking(&self, booking: &CarBooking) -> Result<(), CoreError> {
        let id = Uuid::new_v4().to_string();
        info!(%id, pickup = %booking.pickup_location, "car booking saved");
        self.car_bookings.write().insert(id, booking.clone());
        Ok(())
    }

    async fn save_trip_plan(&self, plan: &TravelPlan) -> Result<(), CoreError> {
        let id = Uuid::new_v4().to_string();
        info!(%id, destination = %plan.destination, "trip plan saved");
        self.trip_plans.write().insert(id, plan.clone());
        Ok(())
    }

    async fn conversation_history(
        &self,
        conversation_id: &str,
    ) -> Result<Vec<(TurnRole, String)>, CoreError> {
        Ok(self
            .conversations
            .read()
            .get(conversation_id)
            .cloned()
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use travel_agent_core::records::BookingStatus;

    fn sample_hotel() -> HotelBooking {
        HotelBooking {
            customer_name: "Nguyễn Văn An".to_string(),
            customer_phone: "0987654321".to_string(),
            customer_email: None,
            hotel_name: "Sheraton".to_string(),
            location: "Đà Nẵng".to_string(),
            check_in_date: "2024-12-25".to_string(),
            check_out_date: Some("2024-12-27".to_string()),
            nights: 2,
            guests: 2,
            rooms: 1,
            room_type: "standard".to_string(),
            special_requests: None,
            status: BookingStatus::Confirmed,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_save_and_list_hotel_bookings() {
        let store = MemoryStore::new();
        store.save_hotel_booking(&sample_hotel()).await.unwrap();

        let saved = store.hotel_bookings();
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].hotel_name, "Sheraton");
    }

    #[tokio::test]
    async fn test_conversation_transcript_round_trip() {
        let store = MemoryStore::new();
        store.append_turn("s1", TurnRole::User, "xin chào");
        store.append_turn("s1", TurnRole::Assistant, "chào bạn");

        let history = store.conversation_history("s1").await.unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0], (TurnRole::User, "xin chào".to_string()));

        assert!(store.conversation_history("unknown").await.unwrap().is_empty());
    }
}

//! Confirmation gate and commit
//!
//! Yes/no detection over the user's reply to a pending confirmation, and the
//! commit step that persists the record and reports a booking reference.
//! A reply that is neither an affirmation nor a rejection is not handled
//! here: the agent re-classifies it as fresh input.

use once_cell::sync::Lazy;
use tracing::info;

use travel_agent_core::{BookingStatus, BookingStore, Error, KeywordMatcher, ToolIntent};

use crate::handlers::format_budget;
use crate::session::PendingPayload;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmationReply {
    Affirmative,
    Negative,
}

// Negative first: an explicit rejection word wins even when the phrase also
// contains "có" ("không có nhé").
static REPLY_MATCHER: Lazy<KeywordMatcher<ConfirmationReply>> = Lazy::new(|| {
    KeywordMatcher::new(vec![
        (
            ConfirmationReply::Negative,
            vec![
                "không", "sai", "sửa", "thay đổi", "hủy", "no", "wrong", "change", "cancel",
            ],
        ),
        (
            ConfirmationReply::Affirmative,
            vec![
                "có", "xác nhận", "đồng ý", "đúng rồi", "chính xác", "yes", "ok", "confirm",
            ],
        ),
    ])
});

/// Detect an explicit yes or no; `None` means the reply is something else
pub fn detect_reply(text: &str) -> Option<ConfirmationReply> {
    REPLY_MATCHER.match_category(text)
}

/// Result of a successful commit
#[derive(Debug, Clone)]
pub struct CommitReceipt {
    pub reference: String,
    pub message: String,
}

/// Persist a confirmed record and produce the success message.
///
/// On failure the caller keeps the pending confirmation so the user can
/// simply confirm again.
pub async fn commit(
    store: &dyn BookingStore,
    payload: &PendingPayload,
) -> Result<CommitReceipt, Error> {
    match payload {
        PendingPayload::Hotel(booking) => {
            let mut record = booking.clone();
            record.status = BookingStatus::Confirmed;
            store.save_hotel_booking(&record).await?;
            let reference = hotel_reference(&record.location, &record.check_in_date);
            info!(%reference, tool = %ToolIntent::Hotel, "booking committed");
            Ok(CommitReceipt {
                message: hotel_success(&record, &reference),
                reference,
            })
        }
        PendingPayload::Car(booking) => {
            let mut record = booking.clone();
            record.status = BookingStatus::Confirmed;
            store.save_car_booking(&record).await?;
            let reference = car_reference(&record);
            info!(%reference, tool = %ToolIntent::Car, "booking committed");
            Ok(CommitReceipt {
                message: car_success(&record, &reference),
                reference,
            })
        }
        PendingPayload::TripPlan(plan) => {
            let mut record = plan.clone();
            record.status = BookingStatus::Confirmed;
            store.save_trip_plan(&record).await?;
            let reference = plan_reference(&record);
            info!(%reference, tool = %ToolIntent::TripPlan, "plan committed");
            Ok(CommitReceipt {
                message: plan_success(&record, &reference),
                reference,
            })
        }
    }
}

/// First `n` alphanumeric characters, upper-cased
fn code_prefix(text: &str, n: usize) -> String {
    text.chars()
        .filter(|c| c.is_alphanumeric())
        .take(n)
        .collect::<String>()
        .to_uppercase()
}

fn hotel_reference(location: &str, check_in_date: &str) -> String {
    format!(
        "HOTEL-{}-{}",
        code_prefix(location, 3),
        check_in_date.replace('-', "")
    )
}

fn car_reference(booking: &travel_agent_core::CarBooking) -> String {
    format!(
        "CAR-{}{}-{}",
        code_prefix(&booking.pickup_location, 2),
        code_prefix(&booking.destination, 2),
        booking.created_at.format("%Y%m%d%H%M")
    )
}

fn plan_reference(plan: &travel_agent_core::TravelPlan) -> String {
    format!(
        "PLAN-{}-{}",
        code_prefix(&plan.destination, 3),
        plan.created_at.format("%Y%m%d")
    )
}

fn hotel_success(booking: &travel_agent_core::HotelBooking, reference: &str) -> String {
    let check_out = booking
        .check_out_date
        .clone()
        .unwrap_or_else(|| booking.check_in_date.clone());
    format!(
        "✅ **Đặt phòng khách sạn thành công!**\n\n\
         🏨 Khách sạn: {hotel}\n\
         📍 Địa điểm: {location}\n\
         👤 Khách hàng: {name}\n\
         📞 Điện thoại: {phone}\n\
         📅 Nhận phòng: {check_in}\n\
         📅 Trả phòng: {check_out}\n\
         🌙 Số đêm: {nights}\n\
         👥 Số khách: {guests}\n\
         🚪 Số phòng: {rooms} ({room_type})\n\n\
         🎫 Mã đặt phòng: {reference}\n\n\
         Cảm ơn bạn đã sử dụng dịch vụ! 🙏",
        hotel = booking.hotel_name,
        location = booking.location,
        name = booking.customer_name,
        phone = booking.customer_phone,
        check_in = booking.check_in_date,
        nights = booking.nights,
        guests = booking.guests,
        rooms = booking.rooms,
        room_type = booking.room_type,
    )
}

fn car_success(booking: &travel_agent_core::CarBooking, reference: &str) -> String {
    format!(
        "✅ **Đặt xe thành công!**\n\n\
         👤 Khách hàng: {name}\n\
         📞 Điện thoại: {phone}\n\
         📍 Điểm đón: {pickup}\n\
         🎯 Điểm đến: {destination}\n\
         🕐 Thời gian đón: {time}\n\
         🚗 Loại xe: {car_type} ({seats} chỗ)\n\n\
         🎫 Mã đặt xe: {reference}\n\n\
         Chúc bạn có chuyến đi an toàn! 🙏",
        name = booking.customer_name,
        phone = booking.customer_phone,
        pickup = booking.pickup_location,
        destination = booking.destination,
        time = booking.pickup_time,
        car_type = booking.car_type,
        seats = booking.seats,
    )
}

fn plan_success(plan: &travel_agent_core::TravelPlan, reference: &str) -> String {
    format!(
        "✅ **Đã lưu kế hoạch du lịch!**\n\n\
         🎯 Điểm đến: {destination}\n\
         📅 Thời gian: {dates}\n\
         ⏱️ Số ngày: {duration}\n\
         👥 Số người: {total}\n\
         💰 Ngân sách: {budget}\n\n\
         🎫 Mã kế hoạch: {reference}\n\n\
         Chúc bạn có chuyến đi tuyệt vời! 🎉",
        destination = plan.destination,
        dates = plan.dates,
        duration = plan.duration_days,
        total = plan.participants.total,
        budget = format_budget(&plan.budget),
    )
}

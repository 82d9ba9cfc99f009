//! Hotel booking slot filling

use chrono::NaiveDate;

use travel_agent_core::{HotelBooking, ToolIntent};
use travel_agent_extract as extract;

use crate::handlers::missing_info_message;
use crate::outcome::ToolOutcome;
use crate::session::{merge, HotelSlots, PendingConfirmation, PendingPayload, SessionState};

fn label(field: &'static str) -> &'static str {
    match field {
        "customer_name" => "👤 Tên khách hàng",
        "customer_phone" => "📞 Số điện thoại liên hệ",
        "hotel_name" => "🏨 Tên khách sạn mong muốn",
        "location" => "📍 Địa điểm (thành phố)",
        "check_in_date" => "📅 Ngày nhận phòng (dd/mm/yyyy)",
        "nights" => "🌙 Số đêm lưu trú",
        _ => field,
    }
}

pub(crate) fn handle(
    state: &mut SessionState,
    input: &str,
    context: &str,
    today: NaiveDate,
) -> (String, ToolOutcome) {
    let (booking, known, missing) = {
        let slots = state.hotel_slots();
        collect(slots, input, context, today);
        (slots.build_booking(), known_fields(slots), slots.missing_fields())
    };

    if let Some(booking) = booking {
        let summary = confirmation_summary(&booking);
        state.set_pending(PendingConfirmation {
            payload: PendingPayload::Hotel(booking),
            summary: summary.clone(),
        });
        return (summary, ToolOutcome::Confirming { tool: ToolIntent::Hotel });
    }

    let message = missing_info_message(
        "🏨 **Thông tin đặt phòng chưa đủ**",
        "Để hoàn tất đặt phòng, tôi cần thêm thông tin:",
        &known,
        &missing,
        label,
        "Vui lòng cung cấp thông tin còn thiếu để tôi hoàn tất đặt phòng cho bạn! 😊",
    );
    let known_names = known.iter().map(|(field, _)| *field).collect();
    (
        message,
        ToolOutcome::Missing {
            tool: ToolIntent::Hotel,
            known: known_names,
            missing,
        },
    )
}

fn collect(slots: &mut HotelSlots, input: &str, context: &str, today: NaiveDate) {
    merge(&mut slots.customer_name, extract::extract_customer_name(input, context));
    merge(&mut slots.customer_phone, extract::extract_phone(input, context));
    merge(&mut slots.customer_email, extract::extract_email(input, context));
    merge(&mut slots.hotel_name, extract::extract_hotel_name(input, context));
    merge(
        &mut slots.location,
        extract::find_location(input, context).map(|l| l.name),
    );
    merge(&mut slots.check_in_date, extract::extract_date(input, context, today));
    merge(&mut slots.nights, extract::extract_nights(input, context));
    merge(&mut slots.guests, extract::extract_guests(input, context));
    merge(&mut slots.rooms, extract::extract_rooms(input, context));
    merge(&mut slots.room_type, extract::extract_room_type(input, context));
    merge(
        &mut slots.special_requests,
        extract::extract_special_requests(input, context),
    );
}

fn known_fields(slots: &HotelSlots) -> Vec<(&'static str, String)> {
    let mut known = Vec::new();
    if let Some(name) = &slots.customer_name {
        known.push(("customer_name", name.clone()));
    }
    if let Some(phone) = &slots.customer_phone {
        known.push(("customer_phone", phone.clone()));
    }
    if let Some(hotel) = &slots.hotel_name {
        known.push(("hotel_name", hotel.clone()));
    }
    if let Some(location) = &slots.location {
        known.push(("location", location.clone()));
    }
    if let Some(date) = &slots.check_in_date {
        known.push(("check_in_date", date.format("%d/%m/%Y").to_string()));
    }
    if let Some(nights) = slots.nights {
        known.push(("nights", nights.to_string()));
    }
    known
}

fn confirmation_summary(booking: &HotelBooking) -> String {
    let check_out = booking
        .check_out_date
        .clone()
        .unwrap_or_else(|| booking.check_in_date.clone());
    format!(
        "🏨 **XÁC NHẬN THÔNG TIN ĐẶT PHÒNG**\n\n\
         👤 Khách hàng: {name}\n\
         📞 Điện thoại: {phone}\n\
         🏨 Khách sạn: {hotel}\n\
         📍 Địa điểm: {location}\n\
         📅 Nhận phòng: {check_in}\n\
         📅 Trả phòng: {check_out}\n\
         🌙 Số đêm: {nights}\n\
         👥 Số khách: {guests}\n\
         🚪 Số phòng: {rooms} ({room_type})\n\n\
         ✅ Xác nhận đặt phòng? (Có/Không)\n\
         💡 Trả lời \"Có\" hoặc \"Xác nhận\" để hoàn tất, \"Không\" hoặc \"Sửa\" để chỉnh sửa.",
        name = booking.customer_name,
        phone = booking.customer_phone,
        hotel = booking.hotel_name,
        location = booking.location,
        check_in = booking.check_in_date,
        nights = booking.nights,
        guests = booking.guests,
        rooms = booking.rooms,
        room_type = booking.room_type,
    )
}

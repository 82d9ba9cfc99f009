//! Car booking slot filling

use once_cell::sync::Lazy;
use regex::Regex;

use travel_agent_core::{CarBooking, ToolIntent};
use travel_agent_extract as extract;

use crate::handlers::missing_info_message;
use crate::outcome::ToolOutcome;
use crate::session::{merge, CarSlots, PendingConfirmation, PendingPayload, SessionState};

static PICKUP_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        Regex::new(r"(?i)đón(?:\s+tôi)?\s+(?:tại|ở)\s+([A-Za-zÀ-ỹ0-9][A-Za-zÀ-ỹ0-9\s]{1,40})")
            .unwrap(),
        Regex::new(r"(?i)từ\s+([A-Za-zÀ-ỹ0-9][A-Za-zÀ-ỹ0-9\s]{1,40}?)\s+(?:đến|tới|về)").unwrap(),
        Regex::new(r"(?i)điểm đón\s*[:=]\s*([^\n,]+)").unwrap(),
    ]
});

static DESTINATION_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        Regex::new(r"(?i)(?:đến|tới|về)\s+([A-Za-zÀ-ỹ0-9][A-Za-zÀ-ỹ0-9\s]{1,40})").unwrap(),
        Regex::new(r"(?i)điểm đến\s*[:=]\s*([^\n,]+)").unwrap(),
    ]
});

/// Words that end a captured place span mid-sentence
const SPAN_STOPS: [&str; 5] = [" lúc ", " vào ", " ngày ", " sđt", " tên "];

fn clean_span(captured: &str) -> Option<String> {
    let lower = captured.to_lowercase();
    let mut end = captured.len();
    for stop in SPAN_STOPS {
        if let Some(idx) = lower.find(stop) {
            end = end.min(idx);
        }
    }
    let span = captured.get(..end).unwrap_or(captured).trim();
    if span.chars().count() > 2 {
        Some(span.to_string())
    } else {
        None
    }
}

fn extract_pickup(input: &str, context: &str) -> Option<String> {
    for text in [input, context] {
        for pattern in PICKUP_PATTERNS.iter() {
            if let Some(caps) = pattern.captures(text) {
                if let Some(span) = caps.get(1).and_then(|m| clean_span(m.as_str())) {
                    return Some(span);
                }
            }
        }
    }
    // no explicit pickup point but a known city was named: assume its airport
    extract::find_location(input, context).map(|l| format!("Sân bay {}", l.name))
}

fn extract_destination(input: &str, context: &str) -> Option<String> {
    for text in [input, context] {
        for pattern in DESTINATION_PATTERNS.iter() {
            if let Some(caps) = pattern.captures(text) {
                if let Some(span) = caps.get(1).and_then(|m| clean_span(m.as_str())) {
                    return Some(span);
                }
            }
        }
    }
    None
}

fn label(field: &'static str) -> &'static str {
    match field {
        "customer_name" => "👤 Tên khách hàng",
        "customer_phone" => "📞 Số điện thoại liên hệ",
        "pickup_location" => "📍 Điểm đón",
        "destination" => "🎯 Điểm đến",
        "pickup_time" => "🕐 Thời gian đón (hh:mm)",
        "car_type" => "🚗 Loại xe (4 chỗ, 7 chỗ, 16 chỗ)",
        _ => field,
    }
}

pub(crate) fn handle(state: &mut SessionState, input: &str, context: &str) -> (String, ToolOutcome) {
    let (booking, known, missing) = {
        let slots = state.car_slots();
        collect(slots, input, context);
        (slots.build_booking(), known_fields(slots), slots.missing_fields())
    };

    if let Some(booking) = booking {
        let summary = confirmation_summary(&booking);
        state.set_pending(PendingConfirmation {
            payload: PendingPayload::Car(booking),
            summary: summary.clone(),
        });
        return (summary, ToolOutcome::Confirming { tool: ToolIntent::Car });
    }

    let message = missing_info_message(
        "🚗 **Thông tin đặt xe chưa đủ**",
        "Để hoàn tất đặt xe, tôi cần thêm thông tin:",
        &known,
        &missing,
        label,
        "Vui lòng cung cấp thông tin còn thiếu để tôi hoàn tất đặt xe cho bạn! 😊",
    );
    let known_names = known.iter().map(|(field, _)| *field).collect();
    (
        message,
        ToolOutcome::Missing {
            tool: ToolIntent::Car,
            known: known_names,
            missing,
        },
    )
}

fn collect(slots: &mut CarSlots, input: &str, context: &str) {
    merge(&mut slots.customer_name, extract::extract_customer_name(input, context));
    merge(&mut slots.customer_phone, extract::extract_phone(input, context));
    // destination first: "từ X đến Y" must not leak Y into the pickup span
    merge(&mut slots.destination, extract_destination(input, context));
    merge(&mut slots.pickup_location, extract_pickup(input, context));
    merge(&mut slots.pickup_time, extract::extract_time(input, context));
    merge(&mut slots.car_type, extract::extract_car_type(input, context));
    merge(&mut slots.seats, extract::extract_seats(input, context));
    merge(&mut slots.notes, extract::extract_special_requests(input, context));
}

fn known_fields(slots: &CarSlots) -> Vec<(&'static str, String)> {
    let mut known = Vec::new();
    if let Some(name) = &slots.customer_name {
        known.push(("customer_name", name.clone()));
    }
    if let Some(phone) = &slots.customer_phone {
        known.push(("customer_phone", phone.clone()));
    }
    if let Some(pickup) = &slots.pickup_location {
        known.push(("pickup_location", pickup.clone()));
    }
    if let Some(destination) = &slots.destination {
        known.push(("destination", destination.clone()));
    }
    if let Some(time) = &slots.pickup_time {
        known.push(("pickup_time", time.clone()));
    }
    if let Some(car_type) = slots.car_type {
        known.push(("car_type", car_type.as_str().to_string()));
    }
    known
}

fn confirmation_summary(booking: &CarBooking) -> String {
    format!(
        "🚗 **XÁC NHẬN THÔNG TIN ĐẶT XE**\n\n\
         👤 Khách hàng: {name}\n\
         📞 Điện thoại: {phone}\n\
         📍 Điểm đón: {pickup}\n\
         🎯 Điểm đến: {destination}\n\
         🕐 Thời gian đón: {time}\n\
         🚗 Loại xe: {car_type} ({seats} chỗ)\n\n\
         ✅ Xác nhận đặt xe? (Có/Không)\n\
         💡 Trả lời \"Có\" hoặc \"Xác nhận\" để hoàn tất, \"Không\" hoặc \"Sửa\" để chỉnh sửa.",
        name = booking.customer_name,
        phone = booking.customer_phone,
        pickup = booking.pickup_location,
        destination = booking.destination,
        time = booking.pickup_time,
        car_type = booking.car_type,
        seats = booking.seats,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pickup_and_destination_from_route_phrase() {
        let pickup = extract_pickup("đặt xe từ sân bay Nội Bài đến phố cổ", "");
        assert_eq!(pickup.as_deref(), Some("sân bay Nội Bài"));

        let destination = extract_destination("đặt xe từ sân bay Nội Bài đến phố cổ", "");
        assert_eq!(destination.as_deref(), Some("phố cổ"));
    }

    #[test]
    fn test_pickup_airport_fallback_from_city() {
        let pickup = extract_pickup("đặt xe ở Đà Nẵng nhé", "");
        assert_eq!(pickup.as_deref(), Some("Sân bay Đà Nẵng"));
        assert_eq!(extract_pickup("đặt xe giúp tôi", ""), None);
    }

    #[test]
    fn test_span_stops_before_time() {
        let pickup = extract_pickup("đón tôi tại khách sạn Rex lúc 15:30", "");
        assert_eq!(pickup.as_deref(), Some("khách sạn Rex"));
    }

    #[test]
    fn test_completion_moves_to_confirmation() {
        let mut state = SessionState::new();
        let (_, outcome) = handle(
            &mut state,
            "Đặt xe 7 chỗ từ sân bay Đà Nẵng đến Hội An lúc 15:30, tên tôi là An, SĐT 0987654321",
            "",
        );
        assert!(outcome.is_confirming());
        assert!(state.awaiting_confirmation());
        match state.pending().map(|p| &p.payload) {
            Some(PendingPayload::Car(booking)) => {
                assert_eq!(booking.car_type, "7 chỗ");
                assert_eq!(booking.seats, 7);
                assert_eq!(booking.pickup_time, "15:30");
            }
            other => panic!("unexpected pending payload: {other:?}"),
        }
    }

    #[test]
    fn test_missing_fields_reported() {
        let mut state = SessionState::new();
        let (message, outcome) = handle(&mut state, "tôi cần thuê xe", "");
        assert!(message.contains("Thông tin đặt xe chưa đủ"));
        match outcome {
            ToolOutcome::Missing { tool, missing, .. } => {
                assert_eq!(tool, ToolIntent::Car);
                assert!(missing.contains(&"pickup_location"));
                assert!(missing.contains(&"car_type"));
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
    }
}

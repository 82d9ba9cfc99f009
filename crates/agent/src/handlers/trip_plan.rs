//! Travel plan slot filling

use chrono::NaiveDate;

use travel_agent_core::{ToolIntent, TravelPlan};
use travel_agent_extract as extract;

use crate::handlers::{format_budget, missing_info_message};
use crate::outcome::ToolOutcome;
use crate::session::{merge, PendingConfirmation, PendingPayload, SessionState, TripSlots};

fn label(field: &'static str) -> &'static str {
    match field {
        "destination" => "🎯 Điểm đến muốn du lịch",
        "dates" => "📅 Thời gian du lịch (ngày bắt đầu)",
        "duration_days" => "⏱️ Thời gian du lịch (số ngày/tuần)",
        "participants" => "👥 Số người tham gia",
        "budget" => "💰 Ngân sách dự kiến",
        "visa_requirement" => "📋 Yêu cầu visa/thị thực",
        "health_requirement" => "🏥 Yêu cầu sức khỏe/tiêm chủng",
        _ => field,
    }
}

pub(crate) fn handle(
    state: &mut SessionState,
    input: &str,
    context: &str,
    today: NaiveDate,
) -> (String, ToolOutcome) {
    let (plan, known, missing) = {
        let slots = state.trip_slots();
        collect(slots, input, context, today);
        (slots.build_plan(), known_fields(slots), slots.missing_fields())
    };

    if let Some(plan) = plan {
        let summary = confirmation_summary(&plan);
        state.set_pending(PendingConfirmation {
            payload: PendingPayload::TripPlan(plan),
            summary: summary.clone(),
        });
        return (summary, ToolOutcome::Confirming { tool: ToolIntent::TripPlan });
    }

    let message = missing_info_message(
        "🗺️ **Thông tin kế hoạch du lịch chưa đủ**",
        "Để lập kế hoạch chi tiết, tôi cần thêm thông tin:",
        &known,
        &missing,
        label,
        "Vui lòng cung cấp thông tin còn thiếu để tôi hoàn thiện kế hoạch cho bạn! 😊",
    );
    let known_names = known.iter().map(|(field, _)| *field).collect();
    (
        message,
        ToolOutcome::Missing {
            tool: ToolIntent::TripPlan,
            known: known_names,
            missing,
        },
    )
}

fn collect(slots: &mut TripSlots, input: &str, context: &str, today: NaiveDate) {
    merge(
        &mut slots.destination,
        extract::extract_destination(input, context)
            .or_else(|| extract::find_location(input, context).map(|l| l.name)),
    );
    merge(&mut slots.dates, extract::extract_travel_dates(input, context, today));
    merge(&mut slots.duration_days, extract::extract_duration_days(input, context));
    merge(&mut slots.participants, extract::extract_participants(input, context));
    merge(&mut slots.budget, extract::extract_budget(input, context));
    merge(&mut slots.visa_requirement, extract::extract_visa_requirement(input, context));
    merge(
        &mut slots.health_requirement,
        extract::extract_health_requirement(input, context),
    );

    let newer = extract::extract_trip_preferences(input, context);
    merge(&mut slots.preferences.travel_style, newer.travel_style);
    merge(&mut slots.preferences.accommodation, newer.accommodation);
    merge(&mut slots.preferences.transportation, newer.transportation);
    merge(&mut slots.preferences.meals, newer.meals);
    for activity in newer.activities {
        if !slots.preferences.activities.contains(&activity) {
            slots.preferences.activities.push(activity);
        }
    }
}

fn known_fields(slots: &TripSlots) -> Vec<(&'static str, String)> {
    let mut known = Vec::new();
    if let Some(destination) = &slots.destination {
        known.push(("destination", destination.clone()));
    }
    if let Some(dates) = &slots.dates {
        known.push(("dates", dates.as_record_string()));
    }
    if let Some(days) = slots.duration_days {
        known.push(("duration_days", format!("{days} ngày")));
    }
    if let Some(participants) = &slots.participants {
        known.push(("participants", format!("{} người", participants.total)));
    }
    if let Some(budget) = &slots.budget {
        known.push(("budget", format_budget(budget)));
    }
    if let Some(visa) = &slots.visa_requirement {
        known.push(("visa_requirement", visa.clone()));
    }
    if let Some(health) = &slots.health_requirement {
        known.push(("health_requirement", health.clone()));
    }
    known
}

fn confirmation_summary(plan: &TravelPlan) -> String {
    format!(
        "🗺️ **XÁC NHẬN KẾ HOẠCH DU LỊCH**\n\n\
         🎯 Điểm đến: {destination}\n\
         📅 Thời gian: {dates}\n\
         ⏱️ Số ngày: {duration}\n\
         👥 Số người: {total} ({adults} người lớn, {children} trẻ em)\n\
         💰 Ngân sách: {budget}\n\
         📋 Visa: {visa}\n\
         🏥 Sức khỏe: {health}\n\n\
         ✅ Xác nhận lưu kế hoạch? (Có/Không)\n\
         💡 Trả lời \"Có\" hoặc \"Xác nhận\" để lưu, \"Không\" hoặc \"Sửa\" để chỉnh sửa.",
        destination = plan.destination,
        dates = plan.dates,
        duration = plan.duration_days,
        total = plan.participants.total,
        adults = plan.participants.adults,
        children = plan.participants.children,
        budget = format_budget(&plan.budget),
        visa = plan.visa_requirement,
        health = plan.health_requirement,
    )
}

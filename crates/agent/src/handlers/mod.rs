//! Per-intent turn handlers
//!
//! Slot-filling handlers (hotel, car, trip plan) are synchronous: they only
//! extract, merge, and format. Lookup handlers (knowledge, weather, general)
//! call collaborators and degrade to apologetic Vietnamese messages on
//! failure; no handler ever returns an error to the agent loop.

pub(crate) mod car;
pub(crate) mod general;
pub(crate) mod hotel;
pub(crate) mod knowledge;
pub(crate) mod trip_plan;
pub(crate) mod weather;

use travel_agent_core::records::Budget;

/// Shared missing-information message layout: known fields checked off,
/// missing ones listed as open questions.
pub(crate) fn missing_info_message(
    header: &str,
    lead: &str,
    known: &[(&'static str, String)],
    missing: &[&'static str],
    labels: fn(&'static str) -> &'static str,
    footer: &str,
) -> String {
    let mut message = format!("{header}\n\n{lead}\n\n");
    for (field, value) in known {
        message.push_str(&format!("✅ {}: {}\n", labels(field), value));
    }
    if !known.is_empty() {
        message.push('\n');
    }
    for field in missing {
        message.push_str(&format!("❓ {}\n", labels(field)));
    }
    message.push_str(&format!("\n{footer}"));
    message
}

/// "5.000.000 VND" style budget display
pub(crate) fn format_budget(budget: &Budget) -> String {
    format!("{} {}", group_digits(budget.amount), budget.currency)
}

fn group_digits(amount: u64) -> String {
    let digits = amount.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_digits() {
        assert_eq!(group_digits(5_000_000), "5.000.000");
        assert_eq!(group_digits(500), "500");
        assert_eq!(group_digits(0), "0");
    }

    #[test]
    fn test_missing_info_layout() {
        let known = vec![("location", "Đà Nẵng".to_string())];
        let missing = vec!["customer_name"];
        let message = missing_info_message(
            "🏨 **Thông tin đặt phòng chưa đủ**",
            "Để hoàn tất, tôi cần thêm:",
            &known,
            &missing,
            |field| match field {
                "location" => "📍 Địa điểm",
                _ => "👤 Tên khách hàng",
            },
            "Vui lòng bổ sung nhé!",
        );
        assert!(message.contains("✅ 📍 Địa điểm: Đà Nẵng"));
        assert!(message.contains("❓ 👤 Tên khách hàng"));
        assert!(message.ends_with("Vui lòng bổ sung nhé!"));
    }
}

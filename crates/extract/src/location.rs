//! Location gazetteer and resolution
//!
//! Resolution order: any location named in the current query wins outright;
//! otherwise context locations are consulted with provinces preferred over
//! cities (a province in the carried context is a stronger signal than a
//! city mentioned in passing). With no match anywhere the default applies.

use tracing::debug;

use crate::title_case;

/// Fallback when neither query nor context names a location
pub const DEFAULT_LOCATION: &str = "Hà Nội";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocationKind {
    Province,
    City,
}

/// A resolved location with its gazetteer classification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedLocation {
    pub name: String,
    pub kind: LocationKind,
}

const PROVINCES: [&str; 48] = [
    "kiên giang", "an giang", "cà mau", "bạc liêu", "sóc trăng",
    "đồng tháp", "tiền giang", "bến tre", "vĩnh long", "trà vinh",
    "hà giang", "cao bằng", "lào cai", "yên bái", "tuyên quang",
    "thái nguyên", "bắc kạn", "lang sơn", "quảng ninh", "hải phòng",
    "nam định", "thái bình", "hưng yên", "hà nam", "ninh bình",
    "thanh hóa", "nghệ an", "hà tĩnh", "quảng bình", "quảng trì",
    "quảng nam", "quảng ngãi", "bình định", "phú yên", "khánh hòa",
    "ninh thuận", "bình thuận", "kon tum", "gia lai", "đắk lắk",
    "đắk nông", "lâm đồng", "bình phước", "tây ninh", "bình dương",
    "đồng nai", "bà rịa vũng tầu", "long an",
];

const CITIES: [&str; 12] = [
    "hà nội", "hồ chí minh", "đà nẵng", "nha trang", "huế", "hội an",
    "sapa", "đà lạt", "phú quốc", "cần thơ", "vũng tầu", "phan thiết",
];

fn find_all(text: &str) -> Vec<(&'static str, LocationKind)> {
    let lower = text.to_lowercase();
    let mut found = Vec::new();
    for province in PROVINCES {
        if lower.contains(province) {
            found.push((province, LocationKind::Province));
        }
    }
    for city in CITIES {
        if lower.contains(city) {
            found.push((city, LocationKind::City));
        }
    }
    found
}

/// Find a location in query or context, without falling back to the default
///
/// Used where a location is a required field rather than a best guess.
pub fn find_location(query: &str, context: &str) -> Option<ResolvedLocation> {
    let in_query = find_all(query);
    if let Some((name, kind)) = in_query.first() {
        return Some(ResolvedLocation {
            name: title_case(name),
            kind: *kind,
        });
    }

    let in_context = find_all(context);
    let context_province = in_context
        .iter()
        .find(|(_, kind)| *kind == LocationKind::Province);
    context_province
        .or_else(|| in_context.first())
        .map(|(name, kind)| ResolvedLocation {
            name: title_case(name),
            kind: *kind,
        })
}

/// Resolve the most relevant location from query and context
///
/// Always returns a location; the default stands in when nothing matches.
pub fn resolve_location(query: &str, context: &str) -> ResolvedLocation {
    find_location(query, context).unwrap_or_else(|| {
        debug!(default = DEFAULT_LOCATION, "no location in query or context");
        ResolvedLocation {
            name: DEFAULT_LOCATION.to_string(),
            kind: LocationKind::City,
        }
    })
}

/// Vietnamese region for a location, when known
pub fn region_of(location: &str) -> Option<&'static str> {
    const NORTH: [&str; 4] = ["hà nội", "sapa", "hạ long", "ninh bình"];
    const CENTRAL: [&str; 3] = ["huế", "đà nẵng", "hội an"];
    const SOUTH: [&str; 4] = ["hồ chí minh", "đà lạt", "nha trang", "phú quốc"];

    let lower = location.to_lowercase();
    if NORTH.iter().any(|loc| lower.contains(loc)) {
        Some("Miền Bắc")
    } else if CENTRAL.iter().any(|loc| lower.contains(loc)) {
        Some("Miền Trung")
    } else if SOUTH.iter().any(|loc| lower.contains(loc)) {
        Some("Miền Nam")
    } else {
        None
    }
}

/// Whether the location is a known Vietnamese destination
pub fn is_vietnamese_destination(location: &str) -> bool {
    const DESTINATIONS: [&str; 13] = [
        "hà nội", "hồ chí minh", "đà nẵng", "nha trang", "huế",
        "hội an", "sapa", "đà lạt", "phú quốc", "cần thơ",
        "hạ long", "ninh bình", "mù cang chải",
    ];
    let lower = location.to_lowercase();
    DESTINATIONS.iter().any(|loc| lower.contains(loc))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_wins_over_context() {
        let resolved = resolve_location("thời tiết Đà Nẵng thế nào?", "đang nói về Sapa");
        assert_eq!(resolved.name, "Đà Nẵng");
        assert_eq!(resolved.kind, LocationKind::City);
    }

    #[test]
    fn test_context_province_preferred_over_context_city() {
        let resolved = resolve_location("còn ngày mai thì sao?", "khách hỏi về Sapa ở Lào Cai");
        assert_eq!(resolved.name, "Lào Cai");
        assert_eq!(resolved.kind, LocationKind::Province);
    }

    #[test]
    fn test_context_city_used_when_no_province() {
        let resolved = resolve_location("còn ngày mai?", "thời tiết ở Sapa hôm nay");
        assert_eq!(resolved.name, "Sapa");
    }

    #[test]
    fn test_find_location_none_without_match() {
        assert_eq!(find_location("thời tiết thế nào?", "hỏi chung chung"), None);
        assert!(find_location("khách sạn ở Huế", "").is_some());
    }

    #[test]
    fn test_default_when_nothing_matches() {
        let resolved = resolve_location("thời tiết thế nào?", "");
        assert_eq!(resolved.name, DEFAULT_LOCATION);
    }

    #[test]
    fn test_regions() {
        assert_eq!(region_of("Sapa"), Some("Miền Bắc"));
        assert_eq!(region_of("Hội An"), Some("Miền Trung"));
        assert_eq!(region_of("Phú Quốc"), Some("Miền Nam"));
        assert_eq!(region_of("Paris"), None);
    }

    #[test]
    fn test_vietnamese_destination() {
        assert!(is_vietnamese_destination("du lịch Hạ Long"));
        assert!(!is_vietnamese_destination("Tokyo"));
    }
}

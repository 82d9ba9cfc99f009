//! Curated suggestion templates
//!
//! Texts carry a `{location}` placeholder filled at generation time. The
//! tables are keyed by the tool that just ran; cross-tool entries follow the
//! natural next-step flow between tools.

use travel_agent_core::ToolIntent;

pub(crate) struct Template {
    pub text: &'static str,
    pub category: &'static str,
    pub target: ToolIntent,
    pub priority: f32,
    pub keywords: &'static [&'static str],
    pub interests: &'static [&'static str],
}

const KNOWLEDGE_TOOL: &[Template] = &[
    Template {
        text: "Thời tiết {location} như thế nào?",
        category: "weather_followup",
        target: ToolIntent::Weather,
        priority: 0.8,
        keywords: &["địa điểm", "tham quan"],
        interests: &["weather"],
    },
    Template {
        text: "Đặt khách sạn gần {location}",
        category: "accommodation",
        target: ToolIntent::Hotel,
        priority: 0.9,
        keywords: &["khách sạn", "lưu trú"],
        interests: &["accommodation"],
    },
    Template {
        text: "Lên kế hoạch du lịch {location}",
        category: "planning",
        target: ToolIntent::TripPlan,
        priority: 0.7,
        keywords: &["kế hoạch", "lịch trình"],
        interests: &["planning"],
    },
    Template {
        text: "Thuê xe di chuyển tại {location}",
        category: "transportation",
        target: ToolIntent::Car,
        priority: 0.6,
        keywords: &["di chuyển", "transportation"],
        interests: &["transportation"],
    },
];

const WEATHER_TOOL: &[Template] = &[
    Template {
        text: "Đặt khách sạn ở {location}",
        category: "accommodation",
        target: ToolIntent::Hotel,
        priority: 0.8,
        keywords: &["đặt phòng", "lưu trú"],
        interests: &["accommodation"],
    },
    Template {
        text: "Thuê xe du lịch {location}",
        category: "transportation",
        target: ToolIntent::Car,
        priority: 0.7,
        keywords: &["thuê xe", "di chuyển"],
        interests: &["transportation"],
    },
    Template {
        text: "Địa điểm du lịch ở {location}",
        category: "attractions",
        target: ToolIntent::Knowledge,
        priority: 0.9,
        keywords: &["địa điểm", "tham quan"],
        interests: &["sightseeing"],
    },
    Template {
        text: "Lên kế hoạch du lịch {location}",
        category: "planning",
        target: ToolIntent::TripPlan,
        priority: 0.6,
        keywords: &["kế hoạch", "lịch trình"],
        interests: &["planning"],
    },
];

const HOTEL_TOOL: &[Template] = &[
    Template {
        text: "Thuê xe từ khách sạn",
        category: "transportation",
        target: ToolIntent::Car,
        priority: 0.9,
        keywords: &["thuê xe", "di chuyển"],
        interests: &["transportation"],
    },
    Template {
        text: "Thời tiết {location} ngày mai",
        category: "weather",
        target: ToolIntent::Weather,
        priority: 0.7,
        keywords: &["thời tiết", "dự báo"],
        interests: &["weather"],
    },
    Template {
        text: "Địa điểm gần khách sạn",
        category: "attractions",
        target: ToolIntent::Knowledge,
        priority: 0.8,
        keywords: &["địa điểm", "gần đây"],
        interests: &["sightseeing"],
    },
    Template {
        text: "Ẩm thực địa phương ở {location}",
        category: "food",
        target: ToolIntent::Knowledge,
        priority: 0.7,
        keywords: &["ẩm thực", "món ăn"],
        interests: &["food"],
    },
];

const CAR_TOOL: &[Template] = &[
    Template {
        text: "Đặt khách sạn ở điểm đến",
        category: "accommodation",
        target: ToolIntent::Hotel,
        priority: 0.8,
        keywords: &["đặt phòng", "lưu trú"],
        interests: &["accommodation"],
    },
    Template {
        text: "Địa điểm du lịch trên đường",
        category: "attractions",
        target: ToolIntent::Knowledge,
        priority: 0.7,
        keywords: &["địa điểm", "trên đường"],
        interests: &["sightseeing"],
    },
    Template {
        text: "Thời tiết tại điểm đến",
        category: "weather",
        target: ToolIntent::Weather,
        priority: 0.6,
        keywords: &["thời tiết", "điểm đến"],
        interests: &["weather"],
    },
    Template {
        text: "Lên lịch trình chi tiết",
        category: "planning",
        target: ToolIntent::TripPlan,
        priority: 0.5,
        keywords: &["lịch trình", "kế hoạch"],
        interests: &["planning"],
    },
];

const TRIP_PLAN_TOOL: &[Template] = &[
    Template {
        text: "Đặt khách sạn cho chuyến đi",
        category: "accommodation",
        target: ToolIntent::Hotel,
        priority: 0.9,
        keywords: &["đặt phòng", "khách sạn"],
        interests: &["accommodation"],
    },
    Template {
        text: "Đặt xe cho chuyến đi",
        category: "transportation",
        target: ToolIntent::Car,
        priority: 0.8,
        keywords: &["đặt xe", "transportation"],
        interests: &["transportation"],
    },
    Template {
        text: "Kiểm tra thời tiết các ngày",
        category: "weather",
        target: ToolIntent::Weather,
        priority: 0.7,
        keywords: &["thời tiết", "dự báo"],
        interests: &["weather"],
    },
    Template {
        text: "Tìm hiểu thêm về địa điểm",
        category: "attractions",
        target: ToolIntent::Knowledge,
        priority: 0.6,
        keywords: &["địa điểm", "thông tin"],
        interests: &["sightseeing"],
    },
];

const GENERAL_TRAVEL: &[Template] = &[
    Template {
        text: "Gợi ý điểm du lịch hot",
        category: "discovery",
        target: ToolIntent::Knowledge,
        priority: 0.8,
        keywords: &["gợi ý", "điểm du lịch"],
        interests: &["sightseeing"],
    },
    Template {
        text: "Kiểm tra thời tiết hiện tại",
        category: "weather",
        target: ToolIntent::Weather,
        priority: 0.6,
        keywords: &["thời tiết"],
        interests: &["weather"],
    },
    Template {
        text: "Lên kế hoạch du lịch",
        category: "planning",
        target: ToolIntent::TripPlan,
        priority: 0.7,
        keywords: &["kế hoạch", "du lịch"],
        interests: &["planning"],
    },
];

const GENERAL_CHAT: &[Template] = &[
    Template {
        text: "Khám phá điểm du lịch Việt Nam",
        category: "discovery",
        target: ToolIntent::Knowledge,
        priority: 0.5,
        keywords: &["khám phá", "du lịch"],
        interests: &["sightseeing"],
    },
    Template {
        text: "Tìm hiểu về du lịch",
        category: "info",
        target: ToolIntent::Knowledge,
        priority: 0.4,
        keywords: &["tìm hiểu", "du lịch"],
        interests: &["general"],
    },
];

/// Travel words that pick the richer general-chat table
pub(crate) const TRAVEL_INTENT_KEYWORDS: [&str; 5] =
    ["du lịch", "travel", "đi chơi", "nghỉ dưỡng", "kỳ nghỉ"];

/// Templates for the tool that just ran. General chat has two tables,
/// chosen by whether the query sounds travel-related.
pub(crate) fn by_tool(tool: ToolIntent, travel_intent: bool) -> &'static [Template] {
    match tool {
        ToolIntent::Knowledge => KNOWLEDGE_TOOL,
        ToolIntent::Weather => WEATHER_TOOL,
        ToolIntent::Hotel => HOTEL_TOOL,
        ToolIntent::Car => CAR_TOOL,
        ToolIntent::TripPlan => TRIP_PLAN_TOOL,
        ToolIntent::General => {
            if travel_intent {
                GENERAL_TRAVEL
            } else {
                GENERAL_CHAT
            }
        }
    }
}

/// Natural next tools after the one that just ran
pub(crate) fn flow_targets(tool: ToolIntent) -> [ToolIntent; 3] {
    match tool {
        ToolIntent::Knowledge => [ToolIntent::Weather, ToolIntent::Hotel, ToolIntent::TripPlan],
        ToolIntent::Weather => [ToolIntent::Hotel, ToolIntent::Car, ToolIntent::TripPlan],
        ToolIntent::Hotel => [ToolIntent::Car, ToolIntent::Knowledge, ToolIntent::Weather],
        ToolIntent::Car => [ToolIntent::Hotel, ToolIntent::Knowledge, ToolIntent::Weather],
        ToolIntent::TripPlan => [ToolIntent::Hotel, ToolIntent::Car, ToolIntent::Weather],
        ToolIntent::General => [ToolIntent::Knowledge, ToolIntent::Weather, ToolIntent::TripPlan],
    }
}

/// One flow suggestion per target tool
pub(crate) fn cross_tool(target: ToolIntent) -> Option<Template> {
    let (text, priority, keywords): (&'static str, f32, &'static [&'static str]) = match target {
        ToolIntent::Weather => ("Thời tiết {location} hiện tại", 0.7, &["thời tiết"]),
        ToolIntent::Hotel => ("Đặt phòng tại {location}", 0.8, &["đặt phòng"]),
        ToolIntent::Car => ("Thuê xe tại {location}", 0.7, &["thuê xe"]),
        ToolIntent::Knowledge => ("Khám phá {location}", 0.8, &["khám phá"]),
        ToolIntent::TripPlan => ("Lên kế hoạch du lịch {location}", 0.6, &["kế hoạch"]),
        ToolIntent::General => return None,
    };
    Some(Template {
        text,
        category: "cross_tool",
        target,
        priority,
        keywords,
        interests: &[],
    })
}

/// Curated per-city suggestions
pub(crate) const LOCATION_SPECIFIC: [(&str, &[Template]); 2] = [
    (
        "Hà Nội",
        &[
            Template {
                text: "Thăm Hồ Hoàn Kiếm và phố cổ",
                category: "location_specific",
                target: ToolIntent::Knowledge,
                priority: 0.9,
                keywords: &["hồ hoàn kiếm", "phố cổ"],
                interests: &[],
            },
            Template {
                text: "Ẩm thực phở Hà Nội",
                category: "location_specific",
                target: ToolIntent::Knowledge,
                priority: 0.8,
                keywords: &["phở", "ẩm thực"],
                interests: &[],
            },
        ],
    ),
    (
        "Hồ Chí Minh",
        &[
            Template {
                text: "Khám phá Quận 1 và Bến Thành",
                category: "location_specific",
                target: ToolIntent::Knowledge,
                priority: 0.9,
                keywords: &["quận 1", "bến thành"],
                interests: &[],
            },
            Template {
                text: "Ẩm thực Sài Gòn đậm đà",
                category: "location_specific",
                target: ToolIntent::Knowledge,
                priority: 0.8,
                keywords: &["ẩm thực", "sài gòn"],
                interests: &[],
            },
        ],
    ),
];

/// Follow-ups derived from retrieval source categories
pub(crate) const RETRIEVAL_BASED: [(&str, &[Template]); 3] = [
    (
        "attraction",
        &[
            Template {
                text: "Lên lịch tham quan {location}",
                category: "rag_attraction",
                target: ToolIntent::TripPlan,
                priority: 0.8,
                keywords: &["lịch trình", "tham quan"],
                interests: &[],
            },
            Template {
                text: "Đặt khách sạn gần {location}",
                category: "rag_attraction",
                target: ToolIntent::Hotel,
                priority: 0.7,
                keywords: &["khách sạn", "gần"],
                interests: &[],
            },
        ],
    ),
    (
        "food",
        &[
            Template {
                text: "Nhà hàng tốt ở {location}",
                category: "rag_food",
                target: ToolIntent::Knowledge,
                priority: 0.7,
                keywords: &["nhà hàng", "ăn uống"],
                interests: &[],
            },
            Template {
                text: "Tour ẩm thực {location}",
                category: "rag_food",
                target: ToolIntent::TripPlan,
                priority: 0.6,
                keywords: &["tour", "ẩm thực"],
                interests: &[],
            },
        ],
    ),
    (
        "hotel",
        &[
            Template {
                text: "So sánh giá khách sạn",
                category: "rag_hotel",
                target: ToolIntent::Hotel,
                priority: 0.8,
                keywords: &["so sánh", "giá"],
                interests: &[],
            },
            Template {
                text: "Thuê xe từ khách sạn",
                category: "rag_hotel",
                target: ToolIntent::Car,
                priority: 0.7,
                keywords: &["thuê xe", "khách sạn"],
                interests: &[],
            },
        ],
    ),
];

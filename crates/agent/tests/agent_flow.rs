//! End-to-end turn-loop scenarios with scripted collaborators

use std::sync::Arc;

use async_trait::async_trait;

use travel_agent_agent::{SessionState, ToolOutcome, TravelAgent, TurnResult};
use travel_agent_config::Settings;
use travel_agent_core::records::BookingStatus;
use travel_agent_core::{
    BookingStore, CarBooking, ChatHistory, ConversationTurn, CurrentWeather, Error, ForecastEntry,
    HotelBooking, LanguageModel, RetrievalAnswer, RetrievedDocument, Retriever, SourceRef,
    ToolIntent, TravelPlan, TurnRole, WeatherProvider,
};
use travel_agent_persistence::MemoryStore;

/// Scripted language model: echoes history lines for summaries and applies
/// keyword rules over the embedded context for classification.
struct ScriptedLlm;

#[async_trait]
impl LanguageModel for ScriptedLlm {
    async fn complete(&self, prompt: &str) -> Result<String, Error> {
        if prompt.contains("Các công cụ có sẵn") {
            return Ok(classify(prompt));
        }
        if prompt.contains("Lịch sử hội thoại") {
            let summary: Vec<&str> = prompt
                .lines()
                .map(str::trim)
                .filter(|line| {
                    line.starts_with("Người dùng:")
                        || line.starts_with("Trợ lý:")
                        || line.starts_with("Câu hỏi hiện tại:")
                })
                .collect();
            return Ok(summary.join(" "));
        }
        if prompt.contains("kiến thức chung") {
            return Ok("Dựa trên kiến thức chung: nơi đó chưa có tour du lịch.".to_string());
        }
        Ok("Chào bạn! Mình là Mai, trợ lý du lịch của bạn.".to_string())
    }
}

fn classify(prompt: &str) -> String {
    let start = prompt.find("Ngữ cảnh hội thoại:").unwrap_or(0);
    let end = prompt.find("Các công cụ có sẵn").unwrap_or(prompt.len());
    let slice = prompt[start..end].to_lowercase();
    let label = if slice.contains("thời tiết") {
        "WEATHER"
    } else if slice.contains("khách sạn") || slice.contains("đặt phòng") {
        "HOTEL"
    } else if slice.contains("thuê xe") || slice.contains("đặt xe") {
        "CAR"
    } else if slice.contains("kế hoạch") {
        "TRIP_PLAN"
    } else if slice.contains("có gì") || slice.contains("địa điểm") {
        "KNOWLEDGE"
    } else {
        "GENERAL"
    };
    label.to_string()
}

struct FixedRetriever(RetrievalAnswer);

#[async_trait]
impl Retriever for FixedRetriever {
    async fn search(&self, _query: &str, _top_k: usize) -> Result<Vec<RetrievedDocument>, Error> {
        Ok(Vec::new())
    }

    async fn query(&self, _question: &str) -> Result<RetrievalAnswer, Error> {
        Ok(self.0.clone())
    }
}

fn grounded_answer() -> RetrievalAnswer {
    RetrievalAnswer {
        answer: Some("Hội An nổi tiếng với phố cổ và đèn lồng.".to_string()),
        sources: vec![SourceRef {
            id: "doc-1".to_string(),
            category: Some("attraction".to_string()),
            location: Some("Hội An".to_string()),
        }],
        no_relevant_info: false,
    }
}

fn no_match_answer() -> RetrievalAnswer {
    RetrievalAnswer {
        answer: None,
        sources: Vec::new(),
        no_relevant_info: true,
    }
}

struct FixedWeather;

#[async_trait]
impl WeatherProvider for FixedWeather {
    async fn current(&self, _city: &str) -> Result<CurrentWeather, Error> {
        Ok(CurrentWeather {
            temp_c: 18.0,
            description: "mây rải rác".to_string(),
            humidity_pct: 84,
            wind_mps: 2.3,
        })
    }

    async fn forecast(&self, _city: &str) -> Result<Vec<ForecastEntry>, Error> {
        Ok(vec![ForecastEntry {
            time: "09:00".to_string(),
            temp_c: 17.0,
            description: "mưa nhẹ".to_string(),
        }])
    }
}

struct FailingStore;

#[async_trait]
impl BookingStore for FailingStore {
    async fn save_hotel_booking(&self, _booking: &HotelBooking) -> Result<(), Error> {
        Err(Error::Persistence("disk full".to_string()))
    }

    async fn save_car_booking(&self, _booking: &CarBooking) -> Result<(), Error> {
        Err(Error::Persistence("disk full".to_string()))
    }

    async fn save_trip_plan(&self, _plan: &TravelPlan) -> Result<(), Error> {
        Err(Error::Persistence("disk full".to_string()))
    }

    async fn conversation_history(&self, _id: &str) -> Result<Vec<(TurnRole, String)>, Error> {
        Ok(Vec::new())
    }
}

fn make_agent(answer: RetrievalAnswer, store: Arc<dyn BookingStore>) -> TravelAgent {
    TravelAgent::new(
        Arc::new(ScriptedLlm),
        Arc::new(FixedRetriever(answer)),
        Arc::new(FixedWeather),
        store,
        Settings::default(),
    )
}

async fn turn(
    agent: &TravelAgent,
    history: &mut ChatHistory,
    state: &mut SessionState,
    input: &str,
) -> TurnResult {
    let result = agent.handle_turn(input, history, state).await;
    history.push(ConversationTurn::user(input));
    history.push(ConversationTurn::assistant(result.response.clone()));
    result
}

#[tokio::test]
async fn test_hotel_happy_path_three_turns() {
    let store = Arc::new(MemoryStore::new());
    let agent = make_agent(grounded_answer(), store.clone());
    let mut history = ChatHistory::new();
    let mut state = SessionState::new();

    let first = turn(
        &agent,
        &mut history,
        &mut state,
        "Tôi muốn đặt khách sạn Sheraton ở Đà Nẵng",
    )
    .await;
    assert_eq!(first.tool_used, ToolIntent::Hotel);
    assert!(first.response.contains("Thông tin đặt phòng chưa đủ"));
    assert!(first.response.contains("Đà Nẵng"));
    assert!(!first.awaiting_confirmation);

    let second = turn(
        &agent,
        &mut history,
        &mut state,
        "Tên tôi là Nguyễn Văn An, SĐT 0987654321, nhận phòng 25/12/2030, 2 đêm",
    )
    .await;
    assert_eq!(second.tool_used, ToolIntent::Hotel);
    assert!(second.response.contains("XÁC NHẬN THÔNG TIN ĐẶT PHÒNG"));
    assert!(second.response.contains("Nguyễn Văn An"));
    assert!(second.awaiting_confirmation);
    assert!(store.hotel_bookings().is_empty());

    let third = turn(&agent, &mut history, &mut state, "Xác nhận").await;
    assert!(third.success);
    assert!(third.response.contains("Đặt phòng khách sạn thành công"));
    assert!(!third.awaiting_confirmation);
    match third.outcome {
        ToolOutcome::Committed { tool, ref reference } => {
            assert_eq!(tool, ToolIntent::Hotel);
            assert!(reference.starts_with("HOTEL-"));
            assert!(reference.contains("20301225"));
        }
        ref other => panic!("unexpected outcome: {other:?}"),
    }

    let saved = store.hotel_bookings();
    assert_eq!(saved.len(), 1);
    assert_eq!(saved[0].status, BookingStatus::Confirmed);
    assert_eq!(saved[0].location, "Đà Nẵng");
    assert_eq!(saved[0].nights, 2);
}

#[tokio::test]
async fn test_weather_location_carries_across_turns() {
    let agent = make_agent(grounded_answer(), Arc::new(MemoryStore::new()));
    let mut history = ChatHistory::new();
    let mut state = SessionState::new();

    let first = turn(
        &agent,
        &mut history,
        &mut state,
        "thời tiết ở Sapa hôm nay thế nào?",
    )
    .await;
    assert_eq!(first.tool_used, ToolIntent::Weather);
    assert!(first.response.contains("Thời tiết hiện tại tại Sapa"));

    let second = turn(&agent, &mut history, &mut state, "còn ngày mai thì sao?").await;
    assert_eq!(second.tool_used, ToolIntent::Weather);
    assert!(second.response.contains("Dự báo thời tiết Sapa"));
    assert_eq!(
        second.outcome,
        ToolOutcome::WeatherReport {
            city: "Sapa".to_string(),
            forecast: true
        }
    );
}

#[tokio::test]
async fn test_weather_turn_attaches_capped_unique_suggestions() {
    let agent = make_agent(grounded_answer(), Arc::new(MemoryStore::new()));
    let mut history = ChatHistory::new();
    let mut state = SessionState::new();

    let result = turn(&agent, &mut history, &mut state, "thời tiết ở Sapa thế nào?").await;
    assert!(!result.suggestions.is_empty());
    assert!(result.suggestions.len() <= 5);
    assert!(result.suggestions.iter().any(|s| s.text.contains("Sapa")));

    let mut texts: Vec<&str> = result.suggestions.iter().map(|s| s.text.as_str()).collect();
    texts.sort_unstable();
    texts.dedup();
    assert_eq!(texts.len(), result.suggestions.len());
}

#[tokio::test]
async fn test_knowledge_no_match_requires_explicit_opt_in() {
    let agent = make_agent(no_match_answer(), Arc::new(MemoryStore::new()));
    let mut history = ChatHistory::new();
    let mut state = SessionState::new();

    let first = turn(
        &agent,
        &mut history,
        &mut state,
        "Ẩm thực sao Hỏa có gì đặc biệt?",
    )
    .await;
    assert_eq!(first.tool_used, ToolIntent::Knowledge);
    assert!(first.response.contains("không tìm thấy thông tin"));
    assert!(matches!(first.outcome, ToolOutcome::NoRelevantInfo { .. }));

    let second = turn(&agent, &mut history, &mut state, "Có").await;
    assert_eq!(second.tool_used, ToolIntent::Knowledge);
    assert!(second.response.contains("Dựa trên kiến thức chung"));
    assert_eq!(second.outcome, ToolOutcome::Reply);
}

#[tokio::test]
async fn test_knowledge_no_match_offer_lapses_without_yes() {
    let agent = make_agent(no_match_answer(), Arc::new(MemoryStore::new()));
    let mut history = ChatHistory::new();
    let mut state = SessionState::new();

    turn(&agent, &mut history, &mut state, "Ẩm thực sao Hỏa có gì đặc biệt?").await;
    let second = turn(&agent, &mut history, &mut state, "thời tiết Huế thế nào?").await;
    assert_eq!(second.tool_used, ToolIntent::Weather);
    assert!(second.response.contains("Huế"));
}

#[tokio::test]
async fn test_grounded_knowledge_answer() {
    let agent = make_agent(grounded_answer(), Arc::new(MemoryStore::new()));
    let mut history = ChatHistory::new();
    let mut state = SessionState::new();

    let result = turn(&agent, &mut history, &mut state, "Hội An có gì hay?").await;
    assert_eq!(result.tool_used, ToolIntent::Knowledge);
    assert!(result.response.contains("phố cổ"));
    assert!(matches!(result.outcome, ToolOutcome::Answered { ref sources } if sources.len() == 1));
}

#[tokio::test]
async fn test_rejection_keeps_slots_for_editing() {
    let store = Arc::new(MemoryStore::new());
    let agent = make_agent(grounded_answer(), store.clone());
    let mut history = ChatHistory::new();
    let mut state = SessionState::new();

    turn(
        &agent,
        &mut history,
        &mut state,
        "Đặt khách sạn Sheraton ở Đà Nẵng, tên tôi là Nguyễn Văn An, SĐT 0987654321, nhận phòng 25/12/2030, 2 đêm",
    )
    .await;
    assert!(state.awaiting_confirmation());

    let rejection = turn(&agent, &mut history, &mut state, "Không").await;
    assert!(rejection.response.contains("Đã hủy xác nhận"));
    assert!(!rejection.awaiting_confirmation);
    assert!(store.hotel_bookings().is_empty());

    // a correction re-enters the flow and regenerates the confirmation
    let corrected = turn(
        &agent,
        &mut history,
        &mut state,
        "đổi ngày nhận phòng sang 26/12/2030 nhé",
    )
    .await;
    assert!(corrected.awaiting_confirmation);
    assert!(corrected.response.contains("2030-12-26"));
}

#[tokio::test]
async fn test_commit_failure_preserves_pending_confirmation() {
    let agent = make_agent(grounded_answer(), Arc::new(FailingStore));
    let mut history = ChatHistory::new();
    let mut state = SessionState::new();

    turn(
        &agent,
        &mut history,
        &mut state,
        "Đặt khách sạn Sheraton ở Đà Nẵng, tên tôi là Nguyễn Văn An, SĐT 0987654321, nhận phòng 25/12/2030, 2 đêm",
    )
    .await;
    assert!(state.awaiting_confirmation());

    let failed = turn(&agent, &mut history, &mut state, "Xác nhận").await;
    assert!(!failed.success);
    assert!(failed.response.contains("chưa lưu được"));
    assert!(matches!(failed.outcome, ToolOutcome::Failed { tool: ToolIntent::Hotel, .. }));
    // the pending record survives so the user can simply confirm again
    assert!(failed.awaiting_confirmation);
    assert!(state.awaiting_confirmation());
}

#[tokio::test]
async fn test_general_greeting() {
    let agent = make_agent(grounded_answer(), Arc::new(MemoryStore::new()));
    let mut history = ChatHistory::new();
    let mut state = SessionState::new();

    let result = turn(&agent, &mut history, &mut state, "Xin chào!").await;
    assert_eq!(result.tool_used, ToolIntent::General);
    assert!(result.response.contains("Mai"));
    assert_eq!(result.outcome, ToolOutcome::Reply);
}

//! Fixed Vietnamese prompts sent to the language model
//!
//! Assistant turns are truncated to 100 characters in the context-summary
//! prompt so long tool replies do not drown the location signal.

use travel_agent_core::{ConversationTurn, TurnRole};

/// Character cap applied to assistant turns in the summary prompt
const ASSISTANT_TURN_CAP: usize = 100;

fn truncated(text: &str) -> String {
    if text.chars().count() > ASSISTANT_TURN_CAP {
        let short: String = text.chars().take(ASSISTANT_TURN_CAP).collect();
        format!("{short}...")
    } else {
        text.to_string()
    }
}

/// Prompt that rewrites recent history into a 1-2 sentence context summary,
/// with explicit emphasis on any locations mentioned
pub fn context_summary(turns: &[ConversationTurn], user_input: &str) -> String {
    let mut prompt = String::from(
        "Hãy phân tích cuộc hội thoại và tóm tắt ngữ cảnh, ĐẶC BIỆT chú ý các địa điểm được đề cập:\n\nLịch sử hội thoại:\n",
    );
    for turn in turns {
        match turn.role {
            TurnRole::User => {
                prompt.push_str("Người dùng: ");
                prompt.push_str(&turn.text);
            }
            TurnRole::Assistant => {
                prompt.push_str("Trợ lý: ");
                prompt.push_str(&truncated(&turn.text));
            }
        }
        prompt.push('\n');
    }
    prompt.push_str(&format!(
        "\nCâu hỏi hiện tại: {user_input}\n\n\
         QUAN TRỌNG: Nếu có địa điểm nào được đề cập trong lịch sử hội thoại, \
         hãy ưu tiên ghi nhớ và đề cập trong tóm tắt ngữ cảnh.\n\n\
         Tóm tắt ngữ cảnh (1-2 câu, bao gồm địa điểm nếu có):"
    ));
    prompt
}

/// Prompt that classifies the turn into one of the six intent tokens
pub fn classify_intent(context: &str, user_input: &str) -> String {
    format!(
        "Phân tích ý định của người dùng dựa trên câu hỏi hiện tại và ngữ cảnh cuộc hội thoại:\n\n\
         Ngữ cảnh hội thoại: {context}\n\
         Câu hỏi hiện tại: {user_input}\n\n\
         Các công cụ có sẵn:\n\
         1. KNOWLEDGE - Tra cứu thông tin dịch vụ du lịch, danh lam thắng cảnh địa phương\n\
         2. WEATHER - Kiểm tra thời tiết hiện tại hoặc dự đoán thời tiết tương lai\n\
         3. HOTEL - Đặt phòng khách sạn\n\
         4. CAR - Đặt xe/vận chuyển\n\
         5. TRIP_PLAN - Lên kế hoạch du lịch chi tiết, lưu kế hoạch\n\
         6. GENERAL - Trò chuyện chung, không cần công cụ đặc biệt\n\n\
         Quy tắc phân loại (ĐẶC BIỆT chú ý ngữ cảnh):\n\
         - KNOWLEDGE: Hỏi về địa điểm, danh lam, ẩm thực, hoạt động du lịch, \"có gì\", \"làm gì\"\n\
         - WEATHER: Hỏi về thời tiết, nhiệt độ, trời mưa/nắng, dự báo (CHÚ Ý: nếu ngữ cảnh có địa điểm, thời tiết sẽ của địa điểm đó)\n\
         - HOTEL: Yêu cầu đặt phòng, tìm khách sạn, booking accommodation\n\
         - CAR: Yêu cầu đặt xe, thuê xe, book transportation, di chuyển\n\
         - TRIP_PLAN: Lên kế hoạch du lịch, tạo itinerary, lưu kế hoạch, \"lên kế hoạch\", \"tạo kế hoạch\", \"lưu kế hoạch\"\n\
         - GENERAL: Chào hỏi, cảm ơn, câu hỏi chung không liên quan du lịch\n\n\
         QUAN TRỌNG: Nếu câu hỏi đơn giản như \"thời tiết\" nhưng ngữ cảnh có địa điểm, \
         vẫn chọn WEATHER vì người dùng muốn biết thời tiết của địa điểm đó.\n\n\
         Trả lời CHÍNH XÁC một trong: KNOWLEDGE, WEATHER, HOTEL, CAR, TRIP_PLAN, GENERAL"
    )
}

/// Persona reply prompt for general chat turns
pub fn persona_reply(
    agent_name: &str,
    personality: &str,
    interests: &[String],
    context: &str,
    user_input: &str,
) -> String {
    let interest_context = if interests.is_empty() {
        String::new()
    } else {
        format!("Người dùng quan tâm đến: {}. ", interests.join(", "))
    };
    format!(
        "Bạn là {agent_name}, trợ lý du lịch với tính cách {personality}.\n\n\
         {interest_context}\n\n\
         Ngữ cảnh: {context}\n\
         Câu hỏi: {user_input}\n\n\
         Hãy trả lời một cách tự nhiên và hữu ích theo tính cách của bạn. \
         Nếu liên quan đến du lịch, hãy gợi ý người dùng hỏi cụ thể hơn về địa điểm, thời tiết, hoặc đặt dịch vụ. \
         Nếu biết sở thích của người dùng, hãy đưa ra gợi ý phù hợp.\n\n\
         Trả lời bằng tiếng Việt:"
    )
}

/// Fallback prompt when retrieval found nothing relevant
pub fn general_knowledge(query: &str) -> String {
    format!(
        "Bạn là trợ lý du lịch thông minh. Khách hàng hỏi về: \"{query}\"\n\n\
         Tôi không tìm thấy thông tin cụ thể trong cơ sở dữ liệu của mình về câu hỏi này.\n\n\
         Hãy trả lời dựa trên kiến thức chung của bạn về du lịch Việt Nam:\n\
         - Đưa ra thông tin hữu ích và chính xác\n\
         - Giữ giọng điệu thân thiện và chuyên nghiệp\n\
         - Trả lời bằng tiếng Việt\n\
         - Nếu không chắc chắn, hãy khuyên khách tìm hiểu thêm từ nguồn chính thức\n\n\
         Trả lời:"
    )
}

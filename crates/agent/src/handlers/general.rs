//! General chat turns

use tracing::warn;

use travel_agent_config::AgentConfig;
use travel_agent_core::LanguageModel;
use travel_agent_llm::prompt;

use crate::outcome::ToolOutcome;

pub(crate) async fn handle(
    llm: &dyn LanguageModel,
    agent: &AgentConfig,
    interests: &[String],
    context: &str,
    input: &str,
) -> (String, ToolOutcome) {
    let request = prompt::persona_reply(&agent.name, &agent.personality, interests, context, input);
    let reply = match llm.complete(&request).await {
        Ok(reply) if !reply.trim().is_empty() => reply.trim().to_string(),
        Ok(_) => fallback_reply(&agent.name),
        Err(err) => {
            warn!(error = %err, "persona reply failed, using canned greeting");
            fallback_reply(&agent.name)
        }
    };
    (reply, ToolOutcome::Reply)
}

fn fallback_reply(agent_name: &str) -> String {
    format!(
        "Xin chào! Mình là {agent_name}, trợ lý du lịch của bạn. \
         Mình có thể giúp bạn tra cứu điểm đến, xem thời tiết, đặt phòng khách sạn, \
         đặt xe hoặc lên kế hoạch du lịch. Bạn cần gì nào? 😊"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use travel_agent_core::Error;

    struct FailingLlm;

    #[async_trait]
    impl LanguageModel for FailingLlm {
        async fn complete(&self, _prompt: &str) -> Result<String, Error> {
            Err(Error::Llm("timeout".to_string()))
        }
    }

    #[tokio::test]
    async fn test_llm_failure_uses_canned_greeting() {
        let agent = AgentConfig::default();
        let (message, outcome) = handle(&FailingLlm, &agent, &[], "", "xin chào").await;
        assert!(message.contains("Mai"));
        assert!(message.contains("trợ lý du lịch"));
        assert_eq!(outcome, ToolOutcome::Reply);
    }
}

//! Interactive chat entry point
//!
//! Wires the real backends (OpenAI-compatible LLM, HTTP vector search,
//! OpenWeatherMap, in-memory store) into the turn loop and runs a terminal
//! conversation. Configuration priority: env vars > TRAVEL_AGENT_CONFIG
//! yaml > defaults.

use std::io::{self, BufRead, Write};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use travel_agent_agent::{SessionState, TravelAgent};
use travel_agent_config::Settings;
use travel_agent_core::{ChatHistory, ConversationTurn, LanguageModel, TurnRole};
use travel_agent_llm::{OpenAiBackend, OpenAiConfig};
use travel_agent_persistence::MemoryStore;
use travel_agent_rag::{HttpRetriever, HttpRetrieverConfig, KnowledgeBase, KnowledgeBaseConfig};
use travel_agent_tools::{OpenWeatherClient, OpenWeatherConfig};

const SESSION_ID: &str = "cli";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = load_settings();
    init_tracing();

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "starting travel agent");

    let llm: Arc<dyn LanguageModel> = Arc::new(
        OpenAiBackend::new(llm_config(&settings))
            .context("language model init failed (is OPENAI_API_KEY set?)")?,
    );

    let mut search_config = HttpRetrieverConfig::default();
    if let Ok(endpoint) = std::env::var("RAG_ENDPOINT") {
        search_config.endpoint = endpoint;
    }
    let retriever = KnowledgeBase::new(
        HttpRetriever::new(search_config).context("vector search init failed")?,
        llm.clone(),
        KnowledgeBaseConfig {
            top_k: settings.rag.top_k,
            min_relevance_score: settings.rag.min_relevance_score,
        },
    );

    let weather = OpenWeatherClient::new(OpenWeatherConfig {
        api_key: std::env::var(&settings.weather.api_key_env).unwrap_or_default(),
        endpoint: settings.weather.endpoint.clone(),
        timeout: Duration::from_secs(settings.weather.timeout_secs),
    })
    .context("weather client init failed (is WEATHER_API_KEY set?)")?;

    let store = Arc::new(MemoryStore::new());
    let agent_name = settings.agent.name.clone();
    let agent = TravelAgent::new(
        llm,
        Arc::new(retriever),
        Arc::new(weather),
        store.clone(),
        settings,
    );

    println!("🌏 Xin chào! Mình là {agent_name}, trợ lý du lịch của bạn.");
    println!("   Gõ 'thoát' hoặc Ctrl+D để kết thúc.\n");

    let mut history = ChatHistory::new();
    let mut state = SessionState::new();
    let stdin = io::stdin();

    loop {
        print!("Bạn: ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let input = line.trim();
        if input.is_empty() {
            continue;
        }
        if matches!(input.to_lowercase().as_str(), "thoát" | "exit" | "quit") {
            break;
        }

        let result = agent.handle_turn(input, &history, &mut state).await;

        println!("\n{agent_name}: {}\n", result.response);
        if !result.suggestions.is_empty() {
            println!("💡 Gợi ý:");
            for suggestion in &result.suggestions {
                println!("   • {}", suggestion.text);
            }
            println!();
        }

        store.append_turn(SESSION_ID, TurnRole::User, input);
        store.append_turn(SESSION_ID, TurnRole::Assistant, result.response.clone());
        history.push(ConversationTurn::user(input));
        history.push(ConversationTurn::assistant(result.response));
    }

    println!("Tạm biệt! Hẹn gặp lại. 👋");
    Ok(())
}

/// Env vars win over the yaml file; a missing or broken file degrades to
/// defaults so the chat still starts.
fn load_settings() -> Settings {
    let path = std::env::var("TRAVEL_AGENT_CONFIG")
        .unwrap_or_else(|_| "config/default.yaml".to_string());
    match Settings::load(&path) {
        Ok(settings) => {
            // tracing not yet initialized
            eprintln!("Loaded configuration from {path}");
            settings
        }
        Err(e) => {
            eprintln!("Warning: failed to load config from {path}: {e}. Using defaults.");
            Settings::default()
        }
    }
}

fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "travel_agent=info".into());
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn llm_config(settings: &Settings) -> OpenAiConfig {
    OpenAiConfig::new(std::env::var(&settings.llm.api_key_env).unwrap_or_default())
        .with_model(settings.llm.model.clone())
        .with_endpoint(settings.llm.endpoint.clone())
        .with_temperature(settings.agent.temperature)
        .with_timeout(Duration::from_secs(settings.llm.timeout_secs))
}

//! A minimal search-grounded agent: one assistant with Google Search,
//! answering two canned queries.

use agent_architectures::{config, credentials, extract};
use agentlab_agent::LlmAgent;
use agentlab_runner::{InMemorySessionService, Runner, RunnerConfig};
use agentlab_tool::GoogleSearchTool;
use anyhow::Result;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

const QUERIES: [&str; 2] = [
    "What is Agent Development Kit from Google? What languages is the SDK available in?",
    "What's the weather in London?",
];

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let api_key = match credentials::resolve_api_key() {
        Ok(key) => key,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    };

    let model = Arc::new(config::build_model(&api_key)?);
    let agent = Arc::new(
        LlmAgent::builder("helpful_assistant")
            .description("A simple agent that can answer general questions.")
            .model(model)
            .instruction(
                "You are a helpful assistant. Use Google Search for current info or if unsure.",
            )
            .tool(Arc::new(GoogleSearchTool::new()))
            .build()?,
    );
    println!("Root agent defined.");

    let session_service = Arc::new(InMemorySessionService::new());
    let runner = Runner::new(RunnerConfig {
        app_name: "simple_agent".into(),
        agent,
        session_service: session_service.clone(),
    });
    let session = session_service.create_session("simple_agent", "user");
    println!("Runner created.");

    for (i, query) in QUERIES.iter().enumerate() {
        println!("\n{}", "=".repeat(60));
        println!("Query {}: {query}", i + 1);
        println!("{}", "=".repeat(60));

        let events = runner.run_collect("user", session.id(), query).await?;
        println!("Response: {}", extract::response_text(&events));
    }

    Ok(())
}

//! `ragagent ask`: answer a question and print the transcript.

use ragagent_agent::{AgentLoop, TranscriptFormatter};
use std::path::Path;
use std::sync::Arc;
use tracing::info;

/// Asked when no question is given on the command line.
pub const DEFAULT_QUERY: &str = "カメレオン猫が嬉しいとき、毛の色は何色になりますか？";

pub async fn run(
    config_path: Option<&Path>,
    query: Option<String>,
    raw: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = super::load_config(config_path)?;
    let provider = super::build_provider(&config)?;
    let store = super::build_store(&config, provider.clone()).await?;
    let tools = Arc::new(ragagent_tools::default_registry(store, config.retrieval.top_k));

    let mut agent = AgentLoop::new(provider, &config.model, config.temperature, tools)
        .with_system_prompt(&config.agent.system_prompt)
        .with_max_iterations(config.agent.max_iterations);
    if let Some(max_tokens) = config.max_tokens {
        agent = agent.with_max_tokens(max_tokens);
    }

    let query = query.unwrap_or_else(|| DEFAULT_QUERY.to_string());
    info!(model = %config.model, "Asking agent");
    let messages = agent.run(query).await?;

    if raw {
        println!("{}", serde_json::to_string_pretty(&messages)?);
    } else {
        let formatter = TranscriptFormatter::new(config.transcript.max_chars);
        println!("{}", formatter.format(&messages));
    }

    Ok(())
}

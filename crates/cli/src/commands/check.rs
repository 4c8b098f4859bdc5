//! `ragagent check`: one chat completion against the configured endpoint.

use ragagent_core::message::Message;
use ragagent_core::provider::ProviderRequest;
use std::path::Path;

/// Sent when no message is given.
pub const DEFAULT_MESSAGE: &str = "こんにちは！";

pub async fn run(
    config_path: Option<&Path>,
    message: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = super::load_config(config_path)?;
    let provider = super::build_provider(&config)?;

    let message = message.unwrap_or_else(|| DEFAULT_MESSAGE.to_string());
    let mut request = ProviderRequest::new(&config.model, vec![Message::human(message)]);
    request.temperature = config.temperature;
    request.max_tokens = config.max_tokens;

    let response = provider.complete(request).await?;
    println!("{}", response.message.content);
    Ok(())
}

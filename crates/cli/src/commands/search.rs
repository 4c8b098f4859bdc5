//! `ragagent search`: query the knowledge base without the agent.

use ragagent_tools::RetrieveContextTool;
use std::path::Path;

pub async fn run(
    config_path: Option<&Path>,
    query: &str,
    k: Option<usize>,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = super::load_config(config_path)?;
    let provider = super::build_provider(&config)?;
    let store = super::build_store(&config, provider).await?;

    let tool = RetrieveContextTool::new(store).with_top_k(k.unwrap_or(config.retrieval.top_k));
    let (serialized, documents) = tool.retrieve(query).await?;

    if documents.is_empty() {
        println!("No documents found.");
    } else {
        println!("{serialized}");
    }
    Ok(())
}

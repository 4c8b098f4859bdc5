//! Subcommand implementations and the setup they share.

pub mod ask;
pub mod check;
pub mod search;

use ragagent_config::AppConfig;
use ragagent_core::memory::VectorStore;
use ragagent_core::Provider;
use ragagent_memory::{InMemoryVectorStore, ProviderEmbedder};
use ragagent_providers::OpenAiCompatProvider;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};

pub(crate) fn load_config(path: Option<&Path>) -> Result<AppConfig, Box<dyn std::error::Error>> {
    let config = AppConfig::load(path).map_err(|e| format!("Failed to load config: {e}"))?;
    debug!(?config, "Configuration loaded");
    Ok(config)
}

/// Build the provider, or explain how to configure one.
pub(crate) fn build_provider(
    config: &AppConfig,
) -> Result<Arc<dyn Provider>, Box<dyn std::error::Error>> {
    // Fail early with setup hints
    if config.api_key.is_none() {
        eprintln!();
        eprintln!("  ERROR: No API key configured!");
        eprintln!();
        eprintln!("  Set these environment variables (or put them in a .env file):");
        eprintln!("    OPENAI_API_KEY=sk-...");
        eprintln!("    OPENAI_ENDPOINT=https://api.openai.com/v1   (any OpenAI-compatible URL)");
        eprintln!("    OPENAI_MODEL=gpt-4o-mini");
        eprintln!("    OPENAI_EMBEDDING_MODEL=text-embedding-3-small");
        eprintln!();
        eprintln!("  Or add api_key to your config file:");
        eprintln!("    {}", AppConfig::config_dir().join("config.toml").display());
        eprintln!();
        return Err("No API key found. See above for setup instructions.".into());
    }

    let provider = OpenAiCompatProvider::from_config(config)?;
    Ok(Arc::new(provider))
}

/// Index the configured corpus with the provider's embedding model.
pub(crate) async fn build_store(
    config: &AppConfig,
    provider: Arc<dyn Provider>,
) -> Result<Arc<dyn VectorStore>, Box<dyn std::error::Error>> {
    let documents = match &config.knowledge.documents_file {
        Some(path) => ragagent_memory::load_documents(path)?,
        None => ragagent_memory::seed_documents(),
    };

    let embedder = Arc::new(ProviderEmbedder::new(provider, &config.embedding_model));
    let store = InMemoryVectorStore::from_documents(documents, embedder).await?;
    info!(
        documents = store.count().await?,
        embedding_model = %config.embedding_model,
        "Knowledge base ready"
    );
    Ok(Arc::new(store))
}

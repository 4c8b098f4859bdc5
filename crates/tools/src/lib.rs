//! Built-in tool implementations for ragagent.
//!
//! Tools give the agent access to things outside the model. Today that is
//! the knowledge base, searched through [`RetrieveContextTool`].

pub mod retrieve_context;

use ragagent_core::memory::VectorStore;
use ragagent_core::tool::ToolRegistry;
use std::sync::Arc;

pub use retrieve_context::RetrieveContextTool;

/// Create the default tool registry, backed by `store`.
///
/// The retrieval tool returns at most `top_k` documents per query.
pub fn default_registry(store: Arc<dyn VectorStore>, top_k: usize) -> ToolRegistry {
    let mut registry = ToolRegistry::new();
    registry.register(Box::new(RetrieveContextTool::new(store).with_top_k(top_k)));
    registry
}

//! Retrieval tool: lets the model search the knowledge base.
//!
//! The tool answers with two things: a text blob for the model to read, and
//! the matching documents themselves as the result's artifact, so the
//! transcript can list which documents were used.

use async_trait::async_trait;
use ragagent_core::error::ToolError;
use ragagent_core::literal;
use ragagent_core::memory::{Document, VectorStore};
use ragagent_core::tool::{Tool, ToolResult};
use std::sync::Arc;
use tracing::debug;

/// Number of documents returned per query unless configured otherwise.
pub const DEFAULT_TOP_K: usize = 2;

/// A tool that runs a similarity search against a [`VectorStore`].
pub struct RetrieveContextTool {
    store: Arc<dyn VectorStore>,
    top_k: usize,
}

impl RetrieveContextTool {
    pub fn new(store: Arc<dyn VectorStore>) -> Self {
        Self {
            store,
            top_k: DEFAULT_TOP_K,
        }
    }

    /// Set how many documents a query returns. Zero is raised to one.
    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k.max(1);
        self
    }

    pub fn top_k(&self) -> usize {
        self.top_k
    }

    /// Search the store and return the serialized blob with the documents.
    pub async fn retrieve(&self, query: &str) -> Result<(String, Vec<Document>), ToolError> {
        let results = self
            .store
            .similarity_search(query, self.top_k)
            .await
            .map_err(|e| ToolError::ExecutionFailed {
                tool_name: self.name().to_string(),
                reason: e.to_string(),
            })?;

        debug!(query, hits = results.len(), "Retrieved context");
        let documents: Vec<Document> = results.into_iter().map(|r| r.document).collect();
        Ok((serialize_documents(&documents), documents))
    }
}

/// Render documents as `Source: <metadata>\nContent: <text>` blocks
/// separated by a blank line.
pub fn serialize_documents(documents: &[Document]) -> String {
    documents
        .iter()
        .map(|doc| {
            format!(
                "Source: {}\nContent: {}",
                literal::render_map(&doc.metadata),
                doc.page_content
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

#[async_trait]
impl Tool for RetrieveContextTool {
    fn name(&self) -> &str {
        "retrieve_context"
    }

    fn description(&self) -> &str {
        "Retrieve information to help answer a query."
    }

    fn parameters_schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "query": {
                    "type": "string",
                    "description": "The search query"
                }
            },
            "required": ["query"]
        })
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<ToolResult, ToolError> {
        let query = arguments["query"]
            .as_str()
            .ok_or_else(|| ToolError::InvalidArguments("Missing 'query' argument".into()))?;

        let (output, documents) = self.retrieve(query).await?;

        Ok(ToolResult {
            call_id: String::new(),
            output,
            artifact: Some(documents),
        })
    }
}

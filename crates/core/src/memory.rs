//! Document store traits: the knowledge the agent retrieves from.
//!
//! Documents are embedded once when they are added to a [`VectorStore`];
//! queries are embedded on the fly and ranked by similarity.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::error::MemoryError;

/// A unit of reference text.
///
/// The same type is attached to tool messages as their artifact once it
/// has been retrieved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Identifier (assigned by the store when absent)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// The text content
    #[serde(default)]
    pub page_content: String,

    /// Arbitrary metadata (source, tags, ...)
    #[serde(default, skip_serializing_if = "serde_json::Map::is_empty")]
    pub metadata: serde_json::Map<String, serde_json::Value>,
}

impl Document {
    /// Create a document with an id and content.
    pub fn new(id: impl Into<String>, page_content: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            page_content: page_content.into(),
            metadata: serde_json::Map::new(),
        }
    }

    /// Add a metadata entry.
    pub fn with_metadata(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.metadata.insert(key.into(), value);
        self
    }
}

/// A document returned by a similarity search, with its score.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredDocument {
    pub document: Document,
    /// Cosine similarity to the query, in [-1, 1]
    pub score: f32,
}

/// Turns text into embedding vectors.
#[async_trait]
pub trait Embedder: Send + Sync {
    /// Embed a batch of documents, one vector per input, in order.
    async fn embed_documents(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, MemoryError>;

    /// Embed a single query.
    async fn embed_query(&self, text: &str) -> Result<Vec<f32>, MemoryError> {
        self.embed_documents(&[text.to_string()])
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| MemoryError::EmbeddingFailed("embedder returned no vector".into()))
    }
}

/// The core VectorStore trait.
///
/// Implementations: in-memory (`ragagent-memory`).
#[async_trait]
pub trait VectorStore: Send + Sync {
    /// The backend name (e.g., "in_memory").
    fn name(&self) -> &str;

    /// Embed and store documents. Returns the ids, in input order.
    async fn add_documents(&self, documents: Vec<Document>) -> Result<Vec<String>, MemoryError>;

    /// Return at most `k` documents, most similar first.
    async fn similarity_search(
        &self,
        query: &str,
        k: usize,
    ) -> Result<Vec<ScoredDocument>, MemoryError>;

    /// Get a document by ID.
    async fn get(&self, id: &str) -> Result<Option<Document>, MemoryError>;

    /// Delete a document by ID.
    async fn delete(&self, id: &str) -> Result<bool, MemoryError>;

    /// Get total document count.
    async fn count(&self) -> Result<usize, MemoryError>;

    /// Remove every document.
    async fn clear(&self) -> Result<(), MemoryError>;
}

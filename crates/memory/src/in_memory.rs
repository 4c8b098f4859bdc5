//! In-memory vector store. Holds the knowledge base for the lifetime of
//! the process.

use async_trait::async_trait;
use ragagent_core::error::MemoryError;
use ragagent_core::memory::{Document, Embedder, ScoredDocument, VectorStore};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use crate::vector::{vector_search, StoredDocument};

/// A vector store that keeps documents and their embeddings in a Vec and
/// ranks them by brute-force cosine similarity.
pub struct InMemoryVectorStore {
    embedder: Arc<dyn Embedder>,
    entries: Arc<RwLock<Vec<StoredDocument>>>,
}

impl InMemoryVectorStore {
    pub fn new(embedder: Arc<dyn Embedder>) -> Self {
        Self {
            embedder,
            entries: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Build a store and index `documents` in a single embedding batch.
    pub async fn from_documents(
        documents: Vec<Document>,
        embedder: Arc<dyn Embedder>,
    ) -> Result<Self, MemoryError> {
        let store = Self::new(embedder);
        store.add_documents(documents).await?;
        Ok(store)
    }
}

#[async_trait]
impl VectorStore for InMemoryVectorStore {
    fn name(&self) -> &str {
        "in_memory"
    }

    async fn add_documents(&self, documents: Vec<Document>) -> Result<Vec<String>, MemoryError> {
        if documents.is_empty() {
            return Ok(Vec::new());
        }

        let texts: Vec<String> = documents.iter().map(|d| d.page_content.clone()).collect();
        let embeddings = self.embedder.embed_documents(&texts).await?;
        if embeddings.len() != documents.len() {
            return Err(MemoryError::EmbeddingFailed(format!(
                "expected {} embeddings, got {}",
                documents.len(),
                embeddings.len()
            )));
        }

        let mut ids = Vec::with_capacity(documents.len());
        let mut entries = self.entries.write().await;
        for (mut document, embedding) in documents.into_iter().zip(embeddings) {
            let id = match document.id.as_deref() {
                Some(id) if !id.is_empty() => id.to_string(),
                _ => Uuid::new_v4().to_string(),
            };
            document.id = Some(id.clone());

            let stored = StoredDocument { document, embedding };
            match entries
                .iter_mut()
                .find(|e| e.document.id.as_deref() == Some(id.as_str()))
            {
                Some(existing) => *existing = stored,
                None => entries.push(stored),
            }
            ids.push(id);
        }

        debug!(added = ids.len(), total = entries.len(), "Indexed documents");
        Ok(ids)
    }

    async fn similarity_search(
        &self,
        query: &str,
        k: usize,
    ) -> Result<Vec<ScoredDocument>, MemoryError> {
        if k == 0 || self.entries.read().await.is_empty() {
            return Ok(Vec::new());
        }

        let query_embedding = self.embedder.embed_query(query).await?;
        let entries = self.entries.read().await;
        Ok(vector_search(&entries, &query_embedding, k))
    }

    async fn get(&self, id: &str) -> Result<Option<Document>, MemoryError> {
        let entries = self.entries.read().await;
        Ok(entries
            .iter()
            .find(|e| e.document.id.as_deref() == Some(id))
            .map(|e| e.document.clone()))
    }

    async fn delete(&self, id: &str) -> Result<bool, MemoryError> {
        let mut entries = self.entries.write().await;
        let len_before = entries.len();
        entries.retain(|e| e.document.id.as_deref() != Some(id));
        Ok(entries.len() < len_before)
    }

    async fn count(&self) -> Result<usize, MemoryError> {
        Ok(self.entries.read().await.len())
    }

    async fn clear(&self) -> Result<(), MemoryError> {
        self.entries.write().await.clear();
        Ok(())
    }
}

//! Embedder backed by a provider's `/embeddings` endpoint.

use async_trait::async_trait;
use ragagent_core::error::MemoryError;
use ragagent_core::memory::Embedder;
use ragagent_core::provider::EmbeddingRequest;
use ragagent_core::Provider;
use std::sync::Arc;
use tracing::debug;

/// Embeds text through [`Provider::embed`] with a fixed model.
pub struct ProviderEmbedder {
    provider: Arc<dyn Provider>,
    model: String,
}

impl ProviderEmbedder {
    pub fn new(provider: Arc<dyn Provider>, model: impl Into<String>) -> Self {
        Self {
            provider,
            model: model.into(),
        }
    }
}

#[async_trait]
impl Embedder for ProviderEmbedder {
    async fn embed_documents(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, MemoryError> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        debug!(model = %self.model, count = texts.len(), "Embedding texts");
        let response = self
            .provider
            .embed(EmbeddingRequest {
                model: self.model.clone(),
                inputs: texts.to_vec(),
            })
            .await
            .map_err(|e| MemoryError::EmbeddingFailed(e.to_string()))?;

        if response.embeddings.len() != texts.len() {
            return Err(MemoryError::EmbeddingFailed(format!(
                "expected {} embeddings, got {}",
                texts.len(),
                response.embeddings.len()
            )));
        }
        Ok(response.embeddings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ragagent_core::error::ProviderError;
    use ragagent_core::provider::{EmbeddingResponse, ProviderRequest, ProviderResponse};

    struct LengthProvider {
        drop_last: bool,
    }

    #[async_trait]
    impl Provider for LengthProvider {
        fn name(&self) -> &str {
            "length"
        }

        async fn complete(&self, _request: ProviderRequest) -> Result<ProviderResponse, ProviderError> {
            Err(ProviderError::NotConfigured("completion".into()))
        }

        async fn embed(&self, request: EmbeddingRequest) -> Result<EmbeddingResponse, ProviderError> {
            let mut embeddings: Vec<Vec<f32>> = request
                .inputs
                .iter()
                .map(|t| vec![t.chars().count() as f32, 1.0])
                .collect();
            if self.drop_last {
                embeddings.pop();
            }
            Ok(EmbeddingResponse {
                embeddings,
                model: request.model,
                usage: None,
            })
        }
    }

    #[tokio::test]
    async fn embeds_batch_in_order() {
        let embedder = ProviderEmbedder::new(Arc::new(LengthProvider { drop_last: false }), "m");
        let vectors = embedder
            .embed_documents(&["a".into(), "abc".into()])
            .await
            .unwrap();
        assert_eq!(vectors, vec![vec![1.0, 1.0], vec![3.0, 1.0]]);
        assert_eq!(embedder.embed_query("ab").await.unwrap(), vec![2.0, 1.0]);
    }

    #[tokio::test]
    async fn count_mismatch_is_error() {
        let embedder = ProviderEmbedder::new(Arc::new(LengthProvider { drop_last: true }), "m");
        let err = embedder
            .embed_documents(&["a".into(), "b".into()])
            .await
            .unwrap_err();
        assert!(matches!(err, MemoryError::EmbeddingFailed(_)));
    }

    #[tokio::test]
    async fn provider_errors_become_embedding_failures() {
        struct NoEmbed;

        #[async_trait]
        impl Provider for NoEmbed {
            fn name(&self) -> &str {
                "no_embed"
            }
            async fn complete(&self, _r: ProviderRequest) -> Result<ProviderResponse, ProviderError> {
                Err(ProviderError::NotConfigured("completion".into()))
            }
        }

        let embedder = ProviderEmbedder::new(Arc::new(NoEmbed), "m");
        let err = embedder.embed_query("x").await.unwrap_err();
        assert!(err.to_string().contains("no_embed"));
    }
}

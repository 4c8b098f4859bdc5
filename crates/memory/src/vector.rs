//! Vector similarity utilities.
//!
//! Pure-Rust cosine similarity and brute-force ranking over embedded
//! documents.

use ragagent_core::memory::{Document, ScoredDocument};

/// A document together with the embedding computed when it was added.
#[derive(Debug, Clone)]
pub struct StoredDocument {
    pub document: Document,
    pub embedding: Vec<f32>,
}

/// Compute cosine similarity between two vectors.
///
/// Returns a value in [-1, 1] where 1 = identical, 0 = orthogonal, -1 = opposite.
/// Returns 0.0 if either vector is zero-length or empty.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let mut dot = 0.0f64;
    let mut norm_a = 0.0f64;
    let mut norm_b = 0.0f64;

    for (x, y) in a.iter().zip(b.iter()) {
        let x = *x as f64;
        let y = *y as f64;
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    let denom = norm_a.sqrt() * norm_b.sqrt();
    if denom < 1e-10 {
        return 0.0;
    }

    (dot / denom) as f32
}

/// Rank documents by cosine similarity to a query embedding.
///
/// Returns at most `limit` documents sorted by descending similarity. Equal
/// scores keep insertion order.
pub fn vector_search(
    entries: &[StoredDocument],
    query_embedding: &[f32],
    limit: usize,
) -> Vec<ScoredDocument> {
    let mut scored: Vec<ScoredDocument> = entries
        .iter()
        .map(|entry| ScoredDocument {
            document: entry.document.clone(),
            score: cosine_similarity(&entry.embedding, query_embedding),
        })
        .collect();

    // sort_by is stable, so ties stay in insertion order
    scored.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
    scored.truncate(limit);
    scored
}

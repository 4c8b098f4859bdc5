//! The knowledge base the agent starts with.
//!
//! Five short articles about invented things, so answers can only come from
//! retrieval. A JSON file can replace them.

use ragagent_core::error::MemoryError;
use ragagent_core::memory::Document;
use std::path::Path;
use tracing::info;

const SEED_CORPUS: [(&str, &str); 5] = [
    (
        "doc_001",
        "「月面ピザ」は、2035年に月面基地で初めて作られた料理で、無重力でも具材が飛び散らない特殊なチーズが使われています。",
    ),
    (
        "doc_002",
        "新種の動物「カメレオン猫」は、気分によって毛の色が変わる特性を持っており、嬉しいときはピンク色になります。",
    ),
    (
        "doc_003",
        "「レインボー・エナジー」は、雨上がりの虹から抽出されるクリーンエネルギーで、1回の抽出で街全体の電力を1週間まかなえます。",
    ),
    (
        "doc_004",
        "伝説の果物「ウタウメロン」は、熟すと美しいメロディのような音を発するため、収穫の時期が音でわかります。",
    ),
    (
        "doc_005",
        "スポーツ競技「エア・スイミング」は、強力な風で体を浮かせながら空中で泳ぐ競技で、水に濡れることなく楽しめます。",
    ),
];

/// The built-in documents `doc_001` to `doc_005`.
pub fn seed_documents() -> Vec<Document> {
    SEED_CORPUS
        .iter()
        .map(|(id, text)| Document::new(*id, *text))
        .collect()
}

/// Read a JSON array of documents (`id`, `page_content`, `metadata`).
pub fn load_documents(path: &Path) -> Result<Vec<Document>, MemoryError> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| MemoryError::Storage(format!("{}: {e}", path.display())))?;
    let documents: Vec<Document> = serde_json::from_str(&content)
        .map_err(|e| MemoryError::Storage(format!("{}: {e}", path.display())))?;

    info!(path = %path.display(), count = documents.len(), "Loaded documents");
    Ok(documents)
}

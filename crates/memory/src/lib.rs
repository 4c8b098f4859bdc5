//! Document store implementations for ragagent.

pub mod embedder;
pub mod in_memory;
pub mod seed;
pub mod vector;

pub use embedder::ProviderEmbedder;
pub use in_memory::InMemoryVectorStore;
pub use seed::{load_documents, seed_documents};
pub use vector::{cosine_similarity, vector_search};

//! LLM provider implementations for ragagent.
//!
//! All providers implement the `ragagent_core::Provider` trait.

pub mod openai_compat;

pub use openai_compat::OpenAiCompatProvider;

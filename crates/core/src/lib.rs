//! # ragagent core
//!
//! Domain types, traits, and error definitions for the ragagent retrieval
//! chat agent. This crate has no framework dependencies; it defines the
//! domain model every other crate implements against.
//!
//! ## Layout
//!
//! Every subsystem is a trait here, with implementations in their own crates:
//! - [`Provider`] is implemented by `ragagent-providers`
//! - [`VectorStore`] and [`Embedder`] by `ragagent-memory`
//! - [`Tool`] by `ragagent-tools`
//!
//! This keeps the dependency graph pointing inward and lets tests swap in
//! scripted implementations.

pub mod error;
pub mod literal;
pub mod memory;
pub mod message;
pub mod provider;
pub mod tool;

// Re-export key types at crate root for ergonomics
pub use error::{Error, Result};
pub use memory::{Document, Embedder, ScoredDocument, VectorStore};
pub use message::{Conversation, ConversationId, Message, MessageKind, Role, ToolCall};
pub use provider::{Provider, ProviderRequest, ProviderResponse};
pub use tool::{Tool, ToolInvocation, ToolRegistry, ToolResult};

//! The agent side of ragagent.
//!
//! [`AgentLoop`] alternates between the model and the tools:
//!
//! 1. **Send** the system prompt, the conversation so far, and the tool
//!    definitions to the provider
//! 2. **If tool calls**: execute them, append one tool message per call,
//!    loop back to step 1
//! 3. **If text response**: append it and stop
//!
//! The loop also stops when the iteration limit is reached. The resulting
//! message sequence is rendered for people by [`transcript`].

pub mod loop_runner;
pub mod transcript;

#[cfg(test)]
mod test_helpers;

pub use loop_runner::{AgentLoop, DEFAULT_MAX_ITERATIONS};
pub use transcript::{format_messages, TranscriptFormatter, DEFAULT_MAX_CHARS};

//! Message and Conversation domain types.
//!
//! These are the core value objects that flow through the entire system:
//! the user asks a question, the agent loop exchanges messages with the
//! provider and the tools, and the finished sequence is rendered as a
//! transcript.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::memory::Document;

/// Unique identifier for a conversation (session).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConversationId(pub String);

impl ConversationId {
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }
}

impl Default for ConversationId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ConversationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The role of a message sender, without variant payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// System instructions
    System,
    /// The end user
    Human,
    /// The model
    Ai,
    /// Tool execution result
    Tool,
    /// Legacy function-call result
    Function,
    /// Any other role label
    Chat,
}

impl Role {
    /// The display name used in transcripts.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::System => "System",
            Role::Human => "Human",
            Role::Ai => "AI",
            Role::Tool => "Tool",
            Role::Function => "Function",
            Role::Chat => "Chat",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A tool invocation requested by the model inside an AI message.
///
/// Every field is optional on the wire; consumers fall back to defaults
/// rather than rejecting the message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCall {
    /// Call identifier, echoed back by the matching tool message
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Name of the tool to invoke
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Call type tag (e.g. `function`)
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    /// Arguments, in the order the model produced them
    #[serde(default)]
    pub args: serde_json::Map<String, serde_json::Value>,
}

impl ToolCall {
    /// Create a tool call with an id, a name and arguments.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        args: serde_json::Map<String, serde_json::Value>,
    ) -> Self {
        Self {
            id: Some(id.into()),
            name: Some(name.into()),
            kind: None,
            args,
        }
    }

    /// The call id, if present and non-empty.
    pub fn call_id(&self) -> Option<&str> {
        self.id.as_deref().filter(|id| !id.is_empty())
    }

    /// The call id, or `auto_<n>` for the call at zero-based `position`
    /// when the id is missing.
    pub fn resolved_id(&self, position: usize) -> String {
        self.call_id()
            .map(String::from)
            .unwrap_or_else(|| format!("auto_{}", position + 1))
    }

    /// The tool name, else the type tag, else `tool_call`.
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .filter(|n| !n.is_empty())
            .or_else(|| self.kind.as_deref().filter(|k| !k.is_empty()))
            .unwrap_or("tool_call")
    }
}

/// Variant-specific payload of a message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "snake_case")]
pub enum MessageKind {
    System,
    Human,
    Ai {
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        tool_calls: Vec<ToolCall>,
    },
    Tool {
        /// The tool call this result answers
        #[serde(default, skip_serializing_if = "Option::is_none")]
        tool_call_id: Option<String>,
        /// Name of the tool that produced the result
        #[serde(default, skip_serializing_if = "Option::is_none")]
        name: Option<String>,
        /// Structured side-channel output (retrieved documents)
        #[serde(default, skip_serializing_if = "Option::is_none")]
        artifact: Option<Vec<Document>>,
    },
    Function {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        name: Option<String>,
    },
    Chat {
        /// Free-form role label
        label: String,
    },
}

impl MessageKind {
    pub fn role(&self) -> Role {
        match self {
            MessageKind::System => Role::System,
            MessageKind::Human => Role::Human,
            MessageKind::Ai { .. } => Role::Ai,
            MessageKind::Tool { .. } => Role::Tool,
            MessageKind::Function { .. } => Role::Function,
            MessageKind::Chat { .. } => Role::Chat,
        }
    }
}

fn new_message_id() -> String {
    Uuid::new_v4().to_string()
}

/// A single message in a conversation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// Unique message ID
    #[serde(default = "new_message_id")]
    pub id: String,

    /// Role and role-specific fields
    #[serde(flatten)]
    pub kind: MessageKind,

    /// The text content (may be empty)
    #[serde(default)]
    pub content: String,

    /// Timestamp
    #[serde(default = "Utc::now")]
    pub timestamp: DateTime<Utc>,
}

impl Message {
    fn with_kind(kind: MessageKind, content: impl Into<String>) -> Self {
        Self {
            id: new_message_id(),
            kind,
            content: content.into(),
            timestamp: Utc::now(),
        }
    }

    /// Create a new system message.
    pub fn system(content: impl Into<String>) -> Self {
        Self::with_kind(MessageKind::System, content)
    }

    /// Create a new human (user) message.
    pub fn human(content: impl Into<String>) -> Self {
        Self::with_kind(MessageKind::Human, content)
    }

    /// Create a new AI message without tool calls.
    pub fn ai(content: impl Into<String>) -> Self {
        Self::with_kind(MessageKind::Ai { tool_calls: Vec::new() }, content)
    }

    /// Create a new AI message that requests tool calls.
    pub fn ai_with_tool_calls(content: impl Into<String>, tool_calls: Vec<ToolCall>) -> Self {
        Self::with_kind(MessageKind::Ai { tool_calls }, content)
    }

    /// Create a tool result message answering `tool_call_id`.
    pub fn tool_result(tool_call_id: impl Into<String>, content: impl Into<String>) -> Self {
        Self::with_kind(
            MessageKind::Tool {
                tool_call_id: Some(tool_call_id.into()),
                name: None,
                artifact: None,
            },
            content,
        )
    }

    /// Create a function result message.
    pub fn function(name: Option<String>, content: impl Into<String>) -> Self {
        Self::with_kind(MessageKind::Function { name }, content)
    }

    /// Create a message with an arbitrary role label.
    pub fn chat(label: impl Into<String>, content: impl Into<String>) -> Self {
        Self::with_kind(MessageKind::Chat { label: label.into() }, content)
    }

    /// Set the name on a tool or function message. No-op for other kinds.
    pub fn with_name(mut self, tool_name: impl Into<String>) -> Self {
        match &mut self.kind {
            MessageKind::Tool { name, .. } | MessageKind::Function { name } => {
                *name = Some(tool_name.into());
            }
            _ => {}
        }
        self
    }

    /// Attach an artifact to a tool message. No-op for other kinds.
    pub fn with_artifact(mut self, documents: Vec<Document>) -> Self {
        if let MessageKind::Tool { artifact, .. } = &mut self.kind {
            *artifact = Some(documents);
        }
        self
    }

    pub fn role(&self) -> Role {
        self.kind.role()
    }

    /// Tool calls requested by an AI message; empty for every other kind.
    pub fn tool_calls(&self) -> &[ToolCall] {
        match &self.kind {
            MessageKind::Ai { tool_calls } => tool_calls,
            _ => &[],
        }
    }
}

/// A conversation is an ordered sequence of messages with shared context.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Conversation {
    /// Unique conversation ID
    pub id: ConversationId,

    /// Ordered messages
    pub messages: Vec<Message>,

    /// When this conversation was created
    pub created_at: DateTime<Utc>,

    /// When the last message was added
    pub updated_at: DateTime<Utc>,
}

impl Conversation {
    /// Create a new empty conversation.
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            id: ConversationId::new(),
            messages: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Add a message to the conversation.
    pub fn push(&mut self, message: Message) {
        self.updated_at = Utc::now();
        self.messages.push(message);
    }

    /// Consume the conversation, returning its messages.
    pub fn into_messages(self) -> Vec<Message> {
        self.messages
    }
}

impl Default for Conversation {
    fn default() -> Self {
        Self::new()
    }
}

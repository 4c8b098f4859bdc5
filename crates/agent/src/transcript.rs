//! Transcript rendering.
//!
//! Turns the message sequence produced by the agent loop into a numbered,
//! human-readable block of text:
//!
//! ```text
//! [1] Human: カメレオン猫が嬉しいとき、毛の色は何色になりますか？
//! [2] ToolCall TC1 retrieve_context args={'query': 'カメレオン猫 嬉しい 毛の色'}
//! [3] Tool[retrieve_context] Result for TC1
//!     • doc doc_002: 新種の動物「カメレオン猫」は、...
//! [4] AI: ピンク色になります。
//! ```
//!
//! Tool-call ids are replaced by short labels (`TC1`, `TC2`, ...) assigned in
//! first-seen order, so a call and its result line up visually. Every unit of
//! text is cut to a character limit. Rendering never fails: absent fields
//! fall back to placeholders.

use std::borrow::Cow;
use std::collections::HashMap;

use ragagent_core::literal;
use ragagent_core::message::{Message, MessageKind};

/// Default character limit for any rendered piece of text.
pub const DEFAULT_MAX_CHARS: usize = 240;

const ELLIPSIS: &str = "...";

/// Render `messages` with the default limit of [`DEFAULT_MAX_CHARS`].
pub fn format_messages(messages: &[Message]) -> String {
    TranscriptFormatter::default().format(messages)
}

/// Renders message sequences as numbered transcripts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TranscriptFormatter {
    max_chars: usize,
}

impl Default for TranscriptFormatter {
    fn default() -> Self {
        Self {
            max_chars: DEFAULT_MAX_CHARS,
        }
    }
}

impl TranscriptFormatter {
    /// Create a formatter truncating text to `max_chars` characters.
    ///
    /// Limits below the ellipsis length plus one are raised to 4.
    pub fn new(max_chars: usize) -> Self {
        Self {
            max_chars: max_chars.max(ELLIPSIS.len() + 1),
        }
    }

    pub fn max_chars(&self) -> usize {
        self.max_chars
    }

    /// Cut `text` to at most `max_chars` characters, ending in `...` when
    /// anything was removed.
    pub fn short<'a>(&self, text: &'a str) -> Cow<'a, str> {
        if text.chars().count() <= self.max_chars {
            return Cow::Borrowed(text);
        }
        let keep = self.max_chars - ELLIPSIS.len();
        let mut out: String = text.chars().take(keep).collect();
        out.push_str(ELLIPSIS);
        Cow::Owned(out)
    }

    /// Render the whole sequence. An empty sequence renders as "".
    pub fn format(&self, messages: &[Message]) -> String {
        let mut lines: Vec<String> = Vec::new();
        let mut labels = CallLabels::default();
        let mut index = 1usize;

        for message in messages {
            match &message.kind {
                // A tool-calling AI turn is shown only through its calls.
                MessageKind::Ai { tool_calls } if !tool_calls.is_empty() => {
                    for (position, call) in tool_calls.iter().enumerate() {
                        let call_id = match call.call_id() {
                            Some(id) => Cow::Borrowed(id),
                            None => Cow::Owned(format!("auto_{}", position + 1)),
                        };
                        let label = labels.label_for(&call_id);
                        lines.push(format!(
                            "[{index}] ToolCall {label} {} args={}",
                            call.display_name(),
                            literal::render_map(&call.args)
                        ));
                        index += 1;
                    }
                }
                MessageKind::Tool {
                    tool_call_id: Some(call_id),
                    name,
                    artifact,
                } if !call_id.is_empty() => {
                    let label = labels.label_for(call_id);
                    lines.push(format!(
                        "[{index}] Tool[{}] Result for {label}",
                        name_or_unknown(name.as_deref())
                    ));

                    match artifact {
                        Some(documents) if !documents.is_empty() => {
                            for doc in documents {
                                lines.push(format!(
                                    "    • doc {}: {}",
                                    doc.id.as_deref().unwrap_or("unknown"),
                                    self.short(&doc.page_content)
                                ));
                            }
                        }
                        _ => {
                            let content = self.short(&message.content);
                            if !content.is_empty() {
                                lines.push(format!("    {content}"));
                            }
                        }
                    }
                    index += 1;
                }
                kind => {
                    lines.push(format!(
                        "[{index}] {}: {}",
                        speaker(kind),
                        self.short(&message.content)
                    ));
                    index += 1;
                }
            }
        }

        lines.join("\n")
    }
}

/// Call id to `TC<n>` labels, scoped to one rendering.
#[derive(Default)]
struct CallLabels {
    labels: HashMap<String, String>,
}

impl CallLabels {
    fn label_for(&mut self, call_id: &str) -> String {
        let next = self.labels.len() + 1;
        self.labels
            .entry(call_id.to_string())
            .or_insert_with(|| format!("TC{next}"))
            .clone()
    }
}

fn name_or_unknown(name: Option<&str>) -> &str {
    name.filter(|n| !n.is_empty()).unwrap_or("unknown")
}

/// The prefix shown before a plain content line.
fn speaker(kind: &MessageKind) -> Cow<'_, str> {
    match kind {
        MessageKind::Tool { name, .. } => {
            Cow::Owned(format!("Tool[{}]", name_or_unknown(name.as_deref())))
        }
        MessageKind::Function { name } => match name.as_deref().filter(|n| !n.is_empty()) {
            Some(name) => Cow::Owned(format!("Function[{name}]")),
            None => Cow::Borrowed("Function"),
        },
        MessageKind::Chat { label } => Cow::Borrowed(label.as_str()),
        other => Cow::Borrowed(other.role().as_str()),
    }
}

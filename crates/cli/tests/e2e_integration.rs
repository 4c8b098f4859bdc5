//! End-to-end integration tests for ragagent.
//!
//! These tests run the full pipeline from user question to rendered
//! transcript: seed corpus, embedding, vector store, retrieval tool, agent
//! loop and formatter. Only the LLM endpoint is scripted.

use std::sync::{Arc, Mutex};

use ragagent_agent::{format_messages, AgentLoop, TranscriptFormatter};
use ragagent_core::error::ProviderError;
use ragagent_core::message::{Message, MessageKind, Role, ToolCall};
use ragagent_core::provider::{
    EmbeddingRequest, EmbeddingResponse, Provider, ProviderRequest, ProviderResponse, Usage,
};
use ragagent_core::VectorStore;
use ragagent_memory::{seed_documents, InMemoryVectorStore, ProviderEmbedder};
use ragagent_tools::default_registry;

const QUESTION: &str = "カメレオン猫が嬉しいとき、毛の色は何色になりますか？";

// ── Mock Provider ────────────────────────────────────────────────────────

/// Scripted completions, plus keyword one-hot embeddings so retrieval is
/// deterministic.
struct ScriptedProvider {
    responses: Vec<ProviderResponse>,
    requests: Mutex<Vec<ProviderRequest>>,
}

const KEYWORDS: [&str; 5] = ["月面ピザ", "カメレオン猫", "レインボー", "ウタウメロン", "エア・スイミング"];

impl ScriptedProvider {
    fn new(responses: Vec<ProviderResponse>) -> Self {
        Self {
            responses,
            requests: Mutex::new(Vec::new()),
        }
    }

    fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait::async_trait]
impl Provider for ScriptedProvider {
    fn name(&self) -> &str {
        "e2e_mock"
    }

    async fn complete(&self, request: ProviderRequest) -> Result<ProviderResponse, ProviderError> {
        let mut requests = self.requests.lock().unwrap();
        let count = requests.len();
        requests.push(request);
        self.responses
            .get(count)
            .cloned()
            .ok_or_else(|| ProviderError::ApiError {
                status_code: 500,
                message: format!("ScriptedProvider exhausted: call #{count}"),
            })
    }

    async fn embed(&self, request: EmbeddingRequest) -> Result<EmbeddingResponse, ProviderError> {
        let embeddings = request
            .inputs
            .iter()
            .map(|text| {
                KEYWORDS
                    .iter()
                    .map(|k| if text.contains(k) { 1.0 } else { 0.0 })
                    .collect()
            })
            .collect();
        Ok(EmbeddingResponse {
            embeddings,
            model: request.model,
            usage: None,
        })
    }
}

fn usage() -> Option<Usage> {
    Some(Usage {
        prompt_tokens: 10,
        completion_tokens: 5,
        total_tokens: 15,
    })
}

fn text_response(text: &str) -> ProviderResponse {
    ProviderResponse {
        message: Message::ai(text),
        usage: usage(),
        model: "mock-model".into(),
    }
}

fn retrieval_response(id: &str, query: &str) -> ProviderResponse {
    let args = serde_json::json!({ "query": query })
        .as_object()
        .cloned()
        .unwrap();
    ProviderResponse {
        message: Message::ai_with_tool_calls("", vec![ToolCall::new(id, "retrieve_context", args)]),
        usage: usage(),
        model: "mock-model".into(),
    }
}

async fn agent_with(provider: Arc<ScriptedProvider>, top_k: usize) -> AgentLoop {
    let embedder = Arc::new(ProviderEmbedder::new(provider.clone(), "embedding-model"));
    let store = InMemoryVectorStore::from_documents(seed_documents(), embedder)
        .await
        .unwrap();
    let store: Arc<dyn VectorStore> = Arc::new(store);
    let tools = Arc::new(default_registry(store, top_k));

    AgentLoop::new(provider, "mock-model", 0.7, tools)
        .with_system_prompt("あなたは未知の情報についてRAGコンテキストにアクセスするツールを持っています。")
}

// ── Tests ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn e2e_question_to_transcript() {
    let provider = Arc::new(ScriptedProvider::new(vec![
        retrieval_response("call_1", "カメレオン猫 嬉しい 毛の色"),
        text_response("カメレオン猫は嬉しいとき、ピンク色になります。"),
    ]));
    let agent = agent_with(provider.clone(), 2).await;

    let messages = agent.run(QUESTION).await.unwrap();
    let transcript = format_messages(&messages);

    let expected = [
        "[1] Human: カメレオン猫が嬉しいとき、毛の色は何色になりますか？",
        "[2] ToolCall TC1 retrieve_context args={'query': 'カメレオン猫 嬉しい 毛の色'}",
        "[3] Tool[retrieve_context] Result for TC1",
        "    • doc doc_002: 新種の動物「カメレオン猫」は、気分によって毛の色が変わる特性を持っており、嬉しいときはピンク色になります。",
        "    • doc doc_001: 「月面ピザ」は、2035年に月面基地で初めて作られた料理で、無重力でも具材が飛び散らない特殊なチーズが使われています。",
        "[4] AI: カメレオン猫は嬉しいとき、ピンク色になります。",
    ]
    .join("\n");
    assert_eq!(transcript, expected);
    assert_eq!(provider.calls(), 2);
}

#[tokio::test]
async fn e2e_model_sees_serialized_context() {
    let provider = Arc::new(ScriptedProvider::new(vec![
        retrieval_response("call_1", "カメレオン猫"),
        text_response("ピンク色です。"),
    ]));
    let agent = agent_with(provider.clone(), 1).await;
    agent.run(QUESTION).await.unwrap();

    let requests = provider.requests.lock().unwrap();
    let second = &requests[1];
    assert_eq!(second.messages[0].role(), Role::System);
    let tool_message = second.messages.last().unwrap();
    assert_eq!(tool_message.role(), Role::Tool);
    assert_eq!(
        tool_message.content,
        "Source: {}\nContent: 新種の動物「カメレオン猫」は、気分によって毛の色が変わる特性を持っており、嬉しいときはピンク色になります。"
    );
    assert_eq!(second.tools[0].name, "retrieve_context");
}

#[tokio::test]
async fn e2e_multiple_retrievals_get_distinct_labels() {
    let provider = Arc::new(ScriptedProvider::new(vec![
        retrieval_response("call_a", "ウタウメロン"),
        retrieval_response("call_b", "エア・スイミング"),
        text_response("両方見つかりました。"),
    ]));
    let agent = agent_with(provider, 1).await;

    let messages = agent.run("ウタウメロンとエア・スイミングについて教えて").await.unwrap();
    let transcript = format_messages(&messages);
    let lines: Vec<&str> = transcript.lines().collect();

    assert_eq!(lines[1], "[2] ToolCall TC1 retrieve_context args={'query': 'ウタウメロン'}");
    assert_eq!(lines[2], "[3] Tool[retrieve_context] Result for TC1");
    assert!(lines[3].starts_with("    • doc doc_004: "));
    assert_eq!(lines[4], "[4] ToolCall TC2 retrieve_context args={'query': 'エア・スイミング'}");
    assert_eq!(lines[5], "[5] Tool[retrieve_context] Result for TC2");
    assert!(lines[6].starts_with("    • doc doc_005: "));
    assert_eq!(lines[7], "[6] AI: 両方見つかりました。");
}

#[tokio::test]
async fn e2e_direct_answer_without_tools() {
    let provider = Arc::new(ScriptedProvider::new(vec![text_response("こんにちは！")]));
    let agent = agent_with(provider, 2).await;

    let messages = agent.run("こんにちは").await.unwrap();
    assert_eq!(format_messages(&messages), "[1] Human: こんにちは\n[2] AI: こんにちは！");
}

#[tokio::test]
async fn e2e_raw_messages_round_trip_through_json() {
    let provider = Arc::new(ScriptedProvider::new(vec![
        retrieval_response("call_1", "レインボー"),
        text_response("1週間です。"),
    ]));
    let agent = agent_with(provider, 1).await;
    let messages = agent.run("レインボー・エナジーは何日分？").await.unwrap();

    let json = serde_json::to_string_pretty(&messages).unwrap();
    let restored: Vec<Message> = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, messages);

    match &restored[2].kind {
        MessageKind::Tool { artifact: Some(docs), .. } => {
            assert_eq!(docs[0].id.as_deref(), Some("doc_003"));
        }
        other => panic!("expected tool message with artifact, got {other:?}"),
    }
}

#[tokio::test]
async fn e2e_narrow_formatter_truncates_documents() {
    let provider = Arc::new(ScriptedProvider::new(vec![
        retrieval_response("call_1", "月面ピザ"),
        text_response("チーズです。"),
    ]));
    let agent = agent_with(provider, 1).await;
    let messages = agent.run("月面ピザの特徴は？").await.unwrap();

    let transcript = TranscriptFormatter::new(12).format(&messages);
    let bullet = transcript
        .lines()
        .find(|l| l.starts_with("    • doc"))
        .unwrap();
    assert_eq!(bullet, "    • doc doc_001: 「月面ピザ」は、2...");
}

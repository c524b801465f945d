// src/qa/client.rs
// =============================================================================
// This module talks to the hosted chat-completion endpoint.
//
// Wire format: Groq's OpenAI-compatible chat completions API
//   POST {base_url}/chat/completions
//   body: { model, messages: [{role, content}, ...],
//           temperature, max_tokens, top_p }
//   response: { choices: [{ message: { content } }] }
//
// Error contract (important - callers rely on this):
// - ask() NEVER returns an Err. Every failure mode degrades to a string:
//   - snapshot file missing  -> the fixed MISSING_CONTENT_ERROR sentinel
//   - network/API failure    -> "Error: ..." prefixed message
// - The content is re-read from disk on every call; there is no caching,
//   so a fresh `extract` run is picked up immediately
//
// Rust concepts:
// - Serde derive: Serialize for the request body, Deserialize for the
//   response (reqwest's .json() does the rest)
// - Lifetimes: the request struct borrows instead of cloning the content
// =============================================================================

use anyhow::{anyhow, Context, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::fs;

use crate::qa::prompt;

/// Returned when the snapshot file doesn't exist yet.
/// Callers match on this exact string, so it must stay stable.
pub const MISSING_CONTENT_ERROR: &str = "Error: Content file not found.";

// Default endpoint prefix for Groq's OpenAI-compatible API
const DEFAULT_BASE_URL: &str = "https://api.groq.com/openai/v1";

// Everything the client needs, constructed once at startup and passed in.
// No globals: tests swap base_url for a local stub server.
#[derive(Debug, Clone)]
pub struct QaConfig {
    /// API key sent as a Bearer token
    pub api_key: String,
    /// Endpoint prefix, e.g. "https://api.groq.com/openai/v1"
    pub base_url: String,
    /// Model identifier, e.g. "llama3-70b-8192"
    pub model: String,
    /// Sampling temperature
    pub temperature: f32,
    /// Maximum tokens in the completion
    pub max_tokens: u32,
    /// Nucleus sampling parameter
    pub top_p: f32,
    /// Content longer than this many characters is clamped before it is
    /// interpolated into the prompt
    pub max_content_chars: usize,
}

impl QaConfig {
    /// Config with the default endpoint and sampling parameters
    pub fn new(api_key: String, model: String, max_content_chars: usize) -> Self {
        Self {
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            model,
            temperature: 0.5,
            max_tokens: 1024,
            top_p: 1.0,
            max_content_chars,
        }
    }
}

// ---- Wire format structs ----------------------------------------------------

// The request body. Borrows everything - no reason to clone the full
// page content just to serialize it.
#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
    top_p: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

// The slice of the response we care about
#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: String,
}

// -----------------------------------------------------------------------------

// The question-answering client
pub struct QaClient {
    http: Client,
    config: QaConfig,
}

impl QaClient {
    /// Creates a client from an explicit config
    pub fn new(config: QaConfig) -> Result<Self> {
        let http = Client::builder()
            .build()
            .context("Failed to create HTTP client")?;
        Ok(Self { http, config })
    }

    // Answers a question about the current snapshot content
    //
    // Loads the snapshot fresh from disk, forwards (content, question) to
    // the completion endpoint, and returns the model's answer verbatim.
    // All failures come back as strings - see the module header.
    pub async fn ask(&self, question: &str, snapshot_path: &str) -> String {
        let content = match fs::read_to_string(snapshot_path) {
            Ok(content) => content,
            Err(_) => return MISSING_CONTENT_ERROR.to_string(),
        };

        match self.complete(&content, question).await {
            Ok(answer) => answer,
            Err(e) => format!("Error: {}", e),
        }
    }

    // Performs the actual completion request
    async fn complete(&self, content: &str, question: &str) -> Result<String> {
        let clamped = prompt::clamp_content(content, self.config.max_content_chars);
        let user_message = prompt::build_user_message(&clamped, question);

        let request = ChatRequest {
            model: &self.config.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: prompt::SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: &user_message,
                },
            ],
            temperature: self.config.temperature,
            max_tokens: self.config.max_tokens,
            top_p: self.config.top_p,
        };

        let response = self
            .http
            .post(format!("{}/chat/completions", self.config.base_url))
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await
            .context("Failed to reach completion endpoint")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(anyhow!("Completion API returned {}: {}", status, body));
        }

        let completion: ChatResponse = response
            .json()
            .await
            .context("Failed to decode completion response")?;

        completion
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| anyhow!("Completion response contained no choices"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::sync::mpsc;

    // Spawns a one-shot HTTP stub that answers every chat-completion
    // request with the given text and forwards the raw request body to
    // the returned channel so tests can inspect it.
    async fn spawn_stub_endpoint(answer: &'static str) -> (String, mpsc::Receiver<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let (tx, rx) = mpsc::channel(1);

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = Vec::new();
            let mut chunk = [0u8; 4096];

            loop {
                let n = socket.read(&mut chunk).await.unwrap();
                if n == 0 {
                    return;
                }
                buf.extend_from_slice(&chunk[..n]);

                // Wait for the full head, then the full body
                let Some(head_end) = buf.windows(4).position(|w| w == b"\r\n\r\n") else {
                    continue;
                };
                let head = String::from_utf8_lossy(&buf[..head_end]).to_string();
                let content_length = head
                    .lines()
                    .find_map(|line| {
                        let (name, value) = line.split_once(':')?;
                        if name.eq_ignore_ascii_case("content-length") {
                            value.trim().parse::<usize>().ok()
                        } else {
                            None
                        }
                    })
                    .unwrap_or(0);

                let body_start = head_end + 4;
                if buf.len() < body_start + content_length {
                    continue;
                }

                let body =
                    String::from_utf8_lossy(&buf[body_start..body_start + content_length])
                        .to_string();
                tx.send(body).await.unwrap();

                let response_body = format!(
                    r#"{{"choices":[{{"message":{{"role":"assistant","content":"{}"}}}}]}}"#,
                    answer
                );
                let response = format!(
                    "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    response_body.len(),
                    response_body
                );
                socket.write_all(response.as_bytes()).await.unwrap();
                socket.shutdown().await.ok();
                return;
            }
        });

        (format!("http://{}/openai/v1", addr), rx)
    }

    fn test_config(base_url: String) -> QaConfig {
        let mut config = QaConfig::new("test-key".to_string(), "test-model".to_string(), 24_000);
        config.base_url = base_url;
        config
    }

    #[tokio::test]
    async fn test_missing_snapshot_returns_sentinel() {
        let client = QaClient::new(test_config("http://127.0.0.1:1".to_string())).unwrap();
        let answer = client.ask("Anything?", "/no/such/file.txt").await;
        assert_eq!(answer, MISSING_CONTENT_ERROR);
    }

    #[tokio::test]
    async fn test_forwarder_returns_stub_answer_verbatim() {
        let (base_url, mut rx) = spawn_stub_endpoint("Paris.").await;

        let mut snapshot = tempfile::NamedTempFile::new().unwrap();
        write!(snapshot, "Paris is the capital of France.").unwrap();

        let client = QaClient::new(test_config(base_url)).unwrap();
        let answer = client
            .ask(
                "What is the capital of France?",
                snapshot.path().to_str().unwrap(),
            )
            .await;

        assert_eq!(answer, "Paris.");

        // The outgoing request must embed content and question verbatim
        let body = rx.recv().await.unwrap();
        assert!(body.contains("Paris is the capital of France."));
        assert!(body.contains("What is the capital of France?"));
        assert!(body.contains("test-model"));
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_returns_error_string() {
        // Port 1 is never listening; the request fails at connect time
        let client = QaClient::new(test_config("http://127.0.0.1:1".to_string())).unwrap();

        let mut snapshot = tempfile::NamedTempFile::new().unwrap();
        write!(snapshot, "Some content.").unwrap();

        let answer = client
            .ask("A question?", snapshot.path().to_str().unwrap())
            .await;

        assert!(answer.starts_with("Error: "));
    }
}

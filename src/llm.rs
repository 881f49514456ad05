//! AI health assistant gateway client
//!
//! Thin pass-through to the hosted chat-completions gateway: a fixed
//! system instruction is prefixed to the conversation, the request is
//! forwarded with streaming enabled, and each text delta is handed back
//! verbatim. No transformation happens on either side.

use futures_util::StreamExt;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// ---------------------------------------------------------------------------
/// Configuration
/// ---------------------------------------------------------------------------

const GATEWAY_URL: &str = "https://ai.gateway.lovable.dev/v1/chat/completions";
const GATEWAY_MODEL: &str = "google/gemini-2.5-flash";
const SYSTEM_PROMPT: &str = include_str!("prompts/health_assistant.txt");

/// ---------------------------------------------------------------------------
/// Error Types
/// ---------------------------------------------------------------------------

#[derive(Error, Debug, Serialize)]
pub enum ChatError {
  #[error("API key not configured")]
  MissingApiKey,

  #[error("Request failed: {0}")]
  Request(String),

  #[error("Rate limits exceeded, please try again later.")]
  RateLimited,

  #[error("Payment required, please add funds to your workspace.")]
  PaymentRequired,

  #[error("AI gateway error: {0}")]
  Api(String),
}

/// ---------------------------------------------------------------------------
/// Wire Types
/// ---------------------------------------------------------------------------

/// One turn of the conversation, as sent by the frontend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
  pub role: String,
  pub content: String,
}

#[derive(Debug, Serialize)]
struct GatewayRequest {
  model: &'static str,
  messages: Vec<ChatMessage>,
  stream: bool,
}

#[derive(Debug, Deserialize)]
struct StreamChunk {
  choices: Vec<StreamChoice>,
}

#[derive(Debug, Deserialize)]
struct StreamChoice {
  delta: StreamDelta,
}

#[derive(Debug, Deserialize)]
struct StreamDelta {
  content: Option<String>,
}

/// A parsed server-sent event from the gateway stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SseEvent {
  Delta(String),
  Done,
}

/// Parse a single SSE line from the gateway stream.
///
/// Non-data lines (keepalive comments, event names, blanks) and deltas
/// without text content yield `None`.
pub fn parse_sse_line(line: &str) -> Option<SseEvent> {
  let data = line.strip_prefix("data:")?.trim();

  if data == "[DONE]" {
    return Some(SseEvent::Done);
  }

  let chunk: StreamChunk = serde_json::from_str(data).ok()?;
  let text = chunk.choices.first()?.delta.content.as_deref()?;

  if text.is_empty() {
    None
  } else {
    Some(SseEvent::Delta(text.to_string()))
  }
}

/// ---------------------------------------------------------------------------
/// Gateway Client
/// ---------------------------------------------------------------------------

pub struct GatewayClient {
  client: Client,
  endpoint: String,
  api_key: String,
}

impl GatewayClient {
  /// Create a new gateway client, loading the API key from environment
  pub fn from_env() -> Result<Self, ChatError> {
    let api_key = std::env::var("LOVABLE_API_KEY").map_err(|_| ChatError::MissingApiKey)?;

    Ok(Self {
      client: Client::new(),
      endpoint: GATEWAY_URL.to_string(),
      api_key,
    })
  }

  #[cfg(test)]
  fn with_endpoint(endpoint: String, api_key: String) -> Self {
    Self {
      client: Client::new(),
      endpoint,
      api_key,
    }
  }

  /// Forward the conversation to the gateway and stream text deltas back.
  ///
  /// The fixed system instruction is prefixed before forwarding; each
  /// delta is passed to `on_chunk` in arrival order.
  pub async fn stream_chat<F>(
    &self,
    messages: Vec<ChatMessage>,
    mut on_chunk: F,
  ) -> Result<(), ChatError>
  where
    F: FnMut(String),
  {
    let mut full_conversation = Vec::with_capacity(messages.len() + 1);
    full_conversation.push(ChatMessage {
      role: "system".to_string(),
      content: SYSTEM_PROMPT.to_string(),
    });
    full_conversation.extend(messages);

    let request = GatewayRequest {
      model: GATEWAY_MODEL,
      messages: full_conversation,
      stream: true,
    };

    let response = self
      .client
      .post(&self.endpoint)
      .bearer_auth(&self.api_key)
      .header("content-type", "application/json")
      .json(&request)
      .send()
      .await
      .map_err(|e| ChatError::Request(e.to_string()))?;

    let status = response.status();
    if !status.is_success() {
      let body = response.text().await.unwrap_or_default();
      eprintln!("AI gateway error: {} {}", status, body);

      return Err(match status.as_u16() {
        429 => ChatError::RateLimited,
        402 => ChatError::PaymentRequired,
        _ => ChatError::Api(format!("HTTP {}: {}", status, body)),
      });
    }

    let mut stream = response.bytes_stream();
    let mut buffer = String::new();

    while let Some(chunk) = stream.next().await {
      let bytes = chunk.map_err(|e| ChatError::Request(e.to_string()))?;
      buffer.push_str(&String::from_utf8_lossy(&bytes));

      // Hand off complete lines, keep any partial tail for the next chunk
      while let Some(newline) = buffer.find('\n') {
        let line = buffer[..newline].trim_end_matches('\r').to_string();
        buffer.drain(..=newline);

        match parse_sse_line(&line) {
          Some(SseEvent::Delta(text)) => on_chunk(text),
          Some(SseEvent::Done) => return Ok(()),
          None => {}
        }
      }
    }

    Ok(())
  }
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------

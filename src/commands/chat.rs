use crate::llm::{ChatError, ChatMessage, GatewayClient};
use serde::Serialize;
use tauri::ipc::Channel;

/// Events streamed back to the chat window.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ChatEvent {
  Chunk { text: String },
  Done,
}

/// Forward the conversation to the AI gateway and relay each text delta
/// to the frontend as it arrives.
#[tauri::command]
pub async fn chat_send(
  messages: Vec<ChatMessage>,
  channel: Channel<ChatEvent>,
) -> Result<(), ChatError> {
  let client = GatewayClient::from_env()?;

  client
    .stream_chat(messages, |text| {
      let _ = channel.send(ChatEvent::Chunk { text });
    })
    .await?;

  let _ = channel.send(ChatEvent::Done);
  Ok(())
}

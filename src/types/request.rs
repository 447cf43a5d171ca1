//! Outgoing chat-completion request body.

use serde::Serialize;

use super::message::ConversationMessage;

/// Sampling temperature sent with every request.
pub const TEMPERATURE: f64 = 0.1;
/// Output token cap sent with every request.
pub const MAX_TOKENS: u32 = 300;

/// Body of `POST /chat/completions`.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ChatRequest {
    pub messages: Vec<ConversationMessage>,
    pub model: String,
    pub stream: bool,
    pub temperature: f64,
    pub max_tokens: u32,
}

impl ChatRequest {
    /// A streaming request with the fixed sampling settings.
    pub fn streaming(model: impl Into<String>, messages: Vec<ConversationMessage>) -> Self {
        Self {
            messages,
            model: model.into(),
            stream: true,
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn streaming_request_body_shape() {
        let request = ChatRequest::streaming("gpt-4o", vec![ConversationMessage::user("hi")]);
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            serde_json::json!({
                "messages": [{"role": "user", "content": "hi"}],
                "model": "gpt-4o",
                "stream": true,
                "temperature": 0.1,
                "max_tokens": 300,
            })
        );
    }
}

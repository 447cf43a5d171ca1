//! OpenAI Chat Completions generator.

use async_trait::async_trait;
use futures::{Stream, StreamExt};
use serde::{Deserialize, Deserializer};
use tracing::debug;

use crate::config::{
    AmbientConfig, GeneratorConfig, InputConfig, API_KEY_ENV, API_KEY_OPTION, DEFAULT_BASE_URL,
    MODEL_OPTION, SYSTEM_MESSAGE_OPTION, URL_OPTION,
};
use crate::error::{GeneratorError, Result};
use crate::generation::prompt::{prepare_messages, DEFAULT_SYSTEM_MESSAGE};
use crate::models::{list_models, ModelCatalog, DEFAULT_REQUEST_MODEL};
use crate::types::*;

use super::http::{
    bearer_headers, endpoint, error_for_status, parse_sse_line, shared_client, SseLine,
};
use super::{ChunkStream, Generator};

const NAME: &str = "OpenAI";
const DESCRIPTION: &str = "Using OpenAI LLM models to generate answers to queries";
const CONTEXT_WINDOW: usize = 10_000;

/// Streams answers from an OpenAI-compatible `/chat/completions` endpoint.
pub struct OpenAiGenerator {
    ambient: AmbientConfig,
    catalog: ModelCatalog,
    config: GeneratorConfig,
}

impl OpenAiGenerator {
    /// Discover models and assemble the option surface.
    ///
    /// Discovery failures fall back to the static catalog and never surface.
    pub async fn new(ambient: AmbientConfig) -> Self {
        let catalog = list_models(ambient.api_key.as_deref(), ambient.resolved_base_url()).await;
        Self::with_catalog(ambient, catalog)
    }

    /// Build with an already known catalog, skipping discovery.
    pub fn with_catalog(ambient: AmbientConfig, catalog: ModelCatalog) -> Self {
        let config = build_config(&ambient, &catalog);
        Self {
            ambient,
            catalog,
            config,
        }
    }

    pub fn catalog(&self) -> &ModelCatalog {
        &self.catalog
    }

    pub fn ambient(&self) -> &AmbientConfig {
        &self.ambient
    }

    /// API key from `config`, then the ambient credential.
    pub fn resolve_api_key(&self, config: &GeneratorConfig) -> Result<String> {
        config
            .non_empty_value(API_KEY_OPTION)
            .or(self.ambient.api_key.as_deref())
            .map(str::to_string)
            .ok_or_else(|| {
                GeneratorError::MissingCredential(format!(
                    "No OpenAI API Key found (set {API_KEY_ENV})"
                ))
            })
    }

    /// Base URL from `config`, then the ambient value, then the default.
    pub fn resolve_base_url(&self, config: &GeneratorConfig) -> String {
        config
            .non_empty_value(URL_OPTION)
            .unwrap_or(self.ambient.resolved_base_url())
            .to_string()
    }

    /// Assemble the request body for one generation.
    pub fn build_request(
        &self,
        config: &GeneratorConfig,
        query: &str,
        context: &str,
        conversation: &[ConversationMessage],
    ) -> Result<ChatRequest> {
        let system_message = config.value(SYSTEM_MESSAGE_OPTION).ok_or_else(|| {
            GeneratorError::Configuration(format!("Missing '{SYSTEM_MESSAGE_OPTION}' option"))
        })?;
        let model = config.value(MODEL_OPTION).unwrap_or(DEFAULT_REQUEST_MODEL);
        let messages = prepare_messages(query, context, conversation, system_message);
        Ok(ChatRequest::streaming(model, messages))
    }
}

#[async_trait]
impl Generator for OpenAiGenerator {
    fn name(&self) -> &str {
        NAME
    }

    fn description(&self) -> &str {
        DESCRIPTION
    }

    fn context_window(&self) -> usize {
        CONTEXT_WINDOW
    }

    fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    async fn generate_stream(
        &self,
        config: &GeneratorConfig,
        query: &str,
        context: &str,
        conversation: &[ConversationMessage],
    ) -> Result<ChunkStream> {
        let api_key = self.resolve_api_key(config)?;
        let request = self.build_request(config, query, context, conversation)?;
        let url = endpoint(&self.resolve_base_url(config), "chat/completions");

        debug!(
            model = %request.model,
            messages = request.messages.len(),
            "OpenAI generate_stream"
        );

        let resp = shared_client()
            .post(&url)
            .headers(bearer_headers(&api_key))
            .json(&request)
            .send()
            .await?;
        let resp = error_for_status(resp).await?;

        Ok(Box::pin(decode_chunks(resp.bytes_stream())))
    }
}

fn build_config(ambient: &AmbientConfig, catalog: &ModelCatalog) -> GeneratorConfig {
    let default_model = ambient
        .default_model
        .as_deref()
        .or(catalog.first())
        .unwrap_or(DEFAULT_REQUEST_MODEL);

    let mut config = GeneratorConfig::new();
    config.insert(
        MODEL_OPTION,
        InputConfig::dropdown(
            default_model,
            catalog.ids().to_vec(),
            "Select an OpenAI Model",
        ),
    );
    config.insert(
        SYSTEM_MESSAGE_OPTION,
        InputConfig::textarea(
            DEFAULT_SYSTEM_MESSAGE,
            "System prompt that defines the assistants behavior and tone.",
        ),
    );

    if ambient.api_key.is_none() {
        config.insert(
            API_KEY_OPTION,
            InputConfig::password(
                "",
                format!(
                    "You can set your OpenAI API Key here or set it as environment variable `{API_KEY_ENV}`"
                ),
            ),
        );
    }
    if ambient.base_url.is_none() {
        config.insert(
            URL_OPTION,
            InputConfig::text(DEFAULT_BASE_URL, "You can change the Base URL here if needed"),
        );
    }

    config
}

/// Decode a chat-completion SSE byte stream into chunks.
///
/// Ends at `data: [DONE]` or when the input ends. A malformed `data:` payload
/// or a transport error is yielded once and ends the stream.
pub fn decode_chunks<S, B, E>(byte_stream: S) -> impl Stream<Item = Result<GeneratedChunk>> + Send
where
    S: Stream<Item = std::result::Result<B, E>> + Send + 'static,
    B: AsRef<[u8]> + Send,
    E: Into<GeneratorError> + Send,
{
    async_stream::stream! {
        let mut buffer: Vec<u8> = Vec::new();
        futures::pin_mut!(byte_stream);

        'read: loop {
            let eof = match byte_stream.next().await {
                Some(Ok(bytes)) => {
                    buffer.extend_from_slice(bytes.as_ref());
                    false
                }
                Some(Err(e)) => {
                    let err: GeneratorError = e.into();
                    yield Err(err);
                    break;
                }
                None => {
                    // flush a final line that arrived without a newline
                    if !buffer.is_empty() {
                        buffer.push(b'\n');
                    }
                    true
                }
            };

            while let Some(pos) = buffer.iter().position(|b| *b == b'\n') {
                let raw: Vec<u8> = buffer.drain(..=pos).collect();
                let line = String::from_utf8_lossy(&raw);
                let line = line.trim_end_matches(|c: char| c == '\n' || c == '\r');

                match parse_sse_line(line) {
                    SseLine::Done => break 'read,
                    SseLine::Ignored => {}
                    SseLine::Data(data) => match decode_event(data) {
                        Ok(Some(chunk)) => yield Ok(chunk),
                        Ok(None) => {}
                        Err(e) => {
                            yield Err(e);
                            break 'read;
                        }
                    },
                }
            }

            if eof {
                break;
            }
        }
    }
}

/// Map one `data:` payload to at most one chunk.
///
/// Only `choices[0]` is inspected. A content delta wins; otherwise a
/// `finish_reason` key (even `null`) yields an empty chunk; anything else,
/// such as a role-only delta, yields nothing.
///
/// An in-band `error` object is an upstream failure, and a payload without
/// `choices` is malformed.
fn decode_event(data: &str) -> Result<Option<GeneratedChunk>> {
    let event: StreamEvent = serde_json::from_str(data)?;
    if let Some(error) = event.error {
        // the HTTP exchange itself succeeded; the failure arrived in-band
        return Err(GeneratorError::upstream(200, error_message(&error)));
    }
    let choices = event
        .choices
        .ok_or_else(|| <serde_json::Error as serde::de::Error>::missing_field("choices"))?;
    let Some(choice) = choices.into_iter().next() else {
        return Ok(None);
    };

    let content = choice.delta.and_then(|d| d.content);
    let chunk = match (content, choice.finish_reason) {
        (Some(content), finish_reason) => Some(GeneratedChunk {
            message: content.unwrap_or_default(),
            finish_reason: finish_reason.flatten(),
        }),
        (None, Some(finish_reason)) => Some(GeneratedChunk {
            message: String::new(),
            finish_reason,
        }),
        (None, None) => None,
    };
    Ok(chunk)
}

fn error_message(error: &serde_json::Value) -> String {
    match error.get("message").and_then(serde_json::Value::as_str) {
        Some(message) => message.to_string(),
        None => error.to_string(),
    }
}

/// Distinguishes a key that is present (possibly `null`) from one that is absent.
fn present<'de, D, T>(deserializer: D) -> std::result::Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

// OpenAI streaming response types (internal)

#[derive(Deserialize)]
struct StreamEvent {
    #[serde(default)]
    choices: Option<Vec<StreamChoice>>,
    #[serde(default)]
    error: Option<serde_json::Value>,
}

#[derive(Deserialize)]
struct StreamChoice {
    #[serde(default)]
    delta: Option<StreamDelta>,
    #[serde(default, deserialize_with = "present")]
    finish_reason: Option<Option<FinishReason>>,
}

#[derive(Deserialize)]
struct StreamDelta {
    #[serde(default, deserialize_with = "present")]
    content: Option<Option<String>>,
}

//! Shared test helpers.

#![allow(dead_code)]

use ragstream::config::AmbientConfig;
use ragstream::models::ModelCatalog;
use ragstream::provider::OpenAiGenerator;
use wiremock::{MockServer, ResponseTemplate};

/// Render SSE `data:` lines followed by the `[DONE]` sentinel.
pub fn sse_body(events: &[serde_json::Value]) -> String {
    let mut body = String::new();
    for event in events {
        body.push_str(&format!("data: {event}\n\n"));
    }
    body.push_str("data: [DONE]\n\n");
    body
}

/// A 200 response carrying an event stream.
pub fn sse_response(body: impl Into<String>) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_raw(body.into(), "text/event-stream")
}

/// A content delta event.
pub fn delta(text: &str) -> serde_json::Value {
    serde_json::json!({"choices": [{"index": 0, "delta": {"content": text}}]})
}

/// Generator pointed at the mock server with a fixed catalog.
pub fn generator_for(server: &MockServer, api_key: Option<&str>) -> OpenAiGenerator {
    let ambient = AmbientConfig {
        api_key: api_key.map(str::to_string),
        base_url: Some(server.uri()),
        default_model: None,
    };
    OpenAiGenerator::with_catalog(ambient, ModelCatalog::new(["gpt-4o", "gpt-3.5-turbo"]))
}

//! CLI command handlers.

use std::error::Error;
use std::io::Write;
use std::path::Path;

use futures::StreamExt;
use tracing::debug;

use super::{AskArgs, ConnectionArgs};
use crate::config::{AmbientConfig, MODEL_OPTION, SYSTEM_MESSAGE_OPTION};
use crate::generation::collect_stream;
use crate::provider::{Generator, OpenAiGenerator};
use crate::types::ConversationMessage;

/// Ambient environment with command-line overrides applied.
pub fn ambient_config(conn: &ConnectionArgs) -> AmbientConfig {
    let mut ambient = AmbientConfig::from_env();
    if let Some(key) = &conn.api_key {
        ambient.api_key = Some(key.clone());
    }
    if let Some(url) = &conn.base_url {
        ambient.base_url = Some(url.clone());
    }
    ambient
}

/// Handle `ragstream models`.
pub async fn handle_models(conn: ConnectionArgs) -> Result<(), Box<dyn Error>> {
    let generator = OpenAiGenerator::new(ambient_config(&conn)).await;
    for id in generator.catalog().ids() {
        println!("{id}");
    }
    Ok(())
}

/// Handle `ragstream config`.
pub async fn handle_config(conn: ConnectionArgs) -> Result<(), Box<dyn Error>> {
    let generator = OpenAiGenerator::new(ambient_config(&conn)).await;
    println!("{}", serde_json::to_string_pretty(generator.config())?);
    Ok(())
}

/// Handle `ragstream ask`.
pub async fn handle_ask(args: AskArgs) -> Result<(), Box<dyn Error>> {
    let generator = OpenAiGenerator::new(ambient_config(&args.connection)).await;

    let mut config = generator.config().clone();
    if let Some(system) = &args.system {
        config.set_value(SYSTEM_MESSAGE_OPTION, system.as_str())?;
    }
    if let Some(model) = &args.model {
        config.set_value(MODEL_OPTION, model.as_str())?;
    }

    let context = read_context(args.context.as_deref(), args.context_file.as_deref())?;
    let conversation = match &args.history {
        Some(path) => read_history(path)?,
        None => Vec::new(),
    };

    let mut stream = generator
        .generate_stream(&config, &args.query, &context, &conversation)
        .await?;

    if args.no_stream {
        let result = collect_stream(stream).await?;
        println!("{}", result.text);
        debug!(finish_reason = ?result.finish_reason, "answer complete");
        return Ok(());
    }

    let mut stdout = std::io::stdout();
    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        write!(stdout, "{}", chunk.message)?;
        stdout.flush()?;
        if let Some(reason) = chunk.finish_reason {
            debug!(%reason, "answer complete");
        }
    }
    writeln!(stdout)?;

    Ok(())
}

/// Context text from the inline flag, else the file, else empty.
pub fn read_context(inline: Option<&str>, file: Option<&Path>) -> std::io::Result<String> {
    match (inline, file) {
        (Some(text), _) => Ok(text.to_string()),
        (None, Some(path)) => std::fs::read_to_string(path),
        (None, None) => Ok(String::new()),
    }
}

/// Load prior turns from a JSON array of `{"role", "content"}` objects.
pub fn read_history(path: &Path) -> Result<Vec<ConversationMessage>, Box<dyn Error>> {
    let raw = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

//! Stream consumption helpers.

use futures::StreamExt;

use crate::error::Result;
use crate::provider::{ChunkStream, Generator};
use crate::types::*;

/// Collect a chunk stream into a final result.
pub async fn collect_stream(mut stream: ChunkStream) -> Result<StreamTextResult> {
    let mut result = StreamTextResult::default();

    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        result.text.push_str(&chunk.message);
        result.chunks += 1;
        if let Some(reason) = chunk.finish_reason {
            result.finish_reason = Some(reason);
        }
    }

    Ok(result)
}

/// Generate a complete answer using the generator's own configuration.
pub async fn generate_answer(
    generator: &dyn Generator,
    query: &str,
    context: &str,
    conversation: &[ConversationMessage],
) -> Result<StreamTextResult> {
    let stream = generator
        .generate_stream(generator.config(), query, context, conversation)
        .await?;
    collect_stream(stream).await
}

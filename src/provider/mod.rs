//! Generator trait and the OpenAI chat-completion implementation.

pub mod http;
pub mod openai;

pub use openai::OpenAiGenerator;

use async_trait::async_trait;
use futures::stream::BoxStream;

use crate::config::GeneratorConfig;
use crate::error::Result;
use crate::types::{ConversationMessage, GeneratedChunk};

/// Lazily produced generation output.
pub type ChunkStream = BoxStream<'static, Result<GeneratedChunk>>;

/// Contract a host pipeline calls to produce an answer.
#[async_trait]
pub trait Generator: Send + Sync {
    /// Display name (e.g., "OpenAI").
    fn name(&self) -> &str;

    fn description(&self) -> &str;

    /// Token budget the host should respect when packing context.
    fn context_window(&self) -> usize;

    /// Option surface assembled at construction time.
    fn config(&self) -> &GeneratorConfig;

    /// Stream an answer to `query` grounded in `context`.
    ///
    /// `config` is the host's current option values, normally a copy of
    /// [`Generator::config`] edited by the user.
    async fn generate_stream(
        &self,
        config: &GeneratorConfig,
        query: &str,
        context: &str,
        conversation: &[ConversationMessage],
    ) -> Result<ChunkStream>;
}

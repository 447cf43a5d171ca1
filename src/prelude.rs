//! Convenience re-exports for common use.

pub use crate::config::{AmbientConfig, GeneratorConfig, InputConfig, InputField};
pub use crate::error::{GeneratorError, Result};
pub use crate::generation::{collect_stream, prepare_messages};
pub use crate::models::ModelCatalog;
pub use crate::provider::{ChunkStream, Generator, OpenAiGenerator};
pub use crate::types::{
    ChatRequest, ConversationMessage, FinishReason, GeneratedChunk, Role, StreamTextResult,
};

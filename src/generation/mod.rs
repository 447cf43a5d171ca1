//! Prompt assembly and stream consumption.

pub mod prompt;
pub mod stream;

pub use prompt::{prepare_messages, DEFAULT_SYSTEM_MESSAGE};
pub use stream::{collect_stream, generate_answer};

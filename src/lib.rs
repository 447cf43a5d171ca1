//! ragstream — streaming OpenAI chat-completion generator for RAG pipelines.
//!
//! Turns a user query, retrieved context, and prior conversation into a lazy
//! stream of generated text chunks from an OpenAI-compatible
//! `/chat/completions` endpoint.
//!
//! # Quick Start
//!
//! ```no_run
//! use futures::StreamExt;
//! use ragstream::prelude::*;
//!
//! # async fn example() -> ragstream::error::Result<()> {
//! let generator = OpenAiGenerator::new(AmbientConfig::from_env()).await;
//! let mut stream = generator
//!     .generate_stream(generator.config(), "What is Verba?", "Verba is a RAG app.", &[])
//!     .await?;
//! while let Some(chunk) = stream.next().await {
//!     print!("{}", chunk?.message);
//! }
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod generation;
pub mod models;
pub mod prelude;
pub mod provider;
pub mod types;

#[cfg(feature = "cli")]
pub mod cli;

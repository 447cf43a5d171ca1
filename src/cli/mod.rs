//! CLI entry point for ragstream.

pub mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// ragstream CLI
#[derive(Parser, Debug)]
#[command(
    name = "ragstream",
    version,
    about = "Stream answers from an OpenAI chat model over retrieved context"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the chat models the provider offers
    Models(ConnectionArgs),
    /// Print the generator's option schema as JSON
    Config(ConnectionArgs),
    /// Answer a query using the given context
    Ask(AskArgs),
}

/// Overrides for the ambient `OPENAI_*` environment.
#[derive(Parser, Debug, Clone, Default)]
pub struct ConnectionArgs {
    /// API key (defaults to OPENAI_API_KEY)
    #[arg(long)]
    pub api_key: Option<String>,

    /// Base URL (defaults to OPENAI_BASE_URL, then the OpenAI endpoint)
    #[arg(long)]
    pub base_url: Option<String>,
}

/// Arguments for the `ask` subcommand.
#[derive(Parser, Debug)]
pub struct AskArgs {
    #[command(flatten)]
    pub connection: ConnectionArgs,

    /// Model to use (defaults to OPENAI_MODEL, then the first discovered model)
    #[arg(short, long)]
    pub model: Option<String>,

    /// System prompt replacing the default persona
    #[arg(short, long)]
    pub system: Option<String>,

    /// Retrieved context, inline
    #[arg(short, long, conflicts_with = "context_file")]
    pub context: Option<String>,

    /// Retrieved context, read from a file
    #[arg(long)]
    pub context_file: Option<PathBuf>,

    /// Prior conversation as a JSON array of {"role", "content"} objects
    #[arg(long)]
    pub history: Option<PathBuf>,

    /// Print the full answer once instead of streaming it
    #[arg(long)]
    pub no_stream: bool,

    /// The user query
    pub query: String,
}

impl Cli {
    /// Parse CLI arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_ask_with_inline_context() {
        let cli = Cli::try_parse_from([
            "ragstream",
            "ask",
            "--context",
            "Verba is a RAG app",
            "--model",
            "gpt-4o",
            "What is Verba?",
        ])
        .unwrap();
        match cli.command {
            Commands::Ask(args) => {
                assert_eq!(args.query, "What is Verba?");
                assert_eq!(args.context.as_deref(), Some("Verba is a RAG app"));
                assert_eq!(args.model.as_deref(), Some("gpt-4o"));
                assert!(!args.no_stream);
            }
            other => panic!("expected Ask, got {other:?}"),
        }
    }

    #[test]
    fn context_and_context_file_conflict() {
        let err = Cli::try_parse_from([
            "ragstream",
            "ask",
            "--context",
            "a",
            "--context-file",
            "b.txt",
            "q",
        ])
        .unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ArgumentConflict);
    }

    #[test]
    fn parse_models_with_base_url() {
        let cli =
            Cli::try_parse_from(["ragstream", "models", "--base-url", "http://localhost:1234/v1"])
                .unwrap();
        match cli.command {
            Commands::Models(conn) => {
                assert_eq!(conn.base_url.as_deref(), Some("http://localhost:1234/v1"));
                assert_eq!(conn.api_key, None);
            }
            other => panic!("expected Models, got {other:?}"),
        }
    }
}

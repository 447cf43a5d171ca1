//! ragstream CLI binary entry point.

use ragstream::cli::{commands, Cli, Commands};
use ragstream::error::{ErrorCategory, GeneratorError};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse_args();

    let result = match cli.command {
        Commands::Models(conn) => commands::handle_models(conn).await,
        Commands::Config(conn) => commands::handle_config(conn).await,
        Commands::Ask(args) => commands::handle_ask(args).await,
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        if let Some(err) = e.downcast_ref::<GeneratorError>() {
            if err.category() == ErrorCategory::Authentication {
                eprintln!("Set OPENAI_API_KEY or pass --api-key.");
            }
        }
        std::process::exit(1);
    }
}

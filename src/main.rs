//! chatrelay HTTP server
//!
//! Loads configuration, checks the provider credential, and serves the chat API.

use chatrelay::{
    cli::{Cli, Command, generate_config_template},
    config::Config,
    handlers::AppState,
    server, telemetry,
};
use clap::Parser;
use std::error::Error;
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            let mut source = e.source();
            while let Some(cause) = source {
                eprintln!("  caused by: {}", cause);
                source = cause.source();
            }
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if let Some(Command::Config { output }) = cli.command {
        let template = generate_config_template();
        match output {
            Some(path) => {
                std::fs::write(&path, template)?;
                eprintln!("Configuration template written to {}", path.display());
            }
            None => print!("{}", template),
        }
        return Ok(());
    }

    // A missing .env is fine; the credential may come from the real environment
    let dotenv_path = dotenvy::dotenv().ok();

    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(kind) = cli.provider {
        config = config.with_provider_kind(kind);
    }
    let addr = config.bind_addr()?;

    telemetry::init(&config.observability.log_level);

    if let Some(path) = dotenv_path {
        tracing::debug!(path = %path.display(), "Loaded .env file");
    }

    let state = AppState::from_env(config)?;
    let config = state.config();

    tracing::info!(
        provider = %config.provider.kind(),
        model = %config.provider.model(),
        permissive_cors = config.permissive_cors(),
        "Starting chatrelay on {}",
        addr
    );

    let app = server::build_router(state.clone());

    tracing::info!("Listening on {}", addr);
    tracing::info!("Chat endpoint available at http://{}/chat", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

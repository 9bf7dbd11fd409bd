//! Command-line interface for chatrelay

use crate::config::ProviderKind;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Single-endpoint chat relay for hosted LLM providers
#[derive(Parser)]
#[command(name = "chatrelay")]
#[command(version)]
#[command(about = "Single-endpoint chat relay for hosted LLM providers")]
#[command(
    long_about = "chatrelay serves POST /chat and forwards each question to a hosted \
    model on Groq or OpenRouter. The provider API key is read from GROQ_API_KEY or \
    OPENROUTER_API_KEY (a .env file in the working directory is honored)."
)]
pub struct Cli {
    /// Path to a TOML configuration file (built-in defaults when omitted)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Provider to use, overriding the config file
    #[arg(short, long, value_enum)]
    pub provider: Option<ProviderKind>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Generate a template configuration file
    Config {
        /// Output file path (prints to stdout if not specified)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Generate template configuration content
pub fn generate_config_template() -> &'static str {
    r#"# chatrelay configuration
#
# The provider API key is NOT stored here. Set GROQ_API_KEY or
# OPENROUTER_API_KEY in the environment or in a .env file.

[server]
# IP address to bind to (0.0.0.0 for all interfaces, 127.0.0.1 for localhost only)
host = "0.0.0.0"
port = 8000

# Upper bound on one provider call, in seconds (1-300)
request_timeout_seconds = 60

# Allow any origin, method and header (with credentials).
# Defaults to true for groq and false for openrouter when omitted.
# permissive_cors = true

[provider]
# "groq" or "openrouter"
kind = "groq"
model = "meta-llama/llama-4-maverick-17b-128e-instruct"
# base_url = "https://api.groq.com/openai/v1"

# OpenRouter example:
# kind = "openrouter"
# model = "deepseek/deepseek-chat-v3-0324:free"
# base_url = "https://openrouter.ai/api/v1"
# referer = "http://localhost:8000"   # sent as HTTP-Referer
# title = "chatrelay"                 # sent as X-Title

[observability]
# Log level: "trace", "debug", "info", "warn", "error" (RUST_LOG overrides)
log_level = "info"
"#
}

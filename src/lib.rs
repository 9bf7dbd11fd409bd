//! chatrelay - single-endpoint chat relay for hosted LLM providers
//!
//! Forwards one question per request to a Groq- or OpenRouter-hosted model
//! and returns the completion text.

pub mod cli;
pub mod config;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod middleware;
pub mod models;
pub mod server;
pub mod telemetry;

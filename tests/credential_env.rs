//! Credential lookup through the real process environment
//!
//! These tests mutate process-wide variables, so they run serially.

use chatrelay::config::{Config, ProviderKind};
use chatrelay::error::AppError;
use chatrelay::handlers::AppState;
use serial_test::serial;
use std::fs;
use tempfile::TempDir;

fn set_var(key: &str, value: &str) {
    // SAFETY: every test touching these variables is #[serial]
    unsafe { std::env::set_var(key, value) }
}

fn remove_var(key: &str) {
    // SAFETY: every test touching these variables is #[serial]
    unsafe { std::env::remove_var(key) }
}

#[test]
#[serial]
fn test_from_env_reads_and_loses_groq_key() {
    set_var("GROQ_API_KEY", "gsk_from_env");
    let state = AppState::from_env(Config::for_provider(ProviderKind::Groq));
    assert!(state.is_ok(), "key present in the environment should be used");

    remove_var("GROQ_API_KEY");
    match AppState::from_env(Config::for_provider(ProviderKind::Groq)) {
        Err(AppError::MissingCredential { var }) => assert_eq!(var, "GROQ_API_KEY"),
        Err(other) => panic!("expected MissingCredential, got {:?}", other),
        Ok(_) => panic!("startup must fail once the key is unset"),
    }
}

#[test]
#[serial]
fn test_from_env_rejects_blank_key() {
    set_var("GROQ_API_KEY", "   ");
    let result = AppState::from_env(Config::for_provider(ProviderKind::Groq));
    remove_var("GROQ_API_KEY");

    assert!(matches!(
        result,
        Err(AppError::MissingCredential {
            var: "GROQ_API_KEY"
        })
    ));
}

#[test]
#[serial]
fn test_dotenv_file_supplies_openrouter_key() {
    remove_var("OPENROUTER_API_KEY");
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(".env");
    fs::write(&path, "OPENROUTER_API_KEY=sk-or-from-dotenv\n").unwrap();

    let config = Config::for_provider(ProviderKind::OpenRouter);
    assert!(AppState::from_env(config.clone()).is_err());

    dotenvy::from_path(&path).expect(".env should load");
    assert_eq!(
        std::env::var("OPENROUTER_API_KEY").as_deref(),
        Ok("sk-or-from-dotenv")
    );
    assert!(AppState::from_env(config).is_ok());

    remove_var("OPENROUTER_API_KEY");
}

#[test]
#[serial]
fn test_dotenv_does_not_override_real_environment() {
    set_var("OPENROUTER_API_KEY", "sk-or-real");
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(".env");
    fs::write(&path, "OPENROUTER_API_KEY=sk-or-from-dotenv\n").unwrap();

    dotenvy::from_path(&path).expect(".env should load");
    assert_eq!(
        std::env::var("OPENROUTER_API_KEY").as_deref(),
        Ok("sk-or-real")
    );

    remove_var("OPENROUTER_API_KEY");
}

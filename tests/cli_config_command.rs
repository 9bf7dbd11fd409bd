//! Integration tests for the `chatrelay config` template

use chatrelay::cli::generate_config_template;
use chatrelay::config::{Config, ProviderKind};
use std::fs;
use tempfile::TempDir;

#[test]
fn test_generated_template_creates_valid_config_file() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let config_path = temp_dir.path().join("config.toml");

    fs::write(&config_path, generate_config_template()).expect("Failed to write template");

    let config =
        Config::from_file(&config_path).expect("Generated template should load as valid Config");

    assert_eq!(config.provider.kind(), ProviderKind::Groq);
    assert_eq!(
        config.provider.model(),
        "meta-llama/llama-4-maverick-17b-128e-instruct"
    );
    assert_eq!(config.server.request_timeout_seconds, 60);
    assert!(config.permissive_cors());
}

#[test]
fn test_template_has_all_sections() {
    let template = generate_config_template();

    assert!(template.contains("[server]"), "Missing [server]");
    assert!(template.contains("[provider]"), "Missing [provider]");
    assert!(
        template.contains("[observability]"),
        "Missing [observability]"
    );
}

#[test]
fn test_template_does_not_contain_credentials() {
    let template = generate_config_template();
    assert!(!template.contains("api_key ="));
    assert!(template.contains("GROQ_API_KEY"));
    assert!(template.contains("OPENROUTER_API_KEY"));
}

#[test]
fn test_template_switched_to_openrouter_stays_valid() {
    let config: Config = toml::from_str(generate_config_template()).unwrap();
    let config = config.with_provider_kind(ProviderKind::OpenRouter);

    config.validate().expect("OpenRouter defaults should validate");
    assert!(!config.permissive_cors());
}

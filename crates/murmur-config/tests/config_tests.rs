// SPDX-FileCopyrightText: 2026 Murmur Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for the Murmur configuration system.

use murmur_config::diagnostic::ConfigError;
use murmur_config::{load_and_validate_str, load_config_from_str};
use murmur_core::Personality;

/// Valid TOML with all known fields deserializes successfully.
#[test]
fn valid_toml_deserializes_into_murmur_config() {
    let toml = r#"
[general]
log_level = "debug"

[session]
model = "openai/gpt-4o-mini"
personality = "technical"
context_window = 4

[provider]
base_url = "http://localhost:9000/v1"
api_key = "sk-or-test-key"
timeout_secs = 15
temperature = 0.2
max_tokens = 256
app_url = "https://example.com"
app_title = "Murmur Test"

[storage]
database_path = "/tmp/murmur-test.db"
wal_mode = false

[credentials]
path = "/tmp/murmur-key"
"#;

    let config = load_config_from_str(toml).expect("valid TOML should deserialize");
    assert_eq!(config.general.log_level, "debug");
    assert_eq!(config.session.model, "openai/gpt-4o-mini");
    assert_eq!(config.session.personality, Personality::Technical);
    assert_eq!(config.session.context_window, 4);
    assert_eq!(config.provider.base_url, "http://localhost:9000/v1");
    assert_eq!(config.provider.api_key.as_deref(), Some("sk-or-test-key"));
    assert_eq!(config.provider.timeout_secs, 15);
    assert_eq!(config.provider.temperature, Some(0.2));
    assert_eq!(config.provider.max_tokens, Some(256));
    assert_eq!(config.provider.app_url.as_deref(), Some("https://example.com"));
    assert_eq!(config.provider.app_title.as_deref(), Some("Murmur Test"));
    assert_eq!(config.storage.database_path, "/tmp/murmur-test.db");
    assert!(!config.storage.wal_mode);
    assert_eq!(config.credentials.path, "/tmp/murmur-key");
}

/// Missing optional sections use defaults without error.
#[test]
fn missing_optional_sections_use_defaults() {
    let config = load_config_from_str("").expect("empty TOML should use defaults");

    assert_eq!(config.general.log_level, "warn");
    assert_eq!(config.session.model, "deepseek/deepseek-chat:free");
    assert_eq!(config.session.personality, Personality::Professional);
    assert_eq!(config.session.context_window, 10);
    assert_eq!(config.provider.base_url, "https://openrouter.ai/api/v1");
    assert!(config.provider.api_key.is_none());
    assert_eq!(config.provider.timeout_secs, 60);
    assert!(config.provider.temperature.is_none());
    assert!(config.provider.max_tokens.is_none());
    assert_eq!(config.provider.app_title.as_deref(), Some("Murmur"));
    assert!(config.storage.database_path.ends_with("murmur.db"));
    assert!(config.storage.wal_mode);
    assert!(config.credentials.path.ends_with("api_key"));
}

/// Session settings convert into the session manager's configuration.
#[test]
fn session_settings_convert_to_session_config() {
    let toml = r#"
[session]
model = "mistralai/mistral-7b-instruct"
personality = "creative"
context_window = 6
"#;
    let config = load_config_from_str(toml).unwrap();
    let session = config.session.to_session_config();
    assert_eq!(session.model_id, "mistralai/mistral-7b-instruct");
    assert_eq!(session.personality, Personality::Creative);
    assert_eq!(session.context_window, 6);
}

/// Unknown field in [session] produces an UnknownKey diagnostic with a suggestion.
#[test]
fn unknown_field_in_session_suggests_correction() {
    let toml = r#"
[session]
modle = "x"
"#;

    let errors = load_and_validate_str(toml).expect_err("should reject unknown field");
    let unknown = errors
        .iter()
        .find_map(|e| match e {
            ConfigError::UnknownKey {
                key, suggestion, ..
            } => Some((key.clone(), suggestion.clone())),
            _ => None,
        })
        .expect("should contain an UnknownKey error");
    assert_eq!(unknown.0, "modle");
    assert_eq!(unknown.1.as_deref(), Some("model"));
}

/// Unknown top-level section is rejected.
#[test]
fn unknown_section_is_rejected() {
    let toml = r#"
[theme]
palette = "dark"
"#;

    let err = load_config_from_str(toml).expect_err("should reject unknown section");
    let err_str = format!("{err}");
    assert!(
        err_str.contains("unknown field") || err_str.contains("theme"),
        "error should mention the unknown section, got: {err_str}"
    );
}

/// An unknown personality is reported as an invalid value.
#[test]
fn unknown_personality_is_rejected() {
    let toml = r#"
[session]
personality = "sarcastic"
"#;

    let errors = load_and_validate_str(toml).expect_err("should reject unknown personality");
    assert!(!errors.is_empty());
    let rendered = errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("\n");
    assert!(rendered.contains("sarcastic"), "got: {rendered}");
}

/// Wrong value type produces an error.
#[test]
fn wrong_type_is_rejected() {
    let toml = r#"
[session]
context_window = "ten"
"#;

    let errors = load_and_validate_str(toml).expect_err("should reject a string window");
    assert!(!errors.is_empty());
}

/// Semantic validation runs after deserialization.
#[test]
fn zero_context_window_fails_validation() {
    let toml = r#"
[session]
context_window = 0
"#;

    let errors = load_and_validate_str(toml).expect_err("zero window should fail validation");
    assert!(errors.iter().any(
        |e| matches!(e, ConfigError::Validation { message } if message.contains("context_window"))
    ));
}

/// `MURMUR_*` environment variables override values from murmur.toml.
#[test]
fn env_vars_override_file_values() {
    figment::Jail::expect_with(|jail| {
        jail.create_file(
            "murmur.toml",
            r#"
[session]
model = "from-file"
context_window = 3
"#,
        )?;
        jail.set_env("MURMUR_SESSION_MODEL", "from-env");
        jail.set_env("MURMUR_PROVIDER_API_KEY", "sk-or-env-key-123");

        let config = murmur_config::load_config_from_path(std::path::Path::new("murmur.toml"))?;
        assert_eq!(config.session.model, "from-env");
        assert_eq!(config.session.context_window, 3);
        assert_eq!(config.provider.api_key.as_deref(), Some("sk-or-env-key-123"));
        Ok(())
    });
}

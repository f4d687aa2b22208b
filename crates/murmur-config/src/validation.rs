// SPDX-FileCopyrightText: 2026 Murmur Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Semantic checks that serde attributes cannot express.

use crate::diagnostic::ConfigError;
use crate::model::MurmurConfig;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Checks every rule and reports all failures at once.
pub fn validate_config(config: &MurmurConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();
    let mut require = |ok: bool, message: String| {
        if !ok {
            errors.push(ConfigError::Validation { message });
        }
    };

    let level = config.general.log_level.trim().to_ascii_lowercase();
    require(
        LOG_LEVELS.contains(&level.as_str()),
        format!(
            "general.log_level `{}` is not one of: {}",
            config.general.log_level,
            LOG_LEVELS.join(", ")
        ),
    );

    let session = &config.session;
    require(
        !session.model.trim().is_empty(),
        "session.model must not be empty".into(),
    );
    require(
        session.context_window > 0,
        "session.context_window must be a positive integer".into(),
    );

    let provider = &config.provider;
    let base_url = provider.base_url.trim();
    require(
        base_url.starts_with("https://") || base_url.starts_with("http://"),
        format!("provider.base_url `{base_url}` must start with http:// or https://"),
    );
    require(
        provider.timeout_secs > 0,
        "provider.timeout_secs must be at least 1".into(),
    );
    if let Some(t) = provider.temperature {
        require(
            (0.0..=2.0).contains(&t),
            format!("provider.temperature must be between 0.0 and 2.0, got {t}"),
        );
    }
    require(
        provider.max_tokens != Some(0),
        "provider.max_tokens must be at least 1 when set".into(),
    );

    for (key, path) in [
        ("storage.database_path", &config.storage.database_path),
        ("credentials.path", &config.credentials.path),
    ] {
        require(!path.trim().is_empty(), format!("{key} must not be empty"));
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn has_error(errors: &[ConfigError], needle: &str) -> bool {
        errors
            .iter()
            .any(|e| matches!(e, ConfigError::Validation { message } if message.contains(needle)))
    }

    #[test]
    fn defaults_pass() {
        assert!(validate_config(&MurmurConfig::default()).is_ok());
    }

    #[test]
    fn zero_context_window_fails_validation() {
        let mut config = MurmurConfig::default();
        config.session.context_window = 0;
        assert!(has_error(&validate_config(&config).unwrap_err(), "context_window"));
    }

    #[test]
    fn blank_model_fails_validation() {
        let mut config = MurmurConfig::default();
        config.session.model = "   ".to_string();
        assert!(has_error(&validate_config(&config).unwrap_err(), "session.model"));
    }

    #[test]
    fn unknown_log_level_fails_validation() {
        let mut config = MurmurConfig::default();
        config.general.log_level = "loud".to_string();
        assert!(has_error(&validate_config(&config).unwrap_err(), "log_level"));
    }

    #[test]
    fn non_http_base_url_fails_validation() {
        let mut config = MurmurConfig::default();
        config.provider.base_url = "ftp://example.com".to_string();
        assert!(has_error(&validate_config(&config).unwrap_err(), "base_url"));
    }

    #[test]
    fn out_of_range_temperature_fails_validation() {
        let mut config = MurmurConfig::default();
        config.provider.temperature = Some(3.5);
        assert!(has_error(&validate_config(&config).unwrap_err(), "temperature"));
    }

    #[test]
    fn all_errors_are_collected() {
        let mut config = MurmurConfig::default();
        config.session.context_window = 0;
        config.provider.timeout_secs = 0;
        config.storage.database_path = String::new();
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 3);
    }

    #[test]
    fn custom_values_in_range_pass() {
        let mut config = MurmurConfig::default();
        config.general.log_level = "DEBUG".to_string();
        config.provider.base_url = "http://localhost:8080/v1".to_string();
        config.provider.temperature = Some(0.7);
        config.provider.max_tokens = Some(512);
        config.storage.database_path = "/tmp/murmur.db".to_string();
        assert!(validate_config(&config).is_ok());
    }
}

// SPDX-FileCopyrightText: 2026 Murmur Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Conversation types shared by the session manager and its collaborators.

use chrono::{DateTime, Utc};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::error::MurmurError;

/// Minimum number of characters accepted for an API credential.
pub const MIN_CREDENTIAL_LEN: usize = 10;

/// Author of a [`Turn`].
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// One exchanged message. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub role: Role,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl Turn {
    /// Creates a turn stamped with the current time.
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            created_at: Utc::now(),
        }
    }

    /// Creates the system turn carrying the persona prompt for `personality`.
    pub fn system(personality: Personality) -> Self {
        Self::new(Role::System, personality.system_prompt())
    }
}

/// Named preset controlling the system turn's content.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum Personality {
    #[default]
    Professional,
    Friendly,
    Technical,
    Creative,
}

impl Personality {
    pub const ALL: [Personality; 4] = [
        Personality::Professional,
        Personality::Friendly,
        Personality::Technical,
        Personality::Creative,
    ];

    /// The fixed system prompt for this preset.
    pub fn system_prompt(self) -> &'static str {
        match self {
            Personality::Professional => {
                "You are a professional assistant. Give clear, accurate and concise answers \
                 in a courteous, business-appropriate tone."
            }
            Personality::Friendly => {
                "You are a friendly and approachable assistant. Keep a warm, conversational \
                 tone while staying helpful and accurate."
            }
            Personality::Technical => {
                "You are a technical expert. Give precise, detailed answers, use correct \
                 terminology, and include code or step-by-step reasoning where it helps."
            }
            Personality::Creative => {
                "You are a creative assistant. Be imaginative and expressive, offer original \
                 ideas, and feel free to explore unusual angles."
            }
        }
    }
}

/// The active conversation's configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Model identifier understood by the remote provider.
    pub model_id: String,
    pub personality: Personality,
    /// Number of most-recent non-system turns kept in the working set.
    pub context_window: usize,
}

impl SessionConfig {
    pub fn new(model_id: impl Into<String>, personality: Personality, context_window: usize) -> Self {
        Self {
            model_id: model_id.into(),
            personality,
            context_window,
        }
    }

    /// Checks the field constraints a settings update must satisfy.
    pub fn validate(&self) -> Result<(), MurmurError> {
        if self.model_id.trim().is_empty() {
            return Err(MurmurError::Config("model id must not be empty".to_string()));
        }
        if self.context_window == 0 {
            return Err(MurmurError::Config(
                "context window must be a positive integer".to_string(),
            ));
        }
        Ok(())
    }
}

/// An API credential that passed local format validation.
///
/// The value is held as a secret and never appears in `Debug` output.
pub struct Credential(SecretString);

impl Credential {
    /// Validates `candidate` and wraps it. Surrounding whitespace is trimmed.
    pub fn parse(candidate: &str) -> Result<Self, MurmurError> {
        let trimmed = candidate.trim();
        if trimmed.is_empty() {
            return Err(MurmurError::InvalidCredentialFormat {
                reason: "credential must not be blank".to_string(),
            });
        }
        let len = trimmed.chars().count();
        if len < MIN_CREDENTIAL_LEN {
            return Err(MurmurError::InvalidCredentialFormat {
                reason: format!(
                    "credential must be at least {MIN_CREDENTIAL_LEN} characters, got {len}"
                ),
            });
        }
        Ok(Self(SecretString::from(trimmed.to_string())))
    }

    /// Returns the raw credential for use in an authorization header.
    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }
}

impl Clone for Credential {
    fn clone(&self) -> Self {
        Self(SecretString::from(self.expose().to_string()))
    }
}

impl PartialEq for Credential {
    fn eq(&self, other: &Self) -> bool {
        self.expose() == other.expose()
    }
}

impl Eq for Credential {}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Credential([REDACTED])")
    }
}

/// Health status reported by adapter health checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    /// Adapter is fully operational.
    Healthy,
    /// Adapter is operational but experiencing issues.
    Degraded(String),
    /// Adapter is not operational.
    Unhealthy(String),
}

/// Identifies the kind of collaborator an adapter provides.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
pub enum AdapterType {
    MessageLog,
    CredentialStore,
    Completion,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn role_round_trips_through_strings() {
        for role in [Role::System, Role::User, Role::Assistant] {
            let parsed = Role::from_str(&role.to_string()).expect("should parse back");
            assert_eq!(parsed, role);
        }
        assert_eq!(Role::Assistant.to_string(), "assistant");
    }

    #[test]
    fn personality_parses_case_insensitively() {
        assert_eq!(Personality::from_str("Friendly").unwrap(), Personality::Friendly);
        assert_eq!(Personality::from_str("TECHNICAL").unwrap(), Personality::Technical);
        assert!(Personality::from_str("sarcastic").is_err());
    }

    #[test]
    fn every_personality_has_a_distinct_prompt() {
        let prompts: std::collections::HashSet<_> =
            Personality::ALL.iter().map(|p| p.system_prompt()).collect();
        assert_eq!(prompts.len(), Personality::ALL.len());
    }

    #[test]
    fn system_turn_uses_personality_prompt() {
        let turn = Turn::system(Personality::Creative);
        assert_eq!(turn.role, Role::System);
        assert_eq!(turn.content, Personality::Creative.system_prompt());
    }

    #[test]
    fn credential_rejects_blank_and_short_values() {
        assert!(matches!(
            Credential::parse("   "),
            Err(MurmurError::InvalidCredentialFormat { .. })
        ));
        assert!(matches!(
            Credential::parse("abcde"),
            Err(MurmurError::InvalidCredentialFormat { .. })
        ));
    }

    #[test]
    fn credential_accepts_ten_characters_and_trims() {
        let cred = Credential::parse("  sk-1234567  ").unwrap();
        assert_eq!(cred.expose(), "sk-1234567");
    }

    #[test]
    fn credential_debug_is_redacted() {
        let cred = Credential::parse("sk-or-very-secret").unwrap();
        let debug = format!("{cred:?}");
        assert!(!debug.contains("secret"), "got: {debug}");
    }

    #[test]
    fn session_config_validation() {
        assert!(SessionConfig::new("m", Personality::Friendly, 1).validate().is_ok());
        assert!(SessionConfig::new("  ", Personality::Friendly, 1).validate().is_err());
        assert!(SessionConfig::new("m", Personality::Friendly, 0).validate().is_err());
    }

    #[test]
    fn turn_serializes_role_lowercase() {
        let turn = Turn::new(Role::User, "hi");
        let json = serde_json::to_value(&turn).unwrap();
        assert_eq!(json["role"], "user");
        assert_eq!(json["content"], "hi");
    }
}

// SPDX-FileCopyrightText: 2026 Murmur Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Config error diagnostics.
//!
//! Figment errors are turned into [`ConfigError`]s that miette can render
//! with the offending line highlighted. Misspelled keys get a suggestion.

#![allow(unused_assignments)] // emitted by the miette derive

use figment::error::Kind;
use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Jaro-Winkler score a known key needs to be offered as a correction.
const SUGGESTION_THRESHOLD: f64 = 0.75;

/// The text of one config file, kept for highlighting.
#[derive(Debug, Clone)]
pub struct ConfigSource {
    pub name: String,
    pub text: String,
}

impl ConfigSource {
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
        }
    }

    /// Reads `path`, or `None` if it cannot be read.
    pub fn read(path: &std::path::Path) -> Option<Self> {
        std::fs::read_to_string(path)
            .ok()
            .map(|text| Self::new(path.display().to_string(), text))
    }
}

#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    #[error("unknown configuration key `{key}`")]
    #[diagnostic(code(murmur::config::unknown_key), help("{}", unknown_key_help(suggestion.as_deref(), known)))]
    UnknownKey {
        key: String,
        suggestion: Option<String>,
        /// Keys accepted in the same section, comma separated.
        known: String,
        #[label("not a recognized key")]
        span: Option<SourceSpan>,
        #[source_code]
        src: Option<NamedSource<String>>,
    },

    /// Wrong type, or a value outside a closed set such as personalities.
    #[error("invalid value for `{key}`: {detail}")]
    #[diagnostic(code(murmur::config::invalid_value))]
    InvalidValue { key: String, detail: String },

    #[error("validation error: {message}")]
    #[diagnostic(code(murmur::config::validation))]
    Validation { message: String },

    #[error("configuration error: {0}")]
    #[diagnostic(code(murmur::config::other))]
    Other(String),
}

fn unknown_key_help(suggestion: Option<&str>, known: &str) -> String {
    if let Some(s) = suggestion {
        format!("did you mean `{s}`? Valid keys: {known}")
    } else {
        format!("valid keys: {known}")
    }
}

/// Splits a figment error into one diagnostic per underlying failure.
pub fn from_figment(err: figment::Error, sources: &[ConfigSource]) -> Vec<ConfigError> {
    err.into_iter()
        .map(|error| {
            let key = error
                .path
                .iter()
                .map(String::as_str)
                .collect::<Vec<_>>()
                .join(".");
            match &error.kind {
                Kind::UnknownField(field, known) => {
                    let highlight = locate(&error, field, sources);
                    ConfigError::UnknownKey {
                        key: field.clone(),
                        suggestion: suggest_key(field, known),
                        known: known.join(", "),
                        span: highlight.as_ref().map(|(span, _)| *span),
                        src: highlight.map(|(_, src)| src),
                    }
                }
                Kind::InvalidType(found, expected) => ConfigError::InvalidValue {
                    key,
                    detail: format!("found {found}, expected {expected}"),
                },
                Kind::UnknownVariant(found, expected) => ConfigError::InvalidValue {
                    key,
                    detail: format!("`{found}` is not one of: {}", expected.join(", ")),
                },
                Kind::MissingField(field) => ConfigError::Other(format!("missing key `{field}`")),
                _ => ConfigError::Other(error.to_string()),
            }
        })
        .collect()
}

/// Finds the span of `field` in the source the error was read from.
fn locate(
    error: &figment::error::Error,
    field: &str,
    sources: &[ConfigSource],
) -> Option<(SourceSpan, NamedSource<String>)> {
    let origin = error.metadata.as_ref().and_then(|m| match &m.source {
        Some(figment::Source::File(path)) => Some(path.display().to_string()),
        _ => None,
    });
    let source = match origin {
        Some(name) => sources.iter().find(|s| s.name == name)?,
        // Inline strings carry no file name.
        None if sources.len() == 1 => &sources[0],
        None => return None,
    };

    let offset = find_key_offset(&source.text, &error.path, field)?;
    Some((
        SourceSpan::new(offset.into(), field.len()),
        NamedSource::new(&source.name, source.text.clone()),
    ))
}

/// Byte offset of `field` inside the table named by `path`, or at top
/// level when `path` is empty.
pub fn find_key_offset(content: &str, path: &[String], field: &str) -> Option<usize> {
    let wanted = path.first().map(String::as_str);
    let mut section: Option<&str> = None;
    let mut offset = 0;

    for line in content.split_inclusive('\n') {
        let start = offset;
        offset += line.len();
        let body = line.trim();

        if let Some(name) = body.strip_prefix('[').and_then(|b| b.strip_suffix(']')) {
            section = Some(name.trim());
            continue;
        }
        if section != wanted {
            continue;
        }

        let indent = line.len() - line.trim_start().len();
        let is_key = body
            .strip_prefix(field)
            .is_some_and(|rest| rest.trim_start().starts_with('='));
        if is_key {
            return Some(start + indent);
        }
    }
    None
}

/// Closest known key to `unknown`, if any is similar enough.
pub fn suggest_key(unknown: &str, known: &[&str]) -> Option<String> {
    known
        .iter()
        .map(|key| (*key, strsim::jaro_winkler(unknown, key)))
        .filter(|(_, score)| *score > SUGGESTION_THRESHOLD)
        .max_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(key, _)| key.to_owned())
}

/// Prints every error to stderr through miette's graphical handler.
pub fn render_errors(errors: &[ConfigError]) {
    let handler = miette::GraphicalReportHandler::new();
    for error in errors {
        let mut out = String::new();
        match handler.render_report(&mut out, error) {
            Ok(()) => eprint!("{out}"),
            Err(_) => eprintln!("Error: {error}"),
        }
    }
}

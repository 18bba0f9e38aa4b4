use crate::error::ScanError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Comment conventions for one source language
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Language {
    /// Human-readable label (e.g. "Python")
    pub name: String,

    /// Literal that starts a single-line comment (e.g. "#", "//");
    /// empty if the language has no inline comment form
    #[serde(default)]
    pub inline: String,

    /// Block comment delimiters; reserved, not used by the scanner yet
    #[serde(default)]
    pub block_start: String,
    #[serde(default)]
    pub block_end: String,
}

/// Immutable extension-to-language lookup table, built once at startup
/// from configuration (or the built-in defaults) and never mutated by
/// the engine.
#[derive(Debug, Clone)]
pub struct LanguageRegistry {
    languages: HashMap<String, Language>,
}

impl LanguageRegistry {
    /// Build a registry from an extension-keyed table. Extensions are
    /// stored without the leading dot; lookup is exact and
    /// case-sensitive.
    pub fn new(languages: HashMap<String, Language>) -> Self {
        Self { languages }
    }

    /// Resolve a file extension (without the leading dot) to its
    /// language descriptor.
    ///
    /// An entry whose `name` is empty counts as absent, matching the
    /// behavior of a lookup miss.
    pub fn resolve(&self, extension: &str) -> Result<&Language, ScanError> {
        match self.languages.get(extension) {
            Some(lang) if !lang.name.is_empty() => Ok(lang),
            _ => Err(ScanError::UnsupportedLanguage(extension.to_string())),
        }
    }
}

impl Default for LanguageRegistry {
    fn default() -> Self {
        Self::new(builtin_languages())
    }
}

macro_rules! lang {
    ($name:expr, $inline:expr) => {
        Language {
            name: $name.to_string(),
            inline: $inline.to_string(),
            block_start: String::new(),
            block_end: String::new(),
        }
    };
    ($name:expr, $inline:expr, $start:expr, $end:expr) => {
        Language {
            name: $name.to_string(),
            inline: $inline.to_string(),
            block_start: $start.to_string(),
            block_end: $end.to_string(),
        }
    };
}

/// Built-in language table, used when no config file overrides it
pub fn builtin_languages() -> HashMap<String, Language> {
    HashMap::from([
        ("py".to_string(), lang!("Python", "#")),
        ("go".to_string(), lang!("Go", "//", "/*", "*/")),
        ("rs".to_string(), lang!("Rust", "//", "/*", "*/")),
        ("js".to_string(), lang!("JavaScript", "//", "/*", "*/")),
        ("ts".to_string(), lang!("TypeScript", "//", "/*", "*/")),
        ("c".to_string(), lang!("C", "//", "/*", "*/")),
        ("h".to_string(), lang!("C Header", "//", "/*", "*/")),
        ("cpp".to_string(), lang!("C++", "//", "/*", "*/")),
        ("java".to_string(), lang!("Java", "//", "/*", "*/")),
        ("rb".to_string(), lang!("Ruby", "#")),
        ("sh".to_string(), lang!("Shell", "#")),
        ("toml".to_string(), lang!("TOML", "#")),
        ("yaml".to_string(), lang!("YAML", "#")),
    ])
}

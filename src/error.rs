use std::path::PathBuf;
use thiserror::Error;

/// Recoverable per-file errors produced by the scanning engine.
///
/// None of these abort a multi-file run: the caller decides whether to
/// skip the file or fail fast.
#[derive(Debug, Error)]
pub enum ScanError {
    /// The file's extension has no registered comment syntax
    #[error("file extension \"{0}\" is not currently supported")]
    UnsupportedLanguage(String),

    /// The file path has no extension, so no language can be resolved
    #[error("file \"{}\" has no extension and cannot be scanned", .0.display())]
    MissingExtension(PathBuf),

    /// The file could not be opened or read
    #[error("failed to read \"{}\"", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Matcher construction failed for a language. Configured tokens are
    /// escaped before compilation, so this points at a configuration the
    /// regex engine cannot accept (e.g. a pathologically large table).
    #[error("failed to build matcher for language \"{language}\"")]
    Pattern {
        language: String,
        #[source]
        source: regex::Error,
    },
}

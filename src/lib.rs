//! Quarry - dig marker comments out of your source files
//!
//! A CLI tool that extracts marker comments (TODO, FIXME, or any
//! configured keyword) from source files and groups them into
//! user-defined categories for display.
//!
//! # Features
//!
//! - Per-language comment syntax, configurable via TOML
//! - User-defined categories with their own marker keywords
//! - Line-numbered, per-file results grouped by category
//! - Output as markdown, terminal tables, or JSON
//! - Parallel scanning across files
//!
//! # Example
//!
//! ```rust,no_run
//! use quarry::{LanguageRegistry, Scanner};
//! use quarry::models::default_categories;
//! use std::path::Path;
//!
//! let scanner = Scanner::new(LanguageRegistry::default(), default_categories());
//! let record = scanner.scan_file(Path::new("src/main.rs")).unwrap();
//! for category in &record.categories {
//!     println!("{}: {} comments", category.name, category.comments.len());
//! }
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod languages;
pub mod matcher;
pub mod models;
pub mod reporter;
pub mod scanner;

// Re-export commonly used types
pub use config::Config;
pub use error::ScanError;
pub use languages::{Language, LanguageRegistry};
pub use models::{Category, Comment, FileRecord, ScanReport};
pub use scanner::Scanner;

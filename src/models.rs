use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// One matched marker occurrence within a file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    /// The marker keyword that matched (TODO, FIXME, ...)
    pub marker: String,

    /// Free text following the keyword, trimmed of leading whitespace
    pub content: String,

    /// Line number where the match occurred (1-indexed)
    pub line: usize,
}

/// A user-defined grouping of marker comments
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Display label (e.g. "To Do")
    pub name: String,

    /// Keyword the scanner looks for after a language's inline comment
    /// token (e.g. "TODO"); must be unique within a category table
    pub marker: String,

    /// Matched comments, in ascending line order
    #[serde(default)]
    pub comments: Vec<Comment>,
}

impl Category {
    pub fn new(name: impl Into<String>, marker: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            marker: marker.into(),
            comments: Vec::new(),
        }
    }
}

/// Default category table used when no configuration supplies one
pub fn default_categories() -> Vec<Category> {
    vec![Category::new("To Do", "TODO"), Category::new("Fix Me", "FIXME")]
}

/// The complete scan result for one file: the path as given by the
/// caller plus a populated copy of the category table.
///
/// Every category from the input table is present, in input order,
/// even when it collected no comments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRecord {
    pub path: PathBuf,
    pub categories: Vec<Category>,
}

impl FileRecord {
    /// Total matched comments across all categories
    pub fn comment_count(&self) -> usize {
        self.categories.iter().map(|c| c.comments.len()).sum()
    }

    /// True if no category collected any comment
    pub fn is_empty(&self) -> bool {
        self.comment_count() == 0
    }
}

/// Aggregated results of one run across all scanned files
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanReport {
    /// Per-file records, in input order
    pub files: Vec<FileRecord>,

    /// Total number of matched comments
    pub total_count: usize,

    /// Count of comments per category display name
    pub by_category: HashMap<String, usize>,

    /// When the scan was performed
    pub scan_time: DateTime<Utc>,
}

impl ScanReport {
    pub fn new(files: Vec<FileRecord>) -> Self {
        let mut total_count = 0;
        let mut by_category: HashMap<String, usize> = HashMap::new();

        for record in &files {
            for category in &record.categories {
                total_count += category.comments.len();
                *by_category.entry(category.name.clone()).or_insert(0) +=
                    category.comments.len();
            }
        }

        Self {
            files,
            total_count,
            by_category,
            scan_time: Utc::now(),
        }
    }
}

use crate::error::ScanError;
use crate::languages::LanguageRegistry;
use crate::matcher::MatcherCache;
use crate::models::{Category, Comment, FileRecord};
use rayon::prelude::*;
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

/// The extraction engine: resolves a file's language, matches marker
/// comments line by line, and groups them into a per-file copy of the
/// category table.
///
/// Holds no per-file state. The matcher cache is the only thing shared
/// between scans, so one `Scanner` can drive many files, sequentially or
/// in parallel.
pub struct Scanner {
    registry: LanguageRegistry,
    categories: Vec<Category>,
    cache: MatcherCache,
}

impl Scanner {
    /// Create a scanner from an immutable language registry and a
    /// category template. The template's comment lists should be empty;
    /// each scanned file gets its own populated copy.
    pub fn new(registry: LanguageRegistry, categories: Vec<Category>) -> Self {
        Self {
            registry,
            categories,
            cache: MatcherCache::new(),
        }
    }

    pub fn registry(&self) -> &LanguageRegistry {
        &self.registry
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Scan one file for marker comments.
    ///
    /// Fails with `MissingExtension`, `UnsupportedLanguage`, or `Io`;
    /// all are recoverable and the caller may skip the file. The
    /// returned record contains every category from the template, in
    /// template order, even when empty.
    pub fn scan_file(&self, path: &Path) -> Result<FileRecord, ScanError> {
        let extension = extension_of(path)?;
        let language = self.registry.resolve(&extension)?;

        let matcher =
            self.cache
                .build_or_get(language, &self.categories)
                .map_err(|source| ScanError::Pattern {
                    language: language.name.clone(),
                    source,
                })?;

        let file = File::open(path).map_err(|source| ScanError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let reader = BufReader::new(file);

        let mut categories = self.categories.clone();
        let index_by_marker: HashMap<&str, usize> = self
            .categories
            .iter()
            .enumerate()
            .map(|(i, category)| (category.marker.as_str(), i))
            .collect();

        for (line_idx, line_result) in reader.lines().enumerate() {
            let line = match line_result {
                Ok(line) => line,
                // unreadable line (likely binary content); the counter
                // still advances via enumerate
                Err(_) => continue,
            };

            let Some(caps) = matcher.captures(&line) else {
                continue;
            };

            let marker = &caps["marker"];
            let comment = Comment {
                marker: marker.to_string(),
                content: caps["content"].trim().to_string(),
                line: line_idx + 1,
            };

            match index_by_marker.get(marker) {
                Some(&index) => categories[index].comments.push(comment),
                // the matcher only knows markers taken from the table,
                // so this is an internal inconsistency; signal and skip
                None => eprintln!(
                    "warning: matched marker \"{}\" has no category entry ({}:{})",
                    marker,
                    path.display(),
                    line_idx + 1
                ),
            }
        }

        Ok(assemble(path, categories))
    }

    /// Scan many files in parallel, one worker per file. Results come
    /// back in input order; each entry is that file's record or its
    /// recoverable error.
    pub fn scan_files(&self, paths: &[PathBuf]) -> Vec<Result<FileRecord, ScanError>> {
        paths.par_iter().map(|path| self.scan_file(path)).collect()
    }
}

/// Wrap per-file results into the engine's output unit, preserving the
/// category table's ordering.
fn assemble(path: &Path, categories: Vec<Category>) -> FileRecord {
    FileRecord {
        path: path.to_path_buf(),
        categories,
    }
}

/// Extract a path's extension, lower-cased and without the leading dot
fn extension_of(path: &Path) -> Result<String, ScanError> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase())
        .ok_or_else(|| ScanError::MissingExtension(path.to_path_buf()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::default_categories;
    use std::io::Write;
    use tempfile::TempDir;

    fn scanner() -> Scanner {
        Scanner::new(LanguageRegistry::default(), default_categories())
    }

    fn write_file(dir: &TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        let mut file = File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_scan_python_file() {
        let dir = TempDir::new().unwrap();
        let path = write_file(
            &dir,
            "example.py",
            "x = 1\n# TODO refactor this\ny = 2\n# FIXME off-by-one\n",
        );

        let record = scanner().scan_file(&path).unwrap();

        assert_eq!(record.path, path);
        assert_eq!(record.categories.len(), 2);

        let todo = &record.categories[0];
        assert_eq!(todo.name, "To Do");
        assert_eq!(todo.comments.len(), 1);
        assert_eq!(todo.comments[0].content, "refactor this");
        assert_eq!(todo.comments[0].line, 2);

        let fixme = &record.categories[1];
        assert_eq!(fixme.name, "Fix Me");
        assert_eq!(fixme.comments.len(), 1);
        assert_eq!(fixme.comments[0].content, "off-by-one");
        assert_eq!(fixme.comments[0].line, 4);
    }

    #[test]
    fn test_blank_lines_advance_counter() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "late.py", "\n\n\n\n# TODO finally\n");

        let record = scanner().scan_file(&path).unwrap();
        assert_eq!(record.categories[0].comments[0].line, 5);
    }

    #[test]
    fn test_invalid_utf8_line_advances_counter() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("mixed.py");
        std::fs::write(&path, b"x = 1\n\xff\xfe\n# TODO after binary\n").unwrap();

        let record = scanner().scan_file(&path).unwrap();
        let todo = &record.categories[0];
        assert_eq!(todo.comments.len(), 1);
        assert_eq!(todo.comments[0].content, "after binary");
        assert_eq!(todo.comments[0].line, 3);
    }

    #[test]
    fn test_order_preserved_within_category() {
        let dir = TempDir::new().unwrap();
        let path = write_file(
            &dir,
            "ordered.go",
            "// TODO first\npackage main\n\n// TODO second\n",
        );

        let record = scanner().scan_file(&path).unwrap();
        let lines: Vec<usize> = record.categories[0]
            .comments
            .iter()
            .map(|c| c.line)
            .collect();
        assert_eq!(lines, vec![1, 4]);
        assert_eq!(record.categories[0].comments[0].content, "first");
        assert_eq!(record.categories[0].comments[1].content, "second");
    }

    #[test]
    fn test_no_markers_yields_empty_categories() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "clean.rs", "fn main() {}\n");

        let record = scanner().scan_file(&path).unwrap();
        assert_eq!(record.categories.len(), 2);
        assert!(record.categories.iter().all(|c| c.comments.is_empty()));
        assert_eq!(record.categories[0].name, "To Do");
        assert_eq!(record.categories[1].name, "Fix Me");
    }

    #[test]
    fn test_unsupported_extension() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "notes.zig", "// TODO port\n");

        let err = scanner().scan_file(&path).unwrap_err();
        assert!(matches!(err, ScanError::UnsupportedLanguage(ext) if ext == "zig"));
    }

    #[test]
    fn test_missing_extension() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "Makefile", "# TODO targets\n");

        let err = scanner().scan_file(&path).unwrap_err();
        assert!(matches!(err, ScanError::MissingExtension(_)));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = scanner()
            .scan_file(Path::new("/nonexistent/ghost.py"))
            .unwrap_err();
        assert!(matches!(err, ScanError::Io { .. }));
    }

    #[test]
    fn test_scan_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "twice.py", "# TODO again\n# FIXME and again\n");

        let scanner = scanner();
        let first = scanner.scan_file(&path).unwrap();
        let second = scanner.scan_file(&path).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_template_not_mutated_across_files() {
        let dir = TempDir::new().unwrap();
        let a = write_file(&dir, "a.py", "# TODO in a\n");
        let b = write_file(&dir, "b.py", "# TODO in b\n");

        let scanner = scanner();
        let record_a = scanner.scan_file(&a).unwrap();
        let record_b = scanner.scan_file(&b).unwrap();

        assert_eq!(record_a.categories[0].comments.len(), 1);
        assert_eq!(record_b.categories[0].comments.len(), 1);
        assert_eq!(record_b.categories[0].comments[0].content, "in b");
        assert!(scanner.categories()[0].comments.is_empty());
    }

    #[test]
    fn test_scan_files_preserves_input_order() {
        let dir = TempDir::new().unwrap();
        let paths = vec![
            write_file(&dir, "one.py", "# TODO one\n"),
            write_file(&dir, "two.go", "// FIXME two\n"),
            write_file(&dir, "three.rs", "// TODO three\n"),
        ];

        let results = scanner().scan_files(&paths);
        assert_eq!(results.len(), 3);
        for (path, result) in paths.iter().zip(&results) {
            assert_eq!(&result.as_ref().unwrap().path, path);
        }
    }

    #[test]
    fn test_extension_of() {
        assert_eq!(extension_of(Path::new("a/b/file.PY")).unwrap(), "py");
        assert!(extension_of(Path::new("a/b/file")).is_err());
    }
}

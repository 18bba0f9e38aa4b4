use crate::languages::Language;
use crate::models::Category;
use regex::Regex;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Build the matcher for one language and category table.
///
/// The pattern recognizes the language's inline comment token, optional
/// spaces, one of the category markers (alternated in table order), more
/// optional spaces, then captures the rest of the line as content. All
/// configured tokens are escaped, so user input never changes the regex
/// structure.
///
/// A language with no inline token gets a matcher that can never match:
/// block-comment-only languages pass through the pipeline and simply
/// yield zero comments.
pub fn build_matcher(language: &Language, categories: &[Category]) -> Result<Regex, regex::Error> {
    if language.inline.is_empty() {
        // empty character class matches nothing
        return Regex::new(r"[^\s\S]");
    }

    let markers = categories
        .iter()
        .map(|category| regex::escape(&category.marker))
        .collect::<Vec<_>>()
        .join("|");

    Regex::new(&format!(
        "{} *(?P<marker>{}) *(?P<content>.*)",
        regex::escape(&language.inline),
        markers
    ))
}

/// Memoizes compiled matchers per language name.
///
/// Caching is a throughput optimization for runs that scan many files of
/// the same language; correctness does not depend on it. The map is the
/// only state shared between parallel file scans: concurrent misses for
/// the same language may each build a matcher, and the last write wins,
/// which is safe because matchers built from the same inputs are
/// equivalent.
#[derive(Debug, Default)]
pub struct MatcherCache {
    matchers: Mutex<HashMap<String, Arc<Regex>>>,
}

impl MatcherCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached matcher for this language, building and caching
    /// it on first use.
    pub fn build_or_get(
        &self,
        language: &Language,
        categories: &[Category],
    ) -> Result<Arc<Regex>, regex::Error> {
        let mut matchers = self.matchers.lock().unwrap_or_else(|e| e.into_inner());

        if let Some(matcher) = matchers.get(&language.name) {
            return Ok(Arc::clone(matcher));
        }

        let matcher = Arc::new(build_matcher(language, categories)?);
        matchers.insert(language.name.clone(), Arc::clone(&matcher));
        Ok(matcher)
    }
}

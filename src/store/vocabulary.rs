//! Tag vocabulary offered when tagging by hand
//!
//! Built from the classifier label files that ship with the tagger. Either
//! file may be missing.

use std::path::Path;

/// How many tags [`TagVocabulary::suggestions`] offers
pub const SUGGESTION_LIMIT: usize = 25;

/// Sorted, case-insensitively unique list of known tags
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagVocabulary {
    tags: Vec<String>,
}

impl TagVocabulary {
    /// Load label files in order; the first spelling of a tag wins
    #[must_use]
    pub fn load<P: AsRef<Path>>(files: &[P]) -> Self {
        let mut lines = Vec::new();
        for file in files {
            let file = file.as_ref();
            match std::fs::read_to_string(file) {
                Ok(text) => lines.extend(text.lines().map(str::to_owned)),
                Err(e) => tracing::debug!(path = %file.display(), error = %e, "label file skipped"),
            }
        }
        Self::from_lines(lines)
    }

    #[must_use]
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = std::collections::HashSet::new();
        let mut tags: Vec<String> = lines
            .into_iter()
            .filter_map(|line| {
                let tag = line.as_ref().trim();
                (!tag.is_empty() && seen.insert(tag.to_lowercase())).then(|| tag.to_owned())
            })
            .collect();
        tags.sort_by_cached_key(|t| t.to_lowercase());
        Self { tags }
    }

    #[must_use]
    pub fn all(&self) -> &[String] {
        &self.tags
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tags.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// The first tags in sort order, shown before the user types anything
    #[must_use]
    pub fn suggestions(&self) -> &[String] {
        &self.tags[..self.tags.len().min(SUGGESTION_LIMIT)]
    }

    /// Every tag containing `query`, ignoring case
    #[must_use]
    pub fn filter(&self, query: &str) -> Vec<&str> {
        let query = query.to_lowercase();
        self.tags
            .iter()
            .filter(|t| t.to_lowercase().contains(&query))
            .map(String::as_str)
            .collect()
    }
}

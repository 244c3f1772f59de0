//! Word splitters that derive normalized search words from values.

use std::collections::BTreeSet;

use regex::Regex;

use crate::analysis::normalize::normalize;
use crate::error::{PresageError, Result};

/// The default pattern for extracting subwords from a normalized string.
pub const DEFAULT_SUBWORD_PATTERN: &str = "[a-z0-9]+";

/// Trait for splitters that derive a set of search words from a value.
pub trait WordSplitter<T: ?Sized>: Send + Sync {
    /// Split the given value into a duplicate-free set of normalized words.
    ///
    /// Returns `None` when the value yields no string to split at all, and
    /// an empty set when the string contains no word matches.
    fn split(&self, value: &T) -> Option<BTreeSet<String>>;
}

/// A regex-based [`WordSplitter`] over string-valued models.
///
/// The splitter projects a string out of the model, lowercases it, folds
/// Unicode characters to their ASCII form (enabled by default), and collects
/// every match of the subword pattern.
///
/// This splitter also implements
/// [`SubwordHighlighter`](crate::highlight::SubwordHighlighter), since the
/// subword pattern and the normalization flag are exactly what highlighting
/// needs; the default index configuration uses one instance for both jobs.
pub struct StringWordSplitter<T: ?Sized> {
    /// Projection from a model to its indexable string.
    projection: Box<dyn Fn(&T) -> Option<String> + Send + Sync>,
    /// The pattern identifying subwords in the normalized string.
    pattern: Regex,
    /// Whether Unicode characters are folded to ASCII.
    normalize_unicode: bool,
}

impl<T: ?Sized> StringWordSplitter<T> {
    /// Create a splitter with the default subword pattern and Unicode
    /// folding enabled.
    pub fn new(projection: impl Fn(&T) -> Option<String> + Send + Sync + 'static) -> Self {
        Self::with_options(projection, None, true).expect("default subword pattern should be valid")
    }

    /// Create a splitter with a custom subword pattern.
    ///
    /// Passing `None` as pattern selects [`DEFAULT_SUBWORD_PATTERN`]. The
    /// pattern is matched against the lowercased (and, unless disabled,
    /// ASCII-folded) string, so it should describe lowercase words.
    pub fn with_options(
        projection: impl Fn(&T) -> Option<String> + Send + Sync + 'static,
        pattern: Option<&str>,
        normalize_unicode: bool,
    ) -> Result<Self> {
        let pattern = pattern.unwrap_or(DEFAULT_SUBWORD_PATTERN);
        let pattern = Regex::new(pattern)
            .map_err(|e| PresageError::analysis(format!("Invalid subword pattern: {e}")))?;
        Ok(StringWordSplitter {
            projection: Box::new(projection),
            pattern,
            normalize_unicode,
        })
    }

    /// Get the subword pattern used by this splitter.
    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }

    /// Check if this splitter folds Unicode characters to ASCII.
    pub fn normalize_unicode(&self) -> bool {
        self.normalize_unicode
    }

    pub(crate) fn subword_regex(&self) -> &Regex {
        &self.pattern
    }
}

impl StringWordSplitter<str> {
    /// A splitter over plain strings, using the whole string as its own
    /// projection. This is the default splitter for query strings.
    pub fn identity() -> Self {
        Self::new(|value: &str| Some(value.to_owned()))
    }
}

impl<T: ?Sized> WordSplitter<T> for StringWordSplitter<T> {
    fn split(&self, value: &T) -> Option<BTreeSet<String>> {
        let raw = (self.projection)(value)?;
        let normalized = normalize(&raw, self.normalize_unicode, &[]);
        Some(
            self.pattern
                .find_iter(normalized.text())
                .map(|m| m.as_str().to_owned())
                .collect(),
        )
    }
}

impl<T: ?Sized> std::fmt::Debug for StringWordSplitter<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StringWordSplitter")
            .field("pattern", &self.pattern.as_str())
            .field("normalize_unicode", &self.normalize_unicode)
            .finish()
    }
}

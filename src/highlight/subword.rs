//! Locating query-word prefixes inside values.

use std::collections::BTreeSet;
use std::ops::Range;
use std::sync::OnceLock;

use regex::Regex;

use crate::analysis::normalize::normalize;
use crate::analysis::splitter::StringWordSplitter;
use crate::highlight::highlighted::{Highlight, HighlightedString};

/// Pattern recognizing a simple HTML tag: an opening or closing tag with a
/// lowercase name and no attributes. Anything else (uppercase names,
/// attributes, self-closing tags, comments, entities) is treated as literal
/// text.
pub const SIMPLE_TAG_PATTERN: &str = "</?[a-z]+>";

fn simple_tag_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(SIMPLE_TAG_PATTERN).expect("tag pattern should be valid"))
}

/// Trait for highlighters that locate query-word prefixes in a value and
/// mark them in the original string.
pub trait SubwordHighlighter: Send + Sync {
    /// Highlight every subword of `value` starting with one of the query
    /// words.
    fn highlight_subword_prefixes(
        &self,
        value: &str,
        query_words: &BTreeSet<String>,
    ) -> HighlightedString;

    /// Like [`Self::highlight_subword_prefixes`], but treat `value` as HTML
    /// with simple tags: tags are invisible to matching and never end up
    /// inside a highlighted segment.
    fn highlight_subword_prefixes_html(
        &self,
        value: &str,
        query_words: &BTreeSet<String>,
    ) -> HighlightedString;
}

impl<T: ?Sized> SubwordHighlighter for StringWordSplitter<T> {
    fn highlight_subword_prefixes(
        &self,
        value: &str,
        query_words: &BTreeSet<String>,
    ) -> HighlightedString {
        self.highlight_prefixes(value, query_words, false)
    }

    fn highlight_subword_prefixes_html(
        &self,
        value: &str,
        query_words: &BTreeSet<String>,
    ) -> HighlightedString {
        self.highlight_prefixes(value, query_words, true)
    }
}

impl<T: ?Sized> StringWordSplitter<T> {
    fn highlight_prefixes(
        &self,
        value: &str,
        query_words: &BTreeSet<String>,
        html: bool,
    ) -> HighlightedString {
        if query_words.is_empty() || value.trim().is_empty() {
            return HighlightedString::new(value);
        }

        // Longer query words win at the same position, so longer hits mask
        // their own prefixes; ties break lexicographically.
        let mut words_by_length: Vec<&str> = query_words.iter().map(String::as_str).collect();
        words_by_length.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));

        let tag_spans: Vec<Range<usize>> = if html {
            simple_tag_regex()
                .find_iter(value)
                .map(|m| m.range())
                .collect()
        } else {
            Vec::new()
        };

        // HTML mode always folds, so tag-adjacent matches behave the same
        // with and without normalization configured.
        let normalized = normalize(value, self.normalize_unicode() || html, &tag_spans);
        let text = normalized.text();

        let mut highlights = Vec::new();
        for subword in self.subword_regex().find_iter(text) {
            let start = subword.start();
            for query_word in &words_by_length {
                if text[start..].starts_with(query_word) {
                    let span = normalized.map_span(start..start + query_word.len());
                    if span.end > span.start {
                        highlights.push(Highlight::new(span.start, span.end - span.start));
                    }
                    break;
                }
            }
        }

        if html {
            highlights = carve_out_tags(value, &highlights);
        }

        HighlightedString::with_highlights(value, highlights)
    }
}

/// Subdivide highlights around the simple tags they cover, so that tags stay
/// outside highlighted segments.
fn carve_out_tags(value: &str, highlights: &[Highlight]) -> Vec<Highlight> {
    let regex = simple_tag_regex();
    let mut result = Vec::new();
    for highlight in highlights {
        let covered = &value[highlight.start()..highlight.end()];
        let mut last = 0;
        for tag in regex.find_iter(covered) {
            if last < tag.start() {
                result.push(Highlight::new(highlight.start() + last, tag.start() - last));
            }
            last = tag.end();
        }
        if last < covered.len() {
            result.push(Highlight::new(highlight.start() + last, covered.len() - last));
        }
    }
    result
}

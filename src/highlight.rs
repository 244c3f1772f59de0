//! Highlighting of query matches inside result values.
//!
//! A [`HighlightedString`] pairs an original value with the intervals a
//! query matched; [`HighlightedString::segments`] resolves it into an
//! ordered list of highlighted and plain runs. The [`SubwordHighlighter`]
//! trait produces highlighted strings from a value and a set of query
//! words, with a plain-text mode and an HTML-aware mode.

pub mod highlighted;
pub mod subword;

pub use highlighted::{Highlight, HighlightSegment, HighlightedString};
pub use subword::SubwordHighlighter;

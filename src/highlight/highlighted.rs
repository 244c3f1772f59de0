//! Highlighted string values and their segmentation.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

/// A highlighted interval inside a string, in bytes of the original value.
///
/// Highlights are ordered by start position ascending; ties are broken with
/// the longest highlight first, so the segmentation consumes shorter
/// duplicates without emitting adjacent highlighted segments.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Highlight {
    start: usize,
    length: usize,
}

impl Highlight {
    /// Create a highlighted interval.
    ///
    /// # Panics
    /// Panics if `length` is zero; an empty highlight is a programming
    /// error.
    pub fn new(start: usize, length: usize) -> Self {
        assert!(length >= 1, "highlight length must be positive");
        Highlight { start, length }
    }

    /// Start position of the interval, in bytes.
    pub fn start(&self) -> usize {
        self.start
    }

    /// Length of the interval, in bytes.
    pub fn length(&self) -> usize {
        self.length
    }

    /// Position one past the end of the interval, in bytes.
    pub fn end(&self) -> usize {
        self.start + self.length
    }
}

impl Ord for Highlight {
    fn cmp(&self, other: &Self) -> Ordering {
        self.start
            .cmp(&other.start)
            .then_with(|| other.length.cmp(&self.length))
    }
}

impl PartialOrd for Highlight {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// A contiguous run of a value, tagged as highlighted or not.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighlightSegment {
    text: String,
    highlighted: bool,
}

impl HighlightSegment {
    /// Create a segment.
    pub fn new(text: impl Into<String>, highlighted: bool) -> Self {
        HighlightSegment {
            text: text.into(),
            highlighted,
        }
    }

    /// The text of this segment.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// True if this segment should be rendered emphasized.
    pub fn is_highlighted(&self) -> bool {
        self.highlighted
    }
}

/// An immutable string value together with the intervals to highlight.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct HighlightedString {
    value: String,
    highlights: Vec<Highlight>,
}

impl HighlightedString {
    /// Create a highlighted string without any highlights.
    pub fn new(value: impl Into<String>) -> Self {
        HighlightedString {
            value: value.into(),
            highlights: Vec::new(),
        }
    }

    /// Create a highlighted string from a value and its highlights.
    ///
    /// The highlights are sorted and de-duplicated; overlaps and intervals
    /// exceeding the value are tolerated and resolved by
    /// [`Self::segments`].
    pub fn with_highlights(value: impl Into<String>, mut highlights: Vec<Highlight>) -> Self {
        highlights.sort();
        highlights.dedup();
        HighlightedString {
            value: value.into(),
            highlights,
        }
    }

    /// The original value.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// The highlight intervals, ordered.
    pub fn highlights(&self) -> &[Highlight] {
        &self.highlights
    }

    /// Check if any interval is highlighted.
    pub fn has_highlights(&self) -> bool {
        !self.highlights.is_empty()
    }

    /// Resolve the highlights into an ordered list of segments.
    ///
    /// The segments are disjoint and concatenate to the original value, and
    /// adjacent segments never share the same highlight state. Overlapping
    /// highlights are clipped against their predecessors, and highlights
    /// reaching past the end of the value are clipped to it. An empty value
    /// yields no segments at all.
    pub fn segments(&self) -> Vec<HighlightSegment> {
        let mut result = Vec::new();
        if self.value.is_empty() {
            return result;
        }
        if self.highlights.is_empty() {
            result.push(HighlightSegment::new(self.value.clone(), false));
            return result;
        }

        let max = self.value.len();
        let mut pos = 0;
        for highlight in &self.highlights {
            let mut start = highlight.start();
            let mut length = highlight.length();
            if start < pos {
                // Overlaps the previous highlight; skip the overlapping part.
                length = length.saturating_sub(pos - start);
                start = pos;
                if length == 0 {
                    continue;
                }
            }
            if start >= max {
                // Out of range, and so is everything after it.
                break;
            }
            // Clip to the end of the value.
            length = length.min(max - start);
            if length == 0 {
                continue;
            }

            if start > pos {
                result.push(HighlightSegment::new(&self.value[pos..start], false));
                pos = start;
            }
            let piece = &self.value[pos..pos + length];
            match result.last_mut() {
                // A clipped overlap can abut the previous highlight; grow it
                // instead of emitting two adjacent highlighted segments.
                Some(last) if last.highlighted => last.text.push_str(piece),
                _ => result.push(HighlightSegment::new(piece, true)),
            }
            pos += length;
        }

        if pos < max {
            result.push(HighlightSegment::new(&self.value[pos..], false));
        }

        result
    }
}

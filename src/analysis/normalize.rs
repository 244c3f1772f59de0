//! Lowercasing and ASCII folding with position tracking.
//!
//! Both the word splitter and the subword highlighter funnel text through
//! [`normalize`], so the index and the highlighter always agree on what a
//! string looks like after normalization. The highlighter additionally needs
//! to translate match positions in the normalized text back to byte positions
//! in the original string; [`NormalizedText`] carries the position map for
//! that.

use std::ops::Range;

use deunicode::deunicode_char;

/// A normalized view of a string together with a map back to the original.
///
/// The map has `text.len() + 1` entries. Entry `i` is the byte position in
/// the original string that corresponds to byte position `i` of the
/// normalized text, so both the start and the end of any span in the
/// normalized text can be translated.
#[derive(Debug, Clone)]
pub struct NormalizedText {
    text: String,
    map: Vec<usize>,
}

impl NormalizedText {
    /// The normalized text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Translate a byte position in the normalized text to a byte position
    /// in the original string.
    pub fn map_position(&self, pos: usize) -> usize {
        self.map[pos]
    }

    /// Translate a span in the normalized text to a span in the original
    /// string.
    ///
    /// The resulting span may be wider than the input (a folded character
    /// covers all original bytes it was derived from) or collapse to zero
    /// width when the input covers only trailing bytes of a one-to-many
    /// fold expansion.
    pub fn map_span(&self, span: Range<usize>) -> Range<usize> {
        self.map[span.start]..self.map[span.end]
    }
}

/// Normalize a string: lowercase every character and, if `fold` is set,
/// transliterate it to its ASCII form.
///
/// Byte ranges listed in `skip_spans` (sorted, non-overlapping) contribute
/// nothing to the normalized text; the position map steps over them. The
/// highlighter uses this to drop HTML tags from the normalized view.
///
/// Every byte emitted for an original character maps to the position *after*
/// that character, and position 0 maps to 0. A span translated with
/// [`NormalizedText::map_span`] therefore always covers whole characters of
/// the original string.
pub fn normalize(value: &str, fold: bool, skip_spans: &[Range<usize>]) -> NormalizedText {
    let mut text = String::with_capacity(value.len());
    let mut map = Vec::with_capacity(value.len() + 1);
    map.push(0);

    let mut spans = skip_spans.iter();
    let mut next_span = spans.next();
    let mut skip_until = 0;

    for (pos, ch) in value.char_indices() {
        if let Some(span) = next_span {
            if pos == span.start {
                skip_until = span.end;
                next_span = spans.next();
            }
        }
        if pos < skip_until {
            continue;
        }

        let char_end = pos + ch.len_utf8();
        let before = text.len();
        for lowered in ch.to_lowercase() {
            if fold {
                fold_into(lowered, &mut text);
            } else {
                text.push(lowered);
            }
        }
        for _ in before..text.len() {
            map.push(char_end);
        }
    }

    NormalizedText { text, map }
}

/// Fold a single character to its ASCII form and append it to `out`.
///
/// ASCII characters pass through unchanged. Folded output is ASCII-lowercased
/// so transliterations stay matchable by lowercase subword patterns.
/// Characters without an ASCII mapping are kept verbatim.
fn fold_into(ch: char, out: &mut String) {
    if ch.is_ascii() {
        out.push(ch);
        return;
    }
    match deunicode_char(ch) {
        Some(folded) => {
            for c in folded.chars() {
                out.push(c.to_ascii_lowercase());
            }
        }
        None => out.push(ch),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_ascii_is_identity() {
        let norm = normalize("hello world", true, &[]);
        assert_eq!(norm.text(), "hello world");
        assert_eq!(norm.map_span(0..5), 0..5);
        assert_eq!(norm.map_span(6..11), 6..11);
    }

    #[test]
    fn test_lowercasing() {
        let norm = normalize("Hello World", true, &[]);
        assert_eq!(norm.text(), "hello world");
    }

    #[test]
    fn test_diacritics_fold_to_ascii() {
        let norm = normalize("García Coruña", true, &[]);
        assert_eq!(norm.text(), "garcia coruna");
    }

    #[test]
    fn test_sharp_s_expands() {
        let norm = normalize("Maß", true, &[]);
        assert_eq!(norm.text(), "mass");
        // The span covering all of "mass" maps back to all of "Maß".
        assert_eq!(norm.map_span(0..4), 0.."Maß".len());
    }

    #[test]
    fn test_expansion_maps_past_source_char() {
        // "ß" occupies bytes 1..3 of "aßb" and folds to "ss".
        let norm = normalize("aßb", true, &[]);
        assert_eq!(norm.text(), "assb");
        // Both bytes of "ss" map past the "ß".
        assert_eq!(norm.map_position(2), 3);
        assert_eq!(norm.map_position(3), 3);
        assert_eq!(norm.map_position(4), 4);
    }

    #[test]
    fn test_no_fold_keeps_unicode() {
        let norm = normalize("Gefährten", false, &[]);
        assert_eq!(norm.text(), "gefährten");
    }

    #[test]
    fn test_skip_spans_step_over_tags() {
        let value = "a<b>c</b>";
        let norm = normalize(value, true, &[1..4, 5..9]);
        assert_eq!(norm.text(), "ac");
        // A span starting after "a" maps to the tag start; the skipped tag
        // contributes no positions of its own.
        assert_eq!(norm.map_position(1), 1);
        assert_eq!(norm.map_position(2), 5);
    }

    #[test]
    fn test_position_zero_maps_to_zero() {
        let norm = normalize("<i>x</i>", true, &[0..3, 4..8]);
        assert_eq!(norm.text(), "x");
        assert_eq!(norm.map_position(0), 0);
    }

    #[test]
    fn test_empty_input() {
        let norm = normalize("", true, &[]);
        assert_eq!(norm.text(), "");
        assert_eq!(norm.map_position(0), 0);
    }
}

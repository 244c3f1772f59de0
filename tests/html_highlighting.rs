//! Integration tests for the HTML-mode highlighting of query matches.

use presage::highlight::HighlightedString;
use presage::index::TriePrefixIndex;

fn index() -> TriePrefixIndex<String> {
    TriePrefixIndex::new(|s: &String| Some(s.clone()))
}

fn segments(hs: &HighlightedString) -> Vec<(String, bool)> {
    hs.segments()
        .iter()
        .map(|s| (s.text().to_owned(), s.is_highlighted()))
        .collect()
}

fn check(value: &str, query: &str, expected: &[(&str, bool)]) {
    let hs = index().get_highlighted_html(value, query);
    let expected: Vec<(String, bool)> = expected
        .iter()
        .map(|(text, hl)| (text.to_string(), *hl))
        .collect();
    assert_eq!(segments(&hs), expected, "value {value:?}, query {query:?}");
}

#[test]
fn behaves_like_text_mode_without_tags() {
    check("", "test", &[]);
    check("qwertzuiop", "qwer", &[("qwer", true), ("tzuiop", false)]);
    check("vbnm hjkl uiop", "jkl", &[("vbnm hjkl uiop", false)]);
    check(
        "Hans-Dieter Meier",
        "Hans-Dieter Meier",
        &[
            ("Hans", true),
            ("-", false),
            ("Dieter", true),
            (" ", false),
            ("Meier", true),
        ],
    );
    check(
        "García Coruña",
        "garcia cöruná",
        &[("García", true), (" ", false), ("Coruña", true)],
    );
    check(
        "Der Haß ist krass ohne Maß.",
        "kraß mass",
        &[
            ("Der Haß ist ", false),
            ("krass", true),
            (" ohne ", false),
            ("Maß", true),
            (".", false),
        ],
    );
}

#[test]
fn tags_never_appear_inside_highlights() {
    check(
        "<i>Tag1 <b>Tag2</b></i>",
        "TAG",
        &[
            ("<i>", false),
            ("Tag", true),
            ("1 <b>", false),
            ("Tag", true),
            ("2</b></i>", false),
        ],
    );
}

#[test]
fn words_are_matched_across_tag_boundaries() {
    check(
        "Foo <b>foobar</b> foo<i>baz</i>",
        "foo",
        &[
            ("Foo", true),
            (" <b>", false),
            ("foo", true),
            ("bar</b> ", false),
            ("foo", true),
            ("<i>baz</i>", false),
        ],
    );
    check(
        "H<sub>2</sub>O H<sub>2</sub>SO<sub>4</sub>",
        "H2S",
        &[
            ("H<sub>2</sub>O ", false),
            ("H", true),
            ("<sub>", false),
            ("2", true),
            ("</sub>", false),
            ("S", true),
            ("O<sub>4</sub>", false),
        ],
    );
    check(
        "<b>A<i>B</i>C<span></span>D</b>E",
        "abcde",
        &[
            ("<b>", false),
            ("A", true),
            ("<i>", false),
            ("B", true),
            ("</i>", false),
            ("C", true),
            ("<span></span>", false),
            ("D", true),
            ("</b>", false),
            ("E", true),
        ],
    );
}

#[test]
fn folding_works_through_tags() {
    check(
        "<strong>Gernot Haßknecht</strong>",
        "hass",
        &[
            ("<strong>Gernot ", false),
            ("Haß", true),
            ("knecht</strong>", false),
        ],
    );
}

#[test]
fn only_simple_tags_are_recognized() {
    // Attributes keep a tag from being recognized; it is plain text.
    check(
        "<a href='x'>link</a>",
        "link",
        &[("<a href='x'>", false), ("link", true), ("</a>", false)],
    );
    // The text of an unrecognized tag is searchable like any other text.
    check(
        "before <DIV> after",
        "div",
        &[("before <", false), ("DIV", true), ("> after", false)],
    );
}

#[test]
fn html_segments_concatenate_to_the_original_value() {
    let values = [
        "<i>Tag1 <b>Tag2</b></i>",
        "H<sub>2</sub>O H<sub>2</sub>SO<sub>4</sub>",
        "<b>A<i>B</i>C<span></span>D</b>E",
        "<strong>Gernot Haßknecht</strong>",
    ];
    let queries = ["tag", "h2s", "abcde", "hass", "zzz"];
    for value in values {
        for query in queries {
            let hs = index().get_highlighted_html(value, query);
            let rebuilt: String = hs.segments().iter().map(|s| s.text().to_owned()).collect();
            assert_eq!(rebuilt, value, "query {query:?}");
        }
    }
}

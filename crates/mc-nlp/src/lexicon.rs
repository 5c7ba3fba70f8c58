//! Static keyword tables: command families, shapes, colors, hatch patterns.

use std::cmp::Reverse;
use std::sync::LazyLock;

use mc_protocol::Shape;

use crate::classify::CommandFamily;

/// Verbs that mark a draw command (and, before `layer`, a layer creation).
pub(crate) const DRAW_VERBS: &[&str] = &["draw", "create", "make", "add"];

/// Families checked by plain containment once draw detection has failed.
/// Order matters: the first family with a matching keyword wins.
pub(crate) const OTHER_FAMILIES: &[(CommandFamily, &[&str])] = &[
    (CommandFamily::Erase, &["erase", "delete", "remove", "clear"]),
    (CommandFamily::Move, &["move", "translate", "shift"]),
    (CommandFamily::Rotate, &["rotate", "turn", "spin"]),
    (CommandFamily::Scale, &["scale", "resize", "enlarge", "shrink"]),
    (CommandFamily::Dimension, &["dimension", "annotate", "measure"]),
];

/// Verbs resolving a generic layer command.
pub(crate) const LAYER_CREATE_VERBS: &[&str] = &["create", "make", "add"];
pub(crate) const LAYER_DELETE_VERBS: &[&str] = &["delete", "remove", "erase"];
pub(crate) const LAYER_LIST_WORDS: &[&str] = &["list", "show", "all"];

/// Shape keywords in declaration order.
const SHAPE_KEYWORDS: &[(Shape, &[&str])] = &[
    (Shape::Line, &["line", "segment"]),
    (Shape::Circle, &["circle", "round"]),
    (Shape::Arc, &["arc", "curve"]),
    (Shape::Rectangle, &["rectangle", "rect", "square"]),
    (Shape::Polyline, &["polyline", "polygon", "path"]),
    (Shape::Ellipse, &["ellipse", "oval"]),
    (Shape::Text, &["text", "label", "note"]),
    (Shape::Hatch, &["hatch", "fill", "pattern"]),
];

/// Shape keyword sets ordered by their longest keyword, longest first.
///
/// Ties keep declaration order (stable sort), so `polyline` is always tried
/// before `line`.
pub(crate) static SHAPES_BY_KEYWORD_LENGTH: LazyLock<Vec<(Shape, &'static [&'static str])>> =
    LazyLock::new(|| {
        let mut shapes = SHAPE_KEYWORDS.to_vec();
        shapes.sort_by_key(|(_, keywords)| {
            Reverse(keywords.iter().map(|k| k.len()).max().unwrap_or(0))
        });
        shapes
    });

/// Color names and their canonical spelling, scanned in order.
pub(crate) const COLOR_NAMES: &[(&str, &str)] = &[
    ("black", "black"),
    ("red", "red"),
    ("green", "green"),
    ("blue", "blue"),
    ("yellow", "yellow"),
    ("magenta", "magenta"),
    ("cyan", "cyan"),
    ("white", "white"),
    ("gray", "gray"),
    ("grey", "gray"),
    ("orange", "orange"),
];

pub(crate) const DEFAULT_COLOR: &str = "white";
pub(crate) const DEFAULT_LAYER: &str = "0";

/// Recognized hatch pattern names, scanned in order.
pub(crate) const HATCH_PATTERNS: &[&str] = &[
    "solid", "angle", "cross", "brick", "ansi31", "net", "dots", "hex",
];

pub(crate) const DEFAULT_HATCH_PATTERN: &str = "SOLID";

/// Words that structure a sentence and are never layer names.
pub(crate) const LAYER_CONTROL_WORDS: &[&str] = &["layer", "on", "off", "named", "called"];

/// Words that make a following `layer` a placement, not an object.
pub(crate) const PLACEMENT_WORDS: &[&str] = &["on", "in", "onto", "into"];

pub(crate) fn is_control_word(word: &str) -> bool {
    LAYER_CONTROL_WORDS
        .iter()
        .any(|w| w.eq_ignore_ascii_case(word))
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Check if `word` occurs in `text` with word boundaries on both sides.
///
/// "lined" does not contain the word "line"; "a line." does.
pub(crate) fn contains_word(text: &str, word: &str) -> bool {
    if word.is_empty() {
        return false;
    }
    text.match_indices(word).any(|(start, _)| {
        let before = text[..start].chars().next_back();
        let after = text[start + word.len()..].chars().next();
        !before.is_some_and(is_word_char) && !after.is_some_and(is_word_char)
    })
}

/// Check if the text contains any of the keywords as a plain substring.
pub(crate) fn contains_any(text: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|k| text.contains(k))
}

/// Check if the text contains any of the keywords as whole words.
pub(crate) fn contains_any_word(text: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|k| contains_word(text, k))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn word_boundaries() {
        assert!(contains_word("draw a line", "line"));
        assert!(contains_word("line", "line"));
        assert!(contains_word("a line.", "line"));
        assert!(!contains_word("lined paper", "line"));
        assert!(!contains_word("draw a polyline", "line"));
        assert!(!contains_word("under_line", "line"));
        assert!(contains_word("turn on layer x", "turn on"));
    }

    #[test]
    fn word_found_after_embedded_occurrence() {
        // First occurrence is inside "polyline", second is standalone.
        assert!(contains_word("polyline or line", "line"));
    }

    #[test]
    fn shapes_sorted_longest_keyword_first() {
        let order: Vec<Shape> = SHAPES_BY_KEYWORD_LENGTH.iter().map(|(s, _)| *s).collect();
        let polyline = order.iter().position(|s| *s == Shape::Polyline).unwrap();
        let line = order.iter().position(|s| *s == Shape::Line).unwrap();
        assert!(polyline < line);
        assert_eq!(order[0], Shape::Rectangle);

        let lengths: Vec<usize> = SHAPES_BY_KEYWORD_LENGTH
            .iter()
            .map(|(_, kws)| kws.iter().map(|k| k.len()).max().unwrap())
            .collect();
        assert!(lengths.windows(2).all(|w| w[0] >= w[1]));
    }

    #[test]
    fn ties_keep_declaration_order() {
        // line, ellipse and hatch all have a 7-letter keyword.
        let order: Vec<Shape> = SHAPES_BY_KEYWORD_LENGTH.iter().map(|(s, _)| *s).collect();
        let pos = |shape| order.iter().position(|s| *s == shape).unwrap();
        assert!(pos(Shape::Line) < pos(Shape::Ellipse));
        assert!(pos(Shape::Ellipse) < pos(Shape::Hatch));
    }

    #[test]
    fn control_words_case_insensitive() {
        assert!(is_control_word("Layer"));
        assert!(is_control_word("OFF"));
        assert!(!is_control_word("walls"));
    }

    #[test]
    fn hatch_is_not_a_pattern_name() {
        assert!(!HATCH_PATTERNS.contains(&"hatch"));
    }
}

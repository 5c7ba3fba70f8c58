//! Compiled text patterns: numbers, coordinates, and per-field phrasing.
//!
//! All patterns are process-lifetime statics. None nest unbounded
//! quantifiers, so scanning stays linear in the input length.

use regex::Regex;
use std::sync::LazyLock;

use mc_protocol::Point2;

/// Integer, decimal, or scientific notation: `1`, `-1.23`, `.5`, `1e3`, `1.23E-4`.
pub(crate) const NUMBER: &str = r"[+-]?(?:\d+\.?\d*|\d*\.\d+)(?:[eE][+-]?\d+)?";

/// Optional separator between a keyword and its value: `=`, `of`, `:`.
const VALUE_SEP: &str = r"\s*(?:=|of|:)?\s*";

/// A coordinate: `10,20`, `(10; 20)`, `10,20,5`, `x=10, y=20`, `x=10 y=20 z=0`.
///
/// Positional components need a comma or semicolon between them; named
/// components may be separated by whitespace alone.
fn coordinate_pattern() -> String {
    format!(
        r"\(?\s*(?:\bx\s*=\s*(?P<nx>{n})\s*[,;]?\s*y\s*=\s*(?P<ny>{n})(?:\s*[,;]?\s*z\s*=\s*(?P<nz>{n}))?|(?P<x>{n})\s*[,;]\s*(?:y\s*=\s*)?(?P<y>{n})(?:\s*[,;]\s*(?:z\s*=\s*)?(?P<z>{n}))?)\s*\)?",
        n = NUMBER
    )
}

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).unwrap()
}

/// `<keyword> [=|of|:] <number>` with a word boundary before the keyword.
fn scalar_after(keywords: &str) -> Regex {
    compile(&format!(r"\b(?:{keywords}){VALUE_SEP}({NUMBER})"))
}

/// `<type> angle <n>`, `<type>_angle <n>`, or `<type> <n>`.
fn typed_angle(kind: &str) -> Regex {
    compile(&format!(r"\b{kind}(?:[_\s]?angle)?{VALUE_SEP}({NUMBER})"))
}

// ── Numbers and coordinates ───────────────────────────────────

pub(crate) static COORDINATE: LazyLock<Regex> = LazyLock::new(|| compile(&coordinate_pattern()));

// Major axis given as a coordinate directly after its keyword.
static MAJOR_AXIS: LazyLock<Regex> = LazyLock::new(|| {
    compile(&format!(
        r"\b(?:major[_\s]*axis|axis|major){VALUE_SEP}{}",
        coordinate_pattern()
    ))
});

// ── Scalar fields ─────────────────────────────────────────────

pub(crate) static RADIUS: LazyLock<Regex> = LazyLock::new(|| scalar_after(r"radius|r\b"));
pub(crate) static HEIGHT: LazyLock<Regex> = LazyLock::new(|| scalar_after("height|size"));
pub(crate) static RATIO: LazyLock<Regex> = LazyLock::new(|| scalar_after("ratio|minor"));
pub(crate) static LINEWEIGHT: LazyLock<Regex> = LazyLock::new(|| {
    compile(&format!(r"(?:lineweight|weight|thickness){VALUE_SEP}(\d+)"))
});

// ── Angles ────────────────────────────────────────────────────

pub(crate) static START_ANGLE: LazyLock<Regex> = LazyLock::new(|| typed_angle("start"));
pub(crate) static END_ANGLE: LazyLock<Regex> = LazyLock::new(|| typed_angle("end"));
pub(crate) static ROTATION: LazyLock<Regex> = LazyLock::new(|| typed_angle("rotation"));
// Unqualified "angle 90"; also hits inside "end angle 90".
pub(crate) static ANY_ANGLE: LazyLock<Regex> =
    LazyLock::new(|| compile(&format!(r"angle{VALUE_SEP}({NUMBER})")));

// ── Free text (matched against the original, case-preserving text) ──

pub(crate) static TEXT_CONTENT: LazyLock<Regex> = LazyLock::new(|| {
    compile(r#"(?i)\b(?:text|label|content)\s*["']([^"']+)["']"#)
});
pub(crate) static QUOTED: LazyLock<Regex> = LazyLock::new(|| compile(r#"["']([^"']+)["']"#));

// Layer placement inside a draw command.
pub(crate) static LAYER_QUOTED: LazyLock<Regex> =
    LazyLock::new(|| compile(r#"(?i)\blayer\s+(?:(?:named|called)\s+)?["']([^"']+)["']"#));
pub(crate) static LAYER_BARE: LazyLock<Regex> =
    LazyLock::new(|| compile(r"(?i)\blayer\s+(?:(?:named|called)\s+)?([a-zA-Z0-9_]+)"));
pub(crate) static ON_QUOTED: LazyLock<Regex> =
    LazyLock::new(|| compile(r#"(?i)\bon\s+["']([^"']+)["']"#));
pub(crate) static ON_BARE: LazyLock<Regex> =
    LazyLock::new(|| compile(r"(?i)\bon\s+([a-zA-Z0-9_]+)"));

// Layer names in layer-management commands.
pub(crate) static LAYER_NAME: LazyLock<Regex> = LazyLock::new(|| {
    compile(r"(?i)\blayer\s+(?:(?:named|called)\s+)?([a-zA-Z0-9_\-]+)")
});
pub(crate) static NAMED: LazyLock<Regex> =
    LazyLock::new(|| compile(r"(?i)\b(?:named|called)\s+([a-zA-Z0-9_\-]+)"));
pub(crate) static RENAME_LAYER_TO: LazyLock<Regex> = LazyLock::new(|| {
    compile(r"(?i)\blayer\s+([a-zA-Z0-9_\-]+)\s+to\s+([a-zA-Z0-9_\-]+)")
});
pub(crate) static RENAME_TO: LazyLock<Regex> =
    LazyLock::new(|| compile(r"(?i)([a-zA-Z0-9_\-]+)\s+to\s+([a-zA-Z0-9_\-]+)"));
pub(crate) static NAME_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| compile(r"^[a-zA-Z0-9_\-]+$"));

// ── Command classification ────────────────────────────────────

pub(crate) static CREATION_VERB: LazyLock<Regex> =
    LazyLock::new(|| compile(r"\b(?:create|make|add)\s"));
pub(crate) static WORD_BEFORE_LAYER: LazyLock<Regex> =
    LazyLock::new(|| compile(r"(\S+)\s+layer\b"));
pub(crate) static TURN_ON_LAYER: LazyLock<Regex> =
    LazyLock::new(|| compile(r"\bturn\s+on\s+layer\b"));
pub(crate) static TURN_OFF_LAYER: LazyLock<Regex> =
    LazyLock::new(|| compile(r"\bturn\s+off\s+layer\b"));
pub(crate) static SHOW_LAYER: LazyLock<Regex> =
    LazyLock::new(|| compile(r"\b(?:show|unhide|enable)\s+layer\b"));
pub(crate) static HIDE_LAYER: LazyLock<Regex> =
    LazyLock::new(|| compile(r"\b(?:hide|disable)\s+layer\b"));
pub(crate) static DELETE_LAYER: LazyLock<Regex> =
    LazyLock::new(|| compile(r"\b(?:delete|remove|erase)\s+layer\b"));
pub(crate) static LIST_LAYERS: LazyLock<Regex> =
    LazyLock::new(|| compile(r"\b(?:list|show)\s+(?:all\s+)?layers?\b"));

/// Compile every pattern now rather than on first use.
pub(crate) fn warm_up() {
    for re in [
        &COORDINATE,
        &MAJOR_AXIS,
        &RADIUS,
        &HEIGHT,
        &RATIO,
        &LINEWEIGHT,
        &START_ANGLE,
        &END_ANGLE,
        &ROTATION,
        &ANY_ANGLE,
        &TEXT_CONTENT,
        &QUOTED,
        &LAYER_QUOTED,
        &LAYER_BARE,
        &ON_QUOTED,
        &ON_BARE,
        &LAYER_NAME,
        &NAMED,
        &RENAME_LAYER_TO,
        &RENAME_TO,
        &NAME_TOKEN,
        &CREATION_VERB,
        &WORD_BEFORE_LAYER,
        &TURN_ON_LAYER,
        &TURN_OFF_LAYER,
        &SHOW_LAYER,
        &HIDE_LAYER,
        &DELETE_LAYER,
        &LIST_LAYERS,
    ] {
        LazyLock::force(re);
    }
}

/// A coordinate found in text, with the byte span it covered.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct CoordMatch {
    pub point: Point2,
    pub start: usize,
    pub end: usize,
}

impl CoordMatch {
    fn overlaps(&self, start: usize, end: usize) -> bool {
        self.start < end && start < self.end
    }
}

fn coord_from_captures(caps: &regex::Captures<'_>, start: usize, end: usize) -> Option<CoordMatch> {
    let x = caps.name("x").or_else(|| caps.name("nx"))?;
    let y = caps.name("y").or_else(|| caps.name("ny"))?;
    Some(CoordMatch {
        point: Point2::new(x.as_str().parse().ok()?, y.as_str().parse().ok()?),
        start,
        end,
    })
}

/// Every coordinate in the text, in document order.
pub(crate) fn find_coordinates(text: &str) -> Vec<CoordMatch> {
    COORDINATE
        .captures_iter(text)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            coord_from_captures(&caps, whole.start(), whole.end())
        })
        .collect()
}

/// The coordinate introduced by a major-axis phrase, if any.
pub(crate) fn find_major_axis(text: &str) -> Option<CoordMatch> {
    let caps = MAJOR_AXIS.captures(text)?;
    let whole = caps.get(0)?;
    coord_from_captures(&caps, whole.start(), whole.end())
}

/// First coordinate not overlapping the excluded span.
pub(crate) fn first_coordinate_outside(
    coords: &[CoordMatch],
    excluded: Option<&CoordMatch>,
) -> Option<CoordMatch> {
    coords
        .iter()
        .find(|c| excluded.is_none_or(|e| !c.overlaps(e.start, e.end)))
        .copied()
}

/// Parse the first capture group of `re` as a float.
pub(crate) fn capture_number(re: &Regex, text: &str) -> Option<f64> {
    re.captures(text)?.get(1)?.as_str().parse().ok()
}

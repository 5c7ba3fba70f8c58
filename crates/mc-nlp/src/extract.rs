//! Per-field parameter extraction for draw commands.
//!
//! Each field rule looks for its value in the text. On a miss, strict mode
//! fails the command naming the field; lenient mode substitutes the
//! documented default and logs it. Fields that were actually found are
//! recorded so the confidence estimator can tell evidence from defaults.

use mc_protocol::{Parameters, Point2, Shape};

use crate::error::{InterpretError, InterpretResult};
use crate::lexicon::{
    self, COLOR_NAMES, DEFAULT_COLOR, DEFAULT_HATCH_PATTERN, DEFAULT_LAYER, HATCH_PATTERNS,
};
use crate::patterns::{
    self, ANY_ANGLE, CoordMatch, END_ANGLE, HEIGHT, LAYER_BARE, LAYER_QUOTED, LINEWEIGHT,
    ON_BARE, ON_QUOTED, RADIUS, RATIO, ROTATION, START_ANGLE, TEXT_CONTENT,
};

const DEFAULT_LINE: (Point2, Point2) = (Point2::new(0.0, 0.0), Point2::new(100.0, 100.0));
const DEFAULT_RADIUS: f64 = 50.0;
const DEFAULT_ANGLE: f64 = 0.0;
const DEFAULT_MAJOR_AXIS: Point2 = Point2::new(50.0, 0.0);
const DEFAULT_MINOR_RATIO: f64 = 0.5;
const DEFAULT_TEXT: &str = "Text";
const DEFAULT_TEXT_HEIGHT: f64 = 2.5;
const DEFAULT_LINEWEIGHT: i64 = 0;

fn default_square() -> Vec<Point2> {
    vec![
        Point2::new(0.0, 0.0),
        Point2::new(100.0, 0.0),
        Point2::new(100.0, 100.0),
        Point2::new(0.0, 100.0),
    ]
}

/// Which angle an extraction is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum AngleKind {
    Start,
    End,
    Rotation,
}

/// Parameters of a draw command plus the fields that came from the text.
#[derive(Debug, Clone)]
pub(crate) struct Extraction {
    pub parameters: Parameters,
    found: Vec<&'static str>,
}

impl Extraction {
    /// Whether `field` was matched in the text rather than defaulted.
    pub fn was_found(&self, field: &str) -> bool {
        self.found.iter().any(|f| *f == field)
    }
}

/// Field extractor bound to one instruction.
pub(crate) struct Extractor<'t> {
    /// Lowercased text for keyword and number rules.
    lower: &'t str,
    /// Original text for rules whose captures keep their case.
    original: &'t str,
    strict: bool,
    found: Vec<&'static str>,
}

impl<'t> Extractor<'t> {
    pub fn new(lower: &'t str, original: &'t str, strict: bool) -> Self {
        Self {
            lower,
            original,
            strict,
            found: Vec::new(),
        }
    }

    /// Resolve a required field: the match, or the default when lenient.
    fn require<T: std::fmt::Debug>(
        &mut self,
        field: &'static str,
        matched: Option<T>,
        default: impl FnOnce() -> T,
    ) -> InterpretResult<T> {
        match matched {
            Some(value) => {
                self.found.push(field);
                Ok(value)
            }
            None if self.strict => Err(InterpretError::MissingParameter { field }),
            None => {
                let value = default();
                tracing::warn!(field, default = ?value, "no match in text, using default");
                Ok(value)
            }
        }
    }

    /// Resolve an optional field: never fails, in either mode.
    fn optional<T: std::fmt::Debug>(&mut self, field: &'static str, matched: Option<T>, default: T) -> T {
        match matched {
            Some(value) => {
                self.found.push(field);
                value
            }
            None => {
                tracing::debug!(field, default = ?default, "field not given, using default");
                default
            }
        }
    }

    // ── Common attributes ───────────────────────────────────────

    pub fn color(&mut self) -> String {
        let matched = find_color(self.lower).map(str::to_string);
        self.optional("color", matched, DEFAULT_COLOR.to_string())
    }

    pub fn layer(&mut self) -> String {
        let matched = find_draw_layer(self.original);
        self.optional("layer", matched, DEFAULT_LAYER.to_string())
    }

    pub fn lineweight(&mut self) -> i64 {
        let matched = LINEWEIGHT
            .captures(self.lower)
            .and_then(|caps| caps[1].parse().ok());
        self.optional("lineweight", matched, DEFAULT_LINEWEIGHT)
    }

    // ── Geometry ────────────────────────────────────────────────

    /// First coordinate in the text.
    pub fn point(&mut self, field: &'static str) -> InterpretResult<Point2> {
        let matched = patterns::find_coordinates(self.lower)
            .first()
            .map(|c| c.point);
        self.require(field, matched, || Point2::ORIGIN)
    }

    /// First and second coordinates, in document order.
    pub fn point_pair(
        &mut self,
        first: &'static str,
        second: &'static str,
    ) -> InterpretResult<(Point2, Point2)> {
        let coords = patterns::find_coordinates(self.lower);
        let a = self.require(first, coords.first().map(|c| c.point), || DEFAULT_LINE.0)?;
        let b = self.require(second, coords.get(1).map(|c| c.point), || DEFAULT_LINE.1)?;
        Ok((a, b))
    }

    /// Every coordinate in the text, in document order.
    pub fn all_points(&mut self, field: &'static str) -> InterpretResult<Vec<Point2>> {
        let points: Vec<Point2> = patterns::find_coordinates(self.lower)
            .into_iter()
            .map(|c| c.point)
            .collect();
        let matched = (!points.is_empty()).then_some(points);
        self.require(field, matched, default_square)
    }

    /// Ellipse center and major-axis vector.
    ///
    /// The axis is a coordinate right after "major axis"/"axis", else the
    /// first coordinate after the center. The center is the first
    /// coordinate not consumed by the axis phrase.
    pub fn center_and_axis(&mut self) -> InterpretResult<(Point2, Point2)> {
        let coords = patterns::find_coordinates(self.lower);
        let axis_phrase = patterns::find_major_axis(self.lower);
        let center = patterns::first_coordinate_outside(&coords, axis_phrase.as_ref());
        let axis = axis_phrase.or_else(|| next_after(&coords, center.as_ref()));

        let center = self.require("center", center.map(|c| c.point), || Point2::ORIGIN)?;
        let axis = self.require("major_axis", axis.map(|c| c.point), || DEFAULT_MAJOR_AXIS)?;
        Ok((center, axis))
    }

    // ── Measurements ────────────────────────────────────────────

    pub fn radius(&mut self) -> InterpretResult<f64> {
        let matched = patterns::capture_number(&RADIUS, self.lower);
        self.require("radius", matched, || DEFAULT_RADIUS)
    }

    pub fn text_height(&mut self) -> InterpretResult<f64> {
        let matched = patterns::capture_number(&HEIGHT, self.lower);
        self.require("height", matched, || DEFAULT_TEXT_HEIGHT)
    }

    /// Minor/major axis ratio, clamped into `[0, 1]`.
    pub fn minor_ratio(&mut self) -> InterpretResult<f64> {
        let matched = patterns::capture_number(&RATIO, self.lower).map(|r| r.clamp(0.0, 1.0));
        self.require("minor_ratio", matched, || DEFAULT_MINOR_RATIO)
    }

    /// Angle in degrees. An unqualified "angle <n>" counts as the start angle.
    pub fn angle(&mut self, kind: AngleKind, field: &'static str) -> InterpretResult<f64> {
        let matched = match kind {
            AngleKind::Start => patterns::capture_number(&START_ANGLE, self.lower)
                .or_else(|| patterns::capture_number(&ANY_ANGLE, self.lower)),
            AngleKind::End => patterns::capture_number(&END_ANGLE, self.lower),
            AngleKind::Rotation => patterns::capture_number(&ROTATION, self.lower),
        };
        self.require(field, matched, || DEFAULT_ANGLE)
    }

    // ── Text ────────────────────────────────────────────────────

    /// Quoted text after "text"/"label"/"content", case preserved.
    pub fn text_content(&mut self) -> InterpretResult<String> {
        let matched = TEXT_CONTENT
            .captures(self.original)
            .map(|caps| caps[1].to_string());
        self.require("text", matched, || DEFAULT_TEXT.to_string())
    }

    pub fn hatch_pattern(&mut self) -> InterpretResult<String> {
        let matched = HATCH_PATTERNS
            .iter()
            .find(|p| lexicon::contains_word(self.lower, p))
            .map(|p| p.to_uppercase());
        self.require("pattern", matched, || DEFAULT_HATCH_PATTERN.to_string())
    }

    pub fn closed_flag(&mut self) -> bool {
        let closed = lexicon::contains_word(self.lower, "closed");
        self.optional("closed", closed.then_some(true), false)
    }

    pub fn finish(self, parameters: Parameters) -> Extraction {
        Extraction {
            parameters,
            found: self.found,
        }
    }
}

fn next_after(coords: &[CoordMatch], anchor: Option<&CoordMatch>) -> Option<CoordMatch> {
    let anchor = anchor?;
    coords.iter().find(|c| c.start >= anchor.end).copied()
}

/// First color-table entry present in the text, as a substring.
pub(crate) fn find_color(lower: &str) -> Option<&'static str> {
    COLOR_NAMES
        .iter()
        .find(|(name, _)| lower.contains(name))
        .map(|(_, canonical)| *canonical)
}

/// Layer placement in a draw command: `layer <name>` first, then `on <name>`.
/// Quoted names win over bare tokens; control words are skipped.
pub(crate) fn find_draw_layer(original: &str) -> Option<String> {
    if let Some(caps) = LAYER_QUOTED.captures(original) {
        return Some(caps[1].to_string());
    }
    if let Some(name) = first_non_control(&LAYER_BARE, original) {
        return Some(name);
    }
    if let Some(caps) = ON_QUOTED.captures(original) {
        return Some(caps[1].to_string());
    }
    first_non_control(&ON_BARE, original)
}

fn first_non_control(re: &regex::Regex, text: &str) -> Option<String> {
    re.captures_iter(text)
        .map(|caps| caps[1].to_string())
        .find(|name| !lexicon::is_control_word(name))
}

/// Extract every parameter for a draw command of the given shape.
pub(crate) fn extract_parameters(
    shape: Shape,
    lower: &str,
    original: &str,
    strict: bool,
) -> InterpretResult<Extraction> {
    let mut ex = Extractor::new(lower, original, strict);
    let mut params = Parameters::new();

    params.insert("color", ex.color());
    params.insert("layer", ex.layer());
    params.insert("lineweight", ex.lineweight());

    match shape {
        Shape::Line => {
            let (start, end) = ex.point_pair("start", "end")?;
            params.insert("start", start);
            params.insert("end", end);
        }
        Shape::Circle => {
            params.insert("center", ex.point("center")?);
            params.insert("radius", ex.radius()?);
        }
        Shape::Arc => {
            params.insert("center", ex.point("center")?);
            params.insert("radius", ex.radius()?);
            params.insert("start_angle", ex.angle(AngleKind::Start, "start_angle")?);
            params.insert("end_angle", ex.angle(AngleKind::End, "end_angle")?);
        }
        Shape::Rectangle => {
            let (corner1, corner2) = ex.point_pair("corner1", "corner2")?;
            params.insert("corner1", corner1);
            params.insert("corner2", corner2);
        }
        Shape::Polyline => {
            params.insert("points", ex.all_points("points")?);
            params.insert("closed", ex.closed_flag());
        }
        Shape::Ellipse => {
            let (center, axis) = ex.center_and_axis()?;
            params.insert("center", center);
            params.insert("major_axis", axis);
            params.insert("minor_ratio", ex.minor_ratio()?);
        }
        Shape::Text => {
            params.insert("position", ex.point("position")?);
            params.insert("text", ex.text_content()?);
            params.insert("height", ex.text_height()?);
            params.insert("rotation", ex.angle(AngleKind::Rotation, "rotation")?);
        }
        Shape::Hatch => {
            params.insert("boundary_points", ex.all_points("boundary_points")?);
            params.insert("pattern", ex.hatch_pattern()?);
        }
    }

    Ok(ex.finish(params))
}

/// Color, layer, and lineweight only; used to fill in missing attributes.
pub(crate) fn extract_common(lower: &str, original: &str) -> Parameters {
    let mut ex = Extractor::new(lower, original, false);
    let mut params = Parameters::new();
    params.insert("color", ex.color());
    params.insert("layer", ex.layer());
    params.insert("lineweight", ex.lineweight());
    params
}

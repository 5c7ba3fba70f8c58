//! Weighted confidence scoring for draw commands.

use mc_protocol::Shape;

use crate::extract::Extraction;
use crate::lexicon::{self, DEFAULT_COLOR, DEFAULT_LAYER, DRAW_VERBS};

const W_DRAW_VERB: f64 = 0.15;
const W_SHAPE_KEYWORD: f64 = 0.30;
const W_COORDINATES: f64 = 0.35;
const W_MEASUREMENT: f64 = 0.10;
const W_COLOR: f64 = 0.05;
const W_LAYER: f64 = 0.05;

const COORDINATE_FIELDS: &[&str] = &[
    "start",
    "end",
    "center",
    "position",
    "points",
    "corner1",
    "corner2",
    "boundary_points",
    "major_axis",
];

const MEASUREMENT_FIELDS: &[&str] = &["radius", "height", "width"];

/// Presence features of one draw command.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct Features {
    pub draw_verb: bool,
    pub shape_keyword: bool,
    pub coordinates: bool,
    pub measurement: bool,
    pub color: bool,
    pub layer: bool,
}

impl Features {
    pub fn detect(lower: &str, shape: Shape, extraction: &Extraction) -> Self {
        let params = &extraction.parameters;
        Self {
            draw_verb: lexicon::contains_any_word(lower, DRAW_VERBS),
            shape_keyword: lexicon::contains_word(lower, shape.as_str()),
            coordinates: COORDINATE_FIELDS.iter().any(|f| extraction.was_found(f)),
            measurement: MEASUREMENT_FIELDS.iter().any(|f| extraction.was_found(f)),
            color: extraction.was_found("color")
                && params.text("color").is_some_and(|c| c != DEFAULT_COLOR),
            layer: extraction.was_found("layer")
                && params.text("layer").is_some_and(|l| l != DEFAULT_LAYER),
        }
    }

    pub fn score(&self) -> f64 {
        let weighted = [
            (self.draw_verb, W_DRAW_VERB),
            (self.shape_keyword, W_SHAPE_KEYWORD),
            (self.coordinates, W_COORDINATES),
            (self.measurement, W_MEASUREMENT),
            (self.color, W_COLOR),
            (self.layer, W_LAYER),
        ];
        weighted
            .iter()
            .filter(|(present, _)| *present)
            .map(|(_, weight)| weight)
            .sum::<f64>()
            .clamp(0.0, 1.0)
    }
}

/// Score a draw command in `[0, 1]`.
pub(crate) fn score(lower: &str, shape: Shape, extraction: &Extraction) -> f64 {
    let features = Features::detect(lower, shape, extraction);
    let score = features.score();
    tracing::debug!(?features, score, "confidence computed");
    score
}

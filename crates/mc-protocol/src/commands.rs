use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::params::Parameters;

/// Geometric primitive a draw instruction targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Shape {
    Line,
    Circle,
    Arc,
    Rectangle,
    Polyline,
    Ellipse,
    Text,
    Hatch,
}

impl Shape {
    pub const ALL: [Shape; 8] = [
        Self::Line,
        Self::Circle,
        Self::Arc,
        Self::Rectangle,
        Self::Polyline,
        Self::Ellipse,
        Self::Text,
        Self::Hatch,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Line => "line",
            Self::Circle => "circle",
            Self::Arc => "arc",
            Self::Rectangle => "rectangle",
            Self::Polyline => "polyline",
            Self::Ellipse => "ellipse",
            Self::Text => "text",
            Self::Hatch => "hatch",
        }
    }
}

impl std::fmt::Display for Shape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The closed vocabulary of executable operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    DrawLine,
    DrawCircle,
    DrawArc,
    DrawRectangle,
    DrawPolyline,
    DrawEllipse,
    DrawText,
    DrawHatch,
    CreateLayer,
    DeleteLayer,
    RenameLayer,
    TurnLayerOn,
    TurnLayerOff,
    ListLayers,
}

/// Attribute keys shared by every draw operation.
const STYLE_KEYS: [&str; 3] = ["color", "layer", "lineweight"];

impl Operation {
    pub const ALL: [Operation; 14] = [
        Self::DrawLine,
        Self::DrawCircle,
        Self::DrawArc,
        Self::DrawRectangle,
        Self::DrawPolyline,
        Self::DrawEllipse,
        Self::DrawText,
        Self::DrawHatch,
        Self::CreateLayer,
        Self::DeleteLayer,
        Self::RenameLayer,
        Self::TurnLayerOn,
        Self::TurnLayerOff,
        Self::ListLayers,
    ];

    /// The draw operation for a shape.
    pub fn draw(shape: Shape) -> Self {
        match shape {
            Shape::Line => Self::DrawLine,
            Shape::Circle => Self::DrawCircle,
            Shape::Arc => Self::DrawArc,
            Shape::Rectangle => Self::DrawRectangle,
            Shape::Polyline => Self::DrawPolyline,
            Shape::Ellipse => Self::DrawEllipse,
            Shape::Text => Self::DrawText,
            Shape::Hatch => Self::DrawHatch,
        }
    }

    /// The shape drawn by this operation, if it is a draw operation.
    pub fn shape(&self) -> Option<Shape> {
        match self {
            Self::DrawLine => Some(Shape::Line),
            Self::DrawCircle => Some(Shape::Circle),
            Self::DrawArc => Some(Shape::Arc),
            Self::DrawRectangle => Some(Shape::Rectangle),
            Self::DrawPolyline => Some(Shape::Polyline),
            Self::DrawEllipse => Some(Shape::Ellipse),
            Self::DrawText => Some(Shape::Text),
            Self::DrawHatch => Some(Shape::Hatch),
            Self::CreateLayer
            | Self::DeleteLayer
            | Self::RenameLayer
            | Self::TurnLayerOn
            | Self::TurnLayerOff
            | Self::ListLayers => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DrawLine => "draw_line",
            Self::DrawCircle => "draw_circle",
            Self::DrawArc => "draw_arc",
            Self::DrawRectangle => "draw_rectangle",
            Self::DrawPolyline => "draw_polyline",
            Self::DrawEllipse => "draw_ellipse",
            Self::DrawText => "draw_text",
            Self::DrawHatch => "draw_hatch",
            Self::CreateLayer => "create_layer",
            Self::DeleteLayer => "delete_layer",
            Self::RenameLayer => "rename_layer",
            Self::TurnLayerOn => "turn_layer_on",
            Self::TurnLayerOff => "turn_layer_off",
            Self::ListLayers => "list_layers",
        }
    }

    /// Shape-specific parameter keys, excluding the shared style keys.
    fn shape_keys(&self) -> &'static [&'static str] {
        match self {
            Self::DrawLine => &["start", "end"],
            Self::DrawCircle => &["center", "radius"],
            Self::DrawArc => &["center", "radius", "start_angle", "end_angle"],
            Self::DrawRectangle => &["corner1", "corner2"],
            Self::DrawPolyline => &["points", "closed"],
            Self::DrawEllipse => &["center", "major_axis", "minor_ratio"],
            Self::DrawText => &["position", "text", "height", "rotation"],
            Self::DrawHatch => &["boundary_points", "pattern"],
            Self::CreateLayer => &["name", "color", "lineweight"],
            Self::DeleteLayer | Self::TurnLayerOn | Self::TurnLayerOff => &["name"],
            Self::RenameLayer => &["old_name", "new_name"],
            Self::ListLayers => &[],
        }
    }

    /// Every parameter key meaningful for this operation.
    pub fn parameter_keys(&self) -> Vec<&'static str> {
        let mut keys = Vec::new();
        if self.shape().is_some() {
            keys.extend(STYLE_KEYS);
        }
        keys.extend(self.shape_keys());
        keys
    }

    /// Whether `key` is meaningful for this operation.
    pub fn accepts(&self, key: &str) -> bool {
        (self.shape().is_some() && STYLE_KEYS.contains(&key)) || self.shape_keys().contains(&key)
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string is not in the operation vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown operation: {0}")]
pub struct UnknownOperation(pub String);

impl std::str::FromStr for Operation {
    type Err = UnknownOperation;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|op| op.as_str() == s)
            .ok_or_else(|| UnknownOperation(s.to_string()))
    }
}

/// Error returned when a deserialized command breaks a command invariant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("parameter '{key}' is not valid for {operation}")]
pub struct InvalidCommand {
    pub operation: Operation,
    pub key: String,
}

/// Wire shape of a `ParsedCommand`, validated before it becomes one.
#[derive(Deserialize)]
struct RawParsedCommand {
    operation: Operation,
    parameters: Parameters,
    confidence: f64,
    raw_text: String,
}

impl TryFrom<RawParsedCommand> for ParsedCommand {
    type Error = InvalidCommand;

    fn try_from(raw: RawParsedCommand) -> Result<Self, Self::Error> {
        if let Some(key) = raw.parameters.keys().find(|k| !raw.operation.accepts(k)) {
            return Err(InvalidCommand {
                operation: raw.operation,
                key: key.to_string(),
            });
        }
        Ok(Self::new(
            raw.operation,
            raw.parameters,
            raw.confidence,
            raw.raw_text,
        ))
    }
}

/// Structured, executable form of a natural-language instruction.
///
/// Built once per interpretation and never mutated afterwards; all fields
/// are read through accessors. Deserialization goes through the same
/// checks as [`ParsedCommand::new`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawParsedCommand")]
pub struct ParsedCommand {
    operation: Operation,
    parameters: Parameters,
    confidence: f64,
    raw_text: String,
}

impl ParsedCommand {
    /// Build a command. Confidence is clamped into `[0.0, 1.0]`.
    pub fn new(
        operation: Operation,
        parameters: Parameters,
        confidence: f64,
        raw_text: impl Into<String>,
    ) -> Self {
        debug_assert!(
            parameters.keys().all(|k| operation.accepts(k)),
            "parameter keys {:?} not valid for {operation}",
            parameters.keys().collect::<Vec<_>>()
        );
        let confidence = if confidence.is_nan() {
            0.0
        } else {
            confidence.clamp(0.0, 1.0)
        };
        Self {
            operation,
            parameters,
            confidence,
            raw_text: raw_text.into(),
        }
    }

    pub fn operation(&self) -> Operation {
        self.operation
    }

    pub fn parameters(&self) -> &Parameters {
        &self.parameters
    }

    pub fn confidence(&self) -> f64 {
        self.confidence
    }

    /// The original input, verbatim.
    pub fn raw_text(&self) -> &str {
        &self.raw_text
    }
}

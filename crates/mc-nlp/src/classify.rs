//! Command-family and shape classification.

use mc_protocol::Shape;

use crate::error::{InterpretError, InterpretResult};
use crate::lexicon::{self, DRAW_VERBS, OTHER_FAMILIES, PLACEMENT_WORDS, SHAPES_BY_KEYWORD_LENGTH};
use crate::patterns::{
    CREATION_VERB, DELETE_LAYER, HIDE_LAYER, LIST_LAYERS, SHOW_LAYER, TURN_OFF_LAYER,
    TURN_ON_LAYER, WORD_BEFORE_LAYER,
};

/// Coarse verb category of an instruction, resolved before any extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandFamily {
    Draw,
    Erase,
    Move,
    Rotate,
    Scale,
    Dimension,
    /// Generic layer management: create, delete, or list.
    Layer,
    Rename,
    TurnOn,
    TurnOff,
}

impl CommandFamily {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draw => "draw",
            Self::Erase => "erase",
            Self::Move => "move",
            Self::Rotate => "rotate",
            Self::Scale => "scale",
            Self::Dimension => "dimension",
            Self::Layer => "layer",
            Self::Rename => "rename",
            Self::TurnOn => "turn_on",
            Self::TurnOff => "turn_off",
        }
    }

    /// Whether the layer sub-parser handles this family.
    pub fn is_layer_management(&self) -> bool {
        matches!(
            self,
            Self::Layer | Self::Rename | Self::TurnOn | Self::TurnOff
        )
    }
}

impl std::fmt::Display for CommandFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Determine the command family of lowercased text.
///
/// `original` is only used for error reporting.
pub(crate) fn classify_command(lower: &str, original: &str) -> InterpretResult<CommandFamily> {
    if let Some(family) = classify_by_verb(lower) {
        tracing::debug!(family = %family, "command family from keywords");
        return Ok(family);
    }

    // No verb at all: a bare shape ("a circle at 10,10") is still a drawing.
    if let Some(shape) = classify_shape(lower) {
        tracing::debug!(shape = %shape, "no command verb, defaulting to draw");
        return Ok(CommandFamily::Draw);
    }

    Err(InterpretError::ambiguous(
        original,
        "no command or shape keyword found",
    ))
}

fn classify_by_verb(lower: &str) -> Option<CommandFamily> {
    // Creation intent beats any draw-keyword collision ("create a red layer").
    if is_layer_creation(lower) {
        return Some(CommandFamily::Layer);
    }

    if lower.contains("layer") {
        if let Some(family) = classify_layer_management(lower) {
            return Some(family);
        }
        // Otherwise "layer" is a modifier ("on layer walls") inside some
        // other command.
    }

    if lexicon::contains_any(lower, DRAW_VERBS) {
        return Some(CommandFamily::Draw);
    }

    OTHER_FAMILIES
        .iter()
        .find(|(_, keywords)| lexicon::contains_any(lower, keywords))
        .map(|(family, _)| *family)
}

/// A creation verb followed eventually by `layer`, unless every such
/// `layer` is a placement (`on layer X`) rather than the object.
///
/// This deliberately narrows the plain "creation verb, then `layer`" rule:
/// `create a circle on layer walls` is a draw command here, not a layer
/// creation named `walls`.
fn is_layer_creation(lower: &str) -> bool {
    let Some(verb) = CREATION_VERB.find(lower) else {
        return false;
    };
    WORD_BEFORE_LAYER
        .captures_iter(&lower[verb.start()..])
        .any(|caps| !PLACEMENT_WORDS.contains(&&caps[1]))
}

fn classify_layer_management(lower: &str) -> Option<CommandFamily> {
    if lower.contains("rename") || lower.contains("change name") {
        Some(CommandFamily::Rename)
    } else if TURN_ON_LAYER.is_match(lower) {
        Some(CommandFamily::TurnOn)
    } else if TURN_OFF_LAYER.is_match(lower) {
        Some(CommandFamily::TurnOff)
    } else if SHOW_LAYER.is_match(lower) {
        Some(CommandFamily::TurnOn)
    } else if HIDE_LAYER.is_match(lower) {
        Some(CommandFamily::TurnOff)
    } else if DELETE_LAYER.is_match(lower) || LIST_LAYERS.is_match(lower) {
        Some(CommandFamily::Layer)
    } else {
        None
    }
}

/// Determine which shape lowercased text refers to, if any.
///
/// Keyword sets are tried longest-keyword first with whole-word matching,
/// so "polyline" never reads as "line" and "lined" never reads as anything.
pub(crate) fn classify_shape(lower: &str) -> Option<Shape> {
    SHAPES_BY_KEYWORD_LENGTH
        .iter()
        .find(|(_, keywords)| lexicon::contains_any_word(lower, keywords))
        .map(|(shape, _)| *shape)
}

//! The interpreter facade: classify, extract, score.

use mc_protocol::{Operation, Parameters, ParsedCommand};

use crate::classify::{self, CommandFamily};
use crate::config::NlpConfig;
use crate::error::{InterpretError, InterpretResult};
use crate::{confidence, extract, layers, patterns};

/// Rule-based natural-language interpreter for drawing and layer commands.
///
/// Holds no mutable state; one instance can serve any number of callers,
/// including concurrently.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interpreter {
    strict_mode: bool,
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

impl Interpreter {
    /// Lenient interpreter: missing fields get their documented defaults.
    pub fn new() -> Self {
        Self::with_strict_mode(false)
    }

    /// Strict interpreter: a missing required field fails the command.
    pub fn strict() -> Self {
        Self::with_strict_mode(true)
    }

    pub fn with_strict_mode(strict_mode: bool) -> Self {
        patterns::warm_up();
        Self { strict_mode }
    }

    pub fn from_config(config: &NlpConfig) -> Self {
        Self::with_strict_mode(config.strict_mode)
    }

    pub fn is_strict(&self) -> bool {
        self.strict_mode
    }

    /// Turn one free-text instruction into a command.
    pub fn parse(&self, text: &str) -> InterpretResult<ParsedCommand> {
        let lower = text.to_lowercase();
        let family = classify::classify_command(&lower, text)?;

        let result = if family.is_layer_management() {
            layers::parse_layer_command(family, &lower, text, self.strict_mode)
        } else if family == CommandFamily::Draw {
            self.parse_draw(&lower, text)
        } else {
            Err(InterpretError::UnsupportedOperation { family })
        };

        match &result {
            Ok(command) => tracing::debug!(
                operation = %command.operation(),
                confidence = command.confidence(),
                "instruction interpreted"
            ),
            Err(e) => tracing::debug!(error = %e, "instruction rejected"),
        }
        result
    }

    fn parse_draw(&self, lower: &str, original: &str) -> InterpretResult<ParsedCommand> {
        let shape = classify::classify_shape(lower)
            .ok_or_else(|| InterpretError::ambiguous(original, "no shape keyword found"))?;
        let extraction = extract::extract_parameters(shape, lower, original, self.strict_mode)?;
        let score = confidence::score(lower, shape, &extraction);
        Ok(ParsedCommand::new(
            Operation::draw(shape),
            extraction.parameters,
            score,
            original,
        ))
    }

    /// The command family of `text`, without extracting anything.
    pub fn classify(&self, text: &str) -> InterpretResult<CommandFamily> {
        classify::classify_command(&text.to_lowercase(), text)
    }

    /// Color, layer, and lineweight only, with defaults for whatever is
    /// absent. Never fails.
    pub fn extract_common(&self, text: &str) -> Parameters {
        extract::extract_common(&text.to_lowercase(), text)
    }
}

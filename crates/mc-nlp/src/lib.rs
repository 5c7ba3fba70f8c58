//! Natural-language interpreter for multiCAD.
//!
//! Turns free-text instructions ("draw a red circle at 50,50 with radius 25")
//! into a [`ParsedCommand`](mc_protocol::ParsedCommand): an operation, typed
//! parameters, and a confidence score. Classification, extraction, and
//! scoring are deterministic and rule-based; [`Interpreter`] is the only
//! entry point.

mod classify;
mod confidence;
mod config;
mod error;
mod extract;
mod interpreter;
mod layers;
mod lexicon;
mod patterns;

pub use classify::CommandFamily;
pub use config::NlpConfig;
pub use error::{InterpretError, InterpretResult};
pub use interpreter::Interpreter;

//! One console session: interpret each instruction, execute it, report.

use std::time::Instant;

use mc_executor::{CadExecutor, CommandDispatcher, ExecutionOutcome};
use mc_nlp::Interpreter;
use mc_protocol::CommandReport;

/// Interprets instructions and executes them against a CAD backend.
pub struct Session<'a> {
    interpreter: Interpreter,
    dispatcher: CommandDispatcher<'a>,
}

impl<'a> Session<'a> {
    pub fn new(interpreter: Interpreter, executor: &'a dyn CadExecutor) -> Self {
        Self {
            interpreter,
            dispatcher: CommandDispatcher::new(executor),
        }
    }

    /// Handle one instruction and produce its report. Never fails: every
    /// problem is recorded in the report.
    pub async fn handle(&self, text: &str) -> CommandReport {
        let start = Instant::now();

        let command = match self.interpreter.parse(text) {
            Ok(command) => command,
            Err(e) => {
                tracing::info!(error = %e, "instruction rejected");
                return CommandReport::rejected(text, e.to_string(), elapsed_ms(start));
            }
        };

        match self.dispatcher.dispatch(&command).await {
            Ok(ExecutionOutcome::Done(false)) => {
                let error = format!("backend refused {}", command.operation());
                CommandReport::failed(command, error, elapsed_ms(start))
            }
            Ok(outcome) => {
                let data = outcome_data(&outcome);
                CommandReport::completed(command, outcome.summary(), data, elapsed_ms(start))
            }
            Err(e) => {
                tracing::warn!(error = %e, "execution failed");
                CommandReport::failed(command, e.to_string(), elapsed_ms(start))
            }
        }
    }
}

/// Structured form of an outcome; `null` (with a warning) if it cannot be
/// serialized.
fn outcome_data(outcome: &ExecutionOutcome) -> serde_json::Value {
    serde_json::to_value(outcome).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "failed to serialize execution outcome");
        serde_json::Value::Null
    })
}

fn elapsed_ms(start: Instant) -> u64 {
    start.elapsed().as_millis() as u64
}

/// Whether an input line carries an instruction (not blank, not a `#` comment).
pub fn is_instruction(line: &str) -> bool {
    let line = line.trim();
    !line.is_empty() && !line.starts_with('#')
}

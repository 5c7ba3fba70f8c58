//! Shared test harness for E2E integration tests.
//!
//! Wires the interpreter, the dispatcher, and the console session to one
//! dry-run drawing, exercising real code paths across all crate boundaries.

#![allow(dead_code)]

use mc_console::Session;
use mc_executor::{CommandDispatcher, DryRunExecutor, ExecResult, ExecutionOutcome};
use mc_nlp::{InterpretResult, Interpreter};
use mc_protocol::{CommandReport, ParsedCommand};

/// End-to-end harness: one interpreter and one simulated drawing.
pub struct TestHarness {
    pub interpreter: Interpreter,
    /// In-memory backend; inspect it to assert on the drawing.
    pub backend: DryRunExecutor,
}

impl TestHarness {
    /// Lenient interpreter over an empty drawing.
    pub fn new() -> Self {
        Self {
            interpreter: Interpreter::new(),
            backend: DryRunExecutor::new(),
        }
    }

    /// Strict interpreter over an empty drawing.
    pub fn strict() -> Self {
        Self {
            interpreter: Interpreter::strict(),
            backend: DryRunExecutor::new(),
        }
    }

    pub fn parse(&self, text: &str) -> InterpretResult<ParsedCommand> {
        self.interpreter.parse(text)
    }

    /// Interpret and execute, panicking if the text does not interpret.
    pub async fn run(&self, text: &str) -> ExecResult<ExecutionOutcome> {
        let command = self
            .parse(text)
            .unwrap_or_else(|e| panic!("'{text}' did not interpret: {e}"));
        CommandDispatcher::new(&self.backend).dispatch(&command).await
    }

    /// Full console path: text in, report out.
    pub async fn report(&self, text: &str) -> CommandReport {
        Session::new(self.interpreter, &self.backend).handle(text).await
    }

    /// Run each instruction through the console path, in order.
    pub async fn script(&self, lines: &[&str]) -> Vec<CommandReport> {
        let mut reports = Vec::with_capacity(lines.len());
        for line in lines {
            reports.push(self.report(line).await);
        }
        reports
    }
}

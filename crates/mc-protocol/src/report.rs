use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::commands::ParsedCommand;

/// Outcome of handling one instruction end to end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportStatus {
    /// Interpreted and executed.
    Completed,
    /// The interpreter could not turn the text into a command.
    Rejected,
    /// Interpreted, but the executor failed.
    Failed,
}

/// Audit record for one instruction: what was asked, what it was parsed
/// into, and what the executor made of it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandReport {
    /// Unique report ID (UUIDv7 for time-sortability).
    pub id: Uuid,
    /// Original natural-language input.
    pub raw_text: String,
    pub status: ReportStatus,
    /// Parsed command (absent when rejected).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub command: Option<ParsedCommand>,
    /// Human-readable executor result.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_text: Option<String>,
    /// Structured executor result.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_data: Option<serde_json::Value>,
    /// Error message if status is Rejected or Failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Processing latency in milliseconds.
    pub latency_ms: u64,
    pub responded_at: DateTime<Utc>,
}

impl CommandReport {
    pub fn completed(
        command: ParsedCommand,
        response_text: impl Into<String>,
        response_data: serde_json::Value,
        latency_ms: u64,
    ) -> Self {
        Self {
            id: Uuid::now_v7(),
            raw_text: command.raw_text().to_string(),
            status: ReportStatus::Completed,
            command: Some(command),
            response_text: Some(response_text.into()),
            response_data: Some(response_data),
            error: None,
            latency_ms,
            responded_at: Utc::now(),
        }
    }

    pub fn rejected(raw_text: impl Into<String>, error: impl Into<String>, latency_ms: u64) -> Self {
        Self {
            id: Uuid::now_v7(),
            raw_text: raw_text.into(),
            status: ReportStatus::Rejected,
            command: None,
            response_text: None,
            response_data: None,
            error: Some(error.into()),
            latency_ms,
            responded_at: Utc::now(),
        }
    }

    pub fn failed(command: ParsedCommand, error: impl Into<String>, latency_ms: u64) -> Self {
        Self {
            id: Uuid::now_v7(),
            raw_text: command.raw_text().to_string(),
            status: ReportStatus::Failed,
            command: Some(command),
            response_text: None,
            response_data: None,
            error: Some(error.into()),
            latency_ms,
            responded_at: Utc::now(),
        }
    }
}

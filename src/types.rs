/// Core data structures shared by the views and hooks
///
/// This module defines the values the execution engine and state layer hand
/// to the rendering layer: view selection, run options, output values,
/// planned change actions and diagnostics.
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which family of views renders the command result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    /// Interactive, human-readable text
    Human,
    /// One JSON message per line, for automation consumers
    Json,
}

impl ViewKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ViewKind::Human => "human",
            ViewKind::Json => "json",
        }
    }
}

impl FromStr for ViewKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "human" => Ok(ViewKind::Human),
            "json" => Ok(ViewKind::Json),
            other => Err(format!("unsupported view kind '{}' (expected 'human' or 'json')", other)),
        }
    }
}

impl fmt::Display for ViewKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Options for an apply view
///
/// `destroy` selects delete-completion phrasing. `in_automation` suppresses
/// interactive-only hints. The two flags are independent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ApplyOptions {
    pub destroy: bool,
    pub in_automation: bool,
}

impl ApplyOptions {
    /// The subcommand this run corresponds to
    pub fn command(&self) -> &'static str {
        if self.destroy { "destroy" } else { "apply" }
    }
}

/// A named root-module output, as recorded in state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputValue {
    pub value: serde_json::Value,
    #[serde(default)]
    pub sensitive: bool,
}

impl OutputValue {
    pub fn new(value: impl Into<serde_json::Value>) -> Self {
        Self { value: value.into(), sensitive: false }
    }

    pub fn sensitive(value: impl Into<serde_json::Value>) -> Self {
        Self { value: value.into(), sensitive: true }
    }
}

/// Planned action for a single resource instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChangeAction {
    #[serde(alias = "noop")]
    NoOp,
    Create,
    Read,
    Update,
    #[serde(alias = "replace")]
    DeleteThenCreate,
    CreateThenDelete,
    Delete,
    /// Any action name this layer does not understand
    #[serde(other)]
    Unrecognized,
}

impl ChangeAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChangeAction::NoOp => "noop",
            ChangeAction::Create => "create",
            ChangeAction::Read => "read",
            ChangeAction::Update => "update",
            ChangeAction::DeleteThenCreate | ChangeAction::CreateThenDelete => "replace",
            ChangeAction::Delete => "delete",
            ChangeAction::Unrecognized => "unknown",
        }
    }

    pub fn is_replace(&self) -> bool {
        matches!(self, ChangeAction::DeleteThenCreate | ChangeAction::CreateThenDelete)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

impl Severity {
    pub fn label(&self) -> &'static str {
        match self {
            Severity::Error => "Error",
            Severity::Warning => "Warning",
        }
    }
}

/// A problem reported by the engine or by input validation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub summary: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl Diagnostic {
    pub fn error(summary: impl Into<String>, detail: Option<String>) -> Self {
        Self { severity: Severity::Error, summary: summary.into(), detail }
    }

    pub fn warning(summary: impl Into<String>, detail: Option<String>) -> Self {
        Self { severity: Severity::Warning, summary: summary.into(), detail }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

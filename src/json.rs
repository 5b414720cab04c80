//! Machine-readable view messages.
//!
//! Every message is a single JSON object on its own line carrying the common
//! envelope (`@level`, `@message`, `@module`, `@timestamp`, `type`) plus a
//! type-specific payload.

use crate::hooks::Hook;
use crate::types::{ChangeAction, Diagnostic, OutputValue, Severity};
use crate::ui_hook::{StartTimes, complete_message, format_elapsed, start_verb};
use crate::view::View;
use chrono::{SecondsFormat, Utc};
use serde_json::{Value, json};
use std::collections::BTreeMap;
use std::sync::Arc;

pub const MODULE: &str = "applyview.ui";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Info,
    Warn,
    Error,
}

impl Level {
    fn as_str(&self) -> &'static str {
        match self {
            Level::Info => "info",
            Level::Warn => "warn",
            Level::Error => "error",
        }
    }
}

/// Build a message with the common envelope; object payload fields are
/// merged in at the top level.
pub fn message(level: Level, text: &str, kind: &str, payload: Value) -> Value {
    let mut msg = json!({
        "@level": level.as_str(),
        "@message": text,
        "@module": MODULE,
        "@timestamp": Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true),
        "type": kind,
    });
    if let (Value::Object(envelope), Value::Object(fields)) = (&mut msg, payload) {
        envelope.extend(fields);
    }
    msg
}

/// Write one message as a line on the standard stream
pub fn emit(view: &View, msg: &Value) {
    view.stdout(&format!("{}\n", msg));
}

/// Short type name for an output value
pub fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "dynamic",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "list",
        Value::Object(_) => "map",
    }
}

pub fn outputs_message(outputs: &BTreeMap<String, OutputValue>) -> Value {
    let entries: serde_json::Map<String, Value> = outputs
        .iter()
        .map(|(name, output)| {
            (
                name.clone(),
                json!({
                    "sensitive": output.sensitive,
                    "type": type_name(&output.value),
                    "value": output.value,
                }),
            )
        })
        .collect();

    message(Level::Info, &format!("Outputs: {}", outputs.len()), "outputs", json!({ "outputs": entries }))
}

pub fn diagnostic_message(diag: &Diagnostic) -> Value {
    let level = match diag.severity {
        Severity::Error => Level::Error,
        Severity::Warning => Level::Warn,
    };
    let text = format!("{}: {}", diag.severity.label(), diag.summary);
    message(level, &text, "diagnostic", json!({ "diagnostic": diag }))
}

/// Emits `apply_start`, `apply_complete` and `apply_errored` messages
pub struct JsonHook {
    view: Arc<View>,
    started: StartTimes,
}

impl JsonHook {
    pub fn new(view: Arc<View>) -> Self {
        Self { view, started: StartTimes::default() }
    }
}

impl Hook for JsonHook {
    fn pre_apply(&self, addr: &str, action: ChangeAction) {
        let Some(verb) = start_verb(action) else {
            return;
        };
        self.started.start(addr, action);

        let payload = json!({ "hook": { "resource": { "addr": addr }, "action": action.as_str() } });
        emit(&self.view, &message(Level::Info, &format!("{}: {}", addr, verb), "apply_start", payload));
    }

    fn post_apply(&self, addr: &str, _action: ChangeAction, error: Option<&str>) {
        let Some((action, elapsed)) = self.started.finish(addr) else {
            return;
        };

        let msg = match error {
            Some(error) => message(
                Level::Error,
                &format!("{}: {} errored after {}", addr, action.as_str(), format_elapsed(elapsed)),
                "apply_errored",
                json!({ "hook": {
                    "resource": { "addr": addr },
                    "action": action.as_str(),
                    "elapsed_seconds": elapsed.as_secs(),
                    "error": error,
                }}),
            ),
            None => {
                let done = complete_message(action).unwrap_or("Apply complete");
                message(
                    Level::Info,
                    &format!("{}: {} after {}", addr, done, format_elapsed(elapsed)),
                    "apply_complete",
                    json!({ "hook": {
                        "resource": { "addr": addr },
                        "action": action.as_str(),
                        "elapsed_seconds": elapsed.as_secs(),
                    }}),
                )
            }
        };
        emit(&self.view, &msg);
    }
}

#[cfg(test)]
#[path = "json_test.rs"]
mod json_test;

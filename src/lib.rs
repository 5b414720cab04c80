//! Result rendering and change accounting for `apply` and `destroy` runs.
//!
//! The execution engine registers the hooks an apply view hands out, drives
//! them with lifecycle notifications while it works, and then asks the view
//! to render the change summary and the root-module outputs.
//!
//! # Module Organization
//!
//! - `apply` - Apply/destroy views and the factory that builds them
//! - `operation` - Progress and diagnostics shared by every engine operation
//! - `hooks` - Hook trait and the resource counting hook
//! - `ui_hook` - Progress lines for the human view
//! - `json` - Machine-readable messages and the JSON progress hook
//! - `format` - Output value literals and text wrapping
//! - `view` / `streams` - Base view and its output sinks
//! - `replay` - Loading and replaying a recorded apply run
//! - `cli` / `config` / `ui` - Command-line front end

pub mod apply;
pub mod cli;
pub mod config;
pub mod format;
pub mod hooks;
pub mod json;
pub mod operation;
pub mod replay;
pub mod streams;
pub mod types;
pub mod ui;
pub mod ui_hook;
pub mod view;

pub use apply::{ApplyView, new_apply};
pub use hooks::{ChangeKind, CountHook, Hook, ResourceCounts};
pub use operation::{OperationView, new_operation};
pub use streams::Streams;
pub use types::{ApplyOptions, ChangeAction, Diagnostic, OutputValue, Severity, ViewKind};
pub use view::View;

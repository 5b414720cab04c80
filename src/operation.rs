//! Operation views: rendering shared by every command that runs the engine.
//!
//! An operation view owns the per-resource progress rendering and the
//! diagnostics the engine reports while it works. Apply views hand one out so
//! their progress lines look the same as those of any other operation.

use crate::hooks::Hook;
use crate::json::{self, JsonHook};
use crate::types::{Diagnostic, ViewKind};
use crate::ui_hook::UiHook;
use crate::view::View;
use std::sync::Arc;

pub trait OperationView: Send + Sync {
    fn kind(&self) -> ViewKind;
    fn in_automation(&self) -> bool;

    /// A fresh hook rendering per-resource progress in this view's format
    fn progress_hook(&self) -> Arc<dyn Hook>;
    fn diagnostics(&self, diags: &[Diagnostic]);
}

pub fn new_operation(kind: ViewKind, in_automation: bool, view: Arc<View>) -> Box<dyn OperationView> {
    match kind {
        ViewKind::Human => Box::new(OperationHuman { view, in_automation }),
        ViewKind::Json => Box::new(OperationJson { view, in_automation }),
    }
}

pub struct OperationHuman {
    view: Arc<View>,
    in_automation: bool,
}

impl OperationView for OperationHuman {
    fn kind(&self) -> ViewKind {
        ViewKind::Human
    }

    fn in_automation(&self) -> bool {
        self.in_automation
    }

    fn progress_hook(&self) -> Arc<dyn Hook> {
        Arc::new(UiHook::new(Arc::clone(&self.view)))
    }

    fn diagnostics(&self, diags: &[Diagnostic]) {
        self.view.diagnostics(diags);
    }
}

pub struct OperationJson {
    view: Arc<View>,
    in_automation: bool,
}

impl OperationView for OperationJson {
    fn kind(&self) -> ViewKind {
        ViewKind::Json
    }

    fn in_automation(&self) -> bool {
        self.in_automation
    }

    fn progress_hook(&self) -> Arc<dyn Hook> {
        Arc::new(JsonHook::new(Arc::clone(&self.view)))
    }

    fn diagnostics(&self, diags: &[Diagnostic]) {
        for diag in diags {
            json::emit(&self.view, &json::diagnostic_message(diag));
        }
    }
}

#[cfg(test)]
#[path = "operation_test.rs"]
mod operation_test;

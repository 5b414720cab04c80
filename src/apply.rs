//! Views for the `apply` and `destroy` commands.
//!
//! A view renders the final outputs, the resource change summary and usage
//! help, hands out the operation view for in-flight progress, and supplies
//! the hooks the engine must register so the summary has something to count.

use crate::format::format_output_values;
use crate::hooks::{CountHook, Hook, ResourceCounts};
use crate::json::{self, Level};
use crate::operation::{OperationView, new_operation};
use crate::types::{ApplyOptions, Diagnostic, OutputValue, ViewKind};
use crate::view::View;
use log::debug;
use serde_json::json;
use std::collections::BTreeMap;
use std::sync::Arc;

pub trait ApplyView: Send + Sync {
    fn kind(&self) -> ViewKind;
    fn options(&self) -> ApplyOptions;

    /// Render root-module outputs; renders nothing at all when there are none
    fn outputs(&self, outputs: &BTreeMap<String, OutputValue>);
    /// Render the change summary from the count hook
    fn resource_count(&self);
    fn help_prompt(&self);
    fn operation(&self) -> Box<dyn OperationView>;
    /// The same counter `new_apply` returned
    fn count_hook(&self) -> Arc<CountHook>;

    /// Hooks to register with the engine, in order. Exactly one is the count hook.
    fn hooks(&self) -> Vec<Arc<dyn Hook>> {
        let count: Arc<dyn Hook> = self.count_hook();
        vec![count, self.operation().progress_hook()]
    }

    fn diagnostics(&self, diags: &[Diagnostic]) {
        self.operation().diagnostics(diags);
    }
}

/// Build the apply view for `kind`.
///
/// The count hook is returned alongside the view so callers can read the
/// final counters without searching the hook list.
pub fn new_apply(kind: ViewKind, options: ApplyOptions, view: Arc<View>) -> (Box<dyn ApplyView>, Arc<CountHook>) {
    let count = Arc::new(CountHook::new());
    debug!("Building {} apply view (destroy={}, in_automation={})", kind, options.destroy, options.in_automation);

    let apply: Box<dyn ApplyView> = match kind {
        ViewKind::Human => Box::new(ApplyHuman { view, options, count: Arc::clone(&count) }),
        ViewKind::Json => Box::new(ApplyJson { view, options, count: Arc::clone(&count) }),
    };
    (apply, count)
}

/// The closing sentence for a run
pub fn summary_sentence(options: ApplyOptions, counts: ResourceCounts) -> String {
    if options.destroy {
        format!("Destroy complete! Resources: {} destroyed.", counts.removed)
    } else {
        format!(
            "Apply complete! Resources: {} added, {} changed, {} destroyed.",
            counts.added, counts.changed, counts.removed
        )
    }
}

pub struct ApplyHuman {
    view: Arc<View>,
    options: ApplyOptions,
    count: Arc<CountHook>,
}

impl ApplyView for ApplyHuman {
    fn kind(&self) -> ViewKind {
        ViewKind::Human
    }

    fn options(&self) -> ApplyOptions {
        self.options
    }

    fn outputs(&self, outputs: &BTreeMap<String, OutputValue>) {
        if outputs.is_empty() {
            return;
        }
        let header = self.view.colorize("Outputs:", term::color::GREEN);
        self.view.stdout(&format!("\n{}\n\n{}", header, format_output_values(outputs)));
    }

    fn resource_count(&self) {
        let sentence = summary_sentence(self.options, self.count.counts());
        self.view.stdout(&format!("\n{}\n", self.view.colorize(&sentence, term::color::GREEN)));
    }

    fn help_prompt(&self) {
        self.view.help_prompt(self.options.command());
    }

    fn operation(&self) -> Box<dyn OperationView> {
        new_operation(ViewKind::Human, self.options.in_automation, Arc::clone(&self.view))
    }

    fn count_hook(&self) -> Arc<CountHook> {
        Arc::clone(&self.count)
    }
}

pub struct ApplyJson {
    view: Arc<View>,
    options: ApplyOptions,
    count: Arc<CountHook>,
}

impl ApplyView for ApplyJson {
    fn kind(&self) -> ViewKind {
        ViewKind::Json
    }

    fn options(&self) -> ApplyOptions {
        self.options
    }

    fn outputs(&self, outputs: &BTreeMap<String, OutputValue>) {
        if outputs.is_empty() {
            return;
        }
        json::emit(&self.view, &json::outputs_message(outputs));
    }

    fn resource_count(&self) {
        let counts = self.count.counts();
        let payload = json!({ "changes": {
            "add": counts.added,
            "change": counts.changed,
            "remove": counts.removed,
            "operation": self.options.command(),
        }});
        let msg = json::message(Level::Info, &summary_sentence(self.options, counts), "change_summary", payload);
        json::emit(&self.view, &msg);
    }

    // Usage hints are for interactive readers only
    fn help_prompt(&self) {}

    fn operation(&self) -> Box<dyn OperationView> {
        new_operation(ViewKind::Json, self.options.in_automation, Arc::clone(&self.view))
    }

    fn count_hook(&self) -> Arc<CountHook> {
        Arc::clone(&self.count)
    }
}

#[cfg(test)]
#[path = "apply_test.rs"]
mod apply_test;

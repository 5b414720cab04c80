/// Progress lines for the human view
///
/// Prints one line when the engine starts working on a resource instance and
/// one when it finishes, with the elapsed time. Failures print nothing here;
/// the engine reports them as diagnostics.
use crate::hooks::{Hook, lock};
use crate::types::ChangeAction;
use crate::view::View;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

/// When each in-flight resource started, and with which action.
///
/// Shared by the progress hooks of both views.
#[derive(Default)]
pub(crate) struct StartTimes {
    started: Mutex<HashMap<String, (ChangeAction, Instant)>>,
}

impl StartTimes {
    pub(crate) fn start(&self, addr: &str, action: ChangeAction) {
        lock(&self.started).insert(addr.to_string(), (action, Instant::now()));
    }

    /// Forget `addr`, returning its action and time since start
    pub(crate) fn finish(&self, addr: &str) -> Option<(ChangeAction, Duration)> {
        lock(&self.started).remove(addr).map(|(action, started)| (action, started.elapsed()))
    }
}

pub struct UiHook {
    view: Arc<View>,
    started: StartTimes,
}

impl UiHook {
    pub fn new(view: Arc<View>) -> Self {
        Self { view, started: StartTimes::default() }
    }
}

impl Hook for UiHook {
    fn pre_apply(&self, addr: &str, action: ChangeAction) {
        let Some(verb) = start_verb(action) else {
            return;
        };

        self.started.start(addr, action);
        self.view.stdout(&format!("{}: {}\n", self.view.bold(addr), verb));
    }

    fn post_apply(&self, addr: &str, _action: ChangeAction, error: Option<&str>) {
        let Some((action, elapsed)) = self.started.finish(addr) else {
            return;
        };
        if error.is_some() {
            return;
        }

        if let Some(msg) = complete_message(action) {
            self.view.stdout(&format!("{}: {} after {}\n", self.view.bold(addr), msg, format_elapsed(elapsed)));
        }
    }
}

pub(crate) fn start_verb(action: ChangeAction) -> Option<&'static str> {
    match action {
        ChangeAction::Create => Some("Creating..."),
        ChangeAction::Update => Some("Modifying..."),
        ChangeAction::Delete => Some("Destroying..."),
        ChangeAction::Read => Some("Reading..."),
        ChangeAction::DeleteThenCreate | ChangeAction::CreateThenDelete => Some("Replacing..."),
        ChangeAction::NoOp | ChangeAction::Unrecognized => None,
    }
}

pub(crate) fn complete_message(action: ChangeAction) -> Option<&'static str> {
    match action {
        ChangeAction::Create => Some("Creation complete"),
        ChangeAction::Update => Some("Modifications complete"),
        ChangeAction::Delete => Some("Destruction complete"),
        ChangeAction::Read => Some("Read complete"),
        ChangeAction::DeleteThenCreate | ChangeAction::CreateThenDelete => Some("Replacement complete"),
        ChangeAction::NoOp | ChangeAction::Unrecognized => None,
    }
}

/// Whole seconds, with minutes once past one minute: `4s`, `2m5s`
pub fn format_elapsed(elapsed: Duration) -> String {
    let secs = elapsed.as_secs();
    if secs >= 60 { format!("{}m{}s", secs / 60, secs % 60) } else { format!("{}s", secs) }
}

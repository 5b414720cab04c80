//! Lifecycle hooks registered with the execution engine.
//!
//! The engine notifies every registered hook before and after it applies a
//! change to a resource instance. Hooks observe; they never fail the run.
//! Notifications may arrive from many worker threads at once.

use crate::types::ChangeAction;
use log::debug;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard};

/// Observer of resource lifecycle notifications
pub trait Hook: Send + Sync {
    /// Called before the engine applies `action` to the instance at `addr`
    fn pre_apply(&self, _addr: &str, _action: ChangeAction) {}

    /// Called after the apply finished; `error` is set when it failed
    fn post_apply(&self, _addr: &str, _action: ChangeAction, _error: Option<&str>) {}
}

/// Lock hook state, carrying on with the data if another worker panicked
/// while holding it.
pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    match mutex.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

/// A single counted outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    Added,
    Changed,
    Removed,
}

/// Snapshot of the counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResourceCounts {
    pub added: usize,
    pub changed: usize,
    pub removed: usize,
}

/// Counts resources added, changed and removed during an apply.
///
/// Counters only ever grow. Only managed resources whose apply succeeded are
/// counted; data sources and no-op or read actions are not.
#[derive(Default)]
pub struct CountHook {
    added: AtomicUsize,
    changed: AtomicUsize,
    removed: AtomicUsize,
    pending: Mutex<HashMap<String, ChangeAction>>,
}

impl CountHook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Increment one counter by exactly one
    pub fn record(&self, kind: ChangeKind) {
        let counter = match kind {
            ChangeKind::Added => &self.added,
            ChangeKind::Changed => &self.changed,
            ChangeKind::Removed => &self.removed,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    pub fn counts(&self) -> ResourceCounts {
        ResourceCounts {
            added: self.added.load(Ordering::Relaxed),
            changed: self.changed.load(Ordering::Relaxed),
            removed: self.removed.load(Ordering::Relaxed),
        }
    }

    fn pending(&self) -> MutexGuard<'_, HashMap<String, ChangeAction>> {
        lock(&self.pending)
    }
}

impl Hook for CountHook {
    fn pre_apply(&self, addr: &str, action: ChangeAction) {
        if is_data_source(addr) {
            return;
        }
        self.pending().insert(addr.to_string(), action);
    }

    fn post_apply(&self, addr: &str, _action: ChangeAction, error: Option<&str>) {
        if is_data_source(addr) {
            return;
        }

        // The planned action from pre_apply is authoritative
        let Some(action) = self.pending().remove(addr) else {
            debug!("Ignoring post-apply for {} with no matching pre-apply", addr);
            return;
        };

        if let Some(error) = error {
            debug!("Not counting {} ({}): {}", addr, action.as_str(), error);
            return;
        }

        match action {
            ChangeAction::Create => self.record(ChangeKind::Added),
            ChangeAction::Update => self.record(ChangeKind::Changed),
            ChangeAction::Delete => self.record(ChangeKind::Removed),
            ChangeAction::DeleteThenCreate | ChangeAction::CreateThenDelete => {
                self.record(ChangeKind::Added);
                self.record(ChangeKind::Removed);
            }
            ChangeAction::NoOp | ChangeAction::Read | ChangeAction::Unrecognized => {
                debug!("Not counting {} action for {}", action.as_str(), addr);
            }
        }
    }
}

/// Whether `addr` names a data resource, at root or inside modules
/// (`data.x.y`, `module.a.data.x.y`, `module.m["a.b"].data.x.y`).
pub fn is_data_source(addr: &str) -> bool {
    let mut parts = address_steps(addr).into_iter();
    loop {
        match parts.next() {
            Some("module") => {
                // Skip the module name (which may carry an instance key)
                if parts.next().is_none() {
                    return false;
                }
            }
            Some("data") => return true,
            _ => return false,
        }
    }
}

/// Split an address on the dots between its steps. Dots inside an instance
/// key (`["a.b"]`) belong to the key.
fn address_steps(addr: &str) -> Vec<&str> {
    let mut steps = Vec::new();
    let mut start = 0;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (i, c) in addr.char_indices() {
        if in_string {
            match c {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match c {
            '"' => in_string = true,
            '[' => depth += 1,
            ']' => depth = depth.saturating_sub(1),
            '.' if depth == 0 => {
                steps.push(&addr[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    steps.push(&addr[start..]);
    steps
}

#[cfg(test)]
#[path = "hooks_test.rs"]
mod hooks_test;

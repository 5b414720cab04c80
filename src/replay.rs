/// Replay of a recorded apply run
///
/// This module handles:
/// - Loading an apply record (lifecycle events, outputs, diagnostics)
/// - Dispatching lifecycle events to the registered hooks from a pool of
///   worker threads, the way the engine walks independent resources in
///   parallel
/// - Collecting the resources whose apply failed
use crate::hooks::Hook;
use crate::types::{ChangeAction, Diagnostic, OutputValue};
use log::{debug, warn};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::thread;

/// One lifecycle notification from the engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "hook", rename_all = "snake_case")]
pub enum Event {
    PreApply {
        addr: String,
        action: ChangeAction,
    },
    PostApply {
        addr: String,
        action: ChangeAction,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        error: Option<String>,
    },
    /// Any other notification kind; skipped during replay
    #[serde(other)]
    Unrecognized,
}

impl Event {
    pub fn addr(&self) -> Option<&str> {
        match self {
            Event::PreApply { addr, .. } | Event::PostApply { addr, .. } => Some(addr),
            Event::Unrecognized => None,
        }
    }
}

/// Everything the engine and state layer produced for one run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApplyRecord {
    #[serde(default, deserialize_with = "lenient_events")]
    pub events: Vec<Event>,
    #[serde(default)]
    pub outputs: BTreeMap<String, OutputValue>,
    #[serde(default)]
    pub diagnostics: Vec<Diagnostic>,
}

/// Notifications that do not parse are dropped instead of failing the record
fn lenient_events<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<Event>, D::Error> {
    let raw = Vec::<Value>::deserialize(deserializer)?;
    Ok(raw
        .into_iter()
        .filter_map(|value| match serde_json::from_value::<Event>(value) {
            Ok(event) => Some(event),
            Err(e) => {
                debug!("Skipping malformed lifecycle notification: {}", e);
                None
            }
        })
        .collect())
}

/// A resource whose apply reported an error
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedResource {
    pub addr: String,
    pub action: ChangeAction,
    pub error: String,
}

impl FailedResource {
    pub fn to_diagnostic(&self) -> Diagnostic {
        Diagnostic::error(
            format!("Failed to {} {}", self.action.as_str(), self.addr),
            Some(self.error.clone()),
        )
    }
}

#[derive(Debug, Default)]
pub struct ReplaySummary {
    pub events: usize,
    pub failed: Vec<FailedResource>,
}

pub fn parse_record(text: &str) -> Result<ApplyRecord, String> {
    serde_json::from_str(text).map_err(|e| format!("Invalid apply record: {}", e))
}

pub fn load_record(path: &Path) -> Result<ApplyRecord, String> {
    debug!("Loading apply record from {:?}", path);
    let text = fs::read_to_string(path).map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;
    parse_record(&text)
}

/// Group events by resource address, keeping first-seen order of addresses
/// and the original order of events within each address. Unrecognized
/// notifications are dropped here.
fn group_by_resource(events: &[Event]) -> Vec<Vec<&Event>> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<Vec<&Event>> = Vec::new();
    for event in events {
        let Some(addr) = event.addr() else {
            debug!("Skipping unrecognized lifecycle notification");
            continue;
        };
        let slot = *index.entry(addr).or_insert_with(|| {
            groups.push(Vec::new());
            groups.len() - 1
        });
        groups[slot].push(event);
    }
    groups
}

/// Deliver `events` to every hook, in registration order.
///
/// Events for one resource are always delivered in order by a single worker;
/// different resources may be handled concurrently by up to `parallelism`
/// workers.
pub fn replay(events: &[Event], hooks: &[Arc<dyn Hook>], parallelism: usize) -> ReplaySummary {
    let groups = group_by_resource(events);
    let workers = parallelism.max(1).min(groups.len().max(1));
    debug!("Replaying {} events for {} resources on {} workers", events.len(), groups.len(), workers);

    let mut buckets: Vec<Vec<Vec<&Event>>> = (0..workers).map(|_| Vec::new()).collect();
    for (i, group) in groups.into_iter().enumerate() {
        buckets[i % workers].push(group);
    }

    let mut summary = ReplaySummary::default();
    thread::scope(|scope| {
        let handles: Vec<_> = buckets.into_iter().map(|bucket| scope.spawn(move || run_worker(bucket, hooks))).collect();

        for handle in handles {
            match handle.join() {
                Ok(worker) => {
                    summary.events += worker.events;
                    summary.failed.extend(worker.failed);
                }
                Err(_) => warn!("Replay worker panicked; its remaining events were dropped"),
            }
        }
    });

    summary.failed.sort_by(|a, b| a.addr.cmp(&b.addr));
    summary
}

fn run_worker(bucket: Vec<Vec<&Event>>, hooks: &[Arc<dyn Hook>]) -> ReplaySummary {
    let mut summary = ReplaySummary::default();

    for event in bucket.into_iter().flatten() {
        for hook in hooks {
            match event {
                Event::PreApply { addr, action } => hook.pre_apply(addr, *action),
                Event::PostApply { addr, action, error } => hook.post_apply(addr, *action, error.as_deref()),
                Event::Unrecognized => {}
            }
        }
        summary.events += 1;

        if let Event::PostApply { addr, action, error: Some(error) } = event {
            summary.failed.push(FailedResource { addr: addr.clone(), action: *action, error: error.clone() });
        }
    }

    summary
}

#[cfg(test)]
#[path = "replay_test.rs"]
mod replay_test;

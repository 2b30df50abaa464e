//! Detection report types.
//!
//! A [`Report`] keeps matches and faults apart. The older single-list shape
//! (each label wrapped in its own list, an error string appended at the end)
//! is only produced on request by [`Report::to_legacy`].

use serde::Serialize;
use serde_json::Value;

use crate::store::StoreFault;

/// A descriptor whose marker was found.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Match {
    /// Version label of the matching descriptor.
    pub label: String,
}

/// A descriptor whose read failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProbeFault {
    /// Version label of the descriptor being probed.
    pub label: String,
    /// Registry path that was read.
    pub path: String,
    /// Registry value name that was read.
    pub key: String,
    /// Fault description.
    pub message: String,
}

impl ProbeFault {
    /// Record a store fault against a descriptor.
    pub fn new(label: &str, fault: &StoreFault) -> Self {
        let (path, key) = match fault {
            StoreFault::AccessDenied { path, key } | StoreFault::ReadFailed { path, key, .. } => {
                (path.clone(), key.clone())
            }
        };
        Self {
            label: label.to_string(),
            path,
            key,
            message: fault.to_string(),
        }
    }
}

/// Outcome of one scan of the reference table.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Report {
    /// False when the host is not Windows; nothing was read.
    pub applicable: bool,
    /// Matching descriptors in table order; labels may repeat.
    pub matches: Vec<Match>,
    /// Failed reads in table order.
    pub faults: Vec<ProbeFault>,
    /// The scan stopped at the first fault.
    pub aborted: bool,
}

impl Report {
    /// The empty report returned off Windows.
    pub fn not_applicable() -> Self {
        Self::default()
    }

    /// An empty report for a scan that is about to run.
    pub fn applicable() -> Self {
        Self {
            applicable: true,
            ..Default::default()
        }
    }

    /// Matched labels in order, duplicates kept.
    pub fn labels(&self) -> Vec<&str> {
        self.matches.iter().map(|m| m.label.as_str()).collect()
    }

    /// Whether any read failed.
    pub fn has_faults(&self) -> bool {
        !self.faults.is_empty()
    }

    /// Render in the historical list-of-lists shape.
    ///
    /// Each match becomes `["label"]`. When the scan aborted, the first
    /// fault is appended as a bare string.
    pub fn to_legacy(&self) -> Vec<Value> {
        let mut entries: Vec<Value> = self
            .matches
            .iter()
            .map(|m| Value::Array(vec![Value::String(m.label.clone())]))
            .collect();

        if self.aborted {
            if let Some(fault) = self.faults.first() {
                entries.push(Value::String(fault.message.clone()));
            }
        }

        entries
    }
}

//! In-memory registry snapshot.
//!
//! A `FixtureStore` answers reads from a fixed table of values and injected
//! faults. It backs the unit tests and the `--fixture` flag, which replays a
//! registry captured elsewhere without touching the host.
//!
//! # Fixture format
//!
//! ```yaml
//! windows: true
//! entries:
//!   - path: SOFTWARE\Microsoft\NET Framework Setup\NDP\v4\Full
//!     key: Release
//!     dword: 528040
//!   - hive: HKLM
//!     path: Software\Microsoft\NET Framework Setup\NDP\v3.5
//!     key: Install
//!     fault: access denied
//! ```
//!
//! `unavailable: <reason>` replays a Windows host whose registry cannot be
//! read at all.
//!
//! Path and key lookups ignore ASCII case, like the registry itself.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use super::{ConfigStore, FixedPlatform, Hive, RegValue, StoreFault};
use crate::error::{DetectError, Result};

/// On-disk fixture document.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct FixtureFile {
    /// Whether the captured host was Windows.
    #[serde(default = "default_windows")]
    windows: bool,

    /// The store cannot be used on the captured host, for this reason.
    #[serde(default)]
    unavailable: Option<String>,

    #[serde(default)]
    entries: Vec<FixtureEntry>,
}

fn default_windows() -> bool {
    true
}

/// One registry value or injected fault.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct FixtureEntry {
    #[serde(default)]
    hive: Hive,
    path: String,
    key: String,
    dword: Option<u32>,
    qword: Option<u64>,
    string: Option<String>,
    /// Read fails with this message ("access denied" maps to AccessDenied).
    fault: Option<String>,
}

#[derive(Debug, Clone)]
enum Outcome {
    Value(RegValue),
    Fault(String),
}

type Location = (Hive, String, String);

fn location(hive: Hive, path: &str, key: &str) -> Location {
    (hive, path.to_ascii_lowercase(), key.to_ascii_lowercase())
}

/// Registry store answering from a fixed snapshot.
#[derive(Debug, Default)]
pub struct FixtureStore {
    windows: bool,
    unavailable: Option<String>,
    entries: HashMap<Location, Outcome>,
    reads: RefCell<Vec<(String, String)>>,
}

impl FixtureStore {
    /// Create an empty Windows snapshot.
    pub fn new() -> Self {
        Self {
            windows: true,
            ..Default::default()
        }
    }

    /// Mark the snapshot as captured on a non-Windows host.
    pub fn non_windows(mut self) -> Self {
        self.windows = false;
        self
    }

    /// Make the store report itself unusable.
    pub fn unavailable(mut self, reason: &str) -> Self {
        self.unavailable = Some(reason.to_string());
        self
    }

    /// Add a value.
    pub fn with_value(mut self, hive: Hive, path: &str, key: &str, value: RegValue) -> Self {
        self.entries
            .insert(location(hive, path, key), Outcome::Value(value));
        self
    }

    /// Add a DWORD value under HKLM.
    pub fn with_dword(self, path: &str, key: &str, value: u32) -> Self {
        self.with_value(Hive::LocalMachine, path, key, RegValue::Dword(value))
    }

    /// Make reads of a location fail.
    pub fn with_fault(mut self, hive: Hive, path: &str, key: &str, message: &str) -> Self {
        self.entries
            .insert(location(hive, path, key), Outcome::Fault(message.to_string()));
        self
    }

    /// Parse a YAML fixture document.
    pub fn from_yaml_str(source: &str, origin: &Path) -> Result<Self> {
        let file: FixtureFile = serde_yaml::from_str(source).map_err(|e| DetectError::Fixture {
            path: origin.to_path_buf(),
            message: e.to_string(),
        })?;

        let mut store = Self {
            windows: file.windows,
            unavailable: file.unavailable,
            ..Default::default()
        };

        for (index, entry) in file.entries.into_iter().enumerate() {
            let outcome = entry_outcome(&entry).map_err(|message| DetectError::Fixture {
                path: origin.to_path_buf(),
                message: format!("entry {} ({}\\{}): {}", index + 1, entry.path, entry.key, message),
            })?;
            store
                .entries
                .insert(location(entry.hive, &entry.path, &entry.key), outcome);
        }

        Ok(store)
    }

    /// Load a YAML fixture file.
    pub fn load(path: &Path) -> Result<Self> {
        let source = fs::read_to_string(path).map_err(|e| DetectError::Fixture {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Self::from_yaml_str(&source, path)
    }

    /// Platform answer recorded with the snapshot.
    pub fn platform(&self) -> FixedPlatform {
        FixedPlatform(self.windows)
    }

    /// Number of reads served so far.
    pub fn read_count(&self) -> usize {
        self.reads.borrow().len()
    }

    /// Every (path, key) read so far, in order.
    pub fn reads(&self) -> Vec<(String, String)> {
        self.reads.borrow().clone()
    }

    /// Number of configured locations.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the snapshot has no locations.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn entry_outcome(entry: &FixtureEntry) -> std::result::Result<Outcome, String> {
    let mut outcomes = Vec::new();
    if let Some(v) = entry.dword {
        outcomes.push(Outcome::Value(RegValue::Dword(v)));
    }
    if let Some(v) = entry.qword {
        outcomes.push(Outcome::Value(RegValue::Qword(v)));
    }
    if let Some(v) = &entry.string {
        outcomes.push(Outcome::Value(RegValue::String(v.clone())));
    }
    if let Some(message) = &entry.fault {
        outcomes.push(Outcome::Fault(message.clone()));
    }

    match outcomes.len() {
        1 => Ok(outcomes.remove(0)),
        0 => Err("needs one of dword, qword, string or fault".to_string()),
        _ => Err("sets more than one of dword, qword, string or fault".to_string()),
    }
}

impl ConfigStore for FixtureStore {
    fn describe(&self) -> String {
        format!("registry fixture ({} entries)", self.entries.len())
    }

    fn ensure_available(&self) -> std::result::Result<(), String> {
        match &self.unavailable {
            Some(reason) => Err(reason.clone()),
            None => Ok(()),
        }
    }

    fn read_value(
        &self,
        root: Hive,
        path: &str,
        key: &str,
    ) -> std::result::Result<Option<RegValue>, StoreFault> {
        self.reads
            .borrow_mut()
            .push((path.to_string(), key.to_string()));

        match self.entries.get(&location(root, path, key)) {
            None => Ok(None),
            Some(Outcome::Value(value)) => Ok(Some(value.clone())),
            Some(Outcome::Fault(message)) if message.to_lowercase().contains("access denied") => {
                Err(StoreFault::AccessDenied {
                    path: path.to_string(),
                    key: key.to_string(),
                })
            }
            Some(Outcome::Fault(message)) => Err(StoreFault::ReadFailed {
                path: path.to_string(),
                key: key.to_string(),
                message: message.clone(),
            }),
        }
    }
}

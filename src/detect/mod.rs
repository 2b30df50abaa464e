//! Installed .NET Framework detection.
//!
//! [`get_installed`] walks the reference table once, reads each probe
//! location through a [`ConfigStore`] and collects the descriptors whose
//! marker matches. [`Detector`] wraps the same routine behind an explicit
//! eligibility check so callers find out about a missing `reg.exe` once,
//! up front, rather than as a fault on every descriptor.
//!
//! # Example
//!
//! ```
//! use dotnet_detect::catalog::VersionDescriptor;
//! use dotnet_detect::detect::{get_installed, ScanOptions};
//! use dotnet_detect::store::FixtureStore;
//!
//! const TABLE: &[VersionDescriptor] = &[VersionDescriptor {
//!     label: "X 1.0",
//!     probe_path: r"Software\X",
//!     probe_key: "Install",
//!     expected_value: 1,
//! }];
//!
//! let store = FixtureStore::new().with_dword(r"Software\X", "Install", 1);
//! let report = get_installed(TABLE, &store.platform(), &store, &ScanOptions::default());
//! assert_eq!(report.labels(), vec!["X 1.0"]);
//! ```

pub mod report;

pub use report::{Match, ProbeFault, Report};

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::catalog::VersionDescriptor;
use crate::error::{DetectError, Result};
use crate::store::{ConfigStore, Hive, PlatformCheck};

/// What to do when a registry read fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorPolicy {
    /// Record the fault and keep scanning.
    #[default]
    Isolate,
    /// Record the fault and stop; later descriptors are not read.
    Abort,
}

impl fmt::Display for ErrorPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorPolicy::Isolate => f.write_str("isolate"),
            ErrorPolicy::Abort => f.write_str("abort"),
        }
    }
}

impl FromStr for ErrorPolicy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "isolate" => Ok(Self::Isolate),
            "abort" => Ok(Self::Abort),
            _ => Err(format!("unknown error policy: {}", s)),
        }
    }
}

/// Scan parameters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanOptions {
    /// Hive every probe path is resolved against.
    pub root: Hive,
    /// Fault handling.
    pub policy: ErrorPolicy,
}

/// Report which descriptors in `table` are installed.
///
/// Off Windows this returns an empty, non-applicable report without
/// touching the store.
pub fn get_installed(
    table: &[VersionDescriptor],
    platform: &dyn PlatformCheck,
    store: &dyn ConfigStore,
    options: &ScanOptions,
) -> Report {
    if !platform.is_target_platform() {
        debug!("Not a Windows host; skipping registry scan");
        return Report::not_applicable();
    }

    let mut report = Report::applicable();

    for descriptor in table {
        match store.read_value(options.root, descriptor.probe_path, descriptor.probe_key) {
            Ok(Some(value)) if value.as_integer() == Some(descriptor.expected_value) => {
                debug!(
                    "{} matched {}\\{} = {}",
                    descriptor.label,
                    descriptor.probe_path,
                    descriptor.probe_key,
                    descriptor.expected_value
                );
                report.matches.push(Match {
                    label: descriptor.label.to_string(),
                });
            }
            Ok(Some(value)) => {
                debug!(
                    "{} not matched: {}\\{} is {:?}, expected {}",
                    descriptor.label,
                    descriptor.probe_path,
                    descriptor.probe_key,
                    value,
                    descriptor.expected_value
                );
            }
            Ok(None) => {
                debug!(
                    "{} not matched: {}\\{} absent",
                    descriptor.label, descriptor.probe_path, descriptor.probe_key
                );
            }
            Err(fault) => {
                warn!("Probe for {} failed: {}", descriptor.label, fault);
                report.faults.push(ProbeFault::new(descriptor.label, &fault));
                if options.policy == ErrorPolicy::Abort {
                    report.aborted = true;
                    break;
                }
            }
        }
    }

    report
}

/// Whether detection can run on this host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Eligibility {
    /// Windows host with a usable store.
    Available { store: String },
    /// Not a Windows host; scans return an empty report.
    NotApplicable,
    /// Windows host, but the store cannot be used.
    Unavailable { reason: String },
}

/// Evaluate whether `store` can serve detection on this host.
pub fn eligibility(platform: &dyn PlatformCheck, store: &dyn ConfigStore) -> Eligibility {
    if !platform.is_target_platform() {
        return Eligibility::NotApplicable;
    }
    match store.ensure_available() {
        Ok(()) => Eligibility::Available {
            store: store.describe(),
        },
        Err(reason) => Eligibility::Unavailable { reason },
    }
}

/// Detection bound to a table, platform and store that passed eligibility.
pub struct Detector<'a> {
    table: &'a [VersionDescriptor],
    platform: &'a dyn PlatformCheck,
    store: &'a dyn ConfigStore,
    options: ScanOptions,
}

impl<'a> Detector<'a> {
    /// Check eligibility once and return a ready detector.
    ///
    /// Fails with [`DetectError::Unavailable`] only on Windows hosts whose
    /// store cannot be used; other hosts get a detector whose scans are
    /// empty.
    pub fn initialize(
        table: &'a [VersionDescriptor],
        platform: &'a dyn PlatformCheck,
        store: &'a dyn ConfigStore,
        options: ScanOptions,
    ) -> Result<Self> {
        match eligibility(platform, store) {
            Eligibility::Unavailable { reason } => Err(DetectError::Unavailable { reason }),
            Eligibility::Available { store: described } => {
                debug!("Using {}", described);
                Ok(Self {
                    table,
                    platform,
                    store,
                    options,
                })
            }
            Eligibility::NotApplicable => Ok(Self {
                table,
                platform,
                store,
                options,
            }),
        }
    }

    /// Whether scans will read the registry at all.
    pub fn is_applicable(&self) -> bool {
        self.platform.is_target_platform()
    }

    /// Scan options in effect.
    pub fn options(&self) -> ScanOptions {
        self.options
    }

    /// Run one scan.
    pub fn get_installed(&self) -> Report {
        get_installed(self.table, self.platform, self.store, &self.options)
    }
}

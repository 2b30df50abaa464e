//! Reference table of known .NET Framework releases.
//!
//! Each [`VersionDescriptor`] names one registry location and the marker
//! value that proves a release is installed. The table is compiled in and
//! never changes at runtime.
//!
//! # Example
//!
//! ```
//! use dotnet_detect::catalog::{frameworks, Catalog};
//!
//! let catalog = Catalog::new(frameworks());
//! assert!(catalog.labels().contains(&".NET Framework 4.8"));
//! assert_eq!(catalog.find(".NET Framework 4.8").len(), 3);
//! ```

mod frameworks;

pub use frameworks::FRAMEWORKS;

use serde::Serialize;

/// One (label, probe location, expected marker) entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct VersionDescriptor {
    /// Human-readable version label (e.g., ".NET Framework 4.8").
    pub label: &'static str,
    /// Registry key path below the root hive.
    pub probe_path: &'static str,
    /// Registry value name read at `probe_path`.
    pub probe_key: &'static str,
    /// Marker that confirms the release when read back exactly.
    pub expected_value: u64,
}

/// The built-in .NET Framework table, in vendor order.
pub fn frameworks() -> &'static [VersionDescriptor] {
    FRAMEWORKS
}

/// Read-only view over a descriptor table.
#[derive(Debug, Clone, Copy)]
pub struct Catalog<'a> {
    descriptors: &'a [VersionDescriptor],
}

impl<'a> Catalog<'a> {
    /// Wrap a descriptor table.
    pub fn new(descriptors: &'a [VersionDescriptor]) -> Self {
        Self { descriptors }
    }

    /// All descriptors in table order.
    pub fn descriptors(&self) -> &'a [VersionDescriptor] {
        self.descriptors
    }

    /// Distinct labels in first-seen order.
    pub fn labels(&self) -> Vec<&'a str> {
        let mut labels: Vec<&'a str> = Vec::new();
        for descriptor in self.descriptors {
            if !labels.contains(&descriptor.label) {
                labels.push(descriptor.label);
            }
        }
        labels
    }

    /// Every descriptor carrying `label`, in table order.
    pub fn find(&self, label: &str) -> Vec<&'a VersionDescriptor> {
        self.descriptors
            .iter()
            .filter(|d| d.label == label)
            .collect()
    }

    /// Number of descriptors.
    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    /// Whether the table has no descriptors.
    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }
}

impl Default for Catalog<'static> {
    fn default() -> Self {
        Self::new(FRAMEWORKS)
    }
}

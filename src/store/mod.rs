//! Read-only access to the Windows registry.
//!
//! The detector never talks to the registry directly. It goes through the
//! [`ConfigStore`] trait so tests (and offline replays) can substitute a
//! [`FixtureStore`] for the real [`RegQueryStore`].
//!
//! # Modules
//!
//! - [`win_api`] - Win32 registry API store (the default on Windows)
//! - [`reg_query`] - `reg.exe query` fallback store
//! - [`fixture`] - YAML-described registry snapshot with read counting

pub mod fixture;
pub mod reg_query;
pub mod win_api;

pub use fixture::FixtureStore;
pub use reg_query::RegQueryStore;
pub use win_api::ApiStore;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Root hive a probe path is resolved against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Hive {
    /// HKEY_LOCAL_MACHINE
    #[default]
    #[serde(rename = "HKLM", alias = "hklm")]
    LocalMachine,
    /// HKEY_CURRENT_USER
    #[serde(rename = "HKCU", alias = "hkcu")]
    CurrentUser,
}

impl Hive {
    /// Short name understood by `reg.exe`.
    pub fn short_name(&self) -> &'static str {
        match self {
            Hive::LocalMachine => "HKLM",
            Hive::CurrentUser => "HKCU",
        }
    }
}

impl fmt::Display for Hive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.short_name())
    }
}

impl FromStr for Hive {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "HKLM" | "HKEY_LOCAL_MACHINE" => Ok(Self::LocalMachine),
            "HKCU" | "HKEY_CURRENT_USER" => Ok(Self::CurrentUser),
            _ => Err(format!("unknown registry hive: {}", s)),
        }
    }
}

/// Which registry view to read on 64-bit Windows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RegView {
    /// Whatever view the reading process gets by default.
    #[default]
    Default,
    /// Force the 64-bit view.
    #[serde(rename = "64")]
    Bits64,
    /// Force the 32-bit view.
    #[serde(rename = "32")]
    Bits32,
}

impl FromStr for RegView {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "default" => Ok(Self::Default),
            "64" => Ok(Self::Bits64),
            "32" => Ok(Self::Bits32),
            _ => Err(format!("unknown registry view: {}", s)),
        }
    }
}

/// How the host registry is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Backend {
    /// The Win32 registry API.
    #[default]
    Api,
    /// `reg.exe query`, for hosts where the API is not reachable.
    RegExe,
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Backend::Api => f.write_str("api"),
            Backend::RegExe => f.write_str("reg-exe"),
        }
    }
}

impl FromStr for Backend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "api" => Ok(Self::Api),
            "reg-exe" | "reg" => Ok(Self::RegExe),
            _ => Err(format!("unknown registry backend: {}", s)),
        }
    }
}

/// A typed registry value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum RegValue {
    /// REG_DWORD
    Dword(u32),
    /// REG_QWORD
    Qword(u64),
    /// REG_SZ or REG_EXPAND_SZ
    String(String),
    /// Any other type, kept verbatim.
    Other { kind: String, raw: String },
}

impl RegValue {
    /// Integer content, if this is an integer-typed value.
    ///
    /// Strings are never coerced, so a REG_SZ "1" does not equal 1.
    pub fn as_integer(&self) -> Option<u64> {
        match self {
            RegValue::Dword(v) => Some(u64::from(*v)),
            RegValue::Qword(v) => Some(*v),
            RegValue::String(_) | RegValue::Other { .. } => None,
        }
    }
}

/// A failed registry read that is not simple absence.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreFault {
    /// The key exists but cannot be opened.
    #[error("access denied reading {path}\\{key}")]
    AccessDenied { path: String, key: String },

    /// The read primitive itself failed (spawn error, unreadable output, ...).
    #[error("failed to read {path}\\{key}: {message}")]
    ReadFailed {
        path: String,
        key: String,
        message: String,
    },
}

/// Capability to read a single value from the registry.
pub trait ConfigStore {
    /// Short description used in logs and `check` output.
    fn describe(&self) -> String;

    /// Confirm the store can be used on this host.
    ///
    /// Returns a human-readable reason when it cannot.
    fn ensure_available(&self) -> Result<(), String>;

    /// Read `root\path` value `key`.
    ///
    /// `Ok(None)` means the key or value does not exist.
    fn read_value(&self, root: Hive, path: &str, key: &str)
        -> Result<Option<RegValue>, StoreFault>;
}

/// Capability to tell whether the registry applies to this host.
pub trait PlatformCheck {
    /// Whether the host is the platform the registry exists on.
    fn is_target_platform(&self) -> bool;
}

/// The real host: Windows builds are the target platform.
#[derive(Debug, Clone, Copy, Default)]
pub struct HostPlatform;

impl PlatformCheck for HostPlatform {
    fn is_target_platform(&self) -> bool {
        cfg!(target_os = "windows")
    }
}

/// A platform answer fixed up front (fixtures and tests).
#[derive(Debug, Clone, Copy)]
pub struct FixedPlatform(pub bool);

impl PlatformCheck for FixedPlatform {
    fn is_target_platform(&self) -> bool {
        self.0
    }
}

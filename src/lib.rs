//! dotnet-detect - Report which .NET Framework releases a Windows host has.
//!
//! Detection walks a compiled-in table of known releases, reads one
//! registry value per entry and reports the entries whose marker matches.
//! Read failures are carried in the report next to the matches instead of
//! replacing them.
//!
//! # Modules
//!
//! - [`catalog`] - The reference table of known releases
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Optional YAML settings file
//! - [`detect`] - The scan itself and its report
//! - [`error`] - Error types and result aliases
//! - [`shell`] - Running system tools
//! - [`store`] - Registry access: Win32 API or `reg.exe` on the host, fixtures in tests
//! - [`ui`] - Terminal output
//!
//! # Example
//!
//! ```
//! use dotnet_detect::catalog::frameworks;
//! use dotnet_detect::detect::{get_installed, ScanOptions};
//! use dotnet_detect::store::FixtureStore;
//!
//! let store = FixtureStore::new().with_dword(
//!     r"SOFTWARE\Microsoft\NET Framework Setup\NDP\v4\Full",
//!     "Release",
//!     528040,
//! );
//! let report = get_installed(frameworks(), &store.platform(), &store, &ScanOptions::default());
//! assert_eq!(report.labels(), vec![".NET Framework 4.8"]);
//! ```

pub mod catalog;
pub mod cli;
pub mod config;
pub mod detect;
pub mod error;
pub mod shell;
pub mod store;
pub mod ui;

pub use error::{DetectError, Result};

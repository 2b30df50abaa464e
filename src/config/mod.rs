//! Configuration loading and parsing.
//!
//! - Schema definitions in [`schema`]
//! - File discovery and loading in [`loader`]
//!
//! Settings resolve as built-in defaults, then the config file, then
//! command-line flags.
//!
//! # Example
//!
//! ```
//! use dotnet_detect::config::{load_config, ReportFormat, CONFIG_FILE_NAME};
//! use tempfile::TempDir;
//! use std::fs;
//!
//! let temp = TempDir::new().unwrap();
//! fs::write(temp.path().join(CONFIG_FILE_NAME), "settings:\n  format: json\n").unwrap();
//!
//! let (config, _path) = load_config(temp.path(), None).unwrap();
//! assert_eq!(config.settings.format, ReportFormat::Json);
//! ```

pub mod loader;
pub mod schema;

pub use loader::{find_config_file, load_config, load_config_file, parse_config, CONFIG_FILE_NAME};
pub use schema::{DetectConfig, ReportFormat, Settings};

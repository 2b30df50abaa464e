//! Configuration schema definitions.
//!
//! Maps the optional `dotnet-detect.yml` file:
//!
//! ```yaml
//! settings:
//!   policy: isolate   # isolate | abort
//!   format: human     # human | json | legacy
//!   view: default     # default | 64 | 32
//!   hive: HKLM        # HKLM | HKCU
//!   backend: api      # api | reg-exe
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::detect::ErrorPolicy;
use crate::store::{Backend, Hive, RegView};

/// Root configuration structure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DetectConfig {
    /// Detection settings
    pub settings: Settings,
}

/// Settings that shape a detection run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Fault handling during the scan
    pub policy: ErrorPolicy,

    /// Report rendering
    pub format: ReportFormat,

    /// Registry view on 64-bit hosts
    pub view: RegView,

    /// Root hive for probe paths
    pub hive: Hive,

    /// How the host registry is read
    pub backend: Backend,
}

/// How the `installed` report is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// Styled terminal output.
    #[default]
    Human,
    /// The structured report as JSON.
    Json,
    /// JSON list of single-label lists with an optional trailing error string.
    Legacy,
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportFormat::Human => f.write_str("human"),
            ReportFormat::Json => f.write_str("json"),
            ReportFormat::Legacy => f.write_str("legacy"),
        }
    }
}

impl FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "human" => Ok(Self::Human),
            "json" => Ok(Self::Json),
            "legacy" => Ok(Self::Legacy),
            _ => Err(format!("unknown report format: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_uses_defaults() {
        let config: DetectConfig = serde_yaml::from_str("{}").unwrap();
        assert_eq!(config, DetectConfig::default());
        assert_eq!(config.settings.policy, ErrorPolicy::Isolate);
        assert_eq!(config.settings.format, ReportFormat::Human);
        assert_eq!(config.settings.view, RegView::Default);
        assert_eq!(config.settings.hive, Hive::LocalMachine);
        assert_eq!(config.settings.backend, Backend::Api);
    }

    #[test]
    fn parses_all_settings() {
        let yaml = r#"
settings:
  policy: abort
  format: legacy
  view: "32"
  hive: HKCU
  backend: reg-exe
"#;
        let config: DetectConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.settings.policy, ErrorPolicy::Abort);
        assert_eq!(config.settings.format, ReportFormat::Legacy);
        assert_eq!(config.settings.view, RegView::Bits32);
        assert_eq!(config.settings.hive, Hive::CurrentUser);
        assert_eq!(config.settings.backend, Backend::RegExe);
    }

    #[test]
    fn partial_settings_keep_other_defaults() {
        let config: DetectConfig =
            serde_yaml::from_str("settings:\n  format: json\n").unwrap();
        assert_eq!(config.settings.format, ReportFormat::Json);
        assert_eq!(config.settings.policy, ErrorPolicy::Isolate);
    }

    #[test]
    fn unknown_setting_is_rejected() {
        let result: Result<DetectConfig, _> = serde_yaml::from_str("settings:\n  retries: 3\n");
        assert!(result.is_err());
    }

    #[test]
    fn format_parses_and_displays() {
        assert_eq!("JSON".parse::<ReportFormat>().unwrap(), ReportFormat::Json);
        assert_eq!(ReportFormat::Legacy.to_string(), "legacy");
        assert!("xml".parse::<ReportFormat>().is_err());
    }
}

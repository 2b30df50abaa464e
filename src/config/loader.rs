//! Configuration file discovery and loading.

use crate::config::schema::DetectConfig;
use crate::error::{DetectError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Default config file name looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "dotnet-detect.yml";

/// Find the implicit config file in `dir`.
pub fn find_config_file(dir: &Path) -> Option<PathBuf> {
    let path = dir.join(CONFIG_FILE_NAME);
    if path.is_file() {
        Some(path)
    } else {
        None
    }
}

/// Load a single config file.
///
/// # Errors
///
/// Returns `ConfigNotFound` if the file doesn't exist.
/// Returns `ConfigParseError` if the YAML is invalid.
pub fn load_config_file(path: &Path) -> Result<DetectConfig> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            DetectError::ConfigNotFound {
                path: path.to_path_buf(),
            }
        } else {
            DetectError::Io(e)
        }
    })?;

    parse_config(&content, path)
}

/// Parse YAML content into DetectConfig.
///
/// An empty document yields the defaults.
pub fn parse_config(content: &str, source_path: &Path) -> Result<DetectConfig> {
    if content.trim().is_empty() {
        return Ok(DetectConfig::default());
    }
    serde_yaml::from_str(content).map_err(|e| DetectError::ConfigParseError {
        path: source_path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Load config with optional path override.
///
/// An explicit path must exist. Without one, `dotnet-detect.yml` in
/// `working_dir` is used if present, otherwise defaults. Returns the path
/// that was loaded, if any.
pub fn load_config(
    working_dir: &Path,
    config_override: Option<&Path>,
) -> Result<(DetectConfig, Option<PathBuf>)> {
    if let Some(path) = config_override {
        let config = load_config_file(path)?;
        return Ok((config, Some(path.to_path_buf())));
    }

    match find_config_file(working_dir) {
        Some(path) => {
            tracing::debug!("Loading config from {}", path.display());
            let config = load_config_file(&path)?;
            Ok((config, Some(path)))
        }
        None => Ok((DetectConfig::default(), None)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ReportFormat;
    use crate::detect::ErrorPolicy;
    use tempfile::TempDir;

    #[test]
    fn missing_implicit_config_uses_defaults() {
        let temp = TempDir::new().unwrap();
        let (config, path) = load_config(temp.path(), None).unwrap();
        assert_eq!(config, DetectConfig::default());
        assert!(path.is_none());
    }

    #[test]
    fn implicit_config_is_discovered() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join(CONFIG_FILE_NAME),
            "settings:\n  policy: abort\n",
        )
        .unwrap();

        let (config, path) = load_config(temp.path(), None).unwrap();
        assert_eq!(config.settings.policy, ErrorPolicy::Abort);
        assert_eq!(path, Some(temp.path().join(CONFIG_FILE_NAME)));
    }

    #[test]
    fn explicit_config_overrides_discovery() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join(CONFIG_FILE_NAME),
            "settings:\n  format: legacy\n",
        )
        .unwrap();
        let explicit = temp.path().join("other.yml");
        fs::write(&explicit, "settings:\n  format: json\n").unwrap();

        let (config, path) = load_config(temp.path(), Some(&explicit)).unwrap();
        assert_eq!(config.settings.format, ReportFormat::Json);
        assert_eq!(path, Some(explicit));
    }

    #[test]
    fn explicit_missing_config_is_not_found() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("missing.yml");
        let err = load_config(temp.path(), Some(&missing)).unwrap_err();
        assert!(matches!(err, DetectError::ConfigNotFound { .. }));
    }

    #[test]
    fn invalid_yaml_is_parse_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "settings: [unclosed").unwrap();
        let err = load_config_file(&path).unwrap_err();
        assert!(matches!(err, DetectError::ConfigParseError { .. }));
    }

    #[test]
    fn empty_file_is_default() {
        let config = parse_config("  \n", Path::new("empty.yml")).unwrap();
        assert_eq!(config, DetectConfig::default());
    }

    #[test]
    fn find_ignores_directories() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join(CONFIG_FILE_NAME)).unwrap();
        assert!(find_config_file(temp.path()).is_none());
    }
}

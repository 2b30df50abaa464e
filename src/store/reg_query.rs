//! Registry store backed by `reg.exe query`.
//!
//! Every probe runs
//! `reg query "<HIVE>\<path>" /v <key> [/reg:64|/reg:32]` and parses the
//! single value line it prints:
//!
//! ```text
//! HKEY_LOCAL_MACHINE\SOFTWARE\Microsoft\NET Framework Setup\NDP\v4\Full
//!     Release    REG_DWORD    0x80ea8
//! ```
//!
//! This is the fallback backend; [`super::ApiStore`] is preferred. `reg.exe`
//! prints localized diagnostics, so they are not used to detect absence:
//! exit code 1 is its only failure code for a missing key or value and is
//! read as absence. English "Access is denied" output still maps to
//! [`StoreFault::AccessDenied`]; on other locales a denied read looks
//! absent. A run that cannot be started, ends with another code or prints
//! unreadable value data is a [`StoreFault`].

use std::path::PathBuf;

use tracing::{debug, warn};

use super::{ConfigStore, Hive, RegValue, RegView, StoreFault};
use crate::shell::{display_command, execute_program, find_system_tool, CommandResult};

/// Exit code `reg.exe` uses for every failed query.
const REG_FAILURE: i32 = 1;

/// Field separator in `reg query` value lines.
const FIELD_SEPARATOR: &str = "    ";

/// Reads registry values by shelling out to `reg.exe`.
#[derive(Debug, Clone)]
pub struct RegQueryStore {
    program: Option<PathBuf>,
    view: RegView,
}

impl RegQueryStore {
    /// Locate `reg.exe` on this host and read through the given view.
    pub fn new(view: RegView) -> Self {
        Self {
            program: find_system_tool("reg.exe"),
            view,
        }
    }

    /// Use an explicit `reg.exe` path.
    pub fn with_program(program: PathBuf, view: RegView) -> Self {
        Self {
            program: Some(program),
            view,
        }
    }

    /// The registry view this store reads.
    pub fn view(&self) -> RegView {
        self.view
    }

    /// Build the argument list for one probe.
    pub fn query_args(&self, root: Hive, path: &str, key: &str) -> Vec<String> {
        let mut args = vec![
            "query".to_string(),
            format!(r"{}\{}", root.short_name(), path),
            "/v".to_string(),
            key.to_string(),
        ];
        match self.view {
            RegView::Default => {}
            RegView::Bits64 => args.push("/reg:64".to_string()),
            RegView::Bits32 => args.push("/reg:32".to_string()),
        }
        args
    }
}

impl ConfigStore for RegQueryStore {
    fn describe(&self) -> String {
        match &self.program {
            Some(program) => format!("reg.exe at {}", program.display()),
            None => "reg.exe (not found)".to_string(),
        }
    }

    fn ensure_available(&self) -> Result<(), String> {
        match &self.program {
            Some(_) => Ok(()),
            None => Err("reg.exe was not found in %SystemRoot%\\System32 or on PATH".to_string()),
        }
    }

    fn read_value(
        &self,
        root: Hive,
        path: &str,
        key: &str,
    ) -> Result<Option<RegValue>, StoreFault> {
        let program = self.program.as_ref().ok_or_else(|| StoreFault::ReadFailed {
            path: path.to_string(),
            key: key.to_string(),
            message: "reg.exe not available".to_string(),
        })?;

        let args = self.query_args(root, path, key);
        debug!("Probing {}", display_command(program, &args));

        let result = execute_program(program, &args).map_err(|e| StoreFault::ReadFailed {
            path: path.to_string(),
            key: key.to_string(),
            message: e.to_string(),
        })?;

        interpret_result(path, key, &result)
    }
}

/// Turn a finished `reg query` run into a store answer.
pub fn interpret_result(
    path: &str,
    key: &str,
    result: &CommandResult,
) -> Result<Option<RegValue>, StoreFault> {
    if result.success {
        return parse_query_output(&result.stdout, key).map_err(|message| {
            StoreFault::ReadFailed {
                path: path.to_string(),
                key: key.to_string(),
                message,
            }
        });
    }

    let diagnostic = if result.stderr.trim().is_empty() {
        result.stdout.trim()
    } else {
        result.stderr.trim()
    };
    if diagnostic.to_lowercase().contains("access is denied") {
        warn!(r"Access denied reading {}\{}", path, key);
        return Err(StoreFault::AccessDenied {
            path: path.to_string(),
            key: key.to_string(),
        });
    }

    if result.exit_code == Some(REG_FAILURE) {
        debug!(r"{}\{} not present: {}", path, key, diagnostic);
        return Ok(None);
    }

    Err(StoreFault::ReadFailed {
        path: path.to_string(),
        key: key.to_string(),
        message: if diagnostic.is_empty() {
            format!("reg.exe exited with code {:?}", result.exit_code)
        } else {
            diagnostic.to_string()
        },
    })
}

/// Find the line for `key` in `reg query` stdout and decode it.
///
/// Value names are matched case-insensitively, as the registry does.
pub fn parse_query_output(stdout: &str, key: &str) -> Result<Option<RegValue>, String> {
    for line in stdout.lines() {
        // Key headers start at column 0; value lines are indented.
        if !line.starts_with(' ') {
            continue;
        }

        let mut fields = line.trim_start().splitn(3, FIELD_SEPARATOR);
        let name = fields.next().unwrap_or_default();
        let kind = match fields.next() {
            Some(kind) => kind.trim(),
            None => continue,
        };
        if !name.eq_ignore_ascii_case(key) {
            continue;
        }
        let data = fields.next().unwrap_or_default().trim_end_matches('\r');

        return decode_value(kind, data).map(Some);
    }
    Ok(None)
}

fn decode_value(kind: &str, data: &str) -> Result<RegValue, String> {
    match kind {
        "REG_DWORD" => parse_hex(data)
            .and_then(|v| u32::try_from(v).ok())
            .map(RegValue::Dword)
            .ok_or_else(|| format!("invalid REG_DWORD data '{}'", data)),
        "REG_QWORD" => parse_hex(data)
            .map(RegValue::Qword)
            .ok_or_else(|| format!("invalid REG_QWORD data '{}'", data)),
        "REG_SZ" | "REG_EXPAND_SZ" => Ok(RegValue::String(data.to_string())),
        other => Ok(RegValue::Other {
            kind: other.to_string(),
            raw: data.to_string(),
        }),
    }
}

fn parse_hex(data: &str) -> Option<u64> {
    let digits = data
        .trim()
        .strip_prefix("0x")
        .or_else(|| data.trim().strip_prefix("0X"))?;
    u64::from_str_radix(digits, 16).ok()
}

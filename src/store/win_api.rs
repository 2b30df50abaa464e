//! Registry store backed by the Win32 registry API.
//!
//! Reads go through `RegOpenKeyEx` / `RegQueryValueEx` (via `winreg`), so
//! absence is recognised from the error code rather than from localized
//! tool output: `ERROR_FILE_NOT_FOUND` and `ERROR_PATH_NOT_FOUND` surface as
//! [`io::ErrorKind::NotFound`] and mean the value is not there.
//!
//! Off Windows the store exists but reports itself unavailable; detection
//! never reads from it there because the platform check fails first.

use std::io;

use tracing::debug;

use super::{ConfigStore, Hive, RegValue, RegView, StoreFault};

/// Raw registry type codes (`winnt.h`).
pub mod kind {
    pub const REG_SZ: u32 = 1;
    pub const REG_EXPAND_SZ: u32 = 2;
    pub const REG_DWORD: u32 = 4;
    pub const REG_QWORD: u32 = 11;
}

/// Reads registry values through the Win32 API.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApiStore {
    view: RegView,
}

impl ApiStore {
    /// Read through the given view.
    pub fn new(view: RegView) -> Self {
        Self { view }
    }

    /// The registry view this store reads.
    pub fn view(&self) -> RegView {
        self.view
    }
}

impl ConfigStore for ApiStore {
    fn describe(&self) -> String {
        format!("Win32 registry API ({} view)", view_name(self.view))
    }

    fn ensure_available(&self) -> Result<(), String> {
        if cfg!(windows) {
            Ok(())
        } else {
            Err("the Win32 registry API exists only on Windows".to_string())
        }
    }

    fn read_value(
        &self,
        root: Hive,
        path: &str,
        key: &str,
    ) -> Result<Option<RegValue>, StoreFault> {
        let outcome = read_raw(root, self.view, path, key).and_then(|(code, bytes)| {
            decode_raw(code, &bytes).map_err(|msg| io::Error::new(io::ErrorKind::InvalidData, msg))
        });

        match outcome {
            Ok(value) => {
                debug!(r"Read {}\{}\{} = {:?}", root, path, key, value);
                Ok(Some(value))
            }
            Err(e) => classify_error(path, key, &e),
        }
    }
}

fn view_name(view: RegView) -> &'static str {
    match view {
        RegView::Default => "default",
        RegView::Bits64 => "64-bit",
        RegView::Bits32 => "32-bit",
    }
}

#[cfg(windows)]
fn read_raw(root: Hive, view: RegView, path: &str, key: &str) -> io::Result<(u32, Vec<u8>)> {
    use winreg::enums::{
        HKEY_CURRENT_USER, HKEY_LOCAL_MACHINE, KEY_READ, KEY_WOW64_32KEY, KEY_WOW64_64KEY,
    };
    use winreg::RegKey;

    let hive = match root {
        Hive::LocalMachine => RegKey::predef(HKEY_LOCAL_MACHINE),
        Hive::CurrentUser => RegKey::predef(HKEY_CURRENT_USER),
    };
    let flags = match view {
        RegView::Default => KEY_READ,
        RegView::Bits64 => KEY_READ | KEY_WOW64_64KEY,
        RegView::Bits32 => KEY_READ | KEY_WOW64_32KEY,
    };

    let subkey = hive.open_subkey_with_flags(path, flags)?;
    let raw = subkey.get_raw_value(key)?;
    let code = raw.vtype.clone() as u32;
    let bytes: &[u8] = &raw.bytes;
    Ok((code, bytes.to_vec()))
}

#[cfg(not(windows))]
fn read_raw(_root: Hive, _view: RegView, _path: &str, _key: &str) -> io::Result<(u32, Vec<u8>)> {
    Err(io::Error::new(
        io::ErrorKind::Unsupported,
        "the Win32 registry API exists only on Windows",
    ))
}

/// Map an I/O error from a registry read to a store answer.
///
/// A missing key or value is absence, not a fault.
pub fn classify_error(
    path: &str,
    key: &str,
    error: &io::Error,
) -> Result<Option<RegValue>, StoreFault> {
    match error.kind() {
        io::ErrorKind::NotFound => {
            debug!(r"{}\{} not present", path, key);
            Ok(None)
        }
        io::ErrorKind::PermissionDenied => Err(StoreFault::AccessDenied {
            path: path.to_string(),
            key: key.to_string(),
        }),
        _ => Err(StoreFault::ReadFailed {
            path: path.to_string(),
            key: key.to_string(),
            message: error.to_string(),
        }),
    }
}

/// Decode raw registry data of type `code`.
pub fn decode_raw(code: u32, bytes: &[u8]) -> Result<RegValue, String> {
    match code {
        kind::REG_DWORD => {
            let data: [u8; 4] = bytes
                .try_into()
                .map_err(|_| format!("REG_DWORD with {} bytes", bytes.len()))?;
            Ok(RegValue::Dword(u32::from_le_bytes(data)))
        }
        kind::REG_QWORD => {
            let data: [u8; 8] = bytes
                .try_into()
                .map_err(|_| format!("REG_QWORD with {} bytes", bytes.len()))?;
            Ok(RegValue::Qword(u64::from_le_bytes(data)))
        }
        kind::REG_SZ | kind::REG_EXPAND_SZ => Ok(RegValue::String(decode_utf16(bytes))),
        other => Ok(RegValue::Other {
            kind: format!("type {}", other),
            raw: bytes.iter().map(|b| format!("{:02x}", b)).collect(),
        }),
    }
}

/// UTF-16LE string data, trailing NULs dropped.
fn decode_utf16(bytes: &[u8]) -> String {
    let units: Vec<u16> = bytes
        .chunks_exact(2)
        .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
        .collect();
    String::from_utf16_lossy(&units)
        .trim_end_matches('\0')
        .to_string()
}

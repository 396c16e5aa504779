// Translator platform abstraction
// Resolves the per-OS base directories; the app folder name is joined here.
//
// Uses `cfg(target_os)` to pick the implementation at compile time.

use std::path::PathBuf;

#[cfg(target_os = "linux")]
mod linux;
#[cfg(target_os = "linux")]
use linux as os;

#[cfg(target_os = "macos")]
mod macos;
#[cfg(target_os = "macos")]
use macos as os;

#[cfg(target_os = "windows")]
mod windows;
#[cfg(target_os = "windows")]
use windows as os;

/// Folder name used under the OS base directories.
#[cfg(target_os = "linux")]
pub const APP_DIR_NAME: &str = "translator-client";
#[cfg(not(target_os = "linux"))]
pub const APP_DIR_NAME: &str = "TranslatorClient";

/// Directory holding `config.json`.
///
/// - **Linux**: `$XDG_CONFIG_HOME/translator-client` or `~/.config/translator-client`
/// - **macOS**: `~/Library/Application Support/TranslatorClient`
/// - **Windows**: `%APPDATA%/TranslatorClient`
pub fn get_config_dir() -> PathBuf {
    os::base_config_dir().join(APP_DIR_NAME)
}

/// Directory holding the local storage database.
///
/// - **Linux**: `$XDG_DATA_HOME/translator-client` or `~/.local/share/translator-client`
/// - **macOS**: `~/Library/Application Support/TranslatorClient`
/// - **Windows**: `%APPDATA%/TranslatorClient`
pub fn get_data_dir() -> PathBuf {
    os::base_data_dir().join(APP_DIR_NAME)
}

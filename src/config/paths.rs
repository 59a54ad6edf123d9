// SPDX-License-Identifier: MPL-2.0
//! Config directory resolution.
//!
//! # Resolution Order
//!
//! 1. **Explicit override** - parameter to [`config_dir_with_override`] (for tests)
//! 2. **Environment variable** `GALLERY_FRAME_CONFIG_DIR`
//! 3. **Platform default** - via `dirs` crate

use std::path::PathBuf;

/// Application name used for directory naming.
const APP_NAME: &str = "GalleryFrame";

/// Environment variable to override the config directory.
pub const ENV_CONFIG_DIR: &str = "GALLERY_FRAME_CONFIG_DIR";

/// Returns the config directory, or `None` if the platform has none.
///
/// - Linux: `~/.config/GalleryFrame/`
/// - macOS: `~/Library/Application Support/GalleryFrame/`
/// - Windows: `C:\Users\<User>\AppData\Roaming\GalleryFrame\`
pub fn config_dir() -> Option<PathBuf> {
    config_dir_with_override(None)
}

/// Returns the config directory, preferring `override_path` when given.
pub fn config_dir_with_override(override_path: Option<PathBuf>) -> Option<PathBuf> {
    if let Some(path) = override_path {
        return Some(path);
    }

    if let Ok(env_path) = std::env::var(ENV_CONFIG_DIR) {
        if !env_path.is_empty() {
            return Some(PathBuf::from(env_path));
        }
    }

    dirs::config_dir().map(|mut path| {
        path.push(APP_NAME);
        path
    })
}

// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Platform-aware config file resolution.

use std::path::{Path, PathBuf};

use vidpath_core::BridgeConfig;
use vidpath_core::error::Result;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "VIDPATH_CONFIG";

/// Default config location: `$XDG_CONFIG_HOME/vidpath/bridge.json`.
pub fn default_config_file() -> PathBuf {
    config_base().join("vidpath").join("bridge.json")
}

/// Load the bridge config.
///
/// Precedence: the explicit path, then `$VIDPATH_CONFIG`, then the default
/// file if it exists, then built-in defaults. An explicit path that cannot
/// be read is an error; a missing default file is not.
pub fn load_config(explicit: Option<&Path>) -> Result<BridgeConfig> {
    if let Some(path) = explicit {
        return BridgeConfig::load(path);
    }
    if let Some(path) = std::env::var_os(CONFIG_ENV) {
        return BridgeConfig::load(PathBuf::from(path));
    }
    let fallback = default_config_file();
    if fallback.is_file() {
        return BridgeConfig::load(fallback);
    }
    Ok(BridgeConfig::default())
}

fn config_base() -> PathBuf {
    // Try XDG config dir, then fallback to home
    if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
        return PathBuf::from(xdg);
    }
    if let Ok(home) = std::env::var("HOME") {
        return PathBuf::from(home).join(".config");
    }
    // Last resort
    std::env::temp_dir()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_file_lives_under_vidpath() {
        let path = default_config_file();
        assert!(path.ends_with("vidpath/bridge.json"));
    }

    #[test]
    fn explicit_path_wins() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("bridge.json");
        std::fs::write(&path, r#"{ "channel_name": "clips" }"#).expect("write");

        let config = load_config(Some(path.as_path())).expect("load");
        assert_eq!(config.channel_name, "clips");
    }

    #[test]
    fn unreadable_explicit_path_is_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        assert!(load_config(Some(dir.path().join("absent.json").as_path())).is_err());
    }
}

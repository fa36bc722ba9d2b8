// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Bridge configuration.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, VidpathError};

/// Settings shared by the registrar and both resolver variants.
///
/// Missing fields in a config file fall back to the defaults below.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BridgeConfig {
    /// Channel the handler is registered on.
    pub channel_name: String,
    /// Method name that triggers path resolution.
    pub method_name: String,
    /// Extension of bundled videos, without the dot.
    pub video_extension: String,
    /// Directory prefix inside the Android asset tree.
    pub asset_prefix: String,
    /// Root of the resource bundle on desktop builds. Mobile builds use the
    /// platform bundle instead.
    pub bundle_root: Option<PathBuf>,
    /// Writable cache directory for copied assets. Mobile builds ask the
    /// platform when this is unset.
    pub cache_dir: Option<PathBuf>,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            channel_name: crate::VIDEO_PATH_CHANNEL.into(),
            method_name: crate::GET_VIDEO_PATH.into(),
            video_extension: "mp4".into(),
            asset_prefix: "videos".into(),
            bundle_root: None,
            cache_dir: None,
        }
    }
}

impl BridgeConfig {
    /// Read a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .map_err(|e| VidpathError::Config(format!("read {}: {e}", path.display())))?;
        Self::from_json(&raw)
    }

    /// Parse a JSON config document.
    pub fn from_json(raw: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(raw)
            .map_err(|e| VidpathError::Config(format!("parse: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings that can never resolve a path.
    pub fn validate(&self) -> Result<()> {
        if self.channel_name.is_empty() {
            return Err(VidpathError::Config("channel_name is empty".into()));
        }
        if self.method_name.is_empty() {
            return Err(VidpathError::Config("method_name is empty".into()));
        }
        if self.video_extension.is_empty() || self.video_extension.starts_with('.') {
            return Err(VidpathError::Config(format!(
                "video_extension must be a bare extension, got {:?}",
                self.video_extension
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_channel_contract() {
        let config = BridgeConfig::default();
        assert_eq!(config.channel_name, "video_path_channel");
        assert_eq!(config.method_name, "getVideoPath");
        assert_eq!(config.video_extension, "mp4");
        assert_eq!(config.asset_prefix, "videos");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config = BridgeConfig::from_json(r#"{ "bundle_root": "/opt/app/Resources" }"#)
            .expect("parse");
        assert_eq!(config.channel_name, "video_path_channel");
        assert_eq!(
            config.bundle_root.as_deref(),
            Some(Path::new("/opt/app/Resources"))
        );
        assert!(config.cache_dir.is_none());
    }

    #[test]
    fn dotted_extension_is_rejected() {
        let result = BridgeConfig::from_json(r#"{ "video_extension": ".mp4" }"#);
        assert!(matches!(result, Err(VidpathError::Config(_))));
    }

    #[test]
    fn malformed_json_is_config_error() {
        let result = BridgeConfig::from_json("{ not json");
        assert!(matches!(result, Err(VidpathError::Config(_))));
    }

    #[test]
    fn load_reads_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("bridge.json");
        std::fs::write(&path, r#"{ "asset_prefix": "clips" }"#).expect("write");

        let config = BridgeConfig::load(&path).expect("load");
        assert_eq!(config.asset_prefix, "clips");
    }

    #[test]
    fn load_missing_file_is_config_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let result = BridgeConfig::load(dir.path().join("absent.json"));
        assert!(matches!(result, Err(VidpathError::Config(_))));
    }
}

// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>

//! Video path channel — native platform bridge.
//!
//! Each platform answers `getVideoPath` on `video_path_channel` by turning a
//! bundled asset name into an absolute filesystem path. The two variants
//! share the [`traits::ChannelHandler`] interface and are picked at build
//! time:
//!
//! - iOS: [`bundle::BundlePathHandler`] over the main bundle.
//! - Android: no handler, unless the `asset-cache` feature wires in
//!   [`asset_cache::CachedAssetHandler`] over the packaged asset tree.
//! - Desktop/CI: the bundle variant over a configured directory.

pub mod asset_cache;
pub mod bundle;
pub mod ffi;
pub mod messenger;
pub mod registrar;
pub mod traits;

#[cfg(target_os = "ios")]
pub mod ios;

#[cfg(target_os = "android")]
pub mod android;

#[cfg(not(any(target_os = "ios", target_os = "android")))]
pub mod stub;

use std::sync::Arc;

use vidpath_core::BridgeConfig;
use vidpath_core::error::Result;

use registrar::ChannelRegistrar;
use traits::{ChannelHandler, Messenger};

/// Build the channel handler for the target operating system.
///
/// RETURNS: `None` when the platform installs no handler at all (the bare
/// Android activity).
pub fn platform_handler(config: &BridgeConfig) -> Result<Option<Arc<dyn ChannelHandler>>> {
    #[cfg(target_os = "ios")]
    {
        // iOS: direct lookup in the main bundle.
        Ok(Some(Arc::new(bundle::BundlePathHandler::new(
            ios::MainBundle::new(),
            config,
        ))))
    }
    #[cfg(all(target_os = "android", feature = "asset-cache"))]
    {
        // Android: copy out of the asset tree into the app cache dir.
        let context = android::AndroidContext::from_ndk()?;
        let cache_dir = match &config.cache_dir {
            Some(dir) => dir.clone(),
            None => context.cache_dir()?,
        };
        let handler = asset_cache::CachedAssetHandler::new(context, cache_dir, config)?;
        Ok(Some(Arc::new(handler)))
    }
    #[cfg(all(target_os = "android", not(feature = "asset-cache")))]
    {
        tracing::info!(
            channel = %config.channel_name,
            "asset-cache disabled; Android activity installs no video path handler"
        );
        Ok(None)
    }
    #[cfg(not(any(target_os = "ios", target_os = "android")))]
    {
        // DESKTOP/CI: directory-backed bundle so the contract can run off-device.
        stub::desktop_handler(config).map(Some)
    }
}

/// Build the platform handler and install it on `messenger`.
///
/// Returns whether a handler was installed.
pub fn register_platform_handler(messenger: &dyn Messenger, config: &BridgeConfig) -> Result<bool> {
    match platform_handler(config)? {
        Some(handler) => {
            ChannelRegistrar::new(config).register(messenger, handler);
            Ok(true)
        }
        None => Ok(false),
    }
}

#[cfg(all(test, not(any(target_os = "ios", target_os = "android"))))]
mod tests {
    use super::*;
    use registrar::tests::RecordingMessenger;
    use vidpath_core::types::{MethodInvocation, Resolution, VIDEO_PATH_CHANNEL};

    #[test]
    fn desktop_registers_one_handler() {
        let messenger = RecordingMessenger::default();
        let installed = register_platform_handler(&messenger, &BridgeConfig::default()).expect("register");

        assert!(installed);
        assert_eq!(messenger.channels(), vec![(VIDEO_PATH_CHANNEL.to_owned(), true)]);
    }

    #[test]
    fn desktop_handler_serves_configured_bundle() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::write(dir.path().join("splash.mp4"), b"clip").expect("write");
        let config = BridgeConfig {
            bundle_root: Some(dir.path().to_path_buf()),
            ..BridgeConfig::default()
        };
        let messenger = messenger::LocalMessenger::new();
        register_platform_handler(&messenger, &config).expect("register");

        let reply = messenger
            .invoke(VIDEO_PATH_CHANNEL, &MethodInvocation::get_video_path("splash"))
            .expect("handler installed");
        let expected = dir.path().canonicalize().expect("canonicalize").join("splash.mp4");
        assert_eq!(reply, Resolution::Success(expected.to_string_lossy().into_owned()));

        let missing = messenger
            .invoke(VIDEO_PATH_CHANNEL, &MethodInvocation::get_video_path("outro"))
            .expect("handler installed");
        assert_eq!(missing, Resolution::unavailable());
    }

    #[test]
    fn bad_bundle_root_fails_setup() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = BridgeConfig {
            bundle_root: Some(dir.path().join("missing")),
            ..BridgeConfig::default()
        };
        let messenger = RecordingMessenger::default();
        assert!(register_platform_handler(&messenger, &config).is_err());
        assert!(messenger.channels().is_empty());
    }
}

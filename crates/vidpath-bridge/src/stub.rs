// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Stub bundle for desktop/CI builds where no platform bundle exists.
//
// With a configured `bundle_root` the desktop handler serves videos from that
// directory. Without one every lookup misses, so every call answers
// UNAVAILABLE, the same as an iOS bundle that lacks the resource.

use std::path::PathBuf;
use std::sync::Arc;

use tracing::warn;

use vidpath_core::BridgeConfig;
use vidpath_core::error::Result;

use crate::bundle::{BundlePathHandler, DirBundle};
use crate::traits::{ChannelHandler, ResourceBundle};

/// Bundle that contains nothing.
pub struct StubBundle;

impl ResourceBundle for StubBundle {
    fn path_for_resource(&self, name: &str, extension: &str) -> Option<PathBuf> {
        warn!(name, extension, "ResourceBundle::path_for_resource called on stub bundle");
        None
    }
}

/// Handler used on desktop/CI.
pub fn desktop_handler(config: &BridgeConfig) -> Result<Arc<dyn ChannelHandler>> {
    match &config.bundle_root {
        Some(root) => Ok(Arc::new(BundlePathHandler::new(DirBundle::open(root)?, config))),
        None => {
            warn!("no bundle_root configured; every video path lookup will be unavailable");
            Ok(Arc::new(BundlePathHandler::new(StubBundle, config)))
        }
    }
}

// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Bundle resolver — the active iOS behaviour.
//
// Looks the video up directly in the resource bundle. Every way a call can
// go wrong (wrong method, bad arguments, missing resource) collapses into
// the same UNAVAILABLE failure, so callers cannot tell them apart.

use std::path::{Path, PathBuf};

use tracing::debug;

use vidpath_core::BridgeConfig;
use vidpath_core::error::{Result, VidpathError};
use vidpath_core::types::{AssetReference, MethodInvocation, NAME_ARGUMENT, Resolution};

use crate::traits::{ChannelHandler, ResourceBundle};

/// Resolves `getVideoPath` against a [`ResourceBundle`].
///
/// Pure lookup: no copying, no caching, no side effects.
pub struct BundlePathHandler<B> {
    bundle: B,
    method: String,
    extension: String,
}

impl<B: ResourceBundle> BundlePathHandler<B> {
    pub fn new(bundle: B, config: &BridgeConfig) -> Self {
        Self {
            bundle,
            method: config.method_name.clone(),
            extension: config.video_extension.clone(),
        }
    }

    fn lookup(&self, invocation: &MethodInvocation) -> Option<String> {
        if invocation.method != self.method {
            debug!(method = %invocation.method, "unexpected method on video path channel");
            return None;
        }
        let name = invocation.string_argument(NAME_ARGUMENT)?;
        let asset = AssetReference::parse(name).ok()?;
        let path = self.bundle.path_for_resource(asset.name(), &self.extension)?;
        path.into_os_string().into_string().ok()
    }
}

impl<B: ResourceBundle> ChannelHandler for BundlePathHandler<B> {
    fn handle(&self, invocation: &MethodInvocation) -> Result<Resolution> {
        Ok(match self.lookup(invocation) {
            Some(path) => Resolution::Success(path),
            None => Resolution::unavailable(),
        })
    }
}

/// Resource bundle backed by a plain directory.
///
/// Used on desktop/CI, where there is no platform bundle. Resources are
/// top-level files named `<name>.<extension>`.
#[derive(Debug, Clone)]
pub struct DirBundle {
    root: PathBuf,
}

impl DirBundle {
    /// Open a bundle rooted at `root`. The root is canonicalised so every
    /// resolved path is absolute.
    pub fn open(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref();
        let root = root.canonicalize().map_err(|e| {
            VidpathError::Config(format!("bundle root {}: {e}", root.display()))
        })?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl ResourceBundle for DirBundle {
    fn path_for_resource(&self, name: &str, extension: &str) -> Option<PathBuf> {
        let candidate = self.root.join(format!("{name}.{extension}"));
        candidate.is_file().then_some(candidate)
    }
}

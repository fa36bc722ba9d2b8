// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Cached asset resolver — the Android behaviour behind the `asset-cache`
// feature.
//
// Packaged assets are not addressable as files on Android, so the first
// request for a video copies `videos/<name>.mp4` out of the asset tree into
// the private cache directory. The cache entry then memoizes the copy: later
// calls only check that it still exists.
//
// Copies are serialised per asset name, and each copy lands in a temporary
// file that is renamed into place once complete. A failed copy therefore
// leaves nothing behind for the next call to mistake for a finished one.

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use tracing::{debug, info, instrument, warn};

use vidpath_core::BridgeConfig;
use vidpath_core::error::{Result, VidpathError};
use vidpath_core::types::{AssetReference, MethodInvocation, NAME_ARGUMENT, Resolution};

use crate::traits::{AssetSource, ChannelHandler};

/// Resolves `getVideoPath` by materialising assets into a cache directory.
pub struct CachedAssetHandler<S> {
    source: S,
    cache_dir: PathBuf,
    method: String,
    extension: String,
    asset_prefix: String,
    /// One lock per asset name with a copy in flight; held for the
    /// existence re-check and the copy.
    copy_locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl<S: AssetSource> CachedAssetHandler<S> {
    /// Create the handler, creating `cache_dir` if it does not exist yet.
    pub fn new(source: S, cache_dir: impl AsRef<Path>, config: &BridgeConfig) -> Result<Self> {
        let cache_dir = cache_dir.as_ref();
        std::fs::create_dir_all(cache_dir)?;
        let cache_dir = cache_dir.canonicalize()?;
        debug!(path = %cache_dir.display(), "asset cache directory ready");

        Ok(Self {
            source,
            cache_dir,
            method: config.method_name.clone(),
            extension: config.video_extension.clone(),
            asset_prefix: config.asset_prefix.clone(),
            copy_locks: Mutex::new(HashMap::new()),
        })
    }

    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }

    /// Ensure the cached copy of `asset` exists and return its path.
    ///
    /// I/O errors are returned as-is; the caller decides how to surface them.
    #[instrument(skip_all, fields(asset = %asset))]
    pub fn materialize(&self, asset: &AssetReference) -> Result<PathBuf> {
        let destination = self.cache_dir.join(asset.name());
        if destination.is_file() {
            debug!("cache hit");
            return Ok(destination);
        }

        let lock = self.copy_lock(asset);
        let copied = {
            let _guard = lock.lock().unwrap_or_else(PoisonError::into_inner);
            self.copy_into_cache(asset, &destination)
        };
        self.release_copy_lock(asset, lock);
        copied.map(|()| destination)
    }

    /// Copy the asset onto `destination` unless a concurrent caller already did.
    /// Must be called with the asset's copy lock held.
    fn copy_into_cache(&self, asset: &AssetReference, destination: &Path) -> Result<()> {
        if destination.is_file() {
            debug!("copied by a concurrent call");
            return Ok(());
        }

        let asset_path = asset.asset_path(&self.asset_prefix, &self.extension);
        let mut input = self.source.open(&asset_path)?;
        let mut staged = tempfile::NamedTempFile::new_in(&self.cache_dir)?;
        let bytes = std::io::copy(&mut input, &mut staged)?;
        drop(input);

        staged.as_file().sync_all()?;
        staged.persist(destination).map_err(std::io::Error::from)?;

        info!(%asset_path, bytes, path = %destination.display(), "asset copied into cache");
        Ok(())
    }

    fn copy_lock(&self, asset: &AssetReference) -> Arc<Mutex<()>> {
        let mut locks = self.copy_locks.lock().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(locks.entry(asset.name().to_owned()).or_default())
    }

    /// Drop the map entry once no other caller holds or waits on the lock.
    fn release_copy_lock(&self, asset: &AssetReference, lock: Arc<Mutex<()>>) {
        let mut locks = self.copy_locks.lock().unwrap_or_else(PoisonError::into_inner);
        // Clones are only handed out under the map lock, so two references
        // (the map's and ours) means nobody else is queued.
        if Arc::strong_count(&lock) == 2 {
            locks.remove(asset.name());
        }
    }

    #[cfg(test)]
    fn pending_copy_locks(&self) -> usize {
        self.copy_locks.lock().unwrap_or_else(PoisonError::into_inner).len()
    }
}

impl<S: AssetSource> ChannelHandler for CachedAssetHandler<S> {
    fn handle(&self, invocation: &MethodInvocation) -> Result<Resolution> {
        if invocation.method != self.method {
            return Ok(Resolution::NotImplemented);
        }

        // iOS answers UNAVAILABLE here; the asset cache reports the bad
        // argument explicitly.
        let Some(name) = invocation.string_argument(NAME_ARGUMENT) else {
            warn!(args = %invocation.arguments, "video path call without a string 'name'");
            return Ok(Resolution::invalid_argument());
        };
        let asset = match AssetReference::parse(name) {
            Ok(asset) => asset,
            Err(e) => {
                warn!(error = %e, "rejected video path call");
                return Ok(Resolution::invalid_argument());
            }
        };

        let path = self.materialize(&asset)?;
        let path = path
            .into_os_string()
            .into_string()
            .map_err(|p| VidpathError::Bridge(format!("cache path is not UTF-8: {p:?}")))?;
        Ok(Resolution::Success(path))
    }
}

/// Asset tree backed by a plain directory (desktop/CI and tests).
#[derive(Debug, Clone)]
pub struct DirAssetSource {
    root: PathBuf,
}

impl DirAssetSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl AssetSource for DirAssetSource {
    fn open(&self, path: &str) -> Result<Box<dyn Read + '_>> {
        Ok(Box::new(File::open(self.root.join(path))?))
    }
}

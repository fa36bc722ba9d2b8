// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// iOS platform bundle via objc2.
//
// Requires compilation with the iOS SDK (Xcode). The only native call is
// `-[NSBundle pathForResource:ofType:]` on the main bundle; bundled resources
// are already plain files on disk, so nothing is copied.

#![cfg(target_os = "ios")]

use std::path::PathBuf;

use objc2_foundation::{NSBundle, NSString};
use tracing::debug;

use crate::traits::ResourceBundle;

/// The application's main bundle.
///
/// Zero-sized; `NSBundle.mainBundle` is looked up on every call, which is
/// cheap and safe from any thread.
pub struct MainBundle;

impl MainBundle {
    pub fn new() -> Self {
        Self
    }
}

impl Default for MainBundle {
    fn default() -> Self {
        Self::new()
    }
}

impl ResourceBundle for MainBundle {
    fn path_for_resource(&self, name: &str, extension: &str) -> Option<PathBuf> {
        let ns_name = NSString::from_str(name);
        let ns_ext = NSString::from_str(extension);

        // SAFETY: `mainBundle` and `pathForResource:ofType:` are thread-safe
        // Foundation selectors taking nullable NSString arguments.
        let path = unsafe {
            let bundle = NSBundle::mainBundle();
            bundle.pathForResource_ofType(Some(&ns_name), Some(&ns_ext))
        };

        match path {
            Some(path) => Some(PathBuf::from(path.to_string())),
            None => {
                debug!(name, extension, "resource not found in main bundle");
                None
            }
        }
    }
}

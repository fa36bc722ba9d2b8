// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Platform-agnostic trait definitions for the video path channel.
//
// The host framework owns the messenger and decides when handlers get
// installed. Everything native (bundle lookup, asset tree access) sits
// behind a trait so the resolvers can run on desktop/CI with plain
// directories.

use std::io::Read;
use std::path::PathBuf;
use std::sync::Arc;

use vidpath_core::error::Result;
use vidpath_core::types::{MethodInvocation, Resolution};

/// Handles method invocations arriving on one channel.
///
/// An `Err` is an unhandled fault. The messenger turns it into a generic
/// error reply for the caller.
pub trait ChannelHandler: Send + Sync {
    fn handle(&self, invocation: &MethodInvocation) -> Result<Resolution>;
}

impl<F> ChannelHandler for F
where
    F: Fn(&MethodInvocation) -> Result<Resolution> + Send + Sync,
{
    fn handle(&self, invocation: &MethodInvocation) -> Result<Resolution> {
        self(invocation)
    }
}

/// Cross-language message pipe supplied by the host framework.
pub trait Messenger {
    /// Install `handler` on `channel`, replacing any previous one.
    /// `None` removes the current handler.
    fn set_method_call_handler(&self, channel: &str, handler: Option<Arc<dyn ChannelHandler>>);
}

/// Read-only resource bundle addressed by name and extension.
pub trait ResourceBundle: Send + Sync {
    /// Absolute on-disk path of `<name>.<extension>`, or `None` if the
    /// bundle does not contain it.
    fn path_for_resource(&self, name: &str, extension: &str) -> Option<PathBuf>;
}

/// Packaged asset tree addressed by relative path (e.g. `videos/intro.mp4`).
pub trait AssetSource: Send + Sync {
    /// Open an asset for streaming. The stream is released when the
    /// returned reader is dropped.
    fn open(&self, path: &str) -> Result<Box<dyn Read + '_>>;
}

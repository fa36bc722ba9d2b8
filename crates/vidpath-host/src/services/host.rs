// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Desktop host — plays the part of the app delegate / activity.
//
// Owns an in-process messenger, registers the platform handler on it at
// startup, and pushes encoded `getVideoPath` calls through it the same way
// the UI layer would.

use std::io::Write;

use serde_json::json;
use tracing::{debug, error, info, warn};

use vidpath_bridge::messenger::LocalMessenger;
use vidpath_core::codec;
use vidpath_core::error::Result;
use vidpath_core::types::{MethodInvocation, NAME_ARGUMENT, Resolution};
use vidpath_core::BridgeConfig;

/// A started host with its channel handler installed (or not, on platforms
/// that install none).
pub struct Host {
    messenger: LocalMessenger,
    config: BridgeConfig,
    handler_installed: bool,
}

impl Host {
    /// Register the platform handler. Call once at startup.
    pub fn start(config: BridgeConfig) -> Result<Self> {
        let messenger = LocalMessenger::new();
        let handler_installed = vidpath_bridge::register_platform_handler(&messenger, &config)?;
        info!(
            channel = %config.channel_name,
            handler_installed,
            "host started"
        );
        Ok(Self {
            messenger,
            config,
            handler_installed,
        })
    }

    /// Send one encoded `getVideoPath` call and return the raw reply.
    ///
    /// `Ok(None)` means nothing answered on the channel.
    pub fn request(&self, name: &str) -> Result<Option<Vec<u8>>> {
        let call = MethodInvocation::new(
            self.config.method_name.clone(),
            json!({ NAME_ARGUMENT: name }),
        );
        let message = codec::encode_invocation(&call)?;
        debug!(name, bytes = message.len(), "sending video path call");
        self.messenger.send(&self.config.channel_name, &message)
    }

    /// Like [`Host::request`], decoded.
    pub fn get_video_path(&self, name: &str) -> Result<Option<Resolution>> {
        self.request(name)?
            .map(|reply| codec::decode_reply(&reply))
            .transpose()
    }

    /// Resolve each name in turn and write one line per name to `out`: the
    /// reply envelope, or `null` when nothing answered or the call failed.
    ///
    /// Returns `true` only if every name resolved to a path.
    pub fn resolve_all(&self, names: &[String], out: &mut impl Write) -> std::io::Result<bool> {
        if !self.handler_installed {
            warn!(
                channel = %self.config.channel_name,
                "no video path handler installed; requests will go unanswered"
            );
        }

        let mut all_resolved = true;
        for name in names {
            let reply = self.get_video_path(name).and_then(|resolution| {
                resolution
                    .map(|r| -> Result<(bool, Vec<u8>)> {
                        Ok((r.is_success(), codec::encode_reply(&r)?))
                    })
                    .transpose()
            });
            match reply {
                Ok(Some((resolved, envelope))) => {
                    all_resolved &= resolved;
                    out.write_all(&envelope)?;
                    writeln!(out)?;
                }
                Ok(None) => {
                    warn!(name = %name, "no handler answered on the channel");
                    all_resolved = false;
                    writeln!(out, "null")?;
                }
                Err(e) => {
                    error!(name = %name, error = %e, "video path request failed");
                    all_resolved = false;
                    writeln!(out, "null")?;
                }
            }
        }
        Ok(all_resolved)
    }
}

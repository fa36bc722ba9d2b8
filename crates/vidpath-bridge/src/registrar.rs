// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Channel registrar: installs the video path handler on the host messenger.

use std::sync::Arc;

use tracing::info;

use vidpath_core::BridgeConfig;

use crate::traits::{ChannelHandler, Messenger};

/// Binds one handler to the configured channel name.
///
/// Registration is infallible; the host decides when it happens, and it must
/// happen before the UI layer issues its first call.
#[derive(Debug, Clone)]
pub struct ChannelRegistrar {
    channel: String,
}

impl ChannelRegistrar {
    pub fn new(config: &BridgeConfig) -> Self {
        Self {
            channel: config.channel_name.clone(),
        }
    }

    pub fn channel(&self) -> &str {
        &self.channel
    }

    /// Install `handler`, replacing whatever was on the channel before.
    pub fn register(&self, messenger: &dyn Messenger, handler: Arc<dyn ChannelHandler>) {
        messenger.set_method_call_handler(&self.channel, Some(handler));
        info!(channel = %self.channel, "video path handler registered");
    }

    /// Release the channel.
    pub fn unregister(&self, messenger: &dyn Messenger) {
        messenger.set_method_call_handler(&self.channel, None);
        info!(channel = %self.channel, "video path handler removed");
    }
}

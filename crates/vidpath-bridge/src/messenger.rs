// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// In-process messenger.
//
// Stands in for the host framework's binary messenger on desktop/CI and
// behind the C entry points. Handlers are stored per channel name; a call on
// a channel with no handler gets no reply at all, which is what the UI layer
// sees on the bare Android activity.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use tracing::{debug, warn};

use vidpath_core::codec;
use vidpath_core::error::Result;
use vidpath_core::types::{ChannelError, HANDLER_FAULT, MethodInvocation, Resolution};

use crate::traits::{ChannelHandler, Messenger};

/// Channel registry with synchronous dispatch.
///
/// Cloning is cheap and every clone shares the same registry.
#[derive(Clone, Default)]
pub struct LocalMessenger {
    handlers: Arc<RwLock<HashMap<String, Arc<dyn ChannelHandler>>>>,
}

impl LocalMessenger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a handler is installed on `channel`.
    pub fn has_handler(&self, channel: &str) -> bool {
        self.handlers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(channel)
    }

    /// Deliver one invocation to the handler on `channel`.
    ///
    /// Returns `None` when nothing is registered. A handler fault is folded
    /// into a generic `"error"` failure carrying the fault's message.
    pub fn invoke(&self, channel: &str, invocation: &MethodInvocation) -> Option<Resolution> {
        // Clone the handler out so the lock is not held across the call.
        let handler = self
            .handlers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(channel)
            .cloned();

        let Some(handler) = handler else {
            debug!(channel, method = %invocation.method, "no handler registered; dropping call");
            return None;
        };

        match handler.handle(invocation) {
            Ok(resolution) => Some(resolution),
            Err(e) => {
                warn!(channel, method = %invocation.method, error = %e, "channel handler failed");
                Some(Resolution::Failure(ChannelError::new(
                    HANDLER_FAULT,
                    e.to_string(),
                )))
            }
        }
    }

    /// Binary entry point: decode a call, dispatch it, encode the reply.
    ///
    /// `Ok(None)` means no handler is registered on `channel`.
    pub fn send(&self, channel: &str, message: &[u8]) -> Result<Option<Vec<u8>>> {
        let invocation = codec::decode_invocation(message)?;
        self.invoke(channel, &invocation)
            .map(|resolution| codec::encode_reply(&resolution))
            .transpose()
    }
}

impl Messenger for LocalMessenger {
    fn set_method_call_handler(&self, channel: &str, handler: Option<Arc<dyn ChannelHandler>>) {
        let mut handlers = self.handlers.write().unwrap_or_else(PoisonError::into_inner);
        match handler {
            Some(handler) => {
                if handlers.insert(channel.to_owned(), handler).is_some() {
                    debug!(channel, "replaced existing channel handler");
                }
            }
            None => {
                handlers.remove(channel);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vidpath_core::error::VidpathError;
    use vidpath_core::types::VIDEO_PATH_CHANNEL;

    fn fixed(path: &'static str) -> Arc<dyn ChannelHandler> {
        Arc::new(move |_: &MethodInvocation| -> Result<Resolution> {
            Ok(Resolution::Success(path.into()))
        })
    }

    #[test]
    fn unregistered_channel_gets_no_reply() {
        let messenger = LocalMessenger::new();
        let reply = messenger.invoke(VIDEO_PATH_CHANNEL, &MethodInvocation::get_video_path("intro"));
        assert!(reply.is_none());
        assert!(!messenger.has_handler(VIDEO_PATH_CHANNEL));
    }

    #[test]
    fn reregistration_overwrites() {
        let messenger = LocalMessenger::new();
        messenger.set_method_call_handler(VIDEO_PATH_CHANNEL, Some(fixed("/first")));
        messenger.set_method_call_handler(VIDEO_PATH_CHANNEL, Some(fixed("/second")));

        let reply = messenger.invoke(VIDEO_PATH_CHANNEL, &MethodInvocation::get_video_path("x"));
        assert_eq!(reply, Some(Resolution::Success("/second".into())));
    }

    #[test]
    fn clearing_removes_handler() {
        let messenger = LocalMessenger::new();
        messenger.set_method_call_handler(VIDEO_PATH_CHANNEL, Some(fixed("/a")));
        messenger.set_method_call_handler(VIDEO_PATH_CHANNEL, None);
        assert!(!messenger.has_handler(VIDEO_PATH_CHANNEL));
    }

    #[test]
    fn handler_fault_becomes_generic_error() {
        let messenger = LocalMessenger::new();
        let failing: Arc<dyn ChannelHandler> = Arc::new(|_: &MethodInvocation| -> Result<Resolution> {
            Err(VidpathError::Io(std::io::Error::new(
                std::io::ErrorKind::StorageFull,
                "no space left",
            )))
        });
        messenger.set_method_call_handler(VIDEO_PATH_CHANNEL, Some(failing));

        match messenger.invoke(VIDEO_PATH_CHANNEL, &MethodInvocation::get_video_path("intro")) {
            Some(Resolution::Failure(err)) => {
                assert_eq!(err.code, "error");
                assert!(err.message.contains("no space left"), "message: {}", err.message);
            }
            other => panic!("unexpected reply: {other:?}"),
        }
    }

    #[test]
    fn clones_share_registry() {
        let messenger = LocalMessenger::new();
        let clone = messenger.clone();
        clone.set_method_call_handler(VIDEO_PATH_CHANNEL, Some(fixed("/shared")));
        assert!(messenger.has_handler(VIDEO_PATH_CHANNEL));
    }

    #[test]
    fn send_round_trips_bytes() {
        let messenger = LocalMessenger::new();
        messenger.set_method_call_handler(VIDEO_PATH_CHANNEL, Some(fixed("/bundle/intro.mp4")));

        let call = codec::encode_invocation(&MethodInvocation::get_video_path("intro")).expect("encode");
        let reply = messenger
            .send(VIDEO_PATH_CHANNEL, &call)
            .expect("send")
            .expect("reply");
        assert_eq!(
            codec::decode_reply(&reply).expect("decode"),
            Resolution::Success("/bundle/intro.mp4".into())
        );
    }

    #[test]
    fn send_without_handler_is_none() {
        let messenger = LocalMessenger::new();
        let call = codec::encode_invocation(&MethodInvocation::get_video_path("intro")).expect("encode");
        assert!(messenger.send(VIDEO_PATH_CHANNEL, &call).expect("send").is_none());
    }

    #[test]
    fn send_rejects_garbage() {
        let messenger = LocalMessenger::new();
        let result = messenger.send(VIDEO_PATH_CHANNEL, b"not a call");
        assert!(matches!(result, Err(VidpathError::Codec(_))));
    }
}

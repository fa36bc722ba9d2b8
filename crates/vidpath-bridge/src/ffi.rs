// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// C entry points for the native host shell.
//
// The app delegate (iOS) or activity (Android) forwards raw channel messages
// here instead of decoding them itself:
//
//   vidpath_register(config_json)              once, at startup
//   vidpath_send(channel, msg, len, &out, &n)  per message
//   vidpath_free_reply(out, n)                 after copying the reply
//
// Messages use the JSON method codec from `vidpath_core::codec`.

use std::ffi::{CStr, c_char};
use std::sync::OnceLock;

use tracing::warn;

use vidpath_core::BridgeConfig;

use crate::messenger::LocalMessenger;

/// A reply was written to the out-parameters.
pub const VIDPATH_OK: i32 = 0;
/// No handler is registered on the channel; nothing was written.
pub const VIDPATH_NO_HANDLER: i32 = 1;
/// Bad arguments, undecodable message, or handler setup failure.
pub const VIDPATH_ERROR: i32 = -1;

static MESSENGER: OnceLock<LocalMessenger> = OnceLock::new();

/// Process-wide messenger behind the C entry points.
pub fn shared_messenger() -> &'static LocalMessenger {
    MESSENGER.get_or_init(LocalMessenger::new)
}

/// Register the platform handler on the shared messenger.
///
/// `config_json` may be null to use the default configuration.
///
/// # Safety
///
/// `config_json` must be null or point to a NUL-terminated string that stays
/// valid for the duration of the call.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn vidpath_register(config_json: *const c_char) -> i32 {
    let config = if config_json.is_null() {
        BridgeConfig::default()
    } else {
        // SAFETY: caller guarantees a valid NUL-terminated string.
        let raw = unsafe { CStr::from_ptr(config_json) };
        let parsed = raw
            .to_str()
            .map_err(|e| vidpath_core::VidpathError::Config(e.to_string()))
            .and_then(BridgeConfig::from_json);
        match parsed {
            Ok(config) => config,
            Err(e) => {
                warn!(error = %e, "rejected bridge config");
                return VIDPATH_ERROR;
            }
        }
    };

    match crate::register_platform_handler(shared_messenger(), &config) {
        Ok(_) => VIDPATH_OK,
        Err(e) => {
            warn!(error = %e, "platform handler setup failed");
            VIDPATH_ERROR
        }
    }
}

/// Dispatch one encoded method call.
///
/// On `VIDPATH_OK`, `*reply`/`*reply_len` hold an encoded reply envelope
/// that must be released with [`vidpath_free_reply`]. An empty reply means
/// the method is not implemented.
///
/// # Safety
///
/// `channel` must be a valid NUL-terminated string, `message` must point to
/// `len` readable bytes (or be null with `len == 0`), and `reply` and
/// `reply_len` must be valid for writes.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn vidpath_send(
    channel: *const c_char,
    message: *const u8,
    len: usize,
    reply: *mut *mut u8,
    reply_len: *mut usize,
) -> i32 {
    if channel.is_null() || reply.is_null() || reply_len.is_null() || (message.is_null() && len > 0) {
        return VIDPATH_ERROR;
    }

    // SAFETY: pointers checked above; validity is the caller's contract.
    let channel = match unsafe { CStr::from_ptr(channel) }.to_str() {
        Ok(channel) => channel,
        Err(_) => return VIDPATH_ERROR,
    };
    let message: &[u8] = if len == 0 {
        &[]
    } else {
        // SAFETY: caller guarantees `len` readable bytes at `message`.
        unsafe { std::slice::from_raw_parts(message, len) }
    };

    match shared_messenger().send(channel, message) {
        Ok(Some(bytes)) => {
            let bytes = bytes.into_boxed_slice();
            let n = bytes.len();
            let ptr = Box::into_raw(bytes).cast::<u8>();
            // SAFETY: out-pointers are non-null and writable per the contract.
            unsafe {
                *reply = ptr;
                *reply_len = n;
            }
            VIDPATH_OK
        }
        Ok(None) => VIDPATH_NO_HANDLER,
        Err(e) => {
            warn!(channel, error = %e, "could not dispatch channel message");
            VIDPATH_ERROR
        }
    }
}

/// Release a reply returned by [`vidpath_send`].
///
/// # Safety
///
/// `reply` and `len` must come from one successful `vidpath_send` call, and
/// the reply must not be freed twice.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn vidpath_free_reply(reply: *mut u8, len: usize) {
    if reply.is_null() {
        return;
    }
    // SAFETY: the pointer/length pair was produced by `Box::into_raw` on a
    // boxed slice of exactly `len` bytes.
    drop(unsafe { Box::from_raw(std::ptr::slice_from_raw_parts_mut(reply, len)) });
}

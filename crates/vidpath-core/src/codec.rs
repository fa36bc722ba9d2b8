// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// JSON method codec for the binary messenger.
//
// Calls travel as `{"method": ..., "args": ...}`. Replies are envelopes:
// `[result]` on success, `[code, message, details]` on error, and an empty
// message when the handler does not implement the method.

use serde::de::Error as _;
use serde_json::Value;

use crate::error::Result;
use crate::types::{ChannelError, MethodInvocation, Resolution};

/// Encode a method call for the wire.
pub fn encode_invocation(invocation: &MethodInvocation) -> Result<Vec<u8>> {
    Ok(serde_json::to_vec(invocation)?)
}

/// Decode a method call received from the wire.
pub fn decode_invocation(bytes: &[u8]) -> Result<MethodInvocation> {
    Ok(serde_json::from_slice(bytes)?)
}

/// Encode a reply envelope.
pub fn encode_reply(resolution: &Resolution) -> Result<Vec<u8>> {
    let envelope = match resolution {
        Resolution::Success(path) => Value::Array(vec![Value::String(path.clone())]),
        Resolution::Failure(err) => Value::Array(vec![
            Value::String(err.code.clone()),
            Value::String(err.message.clone()),
            err.details.clone().unwrap_or(Value::Null),
        ]),
        Resolution::NotImplemented => return Ok(Vec::new()),
    };
    Ok(serde_json::to_vec(&envelope)?)
}

/// Decode a reply envelope.
pub fn decode_reply(bytes: &[u8]) -> Result<Resolution> {
    if bytes.is_empty() {
        return Ok(Resolution::NotImplemented);
    }

    let envelope: Vec<Value> = serde_json::from_slice(bytes)?;
    match envelope.as_slice() {
        [Value::String(path)] => Ok(Resolution::Success(path.clone())),
        [Value::String(code), message, details] => {
            let message = message.as_str().unwrap_or_default();
            let mut err = ChannelError::new(code.clone(), message);
            if !details.is_null() {
                err = err.with_details(details.clone());
            }
            Ok(Resolution::Failure(err))
        }
        other => Err(serde_json::Error::custom(format!(
            "unrecognised reply envelope with {} element(s)",
            other.len()
        ))
        .into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::VidpathError;
    use serde_json::json;

    #[test]
    fn invocation_wire_shape() {
        let call = MethodInvocation::get_video_path("splash");
        let bytes = encode_invocation(&call).expect("encode");
        let value: Value = serde_json::from_slice(&bytes).expect("valid json");
        assert_eq!(value, json!({ "method": "getVideoPath", "args": { "name": "splash" } }));
    }

    #[test]
    fn invocation_without_args_decodes_to_null() {
        let call = decode_invocation(br#"{"method":"getVideoPath"}"#).expect("decode");
        assert_eq!(call.method, "getVideoPath");
        assert!(call.arguments.is_null());
    }

    #[test]
    fn garbage_invocation_is_codec_error() {
        let result = decode_invocation(b"\x00\x01not json");
        assert!(matches!(result, Err(VidpathError::Codec(_))));
    }

    #[test]
    fn success_envelope() {
        let bytes = encode_reply(&Resolution::Success("/bundle/splash.mp4".into())).expect("encode");
        assert_eq!(bytes, br#"["/bundle/splash.mp4"]"#);
        assert_eq!(
            decode_reply(&bytes).expect("decode"),
            Resolution::Success("/bundle/splash.mp4".into())
        );
    }

    #[test]
    fn error_envelope_carries_null_details() {
        let bytes = encode_reply(&Resolution::unavailable()).expect("encode");
        let value: Value = serde_json::from_slice(&bytes).expect("valid json");
        assert_eq!(value, json!(["UNAVAILABLE", "Video path not available", null]));
        assert_eq!(decode_reply(&bytes).expect("decode"), Resolution::unavailable());
    }

    #[test]
    fn error_envelope_keeps_details() {
        let failure = Resolution::Failure(
            ChannelError::new("error", "disk full").with_details(json!({ "asset": "intro" })),
        );
        let bytes = encode_reply(&failure).expect("encode");
        assert_eq!(decode_reply(&bytes).expect("decode"), failure);
    }

    #[test]
    fn not_implemented_is_empty() {
        let bytes = encode_reply(&Resolution::NotImplemented).expect("encode");
        assert!(bytes.is_empty());
        assert_eq!(decode_reply(&bytes).expect("decode"), Resolution::NotImplemented);
    }

    #[test]
    fn odd_envelope_is_rejected() {
        let result = decode_reply(br#"["a", "b"]"#);
        assert!(matches!(result, Err(VidpathError::Codec(_))));
    }
}

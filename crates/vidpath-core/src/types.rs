// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for the video path channel.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Result, VidpathError};

/// Channel shared by the native and UI layers.
pub const VIDEO_PATH_CHANNEL: &str = "video_path_channel";

/// The only method the channel understands.
pub const GET_VIDEO_PATH: &str = "getVideoPath";

/// Argument key carrying the asset name.
pub const NAME_ARGUMENT: &str = "name";

/// Error code returned by the bundle resolver for every miss.
pub const UNAVAILABLE: &str = "UNAVAILABLE";

/// Error code returned by the cached asset resolver for a malformed request.
pub const INVALID_ARGUMENT: &str = "INVALID_ARGUMENT";

/// Error code the messenger uses when a handler fails with an error.
pub const HANDLER_FAULT: &str = "error";

/// A single request on a channel: a method name and its arguments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodInvocation {
    pub method: String,
    /// Usually a string-keyed map, but the caller may send any value.
    #[serde(rename = "args", default)]
    pub arguments: Value,
}

impl MethodInvocation {
    pub fn new(method: impl Into<String>, arguments: Value) -> Self {
        Self {
            method: method.into(),
            arguments,
        }
    }

    /// Shorthand for a `getVideoPath` call with a `name` argument.
    pub fn get_video_path(name: &str) -> Self {
        Self::new(GET_VIDEO_PATH, serde_json::json!({ NAME_ARGUMENT: name }))
    }

    /// Look up a string argument by key.
    ///
    /// Returns `None` when the arguments are not a map, the key is absent, or
    /// the value is not a string.
    pub fn string_argument(&self, key: &str) -> Option<&str> {
        self.arguments.as_object()?.get(key)?.as_str()
    }
}

/// Structured error reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelError {
    pub code: String,
    pub message: String,
    pub details: Option<Value>,
}

impl ChannelError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }
}

impl std::fmt::Display for ChannelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

/// Outcome of a handled method invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Absolute filesystem path of the resolved video.
    Success(String),
    Failure(ChannelError),
    /// The handler does not know the requested method.
    NotImplemented,
}

impl Resolution {
    /// The single failure the bundle resolver reports.
    pub fn unavailable() -> Self {
        Self::Failure(ChannelError::new(UNAVAILABLE, "Video path not available"))
    }

    /// Reply for a call whose `name` argument is missing or not a string.
    pub fn invalid_argument() -> Self {
        Self::Failure(ChannelError::new(
            INVALID_ARGUMENT,
            "Missing or invalid 'name' argument",
        ))
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// The resolved path, if any.
    pub fn path(&self) -> Option<&str> {
        match self {
            Self::Success(path) => Some(path),
            _ => None,
        }
    }
}

/// A validated reference to a bundled video.
///
/// The name ends up as a file name on disk, so anything that could escape
/// the target directory is refused up front.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AssetReference(String);

impl AssetReference {
    pub fn parse(name: &str) -> Result<Self> {
        let traversal = name == "." || name == "..";
        let bad_char = name.chars().any(|c| matches!(c, '/' | '\\' | '\0'));
        if name.is_empty() || traversal || bad_char {
            return Err(VidpathError::InvalidAssetName(name.to_owned()));
        }
        Ok(Self(name.to_owned()))
    }

    pub fn name(&self) -> &str {
        &self.0
    }

    /// `<name>.<extension>`
    pub fn file_name(&self, extension: &str) -> String {
        format!("{}.{extension}", self.0)
    }

    /// Path inside an asset tree, e.g. `videos/intro.mp4`.
    pub fn asset_path(&self, prefix: &str, extension: &str) -> String {
        let prefix = prefix.trim_end_matches('/');
        if prefix.is_empty() {
            self.file_name(extension)
        } else {
            format!("{prefix}/{}", self.file_name(extension))
        }
    }
}

impl std::fmt::Display for AssetReference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn string_argument_reads_name() {
        let call = MethodInvocation::get_video_path("intro");
        assert_eq!(call.method, GET_VIDEO_PATH);
        assert_eq!(call.string_argument(NAME_ARGUMENT), Some("intro"));
    }

    #[test]
    fn string_argument_rejects_wrong_shapes() {
        let cases = [
            json!({}),
            json!({ "name": 123 }),
            json!({ "name": null }),
            json!(["name", "intro"]),
            json!("intro"),
            Value::Null,
        ];
        for args in cases {
            let call = MethodInvocation::new(GET_VIDEO_PATH, args.clone());
            assert_eq!(call.string_argument(NAME_ARGUMENT), None, "args: {args}");
        }
    }

    #[test]
    fn unavailable_matches_wire_contract() {
        match Resolution::unavailable() {
            Resolution::Failure(err) => {
                assert_eq!(err.code, "UNAVAILABLE");
                assert_eq!(err.message, "Video path not available");
                assert!(err.details.is_none());
            }
            other => panic!("unexpected resolution: {other:?}"),
        }
    }

    #[test]
    fn asset_reference_builds_paths() {
        let asset = AssetReference::parse("intro").expect("valid name");
        assert_eq!(asset.file_name("mp4"), "intro.mp4");
        assert_eq!(asset.asset_path("videos", "mp4"), "videos/intro.mp4");
        assert_eq!(asset.asset_path("videos/", "mp4"), "videos/intro.mp4");
        assert_eq!(asset.asset_path("", "mp4"), "intro.mp4");
    }

    #[test]
    fn asset_reference_rejects_escapes() {
        for name in ["", ".", "..", "../secret", "a/b", "a\\b", "nul\0byte"] {
            assert!(
                AssetReference::parse(name).is_err(),
                "{name:?} must be rejected"
            );
        }
    }

    #[test]
    fn asset_reference_allows_dots_inside_name() {
        let asset = AssetReference::parse("castle.tour").expect("valid name");
        assert_eq!(asset.file_name("mp4"), "castle.tour.mp4");
    }
}

// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for the video path bridge.

use thiserror::Error;

/// Top-level error type for all bridge operations.
#[derive(Debug, Error)]
pub enum VidpathError {
    // -- Request errors --
    #[error("invalid asset name: {0:?}")]
    InvalidAssetName(String),

    // -- Storage / encoding --
    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("method codec error: {0}")]
    Codec(#[from] serde_json::Error),

    #[error("configuration error: {0}")]
    Config(String),

    // -- Platform bridge --
    #[error("platform bridge error: {0}")]
    Bridge(String),
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, VidpathError>;

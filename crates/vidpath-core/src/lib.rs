// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Video path bridge — core types, errors and the method codec shared by all crates.

pub mod codec;
pub mod config;
pub mod error;
pub mod types;

pub use config::BridgeConfig;
pub use error::VidpathError;
pub use types::*;

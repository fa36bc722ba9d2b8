// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// vidpath — desktop host for the video path channel.
//
// Entry point. Initialises logging and config, registers the platform
// handler, then resolves every name given on the command line and prints
// one reply envelope per line.

mod services;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use services::config_dir;
use services::host::Host;

#[derive(Debug, Parser)]
#[command(name = "vidpath")]
#[command(about = "Resolve bundled video names over the video path channel", long_about = None)]
#[command(version)]
struct Cli {
    /// Bridge config file (JSON); overrides $VIDPATH_CONFIG
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Directory holding `<name>.mp4` resources; overrides the config
    #[arg(short, long, value_name = "DIR")]
    bundle_root: Option<PathBuf>,

    /// Video names to resolve
    #[arg(value_name = "NAME", required = true)]
    names: Vec<String>,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    tracing::info!("vidpath host starting");

    let mut config = match config_dir::load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "could not load bridge config");
            return ExitCode::FAILURE;
        }
    };
    if let Some(root) = cli.bundle_root {
        config.bundle_root = Some(root);
    }

    let host = match Host::start(config) {
        Ok(host) => host,
        Err(e) => {
            tracing::error!(error = %e, "host startup failed");
            return ExitCode::FAILURE;
        }
    };

    let mut stdout = std::io::stdout().lock();
    match host.resolve_all(&cli.names, &mut stdout) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            tracing::error!(error = %e, "could not write replies");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_names_and_overrides() {
        let cli = Cli::try_parse_from(["vidpath", "--bundle-root", "/srv/videos", "intro", "splash"])
            .expect("parse");
        assert_eq!(cli.bundle_root.as_deref(), Some(std::path::Path::new("/srv/videos")));
        assert_eq!(cli.names, vec!["intro", "splash"]);
        assert!(cli.config.is_none());
    }

    #[test]
    fn names_are_required() {
        assert!(Cli::try_parse_from(["vidpath"]).is_err());
    }
}

//! Command-line argument dispatch.
//!
//! Maps validated CLI matches to the action the binary runs.

use crate::cli::actions::{server::Args, Action};
use crate::cli::commands::{gate, ARG_PORT, ARG_SITE_DIR};
use anyhow::{Context, Result};
use std::path::PathBuf;

/// Map validated CLI matches to a server action.
///
/// # Errors
/// Returns an error if required arguments are missing.
pub fn handler(matches: &clap::ArgMatches) -> Result<Action> {
    let port = matches.get_one::<u16>(ARG_PORT).copied().unwrap_or(8080);
    let site_dir = matches
        .get_one::<String>(ARG_SITE_DIR)
        .map(PathBuf::from)
        .context("missing required argument: --site-dir")?;

    let gate_opts = gate::Options::parse(matches);

    Ok(Action::Server(Args {
        port,
        site_dir,
        project_password: gate_opts.project_password,
    }))
}

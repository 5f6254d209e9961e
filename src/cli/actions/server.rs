use crate::sitegate::{self, gate::Gate};
use anyhow::Result;
use secrecy::SecretString;
use std::{path::PathBuf, sync::Arc};
use tracing::{debug, warn};

#[derive(Debug)]
pub struct Args {
    pub port: u16,
    pub site_dir: PathBuf,
    pub project_password: Option<SecretString>,
}

/// Execute the server action.
/// # Errors
/// Returns an error if the server fails to start.
pub async fn execute(args: Args) -> Result<()> {
    debug!("Server args: {:?}", args);

    let gate = Gate::new(args.project_password);

    if !gate.is_configured() {
        warn!("PROJECT_PASSWORD is not set; every protected page will redirect to /login");
    }

    if !args.site_dir.is_dir() {
        warn!("Site directory {} does not exist", args.site_dir.display());
    }

    sitegate::new(args.port, args.site_dir, Arc::new(gate)).await
}

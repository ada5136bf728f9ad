//! File logging. The terminal belongs to the UI, so events go to `crema.log`.

use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::sync::Mutex;

use color_eyre::eyre::{Result, eyre};
use directories::ProjectDirs;
use tracing_subscriber::{EnvFilter, fmt};

const LOG_FILE: &str = "crema.log";
const LOG_ENV: &str = "CREMA_LOG";
const DEFAULT_FILTER: &str = "info,crema=debug";

/// Install the global subscriber. Returns the log file path.
pub fn init() -> Result<PathBuf> {
    let dirs = ProjectDirs::from("", "", "crema")
        .ok_or_else(|| eyre!("could not determine a data directory for this platform"))?;
    let dir = dirs.data_local_dir();
    fs::create_dir_all(dir)?;
    let path = dir.join(LOG_FILE);
    let file = OpenOptions::new().create(true).append(true).open(&path)?;

    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .try_init()
        .map_err(|err| eyre!("failed to install log subscriber: {err}"))?;
    Ok(path)
}

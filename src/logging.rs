use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use crate::error::Result;

pub const LOG_FILE: &str = "tally.log";

/// Send tracing output to `<data_dir>/tally.log`. The terminal belongs to the window,
/// so nothing is ever written to stdout. `RUST_LOG` overrides the default `tally=info`.
pub fn init_logging(data_dir: &Path) -> Result<()> {
    std::fs::create_dir_all(data_dir)?;
    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(data_dir.join(LOG_FILE))?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("tally=info"));

    // Only the first subscriber installed in a process takes effect.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Arc::new(log_file))
        .try_init();
    Ok(())
}

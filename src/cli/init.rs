use std::path::Path;

use super::open_store;
use crate::error::Result;
use crate::settings::{load_settings, save_settings};

pub fn run(data_dir: &Path) -> Result<()> {
    let store = open_store(data_dir)?;

    let mut settings = load_settings();
    settings.data_dir = data_dir.to_string_lossy().to_string();
    save_settings(&settings)?;

    println!("Ledger ready at {}", store.path().display());
    Ok(())
}

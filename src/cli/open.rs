use std::path::Path;

use super::open_store;
use crate::error::Result;
use crate::tui::run_view;
use crate::window::LedgerWindow;

/// Initialize the ledger and open the interactive window.
pub fn run(data_dir: &Path) -> Result<()> {
    let store = open_store(data_dir)?;
    let mut window = LedgerWindow::new(store)?;
    run_view(&mut window)
}

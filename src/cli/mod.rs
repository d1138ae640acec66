pub mod demo;
pub mod init;
pub mod ledger;
pub mod open;
pub mod status;

use std::path::Path;

use clap::{Parser, Subcommand};

use crate::error::Result;
use crate::store::{LedgerStore, SqliteStore};

#[derive(Parser)]
#[command(name = "tally", about = "Personal income and expense ledger.")]
pub struct Cli {
    /// Use this data directory instead of the saved one
    #[arg(long = "data-dir", global = true)]
    pub data_dir: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Choose a data directory and initialize the ledger there.
    Init,
    /// Record a transaction dated today.
    Add {
        /// What the money was for
        description: String,
        /// Signed amount: positive for income, negative for an expense
        #[arg(allow_hyphen_values = true)]
        amount: String,
        /// Income, Food, Transport, Shopping, Bills, Entertainment or Others
        #[arg(long, default_value = "Food")]
        category: String,
    },
    /// List all transactions, newest first.
    List,
    /// Delete a transaction by ID.
    Delete {
        /// Transaction ID (shown in `tally list`)
        id: i64,
    },
    /// Show income, expense and balance totals.
    Totals,
    /// Show the data directory, database and row count.
    Status,
    /// Load a few sample transactions to explore the ledger.
    Demo,
}

/// Make sure the data directory and ledger table exist, then hand back the store.
pub(crate) fn open_store(data_dir: &Path) -> Result<SqliteStore> {
    std::fs::create_dir_all(data_dir)?;
    let mut store = SqliteStore::in_dir(data_dir);
    store.initialize()?;
    Ok(store)
}

use std::path::{Path, PathBuf};

use chrono::Local;
use tracing::{debug, info};

use crate::db;
use crate::error::Result;
use crate::models::{Totals, Transaction};

/// Everything the ledger window needs from persistence.
pub trait LedgerStore {
    /// Create the backing table if it does not exist yet. Safe to call repeatedly.
    fn initialize(&mut self) -> Result<()>;

    /// Record a transaction dated today. Description and category are stored as given.
    fn add(&mut self, description: &str, amount: f64, category: &str) -> Result<Transaction>;

    /// All transactions, newest date first; rows sharing a date keep insertion order.
    fn list_all(&self) -> Result<Vec<Transaction>>;

    /// Remove the transaction with `id`. A missing id is not an error.
    fn delete(&mut self, id: i64) -> Result<()>;

    fn totals(&self) -> Result<Totals>;
}

/// SQLite-backed store. A connection is opened for each operation and closed when it returns.
pub struct SqliteStore {
    path: PathBuf,
}

impl SqliteStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn in_dir(data_dir: &Path) -> Self {
        Self::new(data_dir.join(db::DB_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl LedgerStore for SqliteStore {
    fn initialize(&mut self) -> Result<()> {
        let conn = db::get_connection(&self.path)?;
        db::init_db(&conn)?;
        info!(path = %self.path.display(), "ledger initialized");
        Ok(())
    }

    fn add(&mut self, description: &str, amount: f64, category: &str) -> Result<Transaction> {
        let conn = db::get_connection(&self.path)?;
        let today = Local::now().date_naive();
        let txn = db::insert_dated(&conn, today, description, amount, category)?;
        info!(id = txn.id, amount, category, "transaction added");
        Ok(txn)
    }

    fn list_all(&self) -> Result<Vec<Transaction>> {
        let conn = db::get_connection(&self.path)?;
        let rows = db::list_transactions(&conn)?;
        debug!(count = rows.len(), "transactions listed");
        Ok(rows)
    }

    fn delete(&mut self, id: i64) -> Result<()> {
        let conn = db::get_connection(&self.path)?;
        let removed = db::delete_transaction(&conn, id)?;
        if removed == 0 {
            debug!(id, "delete matched no transaction");
        } else {
            info!(id, "transaction deleted");
        }
        Ok(())
    }

    fn totals(&self) -> Result<Totals> {
        let conn = db::get_connection(&self.path)?;
        db::totals(&conn)
    }
}

use std::path::Path;

use chrono::NaiveDate;
use rusqlite::types::Type;
use rusqlite::{Connection, Row};

use crate::error::Result;
use crate::models::{Totals, Transaction};

pub const DB_FILE: &str = "expenses.db";

pub const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS expenses (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    transaction_date TEXT NOT NULL,
    description TEXT NOT NULL,
    amount REAL NOT NULL,
    category TEXT NOT NULL
);
";

const DATE_FORMAT: &str = "%Y-%m-%d";

pub fn get_connection(db_path: &Path) -> Result<Connection> {
    let conn = Connection::open(db_path)?;
    conn.execute_batch("PRAGMA journal_mode=WAL;")?;
    Ok(conn)
}

pub fn init_db(conn: &Connection) -> Result<()> {
    conn.execute_batch(SCHEMA)?;
    Ok(())
}

pub fn insert_dated(
    conn: &Connection,
    date: NaiveDate,
    description: &str,
    amount: f64,
    category: &str,
) -> Result<Transaction> {
    conn.execute(
        "INSERT INTO expenses (transaction_date, description, amount, category) VALUES (?1, ?2, ?3, ?4)",
        rusqlite::params![date.format(DATE_FORMAT).to_string(), description, amount, category],
    )?;
    Ok(Transaction {
        id: conn.last_insert_rowid(),
        date,
        description: description.to_string(),
        amount,
        category: category.to_string(),
    })
}

pub fn list_transactions(conn: &Connection) -> Result<Vec<Transaction>> {
    let mut stmt = conn.prepare(
        "SELECT id, transaction_date, description, amount, category FROM expenses \
         ORDER BY transaction_date DESC, id ASC",
    )?;
    let rows = stmt
        .query_map([], map_transaction)?
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(rows)
}

/// Returns the number of rows removed (0 when the id does not exist).
pub fn delete_transaction(conn: &Connection, id: i64) -> Result<usize> {
    Ok(conn.execute("DELETE FROM expenses WHERE id = ?1", [id])?)
}

pub fn totals(conn: &Connection) -> Result<Totals> {
    let income: f64 = conn.query_row(
        "SELECT IFNULL(SUM(amount), 0) FROM expenses WHERE amount > 0",
        [],
        |r| r.get(0),
    )?;
    let expenses: f64 = conn.query_row(
        "SELECT IFNULL(SUM(amount), 0) FROM expenses WHERE amount < 0",
        [],
        |r| r.get(0),
    )?;
    Ok(Totals::from_sums(income, expenses))
}

pub fn transaction_count(conn: &Connection) -> Result<i64> {
    Ok(conn.query_row("SELECT count(*) FROM expenses", [], |r| r.get(0))?)
}

fn map_transaction(row: &Row) -> rusqlite::Result<Transaction> {
    let date_str: String = row.get(1)?;
    let date = NaiveDate::parse_from_str(&date_str, DATE_FORMAT)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(1, Type::Text, Box::new(e)))?;
    Ok(Transaction {
        id: row.get(0)?,
        date,
        description: row.get(2)?,
        amount: row.get(3)?,
        category: row.get(4)?,
    })
}

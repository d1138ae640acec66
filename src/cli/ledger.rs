use std::path::Path;

use colored::Colorize;
use comfy_table::{Cell, CellAlignment, Table};

use super::open_store;
use crate::db::{delete_transaction, get_connection};
use crate::error::{LedgerError, Result};
use crate::fmt::label;
use crate::input::validate_entry;
use crate::models::{Category, Transaction};
use crate::store::LedgerStore;

pub fn add(data_dir: &Path, description: &str, amount: &str, category: &str) -> Result<()> {
    let amount = validate_entry(description, amount)
        .map_err(|msg| LedgerError::InvalidInput(msg.to_string()))?;
    let category: Category = category.parse()?;

    let mut store = open_store(data_dir)?;
    let txn = store.add(description, amount, category.as_str())?;
    println!(
        "Added #{}: {} {} ({})",
        txn.id, txn.description, txn.amount, txn.category
    );
    Ok(())
}

pub fn list(data_dir: &Path) -> Result<()> {
    let store = open_store(data_dir)?;
    let rows = store.list_all()?;
    if rows.is_empty() {
        println!("No transactions yet.");
        return Ok(());
    }
    println!("{}", transaction_table(&rows));
    Ok(())
}

fn transaction_table(rows: &[Transaction]) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["ID", "Date", "Description", "Amount", "Category"]);
    for t in rows {
        table.add_row(vec![
            Cell::new(t.id),
            Cell::new(t.date),
            Cell::new(&t.description),
            Cell::new(t.amount).set_alignment(CellAlignment::Right),
            Cell::new(&t.category),
        ]);
    }
    table
}

/// Deleting an ID that does not exist is not an error; it only changes the message.
pub fn delete(data_dir: &Path, id: i64) -> Result<()> {
    let store = open_store(data_dir)?;
    let conn = get_connection(store.path())?;
    if delete_transaction(&conn, id)? == 0 {
        println!("No transaction with ID {id}; nothing deleted.");
    } else {
        println!("Deleted transaction {id}");
    }
    Ok(())
}

pub fn totals(data_dir: &Path) -> Result<()> {
    let store = open_store(data_dir)?;
    let t = store.totals()?;
    println!("{}", label("Income", t.income).green().bold());
    println!("{}", label("Expenses", t.expenses).red().bold());
    println!("{}", label("Balance", t.balance).blue().bold());
    Ok(())
}

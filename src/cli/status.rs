use std::path::Path;

use crate::db::{get_connection, transaction_count, DB_FILE};
use crate::error::Result;
use crate::fmt::format_bytes;
use crate::logging::LOG_FILE;

pub fn run(data_dir: &Path) -> Result<()> {
    let db_path = data_dir.join(DB_FILE);

    println!("Data dir:   {}", data_dir.display());
    println!("Database:   {}", db_path.display());
    println!("Log file:   {}", data_dir.join(LOG_FILE).display());

    if db_path.exists() {
        let size = std::fs::metadata(&db_path)?.len();
        println!("DB size:    {}", format_bytes(size));

        let conn = get_connection(&db_path)?;
        let count = transaction_count(&conn)?;
        println!();
        println!("Transactions:  {count}");
    } else {
        println!();
        println!("Database not found. Run `tally init` to set up.");
    }

    Ok(())
}

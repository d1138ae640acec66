use std::path::Path;

use chrono::{Days, Local, NaiveDate};
use rusqlite::Connection;

use super::open_store;
use crate::db::{get_connection, insert_dated};
use crate::error::Result;
use crate::models::Category;

struct DemoTxn {
    days_ago: u64,
    description: &'static str,
    amount: f64,
    category: Category,
}

/// Two months of ordinary household activity, oldest first.
const SAMPLES: &[DemoTxn] = &[
    DemoTxn { days_ago: 58, description: "Monthly salary", amount: 3200.00, category: Category::Income },
    DemoTxn { days_ago: 57, description: "Rent", amount: -1150.00, category: Category::Bills },
    DemoTxn { days_ago: 54, description: "Weekly groceries", amount: -86.40, category: Category::Food },
    DemoTxn { days_ago: 50, description: "Train pass", amount: -64.00, category: Category::Transport },
    DemoTxn { days_ago: 45, description: "Electricity bill", amount: -72.35, category: Category::Bills },
    DemoTxn { days_ago: 41, description: "Cinema tickets", amount: -24.00, category: Category::Entertainment },
    DemoTxn { days_ago: 36, description: "Running shoes", amount: -119.99, category: Category::Shopping },
    DemoTxn { days_ago: 28, description: "Monthly salary", amount: 3200.00, category: Category::Income },
    DemoTxn { days_ago: 27, description: "Rent", amount: -1150.00, category: Category::Bills },
    DemoTxn { days_ago: 22, description: "Weekly groceries", amount: -91.15, category: Category::Food },
    DemoTxn { days_ago: 15, description: "Sold old bike", amount: 180.00, category: Category::Others },
    DemoTxn { days_ago: 9, description: "Dinner with friends", amount: -56.80, category: Category::Food },
    DemoTxn { days_ago: 4, description: "Streaming subscription", amount: -12.99, category: Category::Entertainment },
    DemoTxn { days_ago: 1, description: "Taxi home", amount: -18.50, category: Category::Transport },
];

fn insert_demo_data(conn: &Connection, today: NaiveDate) -> Result<usize> {
    for s in SAMPLES {
        let date = today.checked_sub_days(Days::new(s.days_ago)).unwrap_or(today);
        insert_dated(conn, date, s.description, s.amount, s.category.as_str())?;
    }
    Ok(SAMPLES.len())
}

pub fn run(data_dir: &Path) -> Result<()> {
    let store = open_store(data_dir)?;
    let conn = get_connection(store.path())?;
    let count = insert_demo_data(&conn, Local::now().date_naive())?;
    println!("Added {count} sample transactions to {}", store.path().display());
    println!("Run `tally` to explore them.");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{init_db, list_transactions, totals};

    #[test]
    fn test_demo_data_spans_past_dates() {
        let dir = tempfile::tempdir().unwrap();
        let conn = get_connection(&dir.path().join("test.db")).unwrap();
        init_db(&conn).unwrap();
        let today = NaiveDate::from_ymd_opt(2024, 5, 31).unwrap();

        let count = insert_demo_data(&conn, today).unwrap();
        let rows = list_transactions(&conn).unwrap();
        assert_eq!(rows.len(), count);
        assert!(rows.iter().all(|t| t.date < today));
        assert!(rows.windows(2).all(|w| w[0].date >= w[1].date));
        assert_eq!(rows[0].description, "Taxi home");

        let t = totals(&conn).unwrap();
        assert!((t.balance - (t.income - t.expenses)).abs() < 1e-9);
        assert!((t.income - 6580.0).abs() < 1e-9);
    }
}

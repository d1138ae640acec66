use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;

use crate::error::LedgerError;

#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    pub id: i64,
    pub date: NaiveDate,
    pub description: String,
    pub amount: f64,
    pub category: String,
}

/// The closed set of labels offered by the category picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Category {
    Income,
    #[default]
    Food,
    Transport,
    Shopping,
    Bills,
    Entertainment,
    Others,
}

impl Category {
    /// Picker order. `Category::default()` is the second entry.
    pub const ALL: [Category; 7] = [
        Category::Income,
        Category::Food,
        Category::Transport,
        Category::Shopping,
        Category::Bills,
        Category::Entertainment,
        Category::Others,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Income => "Income",
            Category::Food => "Food",
            Category::Transport => "Transport",
            Category::Shopping => "Shopping",
            Category::Bills => "Bills",
            Category::Entertainment => "Entertainment",
            Category::Others => "Others",
        }
    }

    pub fn index(self) -> usize {
        Self::ALL.iter().position(|c| *c == self).unwrap_or(0)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|c| c.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| LedgerError::UnknownCategory(s.to_string()))
    }
}

/// Aggregates over the whole ledger. Zero amounts count toward neither side.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Totals {
    pub income: f64,
    pub expenses: f64,
    pub balance: f64,
}

impl Totals {
    /// `negative_sum` is the (non-positive) sum of all expense amounts.
    pub fn from_sums(positive_sum: f64, negative_sum: f64) -> Self {
        Self {
            income: positive_sum,
            expenses: negative_sum.abs(),
            balance: positive_sum + negative_sum,
        }
    }
}

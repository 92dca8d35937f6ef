pub mod collector;
pub mod config;
pub mod ledger;
pub mod number_formatter;
pub mod report;
pub mod style;

use rust_decimal::Decimal;
use std::fmt::Display;
use std::path::PathBuf;
use thiserror::Error;

pub const DELIMITER: u8 = b',';

/// One logged expense, as entered by the user or read back from the ledger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expense {
    pub name: String,
    pub category: String,
    pub amount: Decimal,
}

impl Expense {
    pub fn new(name: impl Into<String>, category: impl Into<String>, amount: Decimal) -> Self {
        Self {
            name: name.into(),
            category: category.into(),
            amount,
        }
    }
}

impl Display for Expense {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "<Expense: {}, ${:.2}, {}>",
            self.name,
            self.amount.round_dp(2),
            self.category
        )
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("I/O error: {context}")]
    Io {
        #[source]
        source: std::io::Error,
        context: String,
    },

    #[error("CSV error: {source}")]
    Csv {
        #[from]
        source: csv::Error,
    },

    #[error("File not found: {}", .0.display())]
    LedgerNotFound(PathBuf),

    #[error("Input closed before an expense was entered")]
    InputClosed,

    #[error("Amounts are too large to add up")]
    AmountOverflow,

    #[error("Invalid date format: {input} ({source})")]
    DateParse {
        source: chrono::format::ParseError,
        input: String,
    },
}

impl AppError {
    pub(crate) fn io(source: std::io::Error, context: impl Into<String>) -> Self {
        AppError::Io {
            source,
            context: context.into(),
        }
    }
}

use thiserror::Error;

use crate::decimal::Quantity;

#[derive(Error, Debug)]
pub enum JournalError {
    #[error("insufficient lots for {ticker}: available {available}, requested {requested}")]
    InsufficientLots {
        ticker: String,
        available: Quantity,
        requested: Quantity,
    },

    #[error("invalid date: {message}")]
    InvalidDate {
        message: String,
    },

    #[error("invalid configuration: {message}")]
    InvalidConfiguration {
        message: String,
    },

    #[error("calculation error: {message}")]
    CalculationError {
        message: String,
    },

    #[error("import failed at line {line}: {message}")]
    ImportRow {
        line: u64,
        message: String,
    },

    #[error("import is missing required column {column}")]
    MissingColumn {
        column: String,
    },

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, JournalError>;

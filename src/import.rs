use std::io::Read;
use std::str::FromStr;

use chrono::NaiveDate;
use log::warn;
use rust_decimal::Decimal;

use crate::decimal::{Money, Quantity};
use crate::errors::{JournalError, Result};
use crate::types::{SpotTransaction, TransactionKind};

/// a row that could not be imported, with the reason it was skipped
#[derive(Debug, Clone, PartialEq)]
pub struct ImportIssue {
    pub line: u64,
    pub message: String,
}

/// outcome of a bulk import: good rows in, bad rows reported
#[derive(Debug, Clone, Default)]
pub struct ImportOutcome {
    pub transactions: Vec<SpotTransaction>,
    pub skipped: Vec<ImportIssue>,
}

// externally-sourced files disagree on header names; each column is looked
// up under every alias seen in the wild
const DATE_ALIASES: &[&str] = &["date", "tradedate", "transactiondate"];
const KIND_ALIASES: &[&str] = &["type", "transactiontype", "kind"];
const TICKER_ALIASES: &[&str] = &["ticker", "symbol"];
const COMPANY_ALIASES: &[&str] = &["company", "name"];
const PRICE_ALIASES: &[&str] = &["price"];
const QUANTITY_ALIASES: &[&str] = &["quantity", "qty", "shares"];
const NOTE_ALIASES: &[&str] = &["note", "notes", "comment"];

struct Columns {
    date: usize,
    kind: usize,
    price: usize,
    quantity: usize,
    ticker: Option<usize>,
    company: Option<usize>,
    note: Option<usize>,
}

impl Columns {
    fn resolve(headers: &csv::StringRecord) -> Result<Self> {
        let normalized: Vec<String> = headers
            .iter()
            .map(|h| h.trim().to_lowercase().replace(['_', ' ', '-'], ""))
            .collect();

        let find = |aliases: &[&str]| {
            normalized
                .iter()
                .position(|h| aliases.contains(&h.as_str()))
        };
        let require = |aliases: &[&str]| {
            find(aliases).ok_or_else(|| JournalError::MissingColumn {
                column: aliases[0].to_string(),
            })
        };

        Ok(Self {
            date: require(DATE_ALIASES)?,
            kind: require(KIND_ALIASES)?,
            price: require(PRICE_ALIASES)?,
            quantity: require(QUANTITY_ALIASES)?,
            ticker: find(TICKER_ALIASES),
            company: find(COMPANY_ALIASES),
            note: find(NOTE_ALIASES),
        })
    }
}

/// parse a CSV export into normalized spot transactions
///
/// Rows that fail to parse are skipped and reported; a malformed file (bad
/// CSV framing, missing required columns) fails as a whole.
pub fn read_transactions_csv<R: Read>(reader: R) -> Result<ImportOutcome> {
    let mut rdr = csv::Reader::from_reader(reader);
    let columns = Columns::resolve(rdr.headers()?)?;

    let mut outcome = ImportOutcome::default();

    for record in rdr.records() {
        let record = record?;
        let line = record.position().map(|p| p.line()).unwrap_or(0);

        match parse_row(&columns, &record) {
            Ok(tx) => outcome.transactions.push(tx),
            Err(err) => {
                let message = err.to_string();
                warn!("import: skipping line {line}: {message}");
                outcome.skipped.push(ImportIssue { line, message });
            }
        }
    }

    Ok(outcome)
}

fn parse_row(columns: &Columns, record: &csv::StringRecord) -> Result<SpotTransaction> {
    let field = |idx: usize, name: &str| -> Result<&str> {
        record.get(idx).ok_or_else(|| JournalError::ImportRow {
            line: record.position().map(|p| p.line()).unwrap_or(0),
            message: format!("missing {name} field"),
        })
    };
    let bad_row = |message: String| JournalError::ImportRow {
        line: record.position().map(|p| p.line()).unwrap_or(0),
        message,
    };

    let date = parse_date(field(columns.date, "date")?)
        .ok_or_else(|| bad_row("unrecognized date format".to_string()))?;
    let kind = parse_kind(field(columns.kind, "type")?)
        .ok_or_else(|| bad_row("unknown transaction type".to_string()))?;
    let price = Decimal::from_str(field(columns.price, "price")?.trim())
        .map(Money::from_decimal)
        .map_err(|e| bad_row(format!("invalid price: {e}")))?;
    let quantity = Decimal::from_str(field(columns.quantity, "quantity")?.trim())
        .map(Quantity::from_decimal)
        .map_err(|e| bad_row(format!("invalid quantity: {e}")))?;

    let optional = |idx: Option<usize>| {
        idx.and_then(|i| record.get(i))
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    };

    let mut tx = SpotTransaction::new(kind, optional(columns.ticker), price, quantity, date);
    tx.company = optional(columns.company);
    tx.note = optional(columns.note);
    Ok(tx)
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(raw, "%d.%m.%Y"))
        .ok()
}

fn parse_kind(raw: &str) -> Option<TransactionKind> {
    match raw.trim().to_uppercase().as_str() {
        "BUY" => Some(TransactionKind::Buy),
        "SELL" => Some(TransactionKind::Sell),
        "DEPOSIT" => Some(TransactionKind::Deposit),
        "WITHDRAW" => Some(TransactionKind::Withdraw),
        "DIVIDEND" => Some(TransactionKind::Dividend),
        _ => None,
    }
}

pub mod cash;
pub mod config;
pub mod decimal;
pub mod errors;
pub mod events;
pub mod fifo;
pub mod import;
pub mod interest;
pub mod quotes;
pub mod report;
pub mod statistics;
pub mod types;

// re-export key types
pub use cash::{CashFlow, CashLedger};
pub use config::{FifoConfig, OversellPolicy};
pub use decimal::{Money, Quantity, Rate, DAYS_PER_YEAR};
pub use errors::{JournalError, Result};
pub use events::{RateChangeEvent, RateTimeline};
pub use fifo::{
    FifoEngine, FifoReport, FifoTotals, Lot, LotBook, MatchSummary, PositionSnapshot,
    RealizedSale, SaleMatch,
};
pub use import::{read_transactions_csv, ImportIssue, ImportOutcome};
pub use interest::{AccrualEngine, AccrualPeriod, AccrualReport, RateSavings};
pub use quotes::{NoQuotes, PriceTable, QuoteSource};
pub use report::PortfolioReport;
pub use statistics::{compute_statistics, PortfolioStatistics};
pub use types::{
    MarginPosition, SpotTransaction, TradeClosure, TradeId, TransactionId, TransactionKind,
};

// re-export external dependencies that users will need
pub use chrono;
pub use hourglass_rs::{SafeTimeProvider, TimeSource};
pub use rust_decimal::Decimal;
pub use uuid::Uuid;

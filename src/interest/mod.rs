pub mod accrual;
pub mod savings;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::decimal::{Money, Rate};
use crate::types::TradeId;

pub use accrual::AccrualEngine;
pub use savings::{current_rate, daily_interest, rate_savings, RateSavings};

/// a contiguous date range during which a single annual rate applied
///
/// The end date is exclusive; `days` is the whole-day span of the range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccrualPeriod {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub days: u32,
    pub rate: Rate,
    pub interest: Money,
}

/// full accrual breakdown for one margin position
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccrualReport {
    pub trade_id: TradeId,
    pub as_of: NaiveDate,
    pub cost_basis: Money,
    pub days_held: u32,
    /// ordered, contiguous, non-overlapping periods tiling the holding window
    pub periods: Vec<AccrualPeriod>,
    pub total_interest: Money,
    /// interest had the entry rate never changed
    pub baseline_interest: Money,
    /// baseline minus actual; negative when rate hikes outweighed cuts
    pub savings: Money,
    /// annual rate in force on the closing date
    pub effective_rate: Rate,
}

impl AccrualReport {
    /// interest charged per day at the currently effective rate
    pub fn daily_interest(&self) -> Money {
        self.cost_basis.apply_rate(self.effective_rate, 1)
    }
}

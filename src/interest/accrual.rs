use chrono::NaiveDate;
use hourglass_rs::SafeTimeProvider;
use log::debug;

use crate::decimal::{Money, Rate};
use crate::events::RateTimeline;
use crate::interest::{AccrualPeriod, AccrualReport};
use crate::types::MarginPosition;

/// engine computing variable-rate interest accrual for margin positions
///
/// Pure: the closing date always comes in as an argument, the engine never
/// reads a clock. `accrue_now` is the convenience wrapper for callers that
/// hold a time provider.
#[derive(Debug, Clone, Copy, Default)]
pub struct AccrualEngine;

impl AccrualEngine {
    pub fn new() -> Self {
        Self
    }

    /// break the holding window into rate-constant periods and total them
    pub fn accrue(
        &self,
        position: &MarginPosition,
        timeline: &RateTimeline,
        as_of: NaiveDate,
    ) -> AccrualReport {
        let entry = position.entry_date;
        let end = position.accrual_end(as_of);
        let cost_basis = position.cost_basis();
        let days_held = position.days_held(as_of);

        let mut periods = Vec::new();
        let mut total_interest = Money::ZERO;
        let mut current_date = entry;
        let mut current_rate = position.annual_rate;

        if end > entry {
            for event in timeline.applicable(entry, end) {
                if event.effective_date > current_date {
                    let period = close_period(cost_basis, current_date, event.effective_date, current_rate);
                    total_interest += period.interest;
                    periods.push(period);
                    current_date = event.effective_date;
                }
                // an event on the cursor date swaps the rate without
                // emitting a zero-length period
                current_rate = event.new_rate;
            }

            if current_date < end {
                let period = close_period(cost_basis, current_date, end, current_rate);
                total_interest += period.interest;
                periods.push(period);
            }
        } else {
            debug!(
                "position {} has an empty accrual window ({} to {})",
                position.id, entry, end
            );
        }

        let baseline_interest = cost_basis.apply_rate(position.annual_rate, days_held);
        let effective_rate = timeline.rate_on(position.annual_rate, entry, end);

        AccrualReport {
            trade_id: position.id,
            as_of: end,
            cost_basis,
            days_held,
            periods,
            total_interest,
            baseline_interest,
            savings: baseline_interest - total_interest,
            effective_rate,
        }
    }

    /// accrue with "today" taken from an injected time provider
    pub fn accrue_now(
        &self,
        position: &MarginPosition,
        timeline: &RateTimeline,
        time_provider: &SafeTimeProvider,
    ) -> AccrualReport {
        self.accrue(position, timeline, time_provider.now().date_naive())
    }

    /// accrue every position against the same timeline and closing date
    pub fn accrue_all(
        &self,
        positions: &[MarginPosition],
        timeline: &RateTimeline,
        as_of: NaiveDate,
    ) -> Vec<AccrualReport> {
        positions
            .iter()
            .map(|p| self.accrue(p, timeline, as_of))
            .collect()
    }
}

fn close_period(cost_basis: Money, start: NaiveDate, end: NaiveDate, rate: Rate) -> AccrualPeriod {
    let days = (end - start).num_days().max(0) as u32;
    AccrualPeriod {
        start_date: start,
        end_date: end,
        days,
        rate,
        interest: cost_basis.apply_rate(rate, days),
    }
}

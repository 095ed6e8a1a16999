use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::decimal::{Money, Rate};
use crate::events::RateTimeline;
use crate::interest::AccrualEngine;
use crate::types::MarginPosition;

/// actual accrued interest against the hold-the-entry-rate baseline
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RateSavings {
    pub baseline_interest: Money,
    pub actual_interest: Money,
    /// positive when rate cuts benefited the holder
    pub savings: Money,
}

/// compare a position's actual interest to the constant-rate baseline
pub fn rate_savings(
    position: &MarginPosition,
    timeline: &RateTimeline,
    as_of: NaiveDate,
) -> RateSavings {
    let report = AccrualEngine::new().accrue(position, timeline, as_of);
    RateSavings {
        baseline_interest: report.baseline_interest,
        actual_interest: report.total_interest,
        savings: report.savings,
    }
}

/// annual rate in force for a position on the given date
pub fn current_rate(position: &MarginPosition, timeline: &RateTimeline, as_of: NaiveDate) -> Rate {
    timeline.rate_on(position.annual_rate, position.entry_date, position.accrual_end(as_of))
}

/// interest the position costs per day at the rate currently in force
pub fn daily_interest(
    position: &MarginPosition,
    timeline: &RateTimeline,
    as_of: NaiveDate,
) -> Money {
    position
        .cost_basis()
        .apply_rate(current_rate(position, timeline, as_of), 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decimal::Quantity;
    use crate::events::RateChangeEvent;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn position() -> MarginPosition {
        MarginPosition::new(
            "SBER",
            Money::from_major(100),
            Quantity::from_units(1000),
            date(2024, 1, 1),
            Rate::from_percentage(20u32),
        )
    }

    #[test]
    fn test_savings_match_report() {
        let timeline = RateTimeline::from_events(vec![RateChangeEvent::new(
            date(2024, 1, 6),
            Rate::from_percentage(10u32),
        )]);
        let s = rate_savings(&position(), &timeline, date(2024, 1, 11));
        assert_eq!(s.savings, s.baseline_interest - s.actual_interest);
        assert_eq!(s.savings.round_dp(2), Money::from_str_exact("136.99").unwrap());
    }

    #[test]
    fn test_daily_interest_follows_effective_rate() {
        let timeline = RateTimeline::from_events(vec![RateChangeEvent::new(
            date(2024, 1, 6),
            Rate::from_percentage(10u32),
        )]);
        let before = daily_interest(&position(), &timeline, date(2024, 1, 3));
        let after = daily_interest(&position(), &timeline, date(2024, 1, 11));

        assert_eq!(before.round_dp(2), Money::from_str_exact("54.79").unwrap());
        assert_eq!(after.round_dp(2), Money::from_str_exact("27.40").unwrap());
        assert_eq!(
            current_rate(&position(), &timeline, date(2024, 1, 11)),
            Rate::from_percentage(10u32)
        );
    }
}

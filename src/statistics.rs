use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::decimal::{Money, Rate};
use crate::events::RateTimeline;
use crate::interest::AccrualEngine;
use crate::quotes::QuoteSource;
use crate::types::MarginPosition;

/// portfolio-level roll-up over margin positions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct PortfolioStatistics {
    pub open_positions: usize,
    /// cost basis summed over open positions
    pub total_invested: Money,
    /// interest the open positions cost per day at current rates
    pub total_daily_payment: Money,
    /// variable-rate interest accrued by open positions to date
    pub total_accrued_interest: Money,
    /// accumulated effect of rate changes vs entry rates
    pub total_savings: Money,
    /// average of current rates weighted by invested amount
    pub weighted_average_rate: Rate,
    /// profit locked in by closures across all positions
    pub realized_profit: Money,
    /// paper profit of open remainders with known quotes
    pub potential_profit: Money,
}

/// compute portfolio statistics as of a date
///
/// Open positions drive the interest figures; realized profit also counts
/// positions already closed.
pub fn compute_statistics<Q: QuoteSource>(
    positions: &[MarginPosition],
    timeline: &RateTimeline,
    quotes: &Q,
    as_of: NaiveDate,
) -> PortfolioStatistics {
    let engine = AccrualEngine::new();
    let mut stats = PortfolioStatistics::default();
    let mut weighted_rate_sum = Decimal::ZERO;

    for position in positions {
        stats.realized_profit += position.realized_profit();

        if position.is_closed() {
            continue;
        }

        let report = engine.accrue(position, timeline, as_of);
        let investment = report.cost_basis;

        stats.open_positions += 1;
        stats.total_invested += investment;
        stats.total_daily_payment += report.daily_interest();
        stats.total_accrued_interest += report.total_interest;
        stats.total_savings += report.savings;
        weighted_rate_sum += report.effective_rate.as_decimal() * investment.as_decimal();

        if let Some(price) = quotes.price(&position.symbol) {
            if let Some(profit) = position.potential_profit(price) {
                stats.potential_profit += profit;
            }
        }
    }

    if stats.total_invested.is_positive() {
        stats.weighted_average_rate =
            Rate::from_decimal(weighted_rate_sum / stats.total_invested.as_decimal());
    }
    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decimal::Quantity;
    use crate::events::RateChangeEvent;
    use crate::quotes::{NoQuotes, PriceTable};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_empty_portfolio_is_all_zero() {
        let stats = compute_statistics(&[], &RateTimeline::new(), &NoQuotes, date(2024, 1, 1));
        assert_eq!(stats, PortfolioStatistics::default());
    }

    #[test]
    fn test_open_position_figures() {
        let positions = vec![MarginPosition::new(
            "SBER",
            Money::from_major(100),
            Quantity::from_units(1000),
            date(2024, 1, 1),
            Rate::from_percentage(20u32),
        )];
        let stats = compute_statistics(
            &positions,
            &RateTimeline::new(),
            &NoQuotes,
            date(2024, 1, 11),
        );

        assert_eq!(stats.open_positions, 1);
        assert_eq!(stats.total_invested, Money::from_major(100_000));
        assert_eq!(
            stats.total_daily_payment.round_dp(2),
            Money::from_str_exact("54.79").unwrap()
        );
        assert_eq!(
            stats.total_accrued_interest.round_dp(2),
            Money::from_str_exact("547.95").unwrap()
        );
        assert_eq!(stats.weighted_average_rate, Rate::from_percentage(20u32));
    }

    #[test]
    fn test_weighted_average_rate() {
        let positions = vec![
            MarginPosition::new(
                "SBER",
                Money::from_major(100),
                Quantity::from_units(1000), // 100k at 20%
                date(2024, 1, 1),
                Rate::from_percentage(20u32),
            ),
            MarginPosition::new(
                "GAZP",
                Money::from_major(300),
                Quantity::from_units(1000), // 300k at 12%
                date(2024, 1, 1),
                Rate::from_percentage(12u32),
            ),
        ];
        let stats = compute_statistics(
            &positions,
            &RateTimeline::new(),
            &NoQuotes,
            date(2024, 1, 11),
        );

        // (20*100k + 12*300k) / 400k = 14%
        assert_eq!(stats.weighted_average_rate, Rate::from_percentage(14u32));
    }

    #[test]
    fn test_closed_positions_contribute_realized_profit_only() {
        let mut closed = MarginPosition::new(
            "LKOH",
            Money::from_major(10),
            Quantity::from_units(100),
            date(2024, 1, 1),
            Rate::from_percentage(20u32),
        );
        closed.close(Money::from_major(12), date(2024, 2, 1));

        let stats = compute_statistics(
            &[closed],
            &RateTimeline::new(),
            &NoQuotes,
            date(2024, 3, 1),
        );

        assert_eq!(stats.open_positions, 0);
        assert_eq!(stats.total_invested, Money::ZERO);
        assert_eq!(stats.realized_profit, Money::from_major(200));
    }

    #[test]
    fn test_rate_change_moves_daily_payment_and_savings() {
        let positions = vec![MarginPosition::new(
            "SBER",
            Money::from_major(100),
            Quantity::from_units(1000),
            date(2024, 1, 1),
            Rate::from_percentage(20u32),
        )];
        let timeline = RateTimeline::from_events(vec![RateChangeEvent::new(
            date(2024, 1, 6),
            Rate::from_percentage(10u32),
        )]);
        let stats = compute_statistics(&positions, &timeline, &NoQuotes, date(2024, 1, 11));

        assert_eq!(
            stats.total_daily_payment.round_dp(2),
            Money::from_str_exact("27.40").unwrap()
        );
        assert_eq!(
            stats.total_savings.round_dp(2),
            Money::from_str_exact("136.99").unwrap()
        );
        assert_eq!(stats.weighted_average_rate, Rate::from_percentage(10u32));
    }

    #[test]
    fn test_potential_profit_with_quotes() {
        let positions = vec![MarginPosition::new(
            "SBER",
            Money::from_major(100),
            Quantity::from_units(1000),
            date(2024, 1, 1),
            Rate::from_percentage(20u32),
        )];
        let quotes = PriceTable::new().with("SBER", Money::from_major(105));
        let stats = compute_statistics(&positions, &RateTimeline::new(), &quotes, date(2024, 1, 11));

        assert_eq!(stats.potential_profit, Money::from_major(5_000));
    }
}

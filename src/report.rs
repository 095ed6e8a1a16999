use chrono::NaiveDate;
use hourglass_rs::SafeTimeProvider;
use serde::{Deserialize, Serialize};

use crate::cash::CashLedger;
use crate::config::FifoConfig;
use crate::errors::Result;
use crate::events::RateTimeline;
use crate::fifo::{FifoEngine, FifoReport, MatchSummary};
use crate::interest::{AccrualEngine, AccrualReport};
use crate::quotes::QuoteSource;
use crate::statistics::{compute_statistics, PortfolioStatistics};
use crate::types::{MarginPosition, SpotTransaction};

/// serializable view over a full portfolio analysis
///
/// Everything inside is derived: rebuild it whenever the inputs or the
/// as-of date move.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioReport {
    pub as_of: NaiveDate,
    pub statistics: PortfolioStatistics,
    pub accruals: Vec<AccrualReport>,
    pub spot: FifoReport,
    pub match_summary: MatchSummary,
    pub cash: CashLedger,
}

impl PortfolioReport {
    /// run every engine over one input snapshot
    pub fn build<Q: QuoteSource>(
        positions: &[MarginPosition],
        timeline: &RateTimeline,
        transactions: &[SpotTransaction],
        quotes: &Q,
        fifo_config: FifoConfig,
        as_of: NaiveDate,
    ) -> Result<Self> {
        let spot = FifoEngine::with_config(fifo_config).compute(transactions, quotes)?;
        let match_summary = spot.match_summary();

        Ok(Self {
            as_of,
            statistics: compute_statistics(positions, timeline, quotes, as_of),
            accruals: AccrualEngine::new().accrue_all(positions, timeline, as_of),
            spot,
            match_summary,
            cash: CashLedger::build(transactions),
        })
    }

    /// build with "today" taken from an injected time provider
    pub fn build_now<Q: QuoteSource>(
        positions: &[MarginPosition],
        timeline: &RateTimeline,
        transactions: &[SpotTransaction],
        quotes: &Q,
        fifo_config: FifoConfig,
        time_provider: &SafeTimeProvider,
    ) -> Result<Self> {
        Self::build(
            positions,
            timeline,
            transactions,
            quotes,
            fifo_config,
            time_provider.now().date_naive(),
        )
    }

    /// convert to pretty-printed json string
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// parse a previously serialized report
    pub fn from_json(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decimal::{Money, Quantity, Rate};
    use crate::events::RateChangeEvent;
    use crate::quotes::PriceTable;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sample_inputs() -> (
        Vec<MarginPosition>,
        RateTimeline,
        Vec<SpotTransaction>,
        PriceTable,
    ) {
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
        let transactions = vec![
            SpotTransaction::deposit(Money::from_major(10_000), date(2024, 1, 1)),
            SpotTransaction::buy(
                "AAPL",
                Money::from_major(10),
                Quantity::from_units(100),
                date(2024, 1, 2),
            ),
            SpotTransaction::sell(
                "AAPL",
                Money::from_major(15),
                Quantity::from_units(40),
                date(2024, 1, 5),
            ),
        ];
        let quotes = PriceTable::new().with("AAPL", Money::from_major(12));
        (positions, timeline, transactions, quotes)
    }

    #[test]
    fn test_build_combines_all_engines() {
        let (positions, timeline, transactions, quotes) = sample_inputs();
        let report = PortfolioReport::build(
            &positions,
            &timeline,
            &transactions,
            &quotes,
            FifoConfig::default(),
            date(2024, 1, 11),
        )
        .unwrap();

        assert_eq!(report.accruals.len(), 1);
        assert_eq!(
            report.accruals[0].total_interest.round_dp(2),
            Money::from_str_exact("410.96").unwrap()
        );
        assert_eq!(report.spot.totals.realized_pl, Money::from_major(200));
        assert_eq!(report.statistics.open_positions, 1);
        assert_eq!(report.match_summary.matches, 1);
        // 10000 - 1000 + 600
        assert_eq!(report.cash.closing_balance, Money::from_major(9_600));
    }

    #[test]
    fn test_json_round_trip() {
        let (positions, timeline, transactions, quotes) = sample_inputs();
        let report = PortfolioReport::build(
            &positions,
            &timeline,
            &transactions,
            &quotes,
            FifoConfig::default(),
            date(2024, 1, 11),
        )
        .unwrap();

        let json = report.to_json_pretty().unwrap();
        let parsed = PortfolioReport::from_json(&json).unwrap();
        assert_eq!(parsed, report);
    }
}

use std::collections::BTreeMap;

use chrono::NaiveDate;
use log::warn;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::{FifoConfig, OversellPolicy};
use crate::decimal::{Money, Quantity};
use crate::errors::{JournalError, Result};
use crate::fifo::lots::LotBook;
use crate::quotes::QuoteSource;
use crate::types::{SpotTransaction, TransactionKind};

/// one sale slice matched to the purchase lot that covered it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaleMatch {
    pub ticker: String,
    pub sale_date: NaiveDate,
    pub sale_price: Money,
    pub purchase_date: NaiveDate,
    pub purchase_price: Money,
    pub quantity: Quantity,
    pub cost_basis: Money,
    pub proceeds: Money,
    pub realized_pl: Money,
    pub realized_pl_percent: Decimal,
}

/// realized result of one SELL transaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RealizedSale {
    pub ticker: String,
    pub date: NaiveDate,
    pub quantity_sold: Quantity,
    pub sale_price: Money,
    pub proceeds: Money,
    pub cost_basis_consumed: Money,
    pub realized_pl: Money,
    pub matches: Vec<SaleMatch>,
}

/// point-in-time holding state for one ticker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionSnapshot {
    pub ticker: String,
    pub shares_remaining: Quantity,
    pub cost_basis: Money,
    pub average_cost: Option<Money>,
    pub current_price: Option<Money>,
    pub current_value: Money,
    pub unrealized_pl: Money,
    pub realized_pl: Money,
    pub total_pl: Money,
}

/// portfolio-wide aggregates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct FifoTotals {
    pub realized_pl: Money,
    pub unrealized_pl: Money,
    pub total_pl: Money,
    pub cost_basis: Money,
    pub current_value: Money,
}

/// win/loss roll-up over individual sale matches
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct MatchSummary {
    pub matches: usize,
    pub profitable: usize,
    /// percentage of profitable matches
    pub win_rate: Decimal,
    pub gross_profit: Money,
    pub gross_loss: Money,
    pub average_realized_pl: Money,
    pub total_quantity: Quantity,
}

/// full FIFO analysis over a transaction history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FifoReport {
    pub snapshots: BTreeMap<String, PositionSnapshot>,
    pub sales: Vec<RealizedSale>,
    pub totals: FifoTotals,
}

impl FifoReport {
    /// every lot match behind every sale, in sale order
    pub fn matches(&self) -> impl Iterator<Item = &SaleMatch> {
        self.sales.iter().flat_map(|s| s.matches.iter())
    }

    pub fn sales_for<'a>(&'a self, ticker: &'a str) -> impl Iterator<Item = &'a RealizedSale> {
        self.sales.iter().filter(move |s| s.ticker == ticker)
    }

    /// win/loss summary across all sale matches
    pub fn match_summary(&self) -> MatchSummary {
        let mut summary = MatchSummary::default();
        let mut total_pl = Money::ZERO;

        for m in self.matches() {
            summary.matches += 1;
            summary.total_quantity += m.quantity;
            total_pl += m.realized_pl;
            if m.realized_pl.is_positive() {
                summary.profitable += 1;
                summary.gross_profit += m.realized_pl;
            } else {
                summary.gross_loss += m.realized_pl.abs();
            }
        }

        if summary.matches > 0 {
            let count = Decimal::from(summary.matches as u64);
            summary.win_rate = Decimal::from(summary.profitable as u64) / count * Decimal::from(100);
            summary.average_realized_pl = total_pl / count;
        }
        summary
    }
}

/// FIFO cost-basis and P&L engine
///
/// Stateless between calls: every computation replays the full transaction
/// history it is handed.
#[derive(Debug, Clone, Copy, Default)]
pub struct FifoEngine {
    config: FifoConfig,
}

impl FifoEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: FifoConfig) -> Self {
        Self { config }
    }

    /// replay BUY/SELL history per ticker and value the remainder against
    /// current quotes
    pub fn compute<Q: QuoteSource>(
        &self,
        transactions: &[SpotTransaction],
        quotes: &Q,
    ) -> Result<FifoReport> {
        let mut per_ticker: BTreeMap<&str, Vec<&SpotTransaction>> = BTreeMap::new();
        for tx in transactions {
            if !tx.kind.affects_lots() {
                continue;
            }
            let Some(ticker) = tx.ticker.as_deref() else {
                warn!("skipping {:?} transaction without a ticker", tx.kind);
                continue;
            };
            per_ticker.entry(ticker).or_default().push(tx);
        }

        let mut sales = Vec::new();
        let mut snapshots = BTreeMap::new();
        let mut totals = FifoTotals::default();

        for (ticker, mut txs) in per_ticker {
            // stable: equal dates keep arrival order
            txs.sort_by_key(|tx| tx.trade_date);

            let mut book = LotBook::new();
            let mut realized_pl = Money::ZERO;
            let mut had_sales = false;

            for tx in txs {
                match tx.kind {
                    TransactionKind::Buy => {
                        book.buy(tx.trade_date, tx.price, tx.quantity);
                    }
                    TransactionKind::Sell => {
                        let outcome = book.sell(tx.quantity);

                        if outcome.shortfall.is_positive() {
                            match self.config.oversell_policy {
                                OversellPolicy::Strict => {
                                    return Err(JournalError::InsufficientLots {
                                        ticker: ticker.to_string(),
                                        available: outcome.consumed,
                                        requested: tx.quantity,
                                    });
                                }
                                OversellPolicy::Truncate => {
                                    warn!(
                                        "oversell of {}: {} requested, {} covered",
                                        ticker, tx.quantity, outcome.consumed
                                    );
                                }
                            }
                        }

                        if outcome.consumed.is_zero() {
                            continue;
                        }
                        had_sales = true;

                        let proceeds = tx.price * outcome.consumed;
                        let realized = proceeds - outcome.cost_basis;
                        realized_pl += realized;

                        let matches = outcome
                            .draws
                            .iter()
                            .map(|draw| {
                                let draw_proceeds = tx.price * draw.quantity;
                                let draw_pl = draw_proceeds - draw.cost_basis;
                                SaleMatch {
                                    ticker: ticker.to_string(),
                                    sale_date: tx.trade_date,
                                    sale_price: tx.price,
                                    purchase_date: draw.purchase_date,
                                    purchase_price: draw.unit_price,
                                    quantity: draw.quantity,
                                    cost_basis: draw.cost_basis,
                                    proceeds: draw_proceeds,
                                    realized_pl: draw_pl,
                                    realized_pl_percent: if draw.cost_basis.is_positive() {
                                        draw_pl.as_decimal() / draw.cost_basis.as_decimal()
                                            * Decimal::from(100)
                                    } else {
                                        Decimal::ZERO
                                    },
                                }
                            })
                            .collect();

                        sales.push(RealizedSale {
                            ticker: ticker.to_string(),
                            date: tx.trade_date,
                            quantity_sold: outcome.consumed,
                            sale_price: tx.price,
                            proceeds,
                            cost_basis_consumed: outcome.cost_basis,
                            realized_pl: realized,
                            matches,
                        });
                    }
                    _ => {}
                }
            }

            let shares_remaining = book.shares_remaining();
            if shares_remaining.is_zero() && !had_sales {
                continue;
            }

            let cost_basis = book.cost_basis();
            let average_cost = book.average_cost();
            let current_price = quotes.price(ticker);

            let (current_value, unrealized_pl) = match (current_price, average_cost) {
                (Some(price), Some(avg)) if shares_remaining.is_positive() => {
                    let value = price * shares_remaining;
                    (value, (price - avg) * shares_remaining)
                }
                _ => (Money::ZERO, Money::ZERO),
            };

            totals.realized_pl += realized_pl;
            totals.unrealized_pl += unrealized_pl;
            totals.cost_basis += cost_basis;
            totals.current_value += current_value;

            snapshots.insert(
                ticker.to_string(),
                PositionSnapshot {
                    ticker: ticker.to_string(),
                    shares_remaining,
                    cost_basis,
                    average_cost,
                    current_price,
                    current_value,
                    unrealized_pl,
                    realized_pl,
                    total_pl: realized_pl + unrealized_pl,
                },
            );
        }

        totals.total_pl = totals.realized_pl + totals.unrealized_pl;
        sales.sort_by_key(|s| s.date);

        Ok(FifoReport {
            snapshots,
            sales,
            totals,
        })
    }
}

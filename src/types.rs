use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::decimal::{Money, Quantity, Rate};

/// unique identifier for a margin position
pub type TradeId = Uuid;

/// unique identifier for a spot transaction
pub type TransactionId = Uuid;

/// spot transaction kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TransactionKind {
    Deposit,
    Withdraw,
    Buy,
    Sell,
    Dividend,
}

impl TransactionKind {
    /// whether the transaction creates or consumes share lots
    pub fn affects_lots(&self) -> bool {
        matches!(self, TransactionKind::Buy | TransactionKind::Sell)
    }

    /// sign of the cash movement: +1 inflow, -1 outflow
    pub fn cash_sign(&self) -> i32 {
        match self {
            TransactionKind::Deposit | TransactionKind::Sell | TransactionKind::Dividend => 1,
            TransactionKind::Withdraw | TransactionKind::Buy => -1,
        }
    }
}

/// partial closure of a margin position
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeClosure {
    pub closed_quantity: Quantity,
    pub exit_price: Money,
    pub exit_date: NaiveDate,
    pub note: Option<String>,
}

impl TradeClosure {
    pub fn new(closed_quantity: Quantity, exit_price: Money, exit_date: NaiveDate) -> Self {
        Self {
            closed_quantity,
            exit_price,
            exit_date,
            note: None,
        }
    }

    /// sale proceeds of this closure
    pub fn proceeds(&self) -> Money {
        self.exit_price * self.closed_quantity
    }

    /// profit locked in by this closure against an entry price
    pub fn profit_against(&self, entry_price: Money) -> Money {
        (self.exit_price - entry_price) * self.closed_quantity
    }
}

/// a margin position: shares bought on borrowed funds at an annual rate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarginPosition {
    pub id: TradeId,
    pub symbol: String,
    pub entry_price: Money,
    pub quantity: Quantity,
    pub entry_date: NaiveDate,
    /// annual rate in force from entry until overridden by a rate change
    pub annual_rate: Rate,
    pub exit_price: Option<Money>,
    pub exit_date: Option<NaiveDate>,
    pub notes: Option<String>,
    #[serde(default)]
    pub closures: Vec<TradeClosure>,
}

impl MarginPosition {
    pub fn new(
        symbol: impl Into<String>,
        entry_price: Money,
        quantity: Quantity,
        entry_date: NaiveDate,
        annual_rate: Rate,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            symbol: symbol.into(),
            entry_price,
            quantity,
            entry_date,
            annual_rate,
            exit_price: None,
            exit_date: None,
            notes: None,
            closures: Vec::new(),
        }
    }

    /// amount borrowed against: entry price times quantity, fixed for the
    /// life of the position
    pub fn cost_basis(&self) -> Money {
        self.entry_price * self.quantity
    }

    pub fn is_closed(&self) -> bool {
        self.exit_date.is_some()
    }

    /// date accrual stops: exit date for closed positions, otherwise as-of
    pub fn accrual_end(&self, as_of: NaiveDate) -> NaiveDate {
        self.exit_date.unwrap_or(as_of)
    }

    /// whole calendar days held, zero when the window is empty or inverted
    pub fn days_held(&self, as_of: NaiveDate) -> u32 {
        let end = self.accrual_end(as_of);
        (end - self.entry_date).num_days().max(0) as u32
    }

    /// quantity already closed out through partial closures
    pub fn closed_quantity(&self) -> Quantity {
        self.closures
            .iter()
            .fold(Quantity::ZERO, |acc, c| acc + c.closed_quantity)
    }

    /// quantity still open, floored at zero
    pub fn remaining_quantity(&self) -> Quantity {
        (self.quantity - self.closed_quantity()).max(Quantity::ZERO)
    }

    /// fully close the position at a price and date
    pub fn close(&mut self, exit_price: Money, exit_date: NaiveDate) {
        self.exit_price = Some(exit_price);
        self.exit_date = Some(exit_date);
    }

    /// record a partial closure
    pub fn record_closure(&mut self, closure: TradeClosure) {
        self.closures.push(closure);
    }

    /// profit realized so far: partial closures, plus the remaining quantity
    /// at the exit price once the position is fully closed
    pub fn realized_profit(&self) -> Money {
        let mut profit = self
            .closures
            .iter()
            .fold(Money::ZERO, |acc, c| acc + c.profit_against(self.entry_price));
        if let Some(exit_price) = self.exit_price {
            profit += (exit_price - self.entry_price) * self.remaining_quantity();
        }
        profit
    }

    /// paper profit of the open remainder against a current quote; None once
    /// the position is closed
    pub fn potential_profit(&self, current_price: Money) -> Option<Money> {
        if self.is_closed() {
            return None;
        }
        Some((current_price - self.entry_price) * self.remaining_quantity())
    }
}

/// a spot-market transaction; cash-only kinds carry no ticker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpotTransaction {
    pub id: TransactionId,
    pub kind: TransactionKind,
    pub ticker: Option<String>,
    pub company: Option<String>,
    pub price: Money,
    pub quantity: Quantity,
    pub trade_date: NaiveDate,
    pub note: Option<String>,
}

impl SpotTransaction {
    pub fn new(
        kind: TransactionKind,
        ticker: Option<String>,
        price: Money,
        quantity: Quantity,
        trade_date: NaiveDate,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            ticker,
            company: None,
            price,
            quantity,
            trade_date,
            note: None,
        }
    }

    pub fn buy(
        ticker: impl Into<String>,
        price: Money,
        quantity: Quantity,
        trade_date: NaiveDate,
    ) -> Self {
        Self::new(TransactionKind::Buy, Some(ticker.into()), price, quantity, trade_date)
    }

    pub fn sell(
        ticker: impl Into<String>,
        price: Money,
        quantity: Quantity,
        trade_date: NaiveDate,
    ) -> Self {
        Self::new(TransactionKind::Sell, Some(ticker.into()), price, quantity, trade_date)
    }

    pub fn deposit(amount: Money, trade_date: NaiveDate) -> Self {
        Self::new(TransactionKind::Deposit, None, amount, Quantity::from_units(1), trade_date)
    }

    pub fn withdraw(amount: Money, trade_date: NaiveDate) -> Self {
        Self::new(TransactionKind::Withdraw, None, amount, Quantity::from_units(1), trade_date)
    }

    pub fn dividend(
        ticker: impl Into<String>,
        amount: Money,
        trade_date: NaiveDate,
    ) -> Self {
        Self::new(TransactionKind::Dividend, Some(ticker.into()), amount, Quantity::from_units(1), trade_date)
    }

    /// unsigned transaction value
    pub fn gross(&self) -> Money {
        self.price * self.quantity
    }

    /// cash-flow amount: positive for inflows, negative for outflows
    pub fn signed_amount(&self) -> Money {
        if self.kind.cash_sign() < 0 {
            Money::ZERO - self.gross()
        } else {
            self.gross()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_cost_basis_and_days_held() {
        let pos = MarginPosition::new(
            "SBER",
            Money::from_major(100),
            Quantity::from_units(1000),
            date(2024, 1, 1),
            Rate::from_percentage(20u32),
        );
        assert_eq!(pos.cost_basis(), Money::from_major(100_000));
        assert_eq!(pos.days_held(date(2024, 1, 11)), 10);
        assert_eq!(pos.days_held(date(2023, 12, 31)), 0);
    }

    #[test]
    fn test_closed_position_freezes_accrual_end() {
        let mut pos = MarginPosition::new(
            "GAZP",
            Money::from_major(150),
            Quantity::from_units(10),
            date(2024, 3, 1),
            Rate::from_percentage(16u32),
        );
        pos.close(Money::from_major(170), date(2024, 3, 21));
        assert!(pos.is_closed());
        assert_eq!(pos.accrual_end(date(2024, 6, 1)), date(2024, 3, 21));
        assert_eq!(pos.days_held(date(2024, 6, 1)), 20);
        assert_eq!(pos.realized_profit(), Money::from_major(200));
    }

    #[test]
    fn test_partial_closures() {
        let mut pos = MarginPosition::new(
            "LKOH",
            Money::from_major(10),
            Quantity::from_units(100),
            date(2024, 1, 1),
            Rate::from_percentage(20u32),
        );
        pos.record_closure(TradeClosure::new(
            Quantity::from_units(40),
            Money::from_major(15),
            date(2024, 2, 1),
        ));
        assert_eq!(pos.remaining_quantity(), Quantity::from_units(60));
        assert_eq!(pos.realized_profit(), Money::from_major(200));
        assert_eq!(
            pos.potential_profit(Money::from_major(12)),
            Some(Money::from_major(120))
        );

        pos.close(Money::from_major(14), date(2024, 3, 1));
        // 40 closed at 15 plus 60 closed at 14
        assert_eq!(pos.realized_profit(), Money::from_major(440));
        assert_eq!(pos.potential_profit(Money::from_major(12)), None);
    }

    #[test]
    fn test_signed_amounts() {
        let d = date(2024, 5, 10);
        let buy = SpotTransaction::buy("AAPL", Money::from_major(190), Quantity::from_units(2), d);
        let sell = SpotTransaction::sell("AAPL", Money::from_major(200), Quantity::from_units(1), d);
        let deposit = SpotTransaction::deposit(Money::from_major(1_000), d);
        let withdraw = SpotTransaction::withdraw(Money::from_major(250), d);

        assert_eq!(buy.signed_amount(), Money::from_major(-380));
        assert_eq!(sell.signed_amount(), Money::from_major(200));
        assert_eq!(deposit.signed_amount(), Money::from_major(1_000));
        assert_eq!(withdraw.signed_amount(), Money::from_major(-250));
        assert!(buy.kind.affects_lots());
        assert!(!deposit.kind.affects_lots());
    }

    #[test]
    fn test_kind_serialization_matches_wire_format() {
        let json = serde_json::to_string(&TransactionKind::Buy).unwrap();
        assert_eq!(json, "\"BUY\"");
        let kind: TransactionKind = serde_json::from_str("\"DIVIDEND\"").unwrap();
        assert_eq!(kind, TransactionKind::Dividend);
    }

    #[test]
    fn test_fractional_quantities() {
        let d = date(2024, 5, 10);
        let buy = SpotTransaction::buy(
            "BTC",
            Money::from_major(60_000),
            Quantity::from_decimal(dec!(0.25)),
            d,
        );
        assert_eq!(buy.gross(), Money::from_major(15_000));
    }
}

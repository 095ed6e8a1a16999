use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::decimal::Money;

/// source of current market prices, keyed by ticker
///
/// Implementations never fail: an unknown or unusable quote is `None` and the
/// consumer degrades to zero unrealized figures.
pub trait QuoteSource {
    fn price(&self, ticker: &str) -> Option<Money>;
}

/// in-memory price table
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PriceTable {
    prices: HashMap<String, Money>,
}

impl PriceTable {
    pub fn new() -> Self {
        Self {
            prices: HashMap::new(),
        }
    }

    pub fn insert(&mut self, ticker: impl Into<String>, price: Money) {
        self.prices.insert(ticker.into(), price);
    }

    pub fn with(mut self, ticker: impl Into<String>, price: Money) -> Self {
        self.insert(ticker, price);
        self
    }

    pub fn len(&self) -> usize {
        self.prices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }
}

impl From<HashMap<String, Money>> for PriceTable {
    fn from(prices: HashMap<String, Money>) -> Self {
        Self { prices }
    }
}

impl QuoteSource for PriceTable {
    fn price(&self, ticker: &str) -> Option<Money> {
        // non-positive quotes are as unusable as missing ones
        self.prices.get(ticker).copied().filter(|p| p.is_positive())
    }
}

impl QuoteSource for HashMap<String, Money> {
    fn price(&self, ticker: &str) -> Option<Money> {
        self.get(ticker).copied().filter(|p| p.is_positive())
    }
}

/// a source with no quotes at all; every lookup degrades to unknown
#[derive(Debug, Clone, Copy, Default)]
pub struct NoQuotes;

impl QuoteSource for NoQuotes {
    fn price(&self, _ticker: &str) -> Option<Money> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_and_non_positive_quotes_are_unknown() {
        let table = PriceTable::new()
            .with("AAPL", Money::from_major(190))
            .with("STALE", Money::ZERO)
            .with("BAD", Money::from_major(-5));

        assert_eq!(table.price("AAPL"), Some(Money::from_major(190)));
        assert_eq!(table.price("STALE"), None);
        assert_eq!(table.price("BAD"), None);
        assert_eq!(table.price("MSFT"), None);
        assert_eq!(NoQuotes.price("AAPL"), None);
    }
}

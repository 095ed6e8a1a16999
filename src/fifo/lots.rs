use std::collections::VecDeque;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::decimal::{Money, Quantity};

/// a batch of shares acquired at one price and date, consumed oldest-first
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lot {
    pub purchase_date: NaiveDate,
    pub unit_price: Money,
    pub original_quantity: Quantity,
    pub remaining_quantity: Quantity,
}

impl Lot {
    pub fn new(purchase_date: NaiveDate, unit_price: Money, quantity: Quantity) -> Self {
        Self {
            purchase_date,
            unit_price,
            original_quantity: quantity,
            remaining_quantity: quantity,
        }
    }

    pub fn is_exhausted(&self) -> bool {
        self.remaining_quantity.is_zero()
    }

    /// cost of the shares still in the lot
    pub fn remaining_cost(&self) -> Money {
        self.unit_price * self.remaining_quantity
    }
}

/// one slice drawn from a lot while filling a sale
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LotDraw {
    pub purchase_date: NaiveDate,
    pub unit_price: Money,
    pub quantity: Quantity,
    pub cost_basis: Money,
}

/// result of drawing a sale quantity out of the book
#[derive(Debug, Clone, PartialEq)]
pub struct SellOutcome {
    pub draws: Vec<LotDraw>,
    pub consumed: Quantity,
    pub cost_basis: Money,
    /// quantity the book could not cover
    pub shortfall: Quantity,
}

/// per-ticker FIFO queue of open lots
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LotBook {
    lots: VecDeque<Lot>,
    total_bought: Quantity,
    total_sold: Quantity,
}

impl LotBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// append a freshly bought lot at the back of the queue
    pub fn buy(&mut self, purchase_date: NaiveDate, unit_price: Money, quantity: Quantity) {
        self.total_bought += quantity;
        self.lots.push_back(Lot::new(purchase_date, unit_price, quantity));
    }

    /// fill a sale from the oldest lots; never fails, the shortfall reports
    /// what could not be covered
    pub fn sell(&mut self, quantity: Quantity) -> SellOutcome {
        let mut remaining = quantity;
        let mut draws = Vec::new();
        let mut cost_basis = Money::ZERO;

        while remaining.is_positive() {
            let Some(front) = self.lots.front_mut() else {
                break;
            };
            let take = remaining.min(front.remaining_quantity);
            front.remaining_quantity -= take;
            remaining -= take;

            let draw_cost = front.unit_price * take;
            cost_basis += draw_cost;
            draws.push(LotDraw {
                purchase_date: front.purchase_date,
                unit_price: front.unit_price,
                quantity: take,
                cost_basis: draw_cost,
            });

            if front.is_exhausted() {
                self.lots.pop_front();
            }
        }

        let consumed = quantity - remaining;
        self.total_sold += consumed;

        SellOutcome {
            draws,
            consumed,
            cost_basis,
            shortfall: remaining,
        }
    }

    pub fn lots(&self) -> impl Iterator<Item = &Lot> {
        self.lots.iter()
    }

    /// shares still held across all open lots
    pub fn shares_remaining(&self) -> Quantity {
        self.lots
            .iter()
            .fold(Quantity::ZERO, |acc, lot| acc + lot.remaining_quantity)
    }

    /// cost of the shares still held
    pub fn cost_basis(&self) -> Money {
        self.lots
            .iter()
            .fold(Money::ZERO, |acc, lot| acc + lot.remaining_cost())
    }

    /// remaining cost divided by remaining shares; None on an empty book
    pub fn average_cost(&self) -> Option<Money> {
        let shares = self.shares_remaining();
        if shares.is_zero() {
            return None;
        }
        Some(self.cost_basis() / shares.as_decimal())
    }

    pub fn total_bought(&self) -> Quantity {
        self.total_bought
    }

    pub fn total_sold(&self) -> Quantity {
        self.total_sold
    }
}

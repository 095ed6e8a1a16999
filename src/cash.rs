use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::types::{SpotTransaction, TransactionId, TransactionKind};

/// one cash movement with the balance after it settled
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CashFlow {
    pub transaction_id: TransactionId,
    pub date: NaiveDate,
    pub kind: TransactionKind,
    pub ticker: Option<String>,
    /// signed: positive inflow, negative outflow
    pub amount: Money,
    pub running_balance: Money,
}

impl CashFlow {
    pub fn is_inflow(&self) -> bool {
        !self.amount.is_negative()
    }
}

/// chronological cash ledger over a portfolio's transaction history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct CashLedger {
    pub flows: Vec<CashFlow>,
    pub total_inflows: Money,
    pub total_outflows: Money,
    pub net_flow: Money,
    pub closing_balance: Money,
}

impl CashLedger {
    /// fold the transactions into a running balance, oldest first
    pub fn build(transactions: &[SpotTransaction]) -> Self {
        let mut ordered: Vec<&SpotTransaction> = transactions.iter().collect();
        // stable: equal dates keep arrival order
        ordered.sort_by_key(|tx| tx.trade_date);

        let mut ledger = CashLedger::default();
        let mut balance = Money::ZERO;

        for tx in ordered {
            let amount = tx.signed_amount();
            balance += amount;

            if amount.is_negative() {
                ledger.total_outflows += amount.abs();
            } else {
                ledger.total_inflows += amount;
            }

            ledger.flows.push(CashFlow {
                transaction_id: tx.id,
                date: tx.trade_date,
                kind: tx.kind,
                ticker: tx.ticker.clone(),
                amount,
                running_balance: balance,
            });
        }

        ledger.net_flow = ledger.total_inflows - ledger.total_outflows;
        ledger.closing_balance = balance;
        ledger
    }
}

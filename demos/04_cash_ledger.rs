/// cash ledger - running balance over every cash movement
use trading_journal_rs::{CashLedger, Money, Quantity, SpotTransaction};
use chrono::NaiveDate;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== cash ledger example ===\n");

    let transactions = vec![
        SpotTransaction::deposit(Money::from_major(10_000), date(2024, 1, 1)),
        SpotTransaction::buy("AAPL", Money::from_major(100), Quantity::from_units(50), date(2024, 1, 2)),
        SpotTransaction::sell("AAPL", Money::from_major(110), Quantity::from_units(20), date(2024, 1, 10)),
        SpotTransaction::dividend("AAPL", Money::from_major(30), date(2024, 1, 15)),
        SpotTransaction::withdraw(Money::from_major(1_000), date(2024, 1, 20)),
    ];

    let ledger = CashLedger::build(&transactions);

    for flow in &ledger.flows {
        println!(
            "{}  {:<9} {:>10}  balance {:>10}",
            flow.date,
            format!("{:?}", flow.kind),
            flow.amount.to_string(),
            flow.running_balance.to_string()
        );
    }

    println!("\ninflows:  {}", ledger.total_inflows);
    println!("outflows: {}", ledger.total_outflows);
    println!("net flow: {}", ledger.net_flow);
    println!("closing:  {}", ledger.closing_balance);

    Ok(())
}

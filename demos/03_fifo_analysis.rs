/// fifo analysis - realized and unrealized P&L over a spot history
use trading_journal_rs::{FifoEngine, Money, PriceTable, Quantity, SpotTransaction};
use chrono::NaiveDate;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== fifo analysis example ===\n");

    let transactions = vec![
        SpotTransaction::buy("AAPL", Money::from_major(10), Quantity::from_units(50), date(2024, 1, 1)),
        SpotTransaction::buy("AAPL", Money::from_major(12), Quantity::from_units(50), date(2024, 1, 2)),
        SpotTransaction::sell("AAPL", Money::from_major(15), Quantity::from_units(70), date(2024, 1, 3)),
        SpotTransaction::buy("MSFT", Money::from_major(100), Quantity::from_units(10), date(2024, 1, 5)),
    ];
    let quotes = PriceTable::new()
        .with("AAPL", Money::from_major(14))
        .with("MSFT", Money::from_major(95));

    let report = FifoEngine::new().compute(&transactions, &quotes)?;

    println!("sales:");
    for sale in &report.sales {
        println!(
            "  {} {} x{} at {}: proceeds {}, cost {}, P&L {}",
            sale.date,
            sale.ticker,
            sale.quantity_sold,
            sale.sale_price,
            sale.proceeds,
            sale.cost_basis_consumed,
            sale.realized_pl
        );
        for m in &sale.matches {
            println!(
                "    matched {} bought {} at {} -> P&L {}",
                m.quantity, m.purchase_date, m.purchase_price, m.realized_pl
            );
        }
    }

    println!("\npositions:");
    for snapshot in report.snapshots.values() {
        println!(
            "  {}: {} shares, avg cost {}, unrealized {}",
            snapshot.ticker,
            snapshot.shares_remaining,
            snapshot
                .average_cost
                .map(|c| c.round_dp(2).to_string())
                .unwrap_or_else(|| "-".to_string()),
            snapshot.unrealized_pl
        );
    }

    let summary = report.match_summary();
    println!(
        "\n{} matches, {} profitable ({}% win rate)",
        summary.matches,
        summary.profitable,
        summary.win_rate.round_dp(1)
    );
    println!("total P&L: {}", report.totals.total_pl);

    Ok(())
}

/// full report - csv import, every engine, one json document
use trading_journal_rs::{
    read_transactions_csv, FifoConfig, MarginPosition, Money, PortfolioReport, PriceTable,
    Quantity, Rate, RateChangeEvent, RateTimeline,
};
use chrono::NaiveDate;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // spot history arrives as an exported csv with foreign header names
    let csv_content = "transactionDate,transactionType,ticker,price,quantity\n\
        2024-01-01,DEPOSIT,,10000,1\n\
        2024-01-02,BUY,AAPL,10,100\n\
        2024-01-05,SELL,AAPL,15,40\n";
    let imported = read_transactions_csv(csv_content.as_bytes())?;
    println!(
        "imported {} transactions ({} skipped)",
        imported.transactions.len(),
        imported.skipped.len()
    );

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
    let quotes = PriceTable::new().with("AAPL", Money::from_major(12));

    let report = PortfolioReport::build(
        &positions,
        &timeline,
        &imported.transactions,
        &quotes,
        FifoConfig::default(),
        date(2024, 1, 11),
    )?;

    println!("{}", report.to_json_pretty()?);

    Ok(())
}

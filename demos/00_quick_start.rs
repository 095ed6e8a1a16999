/// quick start - minimal example to get started
use trading_journal_rs::{AccrualEngine, MarginPosition, Money, Quantity, Rate, RateTimeline};
use chrono::NaiveDate;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // a 100,000 margin position opened at 20% annual
    let position = MarginPosition::new(
        "SBER",
        Money::from_major(100),
        Quantity::from_units(1000),
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        Rate::from_percentage(20u32),
    );

    // no central-bank changes yet
    let timeline = RateTimeline::new();

    let as_of = NaiveDate::from_ymd_opt(2024, 1, 11).unwrap();
    let report = AccrualEngine::new().accrue(&position, &timeline, as_of);

    println!("cost basis: {}", report.cost_basis);
    println!("days held: {}", report.days_held);
    println!("accrued interest: {}", report.total_interest.round_dp(2));
    println!("daily payment: {}", report.daily_interest().round_dp(2));

    Ok(())
}

/// variable rates - how central-bank changes split the accrual into periods
use trading_journal_rs::{
    AccrualEngine, MarginPosition, Money, Quantity, Rate, RateChangeEvent, RateTimeline,
};
use chrono::NaiveDate;
use rust_decimal_macros::dec;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== variable-rate accrual example ===\n");

    let position = MarginPosition::new(
        "GAZP",
        Money::from_major(200),
        Quantity::from_units(500),
        date(2024, 1, 1),
        Rate::from_percentage(20u32),
    );

    // two cuts and one hike over the holding period
    let timeline = RateTimeline::from_events(vec![
        RateChangeEvent::new(date(2024, 2, 1), Rate::from_percentage(16u32)),
        RateChangeEvent::new(date(2024, 3, 15), Rate::from_percentage(dec!(12.5))),
        RateChangeEvent::new(date(2024, 5, 1), Rate::from_percentage(18u32)),
    ]);

    let report = AccrualEngine::new().accrue(&position, &timeline, date(2024, 6, 1));

    println!("periods:");
    for period in &report.periods {
        println!(
            "  {} .. {}  {:>4} days at {:>6}  interest {}",
            period.start_date,
            period.end_date,
            period.days,
            period.rate.to_string(),
            period.interest.round_dp(2)
        );
    }

    println!("\ntotal interest:    {}", report.total_interest.round_dp(2));
    println!("baseline at 20%:   {}", report.baseline_interest.round_dp(2));
    println!("savings:           {}", report.savings.round_dp(2));
    println!("effective rate:    {}", report.effective_rate);

    Ok(())
}

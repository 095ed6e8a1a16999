/// time control - deterministic accrual with controlled time
use trading_journal_rs::{
    AccrualEngine, MarginPosition, Money, Quantity, Rate, RateChangeEvent, RateTimeline,
    SafeTimeProvider, TimeSource,
};
use chrono::{Duration, TimeZone, Utc};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== time control example ===\n");

    // create controlled time for testing
    let time = SafeTimeProvider::new(TimeSource::Test(
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
    ));
    let controller = time.test_control().unwrap();

    println!("starting date: {}", time.now().format("%Y-%m-%d"));

    let position = MarginPosition::new(
        "SBER",
        Money::from_major(100),
        Quantity::from_units(1000),
        time.now().date_naive(),
        Rate::from_percentage(20u32),
    );
    let mut timeline = RateTimeline::new();
    let engine = AccrualEngine::new();

    // advance 10 days at the entry rate
    controller.advance(Duration::days(10));
    let report = engine.accrue_now(&position, &timeline, &time);
    println!(
        "\nafter 10 days: accrued {} over {} periods",
        report.total_interest.round_dp(2),
        report.periods.len()
    );

    // the central bank cuts the rate to 10%
    timeline.push(RateChangeEvent::new(
        time.now().date_naive(),
        Rate::from_percentage(10u32),
    ));
    println!("rate cut to 10% on {}", time.now().format("%Y-%m-%d"));

    // advance another 10 days at the new rate
    controller.advance(Duration::days(10));
    let report = engine.accrue_now(&position, &timeline, &time);
    println!(
        "after 20 days: accrued {} over {} periods",
        report.total_interest.round_dp(2),
        report.periods.len()
    );
    println!("savings against constant 20%: {}", report.savings.round_dp(2));

    Ok(())
}

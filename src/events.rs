use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::decimal::Rate;

/// a central-bank style rate change: the new annual rate applies to every
/// open position from the effective date (inclusive) onward
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateChangeEvent {
    pub effective_date: NaiveDate,
    pub new_rate: Rate,
    pub note: Option<String>,
}

impl RateChangeEvent {
    pub fn new(effective_date: NaiveDate, new_rate: Rate) -> Self {
        Self {
            effective_date,
            new_rate,
            note: None,
        }
    }
}

/// chronological timeline of rate changes
///
/// Events are kept stably sorted by effective date, so of two events sharing
/// a date the one inserted last is authoritative for that date.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RateTimeline {
    events: Vec<RateChangeEvent>,
}

impl RateTimeline {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// build a timeline from events in arrival order
    pub fn from_events(events: Vec<RateChangeEvent>) -> Self {
        let mut timeline = Self { events };
        timeline.events.sort_by_key(|e| e.effective_date);
        timeline
    }

    /// insert an event, keeping arrival order among equal dates
    pub fn push(&mut self, event: RateChangeEvent) {
        let at = self
            .events
            .partition_point(|e| e.effective_date <= event.effective_date);
        self.events.insert(at, event);
    }

    pub fn events(&self) -> &[RateChangeEvent] {
        &self.events
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// events effective within [entry, end], in chronological order
    pub fn applicable(&self, entry: NaiveDate, end: NaiveDate) -> impl Iterator<Item = &RateChangeEvent> {
        self.events
            .iter()
            .filter(move |e| e.effective_date >= entry && e.effective_date <= end)
    }

    /// annual rate in force for a position on a given date: the latest
    /// applicable change, or the position's own rate before any change
    pub fn rate_on(&self, initial_rate: Rate, entry: NaiveDate, date: NaiveDate) -> Rate {
        if date < entry {
            return initial_rate;
        }
        self.applicable(entry, date)
            .last()
            .map(|e| e.new_rate)
            .unwrap_or(initial_rate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn pct(p: u32) -> Rate {
        Rate::from_percentage(p)
    }

    #[test]
    fn test_sort_is_stable_and_last_insert_wins() {
        let timeline = RateTimeline::from_events(vec![
            RateChangeEvent::new(date(2024, 6, 1), pct(18)),
            RateChangeEvent::new(date(2024, 3, 1), pct(16)),
            RateChangeEvent::new(date(2024, 6, 1), pct(17)),
        ]);

        let dates: Vec<_> = timeline.events().iter().map(|e| e.effective_date).collect();
        assert_eq!(dates, vec![date(2024, 3, 1), date(2024, 6, 1), date(2024, 6, 1)]);

        // the 17% event arrived after the 18% one and wins for june 1st
        let rate = timeline.rate_on(pct(20), date(2024, 1, 1), date(2024, 6, 1));
        assert_eq!(rate, pct(17));
    }

    #[test]
    fn test_push_preserves_arrival_order_on_equal_dates() {
        let mut timeline = RateTimeline::new();
        timeline.push(RateChangeEvent::new(date(2024, 6, 1), pct(18)));
        timeline.push(RateChangeEvent::new(date(2024, 6, 1), pct(17)));
        assert_eq!(timeline.events()[1].new_rate, pct(17));
    }

    #[test]
    fn test_rate_on_window() {
        let timeline = RateTimeline::from_events(vec![
            RateChangeEvent::new(date(2023, 12, 1), pct(15)),
            RateChangeEvent::new(date(2024, 2, 1), pct(16)),
        ]);
        let entry = date(2024, 1, 1);
        let initial = Rate::from_percentage(dec!(22.0));

        // change predating the position is ignored
        assert_eq!(timeline.rate_on(initial, entry, date(2024, 1, 15)), initial);
        // change takes effect from its date
        assert_eq!(timeline.rate_on(initial, entry, date(2024, 2, 1)), pct(16));
        // before entry the position's own rate applies
        assert_eq!(timeline.rate_on(initial, entry, date(2023, 6, 1)), initial);
    }

    #[test]
    fn test_applicable_filters_future_and_past() {
        let timeline = RateTimeline::from_events(vec![
            RateChangeEvent::new(date(2023, 12, 1), pct(15)),
            RateChangeEvent::new(date(2024, 1, 6), pct(10)),
            RateChangeEvent::new(date(2024, 2, 1), pct(8)),
        ]);
        let in_window: Vec<_> = timeline
            .applicable(date(2024, 1, 1), date(2024, 1, 11))
            .collect();
        assert_eq!(in_window.len(), 1);
        assert_eq!(in_window[0].effective_date, date(2024, 1, 6));
    }
}

//! Derived views over the application list: per day counts, the heatmap window and the current
//! streak. Nothing here is cached, every [ActivityAggregator] is built from the full list.

pub mod heatmap;
pub mod streak;

use std::collections::HashMap;

use crate::{store::entities::ApplicationRecord, utils::time::CalendarDate};

use heatmap::HeatmapDay;

pub const DEFAULT_WINDOW_DAYS: u32 = 30;

/// Everything a dashboard shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivitySummary {
    pub total_count: usize,
    pub today_count: usize,
    pub current_streak: u32,
    pub heatmap: Vec<HeatmapDay>,
}

pub struct ActivityAggregator {
    daily_counts: HashMap<CalendarDate, usize>,
    total_count: usize,
    today: CalendarDate,
}

impl ActivityAggregator {
    /// `today` is the day windows end on and streaks are counted back from.
    pub fn new(records: &[ApplicationRecord], today: CalendarDate) -> Self {
        let mut daily_counts = HashMap::<CalendarDate, usize>::new();
        for record in records {
            *daily_counts.entry(record.date).or_default() += 1;
        }
        Self {
            daily_counts,
            total_count: records.len(),
            today,
        }
    }

    pub fn today(&self) -> CalendarDate {
        self.today
    }

    pub fn total_count(&self) -> usize {
        self.total_count
    }

    /// Number of records whose date is exactly `date`.
    pub fn count_for_date(&self, date: CalendarDate) -> usize {
        self.daily_counts.get(&date).copied().unwrap_or(0)
    }

    pub fn summary(&self, window_days: u32) -> ActivitySummary {
        ActivitySummary {
            total_count: self.total_count,
            today_count: self.count_for_date(self.today),
            current_streak: self.current_streak(),
            heatmap: self.heatmap(window_days),
        }
    }
}

#[cfg(test)]
pub(crate) mod test_records {
    use chrono::NaiveDate;

    use crate::{
        store::entities::{ApplicationRecord, RecordId, DEFAULT_POSITION},
        utils::time::CalendarDate,
    };

    pub const TODAY: CalendarDate = match NaiveDate::from_ymd_opt(2026, 10, 19) {
        Some(v) => CalendarDate::new(v),
        None => panic!("2026-10-19 is a valid date"),
    };

    /// One record per entry of `days_ago`, in the given order.
    pub fn records_days_ago(days_ago: &[u32]) -> Vec<ApplicationRecord> {
        days_ago
            .iter()
            .enumerate()
            .map(|(index, days)| {
                let date = TODAY.days_before(*days);
                ApplicationRecord {
                    id: RecordId(index as i64),
                    url: format!("https://company{index}.com"),
                    company: format!("Company{index}"),
                    position: DEFAULT_POSITION.into(),
                    date,
                    date_applied: date.applied_label(),
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use crate::activity::{
        test_records::{records_days_ago, TODAY},
        ActivityAggregator,
    };

    #[test]
    fn test_count_for_date_uses_exact_day() {
        let records = records_days_ago(&[0, 0, 1, 3, 3, 3, 400]);
        let aggregator = ActivityAggregator::new(&records, TODAY);

        assert_eq!(aggregator.count_for_date(TODAY), 2);
        assert_eq!(aggregator.count_for_date(TODAY.days_before(1)), 1);
        assert_eq!(aggregator.count_for_date(TODAY.days_before(2)), 0);
        assert_eq!(aggregator.count_for_date(TODAY.days_before(3)), 3);
        assert_eq!(aggregator.count_for_date(TODAY.days_before(400)), 1);
        assert_eq!(aggregator.total_count(), 7);
    }

    #[test]
    fn test_count_does_not_depend_on_order() {
        let records = records_days_ago(&[5, 0, 2, 0, 5]);
        let mut reversed = records.clone();
        reversed.reverse();

        let forward = ActivityAggregator::new(&records, TODAY);
        let backward = ActivityAggregator::new(&reversed, TODAY);

        for days in 0..7 {
            let day = TODAY.days_before(days);
            assert_eq!(forward.count_for_date(day), backward.count_for_date(day));
        }
        assert_eq!(forward.summary(30), backward.summary(30));
    }

    #[test]
    fn test_summary() {
        let records = records_days_ago(&[0, 0, 1, 2, 45]);
        let summary = ActivityAggregator::new(&records, TODAY).summary(30);

        assert_eq!(summary.total_count, 5);
        assert_eq!(summary.today_count, 2);
        assert_eq!(summary.current_streak, 3);
        assert_eq!(summary.heatmap.len(), 30);
        assert_eq!(summary.heatmap.iter().map(|v| v.count).sum::<usize>(), 4);
    }

    #[test]
    fn test_summary_of_nothing() {
        let summary = ActivityAggregator::new(&[], TODAY).summary(30);

        assert_eq!(summary.total_count, 0);
        assert_eq!(summary.today_count, 0);
        assert_eq!(summary.current_streak, 0);
        assert!(summary.heatmap.iter().all(|v| v.count == 0));
    }
}

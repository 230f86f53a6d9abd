use crate::utils::time::CalendarDate;

use super::ActivityAggregator;

/// One cell of the heatmap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeatmapDay {
    pub date: CalendarDate,
    pub count: usize,
    pub day_of_month: u32,
    pub month_label: String,
}

impl HeatmapDay {
    pub fn band(&self) -> ActivityBand {
        ActivityBand::from_count(self.count)
    }
}

/// Intensity used when drawing a day. Thresholds are 0, 1, 2, 3 and 4 or more.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ActivityBand {
    Empty,
    Low,
    Medium,
    High,
    Peak,
}

impl ActivityBand {
    pub fn from_count(count: usize) -> Self {
        match count {
            0 => ActivityBand::Empty,
            1 => ActivityBand::Low,
            2 => ActivityBand::Medium,
            3 => ActivityBand::High,
            _ => ActivityBand::Peak,
        }
    }

    pub const ALL: [ActivityBand; 5] = [
        ActivityBand::Empty,
        ActivityBand::Low,
        ActivityBand::Medium,
        ActivityBand::High,
        ActivityBand::Peak,
    ];
}

impl ActivityAggregator {
    /// Returns exactly `window_days` days, oldest first, ending with today. Days without
    /// applications are included with a zero count.
    pub fn heatmap(&self, window_days: u32) -> Vec<HeatmapDay> {
        (0..window_days)
            .rev()
            .map(|days_ago| {
                let date = self.today.days_before(days_ago);
                HeatmapDay {
                    date,
                    count: self.count_for_date(date),
                    day_of_month: date.day_of_month(),
                    month_label: date.month_label(),
                }
            })
            .collect()
    }
}

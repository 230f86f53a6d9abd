use tracing::trace;

use super::ActivityAggregator;

/// Upper bound of days looked at, so the walk always terminates.
pub const MAX_STREAK_SCAN_DAYS: u32 = 365;

impl ActivityAggregator {
    /// Number of consecutive days with at least one application, counted backwards from today.
    ///
    /// Today is a grace day: having nothing yet today doesn't end the streak, the walk continues
    /// with yesterday. Any empty day before today ends it. The result never exceeds
    /// [MAX_STREAK_SCAN_DAYS].
    pub fn current_streak(&self) -> u32 {
        if self.total_count == 0 {
            return 0;
        }

        let mut streak = 0;
        for days_ago in 0..MAX_STREAK_SCAN_DAYS {
            let day = self.today.days_before(days_ago);
            if self.count_for_date(day) > 0 {
                streak += 1;
            } else if days_ago > 0 {
                trace!("Streak ends at {day}");
                break;
            }
        }
        streak
    }
}

#[cfg(test)]
mod tests {
    use crate::activity::{
        streak::MAX_STREAK_SCAN_DAYS,
        test_records::{records_days_ago, TODAY},
        ActivityAggregator,
    };

    fn streak(days_ago: &[u32]) -> u32 {
        ActivityAggregator::new(&records_days_ago(days_ago), TODAY).current_streak()
    }

    #[test]
    fn test_streak_stops_at_first_gap() {
        assert_eq!(streak(&[0, 1, 2, 5]), 3);
        assert_eq!(streak(&[2, 0, 0, 1, 5, 1]), 3);
    }

    #[test]
    fn test_streak_of_nothing() {
        assert_eq!(streak(&[]), 0);
    }

    #[test]
    fn test_streak_only_today() {
        assert_eq!(streak(&[0]), 1);
    }

    #[test]
    fn test_streak_today_is_grace_day() {
        // Nothing today yet, yesterday's application keeps the streak alive.
        assert_eq!(streak(&[1]), 1);
        assert_eq!(streak(&[1, 2, 3, 5]), 3);
    }

    #[test]
    fn test_streak_gap_before_yesterday() {
        assert_eq!(streak(&[2, 3]), 0);
        assert_eq!(streak(&[0, 2, 3]), 1);
    }

    #[test]
    fn test_streak_is_bounded() {
        let every_day = (0..500).collect::<Vec<u32>>();
        assert_eq!(streak(&every_day), MAX_STREAK_SCAN_DAYS);
    }
}

//! Text rendering of records and activity for the terminal.

use ansi_term::{Colour, Style};

use crate::{
    activity::{
        heatmap::{ActivityBand, HeatmapDay},
        ActivitySummary,
    },
    store::{entities::ApplicationRecord, LoadIssue},
};

/// Amount of heatmap cells per printed row.
const HEATMAP_COLUMNS: usize = 10;

/// Terminates every line with a newline, including the last one.
fn to_block(lines: impl IntoIterator<Item = String>) -> String {
    lines.into_iter().map(|line| line + "\n").collect()
}

pub fn record_row(record: &ApplicationRecord) -> String {
    format!(
        "{}\t{}\t{}\t{}\t{}",
        record.id, record.date_applied, record.company, record.position, record.url
    )
}

pub fn record_table(records: &[ApplicationRecord]) -> String {
    if records.is_empty() {
        return "No applications yet. Add your first one with `appstreak add <url>`\n".into();
    }
    to_block(
        std::iter::once("Id\tDate Applied\tCompany\tPosition\tUrl".to_string())
            .chain(records.iter().map(record_row)),
    )
}

pub fn streak_line(streak: u32) -> String {
    format!("{streak} day streak")
}

pub fn stats(summary: &ActivitySummary, todays_companies: &[&str]) -> String {
    let today = if todays_companies.is_empty() {
        format!("Today's Applications\t{}", summary.today_count)
    } else {
        format!(
            "Today's Applications\t{}\t{}",
            summary.today_count,
            todays_companies.join(", ")
        )
    };
    to_block([
        format!("Total Applications\t{}", summary.total_count),
        today,
        format!("Current Streak\t{}", streak_line(summary.current_streak)),
    ])
}

pub fn load_issue_warning(issue: LoadIssue) -> String {
    let reason = match issue {
        LoadIssue::Corrupt => "is corrupted",
        LoadIssue::Unreadable => "couldn't be read",
    };
    format!(
        "Warning: saved applications {reason}, showing none. The old file is kept as applications.json.corrupt-<time> once a change is saved"
    )
}

fn band_style(band: ActivityBand) -> Style {
    let background = match band {
        ActivityBand::Empty => Colour::Fixed(255),
        ActivityBand::Low => Colour::Fixed(157),
        ActivityBand::Medium => Colour::Fixed(114),
        ActivityBand::High => Colour::Fixed(71),
        ActivityBand::Peak => Colour::Fixed(28),
    };
    Colour::Black.on(background)
}

fn heatmap_cell(day: &HeatmapDay, color: bool) -> String {
    if color {
        band_style(day.band())
            .paint(format!("{:>3} ", day.day_of_month))
            .to_string()
    } else {
        format!("{:>2}:{:<2}", day.day_of_month, day.count)
    }
}

/// Grid of days. With `color` every cell shows the day of month on a background matching its
/// [ActivityBand], otherwise cells show `day:count`.
pub fn heatmap(days: &[HeatmapDay], color: bool) -> String {
    let header = match (days.first(), days.last()) {
        (Some(first), Some(last)) => Some(format!(
            "{} {} - {} {}",
            first.month_label, first.day_of_month, last.month_label, last.day_of_month
        )),
        _ => None,
    };
    let rows = days.chunks(HEATMAP_COLUMNS).map(|row| {
        row.iter()
            .map(|day| heatmap_cell(day, color))
            .collect::<Vec<_>>()
            .join(" ")
    });
    let legend = color.then(|| {
        let bands = ActivityBand::ALL
            .iter()
            .map(|band| band_style(*band).paint("   ").to_string())
            .collect::<String>();
        format!("Less {bands} More")
    });
    to_block(header.into_iter().chain(rows).chain(legend))
}

/// One line per day, for example `Mon Oct 19 2026: 3 applications`.
pub fn heatmap_details(days: &[HeatmapDay]) -> String {
    to_block(days.iter().map(|day| {
        format!(
            "{}: {} applications",
            day.date.naive().format("%a %b %d %Y"),
            day.count
        )
    }))
}

#[cfg(test)]
mod tests {
    use crate::{
        activity::{
            test_records::{records_days_ago, TODAY},
            ActivityAggregator,
        },
        store::LoadIssue,
    };

    use super::{heatmap, heatmap_details, load_issue_warning, record_table, stats, streak_line};

    #[test]
    fn test_plain_heatmap_rows() {
        let records = records_days_ago(&[0, 0, 1]);
        let days = ActivityAggregator::new(&records, TODAY).heatmap(30);

        let rendered = heatmap(&days, false);
        let lines = rendered.lines().collect::<Vec<_>>();

        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "Sep 20 - Oct 19");
        assert!(lines[3].ends_with("18:1  19:2 "));
    }

    #[test]
    fn test_colored_heatmap_has_legend() {
        let days = ActivityAggregator::new(&[], TODAY).heatmap(7);
        let rendered = heatmap(&days, true);

        assert!(rendered.lines().last().unwrap().starts_with("Less "));
        assert!(rendered.contains("\u{1b}["));
    }

    #[test]
    fn test_heatmap_details() {
        let days = ActivityAggregator::new(&records_days_ago(&[0]), TODAY).heatmap(2);
        assert_eq!(
            heatmap_details(&days),
            "Sun Oct 18 2026: 0 applications\nMon Oct 19 2026: 1 applications\n"
        );
    }

    #[test]
    fn test_stats_and_table() {
        let records = records_days_ago(&[0, 1]);
        let summary = ActivityAggregator::new(&records, TODAY).summary(30);

        let rendered = stats(&summary, &["Company0"]);
        assert_eq!(
            rendered,
            "Total Applications\t2\nToday's Applications\t1\tCompany0\nCurrent Streak\t2 day streak\n"
        );

        let table = record_table(&records);
        assert_eq!(table.lines().count(), 3);
        assert!(record_table(&[]).starts_with("No applications yet"));
        assert_eq!(streak_line(0), "0 day streak");
    }

    #[test]
    fn test_load_issue_warning_names_backup() {
        assert!(load_issue_warning(LoadIssue::Corrupt).contains("is corrupted"));
        assert!(load_issue_warning(LoadIssue::Unreadable).contains("applications.json.corrupt-"));
    }

    #[test]
    fn test_empty_heatmap_renders_nothing() {
        assert_eq!(heatmap(&[], false), "");
    }
}

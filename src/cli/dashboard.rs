use std::fmt::Display;

use anyhow::Result;
use chrono::Local;
use chrono_english::parse_date_string;
use clap::{CommandFactory, Parser, ValueEnum};

use crate::{
    activity::{ActivityAggregator, DEFAULT_WINDOW_DAYS},
    store::{snapshot_storage::FileSnapshotStorage, EventStore},
    utils::{
        clock::{today, Clock},
        time::CalendarDate,
    },
};

use super::{applications::warn_if_load_issue, render, Args};

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum DateStyle {
    Uk,
    Us,
}

impl From<DateStyle> for chrono_english::Dialect {
    fn from(value: DateStyle) -> Self {
        match value {
            DateStyle::Uk => Self::Uk,
            DateStyle::Us => Self::Us,
        }
    }
}

impl Display for DateStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DateStyle::Uk => write!(f, "uk"),
            DateStyle::Us => write!(f, "us"),
        }
    }
}

/// Selects the day the dashboard is computed for.
#[derive(Debug, Clone, clap::Args)]
pub struct AsOf {
    #[arg(
        long = "as-of",
        help = "Show the dashboard as it looked on another day. Examples are \"yesterday\", \"3 days ago\", \"15/03/2025\""
    )]
    as_of: Option<String>,
    #[arg(long, default_value_t = DateStyle::Uk, help = "Style of dates used during parsing. For Uk it's day/month/year. For Us it's month/day/year")]
    date_style: DateStyle,
}

#[derive(Debug, Parser)]
pub struct StatsCommand {
    #[command(flatten)]
    as_of: AsOf,
}

#[derive(Debug, Parser)]
pub struct HeatmapCommand {
    #[arg(
        long,
        default_value_t = DEFAULT_WINDOW_DAYS,
        value_parser = clap::value_parser!(u32).range(1..=365),
        help = "Amount of days displayed, ending with today"
    )]
    days: u32,
    #[arg(short, long, help = "Also print the amount of applications for every day")]
    verbose: bool,
    #[arg(long = "no-color", help = "Print counts instead of colored cells")]
    no_color: bool,
    #[command(flatten)]
    as_of: AsOf,
}

/// Command to process `stats` command. Prints the dashboard counters.
pub async fn process_stats_command(
    StatsCommand { as_of }: StatsCommand,
    storage: &FileSnapshotStorage,
    clock: &dyn Clock,
) -> Result<()> {
    let day = resolve_day(as_of, clock)?;
    let store = EventStore::load(storage).await;
    warn_if_load_issue(store.load_issue());
    let aggregator = ActivityAggregator::new(store.records(), day);

    let todays_companies = store
        .records()
        .iter()
        .filter(|v| v.date == day)
        .map(|v| v.company.as_str())
        .collect::<Vec<_>>();

    print!(
        "{}",
        render::stats(&aggregator.summary(DEFAULT_WINDOW_DAYS), &todays_companies)
    );
    Ok(())
}

/// Command to process `heatmap` command. Prints `days` cells, oldest first.
pub async fn process_heatmap_command(
    HeatmapCommand {
        days,
        verbose,
        no_color,
        as_of,
    }: HeatmapCommand,
    storage: &FileSnapshotStorage,
    clock: &dyn Clock,
) -> Result<()> {
    let day = resolve_day(as_of, clock)?;
    let store = EventStore::load(storage).await;
    warn_if_load_issue(store.load_issue());
    let heatmap = ActivityAggregator::new(store.records(), day).heatmap(days);

    print!("{}", render::heatmap(&heatmap, !no_color));
    if verbose {
        print!("{}", render::heatmap_details(&heatmap));
    }
    Ok(())
}

fn resolve_day(AsOf { as_of, date_style }: AsOf, clock: &dyn Clock) -> Result<CalendarDate> {
    let Some(as_of) = as_of else {
        return Ok(today(clock));
    };
    match parse_date_string(&as_of, clock.now(), date_style.into()) {
        Ok(v) => Ok(CalendarDate::from_local(v.with_timezone(&Local))),
        Err(e) => Err(Args::command()
            .error(
                clap::error::ErrorKind::ValueValidation,
                format!("Failed to validate as-of date {e}"),
            )
            .into()),
    }
}

#[cfg(test)]
mod tests {
    use anyhow::Result;
    use chrono::{Local, TimeZone};

    use crate::utils::{clock::MockClock, time::CalendarDate};

    use super::{resolve_day, AsOf, DateStyle};

    fn clock() -> MockClock {
        let mut clock = MockClock::new();
        clock
            .expect_now()
            .return_const(Local.with_ymd_and_hms(2026, 10, 19, 15, 0, 0).unwrap());
        clock
    }

    fn as_of(value: Option<&str>, date_style: DateStyle) -> AsOf {
        AsOf {
            as_of: value.map(str::to_string),
            date_style,
        }
    }

    #[test]
    fn test_resolve_day_defaults_to_today() -> Result<()> {
        assert_eq!(
            resolve_day(as_of(None, DateStyle::Uk), &clock())?,
            CalendarDate::from_ymd_opt(2026, 10, 19).unwrap()
        );
        Ok(())
    }

    #[test]
    fn test_resolve_day_natural_language() -> Result<()> {
        assert_eq!(
            resolve_day(as_of(Some("yesterday"), DateStyle::Uk), &clock())?,
            CalendarDate::from_ymd_opt(2026, 10, 18).unwrap()
        );
        Ok(())
    }

    #[test]
    fn test_resolve_day_dialects() -> Result<()> {
        assert_eq!(
            resolve_day(as_of(Some("02/03/2026"), DateStyle::Uk), &clock())?,
            CalendarDate::from_ymd_opt(2026, 3, 2).unwrap()
        );
        assert_eq!(
            resolve_day(as_of(Some("02/03/2026"), DateStyle::Us), &clock())?,
            CalendarDate::from_ymd_opt(2026, 2, 3).unwrap()
        );
        Ok(())
    }

    #[test]
    fn test_resolve_day_rejects_garbage() {
        assert!(resolve_day(as_of(Some("the day after never"), DateStyle::Uk), &clock()).is_err());
    }
}

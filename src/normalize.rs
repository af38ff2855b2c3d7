//! Raw report rows into clean [`Session`] records.

use chrono::{DateTime, Duration, NaiveDate, NaiveTime};
use log::warn;

use crate::error::{PlanError, Result};
use crate::model::{HalfDay, Session, Week};
use crate::report::RawTable;

/// Hours subtracted from UTC when converting report timestamps to wall-clock
/// time. The feed stamps local times as if they were UTC, eleven hours ahead.
pub const UTC_OFFSET_HOURS: i64 = 11;

/// Date formats accepted from the report, day-first preferred.
const DATE_FORMATS: [&str; 4] = ["%d/%m/%Y", "%Y-%m-%d", "%d-%m-%Y", "%d %b %Y"];

/// Category values removed during normalization.
#[derive(Debug, Clone)]
pub struct FilterRules {
    pub excluded_venues: Vec<String>,
    pub excluded_sports: Vec<String>,
    pub excluded_groups: Vec<String>,
}

impl Default for FilterRules {
    fn default() -> FilterRules {
        FilterRules {
            excluded_venues: vec!["AASMC".to_string()],
            excluded_sports: vec!["Generic Athlete".to_string()],
            excluded_groups: vec!["Practice".to_string()],
        }
    }
}

/// Convert an epoch-millisecond timestamp string to local wall-clock time.
///
/// Unparseable or out-of-range values yield `None`, never an error.
pub fn wall_clock_time(raw: &str) -> Option<NaiveTime> {
    let millis: f64 = raw.trim().parse().ok()?;
    if !millis.is_finite() {
        return None;
    }
    let utc = DateTime::from_timestamp_millis(millis as i64)?;
    Some((utc - Duration::hours(UTC_OFFSET_HOURS)).time())
}

/// Parse a report date string; `None` marks the row as out of range.
pub fn parse_report_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
}

/// Clean the raw table down to the sessions inside the given week.
pub fn normalize(table: &RawTable, week: Week, rules: &FilterRules) -> Result<Vec<Session>> {
    let column = |name: &str| {
        table
            .column(name)
            .ok_or_else(|| PlanError::MissingColumn(name.to_string()))
    };

    let sport_col = column("Sport")?;
    let group_col = column("Training_Group")?;
    let venue_col = column("Venue")?;
    let date_col = column("Date")?;
    let start_col = column("Start_Time")?;
    let finish_col = column("Finish_Time")?;
    let type_col = column("Session_Type")?;
    let half_col = column("AM/PM")?;
    let coach_col = table.column("Coach");

    let cell = |row: &[String], idx: usize| row.get(idx).map(|c| c.trim()).unwrap_or("").to_string();

    let mut sessions = Vec::new();
    for row in &table.rows {
        let sport = cell(row, sport_col);
        if sport.is_empty() || rules.excluded_sports.contains(&sport) {
            continue;
        }

        let training_group = cell(row, group_col);
        if rules.excluded_groups.contains(&training_group) {
            continue;
        }

        let venue = cell(row, venue_col);
        if rules.excluded_venues.contains(&venue) {
            continue;
        }

        // Unparseable dates are treated as out of range
        let Some(date) = parse_report_date(&cell(row, date_col)) else {
            continue;
        };
        if !week.contains(date) {
            continue;
        }

        let raw_half = cell(row, half_col);
        let Some(half_day) = HalfDay::parse(&raw_half) else {
            warn!(
                "dropping {} / {} on {}: unrecognized half-day marker {:?}",
                sport, training_group, date, raw_half
            );
            continue;
        };

        sessions.push(Session {
            sport,
            training_group,
            venue,
            date,
            start: wall_clock_time(&cell(row, start_col)),
            finish: wall_clock_time(&cell(row, finish_col)),
            session_type: cell(row, type_col),
            half_day,
            coach: coach_col.map(|idx| cell(row, idx)).unwrap_or_default(),
        });
    }

    sessions.sort_by(|a, b| {
        a.date
            .cmp(&b.date)
            .then_with(|| a.sport.cmp(&b.sport))
            .then_with(|| a.coach.cmp(&b.coach))
            .then_with(|| a.half_day.cmp(&b.half_day))
    });

    Ok(sessions)
}

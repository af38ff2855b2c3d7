//! Merging same-slot sessions into a single cell string.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use chrono::NaiveTime;

use crate::model::{Session, Slot};

/// Literal written into a cell when any session of the group is a training
/// camp. A camp blocks out the slot regardless of what else was booked.
pub const TRAINING_CAMP_MARKER: &str = "TRAINING CAMP";

/// One merged value, keyed by (sport, training group, slot).
#[derive(Debug, Clone)]
pub struct MergedCell {
    pub sport: String,
    pub training_group: String,
    pub slot: Slot,
    pub value: String,
}

/// Merge the sessions of one grouping key into a display string.
///
/// Rules, in priority order: a training-camp row collapses the whole group to
/// the marker; otherwise each row contributes venue and time range (with a
/// "Competition" prefix for competition rows), ordered by start time with
/// missing starts last, joined by newlines.
pub fn merge_sessions(rows: &[&Session]) -> String {
    if rows.iter().any(|s| s.is_training_camp()) {
        return TRAINING_CAMP_MARKER.to_string();
    }

    let mut pairs: Vec<(Option<NaiveTime>, String)> = Vec::new();
    for session in rows {
        let time = session.time_range();
        if session.venue.is_empty() && time.is_empty() && session.session_type.trim().is_empty() {
            continue;
        }

        let mut detail = format!("{}\n{}", session.venue, time);
        if session.is_competition() {
            detail = format!("Competition\n{}", detail);
        }
        pairs.push((session.start, detail.trim().to_string()));
    }

    // Stable sort: ties keep input order, missing starts sort last
    pairs.sort_by(|a, b| match (a.0, b.0) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });

    pairs
        .into_iter()
        .map(|(_, detail)| detail)
        .filter(|detail| !detail.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Group a week of sessions by (sport, training group, slot) and merge each
/// group. Keys come out sorted, matching the pivot row order.
pub fn merge_week(sessions: &[Session]) -> Vec<MergedCell> {
    let mut groups: BTreeMap<(String, String, usize), Vec<&Session>> = BTreeMap::new();
    for session in sessions {
        groups
            .entry((
                session.sport.clone(),
                session.training_group.clone(),
                session.slot().index(),
            ))
            .or_default()
            .push(session);
    }

    groups
        .into_iter()
        .map(|((sport, training_group, slot_idx), rows)| MergedCell {
            sport,
            training_group,
            slot: Slot::ALL[slot_idx],
            value: merge_sessions(&rows),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::HalfDay;
    use chrono::NaiveDate;

    fn session(venue: &str, start: Option<(u32, u32)>, finish: Option<(u32, u32)>, session_type: &str) -> Session {
        Session {
            sport: "Athletics".to_string(),
            training_group: "Sprints_Lee".to_string(),
            venue: venue.to_string(),
            date: NaiveDate::from_ymd_opt(2025, 2, 16).unwrap(),
            start: start.and_then(|(h, m)| NaiveTime::from_hms_opt(h, m, 0)),
            finish: finish.and_then(|(h, m)| NaiveTime::from_hms_opt(h, m, 0)),
            session_type: session_type.to_string(),
            half_day: HalfDay::Am,
            coach: String::new(),
        }
    }

    #[test]
    fn test_merge_orders_by_start_with_input_order_ties() {
        let a = session("Track", Some((9, 0)), Some((10, 0)), "Training");
        let b = session("Pool", Some((9, 0)), Some((10, 0)), "Training");
        assert_eq!(
            merge_sessions(&[&a, &b]),
            "Track\n09:00-10:00\nPool\n09:00-10:00"
        );
    }

    #[test]
    fn test_merge_missing_start_sorts_last() {
        let late = session("Gym", None, None, "Training");
        let early = session("Track", Some((8, 0)), Some((9, 0)), "Training");
        assert_eq!(
            merge_sessions(&[&late, &early]),
            "Track\n08:00-09:00\nGym"
        );
    }

    #[test]
    fn test_training_camp_overrides_group() {
        let camp = session("", None, None, "Training Camp");
        let normal = session("Track", Some((9, 0)), Some((10, 0)), "Training");
        assert_eq!(merge_sessions(&[&normal, &camp]), TRAINING_CAMP_MARKER);
        // Idempotent: more non-camp rows never change a camp result
        let extra = session("Pool", Some((7, 0)), Some((8, 0)), "Training");
        assert_eq!(
            merge_sessions(&[&normal, &camp, &extra]),
            TRAINING_CAMP_MARKER
        );
    }

    #[test]
    fn test_competition_prefix() {
        let comp = session("Arena", Some((10, 0)), Some((11, 0)), "Competition");
        assert_eq!(merge_sessions(&[&comp]), "Competition\nArena\n10:00-11:00");
    }

    #[test]
    fn test_empty_rows_are_skipped() {
        let blank = session("", None, None, "");
        let real = session("Track", Some((9, 0)), Some((10, 0)), "Training");
        assert_eq!(merge_sessions(&[&blank, &real]), "Track\n09:00-10:00");
        assert_eq!(merge_sessions(&[&blank]), "");
    }

    #[test]
    fn test_merge_week_groups_by_slot() {
        let mut am = session("Track", Some((9, 0)), Some((10, 0)), "Training");
        let mut pm = session("Track", Some((16, 0)), Some((17, 0)), "Training");
        pm.half_day = HalfDay::Pm;
        am.coach = "A".to_string();
        pm.coach = "A".to_string();

        let cells = merge_week(&[am, pm]);
        assert_eq!(cells.len(), 2);
        assert_eq!(cells[0].slot.index(), 0);
        assert_eq!(cells[1].slot.index(), 1);
        assert_eq!(cells[0].value, "Track\n09:00-10:00");
    }
}

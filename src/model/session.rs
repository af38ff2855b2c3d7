use chrono::{Datelike, NaiveDate, NaiveTime};

use crate::model::slot::{HalfDay, Slot};

/// A single normalized training session row.
#[derive(Debug, Clone)]
pub struct Session {
    pub sport: String,
    pub training_group: String,
    pub venue: String,
    pub date: NaiveDate,
    pub start: Option<NaiveTime>,
    pub finish: Option<NaiveTime>,
    pub session_type: String,
    pub half_day: HalfDay,
    pub coach: String,
}

impl Session {
    /// The weekly grid column this session falls into.
    pub fn slot(&self) -> Slot {
        Slot {
            day: self.date.weekday(),
            half: self.half_day,
        }
    }

    pub fn is_training_camp(&self) -> bool {
        self.session_type.trim().eq_ignore_ascii_case("Training Camp")
    }

    pub fn is_competition(&self) -> bool {
        self.session_type.trim().eq_ignore_ascii_case("Competition")
    }

    /// "09:00-10:00" style range; empty when neither end is known.
    pub fn time_range(&self) -> String {
        if self.start.is_none() && self.finish.is_none() {
            return String::new();
        }
        format!("{}-{}", format_time(self.start), format_time(self.finish))
    }
}

/// "HH:MM", or empty for a missing time.
pub fn format_time(time: Option<NaiveTime>) -> String {
    time.map_or_else(String::new, |t| t.format("%H:%M").to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(start: Option<NaiveTime>, finish: Option<NaiveTime>) -> Session {
        Session {
            sport: "Fencing".to_string(),
            training_group: "Fencing".to_string(),
            venue: "Hall".to_string(),
            date: NaiveDate::from_ymd_opt(2025, 2, 16).unwrap(),
            start,
            finish,
            session_type: "Training".to_string(),
            half_day: HalfDay::Am,
            coach: String::new(),
        }
    }

    #[test]
    fn test_time_range() {
        let t = |h, m| NaiveTime::from_hms_opt(h, m, 0);
        assert_eq!(session(t(9, 0), t(10, 30)).time_range(), "09:00-10:30");
        assert_eq!(session(t(9, 0), None).time_range(), "09:00-");
        assert_eq!(session(None, None).time_range(), "");
    }

    #[test]
    fn test_session_slot() {
        // 2025-02-16 is a Sunday
        let s = session(None, None);
        assert_eq!(s.slot().index(), 0);
    }

    #[test]
    fn test_type_matching_ignores_case() {
        let mut s = session(None, None);
        s.session_type = " training camp ".to_string();
        assert!(s.is_training_camp());
        s.session_type = "Competition".to_string();
        assert!(s.is_competition());
    }
}

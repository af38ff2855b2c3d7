use chrono::{Datelike, Duration, NaiveDate};

/// A seven-day reporting window starting at a caller-supplied date.
///
/// By convention the start date is a Sunday, but any date yields a window of
/// that date plus the six following days.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Week {
    start: NaiveDate,
}

impl Week {
    pub fn starting(start: NaiveDate) -> Week {
        Week { start }
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.start + Duration::days(6)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end()
    }

    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        (0..7).map(move |offset| self.start + Duration::days(offset))
    }

    pub fn iso_week_number(&self) -> u32 {
        self.start.iso_week().week()
    }

    /// The "Week beginning" summary label stamped into the template.
    pub fn heading(&self) -> String {
        format!(
            "Week beginning {}\nWeek {}",
            self.start.format("%d %b"),
            self.iso_week_number()
        )
    }

    /// Stem for default output file names, e.g. "16Feb_22Feb".
    pub fn file_stem(&self) -> String {
        format!("{}_{}", self.start.format("%d%b"), self.end().format("%d%b"))
    }
}

/// Header label for one day, e.g. "Sun 16 Feb 2025".
pub fn day_label(date: NaiveDate) -> String {
    date.format("%a %d %b %Y").to_string()
}

use std::cmp::Ordering;
use std::fmt;

use chrono::Weekday;

/// Half of a training day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum HalfDay {
    Am,
    Pm,
}

impl HalfDay {
    pub const ALL: [HalfDay; 2] = [HalfDay::Am, HalfDay::Pm];

    /// Parse an AM/PM marker as it appears in the report.
    pub fn parse(s: &str) -> Option<HalfDay> {
        match s.trim().to_ascii_uppercase().as_str() {
            "AM" => Some(HalfDay::Am),
            "PM" => Some(HalfDay::Pm),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            HalfDay::Am => "AM",
            HalfDay::Pm => "PM",
        }
    }
}

impl fmt::Display for HalfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One of the 14 day/half-day columns of the weekly grid.
///
/// The week runs Sunday through Saturday, AM before PM.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Slot {
    pub day: Weekday,
    pub half: HalfDay,
}

impl Slot {
    pub const COUNT: usize = 14;

    pub const ALL: [Slot; 14] = [
        Slot { day: Weekday::Sun, half: HalfDay::Am },
        Slot { day: Weekday::Sun, half: HalfDay::Pm },
        Slot { day: Weekday::Mon, half: HalfDay::Am },
        Slot { day: Weekday::Mon, half: HalfDay::Pm },
        Slot { day: Weekday::Tue, half: HalfDay::Am },
        Slot { day: Weekday::Tue, half: HalfDay::Pm },
        Slot { day: Weekday::Wed, half: HalfDay::Am },
        Slot { day: Weekday::Wed, half: HalfDay::Pm },
        Slot { day: Weekday::Thu, half: HalfDay::Am },
        Slot { day: Weekday::Thu, half: HalfDay::Pm },
        Slot { day: Weekday::Fri, half: HalfDay::Am },
        Slot { day: Weekday::Fri, half: HalfDay::Pm },
        Slot { day: Weekday::Sat, half: HalfDay::Am },
        Slot { day: Weekday::Sat, half: HalfDay::Pm },
    ];

    /// Position of this slot in the fixed Sunday-first column order.
    pub fn index(self) -> usize {
        self.day.num_days_from_sunday() as usize * 2 + self.half as usize
    }

    /// Column label, e.g. "Sunday AM".
    pub fn label(self) -> String {
        format!("{} {}", day_name(self.day), self.half)
    }
}

impl PartialOrd for Slot {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Slot {
    fn cmp(&self, other: &Self) -> Ordering {
        self.index().cmp(&other.index())
    }
}

/// Full English day name (chrono's Display gives the abbreviated form).
pub fn day_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Sun => "Sunday",
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_order_is_sunday_first() {
        assert_eq!(Slot::ALL[0].index(), 0);
        assert_eq!(Slot::ALL[13].index(), 13);
        for (i, slot) in Slot::ALL.iter().enumerate() {
            assert_eq!(slot.index(), i);
        }
    }

    #[test]
    fn test_slot_labels() {
        assert_eq!(Slot::ALL[0].label(), "Sunday AM");
        assert_eq!(Slot::ALL[13].label(), "Saturday PM");
    }

    #[test]
    fn test_half_day_parse() {
        assert_eq!(HalfDay::parse(" am "), Some(HalfDay::Am));
        assert_eq!(HalfDay::parse("PM"), Some(HalfDay::Pm));
        assert_eq!(HalfDay::parse("noon"), None);
    }
}

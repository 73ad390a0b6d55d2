use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Monday of the ISO week containing `date`.
pub fn monday_anchor(date: NaiveDate) -> NaiveDate {
    let offset = u64::from(date.weekday().num_days_from_monday());
    date.checked_sub_days(Days::new(offset))
        .unwrap_or(NaiveDate::MIN)
}

/// A draw week, identified by its Monday anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Week {
    anchor: NaiveDate,
}

impl Week {
    /// Week containing `date`.
    pub fn containing(date: NaiveDate) -> Self {
        Self {
            anchor: monday_anchor(date),
        }
    }

    pub fn anchor(&self) -> NaiveDate {
        self.anchor
    }

    pub fn iso_week(&self) -> u32 {
        self.anchor.iso_week().week()
    }

    /// `W{iso week} (dd/mm/YYYY)`.
    pub fn label(&self) -> String {
        format!("W{} ({})", self.iso_week(), self.anchor.format("%d/%m/%Y"))
    }

    pub fn next(&self) -> Option<Self> {
        self.anchor
            .checked_add_days(Days::new(7))
            .map(|anchor| Self { anchor })
    }
}

impl fmt::Display for Week {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

/// Weeks from the Monday on or before `start` through `end` inclusive, stepping 7 days.
#[derive(Debug, Clone)]
pub struct WeekRange {
    next: Option<Week>,
    end: NaiveDate,
}

impl WeekRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            next: Some(Week::containing(start)),
            end,
        }
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }
}

impl Iterator for WeekRange {
    type Item = Week;

    fn next(&mut self) -> Option<Week> {
        let current = self.next.filter(|week| week.anchor() <= self.end)?;
        self.next = current.next();
        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Weekday;

    fn d(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn anchor_snaps_back_to_monday() {
        // 2024-02-08 is a Thursday, 2024-02-11 a Sunday
        assert_eq!(monday_anchor(d(2024, 2, 8)), d(2024, 2, 5));
        assert_eq!(monday_anchor(d(2024, 2, 11)), d(2024, 2, 5));
        assert_eq!(monday_anchor(d(2024, 2, 5)), d(2024, 2, 5));
        assert_eq!(monday_anchor(d(2024, 2, 8)).weekday(), Weekday::Mon);
    }

    #[test]
    fn label_uses_iso_week_and_anchor() {
        assert_eq!(Week::containing(d(2024, 2, 7)).label(), "W6 (05/02/2024)");
        // 2024-12-30 belongs to ISO week 1 of 2025
        assert_eq!(Week::containing(d(2025, 1, 1)).label(), "W1 (30/12/2024)");
    }

    #[test]
    fn range_includes_end_week_and_handles_inverted_bounds() {
        let weeks: Vec<_> = WeekRange::new(d(2024, 2, 7), d(2024, 2, 19))
            .map(|w| w.anchor())
            .collect();
        assert_eq!(weeks, vec![d(2024, 2, 5), d(2024, 2, 12), d(2024, 2, 19)]);

        // End before the Monday anchor of a mid-week start: empty.
        assert_eq!(WeekRange::new(d(2024, 2, 7), d(2024, 2, 4)).count(), 0);
        // End mid-week but after the anchor: one week.
        assert_eq!(WeekRange::new(d(2024, 2, 7), d(2024, 2, 6)).count(), 1);
    }

    #[test]
    fn range_stops_at_calendar_limit() {
        let weeks = WeekRange::new(NaiveDate::MAX, NaiveDate::MAX).count();
        assert_eq!(weeks, 1);
    }
}

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Contract end as read from the roster.
///
/// Values that cannot be read as `Mon.YY` are kept as [`ContractExpiry::NeverExpires`]
/// rather than rejected, so an unusual cell never silently drops a person from the draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContractExpiry {
    Until(NaiveDate),
    NeverExpires,
}

/// Result of reading one expiry cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpiryParse {
    Parsed(NaiveDate),
    Blank,
    Unreadable,
}

impl ExpiryParse {
    pub fn into_expiry(self) -> ContractExpiry {
        match self {
            ExpiryParse::Parsed(date) => ContractExpiry::Until(date),
            ExpiryParse::Blank | ExpiryParse::Unreadable => ContractExpiry::NeverExpires,
        }
    }
}

/// Two-digit years 69-99 fall in the 1900s, 00-68 in the 2000s.
fn century_for(two_digit: i32) -> i32 {
    if two_digit >= 69 {
        1900 + two_digit
    } else {
        2000 + two_digit
    }
}

impl ContractExpiry {
    /// Reads a compact month-year value such as `Sep.25`, anchored on the first of the month.
    pub fn parse(input: &str) -> ExpiryParse {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return ExpiryParse::Blank;
        }
        NaiveDate::parse_from_str(&format!("01.{trimmed}"), "%d.%b.%y")
            .ok()
            .and_then(|date| date.with_year(century_for(date.year() % 100)))
            .map_or(ExpiryParse::Unreadable, ExpiryParse::Parsed)
    }

    pub fn until(date: NaiveDate) -> Self {
        ContractExpiry::Until(date)
    }

    /// Active on `date` when the contract ends on or after it.
    pub fn is_active_on(&self, date: NaiveDate) -> bool {
        match self {
            ContractExpiry::Until(end) => *end >= date,
            ContractExpiry::NeverExpires => true,
        }
    }

    pub fn end_date(&self) -> NaiveDate {
        match self {
            ContractExpiry::Until(end) => *end,
            ContractExpiry::NeverExpires => NaiveDate::MAX,
        }
    }
}

impl fmt::Display for ContractExpiry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContractExpiry::Until(end) => write!(f, "{}", end.format("%b.%y")),
            ContractExpiry::NeverExpires => write!(f, "never"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_month_year_to_first_of_month() {
        let parsed = ContractExpiry::parse("Sep.25");
        assert_eq!(
            parsed,
            ExpiryParse::Parsed(NaiveDate::from_ymd_opt(2025, 9, 1).unwrap())
        );
        assert_eq!(
            ContractExpiry::parse(" jan.30 "),
            ExpiryParse::Parsed(NaiveDate::from_ymd_opt(2030, 1, 1).unwrap())
        );
    }

    #[test]
    fn two_digit_years_split_at_sixty_nine() {
        assert_eq!(
            ContractExpiry::parse("Jan.69"),
            ExpiryParse::Parsed(NaiveDate::from_ymd_opt(1969, 1, 1).unwrap())
        );
        assert_eq!(
            ContractExpiry::parse("Dec.68"),
            ExpiryParse::Parsed(NaiveDate::from_ymd_opt(2068, 12, 1).unwrap())
        );
        assert_eq!(
            ContractExpiry::parse("Mar.99"),
            ExpiryParse::Parsed(NaiveDate::from_ymd_opt(1999, 3, 1).unwrap())
        );
    }

    #[test]
    fn blank_and_garbage_never_expire() {
        assert_eq!(ContractExpiry::parse("  "), ExpiryParse::Blank);
        assert_eq!(ContractExpiry::parse("permanent"), ExpiryParse::Unreadable);
        assert_eq!(ContractExpiry::parse("2025-09-01"), ExpiryParse::Unreadable);
        assert_eq!(
            ContractExpiry::parse("Sept.25").into_expiry(),
            ContractExpiry::NeverExpires
        );
    }

    #[test]
    fn active_through_end_date_inclusive() {
        let end = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let expiry = ContractExpiry::until(end);
        assert!(expiry.is_active_on(end));
        assert!(!expiry.is_active_on(end.succ_opt().unwrap()));
        assert!(ContractExpiry::NeverExpires.is_active_on(NaiveDate::MAX));
        assert_eq!(ContractExpiry::NeverExpires.end_date(), NaiveDate::MAX);
    }
}

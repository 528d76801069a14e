//! Pay conditions and roster days.
//!
//! Both are closed enums so that every resolver has to handle every case at
//! compile time instead of comparing strings at runtime.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// A named category of worked time, each carrying its own rate entry.
///
/// Ordinary conditions (`Base` through `PublicHoliday`) are assigned by the
/// pay-condition resolver. Overtime conditions are only ever assigned by the
/// weekly overtime aggregator.
///
/// # Example
///
/// ```
/// use cleaning_award_engine::models::PayCondition;
/// use std::str::FromStr;
///
/// let condition = PayCondition::from_str("overtime-first-2-hours").unwrap();
/// assert_eq!(condition, PayCondition::OvertimeFirstTwoHours);
/// assert!(condition.is_overtime());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PayCondition {
    /// Ordinary weekday time inside the ordinary band.
    #[serde(rename = "base")]
    Base,
    /// Weekday time before or after the ordinary band.
    #[serde(rename = "shift-early-late")]
    ShiftEarlyLate,
    /// Ordinary time on a Saturday.
    #[serde(rename = "saturday")]
    Saturday,
    /// Ordinary time on a Sunday.
    #[serde(rename = "sunday")]
    Sunday,
    /// Ordinary time on a public holiday.
    #[serde(rename = "public-holiday")]
    PublicHoliday,
    /// The first two hours of overtime per employee.
    #[serde(rename = "overtime-first-2-hours")]
    OvertimeFirstTwoHours,
    /// Overtime beyond the first two hours per employee.
    #[serde(rename = "overtime-after-2-hours")]
    OvertimeAfterTwoHours,
    /// Overtime worked on a Sunday.
    #[serde(rename = "overtime-sunday")]
    OvertimeSunday,
    /// Overtime worked on a public holiday.
    #[serde(rename = "overtime-public-holiday")]
    OvertimePublicHoliday,
}

impl PayCondition {
    /// Every pay condition, in table order.
    pub const ALL: [PayCondition; 9] = [
        PayCondition::Base,
        PayCondition::ShiftEarlyLate,
        PayCondition::Saturday,
        PayCondition::Sunday,
        PayCondition::PublicHoliday,
        PayCondition::OvertimeFirstTwoHours,
        PayCondition::OvertimeAfterTwoHours,
        PayCondition::OvertimeSunday,
        PayCondition::OvertimePublicHoliday,
    ];

    /// Returns the wire name of the condition.
    pub fn as_str(&self) -> &'static str {
        match self {
            PayCondition::Base => "base",
            PayCondition::ShiftEarlyLate => "shift-early-late",
            PayCondition::Saturday => "saturday",
            PayCondition::Sunday => "sunday",
            PayCondition::PublicHoliday => "public-holiday",
            PayCondition::OvertimeFirstTwoHours => "overtime-first-2-hours",
            PayCondition::OvertimeAfterTwoHours => "overtime-after-2-hours",
            PayCondition::OvertimeSunday => "overtime-sunday",
            PayCondition::OvertimePublicHoliday => "overtime-public-holiday",
        }
    }

    /// Returns true for the four overtime conditions.
    pub fn is_overtime(&self) -> bool {
        match self {
            PayCondition::Base
            | PayCondition::ShiftEarlyLate
            | PayCondition::Saturday
            | PayCondition::Sunday
            | PayCondition::PublicHoliday => false,
            PayCondition::OvertimeFirstTwoHours
            | PayCondition::OvertimeAfterTwoHours
            | PayCondition::OvertimeSunday
            | PayCondition::OvertimePublicHoliday => true,
        }
    }
}

impl fmt::Display for PayCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PayCondition {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PayCondition::ALL
            .into_iter()
            .find(|condition| condition.as_str() == s)
            .ok_or_else(|| EngineError::UnknownValue {
                field: "pay condition".to_string(),
                value: s.to_string(),
            })
    }
}

/// The roster day a shift starts on.
///
/// The derived ordering is the order used to walk a rostering week:
/// Monday through Sunday, with public holidays last.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Day {
    /// Monday.
    Monday,
    /// Tuesday.
    Tuesday,
    /// Wednesday.
    Wednesday,
    /// Thursday.
    Thursday,
    /// Friday.
    Friday,
    /// Saturday.
    Saturday,
    /// Sunday.
    Sunday,
    /// A gazetted public holiday, whatever weekday it falls on.
    PublicHoliday,
}

impl Day {
    /// Every roster day, in week order.
    pub const ALL: [Day; 8] = [
        Day::Monday,
        Day::Tuesday,
        Day::Wednesday,
        Day::Thursday,
        Day::Friday,
        Day::Saturday,
        Day::Sunday,
        Day::PublicHoliday,
    ];

    /// Returns the wire name of the day.
    pub fn as_str(&self) -> &'static str {
        match self {
            Day::Monday => "monday",
            Day::Tuesday => "tuesday",
            Day::Wednesday => "wednesday",
            Day::Thursday => "thursday",
            Day::Friday => "friday",
            Day::Saturday => "saturday",
            Day::Sunday => "sunday",
            Day::PublicHoliday => "public-holiday",
        }
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Day {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.to_lowercase();
        Day::ALL
            .into_iter()
            .find(|day| day.as_str() == lowered)
            .ok_or_else(|| EngineError::UnknownValue {
                field: "day".to_string(),
                value: s.to_string(),
            })
    }
}

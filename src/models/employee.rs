//! Employment type, employee level and the cohort they form.
//!
//! A cohort is the unit the weekly overtime aggregator and the broken-shift
//! detector group shifts by.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// Represents the type of employment arrangement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EmploymentType {
    /// Full-time employment (38 ordinary hours per week).
    FullTime,
    /// Part-time employment.
    PartTime,
    /// Casual employment (base rates already include casual loading).
    Casual,
}

impl EmploymentType {
    /// Every employment type.
    pub const ALL: [EmploymentType; 3] = [
        EmploymentType::FullTime,
        EmploymentType::PartTime,
        EmploymentType::Casual,
    ];

    /// Returns the wire name of the employment type.
    pub fn as_str(&self) -> &'static str {
        match self {
            EmploymentType::FullTime => "full-time",
            EmploymentType::PartTime => "part-time",
            EmploymentType::Casual => "casual",
        }
    }
}

impl fmt::Display for EmploymentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EmploymentType {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EmploymentType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| EngineError::UnknownValue {
                field: "employment type".to_string(),
                value: s.to_string(),
            })
    }
}

/// An award classification level, 1 through 4.
///
/// Serialized as a bare integer. Out-of-range values are rejected on
/// construction and on deserialization.
///
/// # Example
///
/// ```
/// use cleaning_award_engine::models::EmployeeLevel;
///
/// let level = EmployeeLevel::new(2).unwrap();
/// assert_eq!(level.get(), 2);
/// assert_eq!(level.to_string(), "level-2");
/// assert!(EmployeeLevel::new(5).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct EmployeeLevel(u8);

impl EmployeeLevel {
    /// The lowest classification level.
    pub const MIN: u8 = 1;
    /// The highest classification level.
    pub const MAX: u8 = 4;

    /// Creates a level, rejecting values outside `1..=4`.
    pub fn new(level: u8) -> Result<Self, EngineError> {
        if (Self::MIN..=Self::MAX).contains(&level) {
            Ok(Self(level))
        } else {
            Err(EngineError::UnknownValue {
                field: "employee level".to_string(),
                value: level.to_string(),
            })
        }
    }

    /// Returns the numeric level.
    pub fn get(&self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for EmployeeLevel {
    type Error = EngineError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        EmployeeLevel::new(value)
    }
}

impl From<EmployeeLevel> for u8 {
    fn from(level: EmployeeLevel) -> Self {
        level.0
    }
}

impl fmt::Display for EmployeeLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "level-{}", self.0)
    }
}

impl FromStr for EmployeeLevel {
    type Err = EngineError;

    /// Accepts either `"2"` or `"level-2"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.strip_prefix("level-").unwrap_or(s);
        let value = digits.parse::<u8>().map_err(|_| EngineError::UnknownValue {
            field: "employee level".to_string(),
            value: s.to_string(),
        })?;
        EmployeeLevel::new(value)
    }
}

/// The (employment type, level) pair shifts are grouped by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CohortKey {
    /// The employment type shared by the cohort.
    pub employment_type: EmploymentType,
    /// The level shared by the cohort.
    pub level: EmployeeLevel,
}

impl CohortKey {
    /// Creates a cohort key.
    pub fn new(employment_type: EmploymentType, level: EmployeeLevel) -> Self {
        Self {
            employment_type,
            level,
        }
    }
}

impl fmt::Display for CohortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.employment_type, self.level)
    }
}

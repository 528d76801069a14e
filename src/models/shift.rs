//! Shift model and related types.
//!
//! A [`Shift`] is one scheduled block of cleaning work on a quote. The engine
//! only ever reads shifts; validation happens through [`Shift::span`].

use std::collections::BTreeSet;

use chrono::NaiveTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::clock::{MINUTES_PER_DAY, hhmm, minute_of_day};
use super::{CohortKey, Day, EmployeeLevel, EmploymentType};
use crate::error::{EngineError, EngineResult};

/// Represents a scheduled cleaning shift.
///
/// Times are clock times on the shift's start day. An `end_time` earlier than
/// `start_time` means the shift runs past midnight into the next day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shift {
    /// Unique identifier for the shift.
    pub id: String,
    /// The roster day the shift starts on.
    pub day: Day,
    /// The clock time the shift starts (`HH:MM`).
    #[serde(with = "hhmm")]
    pub start_time: NaiveTime,
    /// The clock time the shift ends (`HH:MM`).
    #[serde(with = "hhmm")]
    pub end_time: NaiveTime,
    /// Unpaid break taken during the shift, in minutes.
    #[serde(default)]
    pub break_duration_minutes: u32,
    /// Number of cleaners working the shift in parallel.
    pub number_of_cleaners: u32,
    /// The employment type of the cleaners.
    pub employment_type: EmploymentType,
    /// The award level of the cleaners.
    pub level: EmployeeLevel,
    /// Allowance codes claimed on this shift.
    #[serde(default)]
    pub allowances: BTreeSet<String>,
    /// Free-text site location.
    #[serde(default)]
    pub location: String,
    /// Free-text notes.
    #[serde(default)]
    pub notes: String,
}

/// The validated clock span of a shift on its start day's timeline.
///
/// `end_minute` may exceed one day when the shift crosses midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShiftSpan {
    /// Minute of the start day the shift begins.
    pub start_minute: u32,
    /// Minute the shift ends, measured from the start day's midnight.
    pub end_minute: u32,
    /// Unpaid break minutes inside the span.
    pub break_minutes: u32,
}

impl ShiftSpan {
    /// Clock minutes between start and end, breaks included.
    pub fn duration_minutes(&self) -> u32 {
        self.end_minute - self.start_minute
    }

    /// Paid minutes: the clock span less the unpaid break.
    pub fn worked_minutes(&self) -> u32 {
        self.duration_minutes() - self.break_minutes
    }

    /// Returns true if the span runs past midnight of the start day.
    pub fn crosses_midnight(&self) -> bool {
        self.end_minute > MINUTES_PER_DAY
    }
}

impl Shift {
    /// Validates the shift and returns its clock span.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidShift`] when:
    /// - `number_of_cleaners` is zero
    /// - `end_time` equals `start_time` (no valid interpretation)
    /// - the break is longer than the shift
    ///
    /// # Example
    ///
    /// ```
    /// use cleaning_award_engine::models::{Day, EmployeeLevel, EmploymentType, Shift};
    /// use chrono::NaiveTime;
    ///
    /// let shift = Shift {
    ///     id: "shift_001".to_string(),
    ///     day: Day::Friday,
    ///     start_time: NaiveTime::from_hms_opt(22, 0, 0).unwrap(),
    ///     end_time: NaiveTime::from_hms_opt(2, 0, 0).unwrap(),
    ///     break_duration_minutes: 0,
    ///     number_of_cleaners: 1,
    ///     employment_type: EmploymentType::Casual,
    ///     level: EmployeeLevel::new(1).unwrap(),
    ///     allowances: Default::default(),
    ///     location: String::new(),
    ///     notes: String::new(),
    /// };
    ///
    /// let span = shift.span().unwrap();
    /// assert!(span.crosses_midnight());
    /// assert_eq!(span.worked_minutes(), 240);
    /// ```
    pub fn span(&self) -> EngineResult<ShiftSpan> {
        if self.number_of_cleaners == 0 {
            return Err(EngineError::invalid_shift(
                &self.id,
                "number of cleaners must be at least 1",
            ));
        }

        let start_minute = minute_of_day(self.start_time);
        let mut end_minute = minute_of_day(self.end_time);
        if end_minute < start_minute {
            end_minute += MINUTES_PER_DAY;
        }
        if end_minute <= start_minute {
            return Err(EngineError::invalid_shift(
                &self.id,
                format!(
                    "end time {} must differ from start time {}",
                    self.end_time.format("%H:%M"),
                    self.start_time.format("%H:%M")
                ),
            ));
        }

        let duration = end_minute - start_minute;
        if self.break_duration_minutes > duration {
            return Err(EngineError::invalid_shift(
                &self.id,
                format!(
                    "break of {} minutes exceeds shift length of {} minutes",
                    self.break_duration_minutes, duration
                ),
            ));
        }

        Ok(ShiftSpan {
            start_minute,
            end_minute,
            break_minutes: self.break_duration_minutes,
        })
    }

    /// Returns the paid minutes of one cleaner on this shift.
    pub fn worked_minutes(&self) -> EngineResult<u32> {
        self.span().map(|span| span.worked_minutes())
    }

    /// Returns the paid hours of one cleaner on this shift.
    pub fn worked_hours(&self) -> EngineResult<Decimal> {
        Ok(Decimal::from(self.worked_minutes()?) / Decimal::from(60))
    }

    /// Returns the cohort this shift belongs to.
    pub fn cohort(&self) -> CohortKey {
        CohortKey::new(self.employment_type, self.level)
    }
}

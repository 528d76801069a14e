//! Core data models for the award cost engine.
//!
//! This module contains all the domain models used throughout the engine.

mod allowance;
mod calculation_result;
mod clock;
mod employee;
mod pay_condition;
mod rates;
mod settings;
mod shift;

pub use allowance::{Allowance, AllowanceTable, AllowanceUnit};
pub use calculation_result::{
    AllowanceCharge, BrokenShift, CohortOvertime, ConditionSegment, OvertimeReport, QuoteCosts,
    QuoteTotals, SegmentCost, ShiftCost,
};
pub use clock::{MINUTES_PER_DAY, minute_of_day};
pub use employee::{CohortKey, EmployeeLevel, EmploymentType};
pub use pay_condition::{Day, PayCondition};
pub use rates::{EmployeeLevelRates, OrdinaryBand, RateEntry, RateTable};
pub use settings::{
    AwardSettings, MAX_BASE_RATE_MULTIPLIER, MIN_BASE_RATE_MULTIPLIER, SettingsUpdate,
    validate_base_rate_multiplier,
};
pub use shift::{Shift, ShiftSpan};

#[cfg(test)]
pub(crate) use rates::test_support;

//! Error types for the award cost engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for every condition the engine can reject. Errors fall into two families,
//! exposed through [`EngineError::kind`]: malformed input ([`ErrorKind::Validation`])
//! and broken rate tables or settings ([`ErrorKind::Configuration`]).

use chrono::NaiveDate;
use thiserror::Error;

use crate::models::{EmployeeLevel, EmploymentType, PayCondition};

/// The family an [`EngineError`] belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The caller supplied a malformed shift or value.
    Validation,
    /// The rate table, allowance table or settings are unusable.
    Configuration,
}

/// The main error type for the award cost engine.
///
/// # Example
///
/// ```
/// use cleaning_award_engine::error::{EngineError, ErrorKind};
///
/// let error = EngineError::InvalidShift {
///     shift_id: "shift_001".to_string(),
///     message: "end time must be after start time".to_string(),
/// };
/// assert_eq!(
///     error.to_string(),
///     "Invalid shift 'shift_001': end time must be after start time"
/// );
/// assert_eq!(error.kind(), ErrorKind::Validation);
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// A shift was invalid or contained inconsistent data.
    #[error("Invalid shift '{shift_id}': {message}")]
    InvalidShift {
        /// The ID of the invalid shift.
        shift_id: String,
        /// A description of what made the shift invalid.
        message: String,
    },

    /// A value could not be parsed into one of the engine's closed types.
    #[error("Unknown {field}: '{value}'")]
    UnknownValue {
        /// The kind of value (e.g. "pay condition", "day").
        field: String,
        /// The rejected input.
        value: String,
    },

    /// A shift referenced an allowance code that is not in the allowance table.
    #[error("Unknown allowance '{code}' on shift '{shift_id}'")]
    UnknownAllowance {
        /// The ID of the shift referencing the allowance.
        shift_id: String,
        /// The allowance code that was not found.
        code: String,
    },

    /// A settings field other than the multiplier was out of range.
    #[error("Invalid setting '{field}': {message}")]
    InvalidSettings {
        /// The settings field that was rejected.
        field: String,
        /// A description of the accepted range.
        message: String,
    },

    /// The global base-rate multiplier was outside its permitted bounds.
    #[error("Base rate multiplier {value} is outside the permitted range [0.5, 2.0]")]
    MultiplierOutOfBounds {
        /// The rejected multiplier.
        value: rust_decimal::Decimal,
    },

    /// A rate table entry set was missing at least one pay condition.
    #[error("Rate table for {employment_type} {level} is missing pay condition '{missing}'")]
    IncompleteRateTable {
        /// The employment type of the incomplete entry set.
        employment_type: EmploymentType,
        /// The level of the incomplete entry set.
        level: EmployeeLevel,
        /// The first missing pay condition.
        missing: PayCondition,
    },

    /// A rate entry violated the table invariants.
    #[error("Invalid rate for {employment_type} {level} '{pay_condition}': {message}")]
    InvalidRateEntry {
        /// The employment type of the offending entry.
        employment_type: EmploymentType,
        /// The level of the offending entry.
        level: EmployeeLevel,
        /// The pay condition of the offending entry.
        pay_condition: PayCondition,
        /// A description of the violated invariant.
        message: String,
    },

    /// The ordinary-hours band was empty or inverted.
    #[error("Invalid ordinary band {start}-{end}: start must be before end")]
    InvalidOrdinaryBand {
        /// The configured band start.
        start: chrono::NaiveTime,
        /// The configured band end.
        end: chrono::NaiveTime,
    },

    /// The rate table has no rates for a cohort.
    #[error("No rates found for {employment_type} {level}")]
    RatesNotFound {
        /// The employment type that was looked up.
        employment_type: EmploymentType,
        /// The level that was looked up.
        level: EmployeeLevel,
    },

    /// No rate table version is effective on the requested date.
    #[error("No rate table effective on {date}")]
    RateTableNotFound {
        /// The date for which a table was requested.
        date: NaiveDate,
    },

    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },
}

impl EngineError {
    /// Returns the error family this error belongs to.
    pub fn kind(&self) -> ErrorKind {
        match self {
            EngineError::InvalidShift { .. }
            | EngineError::UnknownValue { .. }
            | EngineError::UnknownAllowance { .. }
            | EngineError::InvalidSettings { .. } => ErrorKind::Validation,
            EngineError::MultiplierOutOfBounds { .. }
            | EngineError::IncompleteRateTable { .. }
            | EngineError::InvalidRateEntry { .. }
            | EngineError::InvalidOrdinaryBand { .. }
            | EngineError::RatesNotFound { .. }
            | EngineError::RateTableNotFound { .. }
            | EngineError::ConfigNotFound { .. }
            | EngineError::ConfigParseError { .. } => ErrorKind::Configuration,
        }
    }

    pub(crate) fn invalid_shift(shift_id: &str, message: impl Into<String>) -> Self {
        EngineError::InvalidShift {
            shift_id: shift_id.to_string(),
            message: message.into(),
        }
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

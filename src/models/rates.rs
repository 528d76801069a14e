//! The award rate table model.
//!
//! A [`RateTable`] is one effective-dated version of the award: for every
//! (employment type, level) pair it holds a [`RateEntry`] per [`PayCondition`],
//! plus the ordinary band that separates `base` from `shift-early-late` time.

use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::clock::{hhmm, minute_of_day};
use super::{EmployeeLevel, EmploymentType, PayCondition};
use crate::error::{EngineError, EngineResult};

/// One pay condition's rate for a cohort.
///
/// `base_rate` is the cohort's ordinary hourly rate; `multiplier` is relative
/// to it. The payable hourly rate is their product.
///
/// # Example
///
/// ```
/// use cleaning_award_engine::models::{PayCondition, RateEntry};
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let entry = RateEntry {
///     pay_condition: PayCondition::Saturday,
///     base_rate: Decimal::from_str("25.85").unwrap(),
///     multiplier: Decimal::from_str("1.5").unwrap(),
/// };
/// assert_eq!(entry.hourly_rate(), Decimal::from_str("38.775").unwrap());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateEntry {
    /// The pay condition this entry prices.
    pub pay_condition: PayCondition,
    /// The ordinary hourly rate the multiplier applies to.
    pub base_rate: Decimal,
    /// The multiplier relative to `base_rate`.
    pub multiplier: Decimal,
}

impl RateEntry {
    /// Returns the payable hourly rate (`base_rate * multiplier`).
    pub fn hourly_rate(&self) -> Decimal {
        self.base_rate * self.multiplier
    }
}

/// All rate entries for one (employment type, level) cohort.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeLevelRates {
    /// The award level.
    pub level: EmployeeLevel,
    /// The employment type.
    pub employment_type: EmploymentType,
    /// One entry per pay condition.
    pub rates: BTreeMap<PayCondition, RateEntry>,
}

impl EmployeeLevelRates {
    /// Returns the entry for a pay condition.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::IncompleteRateTable`] if the entry is missing.
    pub fn entry(&self, pay_condition: PayCondition) -> EngineResult<&RateEntry> {
        self.rates
            .get(&pay_condition)
            .ok_or(EngineError::IncompleteRateTable {
                employment_type: self.employment_type,
                level: self.level,
                missing: pay_condition,
            })
    }

    /// Checks the entry set is complete and every entry obeys the table invariants.
    pub fn validate(&self) -> EngineResult<()> {
        for condition in PayCondition::ALL {
            let entry = self.entry(condition)?;
            let invalid = |message: &str| EngineError::InvalidRateEntry {
                employment_type: self.employment_type,
                level: self.level,
                pay_condition: condition,
                message: message.to_string(),
            };

            if entry.pay_condition != condition {
                return Err(invalid("entry is filed under the wrong pay condition"));
            }
            if entry.base_rate < Decimal::ZERO {
                return Err(invalid("base rate must not be negative"));
            }
            match condition {
                PayCondition::Base => {
                    if entry.multiplier != Decimal::ONE {
                        return Err(invalid("base multiplier must be exactly 1.0"));
                    }
                }
                _ => {
                    if entry.multiplier < Decimal::ONE {
                        return Err(invalid("multiplier must be at least 1.0"));
                    }
                }
            }
        }
        Ok(())
    }
}

/// The clock band of ordinary weekday time.
///
/// Weekday minutes inside `[start, end)` are `base`; minutes outside are
/// `shift-early-late`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrdinaryBand {
    /// Start of the band (`HH:MM`).
    #[serde(with = "hhmm")]
    pub start: NaiveTime,
    /// End of the band (`HH:MM`).
    #[serde(with = "hhmm")]
    pub end: NaiveTime,
}

impl OrdinaryBand {
    /// Minute of the day the band starts.
    pub fn start_minute(&self) -> u32 {
        minute_of_day(self.start)
    }

    /// Minute of the day the band ends.
    pub fn end_minute(&self) -> u32 {
        minute_of_day(self.end)
    }

    /// Rejects empty or inverted bands.
    pub fn validate(&self) -> EngineResult<()> {
        if self.start_minute() >= self.end_minute() {
            return Err(EngineError::InvalidOrdinaryBand {
                start: self.start,
                end: self.end,
            });
        }
        Ok(())
    }
}

impl Default for OrdinaryBand {
    /// 06:00 to 18:00.
    fn default() -> Self {
        Self {
            start: NaiveTime::from_hms_opt(6, 0, 0).expect("Valid band start"),
            end: NaiveTime::from_hms_opt(18, 0, 0).expect("Valid band end"),
        }
    }
}

/// One effective-dated version of the award rate table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateTable {
    /// The date this version takes effect.
    pub effective_date: NaiveDate,
    /// The ordinary weekday band.
    #[serde(default)]
    pub ordinary_band: OrdinaryBand,
    /// Rates per cohort.
    pub levels: Vec<EmployeeLevelRates>,
}

impl RateTable {
    /// Creates a validated rate table.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the band is invalid or any cohort's
    /// entry set is incomplete or breaks an entry invariant.
    pub fn new(
        effective_date: NaiveDate,
        ordinary_band: OrdinaryBand,
        levels: Vec<EmployeeLevelRates>,
    ) -> EngineResult<Self> {
        let table = Self {
            effective_date,
            ordinary_band,
            levels,
        };
        table.validate()?;
        Ok(table)
    }

    /// Validates the band and every cohort's entries.
    pub fn validate(&self) -> EngineResult<()> {
        self.ordinary_band.validate()?;
        self.levels.iter().try_for_each(EmployeeLevelRates::validate)
    }

    /// Returns the rates for a cohort.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::RatesNotFound`] if the table has no such cohort.
    pub fn rates_for(
        &self,
        employment_type: EmploymentType,
        level: EmployeeLevel,
    ) -> EngineResult<&EmployeeLevelRates> {
        self.levels
            .iter()
            .find(|rates| rates.employment_type == employment_type && rates.level == level)
            .ok_or(EngineError::RatesNotFound {
                employment_type,
                level,
            })
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::*;

    #[test]
    fn test_valid_table_passes_validation() {
        let table = test_rate_table();
        assert!(table.validate().is_ok());
        assert_eq!(table.levels.len(), 3);
    }

    #[test]
    fn test_missing_condition_is_incomplete() {
        let mut rates = level_rates(EmploymentType::FullTime, 1, "25.85");
        rates.rates.remove(&PayCondition::OvertimeSunday);
        match rates.validate() {
            Err(EngineError::IncompleteRateTable { missing, .. }) => {
                assert_eq!(missing, PayCondition::OvertimeSunday);
            }
            other => panic!("Expected IncompleteRateTable, got {:?}", other),
        }
    }

    #[test]
    fn test_base_multiplier_must_be_one() {
        let mut rates = level_rates(EmploymentType::FullTime, 1, "25.85");
        rates
            .rates
            .get_mut(&PayCondition::Base)
            .unwrap()
            .multiplier = dec("1.1");
        assert!(matches!(
            rates.validate(),
            Err(EngineError::InvalidRateEntry {
                pay_condition: PayCondition::Base,
                ..
            })
        ));
    }

    #[test]
    fn test_penalty_multiplier_below_one_is_rejected() {
        let mut rates = level_rates(EmploymentType::Casual, 1, "32.31");
        rates
            .rates
            .get_mut(&PayCondition::Saturday)
            .unwrap()
            .multiplier = dec("0.9");
        assert!(rates.validate().is_err());
    }

    #[test]
    fn test_negative_base_rate_is_rejected() {
        let rates = level_rates(EmploymentType::FullTime, 1, "-1.00");
        assert!(rates.validate().is_err());
    }

    #[test]
    fn test_misfiled_entry_is_rejected() {
        let mut rates = level_rates(EmploymentType::FullTime, 1, "25.85");
        rates
            .rates
            .get_mut(&PayCondition::Sunday)
            .unwrap()
            .pay_condition = PayCondition::Saturday;
        assert!(rates.validate().is_err());
    }

    #[test]
    fn test_rates_for_unknown_cohort() {
        let table = test_rate_table();
        let result = table.rates_for(EmploymentType::PartTime, EmployeeLevel::new(3).unwrap());
        assert!(matches!(result, Err(EngineError::RatesNotFound { .. })));
    }

    #[test]
    fn test_inverted_band_is_rejected() {
        let band = OrdinaryBand {
            start: NaiveTime::from_hms_opt(18, 0, 0).unwrap(),
            end: NaiveTime::from_hms_opt(6, 0, 0).unwrap(),
        };
        assert!(band.validate().is_err());
    }

    #[test]
    fn test_default_band_minutes() {
        let band = OrdinaryBand::default();
        assert_eq!(band.start_minute(), 360);
        assert_eq!(band.end_minute(), 1080);
    }
}

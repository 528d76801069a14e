//! Configuration types for the award rate data.
//!
//! This module contains the strongly-typed structures deserialized from the
//! YAML files of an award directory, and the assembled [`AwardConfig`].

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::error::{EngineError, EngineResult};
use crate::models::{
    Allowance, AllowanceTable, AwardSettings, EmployeeLevelRates, EmploymentType, OrdinaryBand,
    PayCondition, RateEntry, RateTable,
};

/// Metadata about the award.
///
/// Contains identifying information about the award, including its
/// Fair Work code, name, version and source URL, plus the ordinary band
/// every rate table version shares.
#[derive(Debug, Clone, Deserialize)]
pub struct AwardMetadata {
    /// The Fair Work award code (e.g., "MA000022").
    pub code: String,
    /// The human-readable name of the award.
    pub name: String,
    /// The version of the award data.
    pub version: String,
    /// URL to the official award documentation.
    pub source_url: String,
    /// The weekday band of ordinary hours.
    #[serde(default)]
    pub ordinary_band: OrdinaryBand,
}

/// Rates for one employment type in a rate file.
///
/// Multipliers are shared by every level; base rates are per level.
#[derive(Debug, Clone, Deserialize)]
pub struct EmploymentTypeRates {
    /// Multiplier per pay condition.
    pub multipliers: BTreeMap<PayCondition, Decimal>,
    /// Ordinary hourly rate per level.
    pub base_rates: BTreeMap<u8, Decimal>,
}

/// One `rates/*.yaml` file.
#[derive(Debug, Clone, Deserialize)]
pub struct RateFile {
    /// The effective date for these rates.
    pub effective_date: NaiveDate,
    /// Rates keyed by employment type.
    pub employment_types: BTreeMap<EmploymentType, EmploymentTypeRates>,
}

impl RateFile {
    /// Expands the file into a complete, validated [`RateTable`].
    ///
    /// Every level of an employment type gets one entry per listed multiplier.
    /// A multiplier missing from the file surfaces as
    /// [`EngineError::IncompleteRateTable`].
    pub fn into_rate_table(self, ordinary_band: OrdinaryBand) -> EngineResult<RateTable> {
        let mut levels = Vec::new();
        for (employment_type, type_rates) in self.employment_types {
            for (level, base_rate) in type_rates.base_rates {
                let rates = type_rates
                    .multipliers
                    .iter()
                    .map(|(&pay_condition, &multiplier)| {
                        (
                            pay_condition,
                            RateEntry {
                                pay_condition,
                                base_rate,
                                multiplier,
                            },
                        )
                    })
                    .collect();
                levels.push(EmployeeLevelRates {
                    level: level.try_into()?,
                    employment_type,
                    rates,
                });
            }
        }
        RateTable::new(self.effective_date, ordinary_band, levels)
    }
}

/// Allowances configuration file structure.
#[derive(Debug, Clone, Deserialize)]
pub struct AllowancesConfig {
    /// The flat allowances.
    pub allowances: Vec<Allowance>,
}

/// The complete award configuration loaded from YAML files.
///
/// This struct aggregates all configuration loaded from the various
/// YAML files in an award configuration directory.
#[derive(Debug, Clone)]
pub struct AwardConfig {
    /// Award metadata.
    metadata: AwardMetadata,
    /// Rate table versions (sorted oldest first).
    rate_tables: Vec<RateTable>,
    /// Flat allowances.
    allowances: AllowanceTable,
    /// Global settings.
    settings: AwardSettings,
}

impl AwardConfig {
    /// Creates a new AwardConfig from its component parts.
    pub fn new(
        metadata: AwardMetadata,
        rate_tables: Vec<RateTable>,
        allowances: AllowanceTable,
        settings: AwardSettings,
    ) -> Self {
        let mut sorted_tables = rate_tables;
        sorted_tables.sort_by(|a, b| a.effective_date.cmp(&b.effective_date));
        Self {
            metadata,
            rate_tables: sorted_tables,
            allowances,
            settings,
        }
    }

    /// Returns the award metadata.
    pub fn award(&self) -> &AwardMetadata {
        &self.metadata
    }

    /// Returns all rate table versions, oldest first.
    pub fn rate_tables(&self) -> &[RateTable] {
        &self.rate_tables
    }

    /// Returns the most recent rate table effective on or before `date`.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::RateTableNotFound`] if every version starts after `date`.
    pub fn rate_table(&self, date: NaiveDate) -> EngineResult<&RateTable> {
        self.rate_tables
            .iter()
            .rev()
            .find(|table| table.effective_date <= date)
            .ok_or(EngineError::RateTableNotFound { date })
    }

    /// Returns the allowance table.
    pub fn allowances(&self) -> &AllowanceTable {
        &self.allowances
    }

    /// Returns the global settings.
    pub fn settings(&self) -> &AwardSettings {
        &self.settings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::EmployeeLevel;

    const RATE_FILE: &str = r#"
effective_date: 2025-07-01
employment_types:
  casual:
    multipliers:
      base: "1.0"
      shift-early-late: "1.12"
      saturday: "1.4"
      sunday: "1.8"
      public-holiday: "2.2"
      overtime-first-2-hours: "1.4"
      overtime-after-2-hours: "1.8"
      overtime-sunday: "1.8"
      overtime-public-holiday: "2.2"
    base_rates:
      1: "32.31"
      2: "33.44"
"#;

    #[test]
    fn test_rate_file_expands_to_every_level() {
        let file: RateFile = serde_yaml::from_str(RATE_FILE).unwrap();
        let table = file.into_rate_table(OrdinaryBand::default()).unwrap();

        assert_eq!(table.levels.len(), 2);
        let rates = table
            .rates_for(EmploymentType::Casual, EmployeeLevel::new(2).unwrap())
            .unwrap();
        let saturday = rates.entry(PayCondition::Saturday).unwrap();
        assert_eq!(saturday.base_rate, Decimal::new(3344, 2));
        assert_eq!(saturday.multiplier, Decimal::new(14, 1));
    }

    #[test]
    fn test_missing_multiplier_is_incomplete() {
        let yaml = RATE_FILE.replace("      overtime-sunday: \"1.8\"\n", "");
        let file: RateFile = serde_yaml::from_str(&yaml).unwrap();
        assert!(matches!(
            file.into_rate_table(OrdinaryBand::default()),
            Err(EngineError::IncompleteRateTable {
                missing: PayCondition::OvertimeSunday,
                ..
            })
        ));
    }

    #[test]
    fn test_level_out_of_range_is_rejected() {
        let yaml = RATE_FILE.replace("      2: \"33.44\"", "      9: \"33.44\"");
        let file: RateFile = serde_yaml::from_str(&yaml).unwrap();
        assert!(matches!(
            file.into_rate_table(OrdinaryBand::default()),
            Err(EngineError::UnknownValue { .. })
        ));
    }

    #[test]
    fn test_unknown_pay_condition_fails_to_parse() {
        let yaml = RATE_FILE.replace("saturday:", "caturday:");
        assert!(serde_yaml::from_str::<RateFile>(&yaml).is_err());
    }
}

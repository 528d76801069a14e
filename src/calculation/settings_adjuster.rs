//! Settings adjuster.
//!
//! Produces the effective rate table by scaling every base rate by the global
//! base-rate multiplier. Multipliers are relative and are left unchanged. The
//! canonical table is never mutated; a fresh table is returned.

use rust_decimal::Decimal;
use tracing::debug;

use crate::error::EngineResult;
use crate::models::{AwardSettings, RateTable, validate_base_rate_multiplier};

/// Applies the settings' base-rate multiplier to a rate table.
///
/// # Errors
///
/// Returns [`EngineError::MultiplierOutOfBounds`](crate::error::EngineError::MultiplierOutOfBounds)
/// if the multiplier is outside `[0.5, 2.0]`, or any configuration error the
/// input table fails validation with.
///
/// # Example
///
/// ```
/// use cleaning_award_engine::calculation::apply_settings_multiplier;
/// use cleaning_award_engine::models::{
///     AwardSettings, EmployeeLevelRates, EmployeeLevel, EmploymentType, OrdinaryBand,
///     PayCondition, RateEntry, RateTable,
/// };
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let rates = PayCondition::ALL
///     .into_iter()
///     .map(|pc| (pc, RateEntry {
///         pay_condition: pc,
///         base_rate: Decimal::from_str("20.00").unwrap(),
///         multiplier: Decimal::ONE,
///     }))
///     .collect();
/// let table = RateTable::new(
///     NaiveDate::from_ymd_opt(2025, 7, 1).unwrap(),
///     OrdinaryBand::default(),
///     vec![EmployeeLevelRates {
///         level: EmployeeLevel::new(1).unwrap(),
///         employment_type: EmploymentType::FullTime,
///         rates,
///     }],
/// )
/// .unwrap();
///
/// let settings = AwardSettings {
///     base_rate_multiplier: Decimal::from_str("1.5").unwrap(),
///     ..Default::default()
/// };
/// let effective = apply_settings_multiplier(&table, &settings).unwrap();
/// let entry = &effective.levels[0].rates[&PayCondition::Base];
/// assert_eq!(entry.base_rate, Decimal::from_str("30.00").unwrap());
/// ```
pub fn apply_settings_multiplier(
    table: &RateTable,
    settings: &AwardSettings,
) -> EngineResult<RateTable> {
    apply_base_rate_multiplier(table, settings.base_rate_multiplier)
}

/// Scales every base rate in `table` by `multiplier`.
///
/// Base rates are not rounded, so applying `m1` then `m2` gives exactly the
/// same table as applying `m1 * m2` once.
pub fn apply_base_rate_multiplier(table: &RateTable, multiplier: Decimal) -> EngineResult<RateTable> {
    validate_base_rate_multiplier(multiplier)?;
    table.validate()?;

    let mut effective = table.clone();
    for level_rates in &mut effective.levels {
        for entry in level_rates.rates.values_mut() {
            entry.base_rate *= multiplier;
        }
    }

    debug!(
        effective_date = %table.effective_date,
        multiplier = %multiplier,
        cohorts = effective.levels.len(),
        "Applied base rate multiplier"
    );

    Ok(effective)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;
    use crate::models::test_support::{dec, test_rate_table};
    use crate::models::{EmployeeLevel, EmploymentType, PayCondition};

    fn settings_with(multiplier: &str) -> AwardSettings {
        AwardSettings {
            base_rate_multiplier: dec(multiplier),
            ..Default::default()
        }
    }

    #[test]
    fn test_multiplier_of_one_is_identity() {
        let table = test_rate_table();
        let effective = apply_settings_multiplier(&table, &settings_with("1.0")).unwrap();
        assert_eq!(effective, table);
    }

    #[test]
    fn test_base_rates_scale_and_multipliers_do_not() {
        let table = test_rate_table();
        let effective = apply_settings_multiplier(&table, &settings_with("1.1")).unwrap();

        let rates = effective
            .rates_for(EmploymentType::FullTime, EmployeeLevel::new(1).unwrap())
            .unwrap();
        let saturday = rates.entry(PayCondition::Saturday).unwrap();
        assert_eq!(saturday.base_rate, dec("28.435"));
        assert_eq!(saturday.multiplier, dec("1.5"));
    }

    #[test]
    fn test_canonical_table_is_not_mutated() {
        let table = test_rate_table();
        let snapshot = table.clone();
        let _ = apply_settings_multiplier(&table, &settings_with("2.0")).unwrap();
        assert_eq!(table, snapshot);
    }

    #[test]
    fn test_successive_multipliers_compose() {
        let table = test_rate_table();
        let twice = apply_base_rate_multiplier(
            &apply_base_rate_multiplier(&table, dec("1.2")).unwrap(),
            dec("1.5"),
        )
        .unwrap();
        let once = apply_base_rate_multiplier(&table, dec("1.8")).unwrap();
        assert_eq!(twice, once);
    }

    #[test]
    fn test_out_of_bounds_multiplier_is_configuration_error() {
        let table = test_rate_table();
        for value in ["0.4", "2.5", "0"] {
            let result = apply_settings_multiplier(&table, &settings_with(value));
            assert!(
                matches!(result, Err(EngineError::MultiplierOutOfBounds { .. })),
                "{} should be rejected",
                value
            );
        }
    }

    #[test]
    fn test_incomplete_table_is_rejected() {
        let mut table = test_rate_table();
        table.levels[0].rates.remove(&PayCondition::PublicHoliday);
        let result = apply_settings_multiplier(&table, &settings_with("1.0"));
        assert!(matches!(
            result,
            Err(EngineError::IncompleteRateTable {
                missing: PayCondition::PublicHoliday,
                ..
            })
        ));
    }
}

//! Shift cost calculation.
//!
//! Prices one shift against an effective rate table: every resolved segment is
//! charged at its pay condition's hourly rate for every cleaner, then claimed
//! allowances are added. Only the final total is rounded.

use rust_decimal::{Decimal, RoundingStrategy};
use tracing::debug;

use crate::error::{EngineError, EngineResult};
use crate::models::{
    AllowanceCharge, AllowanceTable, AllowanceUnit, RateTable, SegmentCost, Shift, ShiftCost,
    ShiftSpan,
};

use super::resolve_pay_conditions;

/// Rounds a money amount half-up (away from zero) to cents.
///
/// # Example
///
/// ```
/// use cleaning_award_engine::calculation::round_money;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// assert_eq!(
///     round_money(Decimal::from_str("214.555").unwrap()),
///     Decimal::from_str("214.56").unwrap()
/// );
/// ```
pub fn round_money(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Computes the cost of one shift.
///
/// `effective_rates` must already carry the base-rate multiplier (see
/// [`apply_settings_multiplier`](super::apply_settings_multiplier)); its
/// ordinary band drives the weekday split.
///
/// # Errors
///
/// - [`EngineError::InvalidShift`] if the shift is malformed
/// - [`EngineError::RatesNotFound`] if the table has no rates for the shift's cohort
/// - [`EngineError::UnknownAllowance`] if the shift claims an unconfigured allowance
///
/// # Example
///
/// ```
/// use cleaning_award_engine::calculation::compute_shift_cost;
/// use cleaning_award_engine::models::{
///     AllowanceTable, Day, EmployeeLevel, EmployeeLevelRates, EmploymentType, OrdinaryBand,
///     PayCondition, RateEntry, RateTable, Shift,
/// };
/// use chrono::{NaiveDate, NaiveTime};
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let rates = PayCondition::ALL
///     .into_iter()
///     .map(|pc| (pc, RateEntry {
///         pay_condition: pc,
///         base_rate: Decimal::from_str("25.85").unwrap(),
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
/// let shift = Shift {
///     id: "shift_001".to_string(),
///     day: Day::Monday,
///     start_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
///     end_time: NaiveTime::from_hms_opt(17, 0, 0).unwrap(),
///     break_duration_minutes: 0,
///     number_of_cleaners: 1,
///     employment_type: EmploymentType::FullTime,
///     level: EmployeeLevel::new(1).unwrap(),
///     allowances: Default::default(),
///     location: String::new(),
///     notes: String::new(),
/// };
///
/// let cost = compute_shift_cost(&shift, &table, &AllowanceTable::default()).unwrap();
/// assert_eq!(cost.estimated_cost, Decimal::from_str("206.80").unwrap());
/// ```
pub fn compute_shift_cost(
    shift: &Shift,
    effective_rates: &RateTable,
    allowances: &AllowanceTable,
) -> EngineResult<ShiftCost> {
    let span = shift.span()?;
    let rates = effective_rates.rates_for(shift.employment_type, shift.level)?;
    let segments = resolve_pay_conditions(shift, &effective_rates.ordinary_band)?;
    let cleaners = shift.number_of_cleaners;

    let breakdown = segments
        .iter()
        .map(|segment| {
            let hourly_rate = rates.entry(segment.pay_condition)?.hourly_rate();
            Ok(SegmentCost {
                pay_condition: segment.pay_condition,
                minutes: segment.minutes,
                hourly_rate,
                cleaners,
                amount: hourly_rate * Decimal::from(segment.minutes) * Decimal::from(cleaners)
                    / Decimal::from(60),
            })
        })
        .collect::<EngineResult<Vec<_>>>()?;

    let allowance_charges = shift
        .allowances
        .iter()
        .map(|code| {
            let allowance = allowances
                .get(code)
                .ok_or_else(|| EngineError::UnknownAllowance {
                    shift_id: shift.id.clone(),
                    code: code.clone(),
                })?;
            let units = allowance_units(allowance.unit, &span);
            Ok(AllowanceCharge {
                code: allowance.code.clone(),
                name: allowance.name.clone(),
                unit: allowance.unit,
                units,
                rate: allowance.amount,
                cleaners,
                amount: allowance.amount * units * Decimal::from(cleaners),
            })
        })
        .collect::<EngineResult<Vec<_>>>()?;

    let total: Decimal = breakdown
        .iter()
        .map(|line| line.amount)
        .chain(allowance_charges.iter().map(|charge| charge.amount))
        .sum();
    let estimated_cost = round_money(total);

    debug!(
        shift_id = %shift.id,
        cohort = %shift.cohort(),
        cleaners,
        worked_minutes = span.worked_minutes(),
        estimated_cost = %estimated_cost,
        "Computed shift cost"
    );

    Ok(ShiftCost {
        shift_id: shift.id.clone(),
        worked_minutes: span.worked_minutes(),
        estimated_cost,
        breakdown,
        allowances: allowance_charges,
    })
}

/// Units of an allowance one cleaner earns on a shift.
fn allowance_units(unit: AllowanceUnit, span: &ShiftSpan) -> Decimal {
    match unit {
        AllowanceUnit::PerShift => Decimal::ONE,
        AllowanceUnit::PerHour => Decimal::from(span.worked_minutes()) / Decimal::from(60),
        AllowanceUnit::PerDay => {
            if span.crosses_midnight() {
                Decimal::TWO
            } else {
                Decimal::ONE
            }
        }
    }
}

//! Weekly overtime aggregation.
//!
//! Shifts are grouped by cohort (employment type and level) and their
//! person-hours summed across the roster week. A cohort's ordinary capacity is
//! [`WEEKLY_ORDINARY_HOURS`] per head, where the headcount is the largest
//! `number_of_cleaners` seen on any of its shifts. Person-hours past that
//! capacity are overtime.
//!
//! ## Allocation
//!
//! The week is walked in roster order (Monday to Sunday, public holidays last)
//! and the threshold is crossed at a definite point. Excess falling on a Sunday
//! is `overtime-sunday`; on a public holiday it is `overtime-public-holiday`.
//! All other excess is `overtime-first-2-hours` until
//! [`OVERTIME_FIRST_TIER_HOURS`] per head have been used, then
//! `overtime-after-2-hours`. Sunday and public-holiday excess still uses up
//! first-tier capacity.
//!
//! The report is advisory: per-shift costs are not rewritten.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use tracing::{debug, info};

use crate::error::EngineResult;
use crate::models::{
    CohortKey, CohortOvertime, Day, OvertimeReport, PayCondition, RateTable, Shift, ShiftSpan,
};

use super::round_money;

/// Ordinary hours per employee per week.
pub const WEEKLY_ORDINARY_HOURS: u32 = 38;

/// Overtime hours per employee paid at the first-tier rate.
pub const OVERTIME_FIRST_TIER_HOURS: u32 = 2;

const MINUTES_PER_HOUR: u64 = 60;

/// Computes weekly overtime for every cohort in a quote.
///
/// Only cohorts over their threshold appear in the report.
///
/// # Errors
///
/// - [`EngineError::InvalidShift`](crate::error::EngineError::InvalidShift) if any shift is malformed
/// - [`EngineError::RatesNotFound`](crate::error::EngineError::RatesNotFound) if any cohort
///   has no rates in `effective_rates`
///
/// # Example
///
/// ```
/// use cleaning_award_engine::calculation::compute_weekly_overtime;
/// use cleaning_award_engine::models::{
///     CohortKey, Day, EmployeeLevel, EmployeeLevelRates, EmploymentType, OrdinaryBand,
///     PayCondition, RateEntry, RateTable, Shift,
/// };
/// use chrono::{NaiveDate, NaiveTime};
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let level = EmployeeLevel::new(2).unwrap();
/// let rates = PayCondition::ALL
///     .into_iter()
///     .map(|pc| (pc, RateEntry {
///         pay_condition: pc,
///         base_rate: Decimal::from_str("26.75").unwrap(),
///         multiplier: if pc == PayCondition::Base { Decimal::ONE } else { Decimal::TWO },
///     }))
///     .collect();
/// let table = RateTable::new(
///     NaiveDate::from_ymd_opt(2025, 7, 1).unwrap(),
///     OrdinaryBand::default(),
///     vec![EmployeeLevelRates { level, employment_type: EmploymentType::FullTime, rates }],
/// )
/// .unwrap();
///
/// let shifts: Vec<Shift> = [Day::Monday, Day::Tuesday, Day::Wednesday, Day::Thursday, Day::Friday]
///     .into_iter()
///     .enumerate()
///     .map(|(i, day)| Shift {
///         id: format!("shift_{}", i),
///         day,
///         start_time: NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
///         end_time: NaiveTime::from_hms_opt(16, 0, 0).unwrap(),
///         break_duration_minutes: 0,
///         number_of_cleaners: 1,
///         employment_type: EmploymentType::FullTime,
///         level,
///         allowances: Default::default(),
///         location: String::new(),
///         notes: String::new(),
///     })
///     .collect();
///
/// let report = compute_weekly_overtime(&shifts, &table).unwrap();
/// let cohort = CohortKey::new(EmploymentType::FullTime, level);
/// assert_eq!(report.excess_hours()[&cohort], Decimal::from(2));
/// ```
pub fn compute_weekly_overtime(
    shifts: &[Shift],
    effective_rates: &RateTable,
) -> EngineResult<OvertimeReport> {
    let mut cohorts: BTreeMap<CohortKey, Vec<(&Shift, ShiftSpan)>> = BTreeMap::new();
    for shift in shifts {
        let span = shift.span()?;
        cohorts.entry(shift.cohort()).or_default().push((shift, span));
    }

    let mut report = OvertimeReport::default();
    for (cohort, mut entries) in cohorts {
        let rates = effective_rates.rates_for(cohort.employment_type, cohort.level)?;

        let headcount = entries
            .iter()
            .map(|(shift, _)| shift.number_of_cleaners)
            .max()
            .unwrap_or(0);
        let total_minutes: u64 = entries
            .iter()
            .map(|(shift, span)| person_minutes(shift, span))
            .sum();
        let threshold_minutes =
            u64::from(WEEKLY_ORDINARY_HOURS) * MINUTES_PER_HOUR * u64::from(headcount);

        debug!(
            cohort = %cohort,
            headcount,
            total_minutes,
            threshold_minutes,
            "Aggregated cohort week"
        );

        if total_minutes <= threshold_minutes {
            continue;
        }

        entries.sort_by_key(|(shift, span)| (shift.day, span.start_minute));
        let allocation_minutes = allocate_excess(&entries, threshold_minutes, headcount);

        let mut overtime_cost = Decimal::ZERO;
        let mut allocation = BTreeMap::new();
        for (condition, minutes) in allocation_minutes {
            let hourly_rate = rates.entry(condition)?.hourly_rate();
            overtime_cost += hourly_rate * Decimal::from(minutes) / Decimal::from(MINUTES_PER_HOUR);
            allocation.insert(condition, to_hours(minutes));
        }

        let entry = CohortOvertime {
            cohort,
            headcount,
            total_hours: to_hours(total_minutes),
            threshold_hours: to_hours(threshold_minutes),
            excess_hours: to_hours(total_minutes - threshold_minutes),
            allocation,
            overtime_cost: round_money(overtime_cost),
        };

        info!(
            cohort = %entry.label(),
            excess_hours = %entry.excess_hours,
            overtime_cost = %entry.overtime_cost,
            "Cohort exceeds weekly ordinary hours"
        );

        report.cohorts.push(entry);
    }

    Ok(report)
}

/// Walks the sorted week and labels every person-minute past the threshold.
fn allocate_excess(
    entries: &[(&Shift, ShiftSpan)],
    threshold_minutes: u64,
    headcount: u32,
) -> BTreeMap<PayCondition, u64> {
    let mut first_tier_left =
        u64::from(OVERTIME_FIRST_TIER_HOURS) * MINUTES_PER_HOUR * u64::from(headcount);
    let mut accumulated: u64 = 0;
    let mut allocation: BTreeMap<PayCondition, u64> = BTreeMap::new();

    for (shift, span) in entries {
        let before = accumulated;
        accumulated += person_minutes(shift, span);
        if accumulated <= threshold_minutes {
            continue;
        }

        let excess = accumulated - before.max(threshold_minutes);
        let first_tier = excess.min(first_tier_left);
        first_tier_left -= first_tier;

        let mut add = |condition: PayCondition, minutes: u64| {
            if minutes > 0 {
                *allocation.entry(condition).or_insert(0) += minutes;
            }
        };
        match shift.day {
            Day::Sunday => add(PayCondition::OvertimeSunday, excess),
            Day::PublicHoliday => add(PayCondition::OvertimePublicHoliday, excess),
            Day::Monday
            | Day::Tuesday
            | Day::Wednesday
            | Day::Thursday
            | Day::Friday
            | Day::Saturday => {
                add(PayCondition::OvertimeFirstTwoHours, first_tier);
                add(PayCondition::OvertimeAfterTwoHours, excess - first_tier);
            }
        }
    }

    allocation
}

/// Worked minutes summed over every cleaner on the shift.
fn person_minutes(shift: &Shift, span: &ShiftSpan) -> u64 {
    u64::from(span.worked_minutes()) * u64::from(shift.number_of_cleaners)
}

fn to_hours(minutes: u64) -> Decimal {
    Decimal::from(minutes) / Decimal::from(MINUTES_PER_HOUR)
}

//! Calculation result models.
//!
//! This module contains the outputs handed to display collaborators: per-shift
//! cost breakdowns, the weekly overtime report, broken-shift findings and the
//! combined [`QuoteCosts`].

use std::collections::{BTreeMap, BTreeSet};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{AllowanceUnit, CohortKey, Day, PayCondition};

/// A chronological slice of a shift governed by one pay condition.
///
/// `start_minute`/`end_minute` are clock bounds on the start day's timeline
/// (they may exceed one day). `minutes` is the paid time in the slice after
/// the unpaid break has been taken out, so it can be less than the bounds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConditionSegment {
    /// The governing pay condition.
    pub pay_condition: PayCondition,
    /// Clock start of the slice.
    pub start_minute: u32,
    /// Clock end of the slice.
    pub end_minute: u32,
    /// Paid minutes in the slice.
    pub minutes: u32,
}

/// One priced line of a shift cost.
///
/// # Example
///
/// ```
/// use cleaning_award_engine::models::{PayCondition, SegmentCost};
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let line = SegmentCost {
///     pay_condition: PayCondition::Base,
///     minutes: 480,
///     hourly_rate: Decimal::from_str("25.85").unwrap(),
///     cleaners: 1,
///     amount: Decimal::from_str("206.80").unwrap(),
/// };
/// assert_eq!(line.hours(), Decimal::from(8));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SegmentCost {
    /// The pay condition priced.
    pub pay_condition: PayCondition,
    /// Paid minutes per cleaner.
    pub minutes: u32,
    /// Effective hourly rate for the condition.
    pub hourly_rate: Decimal,
    /// Headcount the line is multiplied by.
    pub cleaners: u32,
    /// Unrounded line amount.
    pub amount: Decimal,
}

impl SegmentCost {
    /// Paid hours per cleaner.
    pub fn hours(&self) -> Decimal {
        Decimal::from(self.minutes) / Decimal::from(60)
    }
}

/// One allowance charged on a shift.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllowanceCharge {
    /// The allowance code.
    pub code: String,
    /// Display name of the allowance.
    pub name: String,
    /// The unit the allowance is counted in.
    pub unit: AllowanceUnit,
    /// Units counted per cleaner (shifts, hours or days).
    pub units: Decimal,
    /// Amount per unit.
    pub rate: Decimal,
    /// Headcount the charge is multiplied by.
    pub cleaners: u32,
    /// Unrounded charge amount.
    pub amount: Decimal,
}

/// The cost of one shift.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftCost {
    /// The shift this cost belongs to.
    pub shift_id: String,
    /// Paid minutes per cleaner.
    pub worked_minutes: u32,
    /// Total cost rounded half-up to cents.
    pub estimated_cost: Decimal,
    /// Pay-condition lines, in chronological order.
    pub breakdown: Vec<SegmentCost>,
    /// Allowance lines, in code order.
    pub allowances: Vec<AllowanceCharge>,
}

/// Weekly overtime for one cohort that went over its threshold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CohortOvertime {
    /// The cohort.
    pub cohort: CohortKey,
    /// Largest number of cleaners seen on any of the cohort's shifts.
    pub headcount: u32,
    /// Person-hours worked by the cohort across the week.
    pub total_hours: Decimal,
    /// Ordinary person-hour capacity (`38 * headcount`).
    pub threshold_hours: Decimal,
    /// Person-hours beyond the threshold.
    pub excess_hours: Decimal,
    /// Excess person-hours split by overtime condition.
    pub allocation: BTreeMap<PayCondition, Decimal>,
    /// Excess priced at the effective overtime rates, rounded to cents.
    ///
    /// Informational only: per-shift costs are not rewritten.
    pub overtime_cost: Decimal,
}

impl CohortOvertime {
    /// The display key `employment type + level + cleaner count`.
    pub fn label(&self) -> String {
        format!("{} x{}", self.cohort, self.headcount)
    }
}

/// Cohorts whose weekly hours went over the ordinary threshold.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OvertimeReport {
    /// Over-threshold cohorts in cohort order.
    pub cohorts: Vec<CohortOvertime>,
}

impl OvertimeReport {
    /// Returns the entry for a cohort, if it went over threshold.
    pub fn get(&self, cohort: &CohortKey) -> Option<&CohortOvertime> {
        self.cohorts.iter().find(|entry| &entry.cohort == cohort)
    }

    /// Returns excess hours keyed by cohort.
    pub fn excess_hours(&self) -> BTreeMap<CohortKey, Decimal> {
        self.cohorts
            .iter()
            .map(|entry| (entry.cohort, entry.excess_hours))
            .collect()
    }

    /// Returns true when no cohort went over threshold.
    pub fn is_empty(&self) -> bool {
        self.cohorts.is_empty()
    }
}

/// A day on which a cohort works non-contiguous shifts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BrokenShift {
    /// The roster day.
    pub day: Day,
    /// The cohort with the split day.
    pub cohort: CohortKey,
}

/// Quote-level money totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteTotals {
    /// Sum of the shifts' estimated costs.
    pub labour_cost: Decimal,
    /// Overhead on labour cost.
    pub overhead: Decimal,
    /// Margin on labour plus overhead.
    pub margin: Decimal,
    /// Labour plus overhead plus margin.
    pub total_price: Decimal,
}

/// Everything a quote view needs from one engine pass.
///
/// Shift costs and the overtime report are computed independently; the
/// overtime premium is not folded into `shift_costs` or `totals`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteCosts {
    /// One cost per input shift, in input order.
    pub shift_costs: Vec<ShiftCost>,
    /// Over-threshold cohorts.
    pub overtime: OvertimeReport,
    /// Days flagged as broken-shift allowance candidates.
    pub broken_shift_days: BTreeSet<Day>,
    /// Money totals.
    pub totals: QuoteTotals,
}

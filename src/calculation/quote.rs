//! Quote costing.
//!
//! Composes the engine for one quote: the settings multiplier is applied once,
//! then every shift is costed and the week is checked for overtime and broken
//! shifts. Shift costs and the overtime report are independent; the overtime
//! premium does not flow into the totals.

use rust_decimal::Decimal;
use tracing::info;

use crate::error::EngineResult;
use crate::models::{AllowanceTable, AwardSettings, QuoteCosts, QuoteTotals, RateTable, Shift};

use super::{
    apply_settings_multiplier, compute_shift_cost, compute_weekly_overtime, detect_broken_shifts,
    round_money,
};

/// Costs every shift of a quote and collects the weekly findings.
///
/// The first failing shift aborts the call; no partial result is returned.
///
/// # Errors
///
/// Any validation or configuration error raised by the engine components.
pub fn compute_quote_costs(
    shifts: &[Shift],
    rate_table: &RateTable,
    settings: &AwardSettings,
    allowances: &AllowanceTable,
) -> EngineResult<QuoteCosts> {
    settings.validate()?;
    let effective_rates = apply_settings_multiplier(rate_table, settings)?;

    let shift_costs = shifts
        .iter()
        .map(|shift| compute_shift_cost(shift, &effective_rates, allowances))
        .collect::<EngineResult<Vec<_>>>()?;
    let overtime = compute_weekly_overtime(shifts, &effective_rates)?;
    let broken_shift_days = detect_broken_shifts(shifts)?;

    let labour_cost = shift_costs.iter().map(|cost| cost.estimated_cost).sum();
    let totals = price_quote(labour_cost, settings);

    info!(
        shifts = shifts.len(),
        effective_date = %rate_table.effective_date,
        labour_cost = %totals.labour_cost,
        total_price = %totals.total_price,
        overtime_cohorts = overtime.cohorts.len(),
        broken_shift_days = broken_shift_days.len(),
        "Computed quote costs"
    );

    Ok(QuoteCosts {
        shift_costs,
        overtime,
        broken_shift_days,
        totals,
    })
}

/// Adds overhead and margin to a labour cost.
///
/// Overhead is a percentage of labour. Margin is a markup on labour plus
/// overhead. Each amount is rounded to cents before it is added.
///
/// # Example
///
/// ```
/// use cleaning_award_engine::calculation::price_quote;
/// use cleaning_award_engine::models::AwardSettings;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let settings = AwardSettings {
///     overhead_percentage_default: Decimal::from(10),
///     margin_percentage_default: Decimal::from(20),
///     ..Default::default()
/// };
/// let totals = price_quote(Decimal::from_str("1000.00").unwrap(), &settings);
/// assert_eq!(totals.overhead, Decimal::from_str("100.00").unwrap());
/// assert_eq!(totals.margin, Decimal::from_str("220.00").unwrap());
/// assert_eq!(totals.total_price, Decimal::from_str("1320.00").unwrap());
/// ```
pub fn price_quote(labour_cost: Decimal, settings: &AwardSettings) -> QuoteTotals {
    let hundred = Decimal::ONE_HUNDRED;
    let overhead = round_money(labour_cost * settings.overhead_percentage_default / hundred);
    let margin =
        round_money((labour_cost + overhead) * settings.margin_percentage_default / hundred);

    QuoteTotals {
        labour_cost,
        overhead,
        margin,
        total_price: labour_cost + overhead + margin,
    }
}

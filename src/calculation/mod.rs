//! Calculation logic for the award cost engine.
//!
//! This module contains the engine components: the settings adjuster that
//! produces effective rates, the pay-condition resolver, the shift cost
//! calculator, the weekly overtime aggregator, the broken-shift detector and
//! the quote orchestrator that composes them. Every function is pure and takes
//! its inputs by reference.

mod broken_shift;
mod pay_condition_resolver;
mod quote;
mod settings_adjuster;
mod shift_cost;
mod weekly_overtime;

pub use broken_shift::{detect_broken_shifts, detect_broken_shifts_by_cohort};
pub use pay_condition_resolver::{day_condition, resolve_pay_conditions};
pub use quote::{compute_quote_costs, price_quote};
pub use settings_adjuster::{apply_base_rate_multiplier, apply_settings_multiplier};
pub use shift_cost::{compute_shift_cost, round_money};
pub use weekly_overtime::{
    OVERTIME_FIRST_TIER_HOURS, WEEKLY_ORDINARY_HOURS, compute_weekly_overtime,
};

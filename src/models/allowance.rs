//! Flat allowance table.
//!
//! Allowances are looked up by code from a shift's `allowances` set and added
//! to the shift cost; they never scale pay-condition rates.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// How an allowance amount is counted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AllowanceUnit {
    /// Once per shift.
    PerShift,
    /// Per paid hour.
    PerHour,
    /// Once per calendar day the shift touches.
    PerDay,
}

/// A flat allowance, paid per cleaner.
///
/// # Example
///
/// ```
/// use cleaning_award_engine::models::{Allowance, AllowanceTable, AllowanceUnit};
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let table: AllowanceTable = vec![Allowance {
///     code: "toilet-cleaning".to_string(),
///     name: "Toilet cleaning allowance".to_string(),
///     amount: Decimal::from_str("3.56").unwrap(),
///     unit: AllowanceUnit::PerShift,
/// }]
/// .into_iter()
/// .collect();
///
/// assert!(table.get("toilet-cleaning").is_some());
/// assert!(table.get("vehicle").is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Allowance {
    /// The code shifts refer to.
    pub code: String,
    /// Display name.
    pub name: String,
    /// Amount per unit per cleaner.
    pub amount: Decimal,
    /// The unit the amount is counted in.
    pub unit: AllowanceUnit,
}

/// Allowances keyed by code.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AllowanceTable {
    allowances: BTreeMap<String, Allowance>,
}

impl AllowanceTable {
    /// Looks up an allowance by code.
    pub fn get(&self, code: &str) -> Option<&Allowance> {
        self.allowances.get(code)
    }

    /// Iterates over the allowances in code order.
    pub fn iter(&self) -> impl Iterator<Item = &Allowance> {
        self.allowances.values()
    }

    /// Returns the number of allowances.
    pub fn len(&self) -> usize {
        self.allowances.len()
    }

    /// Returns true if the table holds no allowances.
    pub fn is_empty(&self) -> bool {
        self.allowances.is_empty()
    }
}

impl FromIterator<Allowance> for AllowanceTable {
    fn from_iter<I: IntoIterator<Item = Allowance>>(iter: I) -> Self {
        Self {
            allowances: iter
                .into_iter()
                .map(|allowance| (allowance.code.clone(), allowance))
                .collect(),
        }
    }
}

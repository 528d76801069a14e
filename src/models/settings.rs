//! Award settings: the global base-rate multiplier and quote pricing defaults.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Lowest accepted base-rate multiplier (0.5).
pub const MIN_BASE_RATE_MULTIPLIER: Decimal = Decimal::from_parts(5, 0, 0, false, 1);

/// Highest accepted base-rate multiplier (2.0).
pub const MAX_BASE_RATE_MULTIPLIER: Decimal = Decimal::from_parts(2, 0, 0, false, 0);

const MAX_PERCENTAGE: Decimal = Decimal::from_parts(100, 0, 0, false, 0);

/// Global settings applied on top of the award rate table.
///
/// Settings are read-only input to every calculation. The only supported
/// mutation path is [`AwardSettings::apply_update`], which validates the
/// whole candidate before committing any field.
///
/// # Example
///
/// ```
/// use cleaning_award_engine::models::{AwardSettings, SettingsUpdate};
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let mut settings = AwardSettings::default();
/// settings
///     .apply_update(SettingsUpdate {
///         base_rate_multiplier: Some(Decimal::from_str("1.1").unwrap()),
///         ..Default::default()
///     })
///     .unwrap();
/// assert_eq!(settings.base_rate_multiplier, Decimal::from_str("1.1").unwrap());
///
/// let rejected = settings.apply_update(SettingsUpdate {
///     base_rate_multiplier: Some(Decimal::from_str("3").unwrap()),
///     ..Default::default()
/// });
/// assert!(rejected.is_err());
/// assert_eq!(settings.base_rate_multiplier, Decimal::from_str("1.1").unwrap());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AwardSettings {
    /// Multiplier applied to every base rate, within `[0.5, 2.0]`.
    pub base_rate_multiplier: Decimal,
    /// Default overhead percentage added to labour cost on quotes.
    #[serde(default)]
    pub overhead_percentage_default: Decimal,
    /// Default margin percentage applied on top of labour and overhead.
    #[serde(default)]
    pub margin_percentage_default: Decimal,
    /// When the settings were last changed.
    #[serde(default = "Utc::now")]
    pub last_updated: DateTime<Utc>,
}

impl Default for AwardSettings {
    fn default() -> Self {
        Self {
            base_rate_multiplier: Decimal::ONE,
            overhead_percentage_default: Decimal::ZERO,
            margin_percentage_default: Decimal::ZERO,
            last_updated: Utc::now(),
        }
    }
}

/// A partial change to [`AwardSettings`]. `None` fields are left as they are.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SettingsUpdate {
    /// New base-rate multiplier.
    #[serde(default)]
    pub base_rate_multiplier: Option<Decimal>,
    /// New default overhead percentage.
    #[serde(default)]
    pub overhead_percentage_default: Option<Decimal>,
    /// New default margin percentage.
    #[serde(default)]
    pub margin_percentage_default: Option<Decimal>,
}

impl AwardSettings {
    /// Checks every field against its accepted range.
    ///
    /// # Errors
    ///
    /// - [`EngineError::MultiplierOutOfBounds`] for a multiplier outside `[0.5, 2.0]`
    /// - [`EngineError::InvalidSettings`] for a percentage outside `[0, 100)`
    pub fn validate(&self) -> EngineResult<()> {
        validate_base_rate_multiplier(self.base_rate_multiplier)?;
        validate_percentage("overhead_percentage_default", self.overhead_percentage_default)?;
        validate_percentage("margin_percentage_default", self.margin_percentage_default)
    }

    /// Applies a partial update and stamps `last_updated`.
    ///
    /// A rejected update leaves the settings untouched.
    pub fn apply_update(&mut self, update: SettingsUpdate) -> EngineResult<()> {
        let mut candidate = self.clone();
        if let Some(multiplier) = update.base_rate_multiplier {
            candidate.base_rate_multiplier = multiplier;
        }
        if let Some(overhead) = update.overhead_percentage_default {
            candidate.overhead_percentage_default = overhead;
        }
        if let Some(margin) = update.margin_percentage_default {
            candidate.margin_percentage_default = margin;
        }
        candidate.validate()?;
        candidate.last_updated = Utc::now();
        *self = candidate;
        Ok(())
    }
}

/// Rejects a base-rate multiplier outside `[0.5, 2.0]`.
pub fn validate_base_rate_multiplier(multiplier: Decimal) -> EngineResult<()> {
    if multiplier < MIN_BASE_RATE_MULTIPLIER || multiplier > MAX_BASE_RATE_MULTIPLIER {
        return Err(EngineError::MultiplierOutOfBounds { value: multiplier });
    }
    Ok(())
}

fn validate_percentage(field: &str, value: Decimal) -> EngineResult<()> {
    if value < Decimal::ZERO || value >= MAX_PERCENTAGE {
        return Err(EngineError::InvalidSettings {
            field: field.to_string(),
            message: format!("{} is outside [0, 100)", value),
        });
    }
    Ok(())
}

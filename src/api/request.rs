//! Request types for the quote costing API.
//!
//! This module defines the JSON request structure for the `/quotes/costs` endpoint.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::EngineResult;
use crate::models::{AwardSettings, SettingsUpdate, Shift};

/// Request body for the `/quotes/costs` endpoint.
///
/// Contains the shifts of one quote, optional overrides of the configured
/// settings, and the date that selects the rate table version.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuoteCostRequest {
    /// The shifts on the quote (one roster week).
    pub shifts: Vec<Shift>,
    /// Overrides applied on top of the configured settings for this request.
    #[serde(default)]
    pub settings: Option<SettingsUpdate>,
    /// The date whose rate table is used. Defaults to today.
    #[serde(default)]
    pub effective_date: Option<NaiveDate>,
}

impl QuoteCostRequest {
    /// Returns the configured settings with this request's overrides applied.
    ///
    /// # Errors
    ///
    /// Returns the validation error of a rejected override.
    pub fn resolve_settings(&self, configured: &AwardSettings) -> EngineResult<AwardSettings> {
        let mut settings = configured.clone();
        if let Some(update) = &self.settings {
            settings.apply_update(update.clone())?;
        }
        Ok(settings)
    }
}

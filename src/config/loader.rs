//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading award
//! configurations from YAML files.

use chrono::NaiveDate;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

use crate::error::{EngineError, EngineResult};
use crate::models::{AllowanceTable, AwardSettings, OrdinaryBand, RateTable};

use super::types::{AllowancesConfig, AwardConfig, AwardMetadata, RateFile};

/// Loads and provides access to award configuration.
///
/// The `ConfigLoader` reads YAML configuration files from a directory
/// and provides methods to query rate tables, allowances and settings.
///
/// # Directory Structure
///
/// The configuration directory should have the following structure:
/// ```text
/// config/cleaning/
/// ├── award.yaml          # Award metadata and ordinary band
/// ├── allowances.yaml     # Flat allowances
/// ├── settings.yaml       # Global settings (optional)
/// └── rates/
///     └── 2025-07-01.yaml # Rates effective from this date
/// ```
///
/// # Example
///
/// ```no_run
/// use cleaning_award_engine::config::ConfigLoader;
/// use chrono::NaiveDate;
///
/// let loader = ConfigLoader::load("./config/cleaning").unwrap();
///
/// let date = NaiveDate::from_ymd_opt(2025, 8, 1).unwrap();
/// let table = loader.rate_table(date).unwrap();
/// println!("Rates effective from {}", table.effective_date);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: AwardConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the configuration directory (e.g., "./config/cleaning")
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - Any required file is missing
    /// - Any file contains invalid YAML
    /// - A rate file does not expand into a complete, valid rate table
    /// - The settings file holds out-of-range values
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let metadata = Self::load_yaml::<AwardMetadata>(&path.join("award.yaml"))?;
        metadata.ordinary_band.validate()?;

        let allowances_config = Self::load_yaml::<AllowancesConfig>(&path.join("allowances.yaml"))?;
        let allowances: AllowanceTable = allowances_config.allowances.into_iter().collect();

        let settings = Self::load_settings(&path.join("settings.yaml"))?;

        let rate_tables = Self::load_rates(&path.join("rates"), metadata.ordinary_band)?;

        info!(
            award = %metadata.code,
            rate_tables = rate_tables.len(),
            allowances = allowances.len(),
            "Loaded award configuration"
        );

        let config = AwardConfig::new(metadata, rate_tables, allowances, settings);

        Ok(Self { config })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Loads the settings file, falling back to defaults when it is absent.
    fn load_settings(settings_path: &Path) -> EngineResult<AwardSettings> {
        if !settings_path.exists() {
            debug!(path = %settings_path.display(), "No settings file, using defaults");
            return Ok(AwardSettings::default());
        }
        let settings = Self::load_yaml::<AwardSettings>(settings_path)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Loads all rate files from the rates directory.
    fn load_rates(rates_dir: &Path, ordinary_band: OrdinaryBand) -> EngineResult<Vec<RateTable>> {
        let rates_dir_str = rates_dir.display().to_string();

        if !rates_dir.exists() {
            return Err(EngineError::ConfigNotFound {
                path: rates_dir_str,
            });
        }

        let entries = fs::read_dir(rates_dir).map_err(|_| EngineError::ConfigNotFound {
            path: rates_dir_str.clone(),
        })?;

        let mut tables = Vec::new();

        for entry in entries {
            let entry = entry.map_err(|_| EngineError::ConfigNotFound {
                path: rates_dir_str.clone(),
            })?;

            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "yaml") {
                let table = Self::load_yaml::<RateFile>(&path)?.into_rate_table(ordinary_band)?;
                debug!(
                    path = %path.display(),
                    effective_date = %table.effective_date,
                    cohorts = table.levels.len(),
                    "Loaded rate table"
                );
                tables.push(table);
            }
        }

        if tables.is_empty() {
            return Err(EngineError::ConfigNotFound {
                path: format!("{} (no rate files found)", rates_dir_str),
            });
        }

        Ok(tables)
    }

    /// Returns the underlying award configuration.
    pub fn config(&self) -> &AwardConfig {
        &self.config
    }

    /// Returns the award metadata.
    pub fn award(&self) -> &AwardMetadata {
        self.config.award()
    }

    /// Gets the rate table version in force on a given date.
    ///
    /// The method finds the most recent rate table that is effective
    /// on or before the given date.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use cleaning_award_engine::config::ConfigLoader;
    /// use chrono::NaiveDate;
    ///
    /// let loader = ConfigLoader::load("./config/cleaning")?;
    /// let date = NaiveDate::from_ymd_opt(2025, 8, 1).unwrap();
    /// let table = loader.rate_table(date)?;
    /// assert_eq!(table.effective_date, NaiveDate::from_ymd_opt(2025, 7, 1).unwrap());
    /// # Ok::<(), cleaning_award_engine::error::EngineError>(())
    /// ```
    pub fn rate_table(&self, date: NaiveDate) -> EngineResult<&RateTable> {
        self.config.rate_table(date)
    }

    /// Returns the flat allowance table.
    pub fn allowances(&self) -> &AllowanceTable {
        self.config.allowances()
    }

    /// Returns the configured global settings.
    pub fn settings(&self) -> &AwardSettings {
        self.config.settings()
    }
}

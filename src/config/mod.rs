//! Configuration loading and management for the award cost engine.
//!
//! This module provides functionality to load award configurations from YAML files,
//! including award metadata, versioned rate tables, flat allowances and global settings.
//!
//! # Example
//!
//! ```no_run
//! use cleaning_award_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/cleaning").unwrap();
//! println!("Loaded award: {}", config.award().name);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{AllowancesConfig, AwardConfig, AwardMetadata, EmploymentTypeRates, RateFile};

//! Award rate and shift cost engine for commercial cleaning quotes.
//!
//! This crate prices scheduled cleaning shifts against an industrial award rate
//! table. It resolves each shift into pay conditions, costs it for every
//! cleaner, reports weekly overtime per (employment type, level) cohort and
//! flags broken-shift days.
//!
//! All calculations are pure functions over borrowed inputs. Rate tables,
//! allowances and settings are loaded by [`config::ConfigLoader`] and can be
//! served over HTTP through [`api::create_router`].

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;

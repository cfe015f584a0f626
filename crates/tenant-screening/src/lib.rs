//! Trust scoring and simulated screening for a rental-housing marketplace.

pub mod config;
pub mod error;
pub mod marketplace;
pub mod telemetry;

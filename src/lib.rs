//! geolive — live household power usage from a geotogether smart meter.

pub mod config;
pub mod monitor;

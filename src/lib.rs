//! Delivery route preparation library
//!
//! Turns a coarse route description (house-number ranges per street, grouped
//! into zones) into a geocoded, proximity-filtered address list. Exposes
//! modules for integration testing and binary reuse.

pub mod domain;
pub mod infra;
pub mod io;
pub mod services;

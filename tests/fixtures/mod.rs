//! Test fixtures for rihla.
//!
//! Provides:
//! - The bundled sample dataset and a builder for ad-hoc schools
//! - Real Moroccan city-centre coordinates (routable with the Morocco extract)
//! - Route provider doubles

#![allow(dead_code)]

pub mod moroccan_locations;
pub mod providers;
pub mod schools;

pub use moroccan_locations::*;
pub use providers::*;
pub use schools::*;

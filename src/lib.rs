//! rihla core
//!
//! Browse, filter, search and export Moroccan schools, and plan driving
//! routes to them. The crate is UI-agnostic: [`explorer::ExplorerController`]
//! holds the state a front end renders, and [`session::Session`] wires it to
//! a location provider and a routing service.

pub mod config;
pub mod coord;
pub mod dataset;
pub mod deeplink;
pub mod explorer;
pub mod export;
pub mod filter;
pub mod format;
pub mod geolocation;
pub mod hierarchy;
pub mod logging;
pub mod osrm;
pub mod osrm_data;
pub mod planner;
pub mod polyline;
pub mod route;
pub mod school;
pub mod session;
pub mod stats;
pub mod traits;

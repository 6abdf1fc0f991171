//! Route candidates and the requests that produce them.

use serde::Serialize;
use thiserror::Error;

use crate::coord::Coordinate;
use crate::format::{format_distance, format_duration};
use crate::polyline::Polyline;
use crate::school::SchoolId;

#[derive(Debug, Error)]
pub enum RouteFetchError {
    #[error("routing request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("routing service answered {code}: {message}")]
    Service { code: String, message: String },
    #[error("malformed route: {0}")]
    Malformed(String),
}

/// One candidate path between origin and destination.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteData {
    geometry: Polyline,
    duration_secs: f64,
    distance_m: f64,
}

impl RouteData {
    pub fn new(geometry: Polyline, duration_secs: f64, distance_m: f64) -> Result<Self, RouteFetchError> {
        if geometry.len() < 2 {
            return Err(RouteFetchError::Malformed(format!(
                "geometry needs at least two points, got {}",
                geometry.len()
            )));
        }
        if !(duration_secs.is_finite() && duration_secs >= 0.0) {
            return Err(RouteFetchError::Malformed(format!("duration {duration_secs}")));
        }
        if !(distance_m.is_finite() && distance_m >= 0.0) {
            return Err(RouteFetchError::Malformed(format!("distance {distance_m}")));
        }
        Ok(Self {
            geometry,
            duration_secs,
            distance_m,
        })
    }

    pub fn geometry(&self) -> &Polyline {
        &self.geometry
    }

    pub fn duration_secs(&self) -> f64 {
        self.duration_secs
    }

    pub fn distance_m(&self) -> f64 {
        self.distance_m
    }

    pub fn formatted_duration(&self) -> String {
        format_duration(self.duration_secs)
    }

    pub fn formatted_distance(&self) -> String {
        format_distance(self.distance_m)
    }
}

/// The school a route is being planned to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Destination {
    pub school_id: SchoolId,
    pub coordinate: Coordinate,
}

/// A route fetch tagged with the pair it was issued for.
///
/// `id` increases with every request a planner issues, so a response can be
/// matched against the request that is current when it arrives.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RouteRequest {
    pub id: u64,
    pub origin: Coordinate,
    pub destination: Destination,
}

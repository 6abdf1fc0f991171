//! WGS84 coordinates.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A validated latitude/longitude pair in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoordinateError {
    #[error("latitude {0} is outside [-90, 90]")]
    LatitudeOutOfRange(f64),
    #[error("longitude {0} is outside [-180, 180]")]
    LongitudeOutOfRange(f64),
    #[error("expected \"lat,lng\", got {0:?}")]
    Unparseable(String),
}

impl Coordinate {
    /// Builds a coordinate, rejecting values outside the WGS84 ranges (and NaN).
    pub fn new(lat: f64, lng: f64) -> Result<Self, CoordinateError> {
        if !(-90.0..=90.0).contains(&lat) {
            return Err(CoordinateError::LatitudeOutOfRange(lat));
        }
        if !(-180.0..=180.0).contains(&lng) {
            return Err(CoordinateError::LongitudeOutOfRange(lng));
        }
        Ok(Self { lat, lng })
    }

    /// Routing services and GeoJSON take longitude first.
    pub fn lng_lat(&self) -> (f64, f64) {
        (self.lng, self.lat)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6},{:.6}", self.lat, self.lng)
    }
}

impl FromStr for Coordinate {
    type Err = CoordinateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let unparseable = || CoordinateError::Unparseable(s.to_string());
        let (lat, lng) = s.split_once(',').ok_or_else(unparseable)?;
        let lat = lat.trim().parse::<f64>().map_err(|_| unparseable())?;
        let lng = lng.trim().parse::<f64>().map_err(|_| unparseable())?;
        Self::new(lat, lng)
    }
}

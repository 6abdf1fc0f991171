//! One-shot acquisition of the user's position.
//!
//! The acquirer moves `Idle -> Loading -> Resolved | Failed`. A failure only
//! goes back to `Loading` through an explicit retry, and a resolved fix is
//! kept for the rest of the session.

use thiserror::Error;
use tracing::{debug, warn};

use crate::coord::Coordinate;
use crate::traits::LocationProvider;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LocationError {
    #[error("location permission denied: {0}")]
    PermissionDenied(String),
    #[error("position unavailable: {0}")]
    PositionUnavailable(String),
    #[error("location request timed out")]
    Timeout,
    #[error("geolocation is not supported on this device")]
    Unsupported,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum LocationState {
    #[default]
    Idle,
    Loading,
    Resolved(Coordinate),
    Failed(LocationError),
}

#[derive(Debug, Clone, Default)]
pub struct GeolocationAcquirer {
    state: LocationState,
}

impl GeolocationAcquirer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &LocationState {
        &self.state
    }

    pub fn position(&self) -> Option<Coordinate> {
        match self.state {
            LocationState::Resolved(coord) => Some(coord),
            _ => None,
        }
    }

    /// Starts the first request. Returns false if one was already made.
    pub fn begin(&mut self) -> bool {
        if self.state != LocationState::Idle {
            return false;
        }
        self.state = LocationState::Loading;
        true
    }

    /// Re-issues a failed request. Only valid from `Failed`.
    pub fn retry(&mut self) -> bool {
        if !matches!(self.state, LocationState::Failed(_)) {
            return false;
        }
        debug!("retrying location request");
        self.state = LocationState::Loading;
        true
    }

    /// Applies the outcome of the outstanding request. Ignored unless loading.
    pub fn resolve(&mut self, result: Result<Coordinate, LocationError>) -> bool {
        if self.state != LocationState::Loading {
            debug!("ignoring location result with no request outstanding");
            return false;
        }
        self.state = match result {
            Ok(coord) => {
                debug!(%coord, "location resolved");
                LocationState::Resolved(coord)
            }
            Err(err) => {
                warn!(error = %err, "location request failed");
                LocationState::Failed(err)
            }
        };
        true
    }

    /// Runs a request synchronously against `provider` if one is due.
    pub fn acquire<P: LocationProvider>(&mut self, provider: &P) -> &LocationState {
        if self.begin() || self.state == LocationState::Loading {
            self.resolve(provider.current_position());
        }
        &self.state
    }
}

/// A position fixed up front, e.g. from configuration or a command-line flag.
#[derive(Debug, Clone, Copy)]
pub struct FixedLocation(pub Coordinate);

impl LocationProvider for FixedLocation {
    fn current_position(&self) -> Result<Coordinate, LocationError> {
        Ok(self.0)
    }
}

/// A host without any location capability.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoGeolocation;

impl LocationProvider for NoGeolocation {
    fn current_position(&self) -> Result<Coordinate, LocationError> {
        Err(LocationError::Unsupported)
    }
}

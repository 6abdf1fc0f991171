//! Route and location provider doubles.

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use rihla::coord::Coordinate;
use rihla::polyline::Polyline;
use rihla::route::{RouteData, RouteFetchError};
use rihla::traits::RouteProvider;

/// A straight two-point route with the given duration and distance.
pub fn straight_route(
    origin: Coordinate,
    destination: Coordinate,
    duration_secs: f64,
    distance_m: f64,
) -> RouteData {
    RouteData::new(
        Polyline::new(vec![origin, destination]),
        duration_secs,
        distance_m,
    )
    .expect("fixture route is valid")
}

/// Answers every request with the same durations, one route per entry.
pub struct StaticRoutes {
    pub durations: Vec<f64>,
    pub calls: AtomicUsize,
}

impl StaticRoutes {
    pub fn new(durations: &[f64]) -> Self {
        Self {
            durations: durations.to_vec(),
            calls: AtomicUsize::new(0),
        }
    }
}

impl RouteProvider for StaticRoutes {
    fn routes_between(
        &self,
        origin: Coordinate,
        destination: Coordinate,
    ) -> Result<Vec<RouteData>, RouteFetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .durations
            .iter()
            .map(|d| straight_route(origin, destination, *d, d * 14.0))
            .collect())
    }
}

/// Always fails the way an unreachable routing server would.
pub struct FailingRoutes;

impl RouteProvider for FailingRoutes {
    fn routes_between(
        &self,
        _origin: Coordinate,
        _destination: Coordinate,
    ) -> Result<Vec<RouteData>, RouteFetchError> {
        Err(RouteFetchError::Service {
            code: "NoRoute".to_string(),
            message: "Impossible route between points".to_string(),
        })
    }
}

/// Records the destinations it was asked for.
#[derive(Default)]
pub struct RecordingRoutes {
    pub destinations: Mutex<Vec<Coordinate>>,
}

impl RouteProvider for RecordingRoutes {
    fn routes_between(
        &self,
        origin: Coordinate,
        destination: Coordinate,
    ) -> Result<Vec<RouteData>, RouteFetchError> {
        self.destinations
            .lock()
            .expect("recording lock poisoned")
            .push(destination);
        Ok(vec![straight_route(origin, destination, 600.0, 8_000.0)])
    }
}

/// Fails the first request, then answers like [`RecordingRoutes`] would.
#[derive(Default)]
pub struct FlakyRoutes {
    pub calls: AtomicUsize,
}

impl RouteProvider for FlakyRoutes {
    fn routes_between(
        &self,
        origin: Coordinate,
        destination: Coordinate,
    ) -> Result<Vec<RouteData>, RouteFetchError> {
        if self.calls.fetch_add(1, Ordering::SeqCst) == 0 {
            return Err(RouteFetchError::Malformed("connection reset".to_string()));
        }
        Ok(vec![straight_route(origin, destination, 600.0, 8_000.0)])
    }
}

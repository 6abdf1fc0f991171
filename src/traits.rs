//! Seams to the explorer's external collaborators.
//!
//! The school dataset, the host's location capability and the routing
//! service are all reached through these traits so the controller can be
//! driven by real adapters or by test doubles.

use crate::coord::Coordinate;
use crate::dataset::DataError;
use crate::geolocation::LocationError;
use crate::route::{RouteData, RouteFetchError};
use crate::school::School;

/// Supplies the full, read-only school collection at session start.
pub trait SchoolSource {
    fn schools(&self) -> Result<Vec<School>, DataError>;
}

/// One-shot position query against the host platform.
pub trait LocationProvider {
    fn current_position(&self) -> Result<Coordinate, LocationError>;
}

/// Fetches candidate driving routes between two points.
///
/// Routes come back in the service's own order; the first one is treated as
/// the fastest.
pub trait RouteProvider {
    fn routes_between(
        &self,
        origin: Coordinate,
        destination: Coordinate,
    ) -> Result<Vec<RouteData>, RouteFetchError>;
}

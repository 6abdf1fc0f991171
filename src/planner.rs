//! Route planning state machine.
//!
//! The planner never performs I/O itself. Every operation returns the
//! [`Command`]s the driver has to carry out, and results come back in
//! through [`RoutePlanner::location_resolved`] and
//! [`RoutePlanner::routes_loaded`].
//!
//! A fetch is issued only while the route view is open, the user's position
//! is known and a destination is set. Each fetch carries a fresh
//! [`RouteRequest`]; a response is applied only if it answers the request
//! the planner is currently waiting on, so a slow response for an earlier
//! destination can never overwrite the routes for the current one.

use tracing::{debug, warn};

use crate::coord::Coordinate;
use crate::geolocation::{GeolocationAcquirer, LocationError, LocationState};
use crate::route::{Destination, RouteData, RouteFetchError, RouteRequest};

/// Side effects requested by the planner.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    RequestLocation,
    FetchRoute(RouteRequest),
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum RoutePhase {
    /// Route view closed.
    #[default]
    Idle,
    AcquiringLocation,
    LocationError(LocationError),
    AwaitingDestination,
    FetchingRoute(RouteRequest),
    /// `routes` is empty when the fetch failed or found nothing.
    RouteReady {
        request: RouteRequest,
        routes: Vec<RouteData>,
        selected: usize,
    },
}

#[derive(Debug, Clone, Default)]
pub struct RoutePlanner {
    location: GeolocationAcquirer,
    destination: Option<Destination>,
    phase: RoutePhase,
    issued: u64,
}

impl RoutePlanner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> &RoutePhase {
        &self.phase
    }

    pub fn is_open(&self) -> bool {
        self.phase != RoutePhase::Idle
    }

    pub fn location(&self) -> &LocationState {
        self.location.state()
    }

    pub fn origin(&self) -> Option<Coordinate> {
        self.location.position()
    }

    pub fn destination(&self) -> Option<Destination> {
        self.destination
    }

    pub fn is_locating(&self) -> bool {
        self.phase == RoutePhase::AcquiringLocation
    }

    pub fn is_fetching(&self) -> bool {
        matches!(self.phase, RoutePhase::FetchingRoute(_))
    }

    /// The request whose response is currently awaited.
    pub fn pending_request(&self) -> Option<&RouteRequest> {
        match &self.phase {
            RoutePhase::FetchingRoute(request) => Some(request),
            _ => None,
        }
    }

    pub fn routes(&self) -> &[RouteData] {
        match &self.phase {
            RoutePhase::RouteReady { routes, .. } => routes,
            _ => &[],
        }
    }

    pub fn selected_index(&self) -> Option<usize> {
        match &self.phase {
            RoutePhase::RouteReady { routes, selected, .. } if !routes.is_empty() => Some(*selected),
            _ => None,
        }
    }

    pub fn selected_route(&self) -> Option<&RouteData> {
        self.selected_index().and_then(|i| self.routes().get(i))
    }

    /// Opens the route view.
    pub fn open(&mut self) -> Vec<Command> {
        if self.is_open() {
            return Vec::new();
        }
        debug!("route view opened");
        self.advance()
    }

    /// Closes the route view, discarding any routes and any pending fetch.
    pub fn close(&mut self) {
        if self.is_open() {
            debug!("route view closed");
        }
        self.phase = RoutePhase::Idle;
    }

    /// Changes the destination. A different destination invalidates the
    /// current routes and, if the view is open, issues a new fetch. Setting
    /// the same destination again only refetches after a fetch that came
    /// back empty or failed.
    pub fn set_destination(&mut self, destination: Option<Destination>) -> Vec<Command> {
        if self.destination == destination && !self.fetch_came_back_empty() {
            return Vec::new();
        }
        self.destination = destination;
        if !self.is_open() {
            return Vec::new();
        }
        self.advance()
    }

    pub fn location_resolved(&mut self, result: Result<Coordinate, LocationError>) -> Vec<Command> {
        if !self.location.resolve(result) || !self.is_open() {
            return Vec::new();
        }
        self.advance()
    }

    /// User-triggered retry after a location failure.
    pub fn retry_location(&mut self) -> Vec<Command> {
        if !self.location.retry() {
            return Vec::new();
        }
        if self.is_open() {
            self.phase = RoutePhase::AcquiringLocation;
        }
        vec![Command::RequestLocation]
    }

    /// Applies a routing response. Returns false when the response was stale
    /// and has been discarded.
    pub fn routes_loaded(
        &mut self,
        request: &RouteRequest,
        result: Result<Vec<RouteData>, RouteFetchError>,
    ) -> bool {
        if self.pending_request() != Some(request) {
            debug!(request = request.id, "discarding stale route response");
            return false;
        }
        let routes = match result {
            Ok(routes) => {
                debug!(request = request.id, count = routes.len(), "routes loaded");
                routes
            }
            Err(err) => {
                warn!(request = request.id, error = %err, "route fetch failed");
                Vec::new()
            }
        };
        self.phase = RoutePhase::RouteReady {
            request: *request,
            routes,
            selected: 0,
        };
        true
    }

    /// Makes another returned route the active one.
    pub fn select_route(&mut self, index: usize) -> bool {
        match &mut self.phase {
            RoutePhase::RouteReady { routes, selected, .. } if index < routes.len() => {
                *selected = index;
                true
            }
            _ => false,
        }
    }

    fn fetch_came_back_empty(&self) -> bool {
        matches!(&self.phase, RoutePhase::RouteReady { routes, .. } if routes.is_empty())
    }

    fn advance(&mut self) -> Vec<Command> {
        if self.location.begin() {
            self.phase = RoutePhase::AcquiringLocation;
            return vec![Command::RequestLocation];
        }
        match self.location.state().clone() {
            LocationState::Idle | LocationState::Loading => {
                self.phase = RoutePhase::AcquiringLocation;
                Vec::new()
            }
            LocationState::Failed(err) => {
                self.phase = RoutePhase::LocationError(err);
                Vec::new()
            }
            LocationState::Resolved(origin) => match self.destination {
                None => {
                    self.phase = RoutePhase::AwaitingDestination;
                    Vec::new()
                }
                Some(destination) => {
                    self.issued += 1;
                    let request = RouteRequest {
                        id: self.issued,
                        origin,
                        destination,
                    };
                    debug!(request = request.id, school = destination.school_id, "fetching routes");
                    self.phase = RoutePhase::FetchingRoute(request);
                    vec![Command::FetchRoute(request)]
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::polyline::Polyline;

    fn coord(lat: f64, lng: f64) -> Coordinate {
        Coordinate::new(lat, lng).unwrap()
    }

    fn destination(school_id: u32) -> Destination {
        Destination {
            school_id,
            coordinate: coord(31.6295, -8.0088),
        }
    }

    fn route(duration: f64) -> RouteData {
        RouteData::new(
            Polyline::from_lng_lat(&[[-7.5898, 33.5731], [-8.0088, 31.6295]]),
            duration,
            240_000.0,
        )
        .unwrap()
    }

    fn fetch_request(commands: &[Command]) -> RouteRequest {
        match commands {
            [Command::FetchRoute(request)] => *request,
            other => panic!("expected a single fetch, got {other:?}"),
        }
    }

    #[test]
    fn test_first_open_requests_location() {
        let mut planner = RoutePlanner::new();
        assert_eq!(planner.open(), vec![Command::RequestLocation]);
        assert!(planner.is_locating());
        // already open: nothing new
        assert!(planner.open().is_empty());
    }

    #[test]
    fn test_location_without_destination_waits() {
        let mut planner = RoutePlanner::new();
        planner.open();
        let commands = planner.location_resolved(Ok(coord(33.5731, -7.5898)));
        assert!(commands.is_empty());
        assert_eq!(planner.phase(), &RoutePhase::AwaitingDestination);
    }

    #[test]
    fn test_destination_before_open_fetches_after_location() {
        let mut planner = RoutePlanner::new();
        assert!(planner.set_destination(Some(destination(14))).is_empty());
        planner.open();
        let request = fetch_request(&planner.location_resolved(Ok(coord(33.5731, -7.5898))));
        assert_eq!(request.destination.school_id, 14);
        assert!(planner.is_fetching());
    }

    #[test]
    fn test_same_destination_does_not_refetch() {
        let mut planner = RoutePlanner::new();
        planner.set_destination(Some(destination(14)));
        planner.open();
        planner.location_resolved(Ok(coord(33.5731, -7.5898)));
        assert!(planner.set_destination(Some(destination(14))).is_empty());
    }

    #[test]
    fn test_failed_fetch_leaves_empty_routes() {
        let mut planner = RoutePlanner::new();
        planner.set_destination(Some(destination(14)));
        planner.open();
        let request = fetch_request(&planner.location_resolved(Ok(coord(33.5731, -7.5898))));

        let applied = planner.routes_loaded(
            &request,
            Err(RouteFetchError::Service {
                code: "NoRoute".to_string(),
                message: "Impossible route".to_string(),
            }),
        );
        assert!(applied);
        assert!(!planner.is_fetching());
        assert!(planner.routes().is_empty());
        assert_eq!(planner.selected_index(), None);
    }

    #[test]
    fn test_select_route_bounds() {
        let mut planner = RoutePlanner::new();
        planner.set_destination(Some(destination(14)));
        planner.open();
        let request = fetch_request(&planner.location_resolved(Ok(coord(33.5731, -7.5898))));
        planner.routes_loaded(&request, Ok(vec![route(600.0), route(900.0)]));

        assert!(planner.select_route(1));
        assert_eq!(planner.selected_route().map(RouteData::duration_secs), Some(900.0));
        assert!(!planner.select_route(2));
        assert_eq!(planner.selected_index(), Some(1));
    }

    #[test]
    fn test_close_discards_pending_response() {
        let mut planner = RoutePlanner::new();
        planner.set_destination(Some(destination(14)));
        planner.open();
        let request = fetch_request(&planner.location_resolved(Ok(coord(33.5731, -7.5898))));
        planner.close();

        assert!(!planner.routes_loaded(&request, Ok(vec![route(600.0)])));
        assert_eq!(planner.phase(), &RoutePhase::Idle);
    }

    #[test]
    fn test_reopen_reuses_location() {
        let mut planner = RoutePlanner::new();
        planner.set_destination(Some(destination(14)));
        planner.open();
        let first = fetch_request(&planner.location_resolved(Ok(coord(33.5731, -7.5898))));
        planner.close();

        let second = fetch_request(&planner.open());
        assert!(second.id > first.id);
        assert_eq!(second.origin, first.origin);
    }
}

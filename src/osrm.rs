//! OSRM HTTP adapter for driving routes.

use serde::Deserialize;
use tracing::debug;

use crate::coord::Coordinate;
use crate::polyline::Polyline;
use crate::route::{RouteData, RouteFetchError};
use crate::traits::RouteProvider;

#[derive(Debug, Clone)]
pub struct OsrmConfig {
    pub base_url: String,
    pub profile: String,
    pub timeout_secs: u64,
}

impl Default for OsrmConfig {
    fn default() -> Self {
        Self {
            base_url: "https://router.project-osrm.org".to_string(),
            profile: "driving".to_string(),
            timeout_secs: 10,
        }
    }
}

#[derive(Debug, Clone)]
pub struct OsrmClient {
    config: OsrmConfig,
    client: reqwest::blocking::Client,
}

impl OsrmClient {
    pub fn new(config: OsrmConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { config, client })
    }

    pub fn config(&self) -> &OsrmConfig {
        &self.config
    }

    /// `route` service URL asking for full GeoJSON geometries and alternatives.
    pub fn route_url(&self, origin: Coordinate, destination: Coordinate) -> String {
        format!(
            "{}/route/v1/{}/{:.6},{:.6};{:.6},{:.6}?overview=full&geometries=geojson&alternatives=true",
            self.config.base_url.trim_end_matches('/'),
            self.config.profile,
            origin.lng,
            origin.lat,
            destination.lng,
            destination.lat
        )
    }
}

impl RouteProvider for OsrmClient {
    fn routes_between(
        &self,
        origin: Coordinate,
        destination: Coordinate,
    ) -> Result<Vec<RouteData>, RouteFetchError> {
        let url = self.route_url(origin, destination);
        debug!(%url, "requesting driving routes");

        let body = self
            .client
            .get(url)
            .send()
            .and_then(|resp| resp.error_for_status())
            .and_then(|resp| resp.json::<OsrmRouteResponse>())?;

        routes_from_response(body)
    }
}

#[derive(Debug, Deserialize)]
struct OsrmRouteResponse {
    code: String,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    routes: Vec<OsrmRoute>,
}

#[derive(Debug, Deserialize)]
struct OsrmRoute {
    geometry: OsrmGeometry,
    duration: f64,
    distance: f64,
}

#[derive(Debug, Deserialize)]
struct OsrmGeometry {
    coordinates: Vec<[f64; 2]>,
}

fn routes_from_response(body: OsrmRouteResponse) -> Result<Vec<RouteData>, RouteFetchError> {
    if body.code != "Ok" {
        return Err(RouteFetchError::Service {
            code: body.code,
            message: body.message.unwrap_or_default(),
        });
    }
    body.routes
        .into_iter()
        .map(|route| {
            RouteData::new(
                Polyline::from_lng_lat(&route.geometry.coordinates),
                route.duration,
                route.distance,
            )
        })
        .collect()
}

//! Polyline representation for route geometries.
//!
//! Routing services send geometries as `[lng, lat]` pairs; they are decoded
//! into [`Coordinate`]s at the boundary and rendered back to GeoJSON when
//! handed to a map.

use serde::Serialize;
use serde_json::{Value, json};

use crate::coord::Coordinate;

/// A route geometry as decoded coordinates, in travel order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Polyline {
    points: Vec<Coordinate>,
}

impl Polyline {
    pub fn new(points: Vec<Coordinate>) -> Self {
        Self { points }
    }

    /// Decodes GeoJSON-ordered `[lng, lat]` pairs.
    pub fn from_lng_lat(pairs: &[[f64; 2]]) -> Self {
        Self::new(
            pairs
                .iter()
                .map(|[lng, lat]| Coordinate { lat: *lat, lng: *lng })
                .collect(),
        )
    }

    pub fn points(&self) -> &[Coordinate] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// The geometry as (longitude, latitude) pairs.
    pub fn lng_lat_pairs(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.points.iter().map(Coordinate::lng_lat)
    }

    /// South-west and north-east corners, for fitting a map to the route.
    pub fn bounds(&self) -> Option<(Coordinate, Coordinate)> {
        let first = self.points.first()?;
        let (mut sw, mut ne) = (*first, *first);
        for p in &self.points[1..] {
            sw.lat = sw.lat.min(p.lat);
            sw.lng = sw.lng.min(p.lng);
            ne.lat = ne.lat.max(p.lat);
            ne.lng = ne.lng.max(p.lng);
        }
        Some((sw, ne))
    }

    /// GeoJSON `LineString` geometry.
    pub fn to_geojson(&self) -> Value {
        let coordinates: Vec<[f64; 2]> = self.lng_lat_pairs().map(|(lng, lat)| [lng, lat]).collect();
        json!({
            "type": "LineString",
            "coordinates": coordinates,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn casablanca_to_rabat() -> Polyline {
        Polyline::from_lng_lat(&[[-7.5898, 33.5731], [-7.1, 33.8], [-6.8416, 34.0209]])
    }

    #[test]
    fn test_from_lng_lat_swaps_order() {
        let polyline = casablanca_to_rabat();
        assert_eq!(polyline.len(), 3);
        assert_eq!(polyline.points()[0].lat, 33.5731);
        assert_eq!(polyline.points()[0].lng, -7.5898);
    }

    #[test]
    fn test_lng_lat_pairs() {
        let pairs: Vec<_> = casablanca_to_rabat().lng_lat_pairs().collect();
        assert_eq!(pairs[2], (-6.8416, 34.0209));
    }

    #[test]
    fn test_bounds() {
        let (sw, ne) = casablanca_to_rabat().bounds().unwrap();
        assert_eq!((sw.lat, sw.lng), (33.5731, -7.5898));
        assert_eq!((ne.lat, ne.lng), (34.0209, -6.8416));
    }

    #[test]
    fn test_empty_polyline() {
        let polyline = Polyline::new(vec![]);
        assert!(polyline.is_empty());
        assert!(polyline.bounds().is_none());
    }

    #[test]
    fn test_to_geojson() {
        let geojson = casablanca_to_rabat().to_geojson();
        assert_eq!(geojson["type"], "LineString");
        assert_eq!(geojson["coordinates"][0][0], -7.5898);
        assert_eq!(geojson["coordinates"][0][1], 33.5731);
    }
}

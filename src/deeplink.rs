//! Directions links into third-party map applications.

use std::fmt;

use crate::coord::Coordinate;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapApp {
    GoogleMaps,
    Waze,
    AppleMaps,
}

impl MapApp {
    pub const ALL: [MapApp; 3] = [MapApp::GoogleMaps, MapApp::Waze, MapApp::AppleMaps];

    /// Driving directions to `destination`. Without an origin the app starts
    /// from the device's own position. Waze always does.
    pub fn directions_url(&self, origin: Option<Coordinate>, destination: Coordinate) -> String {
        match (self, origin) {
            (MapApp::GoogleMaps, Some(o)) => format!(
                "https://www.google.com/maps/dir/?api=1&origin={o}&destination={destination}&travelmode=driving"
            ),
            (MapApp::GoogleMaps, None) => format!(
                "https://www.google.com/maps/dir/?api=1&destination={destination}&travelmode=driving"
            ),
            (MapApp::Waze, _) => format!("https://waze.com/ul?ll={destination}&navigate=yes"),
            (MapApp::AppleMaps, Some(o)) => {
                format!("https://maps.apple.com/?saddr={o}&daddr={destination}&dirflg=d")
            }
            (MapApp::AppleMaps, None) => format!("https://maps.apple.com/?daddr={destination}&dirflg=d"),
        }
    }
}

impl fmt::Display for MapApp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            MapApp::GoogleMaps => "Google Maps",
            MapApp::Waze => "Waze",
            MapApp::AppleMaps => "Apple Maps",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapLink {
    pub app: MapApp,
    pub url: String,
}

pub fn map_links(origin: Option<Coordinate>, destination: Coordinate) -> Vec<MapLink> {
    MapApp::ALL
        .iter()
        .map(|app| MapLink {
            app: *app,
            url: app.directions_url(origin, destination),
        })
        .collect()
}

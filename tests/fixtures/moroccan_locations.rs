//! City-centre coordinates for Moroccan cities.
//!
//! Coordinates are taken from the sample dataset's schools and sit on the
//! road network covered by the Geofabrik Morocco extract.

/// A named location with coordinates.
#[derive(Debug, Clone)]
pub struct Location {
    pub name: &'static str,
    pub lat: f64,
    pub lng: f64,
}

impl Location {
    pub const fn new(name: &'static str, lat: f64, lng: f64) -> Self {
        Self { name, lat, lng }
    }

    pub fn coordinate(&self) -> rihla::coord::Coordinate {
        rihla::coord::Coordinate::new(self.lat, self.lng).expect("fixture coordinates are valid")
    }
}

pub const CASABLANCA: Location = Location::new("Casablanca, Boulevard de la Corniche", 33.5731, -7.5898);
pub const RABAT: Location = Location::new("Rabat, Avenue Mohammed V", 34.0209, -6.8416);
pub const FES: Location = Location::new("Fès, Médina", 34.0637, -5.0088);
pub const MARRAKECH: Location = Location::new("Marrakech, Jemaa el-Fnaa", 31.6295, -8.0088);
pub const AGADIR: Location = Location::new("Agadir, Centre Ville", 30.4202, -9.5676);

pub const CITY_CENTRES: &[Location] = &[CASABLANCA, RABAT, FES, MARRAKECH, AGADIR];

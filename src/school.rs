//! School records.
//!
//! A `School` is a read-model projection: the region/province/commune labels
//! are denormalized onto each record, and the tree they form is rebuilt by
//! [`crate::hierarchy::LocationHierarchy`].

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::coord::{Coordinate, CoordinateError};

pub type SchoolId = u32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchoolType {
    Public,
    Private,
}

impl fmt::Display for SchoolType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SchoolType::Public => "Public",
            SchoolType::Private => "Privé",
        })
    }
}

/// Teaching level, ordered from primary to secondary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchoolLevel {
    Primaire,
    College,
    Lycee,
}

impl fmt::Display for SchoolLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SchoolLevel::Primaire => "Primaire",
            SchoolLevel::College => "Collège",
            SchoolLevel::Lycee => "Lycée",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct School {
    pub id: SchoolId,
    pub name_latin: String,
    #[serde(default)]
    pub name_arabic: Option<String>,
    pub address_latin: String,
    #[serde(default)]
    pub address_arabic: Option<String>,
    #[serde(rename = "type")]
    pub school_type: SchoolType,
    pub level: SchoolLevel,
    pub latitude: f64,
    pub longitude: f64,
    pub region: String,
    pub province: String,
    pub commune: String,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SchoolError {
    #[error("invalid position: {0}")]
    Position(#[from] CoordinateError),
    #[error("{0} must not be empty")]
    EmptyField(&'static str),
}

impl School {
    pub fn validate(&self) -> Result<(), SchoolError> {
        Coordinate::new(self.latitude, self.longitude)?;

        let required = [
            ("name_latin", &self.name_latin),
            ("region", &self.region),
            ("province", &self.province),
            ("commune", &self.commune),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(SchoolError::EmptyField(field));
            }
        }
        Ok(())
    }

    pub fn coordinate(&self) -> Coordinate {
        Coordinate {
            lat: self.latitude,
            lng: self.longitude,
        }
    }

    /// Every text field free-text search looks at, in both scripts.
    pub fn searchable_fields(&self) -> impl Iterator<Item = &str> {
        [
            Some(self.name_latin.as_str()),
            self.name_arabic.as_deref(),
            Some(self.address_latin.as_str()),
            self.address_arabic.as_deref(),
            Some(self.region.as_str()),
            Some(self.province.as_str()),
            Some(self.commune.as_str()),
        ]
        .into_iter()
        .flatten()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn school() -> School {
        School {
            id: 9,
            name_latin: "École Al-Quaraouine".to_string(),
            name_arabic: Some("مدرسة القرويين".to_string()),
            address_latin: "Médina Fès".to_string(),
            address_arabic: None,
            school_type: SchoolType::Public,
            level: SchoolLevel::Primaire,
            latitude: 34.0637,
            longitude: -5.0088,
            region: "Fès-Meknès".to_string(),
            province: "Fès".to_string(),
            commune: "Fès".to_string(),
        }
    }

    #[test]
    fn test_valid_school() {
        assert_eq!(school().validate(), Ok(()));
    }

    #[test]
    fn test_rejects_bad_latitude() {
        let mut s = school();
        s.latitude = 134.0;
        assert!(matches!(s.validate(), Err(SchoolError::Position(_))));
    }

    #[test]
    fn test_rejects_blank_commune() {
        let mut s = school();
        s.commune = "  ".to_string();
        assert_eq!(s.validate(), Err(SchoolError::EmptyField("commune")));
    }

    #[test]
    fn test_searchable_fields_skip_missing_script() {
        let s = school();
        let fields: Vec<&str> = s.searchable_fields().collect();
        assert_eq!(fields.len(), 6);
        assert!(fields.contains(&"مدرسة القرويين"));
    }

    #[test]
    fn test_deserialize_clean_record() {
        let json = r#"{
            "id": 101,
            "name_latin": "Lycée Tanger",
            "address_latin": "Centre Ville",
            "type": "public",
            "level": "lycee",
            "latitude": 35.7756,
            "longitude": -5.8155,
            "region": "Tanger-Tétouan-Al Hoceïma",
            "province": "Tanger-Assilah",
            "commune": "Tanger"
        }"#;
        let s: School = serde_json::from_str(json).unwrap();
        assert_eq!(s.level, SchoolLevel::Lycee);
        assert_eq!(s.name_arabic, None);
        assert_eq!(s.level.to_string(), "Lycée");
    }
}

//! School datasets: the bundled sample and JSON files produced by the ETL.

use std::collections::HashSet;
use std::fs::File;
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::info;

use crate::school::SchoolLevel::{College, Lycee, Primaire};
use crate::school::{School, SchoolError, SchoolId, SchoolLevel, SchoolType};
use crate::traits::SchoolSource;

#[derive(Debug, Error)]
pub enum DataError {
    #[error("cannot read dataset {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("dataset {path} is not valid JSON: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("school {id} is invalid: {source}")]
    InvalidSchool {
        id: SchoolId,
        #[source]
        source: SchoolError,
    },
    #[error("school id {0} appears more than once")]
    DuplicateId(SchoolId),
}

/// Validates every record and rejects repeated ids.
pub fn validate_schools(schools: &[School]) -> Result<(), DataError> {
    let mut ids = HashSet::with_capacity(schools.len());
    for school in schools {
        school.validate().map_err(|source| DataError::InvalidSchool {
            id: school.id,
            source,
        })?;
        if !ids.insert(school.id) {
            return Err(DataError::DuplicateId(school.id));
        }
    }
    Ok(())
}

/// A JSON array of school records on disk.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SchoolSource for JsonFileSource {
    fn schools(&self) -> Result<Vec<School>, DataError> {
        let file = File::open(&self.path).map_err(|source| DataError::Io {
            path: self.path.clone(),
            source,
        })?;
        let schools: Vec<School> =
            serde_json::from_reader(BufReader::new(file)).map_err(|source| DataError::Json {
                path: self.path.clone(),
                source,
            })?;
        validate_schools(&schools)?;
        info!(path = %self.path.display(), count = schools.len(), "loaded school dataset");
        Ok(schools)
    }
}

/// Thirty public schools spread over eight regions.
#[derive(Debug, Clone, Copy, Default)]
pub struct SampleDataset;

type SampleRow = (
    SchoolId,
    &'static str,
    &'static str,
    f64,
    f64,
    &'static str,
    &'static str,
    &'static str,
    SchoolLevel,
);

#[rustfmt::skip]
const SAMPLE: &[SampleRow] = &[
    (1, "École Primaire Moulay Hassan", "Boulevard de la Corniche", 33.5731, -7.5898, "Casablanca-Settat", "Casablanca", "Casablanca", Primaire),
    (2, "Collège Ibn Sina", "Quartier Maarif", 33.5847, -7.6116, "Casablanca-Settat", "Casablanca", "Casablanca", College),
    (3, "Lycée Mohamed V", "Quartier Gauthier", 33.5950, -7.6333, "Casablanca-Settat", "Casablanca", "Casablanca", Lycee),
    (4, "École Primaire Settat", "Centre Ville", 33.0089, -7.6297, "Casablanca-Settat", "Settat", "Settat", Primaire),
    (5, "École Moulay Rachid", "Avenue Mohammed V", 34.0209, -6.8416, "Rabat-Salé-Kénitra", "Rabat", "Rabat", Primaire),
    (6, "Collège Al-Qadi Ayyad", "Quartier Agdal", 34.0347, -6.8500, "Rabat-Salé-Kénitra", "Rabat", "Rabat", College),
    (7, "École Primaire Salé", "Centre Médina", 34.0461, -6.7988, "Rabat-Salé-Kénitra", "Salé", "Salé", Primaire),
    (8, "Lycée Kénitra", "Boulevard Hassan II", 34.2563, -6.5789, "Rabat-Salé-Kénitra", "Kénitra", "Kénitra", Lycee),
    (9, "École Al-Quaraouine", "Médina Fès", 34.0637, -5.0088, "Fès-Meknès", "Fès", "Fès", Primaire),
    (10, "Collège Ibn Rochd", "Nouvelle Ville", 34.0756, -5.0012, "Fès-Meknès", "Fès", "Fès", College),
    (11, "Lycée Moulay Driss", "Quartier Jnan", 34.0869, -4.9911, "Fès-Meknès", "Fès", "Fès", Lycee),
    (12, "École Primaire Meknès", "Centre Ville", 33.8869, -5.5469, "Fès-Meknès", "Meknès", "Meknès", Primaire),
    (13, "Collège Meknès", "Quartier Nouvelle", 33.8945, -5.5567, "Fès-Meknès", "Meknès", "Meknès", College),
    (14, "École Jemaa el-Fnaa", "Médina Marrakech", 31.6295, -8.0088, "Marrakech-Safi", "Marrakech", "Marrakech", Primaire),
    (15, "Collège Menara", "Jardins Menara", 31.6088, -8.0097, "Marrakech-Safi", "Marrakech", "Marrakech", College),
    (16, "Lycée Al-Hasan II", "Guéliz", 31.6362, -8.0177, "Marrakech-Safi", "Marrakech", "Marrakech", Lycee),
    (17, "École Primaire Safi", "Port City", 32.2928, -9.2389, "Marrakech-Safi", "Safi", "Safi", Primaire),
    (18, "École Tanger", "Boulevard Pasteur", 35.7595, -5.8369, "Tanger-Tétouan-Al Hoceïma", "Tanger-Assilah", "Tanger", Primaire),
    (19, "Collège Ibn Battouta", "Quartier Nouvelle", 35.7674, -5.8247, "Tanger-Tétouan-Al Hoceïma", "Tanger-Assilah", "Tanger", College),
    (20, "Lycée Tanger", "Centre Ville", 35.7756, -5.8155, "Tanger-Tétouan-Al Hoceïma", "Tanger-Assilah", "Tanger", Lycee),
    (21, "École Tétouan", "Médina", 35.5697, -5.3625, "Tanger-Tétouan-Al Hoceïma", "Tétouan", "Tétouan", Primaire),
    (22, "École Oujda", "Centre Ville", 34.6852, -1.9118, "Oriental", "Oujda-Angad", "Oujda", Primaire),
    (23, "Collège Oujda", "Quartier Nouvelle", 34.6945, -1.9212, "Oriental", "Oujda-Angad", "Oujda", College),
    (24, "Lycée Oujda", "Agdal", 34.7038, -1.9306, "Oriental", "Oujda-Angad", "Oujda", Lycee),
    (25, "École Agadir", "Centre Ville", 30.4202, -9.5676, "Souss-Massa", "Agadir-Ida-Outanane", "Agadir", Primaire),
    (26, "Collège Agadir", "Quartier Nouvelle", 30.4289, -9.5754, "Souss-Massa", "Agadir-Ida-Outanane", "Agadir", College),
    (27, "Lycée Agadir", "Dakhla District", 30.4376, -9.5832, "Souss-Massa", "Agadir-Ida-Outanane", "Agadir", Lycee),
    (28, "École Taroudant", "Medina", 30.2740, -8.8763, "Souss-Massa", "Taroudant", "Taroudant", Primaire),
    (29, "École Merzouga", "Oasis", 31.9456, -4.0119, "Drâa-Tafilalet", "Errachidia", "Merzouga", Primaire),
    (30, "Collège Zagora", "Centre", 29.9395, -5.8394, "Drâa-Tafilalet", "Zagora", "Zagora", College),
];

impl SchoolSource for SampleDataset {
    fn schools(&self) -> Result<Vec<School>, DataError> {
        let schools: Vec<School> = SAMPLE
            .iter()
            .map(
                |&(id, name, address, latitude, longitude, region, province, commune, level)| School {
                    id,
                    name_latin: name.to_string(),
                    name_arabic: None,
                    address_latin: address.to_string(),
                    address_arabic: None,
                    school_type: SchoolType::Public,
                    level,
                    latitude,
                    longitude,
                    region: region.to_string(),
                    province: province.to_string(),
                    commune: commune.to_string(),
                },
            )
            .collect();
        validate_schools(&schools)?;
        Ok(schools)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_sample_is_valid() {
        let schools = SampleDataset.schools().unwrap();
        assert_eq!(schools.len(), 30);
        let regions: HashSet<_> = schools.iter().map(|s| s.region.as_str()).collect();
        assert_eq!(regions.len(), 8);
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let mut schools = SampleDataset.schools().unwrap();
        schools[1].id = schools[0].id;
        assert!(matches!(validate_schools(&schools), Err(DataError::DuplicateId(1))));
    }

    #[test]
    fn test_json_file_source() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"id": 7, "name_latin": "École Oasis", "name_arabic": "مدرسة الواحة",
                 "address_latin": "Oasis", "type": "public", "level": "primaire",
                 "latitude": 31.9456, "longitude": -4.0119, "region": "Drâa-Tafilalet",
                 "province": "Errachidia", "commune": "Merzouga"}}]"#
        )
        .unwrap();
        file.flush().unwrap();

        let schools = JsonFileSource::new(file.path()).schools().unwrap();

        assert_eq!(schools.len(), 1);
        assert_eq!(schools[0].name_arabic.as_deref(), Some("مدرسة الواحة"));
    }

    #[test]
    fn test_malformed_json_reports_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "[{{\"id\": 1,").unwrap();
        file.flush().unwrap();

        let err = JsonFileSource::new(file.path()).schools().unwrap_err();
        assert!(matches!(err, DataError::Json { ref path, .. } if path == file.path()));
    }

    #[test]
    fn test_missing_file() {
        let err = JsonFileSource::new("/nonexistent/rihla.json").schools().unwrap_err();
        assert!(matches!(err, DataError::Io { .. }));
    }
}

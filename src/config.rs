//! Environment-driven configuration.
//!
//! | Variable                  | Meaning                                  |
//! |---------------------------|------------------------------------------|
//! | `RIHLA_OSRM_URL`          | OSRM base URL                            |
//! | `RIHLA_OSRM_PROFILE`      | OSRM profile (`driving`)                 |
//! | `RIHLA_OSRM_TIMEOUT_SECS` | HTTP timeout for route requests          |
//! | `RIHLA_DATASET`           | JSON dataset path; sample data otherwise |
//! | `RIHLA_ORIGIN`            | Fixed user position as `lat,lng`        |

use std::path::PathBuf;

use thiserror::Error;

use crate::coord::{Coordinate, CoordinateError};
use crate::dataset::{DataError, JsonFileSource, SampleDataset};
use crate::osrm::OsrmConfig;
use crate::school::School;
use crate::traits::SchoolSource;

pub const ENV_OSRM_URL: &str = "RIHLA_OSRM_URL";
pub const ENV_OSRM_PROFILE: &str = "RIHLA_OSRM_PROFILE";
pub const ENV_OSRM_TIMEOUT_SECS: &str = "RIHLA_OSRM_TIMEOUT_SECS";
pub const ENV_DATASET: &str = "RIHLA_DATASET";
pub const ENV_ORIGIN: &str = "RIHLA_ORIGIN";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{key}={value:?} is not a whole number of seconds")]
    InvalidTimeout { key: &'static str, value: String },
    #[error("{key} is not a valid position: {source}")]
    InvalidOrigin {
        key: &'static str,
        #[source]
        source: CoordinateError,
    },
}

#[derive(Debug, Clone, Default)]
pub struct ExplorerConfig {
    pub osrm: OsrmConfig,
    pub dataset: Option<PathBuf>,
    pub origin: Option<Coordinate>,
}

impl ExplorerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from any key lookup; unset or blank keys keep
    /// their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        if let Some(url) = get(ENV_OSRM_URL) {
            config.osrm.base_url = url;
        }
        if let Some(profile) = get(ENV_OSRM_PROFILE) {
            config.osrm.profile = profile;
        }
        if let Some(value) = get(ENV_OSRM_TIMEOUT_SECS) {
            config.osrm.timeout_secs = value.trim().parse().map_err(|_| ConfigError::InvalidTimeout {
                key: ENV_OSRM_TIMEOUT_SECS,
                value: value.clone(),
            })?;
        }
        config.dataset = get(ENV_DATASET).map(PathBuf::from);
        if let Some(value) = get(ENV_ORIGIN) {
            let origin = value.parse().map_err(|source| ConfigError::InvalidOrigin {
                key: ENV_ORIGIN,
                source,
            })?;
            config.origin = Some(origin);
        }
        Ok(config)
    }

    pub fn load_schools(&self) -> Result<Vec<School>, DataError> {
        match &self.dataset {
            Some(path) => JsonFileSource::new(path).schools(),
            None => SampleDataset.schools(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ExplorerConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.osrm.base_url, "https://router.project-osrm.org");
        assert!(config.dataset.is_none());
        assert!(config.origin.is_none());
        assert_eq!(config.load_schools().unwrap().len(), 30);
    }

    #[test]
    fn test_overrides() {
        let config = ExplorerConfig::from_lookup(lookup(&[
            (ENV_OSRM_URL, "http://localhost:5000"),
            (ENV_OSRM_PROFILE, "car"),
            (ENV_OSRM_TIMEOUT_SECS, " 30 "),
            (ENV_DATASET, "data/schools.json"),
            (ENV_ORIGIN, "33.5731,-7.5898"),
        ]))
        .unwrap();
        assert_eq!(config.osrm.base_url, "http://localhost:5000");
        assert_eq!(config.osrm.profile, "car");
        assert_eq!(config.osrm.timeout_secs, 30);
        assert_eq!(config.dataset, Some(PathBuf::from("data/schools.json")));
        assert_eq!(config.origin.map(|o| o.lat), Some(33.5731));
    }

    #[test]
    fn test_blank_values_keep_defaults() {
        let config = ExplorerConfig::from_lookup(lookup(&[(ENV_OSRM_PROFILE, "  ")])).unwrap();
        assert_eq!(config.osrm.profile, "driving");
    }

    #[test]
    fn test_bad_timeout() {
        let err = ExplorerConfig::from_lookup(lookup(&[(ENV_OSRM_TIMEOUT_SECS, "soon")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidTimeout { .. }));
    }

    #[test]
    fn test_bad_origin() {
        let err = ExplorerConfig::from_lookup(lookup(&[(ENV_ORIGIN, "95,0")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidOrigin { .. }));
    }
}

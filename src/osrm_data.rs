//! Local OSRM backend preparation (download + preprocess).
//!
//! Fetches a Geofabrik extract and runs the `osrm/osrm-backend` image over it
//! to produce an MLD dataset that `osrm-routed` can serve. Every step is
//! skipped when its output already exists.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process::Command;

use thiserror::Error;
use tracing::info;

pub const OSRM_IMAGE: &str = "osrm/osrm-backend";

#[derive(Debug, Clone)]
pub struct GeofabrikRegion {
    /// Geofabrik region path, e.g. "africa/morocco".
    pub path: String,
}

impl GeofabrikRegion {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }

    pub fn morocco() -> Self {
        Self::new("africa/morocco")
    }

    pub fn name(&self) -> &str {
        self.path.rsplit('/').next().unwrap_or("region")
    }

    pub fn url(&self) -> String {
        format!("https://download.geofabrik.de/{}-latest.osm.pbf", self.path)
    }
}

#[derive(Debug, Clone)]
pub struct OsrmDatasetConfig {
    pub region: GeofabrikRegion,
    pub data_root: PathBuf,
    /// Lua profile inside the image.
    pub profile: String,
}

impl OsrmDatasetConfig {
    pub fn new(region: GeofabrikRegion, data_root: impl Into<PathBuf>) -> Self {
        Self {
            region,
            data_root: data_root.into(),
            profile: "/opt/car.lua".to_string(),
        }
    }
}

/// Paths of a prepared dataset.
#[derive(Debug, Clone)]
pub struct OsrmDataset {
    pub data_dir: PathBuf,
    pub osrm_base: PathBuf,
    pub pbf_path: PathBuf,
}

#[derive(Debug, Error)]
pub enum OsrmDataError {
    #[error("filesystem error: {0}")]
    Io(#[from] io::Error),
    #[error("download failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("{step} failed: docker exited with {status}")]
    ProcessFailure { step: &'static str, status: String },
}

impl OsrmDataset {
    pub fn ensure(config: &OsrmDatasetConfig) -> Result<Self, OsrmDataError> {
        let name = config.region.name();
        let data_root = if config.data_root.is_absolute() {
            config.data_root.clone()
        } else {
            std::env::current_dir()?.join(&config.data_root)
        };
        let data_dir = data_root.join(name);
        fs::create_dir_all(&data_dir)?;

        let dataset = Self {
            pbf_path: data_dir.join(format!("{name}-latest.osm.pbf")),
            osrm_base: data_dir.join(format!("{name}-latest.osrm")),
            data_dir,
        };

        if !dataset.pbf_path.exists() {
            info!(url = %config.region.url(), "downloading extract");
            download(&config.region.url(), &dataset.pbf_path)?;
        }
        if !dataset.osrm_base.exists() {
            let pbf = dataset.in_container(&dataset.pbf_path);
            dataset.run_step("osrm-extract", &["-p", config.profile.as_str(), pbf.as_str()])?;
        }
        if !dataset.mld_ready() {
            let base = dataset.in_container(&dataset.osrm_base);
            dataset.run_step("osrm-partition", &[base.as_str()])?;
            dataset.run_step("osrm-customize", &[base.as_str()])?;
        }
        Ok(dataset)
    }

    /// File name of the `.osrm` base as seen from inside the container.
    pub fn container_osrm_path(&self) -> String {
        self.in_container(&self.osrm_base)
    }

    fn mld_ready(&self) -> bool {
        ["osrm.partition", "osrm.mldgr", "osrm.cells"]
            .iter()
            .all(|ext| self.osrm_base.with_extension(ext).exists())
            && self.osrm_base.exists()
    }

    fn in_container(&self, path: &Path) -> String {
        let file = path.file_name().and_then(|n| n.to_str()).unwrap_or_default();
        format!("/data/{file}")
    }

    fn run_step(&self, step: &'static str, args: &[&str]) -> Result<(), OsrmDataError> {
        info!(step, dir = %self.data_dir.display(), "running OSRM preprocessing");
        let status = Command::new("docker")
            .args(["run", "--rm", "-t", "-v"])
            .arg(format!("{}:/data", self.data_dir.display()))
            .arg(OSRM_IMAGE)
            .arg(step)
            .args(args)
            .status()?;

        if status.success() {
            Ok(())
        } else {
            Err(OsrmDataError::ProcessFailure {
                step,
                status: status.to_string(),
            })
        }
    }
}

fn download(url: &str, dest: &Path) -> Result<(), OsrmDataError> {
    let bytes = reqwest::blocking::get(url)?.error_for_status()?.bytes()?;
    let tmp_path = dest.with_extension("tmp");
    let mut writer = BufWriter::new(File::create(&tmp_path)?);
    writer.write_all(&bytes)?;
    writer.flush()?;
    fs::rename(tmp_path, dest)?;
    Ok(())
}

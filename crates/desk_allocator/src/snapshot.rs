use crate::config::DataConfig;
use crate::constants::{
    DESKS_FILE, METRICS_FILE, OCCUPANCY_FILE, POLICIES_FILE, PREFERENCES_FILE, SENSORS_FILE,
    SPACES_FILE,
};
use crate::error::{AllocatorError, Result};
use crate::model::{
    Desk, EmployeePreference, Metric, OccupancySnapshot, OrganizationalPolicies, Sensor, Space,
};

use log::{info, warn};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::io::ErrorKind;
use std::path::Path;

/// Read-only view of every record the allocator works on.
///
/// Built once at startup and shared by reference; nothing in the crate
/// mutates it after construction.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WorkspaceSnapshot {
    pub desks: Vec<Desk>,
    pub spaces: Vec<Space>,
    pub occupancy: OccupancySnapshot,
    pub sensors: Vec<Sensor>,
    pub metrics: Vec<Metric>,
    pub preferences: Vec<EmployeePreference>,
    pub policies: OrganizationalPolicies,
}

#[derive(Deserialize)]
struct DesksFile {
    desks: Vec<Desk>,
}

#[derive(Deserialize)]
struct SpacesFile {
    spaces: Vec<Space>,
}

#[derive(Deserialize)]
struct SensorsFile {
    sensors: Vec<Sensor>,
}

#[derive(Deserialize)]
struct MetricsFile {
    metrics: Vec<Metric>,
}

#[derive(Deserialize)]
struct PreferencesFile {
    employee_preferences: Vec<EmployeePreference>,
}

impl WorkspaceSnapshot {
    /// Reads every snapshot file from `config.dir`.
    ///
    /// # Errors
    /// Returns error if the directory is missing, a required file cannot be
    /// read, or any file is not valid JSON for its record type
    pub fn load_from_dir(config: &DataConfig) -> Result<Self> {
        let dir = config.dir.as_path();

        if !dir.exists() {
            return Err(AllocatorError::Io(std::io::Error::new(
                ErrorKind::NotFound,
                format!("Data directory does not exist: {}", dir.display()),
            )));
        }

        if !dir.is_dir() {
            return Err(AllocatorError::Io(std::io::Error::new(
                ErrorKind::InvalidInput,
                format!("Path is not a directory: {}", dir.display()),
            )));
        }

        info!("Loading data from: {}", dir.display());

        let desks = read_json::<DesksFile>(&dir.join(DESKS_FILE))?.desks;
        let spaces = read_json::<SpacesFile>(&dir.join(SPACES_FILE))?.spaces;
        let occupancy = read_json::<OccupancySnapshot>(&dir.join(OCCUPANCY_FILE))?;
        let preferences =
            read_json::<PreferencesFile>(&dir.join(PREFERENCES_FILE))?.employee_preferences;
        let policies = read_json::<OrganizationalPolicies>(&dir.join(POLICIES_FILE))?;
        let sensors = read_optional_json::<SensorsFile>(&dir.join(SENSORS_FILE))?
            .map(|f| f.sensors)
            .unwrap_or_default();
        let metrics = read_optional_json::<MetricsFile>(&dir.join(METRICS_FILE))?
            .map(|f| f.metrics)
            .unwrap_or_default();

        let snapshot = Self {
            desks,
            spaces,
            occupancy,
            sensors,
            metrics,
            preferences,
            policies,
        };
        info!(
            "Loaded {} desks, {} spaces, {} forecast areas, {} policies, {} employee profiles",
            snapshot.desks.len(),
            snapshot.spaces.len(),
            snapshot.occupancy.forecast.len(),
            snapshot.policies.policies.len(),
            snapshot.preferences.len()
        );
        Ok(snapshot)
    }

    /// Preference profile for `employee_id`, if one exists
    pub fn preference_for(&self, employee_id: &str) -> Option<&EmployeePreference> {
        self.preferences
            .iter()
            .find(|p| p.employee_id == employee_id)
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path).map_err(|e| AllocatorError::ReadSnapshot {
        path: path.to_path_buf(),
        source: e,
    })?;
    serde_json::from_str(&content).map_err(|e| AllocatorError::ParseSnapshot {
        path: path.to_path_buf(),
        source: e,
    })
}

fn read_optional_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    if !path.is_file() {
        warn!("Optional snapshot file not found, skipping: {}", path.display());
        return Ok(None);
    }
    read_json(path).map(Some)
}

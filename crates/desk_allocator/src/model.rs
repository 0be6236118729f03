//! Snapshot records and the structured query produced by the interpreter.
//!
//! All records are read-only once loaded; the allocation engine only ever
//! borrows them and builds new candidate lists.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DeskKind {
    Standing,
    Regular,
}

impl DeskKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeskKind::Standing => "standing",
            DeskKind::Regular => "regular",
        }
    }
}

impl fmt::Display for DeskKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DeskStatus {
    Available,
    Occupied,
    Maintenance,
}

impl fmt::Display for DeskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeskStatus::Available => write!(f, "available"),
            DeskStatus::Occupied => write!(f, "occupied"),
            DeskStatus::Maintenance => write!(f, "maintenance"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Desk {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: DeskKind,
    pub area_id: String,
    /// Area id on the occupancy platform; falls back to `area_id` when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vergesense_area_id: Option<String>,
    pub floor: u32,
    pub zone: String,
    pub location_description: String,
    #[serde(default)]
    pub features: Vec<String>,
    pub status: DeskStatus,
    pub last_used: DateTime<Utc>,
}

impl Desk {
    /// Area id used to look up occupancy and forecast data
    pub fn occupancy_area_id(&self) -> &str {
        self.vergesense_area_id.as_deref().unwrap_or(&self.area_id)
    }

    pub fn has_feature(&self, feature: &str) -> bool {
        self.features.iter().any(|f| f == feature)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SpaceKind {
    Floor,
    Zone,
    Area,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Space {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: SpaceKind,
    pub capacity: u32,
    #[serde(default)]
    pub parent_id: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeOfDay {
    Morning,
    Afternoon,
    Evening,
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeOfDay::Morning => write!(f, "morning"),
            TimeOfDay::Afternoon => write!(f, "afternoon"),
            TimeOfDay::Evening => write!(f, "evening"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct OccupancyReading {
    pub area_id: String,
    pub timestamp: DateTime<Utc>,
    pub occupancy_count: u32,
    pub occupancy_percentage: u8,
}

/// Forecast percentages for one day. Values are read as plain numbers and
/// buckets stay optional, so a malformed record is reported when it is used,
/// not when it is loaded.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct ForecastDetails {
    #[serde(default)]
    pub morning: Option<f64>,
    #[serde(default)]
    pub afternoon: Option<f64>,
    #[serde(default)]
    pub evening: Option<f64>,
}

impl ForecastDetails {
    pub fn get(&self, period: TimeOfDay) -> Option<f64> {
        match period {
            TimeOfDay::Morning => self.morning,
            TimeOfDay::Afternoon => self.afternoon,
            TimeOfDay::Evening => self.evening,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct AreaForecast {
    #[serde(default)]
    pub next_day: Option<ForecastDetails>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct OccupancySnapshot {
    #[serde(default)]
    pub occupancy_data: Vec<OccupancyReading>,
    /// Keyed by occupancy area id
    #[serde(default)]
    pub forecast: BTreeMap<String, AreaForecast>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EnforcementLevel {
    Mandatory,
    Preferred,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Policy {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub active: bool,
    pub enforcement_level: EnforcementLevel,
}

impl Policy {
    pub fn is_active_mandatory(&self) -> bool {
        self.active && self.enforcement_level == EnforcementLevel::Mandatory
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct DeskAssignmentRule {
    pub rule_id: String,
    pub description: String,
    pub priority: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct OrganizationalPolicies {
    #[serde(default)]
    pub policies: Vec<Policy>,
    /// Advisory only
    #[serde(default)]
    pub desk_assignment_rules: Vec<DeskAssignmentRule>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct EmployeePreference {
    pub employee_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub team: String,
    #[serde(default)]
    pub desk_preferences: Vec<String>,
    #[serde(default)]
    pub equipment_needs: Vec<String>,
    #[serde(default)]
    pub preferred_days: Vec<String>,
    #[serde(default)]
    pub preferred_location: String,
    #[serde(default)]
    pub accessibility_needs: Option<String>,
    #[serde(default)]
    pub adjacency_preferences: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Sensor {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub status: String,
    pub area_id: String,
    pub last_reading: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Metric {
    pub area_id: String,
    pub date: NaiveDate,
    pub peak_occupancy: u32,
    pub average_occupancy: u32,
    pub utilization_rate: f64,
}

/// Constraints extracted from a free-text request.
///
/// Every field is independently optional; an unset field never excludes a
/// desk.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct StructuredConstraints {
    pub desk_type: Option<DeskKind>,
    pub location_floor: Option<u32>,
    pub location_team: Option<String>,
    pub date: Option<NaiveDate>,
    pub time_period: Option<TimeOfDay>,
    /// Required feature tags, without duplicates, in insertion order
    pub features: Vec<String>,
}

impl StructuredConstraints {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a feature tag unless it is already present
    pub fn add_feature(&mut self, feature: &str) {
        if !self.features.iter().any(|f| f == feature) {
            self.features.push(feature.to_string());
        }
    }

    /// True when no field constrains the search
    pub fn is_unconstrained(&self) -> bool {
        self.desk_type.is_none()
            && self.location_floor.is_none()
            && self.location_team.is_none()
            && self.date.is_none()
            && self.time_period.is_none()
            && self.features.is_empty()
    }
}

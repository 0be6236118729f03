//! Shared fixtures for unit tests.

use crate::model::{
    AreaForecast, Desk, DeskKind, DeskStatus, EmployeePreference, EnforcementLevel,
    ForecastDetails, OccupancySnapshot, OrganizationalPolicies, Policy, Space, SpaceKind,
};
use crate::snapshot::WorkspaceSnapshot;
use chrono::{NaiveDate, TimeZone, Utc};

pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 5, 10).unwrap()
}

pub fn desk(
    id: &str,
    kind: DeskKind,
    area_id: &str,
    floor: u32,
    zone: &str,
    location: &str,
) -> Desk {
    Desk {
        id: id.to_string(),
        kind,
        area_id: area_id.to_string(),
        vergesense_area_id: None,
        floor,
        zone: zone.to_string(),
        location_description: location.to_string(),
        features: Vec::new(),
        status: DeskStatus::Available,
        last_used: Utc.with_ymd_and_hms(2024, 5, 9, 17, 0, 0).unwrap(),
    }
}

pub fn space(id: &str, name: &str, kind: SpaceKind, parent_id: Option<&str>) -> Space {
    Space {
        id: id.to_string(),
        name: name.to_string(),
        kind,
        capacity: 20,
        parent_id: parent_id.map(str::to_string),
    }
}

pub fn policy(id: &str, active: bool, level: EnforcementLevel) -> Policy {
    Policy {
        id: id.to_string(),
        name: id.to_string(),
        description: String::new(),
        active,
        enforcement_level: level,
    }
}

pub fn preference(employee_id: &str, desk_prefs: &[&str], equipment: &[&str]) -> EmployeePreference {
    EmployeePreference {
        employee_id: employee_id.to_string(),
        name: String::new(),
        team: String::new(),
        desk_preferences: desk_prefs.iter().map(|s| s.to_string()).collect(),
        equipment_needs: equipment.iter().map(|s| s.to_string()).collect(),
        preferred_days: Vec::new(),
        preferred_location: String::new(),
        accessibility_needs: None,
        adjacency_preferences: Vec::new(),
    }
}

pub fn forecast(morning: u8, afternoon: u8, evening: u8) -> AreaForecast {
    AreaForecast {
        next_day: Some(ForecastDetails {
            morning: Some(f64::from(morning)),
            afternoon: Some(f64::from(afternoon)),
            evening: Some(f64::from(evening)),
        }),
    }
}

pub fn fixture_spaces() -> Vec<Space> {
    vec![
        space("F-1", "Floor 1", SpaceKind::Floor, None),
        space("F-2", "Floor 2", SpaceKind::Floor, None),
        space("F-3", "Floor 3", SpaceKind::Floor, None),
        space("Z-MKT", "Marketing Zone", SpaceKind::Zone, Some("F-3")),
        space("Z-SALES", "Sales Zone", SpaceKind::Zone, Some("F-2")),
        space("Z-ENG", "Engineering Zone", SpaceKind::Zone, Some("F-1")),
        space("A-MKT-1", "Marketing North", SpaceKind::Area, Some("Z-MKT")),
        space("A-MKT-2", "Marketing South", SpaceKind::Area, Some("Z-MKT")),
        space("A-SALES-1", "Sales Pod", SpaceKind::Area, Some("Z-SALES")),
        space("A-ENG-1", "Engineering Bay", SpaceKind::Area, Some("Z-ENG")),
    ]
}

pub fn fixture_occupancy() -> OccupancySnapshot {
    let mut occupancy = OccupancySnapshot::default();
    occupancy.forecast.insert("A-MKT-1".into(), forecast(55, 40, 10));
    occupancy.forecast.insert("A-MKT-2".into(), forecast(60, 85, 15));
    occupancy.forecast.insert("A-SALES-1".into(), forecast(75, 65, 20));
    occupancy.forecast.insert("A-ENG-1".into(), forecast(30, 72, 5));
    occupancy
}

pub fn fixture_snapshot() -> WorkspaceSnapshot {
    let mut mkt_stand = desk(
        "MKT-STAND-3",
        DeskKind::Standing,
        "A-MKT-1",
        3,
        "Marketing Zone",
        "Floor 3, Marketing North, window row",
    );
    mkt_stand.features = vec!["adjustable-height".into(), "near-window".into()];

    let mut mkt_reg = desk(
        "MKT-REG-3",
        DeskKind::Regular,
        "A-MKT-1",
        3,
        "Marketing Zone",
        "Floor 3, Marketing North, aisle",
    );
    mkt_reg.features = vec!["dual-monitors".into(), "ergonomic-chair".into()];

    let mkt_reg_south = desk(
        "MKT-REG-2",
        DeskKind::Regular,
        "A-MKT-2",
        2,
        "Marketing Zone",
        "Floor 2, Marketing South",
    );

    let mut sales_stand = desk(
        "SALES-STAND-2",
        DeskKind::Standing,
        "A-SALES-1",
        2,
        "Sales Zone",
        "Floor 2, Sales Pod",
    );
    sales_stand.status = DeskStatus::Occupied;

    let mut eng_maint = desk(
        "ENG-MAINT-1",
        DeskKind::Regular,
        "A-ENG-1",
        1,
        "Engineering Zone",
        "Floor 1, Engineering Bay, corner",
    );
    eng_maint.status = DeskStatus::Maintenance;

    let mut eng_stand = desk(
        "ENG-STAND-1",
        DeskKind::Standing,
        "A-ENG-1",
        1,
        "Engineering Zone",
        "Floor 1, Engineering Bay, centre",
    );
    eng_stand.features = vec!["quiet-area".into(), "adjustable-height".into()];

    let mut quiet = desk(
        "QUIET-REG-4",
        DeskKind::Regular,
        "A-QUIET-1",
        4,
        "Quiet Zone",
        "Floor 4, Library",
    );
    quiet.features = vec!["quiet-area".into(), "near-window".into()];

    WorkspaceSnapshot {
        desks: vec![
            quiet,
            mkt_reg,
            eng_maint,
            mkt_stand,
            sales_stand,
            eng_stand,
            mkt_reg_south,
        ],
        spaces: fixture_spaces(),
        occupancy: fixture_occupancy(),
        sensors: Vec::new(),
        metrics: Vec::new(),
        preferences: vec![
            preference("E-STAND", &["standing"], &["docking-station"]),
            preference("E-DUAL", &["near-window"], &["dual-monitors"]),
        ],
        policies: OrganizationalPolicies {
            policies: vec![
                policy("POL-001", true, EnforcementLevel::Mandatory),
                policy("POL-002", true, EnforcementLevel::Mandatory),
                policy("POL-003", true, EnforcementLevel::Preferred),
            ],
            desk_assignment_rules: Vec::new(),
        },
    }
}

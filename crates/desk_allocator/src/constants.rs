/// Forecast occupancy (percent) below which an area counts as available
pub const DEFAULT_FORECAST_THRESHOLD: u8 = 70;
pub const MAX_PERCENTAGE: u8 = 100;

/// Mandatory policy ids that exclude desks under maintenance
pub const DEFAULT_SANITIZATION_POLICY_IDS: &[&str] = &["POL-002"];

/// Snapshot file names inside the data directory
pub const DESKS_FILE: &str = "desk_inventory.json";
pub const SPACES_FILE: &str = "verge_spaces.json";
pub const OCCUPANCY_FILE: &str = "verge_occupancy.json";
pub const SENSORS_FILE: &str = "verge_sensors.json"; // optional
pub const METRICS_FILE: &str = "verge_metrics.json"; // optional
pub const PREFERENCES_FILE: &str = "employee_preferences.json";
pub const POLICIES_FILE: &str = "organizational_policies.json";

/// Default locations
pub const DEFAULT_DATA_DIR: &str = "data";
pub const DEFAULT_OUTPUT_DIR: &str = "csv";
pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

/// Environment override for the data directory
pub const ENV_DATA_DIR: &str = "DESK_ALLOCATOR_DATA_DIR";

/// Header of exported allocation CSV files
pub const EXPORT_HEADER: [&str; 8] = [
    "Rank", "Id", "Type", "Floor", "Zone", "Location", "Status", "Features",
];
pub const FEATURE_SEPARATOR: &str = ";";

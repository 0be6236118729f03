//! Multi-stage allocation engine.
//!
//! Candidates flow through four stages in a fixed order, each taking the
//! previous stage's output:
//!
//! 1. attribute filter (kind, floor, team, features; AND semantics)
//! 2. availability filter (next-day forecast, or live desk status)
//! 3. mandatory policy filter
//! 4. preference partition (only with a known employee)
//!
//! Stages 1-3 only narrow the list and stage 4 only reorders it. When stage 4
//! does not run, the survivors are sorted by location description.

use crate::clock::Clock;
use crate::constants::{
    DEFAULT_FORECAST_THRESHOLD, DEFAULT_SANITIZATION_POLICY_IDS, MAX_PERCENTAGE,
};
use crate::error::{AllocatorError, Result};
use crate::model::{
    Desk, DeskStatus, EmployeePreference, OccupancySnapshot, Policy, Space, SpaceKind,
    StructuredConstraints, TimeOfDay,
};
use crate::snapshot::WorkspaceSnapshot;

use chrono::NaiveDate;
use log::debug;
use std::collections::HashSet;

/// Tunable constants of the pipeline
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineSettings {
    pub forecast_threshold: u8,
    pub sanitization_policy_ids: Vec<String>,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            forecast_threshold: DEFAULT_FORECAST_THRESHOLD,
            sanitization_policy_ids: DEFAULT_SANITIZATION_POLICY_IDS
                .iter()
                .map(|id| id.to_string())
                .collect(),
        }
    }
}

/// Candidate count after each stage
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StageCounts {
    pub inventory: usize,
    pub attributes: usize,
    pub availability: usize,
    pub policies: usize,
    pub preferences: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Allocation {
    pub desks: Vec<Desk>,
    pub counts: StageCounts,
    /// Whether the preference partition decided the final order
    pub preference_applied: bool,
}

pub struct AllocationEngine<'a, C: Clock> {
    snapshot: &'a WorkspaceSnapshot,
    settings: EngineSettings,
    clock: C,
}

impl<'a, C: Clock> AllocationEngine<'a, C> {
    pub fn new(snapshot: &'a WorkspaceSnapshot, clock: C) -> Self {
        Self {
            snapshot,
            settings: EngineSettings::default(),
            clock,
        }
    }

    pub fn with_settings(mut self, settings: EngineSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    /// Ordered list of eligible desks
    pub fn allocate(
        &self,
        constraints: &StructuredConstraints,
        employee_id: Option<&str>,
    ) -> Result<Vec<Desk>> {
        self.allocate_with_trace(constraints, employee_id)
            .map(|allocation| allocation.desks)
    }

    /// Same as [`allocate`](Self::allocate), also reporting per-stage counts.
    ///
    /// # Errors
    /// Returns [`AllocatorError::SnapshotIntegrity`] when the forecast branch
    /// meets a forecast record without the requested time-of-day.
    pub fn allocate_with_trace(
        &self,
        constraints: &StructuredConstraints,
        employee_id: Option<&str>,
    ) -> Result<Allocation> {
        let snapshot = self.snapshot;
        let mut counts = StageCounts {
            inventory: snapshot.desks.len(),
            ..StageCounts::default()
        };

        let candidates = filter_by_attributes(&snapshot.desks, &snapshot.spaces, constraints);
        counts.attributes = candidates.len();

        let candidates = filter_by_availability(
            candidates,
            constraints,
            &snapshot.occupancy,
            self.clock.tomorrow(),
            self.settings.forecast_threshold,
        )?;
        counts.availability = candidates.len();

        let candidates = apply_mandatory_policies(
            candidates,
            &snapshot.policies.policies,
            &self.settings.sanitization_policy_ids,
        );
        counts.policies = candidates.len();

        let preference = employee_id.and_then(|id| {
            let found = snapshot.preference_for(id);
            if found.is_none() {
                debug!("No preference profile for employee {}", id);
            }
            found
        });

        let (mut candidates, preference_applied) = match preference {
            Some(pref) => (rank_by_preference(candidates, pref), true),
            None => (candidates, false),
        };
        if !preference_applied {
            sort_by_location(&mut candidates);
        }
        counts.preferences = candidates.len();

        debug!(
            "Allocation stages: inventory={} attributes={} availability={} policies={} final={}",
            counts.inventory,
            counts.attributes,
            counts.availability,
            counts.policies,
            counts.preferences
        );

        Ok(Allocation {
            desks: candidates.into_iter().cloned().collect(),
            counts,
            preference_applied,
        })
    }
}

// ============================================================================
// Stage 1: attribute filter
// ============================================================================

/// Desks satisfying every constraint that is set
pub fn filter_by_attributes<'a>(
    desks: &'a [Desk],
    spaces: &[Space],
    constraints: &StructuredConstraints,
) -> Vec<&'a Desk> {
    let team = constraints.location_team.as_deref().map(|team| {
        (
            team_area_ids(spaces, team),
            format!("{} zone", team.to_lowercase()),
        )
    });

    desks
        .iter()
        .filter(|desk| constraints.desk_type.is_none_or(|kind| desk.kind == kind))
        .filter(|desk| constraints.location_floor.is_none_or(|floor| desk.floor == floor))
        .filter(|desk| match &team {
            Some((areas, zone_label)) => {
                areas.contains(desk.area_id.as_str()) || desk.zone.to_lowercase() == *zone_label
            }
            None => true,
        })
        .filter(|desk| constraints.features.iter().all(|f| desk.has_feature(f)))
        .collect()
}

/// Area ids under any zone whose name contains `team` (case-insensitive)
pub fn team_area_ids<'s>(spaces: &'s [Space], team: &str) -> HashSet<&'s str> {
    let team = team.to_lowercase();
    let zones: HashSet<&str> = spaces
        .iter()
        .filter(|s| s.kind == SpaceKind::Zone && s.name.to_lowercase().contains(&team))
        .map(|s| s.id.as_str())
        .collect();

    spaces
        .iter()
        .filter(|s| s.kind == SpaceKind::Area)
        .filter(|s| s.parent_id.as_deref().is_some_and(|p| zones.contains(p)))
        .map(|s| s.id.as_str())
        .collect()
}

// ============================================================================
// Stage 2: availability filter
// ============================================================================

/// Forecast check for a next-day request, live status otherwise
pub fn filter_by_availability<'a>(
    desks: Vec<&'a Desk>,
    constraints: &StructuredConstraints,
    occupancy: &OccupancySnapshot,
    tomorrow: NaiveDate,
    threshold: u8,
) -> Result<Vec<&'a Desk>> {
    match (constraints.date, constraints.time_period) {
        (Some(date), Some(period)) if date == tomorrow => {
            let available = available_forecast_areas(occupancy, period, threshold)?;
            debug!(
                "Forecast branch: {} of {} areas below {}% for {}",
                available.len(),
                occupancy.forecast.len(),
                threshold,
                period
            );
            Ok(desks
                .into_iter()
                .filter(|desk| available.contains(desk.occupancy_area_id()))
                .collect())
        }
        _ => Ok(desks
            .into_iter()
            .filter(|desk| desk.status == DeskStatus::Available)
            .collect()),
    }
}

/// Forecast areas whose next-day percentage for `period` is below `threshold`.
///
/// Areas missing from the forecast are never in the result. A percentage that
/// is not a number in `0..=100` is an integrity error; fractions are allowed.
pub fn available_forecast_areas(
    occupancy: &OccupancySnapshot,
    period: TimeOfDay,
    threshold: u8,
) -> Result<HashSet<&str>> {
    let mut available = HashSet::new();
    for (area_id, forecast) in &occupancy.forecast {
        let next_day = forecast
            .next_day
            .as_ref()
            .ok_or_else(|| AllocatorError::integrity(area_id, "forecast has no next_day entry"))?;
        let percentage = next_day.get(period).ok_or_else(|| {
            AllocatorError::integrity(area_id, format!("next_day forecast has no {} value", period))
        })?;
        if !(0.0..=f64::from(MAX_PERCENTAGE)).contains(&percentage) {
            return Err(AllocatorError::integrity(
                area_id,
                format!("next_day {} value {} is not a percentage", period, percentage),
            ));
        }
        if percentage < f64::from(threshold) {
            available.insert(area_id.as_str());
        }
    }
    Ok(available)
}

// ============================================================================
// Stage 3: mandatory policy filter
// ============================================================================

/// Applies the coded rules of active mandatory policies.
///
/// Only sanitization policies are enforced (maintenance desks are dropped);
/// other mandatory policies are advisory here.
pub fn apply_mandatory_policies<'a>(
    desks: Vec<&'a Desk>,
    policies: &[Policy],
    sanitization_policy_ids: &[String],
) -> Vec<&'a Desk> {
    let mut sanitization_active = false;
    for policy in policies.iter().filter(|p| p.is_active_mandatory()) {
        if sanitization_policy_ids.iter().any(|id| *id == policy.id) {
            sanitization_active = true;
        } else {
            debug!("Mandatory policy {} has no coded rule, skipping", policy.id);
        }
    }

    if !sanitization_active {
        return desks;
    }
    desks
        .into_iter()
        .filter(|desk| desk.status != DeskStatus::Maintenance)
        .collect()
}

// ============================================================================
// Stage 4: preference partition
// ============================================================================

/// Whether `desk` matches the employee's desk preferences or equipment needs
pub fn is_preferred(desk: &Desk, preference: &EmployeePreference) -> bool {
    let matches_desk_preference = preference
        .desk_preferences
        .iter()
        .any(|p| desk.has_feature(p) || p == desk.kind.as_str());
    let meets_equipment_needs = preference
        .equipment_needs
        .iter()
        .all(|eq| desk.has_feature(eq));
    matches_desk_preference || meets_equipment_needs
}

/// Preferred desks first, then the rest, each keeping input order
pub fn rank_by_preference<'a>(
    desks: Vec<&'a Desk>,
    preference: &EmployeePreference,
) -> Vec<&'a Desk> {
    let (mut preferred, other): (Vec<_>, Vec<_>) = desks
        .into_iter()
        .partition(|desk| is_preferred(desk, preference));
    debug!(
        "Preference partition for {}: {} preferred, {} other",
        preference.employee_id,
        preferred.len(),
        other.len()
    );
    preferred.extend(other);
    preferred
}

/// Stable ascending sort on location description
pub fn sort_by_location(desks: &mut [&Desk]) {
    desks.sort_by(|a, b| a.location_description.cmp(&b.location_description));
}

use crate::clock::Clock;
use crate::engine::{Allocation, AllocationEngine, EngineSettings};
use crate::error::Result;
use crate::interpreter::QueryInterpreter;
use crate::model::StructuredConstraints;
use crate::snapshot::WorkspaceSnapshot;

use log::info;

/// Interpreted query together with its allocation
#[derive(Debug, Clone, PartialEq)]
pub struct Recommendation {
    pub constraints: StructuredConstraints,
    pub allocation: Allocation,
}

/// Free text in, ordered desks out.
///
/// Holds a borrowed snapshot, so one loaded snapshot can back any number of
/// services, including across threads.
pub struct RecommendationService<'a, C: Clock> {
    snapshot: &'a WorkspaceSnapshot,
    settings: EngineSettings,
    interpreter: QueryInterpreter<C>,
}

impl<'a, C: Clock> RecommendationService<'a, C> {
    pub fn new(snapshot: &'a WorkspaceSnapshot, settings: EngineSettings, clock: C) -> Self {
        Self {
            snapshot,
            settings,
            interpreter: QueryInterpreter::new(clock),
        }
    }

    pub fn interpret(&self, query_text: &str) -> StructuredConstraints {
        self.interpreter.interpret(query_text)
    }

    pub fn recommend(&self, query_text: &str, employee_id: Option<&str>) -> Result<Recommendation> {
        let constraints = self.interpret(query_text);
        let allocation = AllocationEngine::new(self.snapshot, self.interpreter.clock())
            .with_settings(self.settings.clone())
            .allocate_with_trace(&constraints, employee_id)?;
        info!(
            "Query matched {} of {} desks",
            allocation.desks.len(),
            allocation.counts.inventory
        );
        Ok(Recommendation {
            constraints,
            allocation,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::model::DeskKind;
    use crate::test_support::{fixture_snapshot, today};
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_recommend_scenario() {
        let snapshot = fixture_snapshot();
        let service =
            RecommendationService::new(&snapshot, EngineSettings::default(), FixedClock(today()));

        let rec = service
            .recommend(
                "Find me an available standing desk near the marketing team on the 3rd floor for tomorrow afternoon.",
                None,
            )
            .unwrap();
        assert_eq!(rec.constraints.desk_type, Some(DeskKind::Standing));
        let ids: Vec<_> = rec.allocation.desks.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, vec!["MKT-STAND-3"]);
    }

    #[test]
    fn test_interpret_and_allocation_share_one_clock() {
        // year boundary: "tomorrow" must resolve to the same day in both places
        let new_years_eve = chrono::NaiveDate::from_ymd_opt(2024, 12, 31).unwrap();
        let snapshot = fixture_snapshot();
        let service = RecommendationService::new(
            &snapshot,
            EngineSettings::default(),
            FixedClock(new_years_eve),
        );

        let text = "standing desk tomorrow afternoon";
        let constraints = service.interpret(text);
        assert_eq!(
            constraints,
            QueryInterpreter::new(FixedClock(new_years_eve)).interpret(text)
        );
        assert_eq!(constraints.date, chrono::NaiveDate::from_ymd_opt(2025, 1, 1));

        // the forecast branch ran: occupied SALES-STAND-2 is kept on forecast grounds
        let rec = service.recommend(text, None).unwrap();
        assert_eq!(rec.constraints, constraints);
        let ids: Vec<_> = rec.allocation.desks.iter().map(|d| d.id.as_str()).collect();
        assert!(ids.contains(&"SALES-STAND-2"), "{ids:?}");
    }

    #[test]
    fn test_recommend_against_sample_data() {
        let config = crate::config::DataConfig {
            dir: std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data"),
        };
        let snapshot = WorkspaceSnapshot::load_from_dir(&config).unwrap();
        let service =
            RecommendationService::new(&snapshot, EngineSettings::default(), FixedClock(today()));

        let rec = service
            .recommend(
                "standing desk near the marketing team on the 3rd floor for tomorrow afternoon",
                None,
            )
            .unwrap();
        let ids: Vec<_> = rec.allocation.desks.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, vec!["DESK-301"]);

        // EMP-002 prefers quiet areas: the quiet desk leads the engineering list
        let rec = service
            .recommend("engineering team today morning", Some("EMP-002"))
            .unwrap();
        assert!(rec.allocation.preference_applied);
        assert_eq!(rec.allocation.desks[0].id, "DESK-101");
    }

    #[test]
    fn test_shared_snapshot_across_threads() {
        let snapshot = Arc::new(fixture_snapshot());
        let handles: Vec<_> = ["show me desks", "standing desk", "engineering team"]
            .into_iter()
            .map(|query| {
                let snapshot = Arc::clone(&snapshot);
                thread::spawn(move || {
                    let service = RecommendationService::new(
                        &snapshot,
                        EngineSettings::default(),
                        FixedClock(today()),
                    );
                    service.recommend(query, Some("E-STAND")).unwrap()
                })
            })
            .collect();

        for handle in handles {
            let rec = handle.join().unwrap();
            assert!(!rec.allocation.desks.is_empty());
        }
        assert_eq!(*snapshot, fixture_snapshot());
    }
}

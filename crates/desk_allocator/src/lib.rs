pub mod clock;
pub mod config;
pub mod constants;
pub mod engine;
pub mod error;
pub mod export;
pub mod interpreter;
pub mod model;
pub mod recommend;
pub mod snapshot;

#[cfg(test)]
pub(crate) mod test_support;

pub use clock::{Clock, FixedClock, SystemClock, next_day};
pub use config::Config;
pub use constants::{DEFAULT_FORECAST_THRESHOLD, DEFAULT_SANITIZATION_POLICY_IDS};
pub use engine::{Allocation, AllocationEngine, EngineSettings, StageCounts};
pub use error::{AllocatorError, Result};
pub use export::export_to_csv;
pub use interpreter::{QueryInterpreter, interpret};
pub use model::{Desk, DeskKind, DeskStatus, StructuredConstraints, TimeOfDay};
pub use recommend::{Recommendation, RecommendationService};
pub use snapshot::WorkspaceSnapshot;

/// Collection pipeline: per-participant aggregation and the cohort-level
/// loop that drives it.
pub mod cohort;
pub mod participant;

pub use cohort::CohortCollector;
pub use participant::ParticipantCollector;

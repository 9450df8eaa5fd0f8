pub mod engine;
pub mod oracle;
pub mod report;

pub use engine::{GenerationStats, MetricsEngine};
pub use oracle::FitnessOracle;
pub use report::{MemberSummary, PopulationReport, Termination};

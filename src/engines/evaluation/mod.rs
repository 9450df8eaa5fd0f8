pub mod analyzer;
pub mod assembly;
pub mod geometry;
pub mod sections;
pub mod stress;
pub mod units;

pub use analyzer::MechanicalAnalyzer;
pub use assembly::{ActuatorLoad, StressMap};
pub use stress::{DomainError, DomainResult};

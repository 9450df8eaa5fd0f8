pub mod traits;
pub mod evolution;
pub mod fitness;
pub mod data;
pub mod manager;

pub use manager::{ConfigManager, AppConfig};
pub use evolution::EvolutionConfig;
pub use fitness::FitnessConfig;
pub use data::DataConfig;

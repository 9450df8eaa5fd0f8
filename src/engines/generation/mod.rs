pub mod bootstrap;
pub mod evaluator;
pub mod evolution_engine;
pub mod genome;
pub mod lifecycle;
pub mod operators;
pub mod progress;
pub mod reproduction;
pub mod selection;

pub use bootstrap::{bootstrap, BootstrapOutcome, BootstrapSettings};
pub use evaluator::PopulationEvaluator;
pub use evolution_engine::{EvolutionEngine, RunResult, BASE_PAIRS};
pub use genome::Genome;
pub use lifecycle::{age_population, AgingOutcome};
pub use progress::{ChannelProgressCallback, ConsoleProgressCallback, ProgressCallback, ProgressMessage};
pub use selection::{discard_unfit, FitnessPartition};

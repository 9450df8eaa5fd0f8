use crate::engines::metrics::GenerationStats;
use std::sync::mpsc::Sender;

pub trait ProgressCallback: Send {
    fn on_bootstrap_retry(&mut self, attempt: usize, healthy_fraction: f64);
    fn on_generation_start(&mut self, generation: usize);
    fn on_generation_complete(&mut self, stats: &GenerationStats);
}

pub struct ConsoleProgressCallback;

impl ProgressCallback for ConsoleProgressCallback {
    fn on_bootstrap_retry(&mut self, attempt: usize, healthy_fraction: f64) {
        if attempt % 10 == 1 {
            println!(
                "  Bootstrap retry {} ({:.0}% healthy)",
                attempt,
                healthy_fraction * 100.0
            );
        }
    }

    fn on_generation_start(&mut self, generation: usize) {
        println!("Generation {} starting...", generation);
    }

    fn on_generation_complete(&mut self, stats: &GenerationStats) {
        println!(
            "Generation {} complete. Members: {}, max fitness: {:.2}, average: {:.2}",
            stats.generation, stats.population_count, stats.max_fitness, stats.average_fitness
        );
    }
}

// For a consumer on another thread
pub struct ChannelProgressCallback {
    sender: Sender<ProgressMessage>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ProgressMessage {
    BootstrapRetry { attempt: usize, healthy_fraction: f64 },
    GenerationStart(usize),
    GenerationComplete(GenerationStats),
}

impl ChannelProgressCallback {
    pub fn new(sender: Sender<ProgressMessage>) -> Self {
        Self { sender }
    }
}

impl ProgressCallback for ChannelProgressCallback {
    fn on_bootstrap_retry(&mut self, attempt: usize, healthy_fraction: f64) {
        let _ = self.sender.send(ProgressMessage::BootstrapRetry {
            attempt,
            healthy_fraction,
        });
    }

    fn on_generation_start(&mut self, generation: usize) {
        let _ = self.sender.send(ProgressMessage::GenerationStart(generation));
    }

    fn on_generation_complete(&mut self, stats: &GenerationStats) {
        let _ = self.sender.send(ProgressMessage::GenerationComplete(stats.clone()));
    }
}

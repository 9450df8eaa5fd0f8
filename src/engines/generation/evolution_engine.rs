use crate::config::{EvolutionConfig, FitnessConfig};
use crate::data::DesignTables;
use crate::engines::generation::{
    bootstrap::{bootstrap, BootstrapSettings},
    evaluator::PopulationEvaluator,
    lifecycle::age_population,
    progress::ProgressCallback,
    reproduction::{pair_mut, reproduce_pair},
    selection::{discard_unfit, FitnessPartition},
};
use crate::engines::metrics::{FitnessOracle, GenerationStats, MetricsEngine, PopulationReport, Termination};
use crate::error::{LegforgeError, Result};
use crate::population::{GenerationContext, Member, MemberDesign, Population};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Minimum breeding pairs per generation, before the replacement quota.
pub const BASE_PAIRS: usize = 8;

/// Outcome of one optimisation run.
#[derive(Debug, Clone)]
pub struct RunResult {
    pub report: PopulationReport,
    pub population: Population,
}

pub struct EvolutionEngine<'a> {
    config: EvolutionConfig,
    tables: &'a DesignTables,
    evaluator: PopulationEvaluator<'a>,
    rng: StdRng,
}

impl<'a> EvolutionEngine<'a> {
    pub fn new(config: EvolutionConfig, fitness: FitnessConfig, tables: &'a DesignTables) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let evaluator = PopulationEvaluator::new(tables, FitnessOracle::new(fitness), config.parallel);

        Self {
            config,
            tables,
            evaluator,
            rng,
        }
    }

    pub fn config(&self) -> &EvolutionConfig {
        &self.config
    }

    /// Bootstrap a fresh population and evolve it for the configured number of generations.
    /// A dead population ends the run early and is reported in the result; any other error
    /// aborts it.
    pub fn run<C: ProgressCallback>(&mut self, run: usize, callback: &mut C) -> Result<RunResult> {
        self.run_seeded(run, &[], callback)
    }

    /// `run` with stored designs placed first in the initial population. Random members fill it
    /// up to the configured size.
    pub fn run_seeded<C: ProgressCallback>(
        &mut self,
        run: usize,
        seeds: &[MemberDesign],
        callback: &mut C,
    ) -> Result<RunResult> {
        let mut ctx = GenerationContext::new(self.config.newborn_age);
        let mut members = seeds
            .iter()
            .map(|design| Member::from_design(&mut ctx, self.tables, design, &mut self.rng))
            .collect::<Result<Vec<_>>>()?;
        for _ in members.len()..self.config.population_size {
            members.push(Member::random(&mut ctx, self.tables, &mut self.rng)?);
        }

        log::info!(
            "Run {}: bootstrapping {} members ({} seeded)",
            run,
            members.len(),
            seeds.len()
        );
        let settings = BootstrapSettings {
            viability_threshold: self.config.viability_threshold,
            max_retries: self.config.max_bootstrap_retries,
        };
        let outcome = bootstrap(members, &self.evaluator, settings, &mut self.rng, |attempt, fraction| {
            callback.on_bootstrap_retry(attempt, fraction)
        })?;

        let mut population = outcome.population;
        let mut history = vec![MetricsEngine::calculate(ctx.generation, &population)];
        let mut termination = Termination::Completed;

        for _ in 0..self.config.num_generations {
            callback.on_generation_start(ctx.generation + 1);
            match self.step(&mut population, &mut ctx) {
                Ok(stats) => {
                    callback.on_generation_complete(&stats);
                    history.push(stats);
                }
                Err(e) if e.is_dead_population() => {
                    log::error!("Run {} stopped: {}", run, e);
                    for member in population.iter() {
                        log::error!(
                            "  member {} age {} fitness {:.3} valid {}",
                            member.id,
                            member.age,
                            member.total_fitness,
                            member.is_valid
                        );
                    }
                    termination = Termination::DeadPopulation {
                        generation: ctx.generation + 1,
                    };
                    break;
                }
                Err(e) => return Err(e),
            }
        }

        let report = PopulationReport::new(run, termination, history, &population);
        if let Some(best) = report.best() {
            log::info!(
                "Run {} finished after generation {}: best member {} with fitness {:.3}",
                run,
                report.generations_completed(),
                best.id,
                best.total_fitness
            );
        }
        Ok(RunResult { report, population })
    }

    /// One generation: evaluate, age, discard the unfit, then breed `BASE_PAIRS` plus the
    /// replacement quota of pairs from a fitness partition and add the evaluated offspring.
    pub fn step(&mut self, population: &mut Population, ctx: &mut GenerationContext) -> Result<GenerationStats> {
        let generation = ctx.generation + 1;
        self.evaluator.evaluate(&mut population.members)?;

        let aging = age_population(&mut population.members, &mut self.rng);
        let discarded = discard_unfit(&mut population.members);
        let quota = aging.replacement_quota() + discarded;

        let Some(partition) = FitnessPartition::from_members(&population.members).filter(|p| p.len() >= 2) else {
            return Err(dead_population(generation, population));
        };

        let pairs = BASE_PAIRS + quota;
        log::debug!(
            "Generation {}: {} deaths, {} discarded, breeding {} pairs from {} members",
            generation,
            aging.deaths(),
            discarded,
            pairs,
            population.len()
        );

        let mut offspring = Vec::with_capacity(pairs * 2);
        for _ in 0..pairs {
            let Some((i, j)) = partition.select_pair(&mut self.rng) else {
                return Err(dead_population(generation, population));
            };
            let Some((left, right)) = pair_mut(&mut population.members, i, j) else {
                return Err(dead_population(generation, population));
            };
            let (first, second) = reproduce_pair(left, right, ctx, &mut self.rng)?;
            offspring.push(first);
            offspring.push(second);
        }

        self.evaluator.evaluate(&mut offspring)?;
        population.members.extend(offspring);
        ctx.advance();

        Ok(MetricsEngine::calculate(ctx.generation, population))
    }
}

fn dead_population(generation: usize, population: &Population) -> LegforgeError {
    LegforgeError::DeadPopulation {
        generation,
        population_size: population.len(),
        total_fitness: population.total_fitness(),
    }
}

use super::evaluator::PopulationEvaluator;
use crate::error::Result;
use crate::population::{Member, Population};
use rand::Rng;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BootstrapSettings {
    /// Healthy fraction the population must reach.
    pub viability_threshold: f64,
    pub max_retries: usize,
}

#[derive(Debug, Clone)]
pub struct BootstrapOutcome {
    pub population: Population,
    pub retries: usize,
    /// Unhealthy members removed after the retry bound was hit.
    pub discarded: usize,
    pub viable: bool,
}

/// Evaluate a fresh population and repair it until enough members are healthy. Each retry redraws
/// the variables of every unhealthy member (materials are kept) and re-evaluates them. If the
/// retry bound runs out first, the members that are still unhealthy are discarded.
pub fn bootstrap<R, F>(
    members: Vec<Member>,
    evaluator: &PopulationEvaluator<'_>,
    settings: BootstrapSettings,
    rng: &mut R,
    mut on_retry: F,
) -> Result<BootstrapOutcome>
where
    R: Rng,
    F: FnMut(usize, f64),
{
    let mut population = Population::new(members);
    evaluator.evaluate(&mut population.members)?;

    let mut retries = 0;
    while population.healthy_fraction() < settings.viability_threshold && retries < settings.max_retries {
        retries += 1;
        on_retry(retries, population.healthy_fraction());
        for member in population.members.iter_mut().filter(|m| !m.is_healthy()) {
            member.regenerate(rng);
        }
        evaluator.evaluate(&mut population.members)?;
    }

    let viable = population.healthy_fraction() >= settings.viability_threshold;
    let mut discarded = 0;
    if !viable {
        let before = population.len();
        population.members.retain(|m| m.is_healthy());
        discarded = before - population.len();
        log::warn!(
            "Bootstrap not viable after {} retries, discarded {} unhealthy members",
            retries,
            discarded
        );
    } else {
        log::info!(
            "Bootstrap viable after {} retries ({:.0}% healthy)",
            retries,
            population.healthy_fraction() * 100.0
        );
    }

    Ok(BootstrapOutcome {
        population,
        retries,
        discarded,
        viable,
    })
}

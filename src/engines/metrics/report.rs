use super::engine::GenerationStats;
use crate::population::{Member, MemberDesign, Population};
use serde::Serialize;

/// Final fitness listing of one member, with the design that produced it.
#[derive(Debug, Clone, Serialize)]
pub struct MemberSummary {
    pub id: u64,
    pub age: i32,
    pub total_fitness: f64,
    pub total_mass: f64,
    pub total_cost: f64,
    pub is_valid: bool,
    pub design: MemberDesign,
}

impl From<&Member> for MemberSummary {
    fn from(member: &Member) -> Self {
        Self {
            id: member.id,
            age: member.age,
            total_fitness: member.total_fitness,
            total_mass: member.total_mass,
            total_cost: member.total_cost,
            is_valid: member.is_valid,
            design: MemberDesign::from(member),
        }
    }
}

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Termination {
    /// Every configured generation ran.
    Completed,
    /// No viable breeding stock remained.
    DeadPopulation { generation: usize },
}

/// End-of-run printout: termination, per-generation history and the final population sorted by
/// descending fitness.
#[derive(Debug, Clone, Serialize)]
pub struct PopulationReport {
    pub run: usize,
    pub termination: Termination,
    pub history: Vec<GenerationStats>,
    pub members: Vec<MemberSummary>,
}

impl PopulationReport {
    pub fn new(run: usize, termination: Termination, history: Vec<GenerationStats>, population: &Population) -> Self {
        let mut members: Vec<MemberSummary> = population.iter().map(MemberSummary::from).collect();
        members.sort_by(|a, b| b.total_fitness.total_cmp(&a.total_fitness));
        Self {
            run,
            termination,
            history,
            members,
        }
    }

    pub fn best(&self) -> Option<&MemberSummary> {
        self.members.first()
    }

    /// Last generation with recorded statistics; zero when only the bootstrap ran.
    pub fn generations_completed(&self) -> usize {
        self.history.last().map_or(0, |stats| stats.generation)
    }
}

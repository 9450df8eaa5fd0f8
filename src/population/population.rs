use super::Member;
use serde::Serialize;

/// The working set of members between generations.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Population {
    pub members: Vec<Member>,
}

impl Population {
    pub fn new(members: Vec<Member>) -> Self {
        Self { members }
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Member> {
        self.members.iter()
    }

    pub fn total_fitness(&self) -> f64 {
        self.members.iter().map(|m| m.total_fitness).sum()
    }

    pub fn healthy_count(&self) -> usize {
        self.members.iter().filter(|m| m.is_healthy()).count()
    }

    /// Share of healthy members; zero for an empty population.
    pub fn healthy_fraction(&self) -> f64 {
        if self.members.is_empty() {
            return 0.0;
        }
        self.healthy_count() as f64 / self.members.len() as f64
    }

    /// Highest-fitness member, if any.
    pub fn best(&self) -> Option<&Member> {
        self.members
            .iter()
            .max_by(|a, b| a.total_fitness.total_cmp(&b.total_fitness))
    }
}

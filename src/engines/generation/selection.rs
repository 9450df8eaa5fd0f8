use crate::population::Member;
use rand::Rng;

/// Drop members that are invalid or carry no fitness. Returns how many were dropped.
pub fn discard_unfit(members: &mut Vec<Member>) -> usize {
    let before = members.len();
    members.retain(|m| m.is_valid && m.total_fitness > 0.0);
    let discarded = before - members.len();
    if discarded > 0 {
        log::debug!("Discarded {} unfit members", discarded);
    }
    discarded
}

/// Half-open share `[lo, hi)` of the unit interval owned by one member.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub lo: f64,
    pub hi: f64,
}

impl Segment {
    pub fn width(&self) -> f64 {
        self.hi - self.lo
    }

    fn contains(&self, draw: f64) -> bool {
        self.lo <= draw && draw < self.hi
    }
}

/// Cumulative fitness-proportionate partition of [0, 1), in population order.
#[derive(Debug, Clone)]
pub struct FitnessPartition {
    segments: Vec<Segment>,
}

impl FitnessPartition {
    /// `None` when there is nothing to select from: no members, or no positive total fitness.
    pub fn from_fitness(fitness: &[f64]) -> Option<Self> {
        let total: f64 = fitness.iter().sum();
        if fitness.is_empty() || total <= 0.0 || !total.is_finite() {
            return None;
        }

        let mut segments = Vec::with_capacity(fitness.len());
        let mut lo = 0.0;
        for share in fitness {
            let hi = lo + share / total;
            segments.push(Segment { lo, hi });
            lo = hi;
        }
        // absorb rounding so the last segment closes the interval
        if let Some(last) = segments.last_mut() {
            last.hi = 1.0;
        }
        Some(Self { segments })
    }

    pub fn from_members(members: &[Member]) -> Option<Self> {
        let fitness: Vec<f64> = members.iter().map(|m| m.total_fitness).collect();
        Self::from_fitness(&fitness)
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Index of the segment a draw in [0, 1) falls in.
    pub fn locate(&self, draw: f64) -> usize {
        self.segments
            .iter()
            .position(|s| s.contains(draw))
            .unwrap_or(self.segments.len() - 1)
    }

    pub fn select<R: Rng>(&self, rng: &mut R) -> usize {
        self.locate(rng.gen::<f64>())
    }

    /// Two distinct members; the second draw repeats until it differs from the first.
    /// `None` with fewer than two members.
    pub fn select_pair<R: Rng>(&self, rng: &mut R) -> Option<(usize, usize)> {
        if self.segments.len() < 2 {
            return None;
        }
        let first = self.select(rng);
        let mut second = self.select(rng);
        while second == first {
            second = self.select(rng);
        }
        Some((first, second))
    }
}

use crate::population::Member;
use rand::Rng;
use std::ops::RangeInclusive;

/// Members older than this always die.
pub const MAX_AGE: i32 = 10;

/// Range each member's per-generation death threshold is drawn from.
pub const DEATH_THRESHOLD: RangeInclusive<i32> = 1..=10;

/// Threshold deaths per generation are capped at `population / DEATH_CAP_DIVISOR`.
pub const DEATH_CAP_DIVISOR: usize = 3;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AgingOutcome {
    /// Members past their drawn threshold, within the cap.
    pub culled: usize,
    /// Members past `MAX_AGE`.
    pub expired: usize,
}

impl AgingOutcome {
    pub fn deaths(&self) -> usize {
        self.culled + self.expired
    }

    /// Replacement pairs owed for the dead, applied once per generation.
    pub fn replacement_quota(&self) -> usize {
        self.deaths() / 2
    }
}

/// Age every member by one generation with randomly drawn death thresholds.
pub fn age_population<R: Rng>(members: &mut Vec<Member>, rng: &mut R) -> AgingOutcome {
    age_with_thresholds(members, |_| rng.gen_range(DEATH_THRESHOLD))
}

/// A member whose age exceeds its threshold dies while the cap allows; the rest age by one, and
/// any that pass `MAX_AGE` die regardless of the cap.
pub fn age_with_thresholds<F>(members: &mut Vec<Member>, mut threshold: F) -> AgingOutcome
where
    F: FnMut(&Member) -> i32,
{
    let cap = members.len() / DEATH_CAP_DIVISOR;
    let mut outcome = AgingOutcome::default();

    members.retain_mut(|member| {
        if member.age > threshold(member) && outcome.culled < cap {
            outcome.culled += 1;
            return false;
        }
        member.age += 1;
        if member.age > MAX_AGE {
            outcome.expired += 1;
            return false;
        }
        true
    });

    log::debug!(
        "Aging: {} culled (cap {}), {} expired",
        outcome.culled,
        cap,
        outcome.expired
    );
    outcome
}

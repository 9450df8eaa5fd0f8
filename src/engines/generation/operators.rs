use crate::engines::generation::genome::Genome;
use crate::error::{LegforgeError, Result};
use rand::Rng;

/// Upper bound on crossover points per call.
pub const MAX_CROSSOVER_POINTS: usize = 6;

/// How an adaptive chance list is seeded and annealed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChanceSchedule {
    /// Fresh chances are drawn uniformly from `initial_tenths` tenths.
    pub initial_tenths: (u32, u32),
    /// A chance that fires is divided by this.
    pub success_divisor: f64,
    /// A chance that does not fire grows by this, capped at 1.
    pub failure_increment: f64,
}

pub const CROSSOVER_SCHEDULE: ChanceSchedule = ChanceSchedule {
    initial_tenths: (1, 9),
    success_divisor: 10.0,
    failure_increment: 0.05,
};

pub const MUTATION_SCHEDULE: ChanceSchedule = ChanceSchedule {
    initial_tenths: (1, 3),
    success_divisor: 2.0,
    failure_increment: 0.01,
};

pub fn initial_chances<R: Rng>(len: usize, schedule: &ChanceSchedule, rng: &mut R) -> Vec<f64> {
    (0..len)
        .map(|_| {
            let (low, high) = schedule.initial_tenths;
            f64::from(rng.gen_range(low..=high)) / 10.0
        })
        .collect()
}

pub fn update_chance(chance: &mut f64, fired: bool, schedule: &ChanceSchedule) {
    if fired {
        *chance /= schedule.success_divisor;
    } else {
        *chance = (*chance + schedule.failure_increment).min(1.0);
    }
}

/// One Bernoulli draw against `chance`, annealing it either way.
pub fn chance_check<R: Rng>(chance: &mut f64, schedule: &ChanceSchedule, rng: &mut R) -> bool {
    let fired = rng.gen::<f64>() < *chance;
    update_chance(chance, fired, schedule);
    fired
}

/// Walk the chance list until a position fires and return it. Every miss raises that position's
/// chance, so the walk always ends.
pub fn choose_crossover_point<R: Rng>(chances: &mut [f64], rng: &mut R) -> Result<usize> {
    if chances.is_empty() {
        return Err(LegforgeError::EmptyGenome);
    }
    loop {
        for (index, chance) in chances.iter_mut().enumerate() {
            if chance_check(chance, &CROSSOVER_SCHEDULE, rng) {
                return Ok(index);
            }
        }
    }
}

fn check_chances(genome: &Genome, chances: &[f64]) -> Result<()> {
    if chances.len() != genome.len() {
        return Err(LegforgeError::ChanceLength {
            chances: chances.len(),
            genome: genome.len(),
        });
    }
    Ok(())
}

/// Multi-point crossover in place. Draws 1 to `MAX_CROSSOVER_POINTS` points, each from one
/// parent's chance list picked by a fair coin, and swaps the tails `point..` of the two genomes
/// at each in turn. Returns the points used.
pub fn crossover<R: Rng>(
    left: &mut Genome,
    right: &mut Genome,
    left_chances: &mut [f64],
    right_chances: &mut [f64],
    rng: &mut R,
) -> Result<Vec<usize>> {
    if left.len() != right.len() {
        return Err(LegforgeError::GenomeLengthMismatch {
            component: left.component.to_string(),
            left: left.len(),
            right: right.len(),
        });
    }
    if left.is_empty() {
        return Err(LegforgeError::EmptyGenome);
    }
    check_chances(left, left_chances)?;
    check_chances(right, right_chances)?;

    let count = rng.gen_range(1..=MAX_CROSSOVER_POINTS);
    let mut points = Vec::with_capacity(count);
    for _ in 0..count {
        let chances = if rng.gen_bool(0.5) {
            &mut *left_chances
        } else {
            &mut *right_chances
        };
        let point = choose_crossover_point(chances, rng)?;
        left.bits[point..].swap_with_slice(&mut right.bits[point..]);
        points.push(point);
    }
    Ok(points)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationKind {
    /// Swap with the right neighbour, wrapping to the first bit.
    TransposeForward,
    Invert,
    /// Swap with the left neighbour, wrapping to the last bit.
    TransposeBackward,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MutationEvent {
    pub kind: MutationKind,
    pub position: usize,
}

/// Scan every position's mutation chance (annealing all of them) and apply a single mutation at
/// the last position that fired, if any.
pub fn mutate<R: Rng>(genome: &mut Genome, chances: &mut [f64], rng: &mut R) -> Result<Option<MutationEvent>> {
    if genome.is_empty() {
        return Err(LegforgeError::EmptyGenome);
    }
    check_chances(genome, chances)?;

    let mut site = None;
    for (index, chance) in chances.iter_mut().enumerate() {
        if chance_check(chance, &MUTATION_SCHEDULE, rng) {
            site = Some(index);
        }
    }
    let Some(position) = site else {
        return Ok(None);
    };

    let len = genome.len();
    let kind = match rng.gen_range(0..3) {
        0 => MutationKind::TransposeForward,
        1 => MutationKind::Invert,
        _ => MutationKind::TransposeBackward,
    };
    match kind {
        MutationKind::TransposeForward => genome.bits.swap(position, (position + 1) % len),
        MutationKind::TransposeBackward => genome.bits.swap(position, (position + len - 1) % len),
        MutationKind::Invert => genome.bits[position] ^= 1,
    }
    Ok(Some(MutationEvent { kind, position }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn genome(bits: Vec<u8>) -> Genome {
        Genome {
            component: "HipGimbal",
            key: vec!["peg_length"; bits.len() / 6],
            bits,
        }
    }

    #[test]
    fn test_update_chance() {
        let mut p = 0.5;
        update_chance(&mut p, true, &CROSSOVER_SCHEDULE);
        assert!((p - 0.05).abs() < 1e-12);
        update_chance(&mut p, false, &CROSSOVER_SCHEDULE);
        assert!((p - 0.10).abs() < 1e-12);

        let mut q = 0.995;
        update_chance(&mut q, false, &MUTATION_SCHEDULE);
        assert_eq!(q, 1.0);
    }

    #[test]
    fn test_initial_chances_in_range() {
        let mut rng = StdRng::seed_from_u64(1);
        let chances = initial_chances(200, &CROSSOVER_SCHEDULE, &mut rng);
        assert!(chances.iter().all(|p| (0.1..=0.9).contains(p)));
        let chances = initial_chances(200, &MUTATION_SCHEDULE, &mut rng);
        assert!(chances.iter().all(|p| (0.1..=0.3).contains(p)));
        // every tenth in the range is reachable
        assert!(chances.iter().any(|p| (p - 0.1).abs() < 1e-12));
        assert!(chances.iter().any(|p| (p - 0.3).abs() < 1e-12));
    }

    #[test]
    fn test_choose_point_from_zero_chances() {
        let mut rng = StdRng::seed_from_u64(4);
        let mut chances = vec![0.0; 12];
        let point = choose_crossover_point(&mut chances, &mut rng).unwrap();
        assert!(point < 12);
        assert!(chances.iter().any(|p| *p > 0.0));
    }

    #[test]
    fn test_certain_point_fires_first() {
        let mut rng = StdRng::seed_from_u64(4);
        let mut chances = vec![1.0, 1.0, 1.0];
        assert_eq!(choose_crossover_point(&mut chances, &mut rng).unwrap(), 0);
        assert!((chances[0] - 0.1).abs() < 1e-12);
        assert_eq!(chances[1], 1.0);
    }

    #[test]
    fn test_crossover_rejects_length_mismatch() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut a = genome(vec![0; 12]);
        let mut b = genome(vec![1; 6]);
        let result = crossover(&mut a, &mut b, &mut [0.1; 12], &mut [0.1; 6], &mut rng);
        assert!(matches!(
            result,
            Err(LegforgeError::GenomeLengthMismatch { left: 12, right: 6, .. })
        ));
    }

    #[test]
    fn test_crossover_conserves_bits() {
        let mut rng = StdRng::seed_from_u64(8);
        let mut a = genome(vec![0; 24]);
        let mut b = genome(vec![1; 24]);
        let points = crossover(&mut a, &mut b, &mut [0.2; 24], &mut [0.2; 24], &mut rng).unwrap();
        assert!((1..=MAX_CROSSOVER_POINTS).contains(&points.len()));
        for i in 0..24 {
            assert_eq!(a.bits[i] + b.bits[i], 1);
        }
    }

    #[test]
    fn test_mutate_without_fire_is_noop() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut g = genome(vec![1, 0, 1, 1, 0, 0]);
        let mut chances = vec![0.0; 6];
        assert_eq!(mutate(&mut g, &mut chances, &mut rng).unwrap(), None);
        assert_eq!(g.bits, vec![1, 0, 1, 1, 0, 0]);
        assert!(chances.iter().all(|p| (*p - 0.01).abs() < 1e-12));
    }

    #[test]
    fn test_mutate_last_fired_site() {
        let mut rng = StdRng::seed_from_u64(6);
        let mut g = genome(vec![1, 0, 0, 0, 0, 0]);
        let mut chances = vec![0.0, 0.0, 0.0, 0.0, 0.0, 1.0];
        let event = mutate(&mut g, &mut chances, &mut rng).unwrap().unwrap();
        assert_eq!(event.position, 5);
        let expected = match event.kind {
            MutationKind::TransposeForward => vec![0, 0, 0, 0, 0, 1],
            MutationKind::Invert => vec![1, 0, 0, 0, 0, 1],
            MutationKind::TransposeBackward => vec![1, 0, 0, 0, 0, 0],
        };
        assert_eq!(g.bits, expected);
        assert_eq!(chances[5], 0.5);
    }

    #[test]
    fn test_mutate_empty_genome() {
        let mut rng = StdRng::seed_from_u64(0);
        let mut g = genome(Vec::new());
        assert!(matches!(mutate(&mut g, &mut [], &mut rng), Err(LegforgeError::EmptyGenome)));
    }
}

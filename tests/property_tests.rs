//! Property-based tests for the genome codec, operators, selection and scoring.

use legforge::config::FitnessConfig;
use legforge::engines::generation::genome::{decode, decode_component, encode, encode_component, Genome};
use legforge::engines::generation::operators::{crossover, mutate, MAX_CROSSOVER_POINTS};
use legforge::engines::generation::selection::FitnessPartition;
use legforge::engines::metrics::FitnessOracle;
use legforge::population::Component;
use legforge::types::{ComponentId, BITS_PER_VARIABLE};
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn genome(bits: Vec<u8>) -> Genome {
    Genome {
        component: "KneeFlexCylinder",
        key: vec!["cyl_length"; bits.len() / 6],
        bits,
    }
}

proptest! {
    // ==================== Codec ====================

    #[test]
    fn encode_decode_roundtrip(value in 0u32..64) {
        let bits = encode(value).unwrap();
        prop_assert_eq!(bits.len(), 6);
        prop_assert_eq!(decode(&bits), value);
    }

    #[test]
    fn encode_rejects_wide_values(value in 64u32..10_000) {
        prop_assert!(encode(value).is_err());
    }

    #[test]
    fn component_roundtrip(slot in 0usize..14, values in prop::collection::vec(0u32..64, 11)) {
        let id = ComponentId::ALL[slot];
        let kind = id.kind();
        let values = values[..kind.variable_count()].to_vec();
        let source = Component::from_values(id, kind, 1, values).unwrap();

        let genome = encode_component(&source).unwrap();
        prop_assert_eq!(genome.len(), BITS_PER_VARIABLE * kind.variable_count());

        let mut target = Component::from_values(id, kind, 1, vec![0; kind.variable_count()]).unwrap();
        decode_component(&mut target, &genome).unwrap();
        prop_assert_eq!(target.values(), source.values());
    }

    // ==================== Operators ====================

    #[test]
    fn crossover_preserves_length_and_bit_multiset(
        segments in 1usize..8,
        seed in any::<u64>(),
        chance in 0.0f64..0.3
    ) {
        let len = segments * 6;
        let mut rng = StdRng::seed_from_u64(seed);
        let left_bits: Vec<u8> = (0..len).map(|i| (i % 2) as u8).collect();
        let right_bits: Vec<u8> = (0..len).map(|i| ((i / 3) % 2) as u8).collect();
        let mut left = genome(left_bits.clone());
        let mut right = genome(right_bits.clone());

        let points = crossover(&mut left, &mut right, &mut vec![chance; len], &mut vec![chance; len], &mut rng).unwrap();

        prop_assert!((1..=MAX_CROSSOVER_POINTS).contains(&points.len()));
        prop_assert!(points.iter().all(|p| *p < len));
        prop_assert_eq!(left.len(), len);
        prop_assert_eq!(right.len(), len);
        // every locus keeps the pair of parental bits, possibly swapped
        for i in 0..len {
            let mut before = [left_bits[i], right_bits[i]];
            let mut after = [left.bits[i], right.bits[i]];
            before.sort_unstable();
            after.sort_unstable();
            prop_assert_eq!(before, after);
        }
    }

    #[test]
    fn mutation_touches_at_most_two_bits(
        bits in prop::collection::vec(0u8..2, 6..48),
        seed in any::<u64>(),
        chance in 0.0f64..1.0
    ) {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut g = genome(bits.clone());
        let mut chances = vec![chance; bits.len()];
        let event = mutate(&mut g, &mut chances, &mut rng).unwrap();

        let changed = bits.iter().zip(&g.bits).filter(|(a, b)| a != b).count();
        prop_assert_eq!(g.len(), bits.len());
        match event {
            None => prop_assert_eq!(changed, 0),
            Some(e) => {
                prop_assert!(e.position < bits.len());
                prop_assert!(changed <= 2);
            }
        }
        prop_assert!(chances.iter().all(|p| (0.0..=1.0).contains(p)));
    }

    // ==================== Selection ====================

    #[test]
    fn partition_covers_unit_interval(fitness in prop::collection::vec(0.1f64..100.0, 1..30)) {
        let partition = FitnessPartition::from_fitness(&fitness).unwrap();
        let segments = partition.segments();
        prop_assert_eq!(segments.len(), fitness.len());
        prop_assert_eq!(segments[0].lo, 0.0);
        prop_assert_eq!(segments[segments.len() - 1].hi, 1.0);
        for pair in segments.windows(2) {
            prop_assert_eq!(pair[0].hi, pair[1].lo);
        }
        let total: f64 = fitness.iter().sum();
        for (segment, share) in segments.iter().zip(&fitness) {
            prop_assert!((segment.width() - share / total).abs() < 1e-9);
        }
    }

    #[test]
    fn located_segment_contains_draw(
        fitness in prop::collection::vec(0.1f64..100.0, 1..30),
        draw in 0.0f64..1.0
    ) {
        let partition = FitnessPartition::from_fitness(&fitness).unwrap();
        let index = partition.locate(draw);
        let segment = partition.segments()[index];
        prop_assert!(segment.lo <= draw && draw < segment.hi);
    }

    // ==================== Scoring ====================

    #[test]
    fn safety_factor_falls_as_stress_grows(
        yield_pa in 1e6f64..1e9,
        stress in 1.0f64..1e9,
        factor in 1.01f64..10.0
    ) {
        let oracle = FitnessOracle::new(FitnessConfig::default());
        let low = oracle.safety_factor(yield_pa, stress);
        let high = oracle.safety_factor(yield_pa, stress * factor);
        prop_assert!(high < low);
        prop_assert_eq!(oracle.safety_factor(yield_pa, -stress), low);
        prop_assert!(oracle.safety_factor(yield_pa * factor, stress) > low);
        prop_assert_eq!(oracle.safety_factor(yield_pa * factor, 0.0), 10_000.0);
    }

    #[test]
    fn shaping_rises_towards_target(a in 1.0f64..1.925, b in 1.0f64..1.925) {
        let oracle = FitnessOracle::new(FitnessConfig::default());
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(oracle.shaping_modifier(lo) <= oracle.shaping_modifier(hi) + 1e-12);
        prop_assert!((0.0..=1.0).contains(&oracle.shaping_modifier(lo)));
    }
}

mod common;

use common::{fragile_tables, permissive_fitness, strong_tables};
use legforge::engines::generation::bootstrap::{bootstrap, BootstrapSettings};
use legforge::engines::generation::lifecycle::{age_with_thresholds, MAX_AGE};
use legforge::engines::generation::reproduction::reproduce_pair;
use legforge::engines::generation::selection::discard_unfit;
use legforge::engines::generation::PopulationEvaluator;
use legforge::engines::metrics::FitnessOracle;
use legforge::population::{GenerationContext, Member};
use legforge::types::{ComponentId, COMPONENT_COUNT};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn random_members(count: usize, age: i32, seed: u64) -> Vec<Member> {
    let tables = strong_tables();
    let mut rng = StdRng::seed_from_u64(seed);
    let mut ctx = GenerationContext::new(age);
    (0..count)
        .map(|_| Member::random(&mut ctx, &tables, &mut rng).unwrap())
        .collect()
}

#[test]
fn test_aging_respects_death_cap() {
    let mut members = random_members(30, 1, 1);
    let outcome = age_with_thresholds(&mut members, |_| 0);

    assert_eq!(outcome.culled, 10);
    assert_eq!(outcome.expired, 0);
    assert_eq!(members.len(), 20);
    assert!(members.iter().all(|m| m.age == 2));
    assert_eq!(outcome.replacement_quota(), 5);
}

#[test]
fn test_old_members_expire_past_cap() {
    let mut members = random_members(6, MAX_AGE, 2);
    // thresholds out of reach: only the age limit applies
    let outcome = age_with_thresholds(&mut members, |_| 100);

    assert_eq!(outcome.culled, 0);
    assert_eq!(outcome.expired, 6);
    assert!(members.is_empty());
    assert_eq!(outcome.deaths(), 6);
}

#[test]
fn test_newborns_survive_threshold() {
    let mut members = random_members(9, -3, 3);
    let outcome = age_with_thresholds(&mut members, |_| 1);
    assert_eq!(outcome.deaths(), 0);
    assert!(members.iter().all(|m| m.age == -2));
}

#[test]
fn test_discard_unfit() {
    let mut members = random_members(4, 0, 4);
    for (i, member) in members.iter_mut().enumerate() {
        member.is_valid = i != 1;
        member.total_fitness = if i == 2 { 0.0 } else { 5.0 };
    }
    assert_eq!(discard_unfit(&mut members), 2);
    assert_eq!(members.len(), 2);
}

#[test]
fn test_bootstrap_removes_unrepairable_members() {
    let tables = fragile_tables();
    let evaluator = PopulationEvaluator::new(&tables, FitnessOracle::new(permissive_fitness()), false);
    let mut rng = StdRng::seed_from_u64(6);
    let mut ctx = GenerationContext::new(-3);
    let members: Vec<Member> = (0..10)
        .map(|_| Member::random(&mut ctx, &tables, &mut rng).unwrap())
        .collect();

    let mut attempts = Vec::new();
    let settings = BootstrapSettings {
        viability_threshold: 0.66,
        max_retries: 4,
    };
    let outcome = bootstrap(members, &evaluator, settings, &mut rng, |attempt, _| attempts.push(attempt)).unwrap();

    assert_eq!(attempts, vec![1, 2, 3, 4]);
    assert_eq!(outcome.retries, 4);
    assert!(!outcome.viable);
    assert_eq!(outcome.discarded, 10);
    assert!(outcome.population.is_empty());
}

#[test]
fn test_bootstrap_viable_population() {
    let tables = strong_tables();
    let evaluator = PopulationEvaluator::new(&tables, FitnessOracle::new(permissive_fitness()), true);
    let mut rng = StdRng::seed_from_u64(7);
    let mut ctx = GenerationContext::new(-3);
    let members: Vec<Member> = (0..10)
        .map(|_| Member::random(&mut ctx, &tables, &mut rng).unwrap())
        .collect();

    let settings = BootstrapSettings {
        viability_threshold: 0.66,
        max_retries: 4,
    };
    let outcome = bootstrap(members, &evaluator, settings, &mut rng, |_, _| {}).unwrap();

    assert!(outcome.viable);
    assert_eq!(outcome.retries, 0);
    assert_eq!(outcome.population.len(), 10);
    assert!(outcome.population.iter().all(|m| m.is_defined && m.is_evaluated));
}

#[test]
fn test_reproduction_is_deterministic_for_a_seed() {
    let parents = random_members(2, 0, 8);

    let breed = |seed: u64| {
        let (mut left, mut right) = (parents[0].clone(), parents[1].clone());
        let mut ctx = GenerationContext::new(-3);
        let mut rng = StdRng::seed_from_u64(seed);
        let children = reproduce_pair(&mut left, &mut right, &mut ctx, &mut rng).unwrap();
        (children, left)
    };

    let ((a1, b1), annealed) = breed(99);
    let ((a2, b2), _) = breed(99);

    for id in ComponentId::ALL {
        assert_eq!(a1.component(id).values(), a2.component(id).values());
        assert_eq!(b1.component(id).values(), b2.component(id).values());
        assert_eq!(a1.component(id).material_id(), parents[0].component(id).material_id());
        assert_eq!(b1.component(id).material_id(), parents[1].component(id).material_id());
    }
    assert_eq!(a1.components().len(), COMPONENT_COUNT);
    assert_eq!((a1.id, b1.id), (0, 1));
    assert_eq!(a1.age, -3);
    assert!(!a1.is_defined && !a1.is_evaluated);

    // parents' chance lists are annealed in place
    let before = &parents[0].component(ComponentId::HipGimbal).mutate_chances;
    let after = &annealed.component(ComponentId::HipGimbal).mutate_chances;
    assert_eq!(before.len(), after.len());
    assert_ne!(before, after);
}

mod common;

use common::{fragile_tables, permissive_fitness, strong_tables};
use legforge::engines::evaluation::stress::pressure_vessel;
use legforge::engines::evaluation::MechanicalAnalyzer;
use legforge::engines::metrics::FitnessOracle;
use legforge::population::{GenerationContext, Member};
use legforge::types::ComponentId;
use rand::rngs::StdRng;
use rand::SeedableRng;

#[test]
fn test_pressure_vessel_reference_case() {
    let s = pressure_vessel(10.0, 12.0, 1000.0, 0.0).unwrap();
    assert!((s.tangential - 5545.4545).abs() < 1e-3);
    assert!((s.radial + 1000.0).abs() < 1e-9);
    assert!((s.longitudinal - 2272.727).abs() < 1e-3);
}

#[test]
fn test_define_member_on_strong_tables() {
    let tables = strong_tables();
    let mut rng = StdRng::seed_from_u64(21);
    let mut ctx = GenerationContext::new(-3);
    let mut member = Member::random(&mut ctx, &tables, &mut rng).unwrap();

    MechanicalAnalyzer::new(&tables).define(&mut member).unwrap();
    assert!(member.is_defined);
    assert!(member.is_valid);
    assert!(member.total_mass > 0.0);
    assert!((member.total_cost - 2.0 * member.total_mass).abs() < 1e-9);

    for id in ComponentId::ALL.iter().filter(|id| id.kind().is_cylinder()) {
        let cylinder = member.component(*id);
        assert!(cylinder.max_force.unwrap() > 0.0);
        assert_eq!(cylinder.stresses.len(), 3);
    }

    let femur = &member.component(ComponentId::FemurStructure).stresses;
    assert!(femur.contains_key("axial_stress"));
    assert!(femur.contains_key("bending_stress_x"));
    assert!(femur.contains_key("bending_stress_y"));
    assert!(!femur.contains_key("torsion_stress"));
    assert!(femur.contains_key("prox_bending_stress_hip_ab"));
    assert!(femur.contains_key("dist_bending_stress_knee_fl"));

    let tibia = &member.component(ComponentId::TibiaStructure).stresses;
    assert!(!tibia.contains_key("bending_stress_y"));
    assert!(tibia.contains_key("torsion_stress"));
    assert!(tibia.contains_key("dist_bending_stress_ankle_ir"));

    let gimbal = &member.component(ComponentId::KneeGimbal).stresses;
    assert!(gimbal.contains_key("ex_axial_stress"));
    assert!(gimbal.contains_key("fl_shear_stress"));
}

#[test]
fn test_define_is_idempotent() {
    let tables = strong_tables();
    let mut rng = StdRng::seed_from_u64(3);
    let mut ctx = GenerationContext::new(0);
    let mut member = Member::random(&mut ctx, &tables, &mut rng).unwrap();
    let analyzer = MechanicalAnalyzer::new(&tables);

    analyzer.define(&mut member).unwrap();
    let mass = member.total_mass;
    member.total_mass = -1.0;
    analyzer.define(&mut member).unwrap();
    assert_eq!(member.total_mass, -1.0);

    member.is_defined = false;
    analyzer.define(&mut member).unwrap();
    assert_eq!(member.total_mass, mass);
}

#[test]
fn test_evaluate_requires_definition() {
    let tables = strong_tables();
    let mut rng = StdRng::seed_from_u64(4);
    let mut ctx = GenerationContext::new(0);
    let mut member = Member::random(&mut ctx, &tables, &mut rng).unwrap();
    let oracle = FitnessOracle::new(permissive_fitness());

    assert!(oracle.evaluate_member(&mut member, &tables).is_err());

    MechanicalAnalyzer::new(&tables).define(&mut member).unwrap();
    let fitness = oracle.evaluate_member(&mut member, &tables).unwrap();
    assert!(member.is_evaluated);
    assert!(member.is_healthy());
    assert!(fitness >= 1.0);
}

#[test]
fn test_fragile_material_fails_every_component() {
    let tables = fragile_tables();
    let mut rng = StdRng::seed_from_u64(5);
    let mut ctx = GenerationContext::new(0);
    let mut member = Member::random(&mut ctx, &tables, &mut rng).unwrap();
    let oracle = FitnessOracle::new(permissive_fitness());

    MechanicalAnalyzer::new(&tables).define(&mut member).unwrap();
    let fitness = oracle.evaluate_member(&mut member, &tables).unwrap();
    assert!(!member.is_valid);
    assert_eq!(fitness, 0.0);
    assert!(member.components().iter().all(|c| !c.is_valid));
}

//! Assembly-level analysis: stresses and solid volumes per component kind, driven by the
//! actuator loads transmitted through each joint.

use super::geometry::{
    area_circ_segment, area_circle, area_rectangle, moi_circle, moi_rectangle, moi_rotate, moi_segment,
    segment_angle, vol_cyl, vol_cyl_intersect, AxisOffset,
};
use super::sections::{CylinderSection, GimbalSection, StructureSection};
use super::stress::{axial, bending, pressure_vessel, torsion, DomainError, DomainResult};
use super::units::{AREA, LENGTH, MOMENT_OF_INERTIA, PRESSURE};
use crate::types::LoadAxis;
use std::collections::BTreeMap;
use std::f64::consts::FRAC_PI_4;

pub type StressMap = BTreeMap<String, f64>;

/// Cross-section rotation of the ribbed beam relative to the load axes, degrees.
const STRUCTURE_ROTATION: f64 = 45.0;

/// Maximum force one actuator transmits into the parts it is mounted on.
#[derive(Debug, Clone, PartialEq)]
pub struct ActuatorLoad {
    /// Load-case label, e.g. `hip_fl`.
    pub case: String,
    pub axis: LoadAxis,
    /// Newtons.
    pub force: f64,
}

impl ActuatorLoad {
    pub fn new(case: impl Into<String>, axis: LoadAxis, force: f64) -> Self {
        Self {
            case: case.into(),
            axis,
            force,
        }
    }
}

/// Maximum linear force of a cylinder at its rated pressure (psi), newtons.
pub fn piston_force(cylinder: &CylinderSection, pressure_psi: f64) -> DomainResult<f64> {
    let radius = cylinder.inner_radius();
    if radius < 0.0 {
        return Err(DomainError::Degenerate("cylinder wall thicker than its bore"));
    }
    Ok(area_circle(radius * LENGTH, 0.0) * pressure_psi * PRESSURE)
}

/// Lamé wall stresses under rated internal pressure.
pub fn cylinder_stresses(cylinder: &CylinderSection, pressure_psi: f64) -> DomainResult<StressMap> {
    if cylinder.inner_radius() < 0.0 {
        return Err(DomainError::Degenerate("cylinder wall thicker than its bore"));
    }
    let vessel = pressure_vessel(
        cylinder.inner_radius() * LENGTH,
        cylinder.outer_radius() * LENGTH,
        pressure_psi * PRESSURE,
        0.0,
    )?;

    let mut stresses = StressMap::new();
    stresses.insert("tangential_stress".to_string(), vessel.tangential);
    stresses.insert("radial_stress".to_string(), vessel.radial);
    stresses.insert("longitudinal_stress".to_string(), vessel.longitudinal);
    Ok(stresses)
}

/// Wall volume, mm³.
pub fn cylinder_volume(cylinder: &CylinderSection) -> f64 {
    let outer = vol_cyl(cylinder.length, cylinder.outer_radius(), 0.0);
    let inner = vol_cyl(cylinder.inner_length(), cylinder.inner_radius().max(0.0), 0.0);
    outer - inner
}

/// Largest-magnitude force among the loads, zero when there are none.
pub fn governing_force(loads: &[ActuatorLoad]) -> f64 {
    extreme(loads.iter().map(|l| l.force), true, false).unwrap_or(0.0)
}

/// Largest (`max`) or smallest value, by magnitude unless `signed`. First wins on ties.
fn extreme(values: impl Iterator<Item = f64>, max: bool, signed: bool) -> Option<f64> {
    let key = |v: f64| if signed { v } else { v.abs() };
    values.fold(None, |best, v| match best {
        None => Some(v),
        Some(b) if (max && key(v) > key(b)) || (!max && key(v) < key(b)) => Some(v),
        keep => keep,
    })
}

/// Worst-case force disparity between the two ends of a beam: the largest difference over
/// {max, min} x {proximal, distal}. An empty end contributes zeros; `None` when both are empty.
pub fn force_envelope(proximal: &[f64], distal: &[f64], signed: bool) -> Option<f64> {
    if proximal.is_empty() && distal.is_empty() {
        return None;
    }
    let bounds = |forces: &[f64]| {
        (
            extreme(forces.iter().copied(), true, signed).unwrap_or(0.0),
            extreme(forces.iter().copied(), false, signed).unwrap_or(0.0),
        )
    };
    let (prox_max, prox_min) = bounds(proximal);
    let (dist_max, dist_min) = bounds(distal);

    [
        (prox_max - dist_max).abs(),
        (prox_max - dist_min).abs(),
        (prox_min - dist_min).abs(),
        (prox_min - dist_max).abs(),
    ]
    .into_iter()
    .reduce(f64::max)
}

fn forces_on(loads: &[ActuatorLoad], axis: LoadAxis) -> Vec<f64> {
    loads.iter().filter(|l| l.axis == axis).map(|l| l.force).collect()
}

/// Mount-point stresses where actuators attach to a beam.
pub fn mount_stresses(
    section: &StructureSection,
    proximal: &[ActuatorLoad],
    distal: &[ActuatorLoad],
) -> DomainResult<StressMap> {
    let axial_area = area_rectangle(section.mount_width / 2.0, section.mount_thickness) * AREA;
    let shear_area = area_rectangle(section.mount_width, section.mount_thickness) * AREA;
    let moi = moi_rectangle(section.mount_thickness, section.mount_width, 0.0, AxisOffset::default()).ix
        * MOMENT_OF_INERTIA;
    let lever = section.mount_width * LENGTH;
    let fibre = section.mount_width / 2.0 * LENGTH;

    let mut stresses = StressMap::new();
    for (end, loads) in [("prox", proximal), ("dist", distal)] {
        if loads.is_empty() {
            continue;
        }
        let force = governing_force(loads);
        stresses.insert(format!("{}_axial_stress", end), axial(force, axial_area)?);
        stresses.insert(format!("{}_shear_stress", end), axial(force, shear_area)?);
        for load in loads {
            stresses.insert(
                format!("{}_bending_stress_{}", end, load.case),
                bending(load.force * lever, fibre, moi)?,
            );
        }
    }
    Ok(stresses)
}

/// Area of one rib with its flange and flange cap, mm².
pub fn rib_area(section: &StructureSection) -> DomainResult<f64> {
    let adjacent = section.flange_width + section.rib_length + section.core_diameter;
    let angle = segment_angle(adjacent, section.flange_width / 2.0)?;
    Ok(area_circ_segment(angle, section.flange_radius())
        + area_rectangle(section.flange_width, section.flange_thickness)
        + area_rectangle(section.rib_width, section.rib_length))
}

/// Beam stresses: axial load from body weight less the end forces, biaxial bending and torsion
/// from the end-force envelope on each axis.
pub fn structure_stresses(
    section: &StructureSection,
    proximal: &[ActuatorLoad],
    distal: &[ActuatorLoad],
    body_weight: f64,
) -> DomainResult<StressMap> {
    let lever = (section.core_diameter / 2.0 + section.mount_width) * LENGTH;
    let fibre = section.flange_radius() * LENGTH;
    let max_axial = body_weight - governing_force(proximal) - governing_force(distal);

    let core_radius = section.core_diameter / 2.0;
    let core_inner_radius = section.core_inner_diameter / 2.0;
    let cs_area = (4.0 * rib_area(section)? + area_circle(core_radius, core_inner_radius)) * AREA;

    // ribs sit on both axes; the beam section is their union rotated onto the load axes
    let to_segment = section.core_diameter + section.rib_length + section.flange_thickness;
    let segment = moi_segment(
        section.flange_radius(),
        segment_angle(to_segment, section.flange_width / 2.0)?,
    );
    let segment_moi = 2.0 * segment.ix + 2.0 * segment.iy;

    let flange_offset = to_segment - section.flange_thickness / 2.0;
    let flange_moi = 2.0
        * moi_rectangle(
            section.flange_width,
            section.flange_thickness,
            0.0,
            AxisOffset::new(flange_offset, 0.0),
        )
        .ix
        + 2.0
            * moi_rectangle(
                section.flange_thickness,
                section.flange_width,
                0.0,
                AxisOffset::new(0.0, flange_offset),
            )
            .ix;

    let rib_offset = to_segment - section.flange_thickness - section.rib_length / 2.0;
    let rib_moi = 2.0
        * moi_rectangle(section.rib_width, section.rib_length, 0.0, AxisOffset::new(rib_offset, 0.0)).ix
        + 2.0 * moi_rectangle(section.rib_length, section.rib_width, 0.0, AxisOffset::new(0.0, rib_offset)).ix;

    let core = moi_circle(core_radius, core_inner_radius, AxisOffset::default());
    let shared = segment_moi + flange_moi + rib_moi;
    let mut unrotated = core;
    unrotated.ix += shared;
    unrotated.iy += shared;
    let moi = moi_rotate(unrotated, STRUCTURE_ROTATION);
    let polar = (moi.ix + moi.iy) * MOMENT_OF_INERTIA;

    let mut stresses = StressMap::new();
    stresses.insert("axial_stress".to_string(), axial(max_axial, cs_area)?);

    if let Some(force) = force_envelope(&forces_on(proximal, LoadAxis::X), &forces_on(distal, LoadAxis::X), false) {
        stresses.insert(
            "bending_stress_x".to_string(),
            bending(force * lever, fibre, moi.ix * MOMENT_OF_INERTIA)?,
        );
    }
    if let Some(force) = force_envelope(&forces_on(proximal, LoadAxis::Y), &forces_on(distal, LoadAxis::Y), false) {
        stresses.insert(
            "bending_stress_y".to_string(),
            bending(force * lever, fibre, moi.iy * MOMENT_OF_INERTIA)?,
        );
    }
    if let Some(force) = force_envelope(&forces_on(proximal, LoadAxis::Z), &forces_on(distal, LoadAxis::Z), true) {
        stresses.insert(
            "torsion_stress".to_string(),
            torsion(force * lever, fibre, Some(polar), 0.0)?,
        );
    }

    Ok(stresses)
}

/// Four ribs along the segment plus the two core end discs, mm³.
pub fn structure_volume(section: &StructureSection, segment_length: f64) -> DomainResult<f64> {
    let ribs = 4.0 * rib_area(section)? * segment_length;
    let core = 2.0 * vol_cyl(section.core_thickness, section.core_diameter / 2.0, 0.0);
    Ok(ribs + core)
}

/// Gimbal stresses in the extended position (all actuators engaged) and flexed at 90°.
pub fn gimbal_stresses(section: &GimbalSection, loads: &[ActuatorLoad], body_weight: f64) -> DomainResult<StressMap> {
    let axial_force = body_weight + loads.iter().map(|l| l.force).sum::<f64>();
    let mount_width = section.mount_width();
    let peg_radius = section.peg_diameter / 2.0;

    let mut stresses = StressMap::new();

    let mount_area = area_rectangle(mount_width, section.mount_thickness) * AREA;
    stresses.insert("ex_axial_stress".to_string(), axial(axial_force, mount_area)?);

    let pin_area = area_circle(peg_radius, 0.0) * AREA;
    stresses.insert("ex_shear_stress".to_string(), axial(axial_force, pin_area)?);

    let pin_lever = (section.peg_length - section.peg_diameter) / 2.0 * LENGTH;
    let pin_moi = moi_circle(peg_radius, 0.0, AxisOffset::default()).ix * MOMENT_OF_INERTIA;
    let pin_bending = bending(axial_force * pin_lever, peg_radius * LENGTH, pin_moi)?;
    stresses.insert("ex_bending_x".to_string(), pin_bending);
    stresses.insert("ex_bending_y".to_string(), -pin_bending);

    let flexed_shear_area = (section.peg_diameter - mount_width) * section.mount_thickness * AREA;
    stresses.insert("fl_shear_stress".to_string(), axial(body_weight, flexed_shear_area)?);

    let flexed_force = body_weight + FRAC_PI_4.sin() * (axial_force - body_weight);
    let mount_moi = moi_rectangle(section.mount_thickness, mount_width, 0.0, AxisOffset::default()).ix
        * MOMENT_OF_INERTIA;
    stresses.insert(
        "fl_bending_x".to_string(),
        bending(
            flexed_force * section.mount_height() * LENGTH,
            mount_width / 2.0 * LENGTH,
            mount_moi,
        )?,
    );

    Ok(stresses)
}

/// Two pegs and the core, less the doubly counted tri-cylinder intersections, mm³.
pub fn gimbal_volume(section: &GimbalSection) -> f64 {
    let radius = section.peg_diameter / 2.0;
    2.0 * vol_cyl(section.peg_length, radius, 0.0) + vol_cyl(section.peg_diameter, radius, 0.0)
        - 2.0 * vol_cyl_intersect(radius)
}

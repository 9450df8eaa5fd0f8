//! Unit conversions. Design variables are millimetres, pressures psi, strengths MPa and
//! densities kg/m³; analysis runs in SI.

use std::f64::consts::PI;

pub const LENGTH: f64 = 1e-3;
pub const AREA: f64 = 1e-6;
pub const VOLUME: f64 = 1e-9;
pub const MOMENT_OF_INERTIA: f64 = 1e-12;
/// psi -> Pa
pub const PRESSURE: f64 = 6894.76;
/// MPa -> Pa
pub const STRENGTH: f64 = 1e6;

const MM_PER_INCH: f64 = 25.4;
const LB_PER_KG: f64 = 2.2;

pub fn in_to_mm(inches: f64) -> f64 {
    inches * MM_PER_INCH
}

pub fn mm_to_in(mm: f64) -> f64 {
    mm / MM_PER_INCH
}

pub fn lb_to_kg(lb: f64) -> f64 {
    lb / LB_PER_KG
}

pub fn kg_to_lb(kg: f64) -> f64 {
    kg * LB_PER_KG
}

pub fn rad_to_deg(rad: f64) -> f64 {
    rad * 180.0 / PI
}

pub fn deg_to_rad(deg: f64) -> f64 {
    deg / 180.0 * PI
}

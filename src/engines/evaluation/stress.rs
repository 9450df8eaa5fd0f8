//! Stress primitives. Units follow the inputs: pass SI in, get Pa out.

use std::f64::consts::PI;
use thiserror::Error;

/// A formula could not be evaluated for the given geometry. The component owning the geometry is
/// invalid; this never aborts a run.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error("Division by zero computing {0}")]
    DivisionByZero(&'static str),

    #[error("Non-finite result computing {0}")]
    NonFinite(&'static str),

    #[error("Degenerate geometry: {0}")]
    Degenerate(&'static str),
}

pub type DomainResult<T> = std::result::Result<T, DomainError>;

pub(crate) fn checked_div(numerator: f64, denominator: f64, quantity: &'static str) -> DomainResult<f64> {
    if denominator == 0.0 {
        return Err(DomainError::DivisionByZero(quantity));
    }
    let value = numerator / denominator;
    if !value.is_finite() {
        return Err(DomainError::NonFinite(quantity));
    }
    Ok(value)
}

/// Axial or direct shear stress, `force / area`.
pub fn axial(force: f64, area: f64) -> DomainResult<f64> {
    checked_div(force, area, "axial stress")
}

/// Maximum bending stress, `moment * distance / moi`.
pub fn bending(moment: f64, distance: f64, moi: f64) -> DomainResult<f64> {
    checked_div(moment * distance, moi, "bending stress")
}

/// Torsional shear stress. Without a polar moment the section is taken as a (hollow) circle of
/// the given radii.
pub fn torsion(torque: f64, radius: f64, polar_moment: Option<f64>, in_radius: f64) -> DomainResult<f64> {
    let polar = polar_moment.unwrap_or_else(|| PI / 32.0 * ((2.0 * radius).powi(4) - (2.0 * in_radius).powi(4)));
    checked_div(torque * radius, polar, "torsion stress")
}

/// Lamé thick-wall stresses at the bore.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VesselStresses {
    pub tangential: f64,
    pub radial: f64,
    pub longitudinal: f64,
}

pub fn pressure_vessel(in_rad: f64, out_rad: f64, in_pres: f64, out_pres: f64) -> DomainResult<VesselStresses> {
    let term1 = in_pres * in_rad.powi(2);
    let term2 = out_pres * out_rad.powi(2);
    let term3 = out_rad.powi(2) * (out_pres - in_pres);
    let term4 = out_rad.powi(2) - in_rad.powi(2);

    Ok(VesselStresses {
        tangential: checked_div(term1 - term2 - term3, term4, "tangential stress")?,
        radial: checked_div(term1 - term2 + term3, term4, "radial stress")?,
        longitudinal: checked_div(term1, term4, "longitudinal stress")?,
    })
}

/// Von Mises equivalent of three normal and three shear stresses.
pub fn von_mises(normal: [f64; 3], shear: [f64; 3]) -> f64 {
    let [sx, sy, sz] = normal;
    let normal_terms = (sx - sy).powi(2) + (sy - sz).powi(2) + (sz - sx).powi(2);
    let shear_terms: f64 = shear.iter().map(|t| t * t).sum();
    (normal_terms + 6.0 * shear_terms).sqrt() / 2f64.sqrt()
}

//! Area, volume and second-moment primitives. Angles are degrees.

use super::stress::{checked_div, DomainResult};
use super::units::{deg_to_rad, rad_to_deg};
use std::f64::consts::PI;

pub fn area_circle(radius: f64, in_radius: f64) -> f64 {
    PI * radius.powi(2) - PI * in_radius.powi(2)
}

pub fn area_rectangle(length: f64, width: f64) -> f64 {
    length * width
}

pub fn area_triangle(base: f64, height: f64) -> f64 {
    0.5 * base * height
}

/// Included angle of a circular segment from the adjacent and opposite sides of its half-chord
/// triangle.
pub fn segment_angle(adjacent: f64, opposite: f64) -> DomainResult<f64> {
    let ratio = checked_div(opposite, adjacent, "segment angle")?;
    Ok(rad_to_deg(2.0 * ratio.atan()))
}

pub fn area_circ_segment(angle: f64, radius: f64) -> f64 {
    let rad = deg_to_rad(angle);
    radius * radius / 2.0 * (rad - rad.sin())
}

pub fn vol_cyl(length: f64, radius: f64, in_radius: f64) -> f64 {
    length * area_circle(radius, in_radius)
}

pub fn vol_rect_prism(height: f64, length: f64, width: f64) -> f64 {
    height * length * width
}

/// Constant-radius fillet: square prism minus a quarter cylinder.
pub fn vol_fillet(radius: f64, length: f64) -> f64 {
    vol_rect_prism(length, radius, radius) - vol_cyl(length, radius, 0.0) / 4.0
}

/// Intersection of three mutually perpendicular cylinders of equal radius.
pub fn vol_cyl_intersect(radius: f64) -> f64 {
    8.0 * (2.0 - 2f64.sqrt()) * radius.powi(3)
}

/// Distance of a shape's centroid from the x and y reference axes.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AxisOffset {
    pub from_x: f64,
    pub from_y: f64,
}

impl AxisOffset {
    pub fn new(from_x: f64, from_y: f64) -> Self {
        Self { from_x, from_y }
    }
}

/// Second moments about x and y plus the polar moment.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Inertia {
    pub ix: f64,
    pub iy: f64,
    pub jz: f64,
}

impl Inertia {
    fn from_axes(ix: f64, iy: f64) -> Self {
        Self { ix, iy, jz: ix + iy }
    }

    /// Parallel-axis transfer of a shape of the given area.
    fn shifted(self, area: f64, offset: AxisOffset) -> Self {
        Self::from_axes(
            self.ix + area * offset.from_x.powi(2),
            self.iy + area * offset.from_y.powi(2),
        )
    }
}

impl std::ops::Add for Inertia {
    type Output = Inertia;

    fn add(self, other: Inertia) -> Inertia {
        Inertia::from_axes(self.ix + other.ix, self.iy + other.iy)
    }
}

impl std::ops::Mul<f64> for Inertia {
    type Output = Inertia;

    fn mul(self, factor: f64) -> Inertia {
        Inertia::from_axes(self.ix * factor, self.iy * factor)
    }
}

pub fn moi_circle(radius: f64, in_radius: f64, offset: AxisOffset) -> Inertia {
    let i = PI / 4.0 * (radius.powi(4) - in_radius.powi(4));
    Inertia::from_axes(i, i).shifted(area_circle(radius, in_radius), offset)
}

/// Rectangle with `base` along x, rotated by `angle` about its centroid, then offset.
pub fn moi_rectangle(base: f64, height: f64, angle: f64, offset: AxisOffset) -> Inertia {
    let rad = deg_to_rad(angle);
    let (sin2, cos2) = (rad.sin().powi(2), rad.cos().powi(2));
    let coeff = base * height / 12.0;
    let ix = coeff * (height.powi(2) * cos2 + base.powi(2) * sin2);
    let iy = coeff * (base.powi(2) * cos2 + height.powi(2) * sin2);
    Inertia::from_axes(ix, iy).shifted(area_rectangle(base, height), offset)
}

/// Circular segment of the given included angle whose parent circle sits on the origin.
pub fn moi_segment(radius: f64, angle: f64) -> Inertia {
    let a = deg_to_rad(angle);
    let shared = 2.0 * a.sin() * (a / 2.0).sin().powi(2);
    let ix = radius.powi(4) / 8.0 * (a - a.sin() + shared);
    let iy = radius.powi(4) / 24.0 * (3.0 * a - 3.0 * a.sin() + shared);
    Inertia::from_axes(ix, iy)
}

/// Rotate a symmetric section (`Ixy = 0`) by `theta` about its centroid.
pub fn moi_rotate(inertia: Inertia, theta: f64) -> Inertia {
    let mean = (inertia.ix + inertia.iy) / 2.0;
    let diff = (inertia.ix - inertia.iy) / 2.0 * (2.0 * deg_to_rad(theta)).cos();
    Inertia::from_axes(mean + diff, mean - diff)
}

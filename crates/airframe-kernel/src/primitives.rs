//! Sphere and sphere-hull primitives.
//!
//! Both are built by sweeping latitude rings around an axis. A sphere hull
//! reuses the sphere's ring layout: the half of the rings on the `b` side of
//! the equator are centered on `b`, the rest on `a`, and the duplicated
//! equator becomes the cylindrical band. With an even stack count that is
//! exactly the convex hull of the two tessellated spheres.

use std::f64::consts::PI;

use crate::math::{Point3, Vec3};
use crate::polygon::Polygon;

/// Tessellation parameters for curved primitives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tessellation {
    /// Segments around the axis.
    pub slices: u32,
    /// Latitude bands from pole to pole.
    pub stacks: u32,
}

impl Default for Tessellation {
    fn default() -> Self {
        Self {
            slices: 16,
            stacks: 8,
        }
    }
}

impl Tessellation {
    /// Clamp to usable values: at least 3 slices and an even stack count of
    /// at least 2.
    pub fn normalized(self) -> Self {
        let stacks = self.stacks.clamp(2, u32::MAX - 1);
        Self {
            slices: self.slices.max(3),
            stacks: stacks + stacks % 2,
        }
    }
}

/// One latitude ring: a circle around the axis, or a single pole point.
#[derive(Debug, Clone, Copy)]
struct Ring {
    center: Point3,
    radius: f64,
}

/// Right-handed frame whose `w` axis is the sweep axis.
#[derive(Debug, Clone, Copy)]
struct Frame {
    u: Vec3,
    v: Vec3,
    w: Vec3,
}

impl Frame {
    fn world() -> Self {
        Self {
            u: Vec3::x(),
            v: Vec3::y(),
            w: Vec3::z(),
        }
    }

    fn along(axis: &Vec3) -> Self {
        let w = axis.normalize();
        // Seed with the world axis least aligned with `w`.
        let seed = if w.x.abs() < 0.9 { Vec3::x() } else { Vec3::y() };
        let u = (seed - w * seed.dot(&w)).normalize();
        let v = w.cross(&u);
        Self { u, v, w }
    }

    fn ring_point(&self, ring: &Ring, angle: f64) -> Point3 {
        let (s, c) = angle.sin_cos();
        ring.center + (self.u * c + self.v * s) * ring.radius
    }
}

/// Polar angle of latitude ring `i`, 0 at the `+w` pole.
fn polar_angle(i: u32, stacks: u32) -> f64 {
    PI * i as f64 / stacks as f64
}

/// Sweep rings (ordered from the `+w` pole to the `-w` pole) into polygons
/// with outward winding. The first and last rings must be poles.
fn sweep(frame: &Frame, rings: &[Ring], slices: u32) -> Vec<Polygon> {
    let angles: Vec<f64> = (0..slices)
        .map(|j| 2.0 * PI * j as f64 / slices as f64)
        .collect();
    let points: Vec<Vec<Point3>> = rings
        .iter()
        .map(|ring| angles.iter().map(|&a| frame.ring_point(ring, a)).collect())
        .collect();

    let last = rings.len() - 1;
    let n = slices as usize;
    let mut polygons = Vec::with_capacity(last * n);

    for k in 0..last {
        let (upper, lower) = (&points[k], &points[k + 1]);
        for j in 0..n {
            let jn = (j + 1) % n;
            let vertices = if k == 0 {
                vec![rings[0].center, lower[j], lower[jn]]
            } else if k + 1 == last {
                vec![upper[j], rings[last].center, upper[jn]]
            } else {
                vec![upper[j], lower[j], lower[jn], upper[jn]]
            };
            polygons.extend(Polygon::new(vertices));
        }
    }

    polygons
}

/// Latitude rings of a sphere of `radius` around `center` for the ring
/// indices in `range`.
fn sphere_rings(
    frame: &Frame,
    center: &Point3,
    radius: f64,
    stacks: u32,
    range: std::ops::RangeInclusive<u32>,
) -> impl Iterator<Item = Ring> {
    let (frame_w, center) = (frame.w, *center);
    range.map(move |i| {
        let theta = polar_angle(i, stacks);
        Ring {
            center: center + frame_w * (radius * theta.cos()),
            radius: radius * theta.sin(),
        }
    })
}

/// Polygons of a UV sphere centered at `center`.
pub fn sphere_polygons(center: &Point3, radius: f64, tess: Tessellation) -> Vec<Polygon> {
    let tess = tess.normalized();
    let frame = Frame::world();
    let rings: Vec<Ring> = sphere_rings(&frame, center, radius, tess.stacks, 0..=tess.stacks).collect();
    sweep(&frame, &rings, tess.slices)
}

/// Polygons of the convex hull of two equal spheres centered at `a` and `b`.
///
/// Falls back to a single sphere when the centers coincide.
pub fn sphere_hull_polygons(a: &Point3, b: &Point3, radius: f64, tess: Tessellation) -> Vec<Polygon> {
    let tess = tess.normalized();
    let axis = b - a;
    if axis.norm() < f64::EPSILON * (1.0 + a.coords.norm()) {
        return sphere_polygons(a, radius, tess);
    }

    let frame = Frame::along(&axis);
    let half = tess.stacks / 2;
    let rings: Vec<Ring> = sphere_rings(&frame, b, radius, tess.stacks, 0..=half)
        .chain(sphere_rings(&frame, a, radius, tess.stacks, half..=tess.stacks))
        .collect();
    sweep(&frame, &rings, tess.slices)
}

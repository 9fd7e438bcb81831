#![warn(missing_docs)]

//! Polygon CSG kernel for airframe.
//!
//! Provides the [`Solid`] type: a closed surface made of convex polygons
//! that can be created from spheres and sphere hulls, translated, and
//! unioned. Meshing for viewers and file export is done on demand.
//!
//! # Example
//!
//! ```
//! use airframe_kernel::{Point3, Solid, Tessellation};
//!
//! let tess = Tessellation::default();
//! let marker = Solid::sphere(0.05, tess).translate(1.0, 0.0, 0.0);
//! let strut = Solid::sphere_hull(&Point3::origin(), &Point3::new(1.0, 0.0, 0.0), 0.05, tess);
//! let frame = marker.union(&strut);
//! assert!(frame.to_mesh().num_triangles() > 0);
//! ```

mod bsp;
pub mod math;
pub mod mesh;
pub mod polygon;
pub mod primitives;

pub use math::{BoundingBox, Point3, Vec3, PLANE_EPSILON};
pub use mesh::{facet_normal, TriangleMesh};
pub use polygon::{Plane, Polygon};
pub use primitives::Tessellation;

use tracing::debug;

/// A 3D solid bounded by convex polygons with outward winding.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Solid {
    polygons: Vec<Polygon>,
}

impl Solid {
    // =========================================================================
    // Constructors
    // =========================================================================

    /// Create an empty solid.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Wrap polygons that already bound a closed volume.
    pub fn from_polygons(polygons: Vec<Polygon>) -> Self {
        Self { polygons }
    }

    /// Create a sphere centered at the origin.
    pub fn sphere(radius: f64, tess: Tessellation) -> Self {
        Self::from_polygons(primitives::sphere_polygons(&Point3::origin(), radius, tess))
    }

    /// Convex hull of two spheres of `radius` centered at `a` and `b`: a
    /// capsule joining the two points.
    pub fn sphere_hull(a: &Point3, b: &Point3, radius: f64, tess: Tessellation) -> Self {
        Self::from_polygons(primitives::sphere_hull_polygons(a, b, radius, tess))
    }

    // =========================================================================
    // Transforms and booleans
    // =========================================================================

    /// Translate the solid.
    pub fn translate(&self, x: f64, y: f64, z: f64) -> Self {
        let offset = Vec3::new(x, y, z);
        let mut polygons = self.polygons.clone();
        for p in &mut polygons {
            p.translate(&offset);
        }
        Self { polygons }
    }

    /// Boolean union (self + other).
    ///
    /// Solids whose bounding boxes are apart are concatenated without
    /// building BSP trees.
    pub fn union(&self, other: &Solid) -> Self {
        let (Some(a), Some(b)) = (self.bounding_box(), other.bounding_box()) else {
            let mut polygons = self.polygons.clone();
            polygons.extend(other.polygons.iter().cloned());
            return Self { polygons };
        };

        if !a.overlaps(&b, PLANE_EPSILON) {
            let mut polygons = self.polygons.clone();
            polygons.extend(other.polygons.iter().cloned());
            return Self { polygons };
        }

        Self {
            polygons: bsp::union(self.polygons.clone(), other.polygons.clone()),
        }
    }

    /// Union of any number of solids. The empty iterator yields the empty solid.
    ///
    /// Solids are first split into groups whose bounding boxes chain into
    /// each other; groups cannot touch, so their results are concatenated.
    /// Inside a group operands are combined pairwise in a balanced tree so
    /// each boolean sees solids of similar size.
    ///
    /// Cost grows with the polygon count of each group, not the total: a
    /// connected frame of a few hundred spheres is one group and takes
    /// seconds to minutes, while scattered clusters stay cheap.
    pub fn union_all(solids: impl IntoIterator<Item = Solid>) -> Self {
        let solids: Vec<Solid> = solids.into_iter().collect();
        let groups = overlap_groups(&solids);
        debug!(operands = solids.len(), groups = groups.len(), "union");

        let mut slots: Vec<Option<Solid>> = solids.into_iter().map(Some).collect();
        let mut polygons = Vec::new();
        for group in groups {
            let members = group.iter().filter_map(|&i| slots[i].take()).collect();
            polygons.extend(balanced_union(members).polygons);
        }
        Self { polygons }
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Check if the solid has no geometry.
    pub fn is_empty(&self) -> bool {
        self.polygons.is_empty()
    }

    /// The boundary polygons.
    pub fn polygons(&self) -> &[Polygon] {
        &self.polygons
    }

    /// Number of boundary polygons.
    pub fn num_polygons(&self) -> usize {
        self.polygons.len()
    }

    /// Axis-aligned bounding box, or `None` for the empty solid.
    pub fn bounding_box(&self) -> Option<BoundingBox> {
        BoundingBox::from_points(self.polygons.iter().flat_map(|p| p.vertices.iter()))
    }

    /// Enclosed volume, from the divergence theorem over the boundary.
    pub fn volume(&self) -> f64 {
        self.polygons
            .iter()
            .flat_map(|p| p.triangles())
            .map(|[a, b, c]| a.coords.dot(&b.coords.cross(&c.coords)) / 6.0)
            .sum()
    }

    /// Triangulate for rendering and export.
    pub fn to_mesh(&self) -> TriangleMesh {
        TriangleMesh::from_polygons(&self.polygons)
    }
}

/// Pairwise union in a balanced tree.
fn balanced_union(mut level: Vec<Solid>) -> Solid {
    while level.len() > 1 {
        let mut next = Vec::with_capacity(level.len().div_ceil(2));
        let mut iter = level.into_iter();
        while let Some(a) = iter.next() {
            match iter.next() {
                Some(b) => next.push(a.union(&b)),
                None => next.push(a),
            }
        }
        level = next;
    }
    level.pop().unwrap_or_default()
}

/// Partition solids into groups such that no solid's bounding box overlaps a
/// solid in another group. Empty solids are left out. Indices keep input
/// order within each group.
fn overlap_groups(solids: &[Solid]) -> Vec<Vec<usize>> {
    let mut groups: Vec<(BoundingBox, Vec<usize>)> = Vec::new();
    for (i, solid) in solids.iter().enumerate() {
        let Some(bbox) = solid.bounding_box() else {
            continue;
        };
        let (touching, apart): (Vec<_>, Vec<_>) = groups
            .into_iter()
            .partition(|(group_box, _)| group_box.overlaps(&bbox, PLANE_EPSILON));
        groups = apart;

        let mut merged = (bbox, Vec::new());
        for (group_box, members) in touching {
            merged.0 = merged.0.union(&group_box);
            merged.1.extend(members);
        }
        merged.1.push(i);
        merged.1.sort_unstable();
        groups.push(merged);
    }
    groups.into_iter().map(|(_, members)| members).collect()
}

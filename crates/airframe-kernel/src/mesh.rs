//! Triangle meshes for viewers and file export.

use std::collections::HashMap;

use crate::math::{BoundingBox, Point3};
use crate::polygon::Polygon;

/// Output triangle mesh for rendering and export.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TriangleMesh {
    /// Flat array of vertex positions: `[x0, y0, z0, x1, y1, z1, ...]` (f32).
    pub vertices: Vec<f32>,
    /// Flat array of triangle indices: `[i0, i1, i2, ...]` (u32).
    pub indices: Vec<u32>,
}

impl TriangleMesh {
    /// Create an empty mesh.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fan-triangulate convex polygons, welding vertices with identical
    /// coordinates.
    pub fn from_polygons(polygons: &[Polygon]) -> Self {
        let mut mesh = Self::new();
        let mut welded: HashMap<[u32; 3], u32> = HashMap::new();

        for polygon in polygons {
            for tri in polygon.triangles() {
                for v in tri {
                    let p = [v.x as f32, v.y as f32, v.z as f32];
                    let key = p.map(f32::to_bits);
                    let index = *welded.entry(key).or_insert_with(|| {
                        mesh.vertices.extend_from_slice(&p);
                        (mesh.vertices.len() / 3 - 1) as u32
                    });
                    mesh.indices.push(index);
                }
            }
        }

        mesh
    }

    /// Number of triangles.
    pub fn num_triangles(&self) -> usize {
        self.indices.len() / 3
    }

    /// Number of vertices.
    pub fn num_vertices(&self) -> usize {
        self.vertices.len() / 3
    }

    /// Check if the mesh has no triangles.
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Position of vertex `i`.
    pub fn vertex(&self, i: u32) -> [f32; 3] {
        let i = i as usize * 3;
        [self.vertices[i], self.vertices[i + 1], self.vertices[i + 2]]
    }

    /// Iterate over triangles as vertex position triples.
    pub fn triangles(&self) -> impl Iterator<Item = [[f32; 3]; 3]> + '_ {
        self.indices
            .chunks_exact(3)
            .map(|tri| [self.vertex(tri[0]), self.vertex(tri[1]), self.vertex(tri[2])])
    }

    /// Bounding box of the vertices, or `None` for an empty mesh.
    pub fn bounds(&self) -> Option<BoundingBox> {
        let points: Vec<Point3> = self
            .vertices
            .chunks_exact(3)
            .map(|v| Point3::new(v[0] as f64, v[1] as f64, v[2] as f64))
            .collect();
        BoundingBox::from_points(&points)
    }
}

/// Unit normal of a triangle from its winding, `[0, 0, 1]` when degenerate.
pub fn facet_normal(tri: &[[f32; 3]; 3]) -> [f32; 3] {
    let [v0, v1, v2] = tri;
    let e1 = [v1[0] - v0[0], v1[1] - v0[1], v1[2] - v0[2]];
    let e2 = [v2[0] - v0[0], v2[1] - v0[1], v2[2] - v0[2]];
    let nx = e1[1] * e2[2] - e1[2] * e2[1];
    let ny = e1[2] * e2[0] - e1[0] * e2[2];
    let nz = e1[0] * e2[1] - e1[1] * e2[0];
    let len = (nx * nx + ny * ny + nz * nz).sqrt();
    if len > 1e-12 {
        [nx / len, ny / len, nz / len]
    } else {
        [0.0, 0.0, 1.0]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Polygon {
        Polygon::new(vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        ])
        .unwrap()
    }

    #[test]
    fn polygons_are_fan_triangulated_and_welded() {
        let mesh = TriangleMesh::from_polygons(&[square()]);
        assert_eq!(mesh.num_triangles(), 2);
        assert_eq!(mesh.num_vertices(), 4);
        assert_eq!(mesh.indices, vec![0, 1, 2, 0, 2, 3]);
    }

    #[test]
    fn bounds_and_normals() {
        let mesh = TriangleMesh::from_polygons(&[square()]);
        let bounds = mesh.bounds().unwrap();
        assert_eq!(bounds.max, Point3::new(1.0, 1.0, 0.0));
        let tri = mesh.triangles().next().unwrap();
        assert_eq!(facet_normal(&tri), [0.0, 0.0, 1.0]);
        assert!(TriangleMesh::new().bounds().is_none());
        assert!(TriangleMesh::new().is_empty());
    }
}

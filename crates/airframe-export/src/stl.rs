//! Binary STL export.

use airframe_kernel::{facet_normal, TriangleMesh};

use crate::error::{ExportError, Result};

const HEADER: &[u8; 80] =
    b"airframe STL export                                                             ";

/// Encode a mesh as binary STL.
///
/// Layout: 80-byte header, `u32` triangle count, then per triangle a facet
/// normal, three vertices (all little-endian `f32`) and a zero attribute
/// count.
pub fn to_stl_bytes(mesh: &TriangleMesh) -> Result<Vec<u8>> {
    let num_triangles = u32::try_from(mesh.num_triangles())
        .map_err(|_| ExportError::serialize("STL", "more than u32::MAX triangles"))?;

    let mut data = Vec::with_capacity(84 + num_triangles as usize * 50);
    data.extend_from_slice(HEADER);
    data.extend_from_slice(&num_triangles.to_le_bytes());

    for tri in mesh.triangles() {
        for c in facet_normal(&tri) {
            data.extend_from_slice(&c.to_le_bytes());
        }
        for v in tri {
            for c in v {
                data.extend_from_slice(&c.to_le_bytes());
            }
        }
        data.extend_from_slice(&0u16.to_le_bytes());
    }

    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use airframe_kernel::{Solid, Tessellation};

    fn read_f32(data: &[u8], at: usize) -> f32 {
        f32::from_le_bytes([data[at], data[at + 1], data[at + 2], data[at + 3]])
    }

    #[test]
    fn empty_mesh_is_header_only() {
        let data = to_stl_bytes(&TriangleMesh::new()).unwrap();
        assert_eq!(data.len(), 84);
        assert_eq!(&data[80..84], &[0, 0, 0, 0]);
        assert!(data.starts_with(b"airframe STL export"));
    }

    #[test]
    fn sphere_layout() {
        let mesh = Solid::sphere(1.0, Tessellation::default()).to_mesh();
        let data = to_stl_bytes(&mesh).unwrap();
        let n = mesh.num_triangles();
        assert_eq!(data.len(), 84 + 50 * n);
        assert_eq!(u32::from_le_bytes([data[80], data[81], data[82], data[83]]) as usize, n);

        // First facet touches the +z pole and faces upward.
        let nz = read_f32(&data, 84 + 8);
        assert!(nz > 0.5);
        let v0z = read_f32(&data, 84 + 12 + 8);
        assert!((v0z - 1.0).abs() < 1e-6);
    }
}

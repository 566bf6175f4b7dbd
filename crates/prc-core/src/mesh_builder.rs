//! Triangle mesh assembly
//!
//! Turns raw position/normal/index arrays into a [`Tessellation`] carrying
//! exactly one triangle face. Vertices are flattened in insertion order
//! with no deduplication; each triangle corner becomes an interleaved
//! (normal, position) index pair, both pre-scaled by 3 so they address the
//! flat triple-stride coordinate arrays directly.

use crate::status::{limit_error, validation_error, PrcError};
use crate::tessellation::{TessFace, Tessellation};

/// An xyz triple.
pub type Vec3 = (f64, f64, f64);
/// Three indices into a vertex array, one triangle.
pub type IndexTriple = (u32, u32, u32);

/// Builds a triangulated tessellation from positions `positions` indexed by
/// `position_indices` and normals `normals` indexed by `normal_indices`.
///
/// The two index arrays must describe the same triangles, so their lengths
/// must match; on mismatch nothing is built.
pub fn build_triangle_mesh(
    positions: &[Vec3],
    position_indices: &[IndexTriple],
    normals: &[Vec3],
    normal_indices: &[IndexTriple],
) -> Result<Tessellation, PrcError> {
    if position_indices.len() != normal_indices.len() {
        return Err(validation_error(format!(
            "triangle count mismatch: {} position index triples vs {} normal index triples",
            position_indices.len(),
            normal_indices.len()
        )));
    }

    let mut tess = Tessellation::new();
    for &(x, y, z) in positions {
        tess.coordinates.extend_from_slice(&[x, y, z]);
    }
    for &(x, y, z) in normals {
        tess.normal_coordinates.extend_from_slice(&[x, y, z]);
    }

    tess.triangulated_index
        .reserve(position_indices.len() * 6);
    for (pi, ni) in position_indices.iter().zip(normal_indices) {
        for (p, n) in [(pi.0, ni.0), (pi.1, ni.1), (pi.2, ni.2)] {
            tess.triangulated_index.push(3 * n);
            tess.triangulated_index.push(3 * p);
        }
    }

    let triangle_count = u32::try_from(position_indices.len())
        .map_err(|_| limit_error("triangle count exceeds 32-bit range"))?;
    tess.faces.push(TessFace::triangles(triangle_count));
    Ok(tess)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tessellation::FACE_TRIANGLE;

    #[test]
    fn test_single_triangle_interleaving() {
        let tess = build_triangle_mesh(
            &[(0.0, 0.0, 0.0), (1.0, 0.0, 0.0), (0.0, 1.0, 0.0)],
            &[(0, 1, 2)],
            &[(0.0, 0.0, 1.0)],
            &[(0, 0, 0)],
        )
        .unwrap();
        assert_eq!(
            tess.coordinates,
            vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0]
        );
        assert_eq!(tess.normal_coordinates, vec![0.0, 0.0, 1.0]);
        // Each corner is (3 * normal, 3 * position).
        assert_eq!(tess.triangulated_index, vec![0, 0, 0, 3, 0, 6]);
        assert_eq!(tess.faces.len(), 1);
        assert_eq!(tess.faces[0].sizes_triangulated, vec![1]);
        assert_eq!(tess.faces[0].used_entities_flag, FACE_TRIANGLE);
    }

    #[test]
    fn test_index_length_mismatch_fails() {
        let result = build_triangle_mesh(
            &[(0.0, 0.0, 0.0)],
            &[(0, 0, 0)],
            &[(0.0, 0.0, 1.0)],
            &[],
        );
        assert!(matches!(result, Err(PrcError::Validation(_))));
    }

    #[test]
    fn test_vertices_are_not_deduplicated() {
        let p = (1.0, 2.0, 3.0);
        let tess = build_triangle_mesh(
            &[p, p, p],
            &[(0, 1, 2)],
            &[(0.0, 1.0, 0.0)],
            &[(0, 0, 0)],
        )
        .unwrap();
        assert_eq!(tess.coordinates.len(), 9);
    }
}

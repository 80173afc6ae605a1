//! Per-vertex tangent frames for normal mapping
//!
//! Tangent follows the direction of increasing U, bitangent the direction of
//! increasing V. Each face contributes its UV-to-position Jacobian to its three
//! corners; the sums are then orthonormalized against the vertex normal.

use glam::{Vec2, Vec3};

use super::modifiers::MeshModifier;
use super::types::GeometryBuffer;

/// Tangent (direction of increasing U) and bitangent (increasing V) of one face
///
/// Returns zero vectors when the UV mapping is degenerate.
pub fn face_tangents(p: [Vec3; 3], uv: [Vec2; 3]) -> (Vec3, Vec3) {
    let e1 = p[1] - p[0];
    let e2 = p[2] - p[0];
    let d1 = uv[1] - uv[0];
    let d2 = uv[2] - uv[0];

    let det = d1.x * d2.y - d2.x * d1.y;
    let r = if det == 0.0 { 0.0 } else { 1.0 / det };

    let sdir = (e1 * d2.y - e2 * d1.y) * r;
    let tdir = (e2 * d1.x - e1 * d2.x) * r;
    (sdir, tdir)
}

/// Orthonormalize `t` against unit normal `n` and pick the handedness sign
///
/// Falls back to an arbitrary vector perpendicular to `n` when `t` is zero or
/// parallel to it.
pub fn orthonormal_tangent(n: Vec3, t: Vec3, bitangent: Vec3) -> [f32; 4] {
    let tangent = (t - n * n.dot(t))
        .try_normalize()
        .unwrap_or_else(|| n.any_orthonormal_vector());
    let w = if n.cross(tangent).dot(bitangent) < 0.0 {
        -1.0
    } else {
        1.0
    };
    [tangent.x, tangent.y, tangent.z, w]
}

/// Compute `tangents` from positions, normals, UVs and triangles
///
/// Meshes without normals or UVs are left untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct CalculateTangents;

impl MeshModifier for CalculateTangents {
    fn apply(&self, mesh: &mut GeometryBuffer) {
        let vertex_count = mesh.vertex_count();
        if mesh.normals.len() != vertex_count || mesh.uvs.len() != vertex_count {
            return;
        }

        let mut tan1 = vec![Vec3::ZERO; vertex_count];
        let mut tan2 = vec![Vec3::ZERO; vertex_count];

        for tri in &mesh.triangles {
            let p = tri.map(|i| Vec3::from(mesh.positions[i as usize]));
            let uv = tri.map(|i| Vec2::from(mesh.uvs[i as usize]));
            let (sdir, tdir) = face_tangents(p, uv);

            for &i in tri {
                tan1[i as usize] += sdir;
                tan2[i as usize] += tdir;
            }
        }

        mesh.tangents = mesh
            .normals
            .iter()
            .zip(tan1.iter().zip(&tan2))
            .map(|(n, (&t, &b))| {
                let n = Vec3::from(*n).normalize_or(Vec3::Y);
                orthonormal_tangent(n, t, b)
            })
            .collect();
    }
}

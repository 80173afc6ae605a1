//! Equirectangular UV mapping for unit spheres, plus the two topology repairs
//! the mapping needs: the vertical texture seam and the shared pole vertices.

use std::f32::consts::PI;

use glam::{Vec2, Vec3};
use hashbrown::HashMap;
use tracing::debug;

use super::modifiers::MeshModifier;
use super::types::GeometryBuffer;

/// Corners of a wrapped triangle with U below this are treated as having
/// wrapped around from the far side of the seam.
pub const SEAM_U_THRESHOLD: f32 = 0.25;

/// Map a unit-sphere position to equirectangular UV
///
/// - U: longitude, `atan2(x, z) / -2π - 0.5`, wrapped into [0, 1)
/// - V: latitude, 0 at the south pole, 1 at the north pole
pub fn equirectangular_uv(p: Vec3) -> [f32; 2] {
    let mut u = p.x.atan2(p.z) / (-2.0 * PI) - 0.5;
    if u < 0.0 {
        u += 1.0;
    }
    let v = p.y.clamp(-1.0, 1.0).asin() / PI + 0.5;
    [u, v]
}

/// Fill `uvs` for every vertex of a mesh whose positions lie on the unit sphere
pub fn project_equirectangular(mesh: &mut GeometryBuffer) {
    mesh.uvs = mesh
        .positions
        .iter()
        .map(|p| equirectangular_uv(Vec3::from(*p).normalize_or_zero()))
        .collect();
}

/// Whether a triangle's UV-space winding is inverted, which happens when its
/// corners were projected on both sides of the seam
pub fn is_wrapped(a: [f32; 2], b: [f32; 2], c: [f32; 2]) -> bool {
    let (a, b, c) = (Vec2::from(a), Vec2::from(b), Vec2::from(c));
    (b - a).perp_dot(c - a) > 0.0
}

/// Indices of all triangles with inverted UV winding
pub fn wrapped_triangles(mesh: &GeometryBuffer) -> Vec<usize> {
    mesh.triangles
        .iter()
        .enumerate()
        .filter(|(_, tri)| {
            let [a, b, c] = tri.map(|i| mesh.uvs[i as usize]);
            is_wrapped(a, b, c)
        })
        .map(|(i, _)| i)
        .collect()
}

/// Repair the vertical texture seam
///
/// Corners of wrapped triangles whose U is below [`SEAM_U_THRESHOLD`] are
/// redirected to a duplicate vertex with `U + 1`. Each original vertex gets at
/// most one duplicate per pass, shared by every wrapped triangle that needs it.
/// Running the pass again adds nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixWrappedUvs;

impl MeshModifier for FixWrappedUvs {
    fn apply(&self, mesh: &mut GeometryBuffer) {
        if mesh.uvs.is_empty() {
            return;
        }

        let wrapped = wrapped_triangles(mesh);
        let mut visited: HashMap<u32, u32> = HashMap::new();

        for &t in &wrapped {
            let mut tri = mesh.triangles[t];
            for corner in &mut tri {
                let original = *corner;
                let u = mesh.uvs[original as usize][0];
                if u >= SEAM_U_THRESHOLD {
                    continue;
                }

                *corner = match visited.get(&original) {
                    Some(&dup) => dup,
                    None => {
                        let dup = mesh.duplicate_vertex(original);
                        mesh.uvs[dup as usize][0] = u + 1.0;
                        visited.insert(original, dup);
                        dup
                    }
                };
            }
            mesh.triangles[t] = tri;
        }

        debug!(
            "seam repair: {} wrapped triangles, {} duplicated vertices",
            wrapped.len(),
            visited.len()
        );
    }
}

/// Find the first vertex exactly on the pole at `y` (+1 or -1)
pub fn find_pole(mesh: &GeometryBuffer, y: f32) -> Option<u32> {
    mesh.positions
        .iter()
        .position(|p| p[1] == y)
        .map(|i| i as u32)
}

/// Repair texture pinching at single-vertex poles
///
/// Every triangle corner on the north or south pole vertex gets its own new
/// duplicate, with U set to the mean U of the triangle's other two corners.
/// Meshes without a vertex exactly on a pole are left alone.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixSharedPoles;

impl FixSharedPoles {
    fn fix_face(mesh: &mut GeometryBuffer, t: usize, pole: u32) -> bool {
        let tri = mesh.triangles[t];
        let Some(slot) = tri.iter().position(|&i| i == pole) else {
            return false;
        };

        let others = [tri[(slot + 1) % 3], tri[(slot + 2) % 3]];
        let u = (mesh.uvs[others[0] as usize][0] + mesh.uvs[others[1] as usize][0]) / 2.0;

        let dup = mesh.duplicate_vertex(pole);
        mesh.uvs[dup as usize][0] = u;
        mesh.triangles[t][slot] = dup;
        true
    }
}

impl MeshModifier for FixSharedPoles {
    fn apply(&self, mesh: &mut GeometryBuffer) {
        if mesh.uvs.is_empty() {
            return;
        }

        let north = find_pole(mesh, 1.0);
        let south = find_pole(mesh, -1.0);
        let mut duplicates = 0;

        for t in 0..mesh.triangles.len() {
            for pole in [north, south].into_iter().flatten() {
                if Self::fix_face(mesh, t, pole) {
                    duplicates += 1;
                }
            }
        }

        debug!(
            "pole repair: north={:?} south={:?}, {} duplicated vertices",
            north, south, duplicates
        );
    }
}

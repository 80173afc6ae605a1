//! Mesh modifiers for generated geometry
//!
//! Post-processing passes that operate on a `GeometryBuffer` in place. The
//! sphere pipeline is itself a chain of modifiers:
//! ```
//! use planet_mesh::procedural::*;
//!
//! let mut mesh = build_ico_sphere(2, 1.0, false);
//! mesh.apply(Scale(2.0)).apply(FlatShading);
//! assert_eq!(mesh.vertex_count(), mesh.triangle_count() * 3);
//! ```

use glam::Vec3;

use super::types::{GeometryBuffer, face_normal};

/// Trait for mesh modifiers
///
/// Implement this trait to create passes that can be applied to
/// `GeometryBuffer` instances.
pub trait MeshModifier {
    /// Apply this modifier to a mesh, modifying it in place
    fn apply(&self, mesh: &mut GeometryBuffer);
}

/// Extension trait for fluent modifier application
pub trait MeshApply {
    /// Apply a modifier and return `&mut Self` for chaining
    fn apply<M: MeshModifier>(&mut self, modifier: M) -> &mut Self;
}

impl MeshApply for GeometryBuffer {
    fn apply<M: MeshModifier>(&mut self, modifier: M) -> &mut Self {
        modifier.apply(self);
        self
    }
}

/// Uniformly scale positions about the origin
///
/// Normals and tangents are direction-only and stay untouched.
#[derive(Debug, Clone, Copy)]
pub struct Scale(pub f32);

impl MeshModifier for Scale {
    fn apply(&self, mesh: &mut GeometryBuffer) {
        for p in &mut mesh.positions {
            *p = (Vec3::from(*p) * self.0).to_array();
        }
        mesh.recalculate_bounds();
    }
}

/// Convert to flat shading by giving every triangle corner its own vertex
///
/// Positions and UVs are copied per corner, the index buffer becomes the
/// identity sequence and normals are recomputed per face. Tangents are
/// dropped since the shared-vertex frame no longer applies. Degenerate faces
/// keep the source vertex normal when one exists.
#[derive(Debug, Clone, Copy, Default)]
pub struct FlatShading;

impl MeshModifier for FlatShading {
    fn apply(&self, mesh: &mut GeometryBuffer) {
        let corner_count = mesh.triangles.len() * 3;
        let has_uvs = !mesh.uvs.is_empty();
        let has_normals = !mesh.normals.is_empty();

        let mut positions = Vec::with_capacity(corner_count);
        let mut normals = Vec::with_capacity(corner_count);
        let mut uvs = Vec::with_capacity(if has_uvs { corner_count } else { 0 });
        let mut triangles = Vec::with_capacity(mesh.triangles.len());

        for tri in &mesh.triangles {
            let [p0, p1, p2] = tri.map(|i| Vec3::from(mesh.positions[i as usize]));
            let face = face_normal(p0, p1, p2);

            let base = positions.len() as u32;
            for &i in tri {
                let i = i as usize;
                positions.push(mesh.positions[i]);
                if has_uvs {
                    uvs.push(mesh.uvs[i]);
                }

                let normal = match face {
                    Some(n) => n.to_array(),
                    None if has_normals => mesh.normals[i],
                    None => [0.0; 3],
                };
                normals.push(normal);
            }
            triangles.push([base, base + 1, base + 2]);
        }

        mesh.positions = positions;
        mesh.normals = normals;
        mesh.uvs = uvs;
        mesh.tangents.clear();
        mesh.triangles = triangles;
        mesh.recalculate_bounds();
    }
}

/// Make a thin surface visible from both sides
///
/// Appends a copy of every vertex with negated normal (and mirrored tangent
/// handedness), then appends the original index sequence offset onto the
/// copies and reversed, which flips the winding of every face.
#[derive(Debug, Clone, Copy, Default)]
pub struct DoubleSided;

impl MeshModifier for DoubleSided {
    fn apply(&self, mesh: &mut GeometryBuffer) {
        let vertex_count = mesh.vertex_count();
        let offset = vertex_count as u32;

        mesh.positions.extend_from_within(..);
        mesh.uvs.extend_from_within(..);
        mesh.normals.extend_from_within(..);
        let start = vertex_count.min(mesh.normals.len());
        for n in &mut mesh.normals[start..] {
            *n = (-Vec3::from(*n)).to_array();
        }
        mesh.tangents.extend_from_within(..);
        let start = vertex_count.min(mesh.tangents.len());
        for t in &mut mesh.tangents[start..] {
            t[3] = -t[3];
        }

        // Reversing the flattened index list reverses both triangle order and
        // corner order, so [a, b, c] becomes [c', b', a'].
        let back: Vec<_> = mesh
            .triangles
            .iter()
            .rev()
            .map(|&[a, b, c]| [c + offset, b + offset, a + offset])
            .collect();
        mesh.triangles.extend(back);
        mesh.recalculate_bounds();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quad() -> GeometryBuffer {
        let mut mesh = GeometryBuffer::new();
        let a = mesh.add_vertex_uv(Vec3::new(0.0, 0.0, 0.0), [0.0, 0.0], Vec3::Y);
        let b = mesh.add_vertex_uv(Vec3::new(0.0, 0.0, 1.0), [0.0, 1.0], Vec3::Y);
        let c = mesh.add_vertex_uv(Vec3::new(1.0, 0.0, 1.0), [1.0, 1.0], Vec3::Y);
        let d = mesh.add_vertex_uv(Vec3::new(1.0, 0.0, 0.0), [1.0, 0.0], Vec3::Y);
        mesh.add_triangle(a, b, c);
        mesh.add_triangle(a, c, d);
        mesh
    }

    #[test]
    fn test_scale_positions() {
        let mut mesh = quad();
        Scale(3.0).apply(&mut mesh);

        assert_eq!(mesh.positions[2], [3.0, 0.0, 3.0]);
        assert_eq!(mesh.normals[2], [0.0, 1.0, 0.0]);
        assert_eq!(mesh.bounds.max, Vec3::new(3.0, 0.0, 3.0));
    }

    #[test]
    fn test_flat_shading_vertex_count() {
        let mut mesh = quad();
        FlatShading.apply(&mut mesh);

        assert_eq!(mesh.vertex_count(), 6);
        assert_eq!(mesh.uvs.len(), 6);
        assert_eq!(mesh.indices(), (0..6).collect::<Vec<u32>>());
        assert_eq!(mesh.validate(), Ok(()));
    }

    #[test]
    fn test_flat_shading_face_normals() {
        let mut mesh = quad();
        FlatShading.apply(&mut mesh);

        for n in &mesh.normals {
            assert!((Vec3::from(*n) - Vec3::Y).length() < 1e-6);
        }
    }

    #[test]
    fn test_flat_shading_degenerate_face_keeps_normal() {
        let mut mesh = GeometryBuffer::new();
        for x in 0..3 {
            mesh.add_vertex_uv(Vec3::new(x as f32, 0.0, 0.0), [0.0, 0.0], Vec3::Z);
        }
        mesh.add_triangle(0, 1, 2);

        FlatShading.apply(&mut mesh);
        assert!(mesh.normals.iter().all(|n| *n == [0.0, 0.0, 1.0]));
    }

    #[test]
    fn test_double_sided_counts_and_winding() {
        let mut mesh = quad();
        DoubleSided.apply(&mut mesh);

        assert_eq!(mesh.vertex_count(), 8);
        assert_eq!(mesh.triangle_count(), 4);
        assert_eq!(mesh.triangles[2], [7, 6, 4]);
        assert_eq!(mesh.triangles[3], [6, 5, 4]);
        assert_eq!(mesh.validate(), Ok(()));

        for tri in &mesh.triangles[2..] {
            let [p0, p1, p2] = tri.map(|i| Vec3::from(mesh.positions[i as usize]));
            let n = face_normal(p0, p1, p2).unwrap();
            assert!((n - Vec3::NEG_Y).length() < 1e-6);
        }
    }

    #[test]
    fn test_double_sided_negates_copied_normals() {
        let mut mesh = quad();
        DoubleSided.apply(&mut mesh);

        assert!(mesh.normals[..4].iter().all(|n| *n == [0.0, 1.0, 0.0]));
        assert!(mesh.normals[4..].iter().all(|n| *n == [0.0, -1.0, 0.0]));
        assert_eq!(mesh.uvs[..4], mesh.uvs[4..]);
    }

    #[test]
    fn test_double_sided_flips_tangent_handedness() {
        let mut mesh = quad();
        mesh.tangents = vec![[1.0, 0.0, 0.0, 1.0]; 4];
        DoubleSided.apply(&mut mesh);

        assert_eq!(mesh.tangents.len(), 8);
        assert!(mesh.tangents[..4].iter().all(|t| t[3] == 1.0));
        assert!(mesh.tangents[4..].iter().all(|t| *t == [1.0, 0.0, 0.0, -1.0]));
    }

    #[test]
    fn test_double_sided_positions_only() {
        let mut mesh = GeometryBuffer::new();
        for p in [Vec3::ZERO, Vec3::X, Vec3::Z] {
            mesh.add_position(p);
        }
        mesh.add_triangle(0, 1, 2);
        DoubleSided.apply(&mut mesh);

        assert_eq!(mesh.vertex_count(), 6);
        assert!(mesh.normals.is_empty());
        assert!(mesh.tangents.is_empty());
        assert_eq!(mesh.triangles[1], [5, 4, 3]);
        assert_eq!(mesh.validate(), Ok(()));
    }
}

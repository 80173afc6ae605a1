//! Cross-stage properties of the generated meshes

use glam::Vec3;

use super::*;

fn all_spheres() -> Vec<(String, GeometryBuffer)> {
    let mut meshes = Vec::new();
    for level in 0..=4 {
        for flat in [false, true] {
            meshes.push((
                format!("ico {level} flat={flat}"),
                build_ico_sphere(level, 1.0, flat),
            ));
            meshes.push((
                format!("octa {level} flat={flat}"),
                build_octahedron_sphere(level, 1.0, flat),
            ));
        }
    }
    meshes
}

#[test]
fn test_every_mesh_is_valid() {
    for (name, mesh) in all_spheres() {
        assert_eq!(mesh.validate(), Ok(()), "{name}");
    }
    for sides in 3..=10 {
        assert_eq!(build_ring(sides, 1.0, true, 0.5).validate(), Ok(()));
        assert_eq!(build_ring(sides, 1.0, false, 0.5).validate(), Ok(()));
    }
}

#[test]
fn test_triangle_count_unchanged_by_repairs() {
    for level in 0..=MAX_SUBDIVISIONS {
        let ico = build_ico_sphere(level as i32, 1.0, false);
        assert_eq!(ico.triangle_count(), 20 * 4usize.pow(level));
    }
}

#[test]
fn test_uv_range_after_repairs() {
    let mesh = build_ico_sphere(3, 1.0, false);
    for [u, v] in &mesh.uvs {
        assert!((0.0..=1.25).contains(u), "u = {u}");
        assert!((0.0..=1.0).contains(v), "v = {v}");
    }
}

#[test]
fn test_flat_normals_match_face_normals() {
    let smooth = build_ico_sphere(2, 1.0, false);
    let flat = build_ico_sphere(2, 1.0, true);

    for (tri, flat_tri) in smooth.triangles.iter().zip(&flat.triangles) {
        let [p0, p1, p2] = tri.map(|i| Vec3::from(smooth.positions[i as usize]));
        let expected = face_normal(p0, p1, p2).unwrap();
        for &i in flat_tri {
            assert!((Vec3::from(flat.normals[i as usize]) - expected).length() < 1e-5);
        }
    }
}

#[test]
fn test_flat_shading_preserves_corner_uvs() {
    let smooth = build_octahedron_sphere(2, 1.0, false);
    let flat = build_octahedron_sphere(2, 1.0, true);

    let corners: Vec<[f32; 2]> = smooth.indices().iter().map(|&i| smooth.uvs[i as usize]).collect();
    assert_eq!(flat.uvs, corners);
}

#[test]
fn test_tangents_are_orthonormal() {
    for mesh in [build_ico_sphere(3, 2.0, false), build_octahedron_sphere(3, 0.5, false)] {
        for (t, n) in mesh.tangents.iter().zip(&mesh.normals) {
            let tangent = Vec3::new(t[0], t[1], t[2]);
            assert!(tangent.is_finite());
            assert!((tangent.length() - 1.0).abs() < 1e-4);
            assert!(tangent.dot(Vec3::from(*n)).abs() < 1e-4);
            assert!(t[3] == 1.0 || t[3] == -1.0);
        }
    }
}

#[test]
fn test_tangents_follow_longitude_at_equator() {
    let mesh = build_octahedron_sphere(3, 1.0, false);

    // U grows from 0.25 at +X to 0.5 at +Z
    let i = mesh
        .positions
        .iter()
        .position(|p| *p == [1.0, 0.0, 0.0])
        .unwrap();
    let t = mesh.tangents[i];
    assert!((Vec3::new(t[0], t[1], t[2]) - Vec3::Z).length() < 1e-3);
}

#[test]
fn test_bounds_match_radius() {
    for radius in [0.5, 1.0, 10.0] {
        let mesh = build_octahedron_sphere(2, radius, false);
        assert!((mesh.bounds.min - Vec3::splat(-radius)).length() < 1e-4);
        assert!((mesh.bounds.max - Vec3::splat(radius)).length() < 1e-4);
    }
}

#[test]
fn test_modifiers_compose() {
    let mut mesh = build_ring(6, 1.0, true, 0.5);
    let triangles = mesh.triangle_count();
    mesh.apply(Scale(2.0)).apply(FlatShading);

    assert_eq!(mesh.vertex_count(), triangles * 3);
    assert!((mesh.bounding_radius() - 2.0).abs() < 1e-5);
}

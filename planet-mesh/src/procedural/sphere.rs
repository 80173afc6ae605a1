//! Geodesic sphere generators
//!
//! Both spheres share one pipeline: subdivide the base solid, project UVs,
//! repair the seam and the poles, compute tangents on the unit sphere, then
//! scale to the requested radius and optionally flatten (recomputing tangents
//! for the flat faces).

use glam::Vec3;
use tracing::warn;

use super::modifiers::{FlatShading, MeshApply, Scale};
use super::polyhedron::{Polyhedron, clamp_level, subdivide};
use super::tangent::CalculateTangents;
use super::types::GeometryBuffer;
use super::uv::{FixSharedPoles, FixWrappedUvs, project_equirectangular};

/// Radius used when the requested one is NaN or infinite
pub const DEFAULT_RADIUS: f32 = 1.0;

/// Clamp a requested radius to be finite and non-negative
pub(crate) fn clamp_radius(radius: f32) -> f32 {
    if !radius.is_finite() {
        warn!("radius {} is not finite, using {}", radius, DEFAULT_RADIUS);
        DEFAULT_RADIUS
    } else if radius < 0.0 {
        warn!("radius {} is negative, clamping to 0", radius);
        0.0
    } else {
        radius
    }
}

/// Run the full sphere pipeline over `base`
///
/// # Arguments
/// * `base` - Solid to subdivide
/// * `level` - Subdivision rounds, clamped to 0..=6
/// * `radius` - Sphere radius, clamped to be non-negative; NaN or infinite gives 1
/// * `flat_shaded` - Give every triangle corner its own vertex and a face normal
pub fn generate_sphere(
    base: Polyhedron,
    level: i32,
    radius: f32,
    flat_shaded: bool,
) -> GeometryBuffer {
    let level = clamp_level(level);
    let radius = clamp_radius(radius);

    let mut mesh = subdivide(base, level);
    project_equirectangular(&mut mesh);
    mesh.apply(FixWrappedUvs).apply(FixSharedPoles);

    // Unit-sphere positions are their own normals
    mesh.normals = mesh
        .positions
        .iter()
        .map(|p| Vec3::from(*p).normalize_or_zero().to_array())
        .collect();

    mesh.apply(CalculateTangents).apply(Scale(radius));
    if flat_shaded {
        // Flattening drops the shared-vertex frames; rebuild them per face
        mesh.apply(FlatShading).apply(CalculateTangents);
    }

    debug_assert!(mesh.validate().is_ok(), "{:?}", mesh.validate());
    mesh
}

/// Generate an icosphere: a subdivided icosahedron on a sphere of `radius`
///
/// # Example
/// ```
/// use planet_mesh::procedural::build_ico_sphere;
///
/// let mesh = build_ico_sphere(0, 1.0, false);
/// assert_eq!(mesh.triangle_count(), 20);
/// ```
pub fn build_ico_sphere(level: i32, radius: f32, flat_shaded: bool) -> GeometryBuffer {
    generate_sphere(Polyhedron::Icosahedron, level, radius, flat_shaded)
}

/// Generate an octahedron sphere, which has real vertices on both poles
pub fn build_octahedron_sphere(level: i32, radius: f32, flat_shaded: bool) -> GeometryBuffer {
    generate_sphere(Polyhedron::Octahedron, level, radius, flat_shaded)
}

//! Flat annulus generators in the XZ plane, visible from both sides

use std::f32::consts::{PI, TAU};

use glam::{Quat, Vec3};
use tracing::warn;

use super::modifiers::{DoubleSided, MeshApply};
use super::sphere::clamp_radius;
use super::tangent::CalculateTangents;
use super::types::GeometryBuffer;

/// Fewest sides a ring can have
pub const MIN_RING_SIDES: u32 = 3;

fn clamp_sides(sides: i32) -> u32 {
    if sides < MIN_RING_SIDES as i32 {
        warn!("ring sides {} below minimum, clamping to {}", sides, MIN_RING_SIDES);
        MIN_RING_SIDES
    } else {
        sides as u32
    }
}

/// Band width used when the requested one is NaN
pub const DEFAULT_RING_WIDTH: f32 = 0.5;

fn clamp_width(width: f32) -> f32 {
    if width.is_nan() {
        warn!("ring width is NaN, using {}", DEFAULT_RING_WIDTH);
        DEFAULT_RING_WIDTH
    } else if !(0.0..=1.0).contains(&width) {
        let clamped = width.clamp(0.0, 1.0);
        warn!("ring width {} outside [0, 1], clamping to {}", width, clamped);
        clamped
    } else {
        width
    }
}

/// Rim point `step` of `sides`, rotating +Z about +Y
fn rim_point(step: u32, sides: u32, radius: f32) -> Vec3 {
    let angle = TAU * step as f32 / sides as f32;
    Quat::from_rotation_y(angle) * Vec3::Z * radius
}

/// Finish a one-sided ring: tangents, then mirror to the back face
fn finish(mut mesh: GeometryBuffer) -> GeometryBuffer {
    mesh.apply(CalculateTangents).apply(DoubleSided);
    debug_assert!(mesh.validate().is_ok(), "{:?}", mesh.validate());
    mesh
}

/// Generate a solid disc as a triangle fan around a centre vertex
///
/// Every rim position is emitted twice, with U = 0 and U = 1, so each fan
/// triangle spans the full texture width.
pub fn generate_ring_solid(sides: i32, radius: f32) -> GeometryBuffer {
    let sides = clamp_sides(sides);
    let radius = clamp_radius(radius);

    let mut mesh = GeometryBuffer::new();

    let step = TAU / sides as f32;
    let theta = (PI - step) / 2.0;
    mesh.add_vertex_uv(Vec3::ZERO, [0.5, radius * theta.cos()], Vec3::Y);

    for i in 0..sides {
        let p = rim_point(i, sides, radius);
        mesh.add_vertex_uv(p, [0.0, 0.0], Vec3::Y);
        mesh.add_vertex_uv(p, [1.0, 0.0], Vec3::Y);
    }

    // Rim vertex i sits at 1 + 2i (U = 0) and 2 + 2i (U = 1)
    for i in 1..sides {
        mesh.add_triangle(0, i * 2, i * 2 + 1);
    }
    mesh.add_triangle(0, sides * 2, 1);

    finish(mesh)
}

/// Generate a hollow ring: one quad per side between the inner and outer rim
///
/// # Arguments
/// * `sides` - Number of segments (min 3)
/// * `radius` - Outer radius
/// * `width` - Band width as a fraction of `radius`, in [0, 1]
pub fn generate_ring_hollow(sides: i32, radius: f32, width: f32) -> GeometryBuffer {
    let sides = clamp_sides(sides);
    let radius = clamp_radius(radius);
    let width = clamp_width(width);
    let inner = 1.0 - width;

    let mut mesh = GeometryBuffer::new();

    for i in 0..sides {
        let outer_a = rim_point(i, sides, radius);
        let outer_b = rim_point(i + 1, sides, radius);

        let v0 = mesh.add_vertex_uv(outer_a * inner, [1.0, 1.0], Vec3::Y);
        let v1 = mesh.add_vertex_uv(outer_a, [1.0, 0.0], Vec3::Y);
        let v2 = mesh.add_vertex_uv(outer_b, [0.0, 0.0], Vec3::Y);
        let v3 = mesh.add_vertex_uv(outer_b * inner, [0.0, 1.0], Vec3::Y);

        mesh.add_triangle(v0, v1, v2);
        mesh.add_triangle(v0, v2, v3);
    }

    finish(mesh)
}

/// Generate a solid or hollow ring, lying in the XZ plane
///
/// `width` is ignored for solid rings.
pub fn build_ring(sides: i32, radius: f32, hollow: bool, width: f32) -> GeometryBuffer {
    if hollow {
        generate_ring_hollow(sides, radius, width)
    } else {
        generate_ring_solid(sides, radius)
    }
}

//! Procedural mesh generation
//!
//! Geodesic spheres and rings built as unpacked geometry buffers with
//! normals, equirectangular UVs and tangents.
//!
//! Sphere pipeline:
//! - Subdivide the base polyhedron, projecting midpoints onto the unit sphere
//! - Project equirectangular UVs
//! - Repair the texture seam and the pole vertices
//! - Compute tangents, scale to radius, optionally flatten

mod export;
mod modifiers;
mod polyhedron;
mod ring;
mod sphere;
mod tangent;
mod types;
mod uv;

#[cfg(test)]
mod tests;

pub use types::{Bounds, GeometryBuffer, GeometryError, Triangle, face_normal};

pub use export::{write_obj, write_obj_to};

pub use modifiers::{DoubleSided, FlatShading, MeshApply, MeshModifier, Scale};

pub use polyhedron::{EdgeMidpointCache, MAX_SUBDIVISIONS, Polyhedron, edge_key, subdivide};

pub use uv::{
    FixSharedPoles, FixWrappedUvs, SEAM_U_THRESHOLD, equirectangular_uv, project_equirectangular,
    wrapped_triangles,
};

pub use tangent::CalculateTangents;

pub use sphere::{DEFAULT_RADIUS, build_ico_sphere, build_octahedron_sphere, generate_sphere};

pub use ring::{
    DEFAULT_RING_WIDTH, MIN_RING_SIDES, build_ring, generate_ring_hollow, generate_ring_solid,
};

//! Base polyhedra and geodesic subdivision
//!
//! Builds the icosahedron or octahedron on the unit sphere and refines it by
//! splitting every triangle into four, projecting each new edge midpoint back
//! onto the sphere.

use glam::Vec3;
use hashbrown::HashMap;
use tracing::warn;

use super::types::{GeometryBuffer, Triangle};

/// Highest supported subdivision level (20·4⁶ faces for the icosphere)
pub const MAX_SUBDIVISIONS: u32 = 6;

/// Golden ratio, used for the icosahedron vertex coordinates
const PHI: f32 = 1.618_034;

/// Canonical icosahedron adjacency, outward (counter-clockwise) winding
const ICOSAHEDRON_FACES: [Triangle; 20] = [
    // 5 faces around point 0
    [0, 11, 5],
    [0, 5, 1],
    [0, 1, 7],
    [0, 7, 10],
    [0, 10, 11],
    // 5 adjacent faces
    [1, 5, 9],
    [5, 11, 4],
    [11, 10, 2],
    [10, 7, 6],
    [7, 1, 8],
    // 5 faces around point 3
    [3, 9, 4],
    [3, 4, 2],
    [3, 2, 6],
    [3, 6, 8],
    [3, 8, 9],
    // 5 adjacent faces
    [4, 9, 5],
    [2, 4, 11],
    [6, 2, 10],
    [8, 6, 7],
    [9, 8, 1],
];

/// Octahedron faces: four around the north pole (0), four around the south pole (5)
const OCTAHEDRON_FACES: [Triangle; 8] = [
    [0, 2, 1],
    [0, 3, 2],
    [0, 4, 3],
    [0, 1, 4],
    [5, 1, 2],
    [5, 2, 3],
    [5, 3, 4],
    [5, 4, 1],
];

/// Base solid for geodesic sphere generation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Polyhedron {
    /// 12 vertices, 20 faces
    Icosahedron,
    /// 6 vertices, 8 faces, with vertices on both poles
    Octahedron,
}

impl Polyhedron {
    /// Base vertex positions, projected onto the unit sphere
    fn vertices(self) -> Vec<Vec3> {
        let raw: &[Vec3] = match self {
            Polyhedron::Icosahedron => &[
                Vec3::new(-1.0, PHI, 0.0),
                Vec3::new(1.0, PHI, 0.0),
                Vec3::new(-1.0, -PHI, 0.0),
                Vec3::new(1.0, -PHI, 0.0),
                Vec3::new(0.0, -1.0, PHI),
                Vec3::new(0.0, 1.0, PHI),
                Vec3::new(0.0, -1.0, -PHI),
                Vec3::new(0.0, 1.0, -PHI),
                Vec3::new(PHI, 0.0, -1.0),
                Vec3::new(PHI, 0.0, 1.0),
                Vec3::new(-PHI, 0.0, -1.0),
                Vec3::new(-PHI, 0.0, 1.0),
            ],
            Polyhedron::Octahedron => &[
                Vec3::Y,
                Vec3::X,
                Vec3::Z,
                Vec3::NEG_X,
                Vec3::NEG_Z,
                Vec3::NEG_Y,
            ],
        };

        raw.iter().copied().map(project_to_unit_sphere).collect()
    }

    fn faces(self) -> &'static [Triangle] {
        match self {
            Polyhedron::Icosahedron => &ICOSAHEDRON_FACES,
            Polyhedron::Octahedron => &OCTAHEDRON_FACES,
        }
    }

    /// Vertex count after `level` subdivision rounds, before any seam or pole repair
    pub fn vertex_count(self, level: u32) -> usize {
        let base = 4usize.pow(level);
        match self {
            Polyhedron::Icosahedron => 10 * base + 2,
            Polyhedron::Octahedron => 4 * base + 2,
        }
    }

    /// Face count after `level` subdivision rounds
    pub fn face_count(self, level: u32) -> usize {
        self.faces().len() * 4usize.pow(level)
    }
}

/// Divide by length rather than multiplying by its reciprocal, so points on an
/// axis land exactly on ±1 and the pole vertices can be found by equality.
fn project_to_unit_sphere(v: Vec3) -> Vec3 {
    v / v.length()
}

/// Clamp a requested subdivision level into `0..=MAX_SUBDIVISIONS`
pub fn clamp_level(level: i32) -> u32 {
    if level < 0 {
        warn!("subdivision level {} below minimum, clamping to 0", level);
        0
    } else if level as u32 > MAX_SUBDIVISIONS {
        warn!(
            "subdivision level {} above maximum, clamping to {}",
            level, MAX_SUBDIVISIONS
        );
        MAX_SUBDIVISIONS
    } else {
        level as u32
    }
}

/// Order-independent key for the edge between two vertex indices
///
/// The smaller index occupies the high 32 bits, the larger the low 32 bits.
pub fn edge_key(a: u32, b: u32) -> u64 {
    let (lo, hi) = if a < b { (a, b) } else { (b, a) };
    ((lo as u64) << 32) | hi as u64
}

/// Maps each subdivided edge to its single shared midpoint vertex
#[derive(Debug, Default)]
pub struct EdgeMidpointCache {
    midpoints: HashMap<u64, u32>,
}

impl EdgeMidpointCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get or create the sphere-projected midpoint of edge (a, b)
    pub fn midpoint(&mut self, a: u32, b: u32, positions: &mut Vec<[f32; 3]>) -> u32 {
        *self.midpoints.entry(edge_key(a, b)).or_insert_with(|| {
            let pa = Vec3::from(positions[a as usize]);
            let pb = Vec3::from(positions[b as usize]);
            let mid = project_to_unit_sphere((pa + pb) * 0.5);

            let index = positions.len() as u32;
            positions.push(mid.to_array());
            index
        })
    }

    pub fn len(&self) -> usize {
        self.midpoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.midpoints.is_empty()
    }
}

/// Build `base` and refine it `level` times
///
/// Returns positions on the unit sphere and triangles only; the level must
/// already be clamped.
pub fn subdivide(base: Polyhedron, level: u32) -> GeometryBuffer {
    let mut mesh = GeometryBuffer::new();
    for v in base.vertices() {
        mesh.add_position(v);
    }
    mesh.triangles = base.faces().to_vec();

    let mut cache = EdgeMidpointCache::new();
    for _ in 0..level {
        let mut refined = Vec::with_capacity(mesh.triangles.len() * 4);
        for &[v1, v2, v3] in &mesh.triangles {
            let a = cache.midpoint(v1, v2, &mut mesh.positions);
            let b = cache.midpoint(v2, v3, &mut mesh.positions);
            let c = cache.midpoint(v3, v1, &mut mesh.positions);

            refined.push([v1, a, c]);
            refined.push([v2, b, a]);
            refined.push([v3, c, b]);
            refined.push([a, b, c]);
        }
        mesh.triangles = refined;
    }

    mesh
}

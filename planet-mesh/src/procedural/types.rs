//! Procedural mesh types
//!
//! Shared geometry buffer produced and consumed by every generator.

use bytemuck::cast_slice;
use glam::Vec3;
use thiserror::Error;

/// A triangle as three vertex indices. Winding order is significant.
pub type Triangle = [u32; 3];

/// Buffer invariant violations
///
/// These indicate a defect in a generator, never bad user input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeometryError {
    #[error("triangle {triangle} references vertex {index}, but only {vertex_count} vertices exist")]
    IndexOutOfRange {
        triangle: usize,
        index: u32,
        vertex_count: usize,
    },

    #[error("{attribute} has {len} entries, expected {vertex_count}")]
    AttributeLength {
        attribute: &'static str,
        len: usize,
        vertex_count: usize,
    },

    #[error("vertex count {0} does not fit in u32 indices")]
    IndexOverflow(usize),
}

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Bounds {
    pub min: Vec3,
    pub max: Vec3,
}

impl Bounds {
    /// Compute bounds over a set of positions (zero-sized at the origin if empty)
    pub fn from_positions(positions: &[[f32; 3]]) -> Self {
        let mut iter = positions.iter().map(|p| Vec3::from(*p));
        let Some(first) = iter.next() else {
            return Self::default();
        };

        let (min, max) = iter.fold((first, first), |(min, max), p| (min.min(p), max.max(p)));
        Self { min, max }
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }
}

/// Unpacked geometry buffer (f32 format)
///
/// One array per vertex attribute plus the triangle list. Generators fill
/// attributes stage by stage, so `normals`, `uvs` and `tangents` may be empty
/// while a mesh is under construction; once populated they always have one
/// entry per vertex.
#[derive(Clone, Debug, Default)]
pub struct GeometryBuffer {
    /// Vertex positions as [x, y, z]
    pub positions: Vec<[f32; 3]>,
    /// Vertex normals as [x, y, z] (empty until computed)
    pub normals: Vec<[f32; 3]>,
    /// UV coordinates as [u, v] (empty until projected)
    pub uvs: Vec<[f32; 2]>,
    /// Tangents as [x, y, z, handedness] (empty until computed)
    pub tangents: Vec<[f32; 4]>,
    /// Triangle index triples
    pub triangles: Vec<Triangle>,
    /// Bounding box, refreshed by `recalculate_bounds`
    pub bounds: Bounds,
}

impl GeometryBuffer {
    /// Create an empty buffer
    pub fn new() -> Self {
        Self::default()
    }

    /// Get vertex count
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Get triangle count
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// Append a vertex with only a position, returning its index
    pub fn add_position(&mut self, position: Vec3) -> u32 {
        let index = self.positions.len() as u32;
        self.positions.push(position.to_array());
        index
    }

    /// Append a vertex with position, UV and normal, returning its index
    pub fn add_vertex_uv(&mut self, position: Vec3, uv: [f32; 2], normal: Vec3) -> u32 {
        let index = self.positions.len() as u32;
        self.positions.push(position.to_array());
        self.uvs.push(uv);
        self.normals.push(normal.to_array());
        index
    }

    /// Add a triangle using three vertex indices
    pub fn add_triangle(&mut self, i0: u32, i1: u32, i2: u32) {
        self.triangles.push([i0, i1, i2]);
    }

    /// Append a copy of vertex `index` with every populated attribute, returning the new index
    pub fn duplicate_vertex(&mut self, index: u32) -> u32 {
        let i = index as usize;
        let new_index = self.positions.len() as u32;

        self.positions.push(self.positions[i]);
        if !self.normals.is_empty() {
            self.normals.push(self.normals[i]);
        }
        if !self.uvs.is_empty() {
            self.uvs.push(self.uvs[i]);
        }
        if !self.tangents.is_empty() {
            self.tangents.push(self.tangents[i]);
        }

        new_index
    }

    /// Flattened index list (three entries per triangle)
    pub fn indices(&self) -> Vec<u32> {
        self.triangles.iter().flatten().copied().collect()
    }

    /// Raw position bytes, tightly packed f32x3
    pub fn position_bytes(&self) -> &[u8] {
        cast_slice(self.positions.as_slice())
    }

    /// Raw index bytes, tightly packed u32
    pub fn index_bytes(&self) -> &[u8] {
        cast_slice(self.triangles.as_slice())
    }

    /// Refresh `bounds` from the current positions
    pub fn recalculate_bounds(&mut self) {
        self.bounds = Bounds::from_positions(&self.positions);
    }

    /// Largest distance from the origin to any vertex
    pub fn bounding_radius(&self) -> f32 {
        self.positions
            .iter()
            .map(|p| Vec3::from(*p).length())
            .fold(0.0, f32::max)
    }

    /// Check the buffer invariants
    pub fn validate(&self) -> Result<(), GeometryError> {
        let vertex_count = self.positions.len();
        if vertex_count > u32::MAX as usize {
            return Err(GeometryError::IndexOverflow(vertex_count));
        }

        let optional = [
            ("normals", self.normals.len()),
            ("uvs", self.uvs.len()),
            ("tangents", self.tangents.len()),
        ];
        for (attribute, len) in optional {
            if len != 0 && len != vertex_count {
                return Err(GeometryError::AttributeLength {
                    attribute,
                    len,
                    vertex_count,
                });
            }
        }

        for (triangle, tri) in self.triangles.iter().enumerate() {
            if let Some(&index) = tri.iter().find(|&&i| i as usize >= vertex_count) {
                return Err(GeometryError::IndexOutOfRange {
                    triangle,
                    index,
                    vertex_count,
                });
            }
        }

        Ok(())
    }
}

/// Face normal from three corner positions (`None` for degenerate triangles)
pub fn face_normal(p0: Vec3, p1: Vec3, p2: Vec3) -> Option<Vec3> {
    (p1 - p0).cross(p2 - p0).try_normalize()
}

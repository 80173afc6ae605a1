//! Serializable mesh recipes
//!
//! A recipe names one generator call and its parameters. Recipes are what the
//! batch tool expands its manifest into, and they carry the asset naming used
//! for output files.

use serde::{Deserialize, Serialize};

use crate::procedural::{GeometryBuffer, build_ico_sphere, build_octahedron_sphere, build_ring};

fn default_radius() -> f32 {
    1.0
}

fn default_ico_level() -> i32 {
    1
}

fn default_octahedron_level() -> i32 {
    6
}

fn default_sides() -> i32 {
    3
}

fn default_width() -> f32 {
    0.5
}

fn default_hollow() -> bool {
    true
}

/// Category a recipe's output is filed under
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MeshCategory {
    IcoSphere,
    OctahedronSphere,
    Ring,
}

impl MeshCategory {
    /// Output folder name for this category
    pub fn folder(self) -> &'static str {
        match self {
            MeshCategory::IcoSphere => "IcoSphere",
            MeshCategory::OctahedronSphere => "OctahedronSphere",
            MeshCategory::Ring => "Ring",
        }
    }
}

/// One mesh to generate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MeshRecipe {
    IcoSphere {
        #[serde(default = "default_ico_level")]
        level: i32,
        #[serde(default = "default_radius")]
        radius: f32,
        #[serde(default)]
        flat_shaded: bool,
    },
    OctahedronSphere {
        #[serde(default = "default_octahedron_level")]
        level: i32,
        #[serde(default = "default_radius")]
        radius: f32,
        #[serde(default)]
        flat_shaded: bool,
    },
    Ring {
        #[serde(default = "default_sides")]
        sides: i32,
        #[serde(default = "default_radius")]
        radius: f32,
        #[serde(default = "default_hollow")]
        hollow: bool,
        #[serde(default = "default_width")]
        width: f32,
    },
}

impl MeshRecipe {
    /// Run the generator this recipe describes
    pub fn build(&self) -> GeometryBuffer {
        match *self {
            MeshRecipe::IcoSphere {
                level,
                radius,
                flat_shaded,
            } => build_ico_sphere(level, radius, flat_shaded),
            MeshRecipe::OctahedronSphere {
                level,
                radius,
                flat_shaded,
            } => build_octahedron_sphere(level, radius, flat_shaded),
            MeshRecipe::Ring {
                sides,
                radius,
                hollow,
                width,
            } => build_ring(sides, radius, hollow, width),
        }
    }

    pub fn category(&self) -> MeshCategory {
        match self {
            MeshRecipe::IcoSphere { .. } => MeshCategory::IcoSphere,
            MeshRecipe::OctahedronSphere { .. } => MeshCategory::OctahedronSphere,
            MeshRecipe::Ring { .. } => MeshCategory::Ring,
        }
    }

    /// Asset name, e.g. "IcoSphere Level 2 (nsv)" or "Hollow Ring (8 sides)"
    pub fn asset_name(&self) -> String {
        match *self {
            MeshRecipe::IcoSphere {
                level, flat_shaded, ..
            } => sphere_name("IcoSphere", level, flat_shaded),
            MeshRecipe::OctahedronSphere {
                level, flat_shaded, ..
            } => sphere_name("Octahedron Sphere", level, flat_shaded),
            MeshRecipe::Ring { sides, hollow, .. } => {
                let name = format!("Ring ({} sides)", sides);
                if hollow {
                    format!("Hollow {}", name)
                } else {
                    name
                }
            }
        }
    }
}

impl Default for MeshRecipe {
    fn default() -> Self {
        MeshRecipe::IcoSphere {
            level: default_ico_level(),
            radius: default_radius(),
            flat_shaded: false,
        }
    }
}

fn sphere_name(prefix: &str, level: i32, flat_shaded: bool) -> String {
    let mut name = format!("{} Level {}", prefix, level);
    if flat_shaded {
        name.push_str(" (nsv)");
    }
    name
}

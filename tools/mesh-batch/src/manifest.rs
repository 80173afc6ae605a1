//! planet-mesh.toml manifest parsing
//!
//! A manifest names an output folder and up to three range sections, one per
//! mesh kind. Out-of-range values are corrected with a warning rather than
//! rejected; only values that cannot be corrected are errors.

use std::path::{Path, PathBuf};

use planet_mesh::MeshRecipe;
use planet_mesh::procedural::{MAX_SUBDIVISIONS, MIN_RING_SIDES};
use serde::Deserialize;
use thiserror::Error;
use tracing::warn;

/// Default manifest file name
pub const MANIFEST_FILE: &str = "planet-mesh.toml";

/// Highest level that can be generated with flat shading
pub const MAX_FLAT_LEVEL: i32 = 5;

#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("failed to read manifest {path:?}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse manifest {path:?}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("[{section}] {field} must be a finite number, got {value}")]
    NotFinite {
        section: &'static str,
        field: &'static str,
        value: f32,
    },

    #[error("manifest declares no [ico_sphere], [octahedron_sphere] or [ring] section")]
    NoSections,
}

/// Root manifest structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BatchManifest {
    #[serde(default)]
    pub output: OutputConfig,
    pub ico_sphere: Option<SphereRange>,
    pub octahedron_sphere: Option<SphereRange>,
    pub ring: Option<RingRange>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_output_dir")]
    pub dir: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: default_output_dir(),
        }
    }
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("meshes/batched")
}

fn default_radius() -> f32 {
    1.0
}

fn default_level_max() -> i32 {
    MAX_SUBDIVISIONS as i32
}

fn default_sides_min() -> i32 {
    MIN_RING_SIDES as i32
}

fn default_sides_max() -> i32 {
    10
}

fn default_hollow() -> bool {
    true
}

fn default_width() -> f32 {
    0.5
}

/// Range of subdivision levels for one sphere kind
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SphereRange {
    #[serde(default)]
    pub level_min: i32,
    #[serde(default = "default_level_max")]
    pub level_max: i32,
    #[serde(default = "default_radius")]
    pub radius: f32,
    /// Generate with no shared vertices (flat shading)
    #[serde(default)]
    pub flat_shaded: bool,
}

impl Default for SphereRange {
    fn default() -> Self {
        Self {
            level_min: 0,
            level_max: default_level_max(),
            radius: default_radius(),
            flat_shaded: false,
        }
    }
}

/// Range of side counts for rings
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RingRange {
    #[serde(default = "default_sides_min")]
    pub sides_min: i32,
    #[serde(default = "default_sides_max")]
    pub sides_max: i32,
    #[serde(default = "default_radius")]
    pub radius: f32,
    #[serde(default = "default_hollow")]
    pub hollow: bool,
    #[serde(default = "default_width")]
    pub width: f32,
}

impl Default for RingRange {
    fn default() -> Self {
        Self {
            sides_min: default_sides_min(),
            sides_max: default_sides_max(),
            radius: default_radius(),
            hollow: default_hollow(),
            width: default_width(),
        }
    }
}

fn check_finite(section: &'static str, field: &'static str, value: f32) -> Result<(), ManifestError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ManifestError::NotFinite {
            section,
            field,
            value,
        })
    }
}

/// Apply `fix` to `*value`, logging and counting the change if there is one
fn correct<T: PartialEq + Copy + std::fmt::Debug>(
    section: &str,
    field: &str,
    value: &mut T,
    fix: impl FnOnce(T) -> T,
) -> usize {
    let corrected = fix(*value);
    if *value == corrected {
        return 0;
    }
    warn!("[{}] {} = {:?} corrected to {:?}", section, field, value, corrected);
    *value = corrected;
    1
}

impl SphereRange {
    fn normalize(&mut self, section: &'static str) -> Result<usize, ManifestError> {
        check_finite(section, "radius", self.radius)?;

        let max_level = MAX_SUBDIVISIONS as i32;
        let mut fixes = 0;
        fixes += correct(section, "level_min", &mut self.level_min, |v| v.clamp(0, max_level));
        fixes += correct(section, "level_max", &mut self.level_max, |v| v.clamp(0, max_level));
        fixes += correct(section, "radius", &mut self.radius, |v| v.max(0.0));
        if self.flat_shaded {
            fixes += correct(section, "level_max", &mut self.level_max, |v| v.min(MAX_FLAT_LEVEL));
        }
        let level_max = self.level_max;
        fixes += correct(section, "level_min", &mut self.level_min, |v| v.min(level_max));
        Ok(fixes)
    }

    fn levels(&self) -> impl Iterator<Item = i32> {
        self.level_min..=self.level_max
    }
}

impl RingRange {
    fn normalize(&mut self) -> Result<usize, ManifestError> {
        check_finite("ring", "radius", self.radius)?;
        check_finite("ring", "width", self.width)?;

        let min_sides = MIN_RING_SIDES as i32;
        let mut fixes = 0;
        fixes += correct("ring", "sides_min", &mut self.sides_min, |v| v.max(min_sides));
        fixes += correct("ring", "sides_max", &mut self.sides_max, |v| v.max(min_sides));
        fixes += correct("ring", "radius", &mut self.radius, |v| v.max(0.0));
        fixes += correct("ring", "width", &mut self.width, |v| v.clamp(0.0, 1.0));
        // A full-width band has no hole
        let hollow = self.width != 1.0;
        fixes += correct("ring", "hollow", &mut self.hollow, |_| hollow);
        let sides_min = self.sides_min;
        fixes += correct("ring", "sides_max", &mut self.sides_max, |v| v.max(sides_min));
        Ok(fixes)
    }
}

impl BatchManifest {
    /// Load manifest from file
    pub fn load(path: &Path) -> Result<Self, ManifestError> {
        let content = std::fs::read_to_string(path).map_err(|source| ManifestError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ManifestError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Correct out-of-range values in place, returning how many were changed
    pub fn normalize(&mut self) -> Result<usize, ManifestError> {
        if self.ico_sphere.is_none() && self.octahedron_sphere.is_none() && self.ring.is_none() {
            return Err(ManifestError::NoSections);
        }

        let mut fixes = 0;
        if let Some(range) = &mut self.ico_sphere {
            fixes += range.normalize("ico_sphere")?;
        }
        if let Some(range) = &mut self.octahedron_sphere {
            fixes += range.normalize("octahedron_sphere")?;
        }
        if let Some(range) = &mut self.ring {
            fixes += range.normalize()?;
        }
        Ok(fixes)
    }

    /// Expand every section into individual mesh recipes
    pub fn jobs(&self) -> Vec<MeshRecipe> {
        let mut jobs = Vec::new();

        if let Some(range) = &self.ico_sphere {
            jobs.extend(range.levels().map(|level| MeshRecipe::IcoSphere {
                level,
                radius: range.radius,
                flat_shaded: range.flat_shaded,
            }));
        }
        if let Some(range) = &self.octahedron_sphere {
            jobs.extend(range.levels().map(|level| MeshRecipe::OctahedronSphere {
                level,
                radius: range.radius,
                flat_shaded: range.flat_shaded,
            }));
        }
        if let Some(range) = &self.ring {
            jobs.extend((range.sides_min..=range.sides_max).map(|sides| MeshRecipe::Ring {
                sides,
                radius: range.radius,
                hollow: range.hollow,
                width: range.width,
            }));
        }

        jobs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(content: &str) -> BatchManifest {
        toml::from_str(content).unwrap()
    }

    #[test]
    fn test_manifest_minimal() {
        let manifest = parse("[ring]\n");

        assert_eq!(manifest.output.dir, PathBuf::from("meshes/batched"));
        assert!(manifest.ico_sphere.is_none());
        assert_eq!(manifest.ring, Some(RingRange::default()));
        assert_eq!(manifest.jobs().len(), 8);
    }

    #[test]
    fn test_manifest_full() {
        let mut manifest = parse(
            r#"
[output]
dir = "out"

[ico_sphere]
level_min = 1
level_max = 3
radius = 2.0

[octahedron_sphere]
flat_shaded = true

[ring]
sides_min = 4
sides_max = 6
width = 0.25
"#,
        );
        manifest.normalize().unwrap();
        let jobs = manifest.jobs();

        assert_eq!(manifest.output.dir, PathBuf::from("out"));
        // 3 icospheres, octahedron levels 0..=5, 3 rings
        assert_eq!(jobs.len(), 3 + 6 + 3);
        assert_eq!(
            jobs[0],
            MeshRecipe::IcoSphere {
                level: 1,
                radius: 2.0,
                flat_shaded: false
            }
        );
        assert_eq!(jobs[8].asset_name(), "Octahedron Sphere Level 5 (nsv)");
        assert_eq!(jobs[11].asset_name(), "Hollow Ring (6 sides)");
    }

    #[test]
    fn test_flat_shading_caps_level() {
        let mut range = SphereRange {
            flat_shaded: true,
            ..Default::default()
        };
        assert_eq!(range.normalize("ico_sphere").unwrap(), 1);
        assert_eq!(range.level_max, MAX_FLAT_LEVEL);
    }

    #[test]
    fn test_inverted_levels_lower_min() {
        let mut range = SphereRange {
            level_min: 4,
            level_max: 2,
            radius: -1.0,
            flat_shaded: false,
        };
        range.normalize("ico_sphere").unwrap();

        assert_eq!(range.level_min, 2);
        assert_eq!(range.level_max, 2);
        assert_eq!(range.radius, 0.0);
    }

    #[test]
    fn test_ring_corrections() {
        let mut range = RingRange {
            sides_min: 1,
            sides_max: 2,
            radius: 1.0,
            hollow: true,
            width: 1.0,
        };
        range.normalize().unwrap();

        assert_eq!(range.sides_min, 3);
        assert_eq!(range.sides_max, 3);
        assert!(!range.hollow);
    }

    #[test]
    fn test_ring_hollow_follows_width() {
        let mut range = RingRange {
            hollow: false,
            width: 0.5,
            ..Default::default()
        };
        assert_eq!(range.normalize().unwrap(), 1);
        assert!(range.hollow);
    }

    #[test]
    fn test_rejects_non_finite_radius() {
        let mut manifest = parse("[ico_sphere]\nradius = nan\n");
        assert!(matches!(
            manifest.normalize(),
            Err(ManifestError::NotFinite {
                section: "ico_sphere",
                field: "radius",
                ..
            })
        ));
    }

    #[test]
    fn test_rejects_empty_manifest() {
        let mut manifest = parse("[output]\ndir = \"x\"\n");
        assert!(matches!(manifest.normalize(), Err(ManifestError::NoSections)));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(MANIFEST_FILE);
        std::fs::write(&path, "[ico_sphere]\nlevel_max = 2\n").unwrap();

        let manifest = BatchManifest::load(&path).unwrap();
        assert_eq!(manifest.jobs().len(), 3);

        let missing = BatchManifest::load(&dir.path().join("missing.toml"));
        assert!(matches!(missing, Err(ManifestError::Read { .. })));

        std::fs::write(&path, "[ico_sphere\n").unwrap();
        assert!(matches!(BatchManifest::load(&path), Err(ManifestError::Parse { .. })));
    }
}

//! Batch generation: expand a manifest into jobs and write one OBJ per job

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use hashbrown::HashMap;
use planet_mesh::procedural::write_obj;
use planet_mesh::{MeshCategory, MeshRecipe};
use rayon::prelude::*;

use crate::manifest::BatchManifest;

/// Output path for one recipe under `output_dir`
pub fn asset_path(output_dir: &Path, recipe: &MeshRecipe) -> PathBuf {
    output_dir
        .join(recipe.category().folder())
        .join(format!("{}.obj", recipe.asset_name()))
}

/// Generate one recipe and write it to `path`
pub fn write_recipe(recipe: &MeshRecipe, path: &Path) -> Result<()> {
    let mesh = recipe.build();
    tracing::debug!(
        "{}: {} vertices, {} triangles",
        recipe.asset_name(),
        mesh.vertex_count(),
        mesh.triangle_count()
    );
    write_obj(&mesh, path, &recipe.asset_name())
        .with_context(|| format!("Failed to write {:?}", path))
}

/// Build every job in the manifest (parallel), returning the written paths
///
/// Ranges are corrected with [`BatchManifest::normalize`] before expansion.
pub fn build_all(manifest: &BatchManifest, output_override: Option<&Path>) -> Result<Vec<PathBuf>> {
    let mut manifest = manifest.clone();
    manifest.normalize()?;

    let output_dir = output_override.unwrap_or(&manifest.output.dir);
    let jobs = manifest.jobs();

    let mut counts: HashMap<MeshCategory, usize> = HashMap::new();
    for job in &jobs {
        *counts.entry(job.category()).or_default() += 1;
    }
    for category in counts.keys() {
        let dir = output_dir.join(category.folder());
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create output directory {:?}", dir))?;
    }

    // Every job writes a distinct file, so jobs never contend
    let written: Result<Vec<_>> = jobs
        .par_iter()
        .map(|job| -> Result<PathBuf> {
            let path = asset_path(output_dir, job);
            write_recipe(job, &path)?;
            Ok(path)
        })
        .collect();
    let written = written?;

    for category in [
        MeshCategory::IcoSphere,
        MeshCategory::OctahedronSphere,
        MeshCategory::Ring,
    ] {
        if let Some(count) = counts.get(&category) {
            tracing::info!(
                "{} assets written to {:?}",
                count,
                output_dir.join(category.folder())
            );
        }
    }

    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manifest::{RingRange, SphereRange};

    #[test]
    fn test_asset_path() {
        let recipe = MeshRecipe::Ring {
            sides: 5,
            radius: 1.0,
            hollow: false,
            width: 0.5,
        };
        assert_eq!(
            asset_path(Path::new("out"), &recipe),
            Path::new("out").join("Ring").join("Ring (5 sides).obj")
        );
    }

    #[test]
    fn test_build_all_writes_every_job() {
        let dir = tempfile::tempdir().unwrap();
        let manifest = BatchManifest {
            ico_sphere: Some(SphereRange {
                level_max: 2,
                ..Default::default()
            }),
            ring: Some(RingRange {
                sides_max: 4,
                ..Default::default()
            }),
            ..Default::default()
        };

        let written = build_all(&manifest, Some(dir.path())).unwrap();

        assert_eq!(written.len(), 3 + 2);
        assert!(dir.path().join("IcoSphere/IcoSphere Level 2.obj").is_file());
        assert!(dir.path().join("Ring/Hollow Ring (4 sides).obj").is_file());
        assert!(!dir.path().join("OctahedronSphere").exists());
        for path in &written {
            assert!(std::fs::metadata(path).unwrap().len() > 0);
        }
    }

    #[test]
    fn test_build_all_corrects_ranges() {
        let dir = tempfile::tempdir().unwrap();
        let manifest = BatchManifest {
            octahedron_sphere: Some(SphereRange {
                level_min: 4,
                flat_shaded: true,
                ..Default::default()
            }),
            ring: Some(RingRange {
                sides_min: 1,
                sides_max: 2,
                width: 1.0,
                ..Default::default()
            }),
            ..Default::default()
        };

        let written = build_all(&manifest, Some(dir.path())).unwrap();

        // flat-shaded levels stop at 5; ring sides raised to 3, full width is solid
        assert_eq!(written.len(), 2 + 1);
        let octa = dir.path().join("OctahedronSphere");
        assert!(octa.join("Octahedron Sphere Level 5 (nsv).obj").is_file());
        assert!(!octa.join("Octahedron Sphere Level 6 (nsv).obj").exists());
        assert!(dir.path().join("Ring/Ring (3 sides).obj").is_file());
    }

    #[test]
    fn test_build_all_rejects_empty_manifest() {
        let dir = tempfile::tempdir().unwrap();
        let err = build_all(&BatchManifest::default(), Some(dir.path())).unwrap_err();
        assert!(err.to_string().contains("no [ico_sphere]"));
    }

    #[test]
    fn test_written_obj_matches_mesh() {
        let dir = tempfile::tempdir().unwrap();
        let recipe = MeshRecipe::OctahedronSphere {
            level: 1,
            radius: 1.0,
            flat_shaded: false,
        };
        let path = dir.path().join("octa.obj");
        write_recipe(&recipe, &path).unwrap();

        let mesh = recipe.build();
        let text = std::fs::read_to_string(&path).unwrap();
        let count = |prefix: &str| text.lines().filter(|l| l.starts_with(prefix)).count();
        assert_eq!(count("v "), mesh.vertex_count());
        assert_eq!(count("vt "), mesh.vertex_count());
        assert_eq!(count("f "), mesh.triangle_count());
    }

    #[test]
    fn test_write_into_missing_dir_fails() {
        let dir = tempfile::tempdir().unwrap();
        let recipe = MeshRecipe::default();
        let path = dir.path().join("missing").join("ico.obj");

        let err = write_recipe(&recipe, &path).unwrap_err();
        assert!(err.to_string().contains("Failed to write"));
    }
}

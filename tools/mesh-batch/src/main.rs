//! mesh-batch - procedural planet mesh generator
//!
//! Generates icospheres, octahedron spheres and rings as Wavefront OBJ files,
//! either one at a time or in batches described by a planet-mesh.toml manifest.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use planet_mesh::MeshRecipe;
use std::path::{Path, PathBuf};

use mesh_batch::{batch, manifest::BatchManifest};

#[derive(Parser)]
#[command(name = "mesh-batch")]
#[command(about = "Procedural planet mesh generator")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build every mesh described by a manifest file
    Build {
        /// Path to planet-mesh.toml manifest
        #[arg(default_value = "planet-mesh.toml")]
        manifest: PathBuf,

        /// Output directory (overrides manifest)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Validate manifest without building
    Check {
        /// Path to planet-mesh.toml manifest
        #[arg(default_value = "planet-mesh.toml")]
        manifest: PathBuf,
    },

    /// Generate a single icosphere
    IcoSphere {
        /// Subdivision level (0-6)
        #[arg(short, long, default_value_t = 1)]
        level: i32,

        #[arg(short, long, default_value_t = 1.0)]
        radius: f32,

        /// No shared vertices (flat shading)
        #[arg(long)]
        flat: bool,

        /// Output .obj file (defaults to the asset name)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Generate a single octahedron sphere
    OctahedronSphere {
        /// Subdivision level (0-6)
        #[arg(short, long, default_value_t = 6)]
        level: i32,

        #[arg(short, long, default_value_t = 1.0)]
        radius: f32,

        /// No shared vertices (flat shading)
        #[arg(long)]
        flat: bool,

        /// Output .obj file (defaults to the asset name)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Generate a single ring
    Ring {
        /// Number of sides (min 3)
        #[arg(short, long, default_value_t = 3)]
        sides: i32,

        #[arg(short, long, default_value_t = 1.0)]
        radius: f32,

        /// Band width of a hollow ring, as a fraction of the radius
        #[arg(short, long, default_value_t = 0.5)]
        width: f32,

        /// Generate a filled disc instead of a hollow band
        #[arg(long)]
        solid: bool,

        /// Output .obj file (defaults to the asset name)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn load_checked(path: &Path) -> Result<BatchManifest> {
    let mut manifest = BatchManifest::load(path)?;
    let fixes = manifest
        .normalize()
        .with_context(|| format!("Invalid manifest {:?}", path))?;
    if fixes > 0 {
        tracing::warn!("{} manifest values corrected", fixes);
    }
    Ok(manifest)
}

fn ring_recipe(sides: i32, radius: f32, solid: bool, width: f32) -> MeshRecipe {
    MeshRecipe::Ring {
        sides,
        radius,
        hollow: !solid,
        width,
    }
}

fn write_single(recipe: MeshRecipe, output: Option<PathBuf>) -> Result<()> {
    let output = output.unwrap_or_else(|| PathBuf::from(format!("{}.obj", recipe.asset_name())));
    tracing::info!("Generating {} -> {:?}", recipe.asset_name(), output);
    batch::write_recipe(&recipe, &output)?;
    tracing::info!("Done!");
    Ok(())
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Build { manifest, output } => {
            tracing::info!("Building meshes from {:?}", manifest);
            let config = load_checked(&manifest)?;
            let written = batch::build_all(&config, output.as_deref())?;
            tracing::info!("Build complete! {} meshes", written.len());
        }

        Commands::Check { manifest } => {
            tracing::info!("Checking manifest {:?}", manifest);
            let config = load_checked(&manifest)?;
            tracing::info!("Manifest is valid! {} meshes", config.jobs().len());
        }

        Commands::IcoSphere {
            level,
            radius,
            flat,
            output,
        } => write_single(
            MeshRecipe::IcoSphere {
                level,
                radius,
                flat_shaded: flat,
            },
            output,
        )?,

        Commands::OctahedronSphere {
            level,
            radius,
            flat,
            output,
        } => write_single(
            MeshRecipe::OctahedronSphere {
                level,
                radius,
                flat_shaded: flat,
            },
            output,
        )?,

        Commands::Ring {
            sides,
            radius,
            width,
            solid,
            output,
        } => write_single(ring_recipe(sides, radius, solid, width), output)?,
    }

    Ok(())
}

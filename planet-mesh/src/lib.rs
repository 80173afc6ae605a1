//! Procedural planet mesh library
//!
//! Builds geodesic spheres (icosahedron or octahedron based) and rings as raw
//! geometry buffers ready for rendering, with seam and pole repair so an
//! equirectangular planet texture maps cleanly.
//!
//! # Example
//! ```no_run
//! use planet_mesh::procedural::*;
//!
//! // A level 4 icosphere of radius 6
//! let planet = build_ico_sphere(4, 6.0, false);
//!
//! // A hollow ring around it, visible from both sides
//! let mut ring = build_ring(64, 10.0, true, 0.3);
//! ring.apply(Scale(1.5));
//!
//! write_obj(&planet, "planet.obj".as_ref(), "planet")?;
//! write_obj(&ring, "ring.obj".as_ref(), "ring")?;
//! # Ok::<(), std::io::Error>(())
//! ```

pub mod procedural;
pub mod recipe;

pub use recipe::{MeshCategory, MeshRecipe};

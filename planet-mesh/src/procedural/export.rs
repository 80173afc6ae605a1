//! Wavefront OBJ export for geometry buffers

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use super::types::GeometryBuffer;

/// Write a GeometryBuffer to an OBJ file
///
/// Emits `v`, `vt` and `vn` records for every vertex and 1-based
/// `f v/vt/vn` faces. Attributes the mesh lacks are left out of the face
/// records.
///
/// # Example
/// ```no_run
/// use planet_mesh::procedural::{build_ico_sphere, write_obj};
/// use std::path::Path;
///
/// let mesh = build_ico_sphere(3, 1.0, false);
/// write_obj(&mesh, Path::new("ico.obj"), "ico_sphere").unwrap();
/// ```
pub fn write_obj(mesh: &GeometryBuffer, path: &Path, name: &str) -> std::io::Result<()> {
    let file = File::create(path)?;
    let mut w = BufWriter::new(file);
    write_obj_to(mesh, &mut w, name)?;
    w.flush()
}

/// Write OBJ text for `mesh` to any writer
pub fn write_obj_to<W: Write>(mesh: &GeometryBuffer, w: &mut W, name: &str) -> std::io::Result<()> {
    writeln!(
        w,
        "# {} vertices, {} triangles",
        mesh.vertex_count(),
        mesh.triangle_count()
    )?;
    writeln!(w, "o {}", name)?;

    for [x, y, z] in &mesh.positions {
        writeln!(w, "v {} {} {}", x, y, z)?;
    }
    for [u, v] in &mesh.uvs {
        writeln!(w, "vt {} {}", u, v)?;
    }
    for [x, y, z] in &mesh.normals {
        writeln!(w, "vn {} {} {}", x, y, z)?;
    }

    let has_uvs = !mesh.uvs.is_empty();
    let has_normals = !mesh.normals.is_empty();
    for tri in &mesh.triangles {
        write!(w, "f")?;
        for &i in tri {
            let i = i + 1;
            match (has_uvs, has_normals) {
                (true, true) => write!(w, " {i}/{i}/{i}")?,
                (true, false) => write!(w, " {i}/{i}")?,
                (false, true) => write!(w, " {i}//{i}")?,
                (false, false) => write!(w, " {i}")?,
            }
        }
        writeln!(w)?;
    }

    Ok(())
}

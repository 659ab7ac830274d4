//! I/O operations for meshes
//!
//! This crate reads and writes triangle meshes. Binary STL is the supported
//! format; [`read_mesh`] and [`write_mesh`] pick the codec from the file extension.

pub mod stl;

pub use stl::{StlReader, StlWriter};

use proxymesh_core::{Error, MeshView, Result, TriangleMesh};
use std::path::Path;

/// Trait for reading meshes from files
pub trait MeshReader {
    fn read_mesh<P: AsRef<Path>>(path: P) -> Result<TriangleMesh>;
}

/// Trait for writing meshes to files
pub trait MeshWriter {
    fn write_mesh<M: MeshView + ?Sized, P: AsRef<Path>>(mesh: &M, path: P) -> Result<()>;
}

fn extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|s| s.to_ascii_lowercase())
}

/// Auto-detect format and read mesh
pub fn read_mesh<P: AsRef<Path>>(path: P) -> Result<TriangleMesh> {
    let path = path.as_ref();
    match extension(path).as_deref() {
        Some("stl") => StlReader::read_mesh(path),
        _ => Err(Error::UnsupportedFormat(format!(
            "Unsupported mesh format: {:?}",
            path.extension()
        ))),
    }
}

/// Auto-detect format and write mesh
pub fn write_mesh<M: MeshView + ?Sized, P: AsRef<Path>>(mesh: &M, path: P) -> Result<()> {
    let path = path.as_ref();
    match extension(path).as_deref() {
        Some("stl") => StlWriter::write_mesh(mesh, path),
        _ => Err(Error::UnsupportedFormat(format!(
            "Unsupported mesh format: {:?}",
            path.extension()
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proxymesh_core::{shapes, Point3f};
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_stl_file_roundtrip() {
        let dir = tempdir().unwrap();
        let temp_file = dir.path().join("strip.STL");

        // vertices listed in order of first use, so ids survive the round trip
        let vertices = vec![
            Point3f::new(0.0, 0.0, 0.0),
            Point3f::new(1.0, 0.0, 0.0),
            Point3f::new(1.0, 1.0, 0.0),
            Point3f::new(0.0, 1.0, 0.5),
        ];
        let faces = vec![[0, 1, 2], [0, 2, 3]];
        let mesh = TriangleMesh::from_vertices_and_faces(vertices, faces);

        write_mesh(&mesh, &temp_file).unwrap();
        assert_eq!(fs::metadata(&temp_file).unwrap().len(), 84 + 50 * 2);

        let loaded = read_mesh(&temp_file).unwrap();
        assert_eq!(loaded, mesh);
    }

    #[test]
    fn test_octahedron_file_roundtrip() {
        let dir = tempdir().unwrap();
        let temp_file = dir.path().join("octahedron.stl");
        let octahedron = shapes::octahedron();

        StlWriter::write_mesh(&octahedron, &temp_file).unwrap();
        let loaded = StlReader::read_mesh(&temp_file).unwrap();

        assert_eq!(loaded.facet_count(), 8);
        assert_eq!(loaded.vertex_count(), 6);
        assert_eq!(loaded.triangle_soup().unwrap(), octahedron.triangle_soup().unwrap());
    }

    #[test]
    fn test_file_size_is_checked() {
        let dir = tempdir().unwrap();
        let temp_file = dir.path().join("truncated.stl");
        let mut bytes = StlWriter::to_bytes(&shapes::basic_cube()).unwrap();
        bytes.truncate(bytes.len() - 50);
        fs::write(&temp_file, &bytes).unwrap();

        let result = read_mesh(&temp_file);
        assert!(matches!(result, Err(Error::InvalidData(_))));
    }

    #[test]
    fn test_missing_file() {
        let dir = tempdir().unwrap();
        let result = read_mesh(dir.path().join("does-not-exist.stl"));
        assert!(matches!(result, Err(Error::Io(_))));
    }

    #[test]
    fn test_unsupported_format() {
        assert!(matches!(read_mesh("mesh.obj"), Err(Error::UnsupportedFormat(_))));
        assert!(matches!(
            write_mesh(&shapes::octahedron(), "mesh"),
            Err(Error::UnsupportedFormat(_))
        ));
    }
}

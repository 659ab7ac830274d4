//! Binary STL format support
//!
//! Layout: an 80-byte header, a little-endian `u32` triangle count, then one
//! 50-byte record per triangle holding a facet normal (3 × `f32`), three corners
//! (9 × `f32`) and a 2-byte attribute field. Reading ignores the normal and the
//! attribute bytes and merges bit-identical corner positions into shared vertices.

use crate::{MeshReader, MeshWriter};
use proxymesh_core::{Error, FacetGeometry, MeshView, Point3f, Result, TriangleMesh, VertexId};
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

/// Size of the free-form file header
pub const HEADER_SIZE: usize = 80;

/// Size of one triangle record
pub const RECORD_SIZE: usize = 50;

/// Header plus the triangle count field
const PREAMBLE_SIZE: usize = HEADER_SIZE + 4;

/// Binary STL reader
pub struct StlReader;

/// Binary STL writer
pub struct StlWriter;

impl StlReader {
    /// Read a binary STL file, checking that its size matches the declared triangle count
    pub fn read_stl_file<P: AsRef<Path>>(path: P) -> Result<TriangleMesh> {
        let path = path.as_ref();
        let file_size = std::fs::metadata(path)?.len();
        let mut reader = BufReader::new(File::open(path)?);

        let mut header = [0u8; HEADER_SIZE];
        reader.read_exact(&mut header)?;
        let triangle_count = read_u32(&mut reader)?;

        let expected = PREAMBLE_SIZE as u64 + RECORD_SIZE as u64 * triangle_count as u64;
        if file_size != expected {
            return Err(Error::InvalidData(format!(
                "STL file is {} bytes but {} triangles need {} bytes",
                file_size, triangle_count, expected
            )));
        }

        tracing::debug!(path = %path.display(), triangle_count, "reading binary STL");
        Self::read_triangles(&mut reader, triangle_count)
    }

    /// Decode `triangle_count` triangle records from a reader positioned just past
    /// the preamble
    pub fn read_triangles<R: Read>(reader: &mut R, triangle_count: u32) -> Result<TriangleMesh> {
        let mut mesh = TriangleMesh::new();
        let mut lookup: HashMap<[u32; 3], VertexId> = HashMap::new();
        let mut record = [0u8; RECORD_SIZE];

        for _ in 0..triangle_count {
            reader.read_exact(&mut record)?;

            let mut face = [0; 3];
            for (corner, slot) in face.iter_mut().enumerate() {
                // skip the 12-byte facet normal
                let offset = 12 + corner * 12;
                let bits = [
                    le_u32(&record[offset..offset + 4]),
                    le_u32(&record[offset + 4..offset + 8]),
                    le_u32(&record[offset + 8..offset + 12]),
                ];
                *slot = *lookup.entry(bits).or_insert_with(|| {
                    mesh.add_vertex(Point3f::new(
                        f32::from_bits(bits[0]),
                        f32::from_bits(bits[1]),
                        f32::from_bits(bits[2]),
                    ))
                });
            }
            mesh.add_face(face);
        }

        tracing::debug!(
            facets = mesh.facet_count(),
            vertices = mesh.vertex_count(),
            "decoded STL triangles"
        );
        Ok(mesh)
    }
}

impl StlWriter {
    /// Write a mesh as a binary STL file
    pub fn write_stl_file<M: MeshView + ?Sized, P: AsRef<Path>>(mesh: &M, path: P) -> Result<()> {
        let mut writer = BufWriter::new(File::create(path)?);
        Self::write_to_writer(mesh, &mut writer)?;
        writer.flush()?;
        Ok(())
    }

    /// Encode a mesh into binary STL, header included.
    ///
    /// The normal field of each record carries the facet's unit normal, or zeros
    /// for a degenerate facet.
    pub fn write_to_writer<M: MeshView + ?Sized, W: Write>(mesh: &M, writer: &mut W) -> Result<()> {
        writer.write_all(&[0u8; HEADER_SIZE])?;
        writer.write_all(&mesh.facet_count().to_le_bytes())?;

        for facet in 0..mesh.facet_count() {
            let corners = mesh.facet_points(facet)?;
            let normal = match mesh.facet_normal(facet) {
                Ok(normal) => [normal.x, normal.y, normal.z],
                Err(Error::DegenerateGeometry(_)) => [0.0; 3],
                Err(err) => return Err(err),
            };

            for value in normal {
                writer.write_all(&value.to_le_bytes())?;
            }
            for corner in &corners {
                for value in [corner.x, corner.y, corner.z] {
                    writer.write_all(&value.to_le_bytes())?;
                }
            }
            writer.write_all(&[0u8; 2])?;
        }
        Ok(())
    }

    /// Encode a mesh into an in-memory binary STL buffer
    pub fn to_bytes<M: MeshView + ?Sized>(mesh: &M) -> Result<Vec<u8>> {
        let capacity = PREAMBLE_SIZE + RECORD_SIZE * mesh.facet_count() as usize;
        let mut bytes = Vec::with_capacity(capacity);
        Self::write_to_writer(mesh, &mut bytes)?;
        Ok(bytes)
    }
}

impl MeshReader for StlReader {
    fn read_mesh<P: AsRef<Path>>(path: P) -> Result<TriangleMesh> {
        Self::read_stl_file(path)
    }
}

impl MeshWriter for StlWriter {
    fn write_mesh<M: MeshView + ?Sized, P: AsRef<Path>>(mesh: &M, path: P) -> Result<()> {
        Self::write_stl_file(mesh, path)
    }
}

/// Decode a complete in-memory binary STL buffer
pub fn from_bytes(bytes: &[u8]) -> Result<TriangleMesh> {
    if bytes.len() < PREAMBLE_SIZE {
        return Err(Error::InvalidData(format!(
            "STL data is {} bytes, shorter than the {}-byte preamble",
            bytes.len(),
            PREAMBLE_SIZE
        )));
    }
    let triangle_count = le_u32(&bytes[HEADER_SIZE..PREAMBLE_SIZE]);
    let expected = PREAMBLE_SIZE + RECORD_SIZE * triangle_count as usize;
    if bytes.len() != expected {
        return Err(Error::InvalidData(format!(
            "STL data is {} bytes but {} triangles need {} bytes",
            bytes.len(),
            triangle_count,
            expected
        )));
    }
    let mut body = &bytes[PREAMBLE_SIZE..];
    StlReader::read_triangles(&mut body, triangle_count)
}

fn read_u32<R: Read>(reader: &mut R) -> Result<u32> {
    let mut buf = [0u8; 4];
    reader.read_exact(&mut buf)?;
    Ok(u32::from_le_bytes(buf))
}

fn le_u32(bytes: &[u8]) -> u32 {
    u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])
}

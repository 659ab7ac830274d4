//! Mesh data structures and functionality

use crate::geometry::FacetGeometry;
use crate::point::*;
use crate::{Error, MeshView, Result};
use serde::{Deserialize, Serialize};

/// An indexed triangle mesh with shared vertices
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TriangleMesh {
    pub vertices: Vec<Point3f>,
    pub faces: Vec<[VertexId; 3]>,
}

impl TriangleMesh {
    /// Create a new empty mesh
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mesh from vertices and faces
    pub fn from_vertices_and_faces(vertices: Vec<Point3f>, faces: Vec<[VertexId; 3]>) -> Self {
        Self { vertices, faces }
    }

    /// Check if the mesh is empty
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty() || self.faces.is_empty()
    }

    /// Add a vertex to the mesh, returning its id
    pub fn add_vertex(&mut self, vertex: Point3f) -> VertexId {
        let index = self.vertices.len() as VertexId;
        self.vertices.push(vertex);
        index
    }

    /// Add a face to the mesh, returning its facet id
    pub fn add_face(&mut self, face: [VertexId; 3]) -> FacetId {
        let index = self.faces.len() as FacetId;
        self.faces.push(face);
        index
    }

    /// Unit normal of every face, in facet order.
    ///
    /// Fails on the first degenerate face.
    pub fn face_normals(&self) -> Result<Vec<Vector3f>> {
        (0..self.facet_count()).map(|facet| self.facet_normal(facet)).collect()
    }

    /// Flatten the mesh into a triangle soup: nine coordinates per facet, in facet order
    pub fn triangle_soup(&self) -> Result<Vec<f32>> {
        let mut soup = Vec::with_capacity(self.faces.len() * 9);
        for facet in 0..self.facet_count() {
            for point in self.facet_points(facet)? {
                soup.extend_from_slice(&[point.x, point.y, point.z]);
            }
        }
        Ok(soup)
    }

    /// Clear the mesh
    pub fn clear(&mut self) {
        self.vertices.clear();
        self.faces.clear();
    }
}

impl MeshView for TriangleMesh {
    fn facet_count(&self) -> u32 {
        self.faces.len() as u32
    }

    fn vertex_count(&self) -> u32 {
        self.vertices.len() as u32
    }

    fn vertices_of(&self, facet: FacetId) -> Result<[VertexId; 3]> {
        self.faces
            .get(facet as usize)
            .copied()
            .ok_or_else(|| Error::facet_out_of_range(facet, self.facet_count()))
    }

    fn point_of(&self, vertex: VertexId) -> Result<Point3f> {
        self.vertices
            .get(vertex as usize)
            .copied()
            .ok_or_else(|| Error::vertex_out_of_range(vertex, self.vertex_count()))
    }
}

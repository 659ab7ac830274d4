//! Core traits for proxymesh

use crate::{FacetId, Point3f, Result, VertexId};

/// Read-only view over an indexed triangle mesh.
///
/// Facets are labelled densely `0..facet_count()` and vertices `0..vertex_count()`.
/// Every algorithm in this workspace relies on that labelling staying stable for
/// the duration of a run: the same id must address the same triangle on every call.
pub trait MeshView {
    /// Number of triangles in the mesh
    fn facet_count(&self) -> u32;

    /// Number of vertices in the mesh
    fn vertex_count(&self) -> u32;

    /// The three vertex ids of a facet, in winding order.
    ///
    /// Fails with [`crate::Error::IndexOutOfRange`] if `facet >= facet_count()`.
    fn vertices_of(&self, facet: FacetId) -> Result<[VertexId; 3]>;

    /// The position of a vertex.
    ///
    /// Fails with [`crate::Error::IndexOutOfRange`] if `vertex >= vertex_count()`.
    fn point_of(&self, vertex: VertexId) -> Result<Point3f>;
}

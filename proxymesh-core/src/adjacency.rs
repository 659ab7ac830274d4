//! Triangle-triangle adjacency across shared edges
//!
//! The table holds one slot per (facet, local edge) pair, where local edge `i`
//! runs from corner `i` to corner `(i + 1) % 3`. Slots on the mesh boundary hold
//! [`NO_NEIGHBOR`].

use crate::{Error, FacetId, MeshView, Result};

/// Sentinel stored in edge slots that have no neighboring facet
pub const NO_NEIGHBOR: FacetId = FacetId::MAX;

/// Expected number of facets around a vertex, used to size incidence lists
const TYPICAL_VERTEX_DEGREE: usize = 6;

/// Precomputed per-facet table of up to three edge-adjacent facets.
///
/// Built once per mesh snapshot and immutable afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdjacencyTable {
    slots: Vec<FacetId>,
}

impl AdjacencyTable {
    /// Build the adjacency table of a mesh.
    ///
    /// Runs in time linear in the facet count for meshes of bounded vertex degree.
    /// On a non-manifold edge shared by more than two facets the last facet found
    /// wins the slot.
    pub fn build<M: MeshView + ?Sized>(mesh: &M) -> Result<Self> {
        let facet_count = mesh.facet_count();
        let vertex_count = mesh.vertex_count();

        // Facets are visited in increasing order, so each list comes out sorted.
        let mut incident: Vec<Vec<FacetId>> = (0..vertex_count)
            .map(|_| Vec::with_capacity(TYPICAL_VERTEX_DEGREE))
            .collect();
        let mut corners = Vec::with_capacity(facet_count as usize);
        for facet in 0..facet_count {
            let vertices = mesh.vertices_of(facet)?;
            for &vertex in &vertices {
                incident
                    .get_mut(vertex as usize)
                    .ok_or_else(|| Error::vertex_out_of_range(vertex, vertex_count))?
                    .push(facet);
            }
            corners.push(vertices);
        }

        let mut slots = vec![NO_NEIGHBOR; 3 * facet_count as usize];
        for (facet, vertices) in corners.iter().enumerate() {
            let facet = facet as FacetId;
            for edge in 0..3 {
                let a = &incident[vertices[edge] as usize];
                let b = &incident[vertices[(edge + 1) % 3] as usize];
                if let Some(other) = across_edge(a, b, facet) {
                    slots[3 * facet as usize + edge] = other;
                }
            }
        }

        tracing::debug!(facets = facet_count, vertices = vertex_count, "built adjacency table");
        Ok(Self { slots })
    }

    /// Number of facets the table was built for
    pub fn facet_count(&self) -> u32 {
        (self.slots.len() / 3) as u32
    }

    /// Total number of edge slots, always `3 * facet_count()`
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether the table was built for an empty mesh
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Raw slot for local edge `edge` (0, 1 or 2) of `facet`; `None` on the mesh boundary
    pub fn slot(&self, facet: FacetId, edge: usize) -> Result<Option<FacetId>> {
        self.check_facet(facet)?;
        if edge >= 3 {
            return Err(Error::IndexOutOfRange { element: "edge", index: edge as u32, count: 3 });
        }
        let neighbor = self.slots[3 * facet as usize + edge];
        Ok((neighbor != NO_NEIGHBOR).then_some(neighbor))
    }

    /// The 0 to 3 facets sharing an edge with `facet`, in edge order 0, 1, 2
    pub fn neighbors_of(&self, facet: FacetId) -> Result<impl Iterator<Item = FacetId> + '_> {
        self.check_facet(facet)?;
        let start = 3 * facet as usize;
        Ok(self.slots[start..start + 3]
            .iter()
            .copied()
            .filter(|&neighbor| neighbor != NO_NEIGHBOR))
    }

    fn check_facet(&self, facet: FacetId) -> Result<()> {
        if facet >= self.facet_count() {
            return Err(Error::facet_out_of_range(facet, self.facet_count()));
        }
        Ok(())
    }
}

/// Linear merge of two ascending incidence lists, returning the facet other than
/// `facet` found in both. Later matches overwrite earlier ones.
fn across_edge(a: &[FacetId], b: &[FacetId], facet: FacetId) -> Option<FacetId> {
    let mut other = None;
    let mut matches = 0usize;
    let (mut i, mut j) = (0, 0);
    while i < a.len() && j < b.len() {
        if a[i] < b[j] {
            i += 1;
        } else if b[j] < a[i] {
            j += 1;
        } else {
            if a[i] != facet {
                other = Some(a[i]);
                matches += 1;
            }
            i += 1;
            j += 1;
        }
    }
    if matches > 1 {
        tracing::trace!(facet, matches, "non-manifold edge, keeping last neighbor");
    }
    other
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{shapes, Point3f, TriangleMesh};

    fn neighbors(table: &AdjacencyTable, facet: FacetId) -> Vec<FacetId> {
        table.neighbors_of(facet).unwrap().collect()
    }

    #[test]
    fn test_single_triangle_has_no_neighbors() {
        let mesh = TriangleMesh::from_vertices_and_faces(
            vec![
                Point3f::new(0.0, 0.0, 0.0),
                Point3f::new(0.0, 0.0, 1.0),
                Point3f::new(0.0, 1.0, 0.0),
            ],
            vec![[0, 1, 2]],
        );
        let table = AdjacencyTable::build(&mesh).unwrap();
        assert_eq!(table.len(), 3);
        assert!(neighbors(&table, 0).is_empty());
        assert_eq!(table.slot(0, 1).unwrap(), None);
    }

    #[test]
    fn test_octahedron_neighbors_in_edge_order() {
        let table = AdjacencyTable::build(&shapes::octahedron()).unwrap();
        assert_eq!(table.len(), 24);
        assert_eq!(neighbors(&table, 0), vec![5, 1, 3]);
        assert_eq!(neighbors(&table, 1), vec![6, 2, 0]);
        assert_eq!(neighbors(&table, 2), vec![7, 3, 1]);
        for facet in 0..8 {
            let found = neighbors(&table, facet);
            assert_eq!(found.len(), 3, "facet {} should be fully enclosed", facet);
            assert!(!found.contains(&facet));
        }
    }

    #[test]
    fn test_cube_is_closed() {
        let table = AdjacencyTable::build(&shapes::basic_cube()).unwrap();
        for facet in 0..12 {
            assert_eq!(neighbors(&table, facet).len(), 3);
        }
        // edge (2, 0) is the diagonal of the y = 0 face
        assert_eq!(table.slot(0, 2).unwrap(), Some(1));
        // edge (1, 2) runs along the x = 100 face
        assert_eq!(table.slot(0, 1).unwrap(), Some(4));
    }

    #[test]
    fn test_triangle_strip() {
        // 0---1---2
        // | \ | \ |
        // 3---4---5
        let vertices = (0..6)
            .map(|i| Point3f::new((i % 3) as f32, (i / 3) as f32, 0.0))
            .collect();
        let faces = vec![[0, 4, 1], [0, 3, 4], [1, 5, 2], [1, 4, 5]];
        let mesh = TriangleMesh::from_vertices_and_faces(vertices, faces);
        let table = AdjacencyTable::build(&mesh).unwrap();

        assert_eq!(neighbors(&table, 0), vec![1, 3]);
        assert_eq!(neighbors(&table, 1), vec![0]);
        assert_eq!(neighbors(&table, 2), vec![3]);
        assert_eq!(neighbors(&table, 3), vec![0, 2]);
    }

    #[test]
    fn test_non_manifold_edge_keeps_last() {
        // three triangles hinged on edge (0, 1)
        let vertices = vec![
            Point3f::new(0.0, 0.0, 0.0),
            Point3f::new(1.0, 0.0, 0.0),
            Point3f::new(0.5, 1.0, 0.0),
            Point3f::new(0.5, -1.0, 0.0),
            Point3f::new(0.5, 0.0, 1.0),
        ];
        let faces = vec![[0, 1, 2], [1, 0, 3], [0, 1, 4]];
        let table = AdjacencyTable::build(&TriangleMesh::from_vertices_and_faces(vertices, faces))
            .unwrap();

        assert_eq!(table.slot(0, 0).unwrap(), Some(2));
        assert_eq!(table.slot(1, 0).unwrap(), Some(2));
        assert_eq!(table.slot(2, 0).unwrap(), Some(1));
    }

    #[test]
    fn test_out_of_range_queries() {
        let table = AdjacencyTable::build(&shapes::octahedron()).unwrap();
        assert!(matches!(
            table.neighbors_of(8).err(),
            Some(Error::IndexOutOfRange { element: "facet", index: 8, count: 8 })
        ));
        assert!(table.slot(0, 3).is_err());
    }

    #[test]
    fn test_bad_vertex_reference_is_rejected() {
        let mesh = TriangleMesh::from_vertices_and_faces(
            vec![Point3f::new(0.0, 0.0, 0.0), Point3f::new(1.0, 0.0, 0.0)],
            vec![[0, 1, 2]],
        );
        assert!(matches!(
            AdjacencyTable::build(&mesh),
            Err(Error::IndexOutOfRange { element: "vertex", index: 2, count: 2 })
        ));
    }

    #[test]
    fn test_empty_mesh() {
        let table = AdjacencyTable::build(&TriangleMesh::new()).unwrap();
        assert!(table.is_empty());
        assert_eq!(table.facet_count(), 0);
        assert!(table.neighbors_of(0).is_err());
    }
}

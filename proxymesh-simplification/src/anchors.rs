//! Anchor vertex extraction
//!
//! Flood-fills the facet graph one proxy region at a time. Facets with a
//! neighbor owned by a different proxy are border facets; every vertex of a
//! border facet collects that facet's proxy. Vertices that end up touching three
//! or more distinct proxies are where region boundaries meet, and become anchors.
//!
//! Vertices on an open mesh boundary where only two regions meet are not anchors.

use crate::proxy::{Plane, ProxyAssignment, ProxyId};
use proxymesh_core::{
    AdjacencyTable, Error, FacetId, MeshView, Point3f, Result, Vector3f, VertexId,
};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, VecDeque};

/// Minimum number of distinct proxies meeting at an anchor vertex
pub const MIN_ANCHOR_PROXIES: usize = 3;

/// A mesh vertex where three or more proxy regions meet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnchorVertex {
    pub vertex: VertexId,
    /// Distinct proxies of the border facets around this vertex
    pub proxies: BTreeSet<ProxyId>,
}

impl AnchorVertex {
    /// Position of the anchor on the approximating surface: the mesh point
    /// projected onto each touching proxy plane, averaged.
    pub fn position<M: MeshView + ?Sized>(&self, mesh: &M, planes: &[Plane]) -> Result<Point3f> {
        let point = mesh.point_of(self.vertex)?;
        let mut sum = Vector3f::zeros();
        for &proxy in &self.proxies {
            let plane = planes.get(proxy).ok_or_else(|| Error::IndexOutOfRange {
                element: "proxy",
                index: proxy as u32,
                count: planes.len() as u32,
            })?;
            sum += plane.project(&point).coords;
        }
        Ok(Point3f::from(sum / self.proxies.len() as f32))
    }
}

/// Find the anchor vertices of a proxy partition, ordered by vertex id.
///
/// `assignments` must hold exactly one record per facet of `mesh`, at the
/// position equal to its facet id, and `adjacency` must have been built from the
/// same mesh. Any violation fails the whole extraction with
/// [`Error::InconsistentIndexing`]; a partial anchor set is never returned.
pub fn extract_anchor_vertices<M: MeshView + ?Sized>(
    assignments: &[ProxyAssignment],
    adjacency: &AdjacencyTable,
    mesh: &M,
) -> Result<Vec<AnchorVertex>> {
    let facet_count = assignments.len();
    if adjacency.facet_count() as usize != facet_count {
        return Err(reindex_error(format!(
            "adjacency covers {} facets but there are {} assignments",
            adjacency.facet_count(),
            facet_count
        )));
    }

    let border = border_facets(assignments, adjacency)?;

    let mut touching: BTreeMap<VertexId, BTreeSet<ProxyId>> = BTreeMap::new();
    for &facet in &border {
        let Some(proxy) = assignments[facet as usize].proxy else {
            continue;
        };
        for vertex in mesh.vertices_of(facet)? {
            touching.entry(vertex).or_default().insert(proxy);
        }
    }

    let anchors: Vec<AnchorVertex> = touching
        .into_iter()
        .filter(|(_, proxies)| proxies.len() >= MIN_ANCHOR_PROXIES)
        .map(|(vertex, proxies)| AnchorVertex { vertex, proxies })
        .collect();

    tracing::debug!(
        border_facets = border.len(),
        anchors = anchors.len(),
        "extracted anchor vertices"
    );
    Ok(anchors)
}

/// Flood-fill each proxy region and collect facets that touch a foreign region
fn border_facets(
    assignments: &[ProxyAssignment],
    adjacency: &AdjacencyTable,
) -> Result<BTreeSet<FacetId>> {
    let mut colored = vec![false; assignments.len()];
    let mut border = BTreeSet::new();
    let mut front = VecDeque::new();
    let mut regions = 0usize;
    let mut next_start = 0;

    while let Some(start) = (next_start..colored.len()).find(|&i| !colored[i]) {
        next_start = start + 1;
        regions += 1;
        colored[start] = true;
        front.push_back(record_at(assignments, start as FacetId)?);

        while let Some(current) = front.pop_front() {
            for neighbor in adjacency.neighbors_of(current.facet)? {
                let other = record_at(assignments, neighbor)?;
                if other.proxy != current.proxy {
                    border.insert(current.facet);
                } else if !colored[neighbor as usize] {
                    colored[neighbor as usize] = true;
                    front.push_back(other);
                }
            }
        }
    }

    tracing::debug!(regions, "colored proxy regions");
    Ok(border)
}

/// Assignment record for `facet`, checking that ids and positions agree
fn record_at(assignments: &[ProxyAssignment], facet: FacetId) -> Result<ProxyAssignment> {
    let record = assignments.get(facet as usize).ok_or_else(|| {
        reindex_error(format!("facet {} has no assignment record", facet))
    })?;
    if record.facet != facet {
        return Err(reindex_error(format!(
            "assignment at position {} belongs to facet {}",
            facet, record.facet
        )));
    }
    Ok(*record)
}

fn reindex_error(detail: String) -> Error {
    Error::InconsistentIndexing(format!("{}; the mesh must be densely reindexed", detail))
}

//! Planar proxy approximation of triangle meshes
//!
//! This crate partitions a mesh into regions that are each well described by
//! a single plane, and finds the vertices where those regions meet:
//! - Variational shape approximation ([`VariationalShapeApproximation`])
//! - Anchor vertex extraction ([`extract_anchor_vertices`])

pub mod proxy;
pub mod variational;
pub mod anchors;

pub use proxy::*;
pub use variational::*;
pub use anchors::*;

use proxymesh_core::{AdjacencyTable, MeshView, Result};

/// Proxy field of a mesh together with the anchors of its partition
#[derive(Debug, Clone, PartialEq)]
pub struct Approximation {
    pub field: ProxyField,
    pub anchors: Vec<AnchorVertex>,
}

/// Approximate `mesh` with the given settings, then extract its anchor vertices
pub fn approximate_and_extract<M: MeshView + ?Sized>(
    mesh: &M,
    config: VsaConfig,
) -> Result<Approximation> {
    let adjacency = AdjacencyTable::build(mesh)?;
    let field = VariationalShapeApproximation::new(config).approximate(mesh)?;
    let anchors = extract_anchor_vertices(&field.assignments, &adjacency, mesh)?;
    Ok(Approximation { field, anchors })
}

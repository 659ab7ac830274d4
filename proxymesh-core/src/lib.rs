//! Core data structures and traits for proxymesh
//!
//! This crate provides the fundamental pieces shared by the rest of the workspace:
//! the [`MeshView`] capability trait and an indexed [`TriangleMesh`], slice-based
//! vector utilities, per-facet geometry, and the triangle [`AdjacencyTable`].

pub mod point;
pub mod mesh;
pub mod traits;
pub mod error;
pub mod vector;
pub mod geometry;
pub mod adjacency;
pub mod shapes;

pub use point::*;
pub use mesh::*;
pub use traits::*;
pub use error::*;
pub use geometry::FacetGeometry;
pub use adjacency::{AdjacencyTable, NO_NEIGHBOR};

/// Re-export commonly used types from nalgebra
pub use nalgebra::{Point3, Vector3};

//! Point and vector types

use nalgebra::{Point3, Vector3};

/// A 3D point with floating point coordinates
pub type Point3f = Point3<f32>;

/// A 3D vector with floating point components
pub type Vector3f = Vector3<f32>;

/// Dense identifier of a mesh facet (triangle), `0..facet_count`
pub type FacetId = u32;

/// Dense identifier of a mesh vertex, `0..vertex_count`
pub type VertexId = u32;

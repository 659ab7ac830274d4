//! Planar proxies and per-facet proxy assignments

use proxymesh_core::{FacetGeometry, FacetId, MeshView, Point3f, Result, Vector3f};
use serde::{Deserialize, Serialize};

/// Index of a proxy in [`ProxyField::proxies`]
pub type ProxyId = usize;

/// A planar proxy: a representative point and a unit normal.
///
/// The normal may be the zero vector when the facets fitted to it have
/// normals that cancel out.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Plane {
    pub point: Point3f,
    pub normal: Vector3f,
}

impl Plane {
    pub fn new(point: Point3f, normal: Vector3f) -> Self {
        Self { point, normal }
    }

    /// Plane through a facet's centroid with the facet's normal
    pub fn from_facet<M: MeshView + ?Sized>(mesh: &M, facet: FacetId) -> Result<Self> {
        Ok(Self::new(mesh.facet_centroid(facet)?, mesh.facet_normal(facet)?))
    }

    /// Signed distance from `point` to the plane, positive on the side the normal points to
    pub fn signed_distance(&self, point: &Point3f) -> f32 {
        (point.coords - self.point.coords).dot(&self.normal)
    }

    /// Orthogonal projection of `point` onto the plane
    pub fn project(&self, point: &Point3f) -> Point3f {
        Point3f::from(point.coords - self.normal * self.signed_distance(point))
    }
}

/// Best proxy found so far for one facet
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProxyAssignment {
    /// Owning proxy, `None` before the first partition pass
    pub proxy: Option<ProxyId>,
    /// Area-weighted normal deviation from the owning proxy
    pub error: f32,
    pub facet: FacetId,
}

impl ProxyAssignment {
    /// Unassigned record with infinite error
    pub fn unassigned(facet: FacetId) -> Self {
        Self { proxy: None, error: f32::INFINITY, facet }
    }
}

/// Result of a variational shape approximation run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProxyField {
    pub proxies: Vec<Plane>,
    /// One record per facet, indexed by facet id
    pub assignments: Vec<ProxyAssignment>,
    /// Number of partition-refit passes performed
    pub iterations: usize,
    /// Smallest per-pass maximum facet error seen during the run
    pub max_error: f32,
}

impl ProxyField {
    pub fn proxy_count(&self) -> usize {
        self.proxies.len()
    }

    /// Average stored facet error; zero for an empty field
    pub fn mean_error(&self) -> f32 {
        if self.assignments.is_empty() {
            return 0.0;
        }
        let total: f32 = self.assignments.iter().map(|a| a.error).sum();
        total / self.assignments.len() as f32
    }

    /// Facets currently assigned to `proxy`, in facet order
    pub fn facets_of(&self, proxy: ProxyId) -> impl Iterator<Item = FacetId> + '_ {
        self.assignments
            .iter()
            .filter(move |a| a.proxy == Some(proxy))
            .map(|a| a.facet)
    }
}

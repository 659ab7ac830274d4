//! Per-triangle geometric quantities

use crate::point::*;
use crate::{vector, Error, MeshView, Result};

/// Tolerance used to detect parallel triangle edges
pub const PARALLEL_TOLERANCE: f32 = 1e-6;

/// Unit normal of the triangle `(p1, p2, p3)` following its winding.
///
/// Fails with [`Error::DegenerateGeometry`] when the two edges leaving `p1` are
/// parallel or the triangle has no area, since the normal is then undefined.
/// The parallel test works in absolute units, so very small triangles are
/// reported as degenerate too.
pub fn triangle_normal(p1: &Point3f, p2: &Point3f, p3: &Point3f) -> Result<Vector3f> {
    let u = p2 - p1;
    let v = p3 - p1;
    if vector::parallel(u.as_slice(), v.as_slice(), PARALLEL_TOLERANCE)? {
        return Err(Error::DegenerateGeometry("triangle edges are parallel".to_string()));
    }
    // parallel() misses edges pointing in opposite directions
    let cross = u.cross(&v);
    if cross.magnitude() < vector::NORMALIZE_EPSILON {
        return Err(Error::DegenerateGeometry("triangle has zero area".to_string()));
    }
    Ok(unit(&cross))
}

/// Area of the triangle `(p1, p2, p3)`; zero when its edges are parallel
pub fn triangle_area(p1: &Point3f, p2: &Point3f, p3: &Point3f) -> f32 {
    let u = p2 - p1;
    let v = p3 - p1;
    if matches!(vector::parallel(u.as_slice(), v.as_slice(), PARALLEL_TOLERANCE), Ok(true)) {
        return 0.0;
    }
    0.5 * u.cross(&v).magnitude()
}

/// Barycenter of the triangle `(p1, p2, p3)`
pub fn triangle_centroid(p1: &Point3f, p2: &Point3f, p3: &Point3f) -> Point3f {
    Point3f::from((p1.coords + p2.coords + p3.coords) / 3.0)
}

/// [`vector::normalize`] for nalgebra vectors
pub fn unit(v: &Vector3f) -> Vector3f {
    Vector3f::from_iterator(vector::normalize(v.as_slice()))
}

/// Geometric queries on the facets of any [`MeshView`]
pub trait FacetGeometry: MeshView {
    /// Corner positions of a facet in winding order
    fn facet_points(&self, facet: FacetId) -> Result<[Point3f; 3]> {
        let [a, b, c] = self.vertices_of(facet)?;
        Ok([self.point_of(a)?, self.point_of(b)?, self.point_of(c)?])
    }

    /// Unit normal of a facet
    fn facet_normal(&self, facet: FacetId) -> Result<Vector3f> {
        let [p1, p2, p3] = self.facet_points(facet)?;
        triangle_normal(&p1, &p2, &p3).map_err(|err| match err {
            Error::DegenerateGeometry(_) => {
                Error::DegenerateGeometry(format!("facet {} has no defined normal", facet))
            }
            other => other,
        })
    }

    /// Area of a facet
    fn facet_area(&self, facet: FacetId) -> Result<f32> {
        let [p1, p2, p3] = self.facet_points(facet)?;
        Ok(triangle_area(&p1, &p2, &p3))
    }

    /// Barycenter of a facet
    fn facet_centroid(&self, facet: FacetId) -> Result<Point3f> {
        let [p1, p2, p3] = self.facet_points(facet)?;
        Ok(triangle_centroid(&p1, &p2, &p3))
    }
}

impl<M: MeshView + ?Sized> FacetGeometry for M {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes;
    use approx::assert_relative_eq;

    #[test]
    fn test_normal_follows_winding() {
        let p1 = Point3f::new(0.0, 0.0, 0.0);
        let p2 = Point3f::new(2.0, 0.0, 0.0);
        let p3 = Point3f::new(0.0, 1.0, 0.0);

        let up = triangle_normal(&p1, &p2, &p3).unwrap();
        assert_relative_eq!(up, Vector3f::new(0.0, 0.0, 1.0));

        let down = triangle_normal(&p1, &p3, &p2).unwrap();
        assert_relative_eq!(down, Vector3f::new(0.0, 0.0, -1.0));
    }

    #[test]
    fn test_collinear_triangle_is_degenerate() {
        let p1 = Point3f::new(0.0, 0.0, 10.0);
        let p2 = Point3f::new(0.0, 0.0, 1.0);
        let p3 = Point3f::new(0.0, 0.0, 5.0);

        let result = triangle_normal(&p1, &p2, &p3);
        assert!(matches!(result, Err(Error::DegenerateGeometry(_))));
        assert_eq!(triangle_area(&p1, &p2, &p3), 0.0);
    }

    #[test]
    fn test_collinear_triangle_with_middle_corner_first() {
        // edges leaving p1 point in opposite directions
        let p1 = Point3f::new(6.0, 0.0, 0.0);
        let p2 = Point3f::new(5.0, 0.0, 0.0);
        let p3 = Point3f::new(7.0, 0.0, 0.0);

        let result = triangle_normal(&p1, &p2, &p3);
        assert!(matches!(result, Err(Error::DegenerateGeometry(_))));
        assert_eq!(triangle_area(&p1, &p2, &p3), 0.0);
    }

    #[test]
    fn test_tiny_triangles_are_degenerate() {
        // the parallel tolerance is absolute, so shrinking a valid mesh far enough
        // makes its facets degenerate
        let mut cube = shapes::basic_cube();
        assert!(cube.face_normals().is_ok());

        for vertex in cube.vertices.iter_mut() {
            *vertex = Point3f::from(vertex.coords * 1e-5);
        }
        let err = cube.facet_normal(0).unwrap_err();
        assert!(matches!(err, Error::DegenerateGeometry(_)));
        assert!(err.to_string().contains("facet 0"));
    }

    #[test]
    fn test_area_and_centroid() {
        let p1 = Point3f::new(0.0, 0.0, 0.0);
        let p2 = Point3f::new(2.0, 0.0, 0.0);
        let p3 = Point3f::new(0.0, 2.0, 0.0);

        assert_relative_eq!(triangle_area(&p1, &p2, &p3), 2.0);
        assert_relative_eq!(
            triangle_centroid(&p1, &p2, &p3),
            Point3f::new(2.0 / 3.0, 2.0 / 3.0, 0.0)
        );
    }

    #[test]
    fn test_unit_of_tiny_vector_is_zero() {
        assert_eq!(unit(&Vector3f::new(1e-7, 0.0, 0.0)), Vector3f::zeros());
        assert_eq!(unit(&Vector3f::new(0.0, 0.0, 4.0)), Vector3f::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn test_facet_queries_on_cube() {
        let cube = shapes::basic_cube();
        // facet 0 is (0,1,2) on the y = 0 face
        assert_relative_eq!(cube.facet_normal(0).unwrap(), Vector3f::new(0.0, -1.0, 0.0));
        assert_relative_eq!(cube.facet_area(0).unwrap(), 5000.0);
        assert_relative_eq!(
            cube.facet_centroid(0).unwrap(),
            Point3f::new(200.0 / 3.0, 0.0, 100.0 / 3.0),
            epsilon = 1e-4
        );
        assert!(cube.facet_normal(12).is_err());
    }

    #[test]
    fn test_degenerate_facet_names_the_facet() {
        let mesh = crate::TriangleMesh::from_vertices_and_faces(
            vec![
                Point3f::new(0.0, 0.0, 0.0),
                Point3f::new(1.0, 0.0, 0.0),
                Point3f::new(2.0, 0.0, 0.0),
            ],
            vec![[0, 1, 2]],
        );
        let err = mesh.facet_normal(0).unwrap_err();
        assert!(err.to_string().contains("facet 0"));
    }
}

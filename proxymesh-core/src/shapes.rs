//! Small canonical meshes used as fixtures

use crate::{Point3f, TriangleMesh};

/// Axis-aligned cube with corners (0,0,0) and (100,100,100): 8 vertices,
/// 12 triangles, 2 per face, outward-pointing normals.
pub fn basic_cube() -> TriangleMesh {
    let vertices = vec![
        Point3f::new(0.0, 0.0, 0.0),
        Point3f::new(100.0, 0.0, 0.0),
        Point3f::new(100.0, 0.0, 100.0),
        Point3f::new(0.0, 0.0, 100.0),
        Point3f::new(0.0, 100.0, 0.0),
        Point3f::new(100.0, 100.0, 0.0),
        Point3f::new(100.0, 100.0, 100.0),
        Point3f::new(0.0, 100.0, 100.0),
    ];
    let faces = vec![
        [0, 1, 2], // y = 0
        [0, 2, 3],
        [0, 5, 1], // z = 0
        [0, 4, 5],
        [1, 5, 2], // x = 100
        [5, 6, 2],
        [4, 6, 5], // y = 100
        [4, 7, 6],
        [6, 3, 2], // z = 100
        [7, 3, 6],
        [0, 3, 4], // x = 0
        [4, 3, 7],
    ];
    TriangleMesh::from_vertices_and_faces(vertices, faces)
}

/// Octahedron with its 6 vertices on the unit sphere: 8 triangles, every vertex
/// shared by 4 of them.
pub fn octahedron() -> TriangleMesh {
    let vertices = vec![
        Point3f::new(0.0, 0.0, 1.0),
        Point3f::new(1.0, 0.0, 0.0),
        Point3f::new(0.0, 1.0, 0.0),
        Point3f::new(-1.0, 0.0, 0.0),
        Point3f::new(0.0, -1.0, 0.0),
        Point3f::new(0.0, 0.0, -1.0),
    ];
    let faces = vec![
        [1, 2, 0],
        [2, 3, 0],
        [3, 4, 0],
        [4, 1, 0],
        [5, 1, 4],
        [5, 2, 1],
        [5, 3, 2],
        [5, 4, 3],
    ];
    TriangleMesh::from_vertices_and_faces(vertices, faces)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::FacetGeometry;
    use crate::MeshView;

    #[test]
    fn test_cube_normals_point_outward() {
        let cube = basic_cube();
        let center = Point3f::new(50.0, 50.0, 50.0);
        for facet in 0..cube.facet_count() {
            let normal = cube.facet_normal(facet).unwrap();
            let outward = cube.facet_centroid(facet).unwrap() - center;
            assert!(normal.dot(&outward) > 0.0, "facet {} points inward", facet);
        }
    }

    #[test]
    fn test_octahedron_normals_point_outward() {
        let octahedron = octahedron();
        assert_eq!(octahedron.facet_count(), 8);
        assert_eq!(octahedron.vertex_count(), 6);
        for facet in 0..octahedron.facet_count() {
            let normal = octahedron.facet_normal(facet).unwrap();
            let centroid = octahedron.facet_centroid(facet).unwrap();
            assert!(normal.dot(&centroid.coords) > 0.0, "facet {} points inward", facet);
        }
    }
}

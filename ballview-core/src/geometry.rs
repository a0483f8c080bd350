/// Geometry primitives for 3D rendering
use nalgebra::{Point3, Vector3};

/// A 3D vertex with position and normal
#[derive(Debug, Clone, Copy)]
pub struct Vertex {
    pub position: Point3<f32>,
    pub normal: Vector3<f32>,
}

impl Vertex {
    pub fn new(x: f32, y: f32, z: f32, nx: f32, ny: f32, nz: f32) -> Self {
        Self {
            position: Point3::new(x, y, z),
            normal: Vector3::new(nx, ny, nz),
        }
    }
}

/// A triangle face defined by three vertices
#[derive(Debug, Clone)]
pub struct Triangle {
    pub vertices: [Vertex; 3],
}

impl Triangle {
    pub fn new(v0: Vertex, v1: Vertex, v2: Vertex) -> Self {
        Self {
            vertices: [v0, v1, v2],
        }
    }

    /// Calculate the face normal from the triangle's vertices
    pub fn calculate_normal(&self) -> Vector3<f32> {
        let v0 = self.vertices[0].position;
        let v1 = self.vertices[1].position;
        let v2 = self.vertices[2].position;

        let edge1 = v1 - v0;
        let edge2 = v2 - v0;

        edge1.cross(&edge2).normalize()
    }
}

/// Axis-aligned bounding box enclosing a mesh
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Point3<f32>,
    pub max: Point3<f32>,
}

impl Aabb {
    /// Geometric center of the box
    pub fn center(&self) -> Point3<f32> {
        nalgebra::center(&self.min, &self.max)
    }

    /// Longest edge of the box
    pub fn max_extent(&self) -> f32 {
        let d = self.max - self.min;
        d.x.max(d.y).max(d.z)
    }
}

/// A 3D mesh composed of triangles
#[derive(Debug, Clone)]
pub struct Mesh {
    pub triangles: Vec<Triangle>,
}

impl Mesh {
    pub fn new() -> Self {
        Self {
            triangles: Vec::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            triangles: Vec::with_capacity(capacity),
        }
    }

    pub fn add_triangle(&mut self, triangle: Triangle) {
        self.triangles.push(triangle);
    }

    /// Compute the bounding box of all vertices.
    /// Returns None for an empty mesh.
    pub fn bounding_box(&self) -> Option<Aabb> {
        let mut vertices = self
            .triangles
            .iter()
            .flat_map(|t| t.vertices.iter().map(|v| v.position));

        let first = vertices.next()?;
        let (mut min, mut max) = (first, first);
        for p in vertices {
            min = Point3::new(min.x.min(p.x), min.y.min(p.y), min.z.min(p.z));
            max = Point3::new(max.x.max(p.x), max.y.max(p.y), max.z.max(p.z));
        }

        Some(Aabb { min, max })
    }

    /// Create a simple cube mesh, used as a stand-in model and in tests
    pub fn cube(size: f32) -> Self {
        let half = size / 2.0;
        let mut mesh = Self::new();

        // Front face
        mesh.add_triangle(Triangle::new(
            Vertex::new(-half, -half, half, 0.0, 0.0, 1.0),
            Vertex::new(half, -half, half, 0.0, 0.0, 1.0),
            Vertex::new(half, half, half, 0.0, 0.0, 1.0),
        ));
        mesh.add_triangle(Triangle::new(
            Vertex::new(-half, -half, half, 0.0, 0.0, 1.0),
            Vertex::new(half, half, half, 0.0, 0.0, 1.0),
            Vertex::new(-half, half, half, 0.0, 0.0, 1.0),
        ));

        // Back face
        mesh.add_triangle(Triangle::new(
            Vertex::new(-half, -half, -half, 0.0, 0.0, -1.0),
            Vertex::new(-half, half, -half, 0.0, 0.0, -1.0),
            Vertex::new(half, half, -half, 0.0, 0.0, -1.0),
        ));
        mesh.add_triangle(Triangle::new(
            Vertex::new(-half, -half, -half, 0.0, 0.0, -1.0),
            Vertex::new(half, half, -half, 0.0, 0.0, -1.0),
            Vertex::new(half, -half, -half, 0.0, 0.0, -1.0),
        ));

        // Top face
        mesh.add_triangle(Triangle::new(
            Vertex::new(-half, half, -half, 0.0, 1.0, 0.0),
            Vertex::new(-half, half, half, 0.0, 1.0, 0.0),
            Vertex::new(half, half, half, 0.0, 1.0, 0.0),
        ));
        mesh.add_triangle(Triangle::new(
            Vertex::new(-half, half, -half, 0.0, 1.0, 0.0),
            Vertex::new(half, half, half, 0.0, 1.0, 0.0),
            Vertex::new(half, half, -half, 0.0, 1.0, 0.0),
        ));

        // Bottom face
        mesh.add_triangle(Triangle::new(
            Vertex::new(-half, -half, -half, 0.0, -1.0, 0.0),
            Vertex::new(half, -half, -half, 0.0, -1.0, 0.0),
            Vertex::new(half, -half, half, 0.0, -1.0, 0.0),
        ));
        mesh.add_triangle(Triangle::new(
            Vertex::new(-half, -half, -half, 0.0, -1.0, 0.0),
            Vertex::new(half, -half, half, 0.0, -1.0, 0.0),
            Vertex::new(-half, -half, half, 0.0, -1.0, 0.0),
        ));

        // Right face
        mesh.add_triangle(Triangle::new(
            Vertex::new(half, -half, -half, 1.0, 0.0, 0.0),
            Vertex::new(half, half, -half, 1.0, 0.0, 0.0),
            Vertex::new(half, half, half, 1.0, 0.0, 0.0),
        ));
        mesh.add_triangle(Triangle::new(
            Vertex::new(half, -half, -half, 1.0, 0.0, 0.0),
            Vertex::new(half, half, half, 1.0, 0.0, 0.0),
            Vertex::new(half, -half, half, 1.0, 0.0, 0.0),
        ));

        // Left face
        mesh.add_triangle(Triangle::new(
            Vertex::new(-half, -half, -half, -1.0, 0.0, 0.0),
            Vertex::new(-half, -half, half, -1.0, 0.0, 0.0),
            Vertex::new(-half, half, half, -1.0, 0.0, 0.0),
        ));
        mesh.add_triangle(Triangle::new(
            Vertex::new(-half, -half, -half, -1.0, 0.0, 0.0),
            Vertex::new(-half, half, half, -1.0, 0.0, 0.0),
            Vertex::new(-half, half, -half, -1.0, 0.0, 0.0),
        ));

        mesh
    }
}

impl Default for Mesh {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cube_bounding_box() {
        let mesh = Mesh::cube(2.0);
        let bbox = mesh.bounding_box().unwrap();
        assert!((bbox.min - Point3::new(-1.0, -1.0, -1.0)).norm() < 1e-6);
        assert!((bbox.max - Point3::new(1.0, 1.0, 1.0)).norm() < 1e-6);
        assert!(bbox.center().coords.norm() < 1e-6);
        assert!((bbox.max_extent() - 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_empty_mesh_has_no_bounding_box() {
        let mesh = Mesh::new();
        assert!(mesh.bounding_box().is_none());
    }

    #[test]
    fn test_offset_mesh_center() {
        let mut mesh = Mesh::new();
        mesh.add_triangle(Triangle::new(
            Vertex::new(1.0, 2.0, 3.0, 0.0, 0.0, 1.0),
            Vertex::new(3.0, 2.0, 3.0, 0.0, 0.0, 1.0),
            Vertex::new(3.0, 4.0, 3.0, 0.0, 0.0, 1.0),
        ));
        let center = mesh.bounding_box().unwrap().center();
        assert!((center - Point3::new(2.0, 3.0, 3.0)).norm() < 1e-6);
    }
}

//! Mesh geometry data

use crate::foundation::math::Vec3;

/// A single mesh vertex
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    /// Position in model space
    pub position: [f32; 3],

    /// Surface normal
    pub normal: [f32; 3],

    /// Texture coordinates
    pub uv: [f32; 2],
}

impl Vertex {
    /// Create a new vertex
    pub fn new(position: [f32; 3], normal: [f32; 3], uv: [f32; 2]) -> Self {
        Self { position, normal, uv }
    }

    /// Create a vertex from a position only, with a default up normal
    pub fn from_position(position: [f32; 3]) -> Self {
        Self {
            position,
            normal: [0.0, 1.0, 0.0],
            uv: [0.0, 0.0],
        }
    }

    /// Position as a math vector
    pub fn position_vec(&self) -> Vec3 {
        Vec3::new(self.position[0], self.position[1], self.position[2])
    }
}

/// Indexed triangle mesh
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    /// Vertex data
    pub vertices: Vec<Vertex>,

    /// Triangle indices into the vertex array
    pub indices: Vec<u32>,
}

impl Mesh {
    /// Create a new mesh from vertices and indices
    pub fn new(vertices: Vec<Vertex>, indices: Vec<u32>) -> Self {
        Self { vertices, indices }
    }

    /// Create a mesh from raw positions, with a fan triangulation left to
    /// the caller
    pub fn from_positions(positions: &[[f32; 3]], indices: Vec<u32>) -> Self {
        Self {
            vertices: positions.iter().copied().map(Vertex::from_position).collect(),
            indices,
        }
    }

    /// Number of triangles in the mesh
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

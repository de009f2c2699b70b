//! Bounding volume calculation
//!
//! Computes the axis-aligned bounding box enclosing all visible renderable
//! geometry of a scene graph in world space. Bounding volumes are derived
//! data: they are always recomputed from current geometry, never patched in
//! place after a transform change.

use crate::foundation::math::{Mat4, Vec3};
use crate::scene::graph::SceneGraph;
use nalgebra::Point3;

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Minimum corner of the bounding box
    pub min: Vec3,

    /// Maximum corner of the bounding box
    pub max: Vec3,
}

impl Aabb {
    /// Create a new AABB from min and max points
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Degenerate zero-size volume at the origin
    ///
    /// This is the recoverable fallback for scene graphs with no visible
    /// renderable leaves; it is not an error.
    pub fn degenerate() -> Self {
        Self {
            min: Vec3::zeros(),
            max: Vec3::zeros(),
        }
    }

    /// Get the center of the AABB
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Componentwise size (`max - min`)
    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    /// Largest extent across the three axes
    pub fn max_dimension(&self) -> f32 {
        let size = self.size();
        size.x.max(size.y).max(size.z)
    }

    /// Whether the volume encloses no space
    pub fn is_degenerate(&self) -> bool {
        self.max_dimension() <= 0.0
    }

    /// Expand the box to include a point
    pub fn grow(&mut self, point: Vec3) {
        self.min = self.min.inf(&point);
        self.max = self.max.sup(&point);
    }
}

/// Compute the world-space bounding volume of a scene graph
///
/// Traverses the full node tree composing nested transforms. Invisible
/// nodes prune their entire subtree. A graph with no visible renderable
/// leaves yields a degenerate zero-size volume.
pub fn scene_bounds(graph: &SceneGraph) -> Aabb {
    let mut bounds: Option<Aabb> = None;
    let mut stack: Vec<(_, Mat4)> = vec![(graph.root(), Mat4::identity())];

    while let Some((id, parent_world)) = stack.pop() {
        let Some(node) = graph.node(id) else { continue };
        if !node.visible {
            continue;
        }

        let world = parent_world * node.transform.to_matrix();
        if let Some(mesh) = &node.mesh {
            for vertex in &mesh.vertices {
                let [x, y, z] = vertex.position;
                let p = world.transform_point(&Point3::new(x, y, z));
                match &mut bounds {
                    Some(aabb) => aabb.grow(p.coords),
                    None => bounds = Some(Aabb::new(p.coords, p.coords)),
                }
            }
        }
        for &child in node.children() {
            stack.push((child, world));
        }
    }

    bounds.unwrap_or_else(|| {
        log::debug!("Scene graph has no visible renderable leaves; bounds are degenerate");
        Aabb::degenerate()
    })
}

//! Scene graph and the geometry pipeline that prepares a model for display

pub mod bounds;
pub mod graph;
pub mod normalize;
pub mod wireframe;

pub use bounds::{scene_bounds, Aabb};
pub use graph::{NodeId, SceneGraph, SceneNode};
pub use normalize::{normalize, Normalization};
pub use wireframe::set_wireframe;

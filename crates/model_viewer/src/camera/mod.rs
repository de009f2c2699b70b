//! Camera types and the damped orbit controller

pub mod orbit;
pub mod primitives;

pub use orbit::{CursorIcon, OrbitController};
pub use primitives::Camera;

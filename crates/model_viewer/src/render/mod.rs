//! Renderable primitives and the demand-driven frame scheduler
//!
//! The viewer does not own a GPU backend; the render surface is a
//! collaborator that consumes the camera pose and scene graph. This module
//! holds the CPU-side primitives that collaborator needs (`Mesh`,
//! `Material`) and the scheduling policy deciding when it should draw.

pub mod material;
pub mod mesh;
pub mod schedule;

pub use material::{Material, MaterialSlots};
pub use mesh::{Mesh, Vertex};
pub use schedule::{ContinuousRedraw, FrameScheduler, RenderGate, TickHandle, TickOutcome};

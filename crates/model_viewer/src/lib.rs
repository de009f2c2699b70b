//! # Model Viewer
//!
//! An interactive 3D model viewing subsystem: it takes an arbitrary
//! user-supplied scene graph, normalizes its geometry into a stable visual
//! presentation (centered, uniformly scaled, grounded on a reference plane),
//! and drives a damped orbit camera inside a render-on-demand loop.
//!
//! ## Features
//!
//! - **Geometry Normalization**: Arbitrary-sized models are centered at the
//!   origin and uniformly scaled into a legible visual envelope
//! - **Ground Reference**: An infinite reference grid is positioned just
//!   below the model's lowest extent
//! - **Damped Orbit Camera**: Rotate, pan, and zoom with exponential
//!   smoothing and optional auto-rotation
//! - **Render-on-Demand**: Frames are produced only when interaction or
//!   state changes require them
//! - **Asynchronous Model Loading**: Explicit pending/ready/failed load
//!   states with cancellation of superseded loads
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use model_viewer::prelude::*;
//! use std::rc::Rc;
//!
//! # struct MySource;
//! # impl ModelSource for MySource {
//! #     fn begin_load(&mut self, _: &str) -> LoadTicket { unimplemented!() }
//! #     fn poll(&mut self, _: LoadTicket) -> LoadPoll { unimplemented!() }
//! #     fn cancel(&mut self, _: LoadTicket) {}
//! # }
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let surface = Rc::new(HeadlessSurface::default());
//!     let mut viewer = Viewer::new(MySource, surface, ViewerConfig::default());
//!
//!     viewer.set_model(Some("models/teapot.obj"));
//!     loop {
//!         viewer.poll()?;
//!         if viewer.run_frame(1.0 / 60.0) {
//!             // Hand the camera pose and scene to the render surface.
//!         }
//!     }
//! }
//! ```

pub mod assets;
pub mod camera;
pub mod config;
pub mod foundation;
pub mod render;
pub mod scene;
pub mod viewer;

pub use viewer::{Display, MountedModel, Viewer, ViewerError, ViewerFlags};

/// Common imports for viewer users
pub mod prelude {
    pub use crate::{
        assets::{AssetError, LoadPoll, LoadTicket, ModelSource},
        camera::{Camera, CursorIcon, OrbitController},
        config::{CameraConfig, Config, NormalizeSettings, OrbitConfig, ViewerConfig},
        foundation::math::{Mat4, Transform, Vec3},
        render::{
            schedule::{FrameScheduler, RenderGate, TickHandle, TickOutcome},
            Material, MaterialSlots, Mesh, Vertex,
        },
        scene::{normalize, scene_bounds, set_wireframe, Aabb, Normalization, SceneGraph, SceneNode},
        viewer::{Display, HeadlessSurface, MountedModel, Viewer, ViewerError, ViewerFlags, ViewerSurface},
    };
}

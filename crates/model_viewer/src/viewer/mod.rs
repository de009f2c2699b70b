//! Viewer orchestrator
//!
//! Ties the model source, the scene pipeline, the orbit camera, and the
//! frame scheduler into one lifecycle. The viewer owns mounting: a model
//! reference is resolved through the [`ModelSource`], the resulting graph is
//! normalized before it ever becomes visible, and a superseded load is
//! cancelled so a stale asset can never replace a newer one.

pub mod surface;

pub use surface::{HeadlessSurface, ScrollLock, ViewerSurface};

use crate::assets::{AssetError, LoadPoll, LoadTicket, ModelSource};
use crate::camera::orbit::{CursorIcon, OrbitController};
use crate::camera::primitives::Camera;
use crate::config::ViewerConfig;
use crate::render::schedule::{ContinuousRedraw, FrameScheduler, RenderGate, TickHandle, TickOutcome};
use crate::scene::{normalize, scene_bounds, wireframe, Aabb, Normalization, SceneGraph};
use std::cell::RefCell;
use std::rc::Rc;
use thiserror::Error;

/// Errors surfaced by the viewer lifecycle
#[derive(Error, Debug)]
pub enum ViewerError {
    /// The model source failed to resolve the current reference
    #[error("Model load failed: {0}")]
    AssetLoad(#[from] AssetError),
}

/// Presentation toggles that survive model swaps
///
/// The flags live on the viewer, not on any one graph, so a freshly mounted
/// model always picks up the current settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ViewerFlags {
    /// Render all materials as wireframe
    pub wireframe: bool,

    /// Slowly orbit the camera while idle
    pub auto_rotate: bool,
}

/// A model that finished loading and normalization
#[derive(Debug)]
pub struct MountedModel {
    /// The normalized scene graph, centered at the origin
    pub graph: SceneGraph,

    /// Scale and ground plane derived during mounting
    pub normalization: Normalization,

    /// World-space bounds of the graph after normalization
    pub bounds: Aabb,
}

/// What the host should present this frame
#[derive(Debug)]
pub enum Display<'a> {
    /// No model reference is set, or the host is still preparing one
    Unavailable,

    /// A load is in flight; show the loading placeholder
    Loading,

    /// A model is mounted and ready to draw
    Model(&'a MountedModel),

    /// The current reference failed to load
    Failed,
}

enum MountState {
    Unavailable,
    Pending { ticket: LoadTicket, reference: String },
    Mounted(MountedModel),
    Failed,
}

/// Interactive model viewer
///
/// Single-threaded by design: the host drives it from its UI loop through
/// [`Viewer::poll`] (load progress) and [`Viewer::run_frame`] (rendering).
/// Pointer events are forwarded through the `pointer_*` and `drag_*`
/// methods; every state change arms the render gate so the next
/// `run_frame` call produces a frame.
pub struct Viewer<S: ModelSource> {
    loader: S,
    surface: Rc<dyn ViewerSurface>,
    config: ViewerConfig,
    state: MountState,
    reference: Option<String>,
    host_loading: bool,
    flags: ViewerFlags,
    controller: Rc<RefCell<OrbitController>>,
    scheduler: FrameScheduler,
    auto_rotate_hold: Option<ContinuousRedraw>,
    _camera_tick: TickHandle,
    _scroll_lock: ScrollLock,
}

impl<S: ModelSource> Viewer<S> {
    /// Create a viewer over the given model source and pointer surface
    ///
    /// Suppresses host scrolling over the surface for the viewer's
    /// lifetime so wheel input zooms the camera instead.
    pub fn new(loader: S, surface: Rc<dyn ViewerSurface>, config: ViewerConfig) -> Self {
        let camera = Camera::perspective(
            config.camera.position.into(),
            config.camera.fov_degrees,
            config.camera.aspect,
            config.camera.near,
            config.camera.far,
        );
        let controller = Rc::new(RefCell::new(OrbitController::new(&config.orbit, camera)));

        let scheduler = FrameScheduler::new(RenderGate::new());
        let tick_controller = Rc::clone(&controller);
        let camera_tick = scheduler.register_tick(move |_delta_time| {
            if tick_controller.borrow_mut().update() {
                TickOutcome::Animating
            } else {
                TickOutcome::Settled
            }
        });

        let auto_rotate_hold = config
            .orbit
            .auto_rotate
            .then(|| scheduler.gate().hold_continuous());
        let flags = ViewerFlags {
            wireframe: false,
            auto_rotate: config.orbit.auto_rotate,
        };

        let scroll_lock = ScrollLock::engage(Rc::clone(&surface));
        surface.set_cursor(CursorIcon::Grab);
        scheduler.gate().request_frame();
        log::info!("Viewer created");

        Self {
            loader,
            surface,
            config,
            state: MountState::Unavailable,
            reference: None,
            host_loading: false,
            flags,
            controller,
            scheduler,
            auto_rotate_hold,
            _camera_tick: camera_tick,
            _scroll_lock: scroll_lock,
        }
    }

    /// Set or clear the model reference to display
    ///
    /// Changing the reference unmounts the current model immediately and
    /// starts a fresh load; a still-pending load for the old reference is
    /// cancelled.
    pub fn set_model(&mut self, reference: Option<&str>) {
        if self.reference.as_deref() == reference {
            return;
        }
        self.reference = reference.map(str::to_owned);
        self.remount();
    }

    /// Tell the viewer the host is still preparing the model reference
    ///
    /// While set, no load is started and the display reads `Unavailable`
    /// even if a reference is present.
    pub fn set_loading(&mut self, loading: bool) {
        if self.host_loading == loading {
            return;
        }
        self.host_loading = loading;
        self.remount();
    }

    fn remount(&mut self) {
        match &self.state {
            MountState::Pending { ticket, reference } => {
                log::debug!("Cancelling superseded load of {reference}");
                self.loader.cancel(*ticket);
            }
            MountState::Mounted(_) => log::debug!("Unmounting current model"),
            MountState::Unavailable | MountState::Failed => {}
        }

        self.state = match (&self.reference, self.host_loading) {
            (Some(reference), false) => {
                log::info!("Loading model: {reference}");
                let ticket = self.loader.begin_load(reference);
                MountState::Pending {
                    ticket,
                    reference: reference.clone(),
                }
            }
            _ => MountState::Unavailable,
        };
        self.scheduler.gate().request_frame();
    }

    /// Drive the in-flight load forward, mounting the model when ready
    ///
    /// Call once per host loop iteration. Returns the load error when the
    /// current reference fails; the display switches to `Failed` and stays
    /// there until the reference changes.
    pub fn poll(&mut self) -> Result<(), ViewerError> {
        let ticket = match &self.state {
            MountState::Pending { ticket, .. } => *ticket,
            _ => return Ok(()),
        };

        match self.loader.poll(ticket) {
            LoadPoll::Pending => Ok(()),
            LoadPoll::Ready(graph) => {
                self.mount(graph);
                Ok(())
            }
            LoadPoll::Failed(error) => {
                log::error!("Model load failed: {error}");
                self.state = MountState::Failed;
                self.scheduler.gate().request_frame();
                Err(ViewerError::AssetLoad(error))
            }
        }
    }

    /// Normalization runs before the state flips to `Mounted`, so a frame
    /// can never observe the raw graph.
    fn mount(&mut self, mut graph: SceneGraph) {
        let normalization = normalize(&mut graph, &self.config.normalize);
        if self.flags.wireframe {
            wireframe::set_wireframe(&mut graph, true);
        }
        let bounds = scene_bounds(&graph);
        log::info!(
            "Mounted model: scale {:.3}, ground at y = {:.3}",
            normalization.scale,
            normalization.ground_y
        );
        self.state = MountState::Mounted(MountedModel {
            graph,
            normalization,
            bounds,
        });
        self.scheduler.gate().request_frame();
    }

    /// Run one frame if one is demanded; returns whether a frame ran
    ///
    /// Runs the registered per-frame ticks (camera damping among them) and
    /// re-arms the gate while any of them reports further animation.
    pub fn run_frame(&mut self, delta_time: f32) -> bool {
        self.scheduler.run_frame(delta_time)
    }

    /// Whether the next [`Viewer::run_frame`] call will produce a frame
    pub fn frame_demanded(&self) -> bool {
        self.scheduler.gate().frame_demanded()
    }

    /// What the host should present right now
    pub fn display(&self) -> Display<'_> {
        match &self.state {
            MountState::Unavailable => Display::Unavailable,
            MountState::Pending { .. } => Display::Loading,
            MountState::Mounted(model) => Display::Model(model),
            MountState::Failed => Display::Failed,
        }
    }

    /// The mounted model, if one is ready
    pub fn mounted(&self) -> Option<&MountedModel> {
        match &self.state {
            MountState::Mounted(model) => Some(model),
            _ => None,
        }
    }

    /// Current presentation toggles
    pub fn flags(&self) -> ViewerFlags {
        self.flags
    }

    /// Toggle wireframe rendering on every material in the mounted model
    ///
    /// The flag outlives the current graph: a model mounted later picks it
    /// up as part of mounting.
    pub fn set_wireframe(&mut self, enabled: bool) {
        if self.flags.wireframe == enabled {
            return;
        }
        self.flags.wireframe = enabled;
        if let MountState::Mounted(model) = &mut self.state {
            wireframe::set_wireframe(&mut model.graph, enabled);
        }
        self.scheduler.gate().request_frame();
    }

    /// Toggle idle auto-rotation
    ///
    /// While enabled the viewer holds the render gate continuously so the
    /// rotation keeps animating without interaction.
    pub fn set_auto_rotate(&mut self, enabled: bool) {
        if self.flags.auto_rotate == enabled {
            return;
        }
        self.flags.auto_rotate = enabled;
        self.controller.borrow_mut().auto_rotate = enabled;
        self.auto_rotate_hold = enabled.then(|| self.scheduler.gate().hold_continuous());
        self.scheduler.gate().request_frame();
    }

    /// Pointer pressed over the view surface
    pub fn pointer_pressed(&mut self) {
        let cursor = {
            let mut controller = self.controller.borrow_mut();
            controller.pointer_pressed();
            controller.cursor()
        };
        self.surface.set_cursor(cursor);
        self.scheduler.gate().request_frame();
    }

    /// Pointer released
    pub fn pointer_released(&mut self) {
        let cursor = {
            let mut controller = self.controller.borrow_mut();
            controller.pointer_released();
            controller.cursor()
        };
        self.surface.set_cursor(cursor);
        self.scheduler.gate().request_frame();
    }

    /// Pointer left the view surface
    pub fn pointer_left(&mut self) {
        let cursor = {
            let mut controller = self.controller.borrow_mut();
            controller.pointer_left();
            controller.cursor()
        };
        self.surface.set_cursor(cursor);
        self.scheduler.gate().request_frame();
    }

    /// Rotate the camera from a pointer drag, in pixels
    pub fn drag_rotate(&mut self, dx: f32, dy: f32, viewport_height: f32) {
        self.controller.borrow_mut().rotate(dx, dy, viewport_height);
        self.scheduler.gate().request_frame();
    }

    /// Pan the camera from a pointer drag, in pixels
    pub fn drag_pan(&mut self, dx: f32, dy: f32, viewport_height: f32) {
        self.controller.borrow_mut().pan(dx, dy, viewport_height);
        self.scheduler.gate().request_frame();
    }

    /// Zoom by a scale factor; values below `1.0` move the camera closer
    pub fn scroll_zoom(&mut self, factor: f32) {
        self.controller.borrow_mut().zoom_by(factor);
        self.scheduler.gate().request_frame();
    }

    /// Reframe the camera so the mounted model fills the view
    pub fn recenter(&mut self) {
        if let MountState::Mounted(model) = &self.state {
            self.controller
                .borrow_mut()
                .frame_extent(model.bounds.max_dimension());
            self.scheduler.gate().request_frame();
        }
    }

    /// Update the camera's aspect ratio after a viewport resize
    pub fn set_aspect_ratio(&mut self, aspect: f32) {
        self.controller.borrow_mut().set_aspect_ratio(aspect);
        self.scheduler.gate().request_frame();
    }

    /// Snapshot of the current camera pose
    pub fn camera_pose(&self) -> Camera {
        self.controller.borrow().camera().clone()
    }

    /// Current cursor feedback for the pointer surface
    pub fn cursor(&self) -> CursorIcon {
        self.controller.borrow().cursor()
    }
}

//! Damped orbit camera controller
//!
//! Owns the continuous rotation/pan/zoom state tying the camera pose to
//! pointer input. The contract with the render loop: [`OrbitController::update`]
//! runs exactly once per granted frame, interaction or not, so in-flight
//! momentum decays through the damping filter instead of stopping abruptly.

use crate::camera::primitives::Camera;
use crate::config::OrbitConfig;
use crate::foundation::math::{constants, Vec3};

/// Clamp keeping the polar angle off the poles, where the orbit basis
/// degenerates. This is a numerical guard, not an interaction limit.
const POLE_EPSILON: f32 = 1e-6;

/// Squared movement below which the controller reports itself settled
const SETTLE_EPSILON_SQ: f32 = 1e-12;

/// Smallest permitted orbit radius
const MIN_RADIUS: f32 = 0.01;

/// Cursor feedback for the pointer surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CursorIcon {
    /// Neutral state: the view can be grabbed
    #[default]
    Grab,

    /// A drag is in progress
    Grabbing,
}

/// Camera offset from the orbit target in spherical coordinates (Y-up)
#[derive(Debug, Clone, Copy, PartialEq)]
struct Spherical {
    radius: f32,
    /// Azimuth angle around the Y axis
    theta: f32,
    /// Polar angle from the Y axis
    phi: f32,
}

impl Spherical {
    fn from_offset(offset: Vec3) -> Self {
        let radius = offset.norm().max(MIN_RADIUS);
        Self {
            radius,
            theta: offset.x.atan2(offset.z),
            phi: (offset.y / radius).clamp(-1.0, 1.0).acos(),
        }
    }

    fn to_offset(self) -> Vec3 {
        let sin_phi_radius = self.phi.sin() * self.radius;
        Vec3::new(
            sin_phi_radius * self.theta.sin(),
            self.phi.cos() * self.radius,
            sin_phi_radius * self.theta.cos(),
        )
    }
}

/// Damped orbit camera controller
///
/// Rotation, pan, and zoom are all enabled by default, with no artificial
/// angle limits. Pointer deltas accumulate into momentum that the per-frame
/// update drains through exponential damping; auto-rotation feeds a
/// constant angular increment per update tick. Auto-rotate and dragging can
/// both be set at once: the drag takes over the orientation while it lasts,
/// and auto-rotation resumes when it ends.
pub struct OrbitController {
    camera: Camera,
    target: Vec3,
    spherical: Spherical,
    delta_theta: f32,
    delta_phi: f32,
    pan_offset: Vec3,
    zoom_scale: f32,
    last_position: Vec3,
    last_target: Vec3,
    dragging: bool,
    cursor: CursorIcon,

    /// Exponential smoothing factor applied per update tick
    pub damping_factor: f32,

    /// Apply a constant rotation per update tick while enabled
    pub auto_rotate: bool,

    /// Auto-rotation speed; `1.0` is one full orbit per 60 seconds of
    /// updates at 60 updates per second
    pub auto_rotate_speed: f32,

    /// Whether pointer rotation is enabled
    pub enable_rotate: bool,

    /// Whether pointer panning is enabled
    pub enable_pan: bool,

    /// Whether zooming is enabled
    pub enable_zoom: bool,
}

impl OrbitController {
    /// Create a controller orbiting the camera's current target
    pub fn new(config: &OrbitConfig, camera: Camera) -> Self {
        let target = camera.target;
        let spherical = Spherical::from_offset(camera.position - target);
        let last_position = camera.position;
        Self {
            camera,
            target,
            spherical,
            delta_theta: 0.0,
            delta_phi: 0.0,
            pan_offset: Vec3::zeros(),
            zoom_scale: 1.0,
            last_position,
            last_target: target,
            dragging: false,
            cursor: CursorIcon::Grab,
            damping_factor: config.damping_factor,
            auto_rotate: config.auto_rotate,
            auto_rotate_speed: config.auto_rotate_speed,
            enable_rotate: config.enable_rotate,
            enable_pan: config.enable_pan,
            enable_zoom: config.enable_zoom,
        }
    }

    /// The camera pose this controller drives
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Update the driven camera's aspect ratio after a viewport resize
    pub fn set_aspect_ratio(&mut self, aspect: f32) {
        self.camera.set_aspect_ratio(aspect);
    }

    /// Current orbit target
    pub fn target(&self) -> Vec3 {
        self.target
    }

    /// Current cursor feedback for the pointer surface
    pub fn cursor(&self) -> CursorIcon {
        self.cursor
    }

    /// Whether a drag is in progress
    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Pointer pressed over the view surface
    pub fn pointer_pressed(&mut self) {
        self.dragging = true;
        self.cursor = CursorIcon::Grabbing;
    }

    /// Pointer released
    pub fn pointer_released(&mut self) {
        self.dragging = false;
        self.cursor = CursorIcon::Grab;
    }

    /// Pointer left the view surface; equivalent to a release
    pub fn pointer_left(&mut self) {
        self.pointer_released();
    }

    /// Accumulate a rotation from a pointer drag, in pixels
    ///
    /// A full viewport-height drag corresponds to one full revolution.
    pub fn rotate(&mut self, dx: f32, dy: f32, viewport_height: f32) {
        if !self.enable_rotate || viewport_height <= 0.0 {
            return;
        }
        self.delta_theta -= constants::TAU * dx / viewport_height;
        self.delta_phi -= constants::TAU * dy / viewport_height;
    }

    /// Accumulate a pan from a pointer drag, in pixels
    ///
    /// Pans in the camera plane, scaled so the drag tracks world geometry
    /// at the target distance.
    pub fn pan(&mut self, dx: f32, dy: f32, viewport_height: f32) {
        if !self.enable_pan || viewport_height <= 0.0 {
            return;
        }
        let target_distance = self.spherical.radius * (self.camera.fov * 0.5).tan();
        let offset = self.camera.position - self.target;
        let forward = -offset.normalize();
        let right = forward.cross(&self.camera.up).normalize();
        let up = right.cross(&forward);

        self.pan_offset += right * (-2.0 * dx * target_distance / viewport_height);
        self.pan_offset += up * (2.0 * dy * target_distance / viewport_height);
    }

    /// Scale the orbit radius; factors below `1.0` move the camera closer
    pub fn zoom_by(&mut self, factor: f32) {
        if !self.enable_zoom || factor <= 0.0 {
            return;
        }
        self.zoom_scale *= factor;
    }

    /// Reframe the orbit around the origin so a model of the given extent
    /// fills the view
    pub fn frame_extent(&mut self, extent: f32) {
        let distance = if extent > 0.0 {
            (extent * 0.5) / (self.camera.fov * 0.5).tan() * 1.5
        } else {
            self.spherical.radius
        };
        self.target = Vec3::zeros();
        self.spherical.radius = distance.max(MIN_RADIUS);
        self.delta_theta = 0.0;
        self.delta_phi = 0.0;
        self.pan_offset = Vec3::zeros();
        self.zoom_scale = 1.0;
        self.apply_pose();
        log::info!("Camera reframed to radius {distance:.3}");
    }

    /// Advance the controller by one frame
    ///
    /// Must run exactly once per granted frame regardless of interaction so
    /// damping settles while idle. Returns `true` while the pose is still
    /// in motion and another frame is needed.
    pub fn update(&mut self) -> bool {
        if self.auto_rotate && !self.dragging {
            self.delta_theta -= self.auto_rotation_angle();
        }

        self.spherical.theta += self.delta_theta * self.damping_factor;
        self.spherical.phi += self.delta_phi * self.damping_factor;
        self.spherical.phi = self
            .spherical
            .phi
            .clamp(POLE_EPSILON, constants::PI - POLE_EPSILON);

        let zoom_changed = (self.zoom_scale - 1.0).abs() > f32::EPSILON;
        self.spherical.radius = (self.spherical.radius * self.zoom_scale).max(MIN_RADIUS);
        self.zoom_scale = 1.0;

        self.target += self.pan_offset * self.damping_factor;

        let retain = 1.0 - self.damping_factor;
        self.delta_theta *= retain;
        self.delta_phi *= retain;
        self.pan_offset *= retain;

        self.apply_pose();

        let moved = (self.camera.position - self.last_position).norm_squared() > SETTLE_EPSILON_SQ
            || (self.target - self.last_target).norm_squared() > SETTLE_EPSILON_SQ
            || zoom_changed;
        self.last_position = self.camera.position;
        self.last_target = self.target;
        moved
    }

    fn apply_pose(&mut self) {
        self.camera.position = self.target + self.spherical.to_offset();
        self.camera.target = self.target;
        log::trace!(
            "Orbit pose: position {:?}, target {:?}",
            self.camera.position,
            self.camera.target
        );
    }

    fn auto_rotation_angle(&self) -> f32 {
        // One full orbit per 60 seconds at 60 updates per second for speed 1.
        constants::TAU / 60.0 / 60.0 * self.auto_rotate_speed
    }
}

//! # Viewer Configuration
//!
//! Consolidates the tunable parameters of the viewing subsystem: the
//! normalization envelope, the orbit controller behavior, and the camera
//! projection. Everything is serializable, so deployments can adjust the
//! presentation without rebuilds, and every default matches the viewer's
//! documented behavior.

use serde::{Deserialize, Serialize};

/// Configuration trait with file load/save support
pub trait Config: Serialize + for<'de> Deserialize<'de> + Default {
    /// Load configuration from a TOML or RON file
    fn load_from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(ConfigError::Io)?;

        if path.ends_with(".toml") {
            toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
        } else if path.ends_with(".ron") {
            ron::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
        } else {
            Err(ConfigError::UnsupportedFormat(path.to_string()))
        }
    }

    /// Save configuration to a TOML or RON file
    fn save_to_file(&self, path: &str) -> Result<(), ConfigError> {
        let contents = if path.ends_with(".toml") {
            toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?
        } else if path.ends_with(".ron") {
            ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
                .map_err(|e| ConfigError::Serialize(e.to_string()))?
        } else {
            return Err(ConfigError::UnsupportedFormat(path.to_string()));
        };

        std::fs::write(path, contents).map_err(ConfigError::Io)
    }
}

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialize(String),

    /// Unsupported format
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}

/// Normalization envelope parameters
///
/// The two-sided clamp keeping models in a legible visual range regardless
/// of native asset units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NormalizeSettings {
    /// Models larger than this are shrunk to exactly this extent
    pub max_extent: f32,

    /// Models smaller than this are grown
    pub min_extent: f32,

    /// Extent undersized models are grown to
    pub grow_target: f32,

    /// Gap between the model's lowest point and the reference grid
    pub ground_clearance: f32,
}

impl Default for NormalizeSettings {
    fn default() -> Self {
        Self {
            max_extent: 5.0,
            min_extent: 1.0,
            grow_target: 2.5,
            ground_clearance: 0.1,
        }
    }
}

/// Orbit controller parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrbitConfig {
    /// Exponential smoothing factor applied per update tick
    pub damping_factor: f32,

    /// Whether auto-rotation starts enabled
    pub auto_rotate: bool,

    /// Constant angular increment per update tick while auto-rotating
    pub auto_rotate_speed: f32,

    /// Whether pointer rotation is enabled
    pub enable_rotate: bool,

    /// Whether pointer panning is enabled
    pub enable_pan: bool,

    /// Whether zooming is enabled
    pub enable_zoom: bool,
}

impl Default for OrbitConfig {
    fn default() -> Self {
        Self {
            damping_factor: 0.05,
            auto_rotate: false,
            auto_rotate_speed: 1.0,
            enable_rotate: true,
            enable_pan: true,
            enable_zoom: true,
        }
    }
}

/// Camera projection parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraConfig {
    /// Initial camera position
    pub position: [f32; 3],

    /// Field of view in degrees
    pub fov_degrees: f32,

    /// Aspect ratio (width / height)
    pub aspect: f32,

    /// Near clipping plane distance
    pub near: f32,

    /// Far clipping plane distance
    pub far: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: [0.0, 2.5, 5.0],
            fov_degrees: 45.0,
            aspect: 16.0 / 9.0,
            near: 0.1,
            far: 100.0,
        }
    }
}

/// Complete viewer configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct ViewerConfig {
    /// Normalization envelope
    pub normalize: NormalizeSettings,

    /// Orbit controller behavior
    pub orbit: OrbitConfig,

    /// Camera projection
    pub camera: CameraConfig,
}

impl Config for ViewerConfig {}

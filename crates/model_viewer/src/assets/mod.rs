//! Model loading collaborator contract
//!
//! The viewer does not parse asset formats itself; it delegates to a
//! [`ModelSource`] implementation supplied by the host. The contract makes
//! the suspend/resume behavior explicit: a load is a ticket polled for
//! `Pending | Ready | Failed`, and superseded tickets are cancelled so a
//! stale asset can never overwrite a newer reference.

use crate::scene::graph::SceneGraph;
use thiserror::Error;

/// Opaque handle identifying one in-flight load request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LoadTicket(u64);

impl LoadTicket {
    /// Create a ticket from a source-assigned id
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// The source-assigned id
    pub fn id(self) -> u64 {
        self.0
    }
}

/// Poll result of an in-flight load
#[derive(Debug)]
pub enum LoadPoll {
    /// The asset has not resolved yet; keep showing the loading placeholder
    Pending,

    /// The asset resolved into a scene graph
    Ready(SceneGraph),

    /// The asset is missing or corrupt; fatal for this mount attempt
    Failed(AssetError),
}

/// Asynchronous scene-graph source
///
/// Implementations resolve a model reference (URL or path) into a scene
/// graph. Loads run cooperatively: the viewer polls at its own cadence on
/// the UI thread, and cancels tickets whose results are no longer wanted
/// so discarded assets can be cleaned up.
pub trait ModelSource {
    /// Start loading the referenced model; returns a ticket to poll
    fn begin_load(&mut self, reference: &str) -> LoadTicket;

    /// Poll an in-flight load
    ///
    /// Once `Ready` or `Failed` has been returned for a ticket the ticket
    /// is spent and must not be polled again.
    fn poll(&mut self, ticket: LoadTicket) -> LoadPoll;

    /// Discard an in-flight load whose result is no longer wanted
    fn cancel(&mut self, ticket: LoadTicket);
}

/// Asset loading errors
#[derive(Error, Debug)]
pub enum AssetError {
    /// Asset not found
    #[error("Asset not found: {0}")]
    NotFound(String),

    /// Failed to load asset
    #[error("Failed to load asset: {0}")]
    LoadFailed(String),

    /// Invalid asset data
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// Unsupported asset format
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// IO error during asset loading
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

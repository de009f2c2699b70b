//! Host surface contract
//!
//! The render surface collaborator provides the pointer-event area the
//! viewer lives in. The viewer feeds cursor feedback back to it and owns
//! one shared side effect: page scrolling is suppressed while the viewer is
//! mounted so wheel input zooms instead of scrolling the host UI. The
//! suppression is scoped through [`ScrollLock`], so unmounting can never
//! leak the listener.

use crate::camera::orbit::CursorIcon;
use std::rc::Rc;

/// Host-provided pointer surface the viewer is mounted on
pub trait ViewerSurface {
    /// Update the pointer cursor shown over the surface
    fn set_cursor(&self, cursor: CursorIcon);

    /// Enable or disable host scroll suppression over the surface
    fn set_scroll_suppressed(&self, suppressed: bool);
}

/// Surface implementation that ignores all feedback
///
/// Useful for headless operation and tests.
#[derive(Debug, Default, Clone, Copy)]
pub struct HeadlessSurface;

impl ViewerSurface for HeadlessSurface {
    fn set_cursor(&self, _cursor: CursorIcon) {}
    fn set_scroll_suppressed(&self, _suppressed: bool) {}
}

/// RAII guard suppressing host scroll for the surface's lifetime
pub struct ScrollLock {
    surface: Rc<dyn ViewerSurface>,
}

impl ScrollLock {
    /// Suppress scrolling until the returned guard is dropped
    pub fn engage(surface: Rc<dyn ViewerSurface>) -> Self {
        surface.set_scroll_suppressed(true);
        Self { surface }
    }
}

impl Drop for ScrollLock {
    fn drop(&mut self) {
        self.surface.set_scroll_suppressed(false);
    }
}

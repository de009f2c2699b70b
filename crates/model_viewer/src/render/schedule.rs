//! Demand-driven frame scheduling
//!
//! Rendering is not continuous: a frame is produced only when pointer
//! interaction occurs, a tracked value changes, or a continuous-redraw hold
//! (auto-rotation, settling camera damping) is active. Per-frame work such
//! as the orbit camera update registers a tick with the scheduler; tick
//! registrations are scoped, so dropping the handle uninstalls the callback
//! and nothing leaks past the viewer's lifetime.
//!
//! Everything here is single-threaded by design: geometry, traversal, and
//! camera updates all run on the UI/render thread (shared state is `Rc` +
//! `RefCell`, not `Arc` + `Mutex`).

use slotmap::{new_key_type, SlotMap};
use std::cell::RefCell;
use std::rc::{Rc, Weak};

new_key_type! {
    /// Key identifying a registered per-frame tick
    pub struct TickKey;
}

/// Outcome of a per-frame tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The tick has no in-flight motion; no further frame is required
    Settled,

    /// The tick is still animating and needs another frame
    Animating,
}

#[derive(Default)]
struct GateState {
    dirty: bool,
    continuous_holds: usize,
}

/// Render loop gate tracking whether a frame is currently demanded
///
/// Cheap to clone; clones share the same gate state.
#[derive(Clone, Default)]
pub struct RenderGate {
    state: Rc<RefCell<GateState>>,
}

impl RenderGate {
    /// Create a new idle gate
    pub fn new() -> Self {
        Self::default()
    }

    /// Demand a single frame (pointer interaction or a state change)
    pub fn request_frame(&self) {
        self.state.borrow_mut().dirty = true;
    }

    /// Hold the gate open for continuous redraws until the guard is dropped
    pub fn hold_continuous(&self) -> ContinuousRedraw {
        self.state.borrow_mut().continuous_holds += 1;
        ContinuousRedraw {
            state: Rc::clone(&self.state),
        }
    }

    /// Whether the next frame would be granted
    pub fn frame_demanded(&self) -> bool {
        let state = self.state.borrow();
        state.dirty || state.continuous_holds > 0
    }

    /// Consume the current demand; returns whether a frame is granted
    ///
    /// One-shot demands are cleared here; continuous holds keep granting
    /// frames until their guards are dropped.
    pub fn take_frame(&self) -> bool {
        let mut state = self.state.borrow_mut();
        let granted = state.dirty || state.continuous_holds > 0;
        state.dirty = false;
        granted
    }
}

/// RAII guard keeping the render gate in continuous-redraw mode
pub struct ContinuousRedraw {
    state: Rc<RefCell<GateState>>,
}

impl Drop for ContinuousRedraw {
    fn drop(&mut self) {
        let mut state = self.state.borrow_mut();
        state.continuous_holds = state.continuous_holds.saturating_sub(1);
    }
}

type TickFn = Box<dyn FnMut(f32) -> TickOutcome>;
type TickTable = Rc<RefCell<SlotMap<TickKey, TickFn>>>;

/// Scheduler running registered per-frame ticks on every granted frame
///
/// The contract from the camera controller's side: its update tick runs on
/// every granted frame, including idle-damping frames where no visible
/// pixels change, so in-flight momentum settles before the loop goes idle.
pub struct FrameScheduler {
    gate: RenderGate,
    ticks: TickTable,
}

impl FrameScheduler {
    /// Create a scheduler feeding off the given gate
    pub fn new(gate: RenderGate) -> Self {
        Self {
            gate,
            ticks: Rc::new(RefCell::new(SlotMap::with_key())),
        }
    }

    /// The gate this scheduler consumes demands from
    pub fn gate(&self) -> &RenderGate {
        &self.gate
    }

    /// Register a per-frame tick; the registration lives as long as the
    /// returned handle
    pub fn register_tick(&self, tick: impl FnMut(f32) -> TickOutcome + 'static) -> TickHandle {
        let key = self.ticks.borrow_mut().insert(Box::new(tick));
        log::debug!("Registered frame tick {key:?}");
        TickHandle {
            key,
            ticks: Rc::downgrade(&self.ticks),
        }
    }

    /// Run one scheduler step
    ///
    /// Returns `true` when the gate granted a frame; the caller should then
    /// render. Ticks reporting [`TickOutcome::Animating`] re-arm the gate so
    /// damping settles across subsequent frames.
    pub fn run_frame(&self, delta_time: f32) -> bool {
        if !self.gate.take_frame() {
            return false;
        }

        let mut animating = false;
        for tick in self.ticks.borrow_mut().values_mut() {
            if tick(delta_time) == TickOutcome::Animating {
                animating = true;
            }
        }
        if animating {
            self.gate.request_frame();
        }
        true
    }

    /// Number of live tick registrations
    pub fn tick_count(&self) -> usize {
        self.ticks.borrow().len()
    }
}

/// Scoped tick registration; dropping it uninstalls the tick
pub struct TickHandle {
    key: TickKey,
    ticks: Weak<RefCell<SlotMap<TickKey, TickFn>>>,
}

impl Drop for TickHandle {
    fn drop(&mut self) {
        if let Some(ticks) = self.ticks.upgrade() {
            ticks.borrow_mut().remove(self.key);
            log::debug!("Unregistered frame tick {:?}", self.key);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idle_gate_grants_no_frames() {
        let scheduler = FrameScheduler::new(RenderGate::new());
        assert!(!scheduler.run_frame(0.016));
    }

    #[test]
    fn one_shot_demand_grants_exactly_one_frame() {
        let scheduler = FrameScheduler::new(RenderGate::new());
        scheduler.gate().request_frame();
        assert!(scheduler.run_frame(0.016));
        assert!(!scheduler.run_frame(0.016));
    }

    #[test]
    fn continuous_hold_grants_frames_until_dropped() {
        let scheduler = FrameScheduler::new(RenderGate::new());
        let hold = scheduler.gate().hold_continuous();
        assert!(scheduler.run_frame(0.016));
        assert!(scheduler.run_frame(0.016));
        drop(hold);
        assert!(!scheduler.run_frame(0.016));
    }

    #[test]
    fn animating_tick_rearms_the_gate() {
        let scheduler = FrameScheduler::new(RenderGate::new());
        let mut remaining = 3;
        let _tick = scheduler.register_tick(move |_| {
            remaining -= 1;
            if remaining > 0 {
                TickOutcome::Animating
            } else {
                TickOutcome::Settled
            }
        });

        scheduler.gate().request_frame();
        assert!(scheduler.run_frame(0.016)); // tick 1, still animating
        assert!(scheduler.run_frame(0.016)); // tick 2, still animating
        assert!(scheduler.run_frame(0.016)); // tick 3, settles
        assert!(!scheduler.run_frame(0.016)); // gate idle again
    }

    #[test]
    fn dropping_tick_handle_unregisters_it() {
        let scheduler = FrameScheduler::new(RenderGate::new());
        let handle = scheduler.register_tick(|_| TickOutcome::Settled);
        assert_eq!(scheduler.tick_count(), 1);
        drop(handle);
        assert_eq!(scheduler.tick_count(), 0);
    }

    #[test]
    fn ticks_run_on_every_granted_frame_even_when_idle() {
        let scheduler = FrameScheduler::new(RenderGate::new());
        let runs = Rc::new(RefCell::new(0));
        let counter = Rc::clone(&runs);
        let _tick = scheduler.register_tick(move |_| {
            *counter.borrow_mut() += 1;
            TickOutcome::Settled
        });

        let hold = scheduler.gate().hold_continuous();
        scheduler.run_frame(0.016);
        scheduler.run_frame(0.016);
        drop(hold);
        scheduler.run_frame(0.016);
        assert_eq!(*runs.borrow(), 2);
    }
}

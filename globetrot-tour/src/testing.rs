//! In-memory doubles for the platform seams plus a virtual clock.
//!
//! Used by unit tests, integration tests and the scenario tester to drive the
//! tour without a browser.
use chrono::NaiveDate;
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use crate::camera::{CameraError, CameraTarget, MapCamera, MapLayer};
use crate::geo::Coordinate;
use crate::location::Location;
use crate::markers::{ClickHandler, MarkerHandle};
use crate::tour::{Scheduler, TimerKind, TimerTicket};

/// Bare location at the given position, for building fixtures.
#[must_use]
pub fn location_at(slug: &str, lon: f64, lat: f64) -> Location {
    Location {
        slug: slug.to_string(),
        city: slug.to_string(),
        country: "Testland".to_string(),
        coordinates: Coordinate::new(lon, lat),
        cover_image: String::new(),
        description: String::new(),
        date: NaiveDate::default(),
        distance_from_home_km: 0.0,
    }
}

#[derive(Debug, Default)]
struct ClockState {
    now_ms: u64,
    seq: u64,
    // (due, insertion order, ticket)
    pending: Vec<(u64, u64, TimerTicket)>,
    cancelled: usize,
}

/// Scheduler over a virtual millisecond clock. Clones share one clock, so a
/// test keeps a handle while the engine owns another.
#[derive(Debug, Clone, Default)]
pub struct ManualScheduler {
    inner: Rc<RefCell<ClockState>>,
}

impl ManualScheduler {
    #[must_use]
    pub fn now_ms(&self) -> u64 {
        self.inner.borrow().now_ms
    }

    /// Pending timers as `(due_ms, ticket)`, soonest first.
    #[must_use]
    pub fn pending(&self) -> Vec<(u64, TimerTicket)> {
        let mut pending = self.inner.borrow().pending.clone();
        pending.sort_by_key(|(due, seq, _)| (*due, *seq));
        pending
            .into_iter()
            .map(|(due, _, ticket)| (due, ticket))
            .collect()
    }

    #[must_use]
    pub fn next_due_ms(&self) -> Option<u64> {
        self.inner.borrow().pending.iter().map(|(due, ..)| *due).min()
    }

    /// How many pending timers have been cancelled so far.
    #[must_use]
    pub fn cancelled(&self) -> usize {
        self.inner.borrow().cancelled
    }

    /// Remove and return the earliest timer due at or before `deadline`,
    /// moving the clock to its due time.
    pub fn pop_due(&self, deadline: u64) -> Option<TimerTicket> {
        let mut state = self.inner.borrow_mut();
        let idx = state
            .pending
            .iter()
            .enumerate()
            .filter(|(_, (due, ..))| *due <= deadline)
            .min_by_key(|(_, (due, seq, _))| (*due, *seq))
            .map(|(idx, _)| idx)?;
        let (due, _, ticket) = state.pending.remove(idx);
        state.now_ms = state.now_ms.max(due);
        Some(ticket)
    }

    /// Advance the clock by `ms`, firing every timer that comes due on the
    /// way, including ones scheduled by earlier fires. Returns the count fired.
    pub fn advance_by(&self, ms: u64, mut fire: impl FnMut(TimerTicket)) -> usize {
        let deadline = self.now_ms() + ms;
        let mut fired = 0;
        while let Some(ticket) = self.pop_due(deadline) {
            fire(ticket);
            fired += 1;
        }
        self.inner.borrow_mut().now_ms = deadline;
        fired
    }

    /// Jump straight to the next pending timer and fire it.
    pub fn fire_next(&self, fire: impl FnOnce(TimerTicket)) -> Option<TimerTicket> {
        let due = self.next_due_ms()?;
        let ticket = self.pop_due(due)?;
        fire(ticket);
        Some(ticket)
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&mut self, ticket: TimerTicket, delay: Duration) {
        let mut state = self.inner.borrow_mut();
        let due = state.now_ms + u64::try_from(delay.as_millis()).unwrap_or(u64::MAX);
        state.seq += 1;
        let seq = state.seq;
        state.pending.push((due, seq, ticket));
    }

    fn cancel(&mut self, kind: TimerKind) {
        let mut state = self.inner.borrow_mut();
        let before = state.pending.len();
        state.pending.retain(|(_, _, ticket)| ticket.kind != kind);
        state.cancelled += before - state.pending.len();
    }
}

/// One recorded camera command.
#[derive(Debug, Clone, PartialEq)]
pub enum CameraCall {
    Fly {
        target: CameraTarget,
        duration: Duration,
    },
    Layer(MapLayer),
}

#[derive(Debug, Default)]
struct CameraLog {
    calls: Vec<CameraCall>,
    fail_all: bool,
}

/// Camera that records commands and can be told to fail them.
#[derive(Debug, Clone)]
pub struct RecordingCamera {
    overview: CameraTarget,
    log: Rc<RefCell<CameraLog>>,
}

impl RecordingCamera {
    #[must_use]
    pub fn new(overview: CameraTarget) -> Self {
        Self {
            overview,
            log: Rc::default(),
        }
    }

    /// Make every subsequent flight fail as if the surface were gone.
    pub fn fail_flights(&self, fail: bool) {
        self.log.borrow_mut().fail_all = fail;
    }

    #[must_use]
    pub fn calls(&self) -> Vec<CameraCall> {
        self.log.borrow().calls.clone()
    }

    /// Successful flights only, in issue order.
    #[must_use]
    pub fn flights(&self) -> Vec<(CameraTarget, Duration)> {
        self.log
            .borrow()
            .calls
            .iter()
            .filter_map(|call| match call {
                CameraCall::Fly { target, duration } => Some((*target, *duration)),
                CameraCall::Layer(_) => None,
            })
            .collect()
    }

    #[must_use]
    pub fn last_flight(&self) -> Option<(CameraTarget, Duration)> {
        self.flights().last().copied()
    }
}

impl MapCamera for RecordingCamera {
    fn fly_to(&mut self, target: CameraTarget, duration: Duration) -> Result<(), CameraError> {
        let mut log = self.log.borrow_mut();
        if log.fail_all {
            return Err(CameraError::Unavailable);
        }
        if !target.center.is_valid() {
            return Err(CameraError::InvalidCoordinate(target.center));
        }
        log.calls.push(CameraCall::Fly { target, duration });
        Ok(())
    }

    fn overview_target(&self) -> CameraTarget {
        self.overview
    }

    fn set_layer(&mut self, layer: MapLayer) -> Result<(), CameraError> {
        self.log.borrow_mut().calls.push(CameraCall::Layer(layer));
        Ok(())
    }
}

#[derive(Default)]
struct MarkerState {
    active: bool,
    handler: Option<ClickHandler>,
    handler_swaps: usize,
}

/// Marker handle whose state stays observable after it is boxed into a
/// [`crate::markers::MarkerSync`].
#[derive(Clone, Default)]
pub struct RecordingMarker {
    state: Rc<RefCell<MarkerState>>,
}

impl RecordingMarker {
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.state.borrow().active
    }

    /// Simulate a click with whatever handler is bound right now.
    pub fn click(&self) {
        let handler = self.state.borrow().handler.clone();
        if let Some(handler) = handler {
            handler();
        }
    }

    #[must_use]
    pub fn handler_swaps(&self) -> usize {
        self.state.borrow().handler_swaps
    }
}

impl MarkerHandle for RecordingMarker {
    fn set_active(&mut self, active: bool) {
        self.state.borrow_mut().active = active;
    }

    fn set_click_handler(&mut self, handler: ClickHandler) {
        let mut state = self.state.borrow_mut();
        state.handler = Some(handler);
        state.handler_swaps += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tour::TourPhase;

    fn ticket(kind: TimerKind, generation: u64) -> TimerTicket {
        TimerTicket {
            kind,
            generation,
            expected_phase: TourPhase::Overview,
        }
    }

    #[test]
    fn advance_fires_in_due_order() {
        let mut clock = ManualScheduler::default();
        clock.schedule(ticket(TimerKind::Idle, 1), Duration::from_millis(300));
        clock.schedule(ticket(TimerKind::Cycle, 2), Duration::from_millis(100));
        let mut seen = Vec::new();
        let fired = clock.advance_by(250, |t| seen.push(t.generation));
        assert_eq!(fired, 1);
        assert_eq!(seen, [2]);
        assert_eq!(clock.now_ms(), 250);
        assert_eq!(clock.next_due_ms(), Some(300));
    }

    #[test]
    fn cancel_drops_only_that_kind() {
        let mut clock = ManualScheduler::default();
        clock.schedule(ticket(TimerKind::Idle, 1), Duration::from_millis(10));
        clock.schedule(ticket(TimerKind::Cycle, 2), Duration::from_millis(10));
        clock.cancel(TimerKind::Idle);
        assert_eq!(clock.pending().len(), 1);
        assert_eq!(clock.cancelled(), 1);
    }
}

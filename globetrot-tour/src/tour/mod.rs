//! Guided tour state machine.
//!
//! Per stop the tour runs `zooming-in → showing → zooming-mid → transitioning`,
//! then moves to the next stop or, after the last, pulls back to `overview`
//! and starts over. Every transition is driven by a single cycle timer owned
//! by [`TourEngine`]; see [`timers`] for how stale timers are rejected.

mod interrupt;
mod phase;
mod snapshot;
pub mod timers;

pub use interrupt::InteractionKind;
pub use phase::TourPhase;
pub use snapshot::TourSnapshot;
pub use timers::{Scheduler, TimerKind, TimerTicket};

use std::time::Duration;
use thiserror::Error;

use crate::camera::{CameraTarget, MapCamera, MapLayer};
use crate::config::TourConfig;
use crate::location::Location;
use crate::markers::MarkerSync;
use crate::order::TourOrder;
use crate::{Navigator, story_path};
use timers::TimerSlots;

/// Errors surfaced to callers of the engine API.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TourError {
    #[error("no tour stop named `{0}`")]
    UnknownLocation(String),
    #[error("tour has no stops")]
    EmptyTour,
    #[error("tour view is not mounted")]
    NotMounted,
}

/// Mutable tour state, owned exclusively by the engine.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TourState {
    pub phase: TourPhase,
    pub current_index: Option<usize>,
    /// Index into the tour order of the location whose card is open.
    pub selected: Option<usize>,
    pub paused: bool,
    pub user_interacting: bool,
    pub started: bool,
    pub layer: MapLayer,
}

type Observer = Box<dyn FnMut(&TourSnapshot)>;

/// Drives the tour over a [`MapCamera`] using timers from a [`Scheduler`].
pub struct TourEngine<C, S>
where
    C: MapCamera,
    S: Scheduler,
{
    order: TourOrder,
    config: TourConfig,
    camera: C,
    scheduler: S,
    markers: MarkerSync,
    observer: Option<Observer>,
    state: TourState,
    timers: TimerSlots,
    /// An engine flight is in the air. MapLibre stops the previous flight
    /// when a new one starts, so one flag covers them all.
    camera_moving: bool,
    restyling: bool,
    mounted: bool,
}

impl<C, S> TourEngine<C, S>
where
    C: MapCamera,
    S: Scheduler,
{
    #[must_use]
    pub fn new(order: TourOrder, config: TourConfig, camera: C, scheduler: S) -> Self {
        Self {
            order,
            config,
            camera,
            scheduler,
            markers: MarkerSync::default(),
            observer: None,
            state: TourState::default(),
            timers: TimerSlots::default(),
            camera_moving: false,
            restyling: false,
            mounted: false,
        }
    }

    /// Attach the persistent marker handles. Call before [`Self::mount`].
    #[must_use]
    pub fn with_markers(mut self, markers: MarkerSync) -> Self {
        self.set_markers(markers);
        self
    }

    /// Replace the marker handles, e.g. once the map surface has loaded.
    pub fn set_markers(&mut self, markers: MarkerSync) {
        self.markers = markers;
        if self.mounted {
            let snapshot = self.snapshot();
            self.markers.sync(&snapshot);
        }
    }

    /// Receive a snapshot after every state change.
    #[must_use]
    pub fn with_observer(mut self, observer: impl FnMut(&TourSnapshot) + 'static) -> Self {
        self.observer = Some(Box::new(observer));
        self
    }

    /// Bring the view up in `overview` and schedule the automatic start.
    pub fn mount(&mut self) {
        if self.mounted {
            return;
        }
        self.mounted = true;
        self.state = TourState {
            layer: self.state.layer,
            ..TourState::default()
        };
        if self.order.is_empty() {
            log::info!("tour has no stops; staying on the overview");
        } else {
            self.arm(TimerKind::Cycle, self.config.auto_start_delay());
        }
        self.publish();
    }

    /// Tear the view down. Pending timers are cancelled and every later call
    /// into the engine is ignored.
    pub fn unmount(&mut self) {
        if !self.mounted {
            return;
        }
        self.cancel_timer(TimerKind::Cycle);
        self.cancel_timer(TimerKind::Idle);
        self.mounted = false;
        self.camera_moving = false;
        self.restyling = false;
        self.markers.clear();
        log::debug!("tour unmounted");
    }

    #[must_use]
    pub const fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Start touring now instead of waiting for the auto-start delay.
    ///
    /// # Errors
    ///
    /// Returns an error when the view is unmounted or there is nothing to tour.
    pub fn start(&mut self) -> Result<(), TourError> {
        self.ensure_mounted()?;
        if self.order.is_empty() {
            return Err(TourError::EmptyTour);
        }
        self.state.paused = false;
        self.begin_visit(0);
        Ok(())
    }

    /// Entry point for every fired timer.
    pub fn on_timer_fire(&mut self, ticket: TimerTicket) {
        if !self.mounted {
            log::debug!("ignoring {:?} timer after teardown", ticket.kind);
            return;
        }
        if !self.timers.claim(ticket) {
            log::debug!(
                "ignoring stale {:?} timer #{} armed in {}",
                ticket.kind,
                ticket.generation,
                ticket.expected_phase
            );
            return;
        }
        match ticket.kind {
            TimerKind::Idle => self.finish_idle(),
            TimerKind::Cycle => {
                if self.state.paused {
                    log::debug!("cycle timer fired while paused; holding");
                    return;
                }
                if self.state.phase != ticket.expected_phase {
                    log::debug!(
                        "cycle timer expected {} but tour is in {}",
                        ticket.expected_phase,
                        self.state.phase
                    );
                    return;
                }
                self.advance();
            }
        }
    }

    /// Jump straight to `slug`, show its card and hold there.
    ///
    /// # Errors
    ///
    /// Returns an error if the view is unmounted or `slug` is not on the tour.
    pub fn select_location(&mut self, slug: &str) -> Result<usize, TourError> {
        self.ensure_mounted()?;
        let Some(index) = self.order.position(slug) else {
            log::warn!("manual selection of unknown location `{slug}`");
            return Err(TourError::UnknownLocation(slug.to_string()));
        };
        self.cancel_timer(TimerKind::Cycle);
        self.cancel_timer(TimerKind::Idle);
        self.state.user_interacting = false;
        self.state.paused = true;
        self.state.started = true;
        self.state.current_index = Some(index);
        self.state.phase = TourPhase::Showing;
        self.state.selected = Some(index);
        if let Some(target) = self.stop_target(index, self.config.close_zoom) {
            self.fly(target, self.config.manual_flight());
        }
        log::debug!("manual selection of `{slug}` (stop {index})");
        self.publish();
        Ok(index)
    }

    pub fn pause(&mut self) {
        if !self.mounted || self.state.paused {
            return;
        }
        self.cancel_timer(TimerKind::Cycle);
        self.state.paused = true;
        self.publish();
    }

    /// Continue from the current phase and stop with fresh timers.
    pub fn resume(&mut self) {
        if !self.mounted {
            return;
        }
        if self.state.user_interacting {
            self.cancel_timer(TimerKind::Idle);
            self.state.user_interacting = false;
        }
        if !self.state.paused {
            self.publish();
            return;
        }
        self.state.paused = false;
        self.rearm();
    }

    pub fn toggle_pause(&mut self) {
        if self.state.paused {
            self.resume();
        } else {
            if self.state.user_interacting {
                self.cancel_timer(TimerKind::Idle);
                self.state.user_interacting = false;
            }
            self.pause();
        }
    }

    /// Dismiss the detail card and hold the tour.
    pub fn close_card(&mut self) {
        if !self.mounted {
            return;
        }
        self.cancel_timer(TimerKind::Cycle);
        self.state.selected = None;
        self.state.paused = true;
        self.publish();
    }

    /// Open the story behind the card that is currently shown.
    pub fn read_more(&self, navigator: &dyn Navigator) -> bool {
        let Some(location) = self.selected_location() else {
            return false;
        };
        log::debug!("navigating to {}", story_path(&location.slug));
        navigator.navigate_to_story(&location.slug);
        true
    }

    /// Switch between street and satellite imagery.
    pub fn toggle_layer(&mut self) {
        if !self.mounted {
            return;
        }
        let layer = self.state.layer.toggled();
        self.state.layer = layer;
        match self.camera.set_layer(layer) {
            Ok(()) => self.restyling = true,
            Err(err) => log::warn!("could not switch map layer to {layer:?}: {err}"),
        }
        self.publish();
    }

    /// The surface finished loading a new style and re-attached its markers.
    pub fn on_style_loaded(&mut self) {
        self.restyling = false;
    }

    /// The surface reports that camera motion has ended. Superseded flights
    /// may never report, so any settle clears the flag.
    pub fn on_movement_settled(&mut self) {
        self.camera_moving = false;
    }

    /// Whether camera motion right now was issued by the engine rather than
    /// the visitor.
    #[must_use]
    pub const fn is_programmatic_motion(&self) -> bool {
        self.camera_moving || self.restyling
    }

    /// An engine flight is under way and has not been reported settled.
    #[must_use]
    pub const fn camera_moving(&self) -> bool {
        self.camera_moving
    }

    #[must_use]
    pub const fn state(&self) -> &TourState {
        &self.state
    }

    #[must_use]
    pub const fn order(&self) -> &TourOrder {
        &self.order
    }

    #[must_use]
    pub const fn config(&self) -> &TourConfig {
        &self.config
    }

    #[must_use]
    pub const fn camera(&self) -> &C {
        &self.camera
    }

    #[must_use]
    pub const fn markers(&self) -> &MarkerSync {
        &self.markers
    }

    #[must_use]
    pub fn has_pending(&self, kind: TimerKind) -> bool {
        self.timers.is_armed(kind)
    }

    #[must_use]
    pub fn selected_location(&self) -> Option<&Location> {
        self.state.selected.and_then(|idx| self.order.get(idx))
    }

    #[must_use]
    pub fn snapshot(&self) -> TourSnapshot {
        TourSnapshot {
            phase: self.state.phase,
            current_index: self.state.current_index,
            target: self
                .state
                .current_index
                .and_then(|idx| self.order.get(idx))
                .cloned(),
            selected: self.selected_location().cloned(),
            paused: self.state.paused,
            user_interacting: self.state.user_interacting,
            started: self.state.started,
            layer: self.state.layer,
            tour_len: self.order.len(),
        }
    }

    fn advance(&mut self) {
        match self.state.phase {
            TourPhase::Overview => self.begin_visit(0),
            TourPhase::ZoomingIn => self.enter_showing(),
            TourPhase::Showing => self.enter_zooming_mid(),
            TourPhase::ZoomingMid | TourPhase::Transitioning => self.enter_transitioning(),
        }
    }

    fn begin_visit(&mut self, index: usize) {
        if index >= self.order.len() {
            return;
        }
        self.state.started = true;
        self.state.current_index = Some(index);
        self.enter_zooming_in();
    }

    fn enter_zooming_in(&mut self) {
        self.set_phase(TourPhase::ZoomingIn);
        self.state.selected = None;
        if let Some(target) = self.current_target(self.config.close_zoom) {
            self.fly(target, self.config.fly_duration());
        }
        self.arm(TimerKind::Cycle, self.config.zoom_in_delay());
        self.publish();
    }

    fn enter_showing(&mut self) {
        self.set_phase(TourPhase::Showing);
        self.state.selected = self.state.current_index;
        self.arm(TimerKind::Cycle, self.config.show_duration());
        self.publish();
    }

    fn enter_zooming_mid(&mut self) {
        self.set_phase(TourPhase::ZoomingMid);
        self.state.selected = None;
        if let Some(target) = self.current_target(self.config.mid_zoom) {
            self.fly(target, self.config.fly_mid_duration());
        }
        self.arm(TimerKind::Cycle, self.config.zoom_mid_delay());
        self.publish();
    }

    fn enter_transitioning(&mut self) {
        self.set_phase(TourPhase::Transitioning);
        self.publish();
        let next = self
            .state
            .current_index
            .map_or(0, |idx| (idx + 1) % self.order.len().max(1));
        if next == 0 {
            self.enter_overview();
        } else {
            self.begin_visit(next);
        }
    }

    fn enter_overview(&mut self) {
        self.set_phase(TourPhase::Overview);
        self.state.selected = None;
        let overview = self.camera.overview_target();
        self.fly(overview, self.config.fly_mid_duration());
        self.arm(TimerKind::Cycle, self.config.overview_pause());
        self.publish();
    }

    /// Re-enter the current phase with fresh timers after a pause.
    fn rearm(&mut self) {
        if !self.mounted || self.state.paused || self.order.is_empty() {
            self.publish();
            return;
        }
        if !self.state.started {
            self.arm(TimerKind::Cycle, self.config.auto_start_delay());
            self.publish();
            return;
        }
        let Some(index) = self.state.current_index else {
            self.begin_visit(0);
            return;
        };
        match self.state.phase {
            TourPhase::Overview => self.enter_overview(),
            TourPhase::ZoomingIn => self.enter_zooming_in(),
            TourPhase::Showing => {
                if let Some(target) = self.stop_target(index, self.config.close_zoom) {
                    self.fly(target, self.config.manual_flight());
                }
                self.enter_showing();
            }
            TourPhase::ZoomingMid => self.enter_zooming_mid(),
            TourPhase::Transitioning => self.enter_transitioning(),
        }
    }

    fn set_phase(&mut self, phase: TourPhase) {
        log::debug!(
            "tour phase {} -> {} (stop {:?})",
            self.state.phase,
            phase,
            self.state.current_index
        );
        self.state.phase = phase;
    }

    fn current_target(&self, zoom: f64) -> Option<CameraTarget> {
        self.state
            .current_index
            .and_then(|idx| self.stop_target(idx, zoom))
    }

    fn stop_target(&self, index: usize, zoom: f64) -> Option<CameraTarget> {
        self.order
            .get(index)
            .map(|loc| CameraTarget::new(loc.coordinates, zoom))
    }

    fn fly(&mut self, target: CameraTarget, duration: Duration) {
        match self.camera.fly_to(target, duration) {
            Ok(()) => self.camera_moving = true,
            Err(err) => log::warn!("camera flight to {target} failed: {err}; continuing tour"),
        }
    }

    fn arm(&mut self, kind: TimerKind, delay: Duration) {
        self.cancel_timer(kind);
        let ticket = self.timers.arm(kind, self.state.phase);
        self.scheduler.schedule(ticket, delay);
    }

    fn cancel_timer(&mut self, kind: TimerKind) {
        if self.timers.disarm(kind) {
            self.scheduler.cancel(kind);
        }
    }

    const fn ensure_mounted(&self) -> Result<(), TourError> {
        if self.mounted {
            Ok(())
        } else {
            Err(TourError::NotMounted)
        }
    }

    fn publish(&mut self) {
        if !self.mounted {
            return;
        }
        let snapshot = self.snapshot();
        self.markers.sync(&snapshot);
        if let Some(observer) = self.observer.as_mut() {
            observer(&snapshot);
        }
    }
}

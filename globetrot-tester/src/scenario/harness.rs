use anyhow::{Result, ensure};
use std::cell::RefCell;
use std::rc::Rc;

use globetrot_tour::testing::{ManualScheduler, RecordingCamera, RecordingMarker};
use globetrot_tour::{
    MarkerSync, TimerKind, TourConfig, TourEngine, TourOrder, TourPhase, TourSnapshot,
};

pub type SimEngine = TourEngine<RecordingCamera, ManualScheduler>;

/// A mounted engine on a virtual clock, with every published snapshot kept.
pub struct Harness {
    pub engine: SimEngine,
    pub clock: ManualScheduler,
    pub camera: RecordingCamera,
    pub markers: Vec<(String, RecordingMarker)>,
    pub trace: Rc<RefCell<Vec<TourSnapshot>>>,
}

impl Harness {
    pub fn mount(order: &TourOrder, config: &TourConfig) -> Self {
        let clock = ManualScheduler::default();
        let camera = RecordingCamera::new(config.overview);
        let trace = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&trace);

        let mut sync = MarkerSync::default();
        let mut markers = Vec::with_capacity(order.len());
        for stop in order.iter() {
            let marker = RecordingMarker::default();
            sync.register(stop.slug.clone(), Box::new(marker.clone()));
            markers.push((stop.slug.clone(), marker));
        }

        let mut engine = TourEngine::new(order.clone(), config.clone(), camera.clone(), clock.clone())
            .with_markers(sync)
            .with_observer(move |snap| sink.borrow_mut().push(snap.clone()));
        engine.mount();
        Self {
            engine,
            clock,
            camera,
            markers,
            trace,
        }
    }

    /// Advance virtual time, delivering due timers to the engine.
    pub fn run_for(&mut self, ms: u64) -> usize {
        let engine = &mut self.engine;
        self.clock.advance_by(ms, |ticket| engine.on_timer_fire(ticket))
    }

    /// Deliver the map's single `moveend` for the flight in the air.
    pub fn settle(&mut self) {
        if self.engine.camera_moving() {
            self.engine.on_movement_settled();
        }
    }

    pub fn publish_count(&self) -> usize {
        self.trace.borrow().len()
    }

    /// Distinct `(phase, stop)` steps in publish order.
    pub fn phase_steps(&self) -> Vec<(TourPhase, Option<usize>)> {
        let mut steps: Vec<(TourPhase, Option<usize>)> = Vec::new();
        for snap in self.trace.borrow().iter() {
            let step = (snap.phase, snap.current_index);
            if steps.last() != Some(&step) {
                steps.push(step);
            }
        }
        steps
    }

    pub fn active_markers(&self) -> Vec<String> {
        self.markers
            .iter()
            .filter(|(_, marker)| marker.is_active())
            .map(|(slug, _)| slug.clone())
            .collect()
    }

    /// Invariants that hold between any two external events.
    pub fn check_invariants(&self) -> Result<()> {
        let state = self.engine.state();
        let pending = self.clock.pending();
        for kind in [TimerKind::Cycle, TimerKind::Idle] {
            let count = pending.iter().filter(|(_, t)| t.kind == kind).count();
            ensure!(count <= 1, "{count} pending {kind:?} timers");
            ensure!(
                (count == 1) == self.engine.has_pending(kind),
                "{kind:?} slot and scheduler disagree"
            );
        }
        ensure!(
            !(state.paused && self.engine.has_pending(TimerKind::Cycle)),
            "cycle timer armed while paused in {}",
            state.phase
        );
        if state.user_interacting {
            ensure!(state.paused, "interacting without pause");
            ensure!(
                self.engine.has_pending(TimerKind::Idle),
                "interacting without idle countdown"
            );
        }
        if state.selected.is_some() {
            ensure!(
                state.phase == TourPhase::Showing,
                "card open during {}",
                state.phase
            );
        }
        let active = self.active_markers();
        ensure!(active.len() <= 1, "several active markers: {active:?}");
        Ok(())
    }
}

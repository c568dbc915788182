use anyhow::{Context, Result, ensure};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use globetrot_tour::{InteractionKind, TourError, TourPhase};

use super::{Harness, ScenarioCtx};

/// Unmount at a random moment and confirm nothing changes afterwards, even
/// when the stale timers are delivered by hand.
pub fn teardown(ctx: &ScenarioCtx) -> Result<()> {
    let mut rng = ChaCha8Rng::seed_from_u64(ctx.seed);
    let mut h = Harness::mount(&ctx.order, &ctx.config);
    h.run_for(rng.gen_range(0..=ctx.auto_start_ms() + ctx.lap_ms()));
    h.settle();
    if rng.gen_bool(0.5) {
        h.engine.on_user_interaction(InteractionKind::DragStart);
    }

    let outstanding = h.clock.pending();
    h.engine.unmount();
    ensure!(h.clock.pending().is_empty(), "timers survived unmount");

    let state = h.engine.state().clone();
    let published = h.publish_count();
    let flights = h.camera.calls().len();

    for (_, ticket) in outstanding {
        h.engine.on_timer_fire(ticket);
    }
    h.run_for(ctx.lap_ms() * 2 + 60_000);
    h.engine.on_user_interaction(InteractionKind::WheelScroll);
    h.engine.resume();
    h.engine.toggle_pause();
    h.engine.toggle_layer();
    h.engine.close_card();
    if let Some(stop) = ctx.order.get(0) {
        ensure!(
            h.engine.select_location(&stop.slug) == Err(TourError::NotMounted),
            "selection accepted after unmount"
        );
    }

    ensure!(h.engine.state() == &state, "state mutated after unmount");
    ensure!(h.publish_count() == published, "published after unmount");
    ensure!(h.camera.calls().len() == flights, "camera driven after unmount");
    Ok(())
}

#[derive(Debug, Clone, Copy)]
enum Event {
    Advance,
    Gesture,
    Settle,
    Select,
    Pause,
    Resume,
    TogglePause,
    CloseCard,
    ToggleLayer,
    StyleLoaded,
}

const EVENTS: [Event; 10] = [
    Event::Advance,
    Event::Gesture,
    Event::Settle,
    Event::Select,
    Event::Pause,
    Event::Resume,
    Event::TogglePause,
    Event::CloseCard,
    Event::ToggleLayer,
    Event::StyleLoaded,
];

/// Throw a seeded stream of UI and map events at the engine, checking its
/// invariants after every one.
pub fn interaction_storm(ctx: &ScenarioCtx) -> Result<()> {
    let mut rng = ChaCha8Rng::seed_from_u64(ctx.seed);
    let mut h = Harness::mount(&ctx.order, &ctx.config);
    let gestures = [
        InteractionKind::DragStart,
        InteractionKind::WheelScroll,
        InteractionKind::TouchStart,
    ];

    for step in 0..400 {
        let Some(event) = EVENTS.choose(&mut rng).copied() else {
            break;
        };
        match event {
            Event::Advance => {
                h.run_for(rng.gen_range(1..=u64::from(ctx.config.idle_resume_delay_ms)));
            }
            Event::Gesture => {
                if let Some(kind) = gestures.choose(&mut rng) {
                    h.engine.on_user_interaction(*kind);
                }
            }
            Event::Settle => h.engine.on_movement_settled(),
            Event::Select => {
                if let Some(stop) = ctx.order.stops().choose(&mut rng) {
                    h.engine.select_location(&stop.slug)?;
                }
            }
            Event::Pause => h.engine.pause(),
            Event::Resume => h.engine.resume(),
            Event::TogglePause => h.engine.toggle_pause(),
            Event::CloseCard => h.engine.close_card(),
            Event::ToggleLayer => h.engine.toggle_layer(),
            Event::StyleLoaded => h.engine.on_style_loaded(),
        }
        h.check_invariants()
            .with_context(|| format!("after step {step} ({event:?})"))?;
    }

    if ctx.verbose {
        log::info!(
            "interaction-storm: {} publishes, {} camera calls",
            h.publish_count(),
            h.camera.calls().len()
        );
    }
    Ok(())
}

/// Every flight fails; the timers alone must still carry the tour around.
pub fn camera_failure(ctx: &ScenarioCtx) -> Result<()> {
    if ctx.order.is_empty() {
        return Ok(());
    }
    let mut h = Harness::mount(&ctx.order, &ctx.config);
    h.camera.fail_flights(true);
    h.run_for(ctx.auto_start_ms() + ctx.lap_ms());

    ensure!(h.camera.flights().is_empty(), "a flight got through");
    ensure!(
        !h.engine.camera_moving(),
        "failed flights counted as motion"
    );
    let state = h.engine.state();
    ensure!(
        state.phase == TourPhase::Overview,
        "lap stalled in {} at {:?}",
        state.phase,
        state.current_index
    );

    h.camera.fail_flights(false);
    h.run_for(ctx.auto_start_ms() + u64::from(ctx.config.overview_pause_ms));
    ensure!(!h.camera.flights().is_empty(), "camera did not recover");
    h.check_invariants()
}

use anyhow::{Result, bail, ensure};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use globetrot_tour::{InteractionKind, TimerKind, TourPhase};

use super::{Harness, ScenarioCtx, millis};

const HOLD_MS: u64 = 120_000;

/// Select every stop in turn from a random point mid-cycle.
pub fn manual_selection(ctx: &ScenarioCtx) -> Result<()> {
    let mut rng = ChaCha8Rng::seed_from_u64(ctx.seed);
    for (target, stop) in ctx.order.iter().enumerate() {
        let mut h = Harness::mount(&ctx.order, &ctx.config);
        h.run_for(ctx.auto_start_ms() + rng.gen_range(1..=ctx.lap_ms().max(1)));
        let before = h.engine.state().current_index;

        let index = h.engine.select_location(&stop.slug)?;
        ensure!(index == target, "`{}` resolved to stop {index}", stop.slug);
        let held = h.engine.state().clone();
        ensure!(held.phase == TourPhase::Showing, "selection left {}", held.phase);
        ensure!(held.current_index == Some(target), "index not moved to {target}");
        ensure!(held.paused && held.started, "selection did not hold the tour");
        ensure!(h.clock.pending().is_empty(), "timers survived selection from {before:?}");
        ensure!(
            h.active_markers() == [stop.slug.clone()],
            "selected marker not highlighted"
        );

        h.run_for(HOLD_MS);
        ensure!(h.engine.state() == &held, "tour moved after selecting `{}`", stop.slug);
        h.check_invariants()?;
    }

    let mut h = Harness::mount(&ctx.order, &ctx.config);
    let published = h.publish_count();
    if h.engine.select_location("no-such-place").is_ok() {
        bail!("unknown slug was accepted");
    }
    ensure!(h.publish_count() == published, "unknown slug changed state");
    Ok(())
}

/// Gestures pause the tour; only a full idle window resumes it.
pub fn idle_resume(ctx: &ScenarioCtx) -> Result<()> {
    if ctx.order.is_empty() {
        return Ok(());
    }
    let idle = millis(ctx.config.idle_resume_delay());
    let mut rng = ChaCha8Rng::seed_from_u64(ctx.seed);
    let mut h = Harness::mount(&ctx.order, &ctx.config);
    h.run_for(ctx.auto_start_ms() + rng.gen_range(1..=ctx.stop_ms()));
    h.settle();

    ensure!(
        h.engine.on_user_interaction(InteractionKind::DragStart),
        "drag was not taken as interaction"
    );
    let held_phase = h.engine.state().phase;

    // Keep poking the map just before each window would close.
    let pokes = rng.gen_range(1..=4);
    for _ in 0..pokes {
        h.run_for(idle - 1);
        ensure!(h.engine.state().user_interacting, "resumed before the idle window");
        h.settle();
        ensure!(
            h.engine.on_user_interaction(InteractionKind::WheelScroll),
            "wheel was not taken as interaction"
        );
        h.check_invariants()?;
    }

    h.run_for(idle - 1);
    ensure!(h.engine.state().paused, "resumed early");
    h.run_for(1);
    let state = h.engine.state();
    ensure!(
        !state.paused && !state.user_interacting,
        "idle window passed without resuming"
    );
    ensure!(state.phase == held_phase, "resume skipped out of {held_phase}");
    ensure!(h.engine.has_pending(TimerKind::Cycle), "no cycle timer after resume");

    // Engine-driven motion must not count as a gesture.
    h.run_for(ctx.stop_ms());
    if h.engine.is_programmatic_motion() {
        ensure!(
            !h.engine.on_user_interaction(InteractionKind::TouchStart),
            "flight mistaken for interaction"
        );
    }
    h.check_invariants()
}

/// Pause at random points; nothing may move until resumed.
pub fn pause_resume(ctx: &ScenarioCtx) -> Result<()> {
    if ctx.order.is_empty() {
        return Ok(());
    }
    let mut rng = ChaCha8Rng::seed_from_u64(ctx.seed);
    let mut h = Harness::mount(&ctx.order, &ctx.config);
    h.run_for(ctx.auto_start_ms());

    for _ in 0..8 {
        h.run_for(rng.gen_range(1..=ctx.stop_ms()));
        h.engine.pause();
        ensure!(
            !h.engine.has_pending(TimerKind::Cycle),
            "cycle timer survived pause"
        );
        let frozen = h.engine.snapshot();
        let published = h.publish_count();
        h.run_for(HOLD_MS);
        ensure!(h.engine.snapshot() == frozen, "state moved while paused");
        ensure!(h.publish_count() == published, "published while paused");

        h.engine.resume();
        let state = h.engine.state();
        ensure!(!state.paused, "resume left the tour paused");
        ensure!(
            state.phase == frozen.phase,
            "resume jumped from {} to {}",
            frozen.phase,
            state.phase
        );
        h.check_invariants()?;
    }

    h.engine.close_card();
    ensure!(h.engine.state().paused, "closing the card did not hold the tour");
    ensure!(h.engine.selected_location().is_none(), "card still open");
    h.check_invariants()
}

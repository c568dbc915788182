use anyhow::{Result, ensure};

use globetrot_tour::TourPhase;

use super::{Harness, ScenarioCtx, millis};

/// Run one lap past the auto-start and check the visiting sequence, the card
/// and the wrap back through the overview.
pub fn full_cycle(ctx: &ScenarioCtx) -> Result<()> {
    let mut h = Harness::mount(&ctx.order, &ctx.config);
    if ctx.order.is_empty() {
        h.run_for(60_000);
        ensure!(h.clock.pending().is_empty(), "empty tour armed a timer");
        return Ok(());
    }

    h.run_for(ctx.auto_start_ms() + ctx.lap_ms());
    let mut expected = vec![(TourPhase::Overview, None)];
    for idx in 0..ctx.order.len() {
        expected.push((TourPhase::ZoomingIn, Some(idx)));
        expected.push((TourPhase::Showing, Some(idx)));
        expected.push((TourPhase::ZoomingMid, Some(idx)));
        expected.push((TourPhase::Transitioning, Some(idx)));
    }
    expected.push((TourPhase::Overview, Some(ctx.order.len() - 1)));
    let steps = h.phase_steps();
    ensure!(
        steps == expected,
        "phase sequence diverged:\n  got      {steps:?}\n  expected {expected:?}"
    );

    for snap in h.trace.borrow().iter() {
        ensure!(
            snap.selected.is_some() == (snap.phase == TourPhase::Showing),
            "card state wrong during {}",
            snap.phase
        );
    }
    ensure!(
        h.active_markers().is_empty(),
        "marker still highlighted on the overview"
    );

    let overview = h.camera.last_flight();
    ensure!(
        overview.map(|(target, _)| target) == Some(ctx.config.overview),
        "lap did not end on the overview shot"
    );

    h.run_for(millis(ctx.config.overview_pause()));
    let state = h.engine.state();
    ensure!(
        state.phase == TourPhase::ZoomingIn && state.current_index == Some(0),
        "second lap did not begin at the first stop"
    );
    if ctx.verbose {
        log::info!("full-cycle: {} phase steps, {} publishes", steps.len(), h.publish_count());
    }
    h.check_invariants()
}

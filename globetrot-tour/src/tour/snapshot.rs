use serde::Serialize;

use super::TourPhase;
use crate::camera::MapLayer;
use crate::location::Location;

/// Read-only view of the tour handed to observers, markers and UI.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TourSnapshot {
    pub phase: TourPhase,
    pub current_index: Option<usize>,
    /// Location the tour is visiting, whether or not its card is open.
    pub target: Option<Location>,
    /// Location whose detail card is open.
    pub selected: Option<Location>,
    pub paused: bool,
    pub user_interacting: bool,
    pub started: bool,
    pub layer: MapLayer,
    pub tour_len: usize,
}

impl TourSnapshot {
    /// What a freshly mounted tour looks like, before the engine reports.
    #[must_use]
    pub fn initial(tour_len: usize) -> Self {
        Self {
            phase: TourPhase::Overview,
            current_index: None,
            target: None,
            selected: None,
            paused: false,
            user_interacting: false,
            started: false,
            layer: MapLayer::default(),
            tour_len,
        }
    }

    /// Marker to highlight: the open card first, then the live tour target.
    #[must_use]
    pub fn active_slug(&self) -> Option<&str> {
        if let Some(selected) = &self.selected {
            return Some(selected.slug.as_str());
        }
        if self.started && self.phase != TourPhase::Overview {
            return self.target.as_ref().map(|loc| loc.slug.as_str());
        }
        None
    }

    /// Tour progress bar fill, 0–100.
    #[must_use]
    pub fn progress_percent(&self) -> f64 {
        match (self.started, self.current_index) {
            (true, Some(index)) if self.tour_len > 0 => {
                let done = u32::try_from(index + 1).unwrap_or(u32::MAX);
                let total = u32::try_from(self.tour_len).unwrap_or(u32::MAX);
                f64::from(done) / f64::from(total) * 100.0
            }
            _ => 0.0,
        }
    }

    /// "3 / 6" style stop counter, once the tour has begun.
    #[must_use]
    pub fn counter_label(&self) -> Option<String> {
        match (self.started, self.current_index) {
            (true, Some(index)) => Some(format!("{} / {}", index + 1, self.tour_len)),
            _ => None,
        }
    }

    /// Whether the card's dwell countdown bar should animate.
    #[must_use]
    pub fn countdown_visible(&self) -> bool {
        self.selected.is_some() && self.phase == TourPhase::Showing && !self.paused
    }

    #[must_use]
    pub const fn exploring_hint_visible(&self) -> bool {
        self.user_interacting
    }

    #[must_use]
    pub const fn pause_label(&self) -> &'static str {
        if self.paused { "Resume" } else { "Pause" }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::location_at;

    fn base() -> TourSnapshot {
        TourSnapshot::initial(4)
    }

    #[test]
    fn nothing_active_before_start() {
        let snap = base();
        assert_eq!(snap.active_slug(), None);
        assert!(snap.progress_percent().abs() < f64::EPSILON);
        assert_eq!(snap.counter_label(), None);
    }

    #[test]
    fn target_is_active_while_touring() {
        let snap = TourSnapshot {
            phase: TourPhase::ZoomingIn,
            current_index: Some(1),
            target: Some(location_at("two", 1.0, 1.0)),
            started: true,
            ..base()
        };
        assert_eq!(snap.active_slug(), Some("two"));
        assert!((snap.progress_percent() - 50.0).abs() < 1e-9);
        assert_eq!(snap.counter_label().as_deref(), Some("2 / 4"));
    }

    #[test]
    fn overview_clears_highlight_but_keeps_counter() {
        let snap = TourSnapshot {
            phase: TourPhase::Overview,
            current_index: Some(3),
            target: Some(location_at("four", 1.0, 1.0)),
            started: true,
            ..base()
        };
        assert_eq!(snap.active_slug(), None);
        assert_eq!(snap.counter_label().as_deref(), Some("4 / 4"));
    }

    #[test]
    fn selection_wins_over_target() {
        let snap = TourSnapshot {
            phase: TourPhase::Showing,
            current_index: Some(0),
            target: Some(location_at("one", 1.0, 1.0)),
            selected: Some(location_at("picked", 2.0, 2.0)),
            started: true,
            ..base()
        };
        assert_eq!(snap.active_slug(), Some("picked"));
        assert!(snap.countdown_visible());
        let paused = TourSnapshot {
            paused: true,
            ..snap
        };
        assert!(!paused.countdown_visible());
        assert_eq!(paused.pause_label(), "Resume");
    }
}

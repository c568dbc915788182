//! Visitor takeover of the map and the idle auto-resume.
use super::{Scheduler, TimerKind, TourEngine};
use crate::camera::MapCamera;

/// Camera-affecting gestures the surface reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InteractionKind {
    DragStart,
    WheelScroll,
    TouchStart,
}

impl InteractionKind {
    /// Map a DOM or map-library event name onto a gesture.
    #[must_use]
    pub fn from_event_name(name: &str) -> Option<Self> {
        match name {
            "dragstart" | "mousedown" => Some(Self::DragStart),
            "wheel" => Some(Self::WheelScroll),
            "touchstart" => Some(Self::TouchStart),
            _ => None,
        }
    }
}

impl<C, S> TourEngine<C, S>
where
    C: MapCamera,
    S: Scheduler,
{
    /// The visitor grabbed the camera. Holds the tour, hides the card and
    /// restarts the idle countdown. Motion the engine caused itself is not an
    /// interaction; returns whether the gesture was taken.
    pub fn on_user_interaction(&mut self, kind: InteractionKind) -> bool {
        if !self.mounted {
            return false;
        }
        if self.is_programmatic_motion() {
            log::trace!("{kind:?} during programmatic motion; ignored");
            return false;
        }
        self.cancel_timer(TimerKind::Cycle);
        self.state.paused = true;
        self.state.user_interacting = true;
        self.state.selected = None;
        self.arm(TimerKind::Idle, self.config.idle_resume_delay());
        log::debug!("visitor took over the map ({kind:?})");
        self.publish();
        true
    }

    /// The idle window elapsed with no further gestures.
    pub(super) fn finish_idle(&mut self) {
        log::debug!("visitor idle; resuming tour");
        self.state.user_interacting = false;
        self.state.paused = false;
        self.rearm();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_names_map_to_gestures() {
        assert_eq!(
            InteractionKind::from_event_name("wheel"),
            Some(InteractionKind::WheelScroll)
        );
        assert_eq!(
            InteractionKind::from_event_name("touchstart"),
            Some(InteractionKind::TouchStart)
        );
        assert_eq!(InteractionKind::from_event_name("moveend"), None);
    }
}

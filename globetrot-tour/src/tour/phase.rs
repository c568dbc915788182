use serde::{Deserialize, Serialize};
use std::fmt;

/// One stage of a single location's visit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TourPhase {
    /// Wide shot, before the first lap or between laps.
    #[default]
    Overview,
    /// Flying in to the close zoom.
    ZoomingIn,
    /// Detail card on screen while the dwell timer runs.
    Showing,
    /// Pulling back to the mid zoom.
    ZoomingMid,
    /// Momentary hand-off to the next stop.
    Transitioning,
}

impl TourPhase {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Overview => "overview",
            Self::ZoomingIn => "zooming-in",
            Self::Showing => "showing",
            Self::ZoomingMid => "zooming-mid",
            Self::Transitioning => "transitioning",
        }
    }

    /// Phases during which the engine is flying the camera.
    #[must_use]
    pub const fn is_flight(self) -> bool {
        matches!(self, Self::ZoomingIn | Self::ZoomingMid)
    }
}

impl fmt::Display for TourPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_kebab_names() {
        assert_eq!(
            serde_json::to_string(&TourPhase::ZoomingMid).unwrap(),
            "\"zooming-mid\""
        );
        assert_eq!(TourPhase::ZoomingIn.to_string(), "zooming-in");
        assert!(TourPhase::ZoomingIn.is_flight());
        assert!(!TourPhase::Showing.is_flight());
    }
}

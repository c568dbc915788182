//! Map camera contract consumed by the tour engine.
//!
//! The engine never talks to a concrete mapping library. It issues flights
//! through [`MapCamera`] and schedules its next phase from the nominal flight
//! duration, so a fire-and-forget implementation is sufficient.
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use thiserror::Error;

use crate::geo::Coordinate;

/// Where the camera should end up.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraTarget {
    pub center: Coordinate,
    pub zoom: f64,
}

impl CameraTarget {
    #[must_use]
    pub const fn new(center: Coordinate, zoom: f64) -> Self {
        Self { center, zoom }
    }
}

impl fmt::Display for CameraTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} @ z{:.1}", self.center, self.zoom)
    }
}

/// Base map imagery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MapLayer {
    Street,
    #[default]
    Satellite,
}

impl MapLayer {
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Street => Self::Satellite,
            Self::Satellite => Self::Street,
        }
    }

    /// Label for the button that switches *to* the other layer.
    #[must_use]
    pub const fn toggle_label(self) -> &'static str {
        match self {
            Self::Street => "Satellite",
            Self::Satellite => "Street",
        }
    }
}

/// Failures reported by a camera adapter.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CameraError {
    #[error("invalid coordinate {0}")]
    InvalidCoordinate(Coordinate),
    #[error("map surface is not available")]
    Unavailable,
    #[error("camera command rejected: {0}")]
    Rejected(String),
}

/// Capability the tour needs from the map surface.
pub trait MapCamera {
    /// Start a flight towards `target` lasting roughly `duration`.
    ///
    /// # Errors
    ///
    /// Returns an error when the surface refuses the command, e.g. for an
    /// invalid coordinate. The tour logs it and carries on.
    fn fly_to(&mut self, target: CameraTarget, duration: Duration) -> Result<(), CameraError>;

    /// The wide shot shown between laps.
    fn overview_target(&self) -> CameraTarget;

    /// Swap the base map style. Markers must survive or be re-added by the
    /// surface once the new style has loaded.
    ///
    /// # Errors
    ///
    /// Returns an error if the style cannot be applied.
    fn set_layer(&mut self, layer: MapLayer) -> Result<(), CameraError> {
        let _ = layer;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layer_toggle_round_trips() {
        assert_eq!(MapLayer::default(), MapLayer::Satellite);
        assert_eq!(MapLayer::Satellite.toggled(), MapLayer::Street);
        assert_eq!(MapLayer::Street.toggled().toggled(), MapLayer::Street);
        assert_eq!(MapLayer::Street.toggle_label(), "Satellite");
    }

    #[test]
    fn target_display_is_compact() {
        let target = CameraTarget::new(Coordinate::new(90.5, 23.5), 5.0);
        assert_eq!(target.to_string(), "(90.5000, 23.5000) @ z5.0");
    }
}

//! Tour cadence and camera framing.
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

use crate::camera::CameraTarget;
use crate::constants::{
    AUTO_START_DELAY_MS, CLOSE_ZOOM, FLY_DURATION_MS, FLY_MID_DURATION_MS, HOME_LAT, HOME_LON,
    IDLE_RESUME_DELAY_MS, MANUAL_FLIGHT_MS, MID_ZOOM, OVERVIEW_LAT, OVERVIEW_LON,
    OVERVIEW_PAUSE_MS, OVERVIEW_ZOOM, SETTLE_PADDING_MS, SHOW_DURATION_MS,
};
use crate::geo::Coordinate;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse tour config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("`{field}` must be greater than zero")]
    ZeroDuration { field: &'static str },
    #[error("mid zoom {mid} must not exceed close zoom {close}")]
    ZoomOrder { close: f64, mid: f64 },
}

/// Timing and framing knobs for the guided tour. Every field falls back to
/// its default when omitted from JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TourConfig {
    #[serde(default = "TourConfig::default_fly_duration_ms")]
    pub fly_duration_ms: u32,
    #[serde(default = "TourConfig::default_fly_mid_duration_ms")]
    pub fly_mid_duration_ms: u32,
    #[serde(default = "TourConfig::default_show_duration_ms")]
    pub show_duration_ms: u32,
    #[serde(default = "TourConfig::default_overview_pause_ms")]
    pub overview_pause_ms: u32,
    #[serde(default = "TourConfig::default_idle_resume_delay_ms")]
    pub idle_resume_delay_ms: u32,
    #[serde(default = "TourConfig::default_auto_start_delay_ms")]
    pub auto_start_delay_ms: u32,
    #[serde(default = "TourConfig::default_settle_padding_ms")]
    pub settle_padding_ms: u32,
    #[serde(default = "TourConfig::default_manual_flight_ms")]
    pub manual_flight_ms: u32,
    #[serde(default = "TourConfig::default_close_zoom")]
    pub close_zoom: f64,
    #[serde(default = "TourConfig::default_mid_zoom")]
    pub mid_zoom: f64,
    #[serde(default = "TourConfig::default_overview")]
    pub overview: CameraTarget,
    #[serde(default = "TourConfig::default_home")]
    pub home: Coordinate,
}

impl Default for TourConfig {
    fn default() -> Self {
        Self {
            fly_duration_ms: Self::default_fly_duration_ms(),
            fly_mid_duration_ms: Self::default_fly_mid_duration_ms(),
            show_duration_ms: Self::default_show_duration_ms(),
            overview_pause_ms: Self::default_overview_pause_ms(),
            idle_resume_delay_ms: Self::default_idle_resume_delay_ms(),
            auto_start_delay_ms: Self::default_auto_start_delay_ms(),
            settle_padding_ms: Self::default_settle_padding_ms(),
            manual_flight_ms: Self::default_manual_flight_ms(),
            close_zoom: Self::default_close_zoom(),
            mid_zoom: Self::default_mid_zoom(),
            overview: Self::default_overview(),
            home: Self::default_home(),
        }
    }
}

impl TourConfig {
    #[must_use]
    pub fn default_config() -> Self {
        Self::default()
    }

    /// Parse a JSON override and validate it.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or the values are inconsistent.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let cfg: Self = serde_json::from_str(json)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// # Errors
    ///
    /// Returns an error when a flight or dwell duration is zero or the mid
    /// zoom sits closer than the close zoom.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let durations = [
            ("fly_duration_ms", self.fly_duration_ms),
            ("fly_mid_duration_ms", self.fly_mid_duration_ms),
            ("show_duration_ms", self.show_duration_ms),
            ("idle_resume_delay_ms", self.idle_resume_delay_ms),
        ];
        if let Some((field, _)) = durations.iter().find(|(_, value)| *value == 0) {
            return Err(ConfigError::ZeroDuration { field: *field });
        }
        if self.mid_zoom > self.close_zoom {
            return Err(ConfigError::ZoomOrder {
                close: self.close_zoom,
                mid: self.mid_zoom,
            });
        }
        Ok(())
    }

    /// Delay before `zooming-in` hands over to `showing`.
    #[must_use]
    pub fn zoom_in_delay(&self) -> Duration {
        ms(self.fly_duration_ms.saturating_add(self.settle_padding_ms))
    }

    /// Delay before `zooming-mid` hands over to `transitioning`.
    #[must_use]
    pub fn zoom_mid_delay(&self) -> Duration {
        ms(self.fly_mid_duration_ms.saturating_add(self.settle_padding_ms))
    }

    #[must_use]
    pub fn fly_duration(&self) -> Duration {
        ms(self.fly_duration_ms)
    }

    #[must_use]
    pub fn fly_mid_duration(&self) -> Duration {
        ms(self.fly_mid_duration_ms)
    }

    #[must_use]
    pub fn show_duration(&self) -> Duration {
        ms(self.show_duration_ms)
    }

    #[must_use]
    pub fn overview_pause(&self) -> Duration {
        ms(self.overview_pause_ms)
    }

    #[must_use]
    pub fn idle_resume_delay(&self) -> Duration {
        ms(self.idle_resume_delay_ms)
    }

    #[must_use]
    pub fn auto_start_delay(&self) -> Duration {
        ms(self.auto_start_delay_ms)
    }

    #[must_use]
    pub fn manual_flight(&self) -> Duration {
        ms(self.manual_flight_ms)
    }

    const fn default_fly_duration_ms() -> u32 {
        FLY_DURATION_MS
    }

    const fn default_fly_mid_duration_ms() -> u32 {
        FLY_MID_DURATION_MS
    }

    const fn default_show_duration_ms() -> u32 {
        SHOW_DURATION_MS
    }

    const fn default_overview_pause_ms() -> u32 {
        OVERVIEW_PAUSE_MS
    }

    const fn default_idle_resume_delay_ms() -> u32 {
        IDLE_RESUME_DELAY_MS
    }

    const fn default_auto_start_delay_ms() -> u32 {
        AUTO_START_DELAY_MS
    }

    const fn default_settle_padding_ms() -> u32 {
        SETTLE_PADDING_MS
    }

    const fn default_manual_flight_ms() -> u32 {
        MANUAL_FLIGHT_MS
    }

    const fn default_close_zoom() -> f64 {
        CLOSE_ZOOM
    }

    const fn default_mid_zoom() -> f64 {
        MID_ZOOM
    }

    const fn default_overview() -> CameraTarget {
        CameraTarget::new(Coordinate::new(OVERVIEW_LON, OVERVIEW_LAT), OVERVIEW_ZOOM)
    }

    const fn default_home() -> Coordinate {
        Coordinate::new(HOME_LON, HOME_LAT)
    }
}

const fn ms(value: u32) -> Duration {
    Duration::from_millis(value as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_json_yields_defaults() {
        let cfg = TourConfig::from_json("{}").unwrap();
        assert_eq!(cfg, TourConfig::default_config());
        assert_eq!(cfg.zoom_in_delay(), Duration::from_millis(2_300));
        assert_eq!(cfg.zoom_mid_delay(), Duration::from_millis(1_500));
        assert_eq!(cfg.home, Coordinate::new(90.4125, 23.8103));
    }

    #[test]
    fn partial_override_keeps_other_defaults() {
        let cfg = TourConfig::from_json(r#"{"show_duration_ms": 800, "close_zoom": 12}"#).unwrap();
        assert_eq!(cfg.show_duration(), Duration::from_millis(800));
        assert!((cfg.close_zoom - 12.0).abs() < f64::EPSILON);
        assert_eq!(cfg.idle_resume_delay_ms, IDLE_RESUME_DELAY_MS);
    }

    #[test]
    fn zero_dwell_is_rejected() {
        let err = TourConfig::from_json(r#"{"show_duration_ms": 0}"#).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::ZeroDuration {
                field: "show_duration_ms"
            }
        ));
    }

    #[test]
    fn inverted_zoom_levels_are_rejected() {
        let err = TourConfig::from_json(r#"{"mid_zoom": 11}"#).unwrap_err();
        assert!(matches!(err, ConfigError::ZoomOrder { .. }));
    }
}

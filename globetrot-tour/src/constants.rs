//! Centralized tuning constants for the travel tour.
//!
//! Timing and zoom values define the rhythm of the guided tour. Keeping them
//! together means the cadence can only be adjusted through reviewed code or an
//! explicit `TourConfig` override, never by scattered literals.

// Geodesy ------------------------------------------------------------------
/// Mean Earth radius in kilometres used by the haversine formula.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

// Reference points ---------------------------------------------------------
/// Home base (Dhaka) as `[longitude, latitude]`.
pub const HOME_LON: f64 = 90.4125;
pub const HOME_LAT: f64 = 23.8103;
pub const HOME_LABEL: &str = "Dhaka";

/// Centre of the overview shot between tour laps.
pub const OVERVIEW_LON: f64 = 90.5;
pub const OVERVIEW_LAT: f64 = 23.5;

// Zoom levels --------------------------------------------------------------
pub const OVERVIEW_ZOOM: f64 = 5.0;
pub const CLOSE_ZOOM: f64 = 10.0;
pub const MID_ZOOM: f64 = 7.0;

// Cadence (milliseconds) ---------------------------------------------------
pub const FLY_DURATION_MS: u32 = 2_000;
pub const FLY_MID_DURATION_MS: u32 = 1_200;
pub const SHOW_DURATION_MS: u32 = 5_000;
pub const OVERVIEW_PAUSE_MS: u32 = 2_500;
pub const IDLE_RESUME_DELAY_MS: u32 = 15_000;
pub const AUTO_START_DELAY_MS: u32 = 2_000;
/// Slack added after a nominal flight before the next phase is scheduled.
pub const SETTLE_PADDING_MS: u32 = 300;
/// Flight used when a visitor picks a location directly.
pub const MANUAL_FLIGHT_MS: u32 = 1_000;

// Routing ------------------------------------------------------------------
pub const STORY_ROUTE_PREFIX: &str = "/travel/";

//! Globetrot Tour Engine
//!
//! Platform-agnostic core of the travel map: location catalog, visiting
//! order and the guided tour state machine. The map surface, timers and
//! navigation are supplied by the host through the traits in this crate.

pub mod camera;
pub mod config;
pub mod constants;
pub mod geo;
pub mod location;
pub mod markers;
pub mod order;
pub mod testing;
pub mod tour;

// Re-export commonly used types
pub use camera::{CameraError, CameraTarget, MapCamera, MapLayer};
pub use config::{ConfigError, TourConfig};
pub use geo::{Coordinate, distance_km};
pub use location::{CatalogError, Location, LocationCatalog, TravelStats, is_valid_slug};
pub use markers::{ClickHandler, MarkerHandle, MarkerSync, SelectionDispatch};
pub use order::{TourOrder, resolve_tour_order};
pub use tour::{
    InteractionKind, Scheduler, TimerKind, TimerTicket, TourEngine, TourError, TourPhase,
    TourSnapshot, TourState,
};

use constants::STORY_ROUTE_PREFIX;

/// Trait for abstracting where location data comes from
/// Platform-specific implementations should provide this
pub trait LocationSource {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Load the validated location catalog
    ///
    /// # Errors
    ///
    /// Returns an error if the data cannot be read or fails validation.
    fn load_catalog(&self) -> Result<LocationCatalog, Self::Error>;
}

/// Source backed by the dataset compiled into the crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticLocations;

impl LocationSource for StaticLocations {
    type Error = CatalogError;

    fn load_catalog(&self) -> Result<LocationCatalog, Self::Error> {
        LocationCatalog::load_from_static()
    }
}

/// Trait for leaving the map for a location's story page
pub trait Navigator {
    fn navigate_to_story(&self, slug: &str);
}

/// Route of the story page for `slug`.
#[must_use]
pub fn story_path(slug: &str) -> String {
    format!("{STORY_ROUTE_PREFIX}{slug}")
}

/// Entry point tying a location source to tour construction.
pub struct TravelJournal<L>
where
    L: LocationSource,
{
    source: L,
    config: TourConfig,
}

impl<L> TravelJournal<L>
where
    L: LocationSource,
{
    pub fn new(source: L) -> Self {
        Self {
            source,
            config: TourConfig::default_config(),
        }
    }

    #[must_use]
    pub fn with_config(mut self, config: TourConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use]
    pub const fn config(&self) -> &TourConfig {
        &self.config
    }

    /// Load the catalog and resolve the visiting order from home.
    ///
    /// # Errors
    ///
    /// Returns an error if the location source fails.
    pub fn tour_order(&self) -> Result<TourOrder, L::Error> {
        let catalog = self.source.load_catalog()?;
        Ok(TourOrder::resolve(self.config.home, catalog.locations()))
    }

    /// Headline statistics over the whole catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if the location source fails.
    pub fn stats(&self) -> Result<TravelStats, L::Error> {
        let catalog = self.source.load_catalog()?;
        Ok(TravelStats::from_locations(catalog.locations()))
    }

    /// Build an unmounted engine over the resolved order.
    ///
    /// # Errors
    ///
    /// Returns an error if the location source fails.
    pub fn create_engine<C, S>(&self, camera: C, scheduler: S) -> Result<TourEngine<C, S>, L::Error>
    where
        C: MapCamera,
        S: Scheduler,
    {
        let order = self.tour_order()?;
        log::info!("resolved tour of {} stops", order.len());
        Ok(TourEngine::new(order, self.config.clone(), camera, scheduler))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Debug, thiserror::Error)]
    #[error("source offline")]
    struct Offline;

    struct FailingSource;

    impl LocationSource for FailingSource {
        type Error = Offline;

        fn load_catalog(&self) -> Result<LocationCatalog, Self::Error> {
            Err(Offline)
        }
    }

    #[derive(Default)]
    struct RecordingNavigator {
        visited: RefCell<Vec<String>>,
    }

    impl Navigator for RecordingNavigator {
        fn navigate_to_story(&self, slug: &str) {
            self.visited.borrow_mut().push(story_path(slug));
        }
    }

    #[test]
    fn static_journal_orders_from_home() {
        let journal = TravelJournal::new(StaticLocations);
        let order = journal.tour_order().unwrap();
        assert_eq!(order.len(), 6);
        assert_eq!(
            order.get(0).map(|l| l.slug.as_str()),
            Some("sreemangal-tea-gardens")
        );
        let stats = journal.stats().unwrap();
        assert_eq!(stats.places_visited, 6);
        assert_eq!(stats.countries_explored, 1);
    }

    #[test]
    fn source_errors_propagate() {
        let journal = TravelJournal::new(FailingSource);
        assert!(journal.tour_order().is_err());
    }

    #[test]
    fn story_paths_use_travel_prefix() {
        assert_eq!(story_path("sajek-above-the-clouds"), "/travel/sajek-above-the-clouds");
    }

    #[test]
    fn read_more_navigates_only_with_open_card() {
        let journal = TravelJournal::new(StaticLocations);
        let clock = testing::ManualScheduler::default();
        let camera = testing::RecordingCamera::new(journal.config().overview);
        let mut engine = journal.create_engine(camera, clock).unwrap();
        let nav = Rc::new(RecordingNavigator::default());
        engine.mount();
        assert!(!engine.read_more(nav.as_ref()));
        engine.select_location("sajek-above-the-clouds").unwrap();
        assert!(engine.read_more(nav.as_ref()));
        assert_eq!(*nav.visited.borrow(), ["/travel/sajek-above-the-clouds"]);
    }
}

//! Visiting order for the guided tour.
//!
//! Greedy nearest-neighbour from the home coordinate. This is a heuristic and
//! can produce a longer path than the optimum; for a small curated set the
//! simplicity and determinism win.
use serde::Serialize;

use crate::geo::{Coordinate, distance_km};
use crate::location::Location;

/// Order `locations` by repeatedly hopping to the closest unvisited one.
///
/// Exact ties resolve to the earliest remaining entry in input order, so the
/// result is a deterministic permutation of the input.
#[must_use]
pub fn resolve_tour_order(home: Coordinate, locations: &[Location]) -> Vec<Location> {
    let mut remaining: Vec<&Location> = locations.iter().collect();
    let mut ordered = Vec::with_capacity(locations.len());
    let mut current = home;

    while !remaining.is_empty() {
        let mut nearest = 0;
        let mut nearest_dist = f64::INFINITY;
        for (idx, candidate) in remaining.iter().enumerate() {
            let d = distance_km(current, candidate.coordinates);
            if d < nearest_dist {
                nearest_dist = d;
                nearest = idx;
            }
        }
        let next = remaining.remove(nearest);
        current = next.coordinates;
        ordered.push(next.clone());
    }

    ordered
}

/// The resolved visiting sequence, computed once per session.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct TourOrder {
    stops: Vec<Location>,
}

impl TourOrder {
    #[must_use]
    pub fn resolve(home: Coordinate, locations: &[Location]) -> Self {
        Self {
            stops: resolve_tour_order(home, locations),
        }
    }

    /// Wrap a sequence that is already in visiting order.
    #[must_use]
    pub const fn from_stops(stops: Vec<Location>) -> Self {
        Self { stops }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.stops.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Location> {
        self.stops.get(index)
    }

    /// Position of `slug` within the tour.
    #[must_use]
    pub fn position(&self, slug: &str) -> Option<usize> {
        self.stops.iter().position(|loc| loc.slug == slug)
    }

    #[must_use]
    pub fn stops(&self) -> &[Location] {
        &self.stops
    }

    pub fn iter(&self) -> impl Iterator<Item = &Location> {
        self.stops.iter()
    }

    /// Length of the open path home → first → … → last.
    #[must_use]
    pub fn path_length_km(&self, home: Coordinate) -> f64 {
        let mut current = home;
        let mut total = 0.0;
        for stop in &self.stops {
            total += distance_km(current, stop.coordinates);
            current = stop.coordinates;
        }
        total
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::location::LocationCatalog;
    use crate::testing::location_at;

    fn slugs(order: &[Location]) -> Vec<&str> {
        order.iter().map(|l| l.slug.as_str()).collect()
    }

    #[test]
    fn nearest_first_then_remaining() {
        let home = Coordinate::new(0.0, 0.0);
        let input = vec![location_at("a", 0.0, 5.0), location_at("b", 0.0, 1.0)];
        let order = resolve_tour_order(home, &input);
        assert_eq!(slugs(&order), ["b", "a"]);
    }

    #[test]
    fn hops_from_each_visited_stop() {
        let home = Coordinate::new(0.0, 0.0);
        let input = vec![
            location_at("a", 0.0, 0.0),
            location_at("b", 0.0, 10.0),
            location_at("c", 0.0, 1.0),
        ];
        let order = resolve_tour_order(home, &input);
        assert_eq!(slugs(&order), ["a", "c", "b"]);
    }

    #[test]
    fn exact_ties_keep_input_order() {
        let home = Coordinate::new(0.0, 0.0);
        let input = vec![
            location_at("east", 1.0, 0.0),
            location_at("west", -1.0, 0.0),
        ];
        assert_eq!(slugs(&resolve_tour_order(home, &input)), ["east", "west"]);

        let flipped = vec![input[1].clone(), input[0].clone()];
        assert_eq!(slugs(&resolve_tour_order(home, &flipped)), ["west", "east"]);
    }

    #[test]
    fn result_is_a_permutation() {
        let catalog = LocationCatalog::load_from_static().unwrap();
        let home = Coordinate::new(90.4125, 23.8103);
        let order = resolve_tour_order(home, catalog.locations());
        assert_eq!(order.len(), catalog.len());
        let mut expected = slugs(catalog.locations());
        let mut actual = slugs(&order);
        expected.sort_unstable();
        actual.sort_unstable();
        assert_eq!(expected, actual);
    }

    #[test]
    fn static_dataset_order_is_stable() {
        let catalog = LocationCatalog::load_from_static().unwrap();
        let home = Coordinate::new(90.4125, 23.8103);
        let first = TourOrder::resolve(home, catalog.locations());
        let second = TourOrder::resolve(home, catalog.locations());
        assert_eq!(first, second);
        assert_eq!(
            slugs(first.stops()),
            [
                "sreemangal-tea-gardens",
                "sajek-above-the-clouds",
                "bandarban-trails-of-silence",
                "coxs-bazar-where-the-sea-meets-sky",
                "saint-martin-island-edge-of-bangladesh",
                "sundarbans-into-the-mangroves",
            ]
        );
        assert_eq!(first.position("sundarbans-into-the-mangroves"), Some(5));
        assert!(first.path_length_km(home) > 900.0);
    }

    #[test]
    fn empty_input_yields_empty_order() {
        let order = TourOrder::resolve(Coordinate::new(0.0, 0.0), &[]);
        assert!(order.is_empty());
        assert_eq!(order.position("anything"), None);
    }
}

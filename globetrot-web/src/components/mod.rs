pub mod detail_card;
pub mod tour_controls;
pub mod travel_map;
pub mod travel_stats;

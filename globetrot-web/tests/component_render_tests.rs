use futures::executor::block_on;
use globetrot_tour::{LocationCatalog, TourPhase, TourSnapshot};
use globetrot_web::components::detail_card::{self, DetailCard};
use globetrot_web::components::tour_controls::{self, TourControls};
use globetrot_web::router::Route;
use yew::{Callback, LocalServerRenderer};
use yew_router::Routable;

#[test]
fn showing_snapshot_renders_card_with_countdown() {
    let catalog = LocationCatalog::load_from_static().unwrap();
    let location = catalog.get("sundarbans-into-the-mangroves").unwrap().clone();
    let snapshot = TourSnapshot {
        phase: TourPhase::Showing,
        current_index: Some(5),
        target: Some(location.clone()),
        selected: Some(location.clone()),
        started: true,
        ..TourSnapshot::initial(6)
    };

    let controls = block_on(
        LocalServerRenderer::<TourControls>::with_props(tour_controls::Props {
            snapshot: snapshot.clone(),
            on_toggle_pause: Callback::noop(),
            on_toggle_layer: Callback::noop(),
        })
        .render(),
    );
    assert!(controls.contains("6 / 6"));
    assert!(controls.contains("width: 100.0%;"));
    assert!(!controls.contains("tour-hint"));

    let card = block_on(
        LocalServerRenderer::<DetailCard>::with_props(detail_card::Props {
            location,
            countdown: snapshot.countdown_visible(),
            countdown_ms: 5_000,
            on_close: Callback::noop(),
            on_read_more: Callback::noop(),
        })
        .render(),
    );
    assert!(card.contains("data-slug=\"sundarbans-into-the-mangroves\""));
    assert!(card.contains("animation-duration: 5000ms;"));
}

#[test]
fn story_routes_round_trip_through_the_router() {
    let catalog = LocationCatalog::load_from_static().unwrap();
    for location in catalog.locations() {
        let route = Route::story(&location.slug);
        assert_eq!(Route::recognize(&route.to_path()), Some(route));
    }
    assert_eq!(Route::recognize("/nowhere/at/all"), Some(Route::NotFound));
}

use globetrot_tour::{StaticLocations, TravelJournal};
use yew::prelude::*;

use crate::components::travel_map::TravelMap;
use crate::components::travel_stats::TravelStatsPanel;

/// Travel section: headline numbers above the guided map.
#[function_component(TravelPage)]
pub fn travel_page() -> Html {
    let journal = TravelJournal::new(StaticLocations);
    let loaded = journal
        .tour_order()
        .and_then(|order| journal.stats().map(|stats| (order, stats)));
    match loaded {
        Ok((order, stats)) => html! {
            <section class="travel">
                <h2>{ "Travel" }</h2>
                <TravelStatsPanel {stats} />
                <TravelMap {order} config={journal.config().clone()} />
            </section>
        },
        Err(err) => {
            log::error!("location catalog rejected: {err}");
            html! {
                <section class="travel travel--error">
                    <p>{ "Travel stories are unavailable right now." }</p>
                </section>
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use yew::LocalServerRenderer;

    #[test]
    fn travel_page_renders_stats_and_map() {
        let html = block_on(LocalServerRenderer::<TravelPage>::new().render());
        assert!(html.contains("Places Visited"));
        assert!(html.contains("travel-map"));
    }
}

use globetrot_tour::TravelStats;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub stats: TravelStats,
}

#[function_component(TravelStatsPanel)]
pub fn travel_stats(props: &Props) -> Html {
    let stats = &props.stats;
    let items = [
        ("Places Visited", stats.places_visited.to_string()),
        ("Countries Explored", stats.countries_explored.to_string()),
        ("Km Travelled", format!("{:.0}", stats.total_distance_km)),
        ("Stories Written", stats.stories_written.to_string()),
    ];
    html! {
        <dl class="travel-stats">
            { for items.into_iter().map(|(label, value)| html! {
                <div class="travel-stats__item">
                    <dt>{ label }</dt>
                    <dd>{ value }</dd>
                </div>
            }) }
        </dl>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use yew::LocalServerRenderer;

    #[test]
    fn renders_every_headline_number() {
        let props = Props {
            stats: TravelStats {
                places_visited: 6,
                countries_explored: 1,
                total_distance_km: 1_905.4,
                stories_written: 6,
            },
        };
        let html = block_on(LocalServerRenderer::<TravelStatsPanel>::with_props(props).render());
        assert!(html.contains("Countries Explored"));
        assert!(html.contains("1905"));
    }
}

use globetrot_tour::Location;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub location: Location,
    /// Animate the dwell countdown bar.
    #[prop_or_default]
    pub countdown: bool,
    #[prop_or(5_000)]
    pub countdown_ms: u32,
    pub on_close: Callback<()>,
    pub on_read_more: Callback<String>,
}

#[function_component(DetailCard)]
pub fn detail_card(props: &Props) -> Html {
    let loc = &props.location;
    let on_close = {
        let cb = props.on_close.clone();
        Callback::from(move |_: MouseEvent| cb.emit(()))
    };
    let on_read_more = {
        let cb = props.on_read_more.clone();
        let slug = loc.slug.clone();
        Callback::from(move |_: MouseEvent| cb.emit(slug.clone()))
    };
    let countdown_style = format!("animation-duration: {}ms;", props.countdown_ms);

    html! {
        <div class="detail-card" data-slug={loc.slug.clone()}>
            if props.countdown {
                <div class="detail-card__countdown">
                    <div class="detail-card__countdown-fill" style={countdown_style}></div>
                </div>
            }
            <div class="detail-card__cover">
                <img
                    src={loc.cover_image.clone()}
                    alt={format!("{}, {}", loc.city, loc.country)}
                    referrerpolicy="no-referrer"
                />
                <button class="detail-card__close" aria-label="Close card" onclick={on_close}>
                    { "×" }
                </button>
            </div>
            <div class="detail-card__body">
                <h3>{ &loc.city }</h3>
                <div class="detail-card__meta">
                    <span class="detail-card__country">{ &loc.country }</span>
                    <span class="detail-card__date">{ loc.visited_label() }</span>
                    <span class="detail-card__distance">
                        { format!("{:.0} km", loc.distance_from_home_km) }
                    </span>
                </div>
                <p class="detail-card__description">{ &loc.description }</p>
                <button class="detail-card__read-more" onclick={on_read_more}>
                    { "Read the Story" }
                </button>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use globetrot_tour::LocationCatalog;
    use yew::LocalServerRenderer;

    fn props(countdown: bool) -> Props {
        let catalog = LocationCatalog::load_from_static().unwrap();
        Props {
            location: catalog.get("sajek-above-the-clouds").unwrap().clone(),
            countdown,
            countdown_ms: 5_000,
            on_close: Callback::noop(),
            on_read_more: Callback::noop(),
        }
    }

    #[test]
    fn card_shows_location_details() {
        let html = block_on(LocalServerRenderer::<DetailCard>::with_props(props(true)).render());
        assert!(html.contains("Sajek Valley"));
        assert!(html.contains("Jan 2026"));
        assert!(html.contains("320 km"));
        assert!(html.contains("Read the Story"));
        assert!(html.contains("detail-card__countdown"));
    }

    #[test]
    fn countdown_hidden_when_paused() {
        let html = block_on(LocalServerRenderer::<DetailCard>::with_props(props(false)).render());
        assert!(!html.contains("detail-card__countdown"));
    }
}

use globetrot_tour::LocationCatalog;
use yew::prelude::*;

use super::not_found::NotFoundPage;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub slug: AttrValue,
}

/// Landing page for "Read the Story".
#[function_component(StoryPage)]
pub fn story_page(props: &Props) -> Html {
    let location = LocationCatalog::load_from_static()
        .ok()
        .and_then(|catalog| catalog.get(&props.slug).cloned());
    let Some(loc) = location else {
        return html! { <NotFoundPage /> };
    };
    html! {
        <article class="story" data-slug={loc.slug.clone()}>
            <img
                class="story__cover"
                src={loc.cover_image.clone()}
                alt={format!("{}, {}", loc.city, loc.country)}
            />
            <h1>{ &loc.city }</h1>
            <p class="story__meta">
                { format!("{} · {} · {:.0} km from home", loc.country, loc.visited_label(), loc.distance_from_home_km) }
            </p>
            <p class="story__body">{ &loc.description }</p>
            <a href="/travel">{ "Back to the map" }</a>
        </article>
    }
}

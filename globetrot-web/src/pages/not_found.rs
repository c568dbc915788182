use yew::prelude::*;

#[function_component(NotFoundPage)]
pub fn not_found_page() -> Html {
    html! {
        <section class="not-found">
            <h1>{ "Lost off the map" }</h1>
            <a href="/travel">{ "Back to the travel map" }</a>
        </section>
    }
}

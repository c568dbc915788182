use yew::prelude::*;
#[cfg(target_arch = "wasm32")]
use yew_router::prelude::*;

use crate::pages::not_found::NotFoundPage;
use crate::pages::story::StoryPage;
use crate::pages::travel::TravelPage;
use crate::router::Route;

/// Render the page for `route`.
#[must_use]
pub fn switch(route: Route) -> Html {
    match route {
        Route::Home | Route::Travel => html! { <TravelPage /> },
        Route::Story { slug } => html! { <StoryPage slug={slug} /> },
        Route::NotFound => html! { <NotFoundPage /> },
    }
}

#[cfg(target_arch = "wasm32")]
#[function_component(App)]
pub fn app() -> Html {
    html! {
        <BrowserRouter>
            <Switch<Route> render={switch} />
        </BrowserRouter>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use yew::LocalServerRenderer;

    #[derive(Properties, PartialEq)]
    struct RouteProps {
        route: Route,
    }

    #[function_component(RouteHost)]
    fn route_host(props: &RouteProps) -> Html {
        switch(props.route.clone())
    }

    fn render(route: Route) -> String {
        block_on(LocalServerRenderer::<RouteHost>::with_props(RouteProps { route }).render())
    }

    #[test]
    fn routes_map_to_pages() {
        assert!(render(Route::Travel).contains("travel-map"));
        assert!(render(Route::story("sajek-above-the-clouds")).contains("Sajek Valley"));
        assert!(render(Route::NotFound).contains("Lost off the map"));
    }
}

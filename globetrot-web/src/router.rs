use globetrot_tour::{Navigator, story_path};
use yew_router::prelude::*;

#[derive(Clone, Debug, Routable, PartialEq, Eq)]
pub enum Route {
    #[at("/")]
    Home,
    #[at("/travel")]
    Travel,
    #[at("/travel/:slug")]
    Story { slug: String },
    #[at("/404")]
    #[not_found]
    NotFound,
}

impl Route {
    /// Story route for `slug`.
    #[must_use]
    pub fn story(slug: &str) -> Self {
        Self::Story {
            slug: slug.to_string(),
        }
    }
}

/// Tour navigation backed by the yew router history.
#[derive(Clone, PartialEq)]
pub struct RouterNavigator(pub yew_router::navigator::Navigator);

impl Navigator for RouterNavigator {
    fn navigate_to_story(&self, slug: &str) {
        log::debug!("pushing {}", story_path(slug));
        self.0.push(&Route::story(slug));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn story_route_matches_story_path() {
        let route = Route::story("sajek-above-the-clouds");
        assert_eq!(route.to_path(), story_path("sajek-above-the-clouds"));
        assert_eq!(
            Route::recognize("/travel/coxs-bazar-where-the-sea-meets-sky"),
            Some(Route::story("coxs-bazar-where-the-sea-meets-sky"))
        );
        assert_eq!(Route::recognize("/travel"), Some(Route::Travel));
    }
}

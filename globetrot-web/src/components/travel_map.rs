use globetrot_tour::{TourConfig, TourOrder, TourSnapshot};
use yew::prelude::*;
#[cfg(target_arch = "wasm32")]
use yew_router::prelude::*;

use super::detail_card::DetailCard;
use super::tour_controls::TourControls;

/// Requests the overlay UI sends to the tour engine.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TourCommand {
    TogglePause,
    ToggleLayer,
    CloseCard,
    ReadMore(String),
}

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub order: TourOrder,
    #[prop_or_default]
    pub config: TourConfig,
}

#[function_component(TravelMap)]
pub fn travel_map(props: &Props) -> Html {
    let container = use_node_ref();
    let snapshot = use_state(|| TourSnapshot::initial(props.order.len()));
    let dispatch = use_tour_session(&container, props, &snapshot);

    let on_toggle_pause = dispatch.reform(|()| TourCommand::TogglePause);
    let on_toggle_layer = dispatch.reform(|()| TourCommand::ToggleLayer);
    let on_close = dispatch.reform(|()| TourCommand::CloseCard);
    let on_read_more = dispatch.reform(TourCommand::ReadMore);

    html! {
        <div class="travel-map">
            <div class="travel-map__frame" style="aspect-ratio: 16 / 10;">
                <div ref={container} class="travel-map__canvas"></div>
                <TourControls
                    snapshot={(*snapshot).clone()}
                    {on_toggle_pause}
                    {on_toggle_layer}
                />
            </div>
            if let Some(location) = snapshot.selected.clone() {
                <DetailCard
                    {location}
                    countdown={snapshot.countdown_visible()}
                    countdown_ms={props.config.show_duration_ms}
                    {on_close}
                    {on_read_more}
                />
            }
        </div>
    }
}

/// Server rendering has no map; the overlays render from the initial snapshot.
#[cfg(not(target_arch = "wasm32"))]
#[hook]
fn use_tour_session(
    _container: &NodeRef,
    _props: &Props,
    _snapshot: &UseStateHandle<TourSnapshot>,
) -> Callback<TourCommand> {
    Callback::noop()
}

#[cfg(target_arch = "wasm32")]
#[hook]
fn use_tour_session(
    container: &NodeRef,
    props: &Props,
    snapshot: &UseStateHandle<TourSnapshot>,
) -> Callback<TourCommand> {
    use crate::map::{MapSession, with_engine};
    use crate::router::RouterNavigator;
    use std::cell::RefCell;
    use std::rc::Weak;

    let engine = use_mut_ref(Weak::new);
    let navigator = use_navigator();

    {
        let container = container.clone();
        let engine = engine.clone();
        let snapshot = snapshot.clone();
        use_effect_with(
            (props.order.clone(), props.config.clone()),
            move |(order, config)| {
                let session = container
                    .cast::<web_sys::HtmlElement>()
                    .ok_or_else(|| wasm_bindgen::JsValue::from_str("map container missing"))
                    .and_then(|element| {
                        MapSession::start(&element, order.clone(), config.clone(), move |snap| {
                            snapshot.set(snap);
                        })
                    });
                let session = match session {
                    Ok(session) => {
                        *engine.borrow_mut() = session.engine();
                        Some(session)
                    }
                    Err(err) => {
                        crate::dom::console_error(&format!(
                            "travel map unavailable: {}",
                            crate::dom::js_error_message(&err)
                        ));
                        None
                    }
                };
                move || drop(session)
            },
        );
    }

    Callback::from(move |command: TourCommand| {
        let engine: Weak<RefCell<_>> = engine.borrow().clone();
        with_engine(&engine, |engine| match command {
            TourCommand::TogglePause => engine.toggle_pause(),
            TourCommand::ToggleLayer => engine.toggle_layer(),
            TourCommand::CloseCard => engine.close_card(),
            TourCommand::ReadMore(slug) => {
                if let Some(nav) = navigator.clone() {
                    if !engine.read_more(&RouterNavigator(nav.clone())) {
                        nav.push(&crate::router::Route::story(&slug));
                    }
                }
            }
        });
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use globetrot_tour::{StaticLocations, TravelJournal};
    use yew::LocalServerRenderer;

    #[test]
    fn server_render_shows_frame_and_controls() {
        let order = TravelJournal::new(StaticLocations).tour_order().unwrap();
        let props = Props {
            order,
            config: TourConfig::default_config(),
        };
        let html = block_on(LocalServerRenderer::<TravelMap>::with_props(props).render());
        assert!(html.contains("travel-map__canvas"));
        assert!(html.contains("Pause"));
        assert!(!html.contains("detail-card"));
    }
}

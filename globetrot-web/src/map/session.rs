//! One mounted map view: the MapLibre instance, its markers and the tour
//! engine driving it. Dropping the session tears all of it down.
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use web_sys::HtmlElement;

use globetrot_tour::{
    Coordinate, InteractionKind, MarkerSync, TourConfig, TourEngine, TourOrder, TourSnapshot,
};

use super::{MapHandle, MapLibreCamera, MarkerLayer, apply_globe, create_map};
use crate::dom::js_error_message;
use crate::scheduler::BrowserScheduler;

pub type WebEngine = TourEngine<MapLibreCamera, BrowserScheduler>;

type Listener = Closure<dyn FnMut()>;

const INTERACTION_EVENTS: [&str; 3] = ["dragstart", "wheel", "touchstart"];

/// Run `f` against the engine if it is still alive and not already borrowed.
pub fn with_engine(engine: &Weak<RefCell<WebEngine>>, f: impl FnOnce(&mut WebEngine)) {
    let Some(engine) = engine.upgrade() else {
        return;
    };
    match engine.try_borrow_mut() {
        Ok(mut engine) => f(&mut engine),
        Err(_) => log::warn!("tour engine busy; dropping map event"),
    }
}

pub struct MapSession {
    engine: Rc<RefCell<WebEngine>>,
    map: MapHandle,
    markers: Rc<RefCell<MarkerLayer>>,
    listeners: Vec<(&'static str, Listener)>,
}

impl MapSession {
    /// Create the map in `container` and wire the tour to it. The tour mounts
    /// once the map has finished loading; `on_change` receives every snapshot.
    ///
    /// # Errors
    /// Returns an error if the map cannot be created.
    pub fn start(
        container: &HtmlElement,
        order: TourOrder,
        config: TourConfig,
        on_change: impl Fn(TourSnapshot) + 'static,
    ) -> Result<Self, JsValue> {
        // The map opens on the layer the engine starts in.
        let layer = TourSnapshot::initial(order.len()).layer;
        let map = create_map(container, config.overview, layer)?;
        let camera = MapLibreCamera::new(map.clone(), config.overview);
        let home = config.home;
        let engine = Rc::new_cyclic(|weak: &Weak<RefCell<WebEngine>>| {
            let weak = weak.clone();
            let scheduler = BrowserScheduler::new(move |ticket| {
                with_engine(&weak, |engine| engine.on_timer_fire(ticket));
            });
            RefCell::new(
                TourEngine::new(order, config, camera, scheduler)
                    .with_observer(move |snapshot| on_change(snapshot.clone())),
            )
        });

        let mut session = Self {
            engine,
            map,
            markers: Rc::default(),
            listeners: Vec::new(),
        };
        session.listen_for_load(home);
        session.listen_for_style();
        session.listen_for_motion();
        Ok(session)
    }

    #[must_use]
    pub fn engine(&self) -> Weak<RefCell<WebEngine>> {
        Rc::downgrade(&self.engine)
    }

    fn listen(&mut self, event: &'static str, listener: Listener) {
        self.map.on(event, listener.as_ref().unchecked_ref());
        self.listeners.push((event, listener));
    }

    fn listen_for_load(&mut self, home: Coordinate) {
        let engine = self.engine();
        let map = self.map.clone();
        let layer = Rc::clone(&self.markers);
        self.listen(
            "load",
            Closure::new(move || {
                apply_globe(&map);
                let dispatch = engine.clone();
                let mut sync = MarkerSync::new(move |slug: &str| {
                    with_engine(&dispatch, |engine| {
                        if let Err(err) = engine.select_location(slug) {
                            log::warn!("marker click ignored: {err}");
                        }
                    });
                });
                with_engine(&engine, |engine| {
                    let stops = engine.order().stops().to_vec();
                    match layer.borrow_mut().populate(&map, home, &stops) {
                        Ok(handles) => {
                            for (slug, handle) in handles {
                                sync.register(slug, Box::new(handle));
                            }
                        }
                        Err(err) => log::error!("could not place markers: {}", js_error_message(&err)),
                    }
                    engine.set_markers(sync);
                    engine.mount();
                });
            }),
        );
    }

    fn listen_for_style(&mut self) {
        let engine = self.engine();
        let map = self.map.clone();
        let layer = Rc::clone(&self.markers);
        self.listen(
            "style.load",
            Closure::new(move || {
                apply_globe(&map);
                layer.borrow().reattach(&map);
                with_engine(&engine, WebEngine::on_style_loaded);
            }),
        );
    }

    fn listen_for_motion(&mut self) {
        let engine = self.engine();
        self.listen(
            "moveend",
            Closure::new(move || with_engine(&engine, WebEngine::on_movement_settled)),
        );
        for event in INTERACTION_EVENTS {
            let Some(kind) = InteractionKind::from_event_name(event) else {
                continue;
            };
            let engine = self.engine();
            self.listen(
                event,
                Closure::new(move || {
                    with_engine(&engine, |engine| {
                        engine.on_user_interaction(kind);
                    });
                }),
            );
        }
    }
}

impl Drop for MapSession {
    fn drop(&mut self) {
        if let Ok(mut engine) = self.engine.try_borrow_mut() {
            engine.unmount();
        }
        for (event, listener) in self.listeners.drain(..) {
            self.map.off(event, listener.as_ref().unchecked_ref());
        }
        self.markers.borrow_mut().clear();
        self.map.remove();
    }
}

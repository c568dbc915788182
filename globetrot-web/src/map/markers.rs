//! Photo markers and the home pin.
//!
//! Each marker's wrapper element is created once and handed to MapLibre,
//! which positions it by identity. Highlighting mutates the inner circle and
//! label in place, and clicks go through a swappable handler slot.
use js_sys::{Object, Reflect};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use web_sys::{HtmlElement, HtmlImageElement, MouseEvent};

use globetrot_tour::constants::HOME_LABEL;
use globetrot_tour::{ClickHandler, Coordinate, Location, MarkerHandle};

use super::{MapHandle, MarkerBinding, lng_lat};
use crate::dom::{create_html_element, set_styles};

const ACCENT: &str = "#34d399";
const HOME_ACCENT: &str = "#fbbf24";

/// DOM-backed [`MarkerHandle`].
pub struct DomMarker {
    circle: HtmlElement,
    label: HtmlElement,
    handler: Rc<RefCell<Option<ClickHandler>>>,
    _on_click: Closure<dyn FnMut(MouseEvent)>,
}

impl DomMarker {
    /// Build the marker element for `location`; returns the handle and the
    /// wrapper MapLibre should position.
    ///
    /// # Errors
    /// Returns an error if the DOM nodes cannot be created.
    pub fn build(location: &Location) -> Result<(Self, HtmlElement), JsValue> {
        let wrapper = create_html_element("div")?;
        wrapper.set_class_name("travel-marker");
        set_styles(
            &wrapper,
            &[
                ("display", "flex"),
                ("flex-direction", "column"),
                ("align-items", "center"),
                ("cursor", "pointer"),
                ("user-select", "none"),
            ],
        );

        let circle = create_html_element("div")?;
        set_styles(
            &circle,
            &[
                ("width", "40px"),
                ("height", "40px"),
                ("border-radius", "50%"),
                ("overflow", "hidden"),
                ("border", "2px solid rgba(255,255,255,0.7)"),
                ("box-shadow", "0 4px 12px rgba(0,0,0,0.4)"),
                ("transition", "all 0.3s"),
            ],
        );

        let img: HtmlImageElement = create_html_element("img")?.unchecked_into();
        img.set_src(&location.cover_image);
        img.set_alt(&location.city);
        img.set_referrer_policy("no-referrer");
        img.set_cross_origin(Some("anonymous"));
        set_styles(
            &img,
            &[
                ("display", "block"),
                ("width", "100%"),
                ("height", "100%"),
                ("object-fit", "cover"),
            ],
        );
        circle.append_child(&img)?;

        let label = create_html_element("span")?;
        label.set_text_content(Some(&location.city));
        set_styles(
            &label,
            &[
                ("margin-top", "4px"),
                ("font-size", "10px"),
                ("font-weight", "500"),
                ("white-space", "nowrap"),
                ("padding", "1px 6px"),
                ("border-radius", "999px"),
            ],
        );

        wrapper.append_child(&circle)?;
        wrapper.append_child(&label)?;

        let handler: Rc<RefCell<Option<ClickHandler>>> = Rc::default();
        let slot = Rc::clone(&handler);
        let on_click = Closure::<dyn FnMut(MouseEvent)>::new(move |event: MouseEvent| {
            event.stop_propagation();
            let current = slot.borrow().clone();
            if let Some(current) = current {
                current();
            }
        });
        wrapper.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())?;

        let mut marker = Self {
            circle,
            label,
            handler,
            _on_click: on_click,
        };
        marker.set_active(false);
        Ok((marker, wrapper))
    }
}

impl MarkerHandle for DomMarker {
    fn set_active(&mut self, active: bool) {
        let (size, border, shadow) = if active {
            (
                "56px",
                ACCENT,
                "0 4px 12px rgba(0,0,0,0.4),0 0 20px rgba(52,211,153,0.35)",
            )
        } else {
            ("40px", "rgba(255,255,255,0.7)", "0 4px 12px rgba(0,0,0,0.4)")
        };
        set_styles(
            &self.circle,
            &[
                ("width", size),
                ("height", size),
                ("border-color", border),
                ("box-shadow", shadow),
            ],
        );
        let (background, color) = if active {
            ("rgba(0,0,0,0.75)", "#fff")
        } else {
            ("rgba(0,0,0,0.5)", "rgba(255,255,255,0.8)")
        };
        set_styles(&self.label, &[("background", background), ("color", color)]);
    }

    fn set_click_handler(&mut self, handler: ClickHandler) {
        *self.handler.borrow_mut() = Some(handler);
    }
}

fn home_element() -> Result<HtmlElement, JsValue> {
    let wrapper = create_html_element("div")?;
    set_styles(
        &wrapper,
        &[
            ("display", "flex"),
            ("flex-direction", "column"),
            ("align-items", "center"),
            ("pointer-events", "none"),
        ],
    );
    let label = create_html_element("span")?;
    label.set_text_content(Some(HOME_LABEL));
    set_styles(
        &label,
        &[
            ("font-size", "9px"),
            ("font-weight", "700"),
            ("background", "rgba(0,0,0,0.6)"),
            ("color", HOME_ACCENT),
            ("padding", "1px 6px"),
            ("border-radius", "999px"),
        ],
    );
    let dot = create_html_element("div")?;
    set_styles(
        &dot,
        &[
            ("margin-top", "3px"),
            ("width", "10px"),
            ("height", "10px"),
            ("border-radius", "50%"),
            ("background", HOME_ACCENT),
        ],
    );
    wrapper.append_child(&label)?;
    wrapper.append_child(&dot)?;
    Ok(wrapper)
}

fn place(element: &HtmlElement, at: Coordinate, map: &MapHandle) -> Result<MarkerBinding, JsValue> {
    let options = Object::new();
    Reflect::set(&options, &"element".into(), element)?;
    Reflect::set(&options, &"anchor".into(), &"bottom".into())?;
    let marker = MarkerBinding::new(&options);
    marker.set_lng_lat(&lng_lat(at.lon, at.lat));
    marker.add_to(map);
    Ok(marker)
}

/// Every marker attached to the map, kept so a style swap can re-add them.
#[derive(Debug, Default)]
pub struct MarkerLayer {
    placed: Vec<MarkerBinding>,
}

impl MarkerLayer {
    /// Pin the home marker and one photo marker per location. The handles
    /// are returned for the tour's marker sync; MapLibre keeps the elements.
    ///
    /// # Errors
    /// Returns an error if any marker element cannot be built.
    pub fn populate(
        &mut self,
        map: &MapHandle,
        home: Coordinate,
        locations: &[Location],
    ) -> Result<Vec<(String, DomMarker)>, JsValue> {
        self.placed.push(place(&home_element()?, home, map)?);
        let mut handles = Vec::with_capacity(locations.len());
        for location in locations {
            let (handle, element) = DomMarker::build(location)?;
            self.placed.push(place(&element, location.coordinates, map)?);
            handles.push((location.slug.clone(), handle));
        }
        Ok(handles)
    }

    /// Re-attach markers after `setStyle` has replaced the map's layers.
    pub fn reattach(&self, map: &MapHandle) {
        for marker in &self.placed {
            marker.add_to(map);
        }
    }

    pub fn clear(&mut self) {
        for marker in self.placed.drain(..) {
            marker.remove_marker();
        }
    }
}

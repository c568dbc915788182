//! MapLibre GL surface for the guided tour.
//!
//! `maplibregl` is loaded by the page as a global script; these bindings cover
//! only the calls the tour needs.
pub mod camera;
pub mod markers;
pub mod session;
pub mod style;

use js_sys::{Function, Object, Reflect};
use wasm_bindgen::prelude::*;
use web_sys::HtmlElement;

pub use camera::MapLibreCamera;
pub use markers::{DomMarker, MarkerLayer};
pub use session::{MapSession, WebEngine, with_engine};

use crate::dom::js_error_message;
use globetrot_tour::{CameraTarget, MapLayer};

#[wasm_bindgen]
extern "C" {
    #[derive(Debug, Clone)]
    #[wasm_bindgen(js_namespace = maplibregl, js_name = Map)]
    pub type MapHandle;

    #[wasm_bindgen(constructor, catch, js_namespace = maplibregl, js_class = "Map")]
    fn construct(options: &JsValue) -> Result<MapHandle, JsValue>;

    #[wasm_bindgen(method, catch, js_name = flyTo)]
    pub fn fly_to(this: &MapHandle, options: &JsValue) -> Result<(), JsValue>;

    #[wasm_bindgen(method, catch, js_name = setStyle)]
    pub fn set_style(this: &MapHandle, style: &JsValue) -> Result<(), JsValue>;

    #[wasm_bindgen(method, catch, js_name = setProjection)]
    pub fn set_projection(this: &MapHandle, projection: &JsValue) -> Result<(), JsValue>;

    #[wasm_bindgen(method)]
    pub fn on(this: &MapHandle, event: &str, listener: &Function);

    #[wasm_bindgen(method)]
    pub fn off(this: &MapHandle, event: &str, listener: &Function);

    #[wasm_bindgen(method)]
    pub fn remove(this: &MapHandle);

    #[derive(Debug, Clone)]
    #[wasm_bindgen(js_namespace = maplibregl, js_name = Marker)]
    pub type MarkerBinding;

    #[wasm_bindgen(constructor, js_namespace = maplibregl, js_class = "Marker")]
    pub fn new(options: &JsValue) -> MarkerBinding;

    #[wasm_bindgen(method, js_name = setLngLat)]
    pub fn set_lng_lat(this: &MarkerBinding, lng_lat: &JsValue) -> MarkerBinding;

    #[wasm_bindgen(method, js_name = addTo)]
    pub fn add_to(this: &MarkerBinding, map: &MapHandle) -> MarkerBinding;

    #[wasm_bindgen(method, js_name = remove)]
    pub fn remove_marker(this: &MarkerBinding) -> MarkerBinding;
}

/// Create the map inside `container`, framed on `initial` and drawn with
/// the style for `layer`.
///
/// # Errors
/// Returns an error if MapLibre is not loaded or rejects the options.
pub fn create_map(
    container: &HtmlElement,
    initial: CameraTarget,
    layer: MapLayer,
) -> Result<MapHandle, JsValue> {
    let options = Object::new();
    Reflect::set(&options, &"container".into(), container)?;
    Reflect::set(
        &options,
        &"style".into(),
        &style::style_for(layer).map_err(JsValue::from)?,
    )?;
    Reflect::set(
        &options,
        &"center".into(),
        &lng_lat(initial.center.lon, initial.center.lat),
    )?;
    Reflect::set(&options, &"zoom".into(), &initial.zoom.into())?;
    Reflect::set(&options, &"attributionControl".into(), &JsValue::FALSE)?;
    Reflect::set(&options, &"pitchWithRotate".into(), &JsValue::FALSE)?;
    MapHandle::construct(&options)
}

/// Switch to globe rendering where the MapLibre build supports it.
pub fn apply_globe(map: &MapHandle) {
    let projection = Object::new();
    if Reflect::set(&projection, &"name".into(), &"globe".into()).is_err() {
        return;
    }
    if let Err(err) = map.set_projection(&projection) {
        log::debug!("globe projection unavailable: {}", js_error_message(&err));
    }
}

/// `[lng, lat]` array in MapLibre's order.
#[must_use]
pub fn lng_lat(lon: f64, lat: f64) -> JsValue {
    js_sys::Array::of2(&lon.into(), &lat.into()).into()
}

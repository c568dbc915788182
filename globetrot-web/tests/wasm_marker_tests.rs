#![cfg(target_arch = "wasm32")]

use std::cell::Cell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::HtmlElement;

use globetrot_tour::MarkerHandle;
use globetrot_tour::testing::location_at;
use globetrot_web::map::DomMarker;

wasm_bindgen_test::wasm_bindgen_test_configure!(run_in_browser);

fn circle_width(wrapper: &HtmlElement) -> String {
    let circle: HtmlElement = wrapper
        .first_element_child()
        .expect("circle element")
        .dyn_into()
        .expect("html element");
    circle
        .style()
        .get_property_value("width")
        .expect("width property")
}

#[wasm_bindgen_test]
fn highlight_mutates_the_same_element() {
    let (mut marker, wrapper) = DomMarker::build(&location_at("sajek", 92.29, 23.38)).expect("build");
    assert_eq!(circle_width(&wrapper), "40px");
    marker.set_active(true);
    assert_eq!(circle_width(&wrapper), "56px");
    marker.set_active(false);
    assert_eq!(circle_width(&wrapper), "40px");
}

#[wasm_bindgen_test]
fn click_runs_the_latest_handler() {
    let (mut marker, wrapper) = DomMarker::build(&location_at("sylhet", 91.87, 24.89)).expect("build");
    wrapper.click();

    let first = Rc::new(Cell::new(0));
    let second = Rc::new(Cell::new(0));
    let hits = Rc::clone(&first);
    marker.set_click_handler(Rc::new(move || hits.set(hits.get() + 1)));
    let hits = Rc::clone(&second);
    marker.set_click_handler(Rc::new(move || hits.set(hits.get() + 1)));
    wrapper.click();

    assert_eq!(first.get(), 0);
    assert_eq!(second.get(), 1);
}

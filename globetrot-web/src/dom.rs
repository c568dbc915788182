use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, HtmlElement, Window};

/// Retrieve the global `window` object, if running in a browser.
#[must_use]
pub fn window() -> Option<Window> {
    web_sys::window()
}

/// Retrieve the document object for DOM interactions.
#[must_use]
pub fn document() -> Option<Document> {
    window().and_then(|w| w.document())
}

/// Convert a JavaScript value into a readable string for error reporting.
#[must_use]
pub fn js_error_message(value: &JsValue) -> String {
    value
        .as_string()
        .or_else(|| {
            value
                .dyn_ref::<js_sys::Error>()
                .map(|err| err.message().into())
        })
        .unwrap_or_else(|| format!("{value:?}"))
}

/// Log an error message to the browser console.
pub fn console_error(message: &str) {
    web_sys::console::error_1(&JsValue::from(message));
}

/// Create a detached `<tag>` element.
///
/// # Errors
/// Returns an error if there is no document or the element cannot be created.
pub fn create_html_element(tag: &str) -> Result<HtmlElement, JsValue> {
    let document = document().ok_or_else(|| JsValue::from_str("document unavailable"))?;
    document.create_element(tag)?.dyn_into::<HtmlElement>().map_err(JsValue::from)
}

/// Apply a batch of inline style properties, logging any the browser rejects.
pub fn set_styles(element: &HtmlElement, styles: &[(&str, &str)]) {
    let style = element.style();
    for (property, value) in styles {
        if let Err(err) = style.set_property(property, value) {
            log::warn!(
                "could not set style {property}={value}: {}",
                js_error_message(&err)
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_errors_pass_through() {
        assert_eq!(js_error_message(&JsValue::from_str("boom")), "boom");
    }
}

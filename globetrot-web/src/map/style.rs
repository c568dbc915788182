//! Base map styles. Both are keyless public tile sources.
use serde::Serialize;
use serde_json::{Value, json};
use wasm_bindgen::JsValue;

use globetrot_tour::MapLayer;

pub const STREET_STYLE: &str = "https://tiles.openfreemap.org/styles/liberty";

const IMAGERY_TILES: &str =
    "https://server.arcgisonline.com/ArcGIS/rest/services/World_Imagery/MapServer/tile/{z}/{y}/{x}";
const LABEL_TILES: &str = "https://server.arcgisonline.com/ArcGIS/rest/services/Reference/World_Boundaries_and_Places/MapServer/tile/{z}/{y}/{x}";

/// Raster imagery with a place-name overlay.
#[must_use]
pub fn satellite_style() -> Value {
    json!({
        "version": 8,
        "sources": {
            "satellite": {
                "type": "raster",
                "tiles": [IMAGERY_TILES],
                "tileSize": 256,
                "attribution": "© Esri",
                "maxzoom": 19
            },
            "labels": {
                "type": "raster",
                "tiles": [LABEL_TILES],
                "tileSize": 256
            }
        },
        "layers": [
            { "id": "satellite-layer", "type": "raster", "source": "satellite" },
            { "id": "labels-layer", "type": "raster", "source": "labels" }
        ]
    })
}

/// Style argument for `Map#setStyle`.
///
/// # Errors
/// Returns an error if the inline style cannot be converted to a JS object.
pub fn style_for(layer: MapLayer) -> Result<JsValue, serde_wasm_bindgen::Error> {
    match layer {
        MapLayer::Street => Ok(JsValue::from_str(STREET_STYLE)),
        MapLayer::Satellite => {
            satellite_style().serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        }
    }
}

use serde::Serialize;
use std::time::Duration;

use globetrot_tour::{CameraError, CameraTarget, MapCamera, MapLayer};

use super::{MapHandle, style};
use crate::dom::js_error_message;

#[derive(Serialize)]
struct FlyOptions {
    center: [f64; 2],
    zoom: f64,
    duration: u64,
    essential: bool,
}

/// [`MapCamera`] over a live MapLibre map.
#[derive(Debug, Clone)]
pub struct MapLibreCamera {
    map: MapHandle,
    overview: CameraTarget,
}

impl MapLibreCamera {
    #[must_use]
    pub const fn new(map: MapHandle, overview: CameraTarget) -> Self {
        Self { map, overview }
    }

    #[must_use]
    pub const fn map(&self) -> &MapHandle {
        &self.map
    }
}

impl MapCamera for MapLibreCamera {
    fn fly_to(&mut self, target: CameraTarget, duration: Duration) -> Result<(), CameraError> {
        if !target.center.is_valid() {
            return Err(CameraError::InvalidCoordinate(target.center));
        }
        let options = FlyOptions {
            center: target.center.into(),
            zoom: target.zoom,
            duration: u64::try_from(duration.as_millis()).unwrap_or(u64::MAX),
            essential: true,
        };
        let options = serde_wasm_bindgen::to_value(&options)
            .map_err(|err| CameraError::Rejected(err.to_string()))?;
        self.map
            .fly_to(&options)
            .map_err(|err| CameraError::Rejected(js_error_message(&err)))
    }

    fn overview_target(&self) -> CameraTarget {
        self.overview
    }

    fn set_layer(&mut self, layer: MapLayer) -> Result<(), CameraError> {
        let style = style::style_for(layer).map_err(|err| CameraError::Rejected(err.to_string()))?;
        self.map
            .set_style(&style)
            .map_err(|err| CameraError::Rejected(js_error_message(&err)))
    }
}

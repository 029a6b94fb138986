// Copyright 2025 Lars Brubaker
// WASM bindings for farm-area

use farm_area::{
    AreaMeasurementEngine, GeoPoint, GeolocationError, MeasureConfig, MeasurementListener, Polygon,
};
use js_sys::{Float64Array, Function};
use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn main_js() {
    console_error_panic_hook::set_once();
}

/// Forwards engine notifications to optional JS functions.
#[derive(Default)]
struct JsListener {
    area: Option<Function>,
    polygon: Option<Function>,
    location: Option<Function>,
}

impl MeasurementListener for JsListener {
    fn on_area_change(&mut self, hectares: f64) {
        if let Some(f) = &self.area {
            let _ = f.call1(&JsValue::NULL, &JsValue::from_f64(hectares));
        }
    }

    fn on_polygon_change(&mut self, points: &[GeoPoint]) {
        if let Some(f) = &self.polygon {
            let flat = Polygon::from(points.to_vec()).to_flat();
            let _ = f.call1(&JsValue::NULL, &Float64Array::from(&flat[..]));
        }
    }

    fn on_location_change(&mut self, point: GeoPoint) {
        if let Some(f) = &self.location {
            let _ = f.call2(
                &JsValue::NULL,
                &JsValue::from_f64(point.lat),
                &JsValue::from_f64(point.lng),
            );
        }
    }
}

/// Map-side measuring tool. Feed it clicks, read back hectares.
#[wasm_bindgen]
pub struct AreaTool {
    inner: AreaMeasurementEngine<JsListener>,
}

#[wasm_bindgen]
impl AreaTool {
    /// `config_json` may be empty for defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: &str) -> Result<AreaTool, JsValue> {
        let config = if config_json.trim().is_empty() {
            MeasureConfig::default()
        } else {
            MeasureConfig::from_json(config_json).map_err(|e| JsValue::from_str(&e.to_string()))?
        };
        Ok(AreaTool {
            inner: AreaMeasurementEngine::with_listener(config, JsListener::default()),
        })
    }

    /// `f(hectares)`
    pub fn set_on_area_change(&mut self, f: Option<Function>) {
        self.inner.listener_mut().area = f;
    }

    /// `f(Float64Array [lat0, lng0, ...])`
    pub fn set_on_polygon_change(&mut self, f: Option<Function>) {
        self.inner.listener_mut().polygon = f;
    }

    /// `f(lat, lng)`
    pub fn set_on_location_change(&mut self, f: Option<Function>) {
        self.inner.listener_mut().location = f;
    }

    pub fn start_drawing(&mut self) {
        self.inner.start_drawing();
    }

    /// Map click. Returns true if the point was added.
    pub fn accept_point(&mut self, lat: f64, lng: f64) -> Result<bool, JsValue> {
        self.inner
            .accept_point(GeoPoint::new(lat, lng))
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Mouse move while drawing.
    pub fn hover(&mut self, lat: f64, lng: f64) {
        self.inner.set_temporary_point(Some(GeoPoint::new(lat, lng)));
    }

    pub fn clear_hover(&mut self) {
        self.inner.set_temporary_point(None);
    }

    /// Committed hectares, or undefined if fewer than three points were drawn.
    pub fn finish_drawing(&mut self) -> Option<f64> {
        self.inner.finish_drawing()
    }

    pub fn clear_polygon(&mut self) {
        self.inner.clear_polygon();
    }

    pub fn is_drawing(&self) -> bool {
        self.inner.is_drawing()
    }

    pub fn area(&self) -> f64 {
        self.inner.area()
    }

    pub fn preview_area(&self) -> f64 {
        self.inner.preview_area()
    }

    /// Flat [lat0, lng0, lat1, lng1, ...] of the current polygon.
    pub fn points(&self) -> Vec<f64> {
        self.inner.polygon().to_flat()
    }

    /// Successful `navigator.geolocation` fix.
    pub fn location_found(&mut self, lat: f64, lng: f64) -> Result<(), JsValue> {
        self.inner
            .apply_location_fix(Ok(GeoPoint::new(lat, lng)))
            .map(|_| ())
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Failed fix; `code` is `GeolocationPositionError.code`, or 0 when the
    /// API is missing. Returns the message to show the user.
    pub fn location_failed(&mut self, code: u16) -> String {
        match self.inner.apply_location_fix(Err(GeolocationError::from_code(code))) {
            Err(e) => e.to_string(),
            Ok(_) => String::new(),
        }
    }

    pub fn center_lat(&self) -> f64 {
        self.inner.map_view().center.lat
    }

    pub fn center_lng(&self) -> f64 {
        self.inner.map_view().center.lng
    }

    pub fn zoom(&self) -> u8 {
        self.inner.map_view().zoom
    }
}

/// Hectares enclosed by a flat [lat0, lng0, lat1, lng1, ...] outline.
#[wasm_bindgen]
pub fn polygon_hectares(coords: &[f64]) -> f64 {
    Polygon::from_flat(coords).area_hectares()
}

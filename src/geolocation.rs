// Copyright 2025 Lars Brubaker
// License: MIT
//
// Map view state and device geolocation fixes.

use serde::{Deserialize, Serialize};

use crate::config::MeasureConfig;
use crate::error::GeolocationError;
use crate::geom::GeoPoint;

/// Outcome of a single device geolocation request.
pub type LocationFix = Result<GeoPoint, GeolocationError>;

/// Where the host map is centred.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MapView {
    pub center: GeoPoint,
    pub zoom: u8,
}

impl MapView {
    pub fn new(center: GeoPoint, zoom: u8) -> Self {
        MapView { center, zoom }
    }

    pub fn from_config(config: &MeasureConfig) -> Self {
        MapView::new(config.default_center, config.default_zoom)
    }

    /// Centre on `point`, zooming in to at least `zoom`.
    pub fn recenter(&mut self, point: GeoPoint, zoom: u8) {
        self.center = point;
        self.zoom = self.zoom.max(zoom);
    }
}

impl Default for MapView {
    fn default() -> Self {
        MapView::from_config(&MeasureConfig::default())
    }
}

// farm-area: polygon area measurement for farm mapping
// Copyright 2025 Lars Brubaker
// License: MIT

pub mod config;
pub mod engine;
pub mod error;
pub mod geolocation;
pub mod geom;

pub use config::MeasureConfig;
pub use engine::{AreaMeasurementEngine, Callbacks, DrawState, DrawingSession, MeasurementListener};
pub use error::{GeolocationError, MeasureError, Result};
pub use geolocation::{LocationFix, MapView};
pub use geom::{compute_area, polygon_area_m2, GeoPoint, Polygon};

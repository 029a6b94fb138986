// Copyright 2025 Lars Brubaker
// License: MIT
//
// Host notification hooks for the measurement engine.

use crate::geom::{GeoPoint, Real};

/// Receives committed results from an `AreaMeasurementEngine`.
///
/// Every method defaults to a no-op. Calls are made synchronously from inside
/// the engine operation that caused them.
pub trait MeasurementListener {
    /// Committed area changed (finish with a closed polygon, or clear).
    fn on_area_change(&mut self, _hectares: Real) {}

    /// Finalized vertex list on finish, or an empty slice on clear.
    fn on_polygon_change(&mut self, _points: &[GeoPoint]) {}

    /// The map was recentred on a geolocation fix.
    fn on_location_change(&mut self, _point: GeoPoint) {}
}

/// Ignores all notifications.
impl MeasurementListener for () {}

impl<L: MeasurementListener + ?Sized> MeasurementListener for Box<L> {
    fn on_area_change(&mut self, hectares: Real) {
        (**self).on_area_change(hectares)
    }

    fn on_polygon_change(&mut self, points: &[GeoPoint]) {
        (**self).on_polygon_change(points)
    }

    fn on_location_change(&mut self, point: GeoPoint) {
        (**self).on_location_change(point)
    }
}

type AreaFn = Box<dyn FnMut(Real)>;
type PolygonFn = Box<dyn FnMut(&[GeoPoint])>;
type LocationFn = Box<dyn FnMut(GeoPoint)>;

/// Closure-backed listener, for hosts that hand over plain callbacks.
#[derive(Default)]
pub struct Callbacks {
    area: Option<AreaFn>,
    polygon: Option<PolygonFn>,
    location: Option<LocationFn>,
}

impl Callbacks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_area(mut self, f: impl FnMut(Real) + 'static) -> Self {
        self.area = Some(Box::new(f));
        self
    }

    pub fn with_polygon(mut self, f: impl FnMut(&[GeoPoint]) + 'static) -> Self {
        self.polygon = Some(Box::new(f));
        self
    }

    pub fn with_location(mut self, f: impl FnMut(GeoPoint) + 'static) -> Self {
        self.location = Some(Box::new(f));
        self
    }
}

impl MeasurementListener for Callbacks {
    fn on_area_change(&mut self, hectares: Real) {
        if let Some(f) = self.area.as_mut() {
            f(hectares);
        }
    }

    fn on_polygon_change(&mut self, points: &[GeoPoint]) {
        if let Some(f) = self.polygon.as_mut() {
            f(points);
        }
    }

    fn on_location_change(&mut self, point: GeoPoint) {
        if let Some(f) = self.location.as_mut() {
            f(point);
        }
    }
}

// Copyright 2025 Lars Brubaker
// Shared test utilities for farm-area tests.

#![allow(dead_code)]

use farm_area::geom::EARTH_RADIUS_M;
use farm_area::{GeoPoint, MeasurementListener};

/// Route `log` output through the test harness. Safe to call repeatedly.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// One notification, in the order the engine delivered it.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    Area(f64),
    Polygon(Vec<GeoPoint>),
    Location(GeoPoint),
}

/// Listener that records every notification.
#[derive(Default, Debug)]
pub struct Recorder {
    pub events: Vec<Event>,
}

impl Recorder {
    pub fn areas(&self) -> Vec<f64> {
        self.events
            .iter()
            .filter_map(|e| match e {
                Event::Area(a) => Some(*a),
                _ => None,
            })
            .collect()
    }

    pub fn polygons(&self) -> Vec<Vec<GeoPoint>> {
        self.events
            .iter()
            .filter_map(|e| match e {
                Event::Polygon(p) => Some(p.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn locations(&self) -> Vec<GeoPoint> {
        self.events
            .iter()
            .filter_map(|e| match e {
                Event::Location(p) => Some(*p),
                _ => None,
            })
            .collect()
    }
}

impl MeasurementListener for Recorder {
    fn on_area_change(&mut self, hectares: f64) {
        self.events.push(Event::Area(hectares));
    }

    fn on_polygon_change(&mut self, points: &[GeoPoint]) {
        self.events.push(Event::Polygon(points.to_vec()));
    }

    fn on_location_change(&mut self, point: GeoPoint) {
        self.events.push(Event::Location(point));
    }
}

/// Degrees of arc spanning `meters` along a great circle of radius R.
pub fn meters_to_degrees(meters: f64) -> f64 {
    meters / (EARTH_RADIUS_M * std::f64::consts::PI / 180.0)
}

/// Axis-aligned square with its south-west corner at (lat, lng), listed
/// counter-clockwise in (lng, lat) space.
pub fn square(lat: f64, lng: f64, side_deg: f64) -> Vec<GeoPoint> {
    vec![
        GeoPoint::new(lat, lng),
        GeoPoint::new(lat, lng + side_deg),
        GeoPoint::new(lat + side_deg, lng + side_deg),
        GeoPoint::new(lat + side_deg, lng),
    ]
}

/// Irregular simple (non-self-intersecting) farm outline near Kumasi.
pub fn farm_outline() -> Vec<GeoPoint> {
    vec![
        GeoPoint::new(6.6800, -1.6300),
        GeoPoint::new(6.6804, -1.6291),
        GeoPoint::new(6.6811, -1.6288),
        GeoPoint::new(6.6815, -1.6296),
        GeoPoint::new(6.6812, -1.6305),
        GeoPoint::new(6.6806, -1.6308),
    ]
}

pub fn assert_rel_eq(actual: f64, expected: f64, rel: f64, label: &str) {
    let diff = (actual - expected).abs();
    let scale = expected.abs().max(f64::MIN_POSITIVE);
    assert!(
        diff / scale <= rel,
        "{}: expected ~{}, got {} (rel diff={})",
        label,
        expected,
        actual,
        diff / scale
    );
}

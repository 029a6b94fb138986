// Copyright 2025 Lars Brubaker
// License: MIT
//
// Geographic points, polygons and the spherical-excess area estimate.
//
// Area results must stay bit-compatible with previously stored farm areas:
// same constant, same term order, abs before the halving, then the hectare
// division.

use serde::{Deserialize, Serialize};

pub type Real = f64;

/// WGS84 equatorial radius in meters.
pub const EARTH_RADIUS_M: Real = 6378137.0;

/// Square meters per hectare.
pub const M2_PER_HECTARE: Real = 10000.0;

/// Minimum vertex count for a polygon to enclose any area.
pub const MIN_POLYGON_POINTS: usize = 3;

/// A (latitude, longitude) pair in decimal degrees.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: Real,
    pub lng: Real,
}

impl GeoPoint {
    #[inline]
    pub const fn new(lat: Real, lng: Real) -> Self {
        GeoPoint { lat, lng }
    }

    /// True if both coordinates are finite and within WGS84 degree ranges.
    pub fn is_valid(&self) -> bool {
        is_valid_lat(self.lat) && is_valid_lng(self.lng)
    }
}

impl From<(Real, Real)> for GeoPoint {
    fn from((lat, lng): (Real, Real)) -> Self {
        GeoPoint::new(lat, lng)
    }
}

#[inline]
pub fn is_valid_lat(lat: Real) -> bool {
    lat.is_finite() && (-90.0..=90.0).contains(&lat)
}

#[inline]
pub fn is_valid_lng(lng: Real) -> bool {
    lng.is_finite() && (-180.0..=180.0).contains(&lng)
}

/// Ordered vertex list. The closing edge (last -> first) is implicit.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Polygon(Vec<GeoPoint>);

impl Polygon {
    pub fn new() -> Self {
        Polygon(Vec::new())
    }

    /// Build from a flat `[lat0, lng0, lat1, lng1, ...]` slice.
    /// A trailing odd value is dropped.
    pub fn from_flat(coords: &[Real]) -> Self {
        Polygon(
            coords
                .chunks_exact(2)
                .map(|c| GeoPoint::new(c[0], c[1]))
                .collect(),
        )
    }

    /// Flat `[lat0, lng0, lat1, lng1, ...]` copy of the vertices.
    pub fn to_flat(&self) -> Vec<Real> {
        let mut out = Vec::with_capacity(self.0.len() * 2);
        for p in &self.0 {
            out.push(p.lat);
            out.push(p.lng);
        }
        out
    }

    pub fn push(&mut self, p: GeoPoint) {
        self.0.push(p);
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether the polygon has enough vertices to enclose an area.
    pub fn is_closed(&self) -> bool {
        self.0.len() >= MIN_POLYGON_POINTS
    }

    pub fn points(&self) -> &[GeoPoint] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, GeoPoint> {
        self.0.iter()
    }

    pub fn area_hectares(&self) -> Real {
        compute_area(&self.0)
    }
}

impl From<Vec<GeoPoint>> for Polygon {
    fn from(points: Vec<GeoPoint>) -> Self {
        Polygon(points)
    }
}

impl FromIterator<GeoPoint> for Polygon {
    fn from_iter<I: IntoIterator<Item = GeoPoint>>(iter: I) -> Self {
        Polygon(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Polygon {
    type Item = &'a GeoPoint;
    type IntoIter = std::slice::Iter<'a, GeoPoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Degrees to radians, evaluated as `deg * PI / 180` (not `f64::to_radians`).
#[inline]
pub fn deg_to_rad(deg: Real) -> Real {
    deg * std::f64::consts::PI / 180.0
}

/// Enclosed area in square meters. Returns exactly 0 below three points.
///
/// Each edge (i, j) with j = (i + 1) mod n contributes
/// `(lon_j - lon_i) * (2 + sin(lat_i) + sin(lat_j))` in radians; the sum is
/// scaled by R^2 and halved. Winding direction is discarded by the abs.
/// Non-finite input propagates as NaN.
pub fn polygon_area_m2(points: &[GeoPoint]) -> Real {
    let n = points.len();
    if n < MIN_POLYGON_POINTS {
        return 0.0;
    }
    let mut sum = 0.0;
    for i in 0..n {
        let j = (i + 1) % n;
        let (lat_i, lon_i) = (deg_to_rad(points[i].lat), deg_to_rad(points[i].lng));
        let (lat_j, lon_j) = (deg_to_rad(points[j].lat), deg_to_rad(points[j].lng));
        sum += (lon_j - lon_i) * (2.0 + lat_i.sin() + lat_j.sin());
    }
    (sum * EARTH_RADIUS_M * EARTH_RADIUS_M).abs() / 2.0
}

/// Enclosed area in hectares. Returns exactly 0 below three points.
pub fn compute_area(points: &[GeoPoint]) -> Real {
    if points.len() < MIN_POLYGON_POINTS {
        return 0.0;
    }
    polygon_area_m2(points) / M2_PER_HECTARE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fewer_than_three_points_is_zero() {
        assert_eq!(compute_area(&[]), 0.0);
        assert_eq!(compute_area(&[GeoPoint::new(5.0, -1.0)]), 0.0);
        assert_eq!(
            compute_area(&[GeoPoint::new(5.0, -1.0), GeoPoint::new(5.001, -1.0)]),
            0.0
        );
    }

    #[test]
    fn degenerate_two_point_input_is_zero_even_with_nan() {
        let pts = [GeoPoint::new(Real::NAN, 0.0), GeoPoint::new(0.0, 0.0)];
        assert_eq!(compute_area(&pts), 0.0);
    }

    #[test]
    fn nan_coordinate_propagates() {
        let pts = [
            GeoPoint::new(0.0, 0.0),
            GeoPoint::new(Real::NAN, 0.001),
            GeoPoint::new(0.001, 0.001),
        ];
        assert!(compute_area(&pts).is_nan());
    }

    #[test]
    fn triangle_near_accra_matches_reference_value() {
        let pts = [
            GeoPoint::new(5.0, -1.0),
            GeoPoint::new(5.001, -1.0),
            GeoPoint::new(5.001, -1.001),
        ];
        let ha = compute_area(&pts);
        assert!((ha - 0.617_243_209_645).abs() < 1e-9, "got {}", ha);
    }

    #[test]
    fn hectare_is_square_meters_over_ten_thousand() {
        let pts = [
            GeoPoint::new(0.0, 0.0),
            GeoPoint::new(0.0, 0.002),
            GeoPoint::new(0.002, 0.002),
            GeoPoint::new(0.002, 0.0),
        ];
        assert_eq!(compute_area(&pts), polygon_area_m2(&pts) / 10000.0);
    }

    #[test]
    fn coordinate_ranges() {
        assert!(GeoPoint::new(90.0, 180.0).is_valid());
        assert!(GeoPoint::new(-90.0, -180.0).is_valid());
        assert!(!GeoPoint::new(90.5, 0.0).is_valid());
        assert!(!GeoPoint::new(0.0, -180.5).is_valid());
        assert!(!GeoPoint::new(Real::NAN, 0.0).is_valid());
        assert!(!GeoPoint::new(0.0, Real::INFINITY).is_valid());
    }

    #[test]
    fn flat_conversion_drops_trailing_value() {
        let poly = Polygon::from_flat(&[5.0, -1.0, 5.001, -1.0, 7.0]);
        assert_eq!(poly.len(), 2);
        assert_eq!(poly.to_flat(), vec![5.0, -1.0, 5.001, -1.0]);
        assert!(!poly.is_closed());
    }

    #[test]
    fn polygon_serializes_as_point_array() {
        let poly: Polygon = vec![GeoPoint::new(5.0, -1.0)].into();
        let json = serde_json::to_string(&poly).unwrap();
        assert_eq!(json, r#"[{"lat":5.0,"lng":-1.0}]"#);
        let back: Polygon = serde_json::from_str(&json).unwrap();
        assert_eq!(back, poly);
    }
}

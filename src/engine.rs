// Copyright 2025 Lars Brubaker
// License: MIT
//
// Area measurement engine: the click-to-draw session state machine plus
// geolocation recentring.
//
// The host owns the engine and forwards map clicks, hover positions, button
// presses and geolocation fixes. Results flow back through a
// `MeasurementListener`. Everything runs synchronously on the caller's thread.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::config::MeasureConfig;
use crate::error::{MeasureError, Result};
use crate::geolocation::{LocationFix, MapView};
use crate::geom::{compute_area, GeoPoint, Polygon, Real};

mod listener;

pub use listener::{Callbacks, MeasurementListener};

// ─────────────────────────────── Session state ─────────────────────────────────

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DrawState {
    Idle,
    Drawing,
}

/// The one in-progress (or last finished) drawing.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DrawingSession {
    pub active: bool,
    pub points: Polygon,
    /// Hover preview vertex; never committed.
    pub temporary: Option<GeoPoint>,
}

impl DrawingSession {
    fn reset(&mut self) {
        self.points.clear();
        self.temporary = None;
    }
}

// ─────────────────────────────── Engine ────────────────────────────────────────

pub struct AreaMeasurementEngine<L: MeasurementListener = ()> {
    config: MeasureConfig,
    session: DrawingSession,
    /// Last committed area in hectares.
    area: Real,
    view: MapView,
    listener: L,
}

impl AreaMeasurementEngine<()> {
    /// Engine with default config and no listener.
    pub fn new() -> Self {
        Self::with_listener(MeasureConfig::default(), ())
    }
}

impl Default for AreaMeasurementEngine<()> {
    fn default() -> Self {
        Self::new()
    }
}

impl<L: MeasurementListener> AreaMeasurementEngine<L> {
    pub fn with_listener(config: MeasureConfig, listener: L) -> Self {
        let view = MapView::from_config(&config);
        AreaMeasurementEngine {
            config,
            session: DrawingSession::default(),
            area: 0.0,
            view,
            listener,
        }
    }

    // ─────── Drawing protocol ─────────────────────────────────────────────────

    /// Idle -> Drawing. Discards any previous polygon and hover point.
    /// Calling this while already drawing restarts the session.
    pub fn start_drawing(&mut self) {
        if self.session.active {
            debug!("restarting drawing session, dropping {} points", self.session.points.len());
        } else {
            debug!("drawing session started");
        }
        self.session.reset();
        self.session.active = true;
    }

    /// Append `p` to the polygon if a session is active.
    ///
    /// Returns `Ok(false)` when idle. With coordinate validation enabled an
    /// invalid point is rejected and the session is left untouched.
    pub fn accept_point(&mut self, p: GeoPoint) -> Result<bool> {
        self.check_point(p)?;
        if !self.session.active {
            debug!("ignoring point ({}, {}) while idle", p.lat, p.lng);
            return Ok(false);
        }
        self.session.points.push(p);
        debug!("point {} at ({}, {})", self.session.points.len(), p.lat, p.lng);
        Ok(true)
    }

    /// Drawing -> Idle.
    ///
    /// With three or more points the area is computed, committed and reported
    /// through `on_area_change` then `on_polygon_change`. With fewer, nothing
    /// is reported, the committed area keeps its previous value, and `None` is
    /// returned. Finishing while idle is a no-op.
    pub fn finish_drawing(&mut self) -> Option<Real> {
        if !self.session.active {
            debug!("finish requested while idle");
            return None;
        }
        self.session.active = false;
        self.session.temporary = None;

        if !self.session.points.is_closed() {
            debug!(
                "finished with {} points, need 3 for an area",
                self.session.points.len()
            );
            return None;
        }

        let area = compute_area(self.session.points.points());
        self.area = area;
        info!(
            "polygon committed: {} points, {:.4} ha",
            self.session.points.len(),
            area
        );
        self.listener.on_area_change(area);
        self.listener.on_polygon_change(self.session.points.points());
        Some(area)
    }

    /// Discard all points from any state, commit area 0 and report an empty
    /// polygon.
    pub fn clear_polygon(&mut self) {
        debug!("clearing polygon ({} points)", self.session.points.len());
        self.session.reset();
        self.session.active = false;
        self.area = 0.0;
        self.listener.on_area_change(0.0);
        self.listener.on_polygon_change(&[]);
    }

    /// Set or clear the hover preview vertex. Ignored while idle.
    pub fn set_temporary_point(&mut self, p: Option<GeoPoint>) {
        if self.session.active {
            self.session.temporary = p;
        }
    }

    /// Area of the drawn points plus the hover vertex, without committing or
    /// notifying.
    pub fn preview_area(&self) -> Real {
        match self.session.temporary {
            Some(t) => {
                let mut pts = self.session.points.points().to_vec();
                pts.push(t);
                compute_area(&pts)
            }
            None => compute_area(self.session.points.points()),
        }
    }

    // ─────── Geolocation ──────────────────────────────────────────────────────

    /// Apply the result of a device geolocation request.
    ///
    /// A fix recentres the map and is reported through `on_location_change`.
    /// A failure leaves every piece of state unchanged and is handed back for
    /// the host to surface.
    pub fn apply_location_fix(&mut self, fix: LocationFix) -> Result<GeoPoint> {
        let point = fix.map_err(|e| {
            warn!("geolocation failed: {}", e);
            MeasureError::from(e)
        })?;
        self.check_point(point)?;
        self.view.recenter(point, self.config.locate_zoom);
        info!("recentred on ({}, {}) at zoom {}", point.lat, point.lng, self.view.zoom);
        self.listener.on_location_change(point);
        Ok(point)
    }

    // ─────── Accessors ────────────────────────────────────────────────────────

    pub fn state(&self) -> DrawState {
        if self.session.active {
            DrawState::Drawing
        } else {
            DrawState::Idle
        }
    }

    pub fn is_drawing(&self) -> bool {
        self.session.active
    }

    pub fn points(&self) -> &[GeoPoint] {
        self.session.points.points()
    }

    pub fn polygon(&self) -> &Polygon {
        &self.session.points
    }

    pub fn temporary_point(&self) -> Option<GeoPoint> {
        self.session.temporary
    }

    pub fn session(&self) -> &DrawingSession {
        &self.session
    }

    /// Last committed area in hectares.
    pub fn area(&self) -> Real {
        self.area
    }

    pub fn map_view(&self) -> MapView {
        self.view
    }

    pub fn config(&self) -> &MeasureConfig {
        &self.config
    }

    pub fn listener(&self) -> &L {
        &self.listener
    }

    pub fn listener_mut(&mut self) -> &mut L {
        &mut self.listener
    }

    pub fn into_listener(self) -> L {
        self.listener
    }

    fn check_point(&self, p: GeoPoint) -> Result<()> {
        if self.config.validate_coordinates && !p.is_valid() {
            warn!("rejecting invalid coordinate ({}, {})", p.lat, p.lng);
            return Err(MeasureError::InvalidCoordinate { lat: p.lat, lng: p.lng });
        }
        Ok(())
    }
}

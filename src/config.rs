// Copyright 2025 Lars Brubaker
// License: MIT
//
// Engine configuration. Values come from defaults, environment variables
// (`FARM_AREA_*`) or a JSON document supplied by the host.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{MeasureError, Result};
use crate::geom::GeoPoint;

pub const ENV_VALIDATE: &str = "FARM_AREA_VALIDATE";
pub const ENV_CENTER_LAT: &str = "FARM_AREA_CENTER_LAT";
pub const ENV_CENTER_LNG: &str = "FARM_AREA_CENTER_LNG";
pub const ENV_ZOOM: &str = "FARM_AREA_ZOOM";
pub const ENV_LOCATE_ZOOM: &str = "FARM_AREA_LOCATE_ZOOM";

/// Accra.
pub const DEFAULT_CENTER: GeoPoint = GeoPoint::new(5.6037, -0.1870);
pub const DEFAULT_ZOOM: u8 = 13;
pub const DEFAULT_LOCATE_ZOOM: u8 = 16;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MeasureConfig {
    /// Reject non-finite or out-of-range points instead of letting them
    /// poison the area.
    pub validate_coordinates: bool,
    /// Initial map centre.
    pub default_center: GeoPoint,
    pub default_zoom: u8,
    /// Zoom applied when recentring on a geolocation fix.
    pub locate_zoom: u8,
}

impl Default for MeasureConfig {
    fn default() -> Self {
        MeasureConfig {
            validate_coordinates: false,
            default_center: DEFAULT_CENTER,
            default_zoom: DEFAULT_ZOOM,
            locate_zoom: DEFAULT_LOCATE_ZOOM,
        }
    }
}

impl MeasureConfig {
    /// Defaults overridden by `FARM_AREA_*` environment variables.
    /// Unset or unparsable variables keep the default.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Like `from_env`, reading variables through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = MeasureConfig::default();
        let validate_coordinates = lookup(ENV_VALIDATE)
            .and_then(|v| parse_flag(&v))
            .unwrap_or(defaults.validate_coordinates);
        let lat = parse_var(&lookup, ENV_CENTER_LAT).unwrap_or(defaults.default_center.lat);
        let lng = parse_var(&lookup, ENV_CENTER_LNG).unwrap_or(defaults.default_center.lng);
        let default_zoom = parse_var(&lookup, ENV_ZOOM).unwrap_or(defaults.default_zoom);
        let locate_zoom = parse_var(&lookup, ENV_LOCATE_ZOOM).unwrap_or(defaults.locate_zoom);

        MeasureConfig {
            validate_coordinates,
            default_center: GeoPoint::new(lat, lng),
            default_zoom,
            locate_zoom,
        }
    }

    /// Parse a JSON object; missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: MeasureConfig =
            serde_json::from_str(json).map_err(|e| MeasureError::Config(e.to_string()))?;
        if !config.default_center.is_valid() {
            return Err(MeasureError::Config(format!(
                "default_center out of range: ({}, {})",
                config.default_center.lat, config.default_center.lng
            )));
        }
        Ok(config)
    }
}

fn parse_var<T, F>(lookup: &F, key: &str) -> Option<T>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    lookup(key).and_then(|v| v.trim().parse().ok())
}

fn parse_flag(v: &str) -> Option<bool> {
    match v.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

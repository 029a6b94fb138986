// Copyright 2025 Lars Brubaker
// License: MIT
//
// Crate error types.

use thiserror::Error;

use crate::geom::Real;

/// Why a device geolocation request failed.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Error)]
pub enum GeolocationError {
    #[error("location permission denied")]
    PermissionDenied,
    #[error("position unavailable")]
    PositionUnavailable,
    #[error("location request timed out")]
    Timeout,
    #[error("geolocation is not supported on this device")]
    Unsupported,
}

impl GeolocationError {
    /// Map a browser `GeolocationPositionError.code` (1, 2, 3).
    /// Any other code is treated as `Unsupported`.
    pub fn from_code(code: u16) -> Self {
        match code {
            1 => GeolocationError::PermissionDenied,
            2 => GeolocationError::PositionUnavailable,
            3 => GeolocationError::Timeout,
            _ => GeolocationError::Unsupported,
        }
    }
}

#[derive(Debug, Error)]
pub enum MeasureError {
    #[error("invalid coordinate (lat {lat}, lng {lng})")]
    InvalidCoordinate { lat: Real, lng: Real },
    #[error(transparent)]
    Geolocation(#[from] GeolocationError),
    #[error("invalid configuration: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, MeasureError>;

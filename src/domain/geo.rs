// src/domain/geo.rs

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use thiserror::Error;

/// Equatorial radius of the spherical earth used by web map tiles, in meters.
pub const EARTH_RADIUS_M: f64 = 6_378_137.0;

/// Scale factor used when longitude is exactly zero (limit of `x / lon`).
const ZERO_LONGITUDE_SCALE: f64 = EARTH_RADIUS_M * PI / 180.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

/// Web-Mercator plane coordinates in meters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectedPoint {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProjectionError {
    #[error("latitude {0} must be finite and strictly between -90 and 90 degrees")]
    InvalidLatitude(f64),

    #[error("longitude {0} must be finite and between -180 and 180 degrees")]
    InvalidLongitude(f64),
}

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    pub fn project(&self) -> Result<ProjectedPoint, ProjectionError> {
        project(self.latitude, self.longitude)
    }
}

/// Projects degrees of latitude/longitude onto the Web-Mercator plane.
///
/// The `x / longitude` scale factor cancels the radian conversion baked into
/// `x`. At longitude 0 it is replaced by its limit `R * π / 180` so the
/// equator/meridian origin maps to a finite point.
pub fn project(latitude: f64, longitude: f64) -> Result<ProjectedPoint, ProjectionError> {
    if !latitude.is_finite() || latitude <= -90.0 || latitude >= 90.0 {
        return Err(ProjectionError::InvalidLatitude(latitude));
    }
    if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
        return Err(ProjectionError::InvalidLongitude(longitude));
    }

    let x = EARTH_RADIUS_M * longitude.to_radians();
    let scale = if longitude == 0.0 {
        ZERO_LONGITUDE_SCALE
    } else {
        x / longitude
    };
    let y = 180.0 / PI * (PI / 4.0 + latitude.to_radians() / 2.0).tan().ln() * scale;

    Ok(ProjectedPoint { x, y })
}

//! Validation utilities for geodetic input

use crate::error::CoreError;

pub const MIN_LATITUDE: f64 = -90.0;
pub const MAX_LATITUDE: f64 = 90.0;
pub const MIN_LONGITUDE: f64 = -180.0;
pub const MAX_LONGITUDE: f64 = 180.0;

/// Validate latitude is a finite value in [-90, 90]
pub fn validate_latitude(latitude: f64) -> Result<(), &'static str> {
    if !latitude.is_finite() {
        return Err("Latitude must be a finite number");
    }
    if !(MIN_LATITUDE..=MAX_LATITUDE).contains(&latitude) {
        return Err("Latitude must be between -90 and 90 degrees");
    }
    Ok(())
}

/// Validate longitude is a finite value in [-180, 180]
pub fn validate_longitude(longitude: f64) -> Result<(), &'static str> {
    if !longitude.is_finite() {
        return Err("Longitude must be a finite number");
    }
    if !(MIN_LONGITUDE..=MAX_LONGITUDE).contains(&longitude) {
        return Err("Longitude must be between -180 and 180 degrees");
    }
    Ok(())
}

/// Validate a latitude/longitude pair, reporting both values on failure
pub fn validate_coordinates(latitude: f64, longitude: f64) -> Result<(), CoreError> {
    validate_latitude(latitude)
        .and_then(|_| validate_longitude(longitude))
        .map_err(|_| CoreError::InvalidCoordinate {
            latitude,
            longitude,
        })
}

/// Validate a sphere radius is finite and strictly positive
pub fn validate_radius(radius: f64) -> Result<(), CoreError> {
    if radius.is_finite() && radius > 0.0 {
        Ok(())
    } else {
        Err(CoreError::InvalidRadius(radius))
    }
}

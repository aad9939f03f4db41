//! Coarse real-time sun direction.
//!
//! The sub-solar point sits on the equator and moves 15 degrees of longitude
//! west per hour, crossing the reference meridian at 12:00 UTC. Declination
//! is ignored, so the terminator is always a meridian pair. Good enough for
//! day/night shading, not for anything seasonal.

use chrono::{DateTime, Timelike, Utc};

use crate::geo::spherical_to_cartesian;
use crate::types::{CartesianPosition, GeoPoint};

pub const DEGREES_PER_HOUR: f64 = 15.0;

/// UTC hour at which the sun is over the reference meridian
pub const SOLAR_NOON_UTC_HOUR: f64 = 12.0;

/// Fractional hours since UTC midnight
fn utc_hours(now: DateTime<Utc>) -> f64 {
    let seconds = now.num_seconds_from_midnight() as f64 + now.nanosecond() as f64 * 1e-9;
    seconds / 3600.0
}

/// Longitude directly under the sun, in (-180, 180]
pub fn subsolar_longitude(now: DateTime<Utc>) -> f64 {
    let lon = (SOLAR_NOON_UTC_HOUR - utc_hours(now)) * DEGREES_PER_HOUR;
    // The leap-second nanosecond range can push hours to 24.0
    if lon <= -180.0 {
        lon + 360.0
    } else {
        lon
    }
}

pub fn subsolar_point(now: DateTime<Utc>) -> GeoPoint {
    GeoPoint::new_unchecked(0.0, subsolar_longitude(now))
}

/// Unit vector from the globe's centre toward the sun at `now`.
///
/// Pure in `now`; pass a fixed instant for deterministic output.
pub fn current_sun_direction(now: DateTime<Utc>) -> CartesianPosition {
    spherical_to_cartesian(0.0, subsolar_longitude(now), 1.0)
}

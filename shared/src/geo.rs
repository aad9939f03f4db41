//! Geodetic projection onto the render sphere.
//!
//! The render frame is right-handed with +y toward the north pole. Longitude
//! is measured from a reference meridian offset by 180 degrees so that the
//! equirectangular day texture and the feed's longitudes line up: the prime
//! meridian lands on +x and 90°E on -z.

use glam::{DQuat, DVec3};

use crate::error::{CoreError, CoreResult};
use crate::types::{CartesianPosition, GeoPoint, Orientation};
use crate::validation::{validate_coordinates, validate_radius};

/// Longitude offset between the feed convention and the render convention
pub const REFERENCE_MERIDIAN_OFFSET_DEG: f64 = 180.0;

/// Radius markers are placed at, slightly above the globe surface
pub const MARKER_RADIUS: f64 = 2.52;

/// Project a geodetic point onto a sphere of the given radius.
///
/// # Example
/// ```
/// use shared::geo::project;
/// use shared::GeoPoint;
///
/// let pole = project(GeoPoint::new(90.0, 0.0).unwrap(), 2.0).unwrap();
/// assert!((pole.y - 2.0).abs() < 1e-12);
/// ```
pub fn project(point: GeoPoint, radius: f64) -> CoreResult<CartesianPosition> {
    validate_radius(radius)?;
    Ok(spherical_to_cartesian(
        point.latitude(),
        point.longitude(),
        radius,
    ))
}

/// Validate raw degrees and project them in one step
pub fn project_lat_lon(latitude: f64, longitude: f64, radius: f64) -> CoreResult<CartesianPosition> {
    validate_coordinates(latitude, longitude)?;
    project(GeoPoint::new(latitude, longitude)?, radius)
}

pub(crate) fn spherical_to_cartesian(latitude: f64, longitude: f64, radius: f64) -> CartesianPosition {
    // Polar angle from +y, azimuth from the offset reference meridian
    let phi = (90.0 - latitude).to_radians();
    let theta = (longitude + REFERENCE_MERIDIAN_OFFSET_DEG).to_radians();

    CartesianPosition {
        x: -(radius * phi.sin() * theta.cos()),
        y: radius * phi.cos(),
        z: radius * phi.sin() * theta.sin(),
    }
}

/// Recover geodetic coordinates from a position on any sphere centred at the
/// origin. The radius is implied by the position's length.
pub fn unproject(position: CartesianPosition) -> CoreResult<GeoPoint> {
    let radius = position.length();
    validate_radius(radius)?;

    let phi = (position.y / radius).clamp(-1.0, 1.0).acos();
    let theta = position.z.atan2(-position.x);

    let latitude = (90.0 - phi.to_degrees()).clamp(-90.0, 90.0);
    let mut longitude = theta.to_degrees() - REFERENCE_MERIDIAN_OFFSET_DEG;
    if longitude < -180.0 {
        longitude += 360.0;
    }

    GeoPoint::new(latitude, longitude)
}

/// Rotation that stands a marker upright on the sphere at `position`:
/// the local +y axis is mapped onto the outward radial direction.
pub fn surface_orientation(position: CartesianPosition) -> CoreResult<Orientation> {
    let normal = DVec3::from(position)
        .try_normalize()
        .ok_or(CoreError::DegenerateOrientation)?;

    Ok(DQuat::from_rotation_arc(DVec3::Y, normal).into())
}

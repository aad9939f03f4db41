//! Common value types used across the platform

use glam::{DQuat, DVec3};
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::validation::validate_coordinates;

/// Geodetic coordinates in degrees
///
/// Construction goes through [`GeoPoint::new`], so a value of this type is
/// always inside `[-90, 90]` x `[-180, 180]`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(try_from = "RawGeoPoint")]
pub struct GeoPoint {
    latitude: f64,
    longitude: f64,
}

#[derive(Deserialize)]
struct RawGeoPoint {
    latitude: f64,
    longitude: f64,
}

impl TryFrom<RawGeoPoint> for GeoPoint {
    type Error = CoreError;

    fn try_from(raw: RawGeoPoint) -> Result<Self, Self::Error> {
        GeoPoint::new(raw.latitude, raw.longitude)
    }
}

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, CoreError> {
        validate_coordinates(latitude, longitude)?;
        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Caller guarantees both values are already in range
    pub(crate) fn new_unchecked(latitude: f64, longitude: f64) -> Self {
        debug_assert!(validate_coordinates(latitude, longitude).is_ok());
        Self {
            latitude,
            longitude,
        }
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }
}

/// A point in the render frame: +y is the north pole
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct CartesianPosition {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl CartesianPosition {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn length(&self) -> f64 {
        DVec3::from(*self).length()
    }

    pub fn to_array(&self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }
}

impl From<DVec3> for CartesianPosition {
    fn from(v: DVec3) -> Self {
        Self::new(v.x, v.y, v.z)
    }
}

impl From<CartesianPosition> for DVec3 {
    fn from(p: CartesianPosition) -> Self {
        DVec3::new(p.x, p.y, p.z)
    }
}

/// Unit quaternion rotating the local +y axis onto a surface normal
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Orientation {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub w: f64,
}

impl Orientation {
    pub fn to_array(&self) -> [f64; 4] {
        [self.x, self.y, self.z, self.w]
    }

    /// Apply the rotation to a vector
    pub fn rotate(&self, v: CartesianPosition) -> CartesianPosition {
        (DQuat::from(*self) * DVec3::from(v)).into()
    }
}

impl From<DQuat> for Orientation {
    fn from(q: DQuat) -> Self {
        Self {
            x: q.x,
            y: q.y,
            z: q.z,
            w: q.w,
        }
    }
}

impl From<Orientation> for DQuat {
    fn from(o: Orientation) -> Self {
        DQuat::from_xyzw(o.x, o.y, o.z, o.w)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_geo_point_rejects_out_of_range() {
        assert!(GeoPoint::new(90.0, 180.0).is_ok());
        assert!(GeoPoint::new(-90.0, -180.0).is_ok());
        assert!(GeoPoint::new(90.1, 0.0).is_err());
        assert!(GeoPoint::new(0.0, -180.5).is_err());
        assert!(GeoPoint::new(f64::NAN, 0.0).is_err());
    }

    #[test]
    fn test_geo_point_deserialize_validates() {
        let ok: Result<GeoPoint, _> =
            serde_json::from_str(r#"{"latitude": 34.05, "longitude": -118.25}"#);
        assert!(ok.is_ok());

        let bad: Result<GeoPoint, _> =
            serde_json::from_str(r#"{"latitude": 120.0, "longitude": 0.0}"#);
        assert!(bad.is_err());
    }
}

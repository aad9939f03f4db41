//! Core error taxonomy shared by the projection, feed and classification code

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    #[error("Invalid coordinate: latitude {latitude}, longitude {longitude}")]
    InvalidCoordinate { latitude: f64, longitude: f64 },

    #[error("Invalid sphere radius: {0}")]
    InvalidRadius(f64),

    /// Orientation requested for the sphere's centre
    #[error("Surface orientation is undefined at the origin")]
    DegenerateOrientation,

    #[error("Malformed feed record {id}: {reason}")]
    MalformedRecord { id: String, reason: String },

    /// The payload as a whole is unusable, not just one record
    #[error("Malformed feed payload: {0}")]
    MalformedFeed(String),
}

pub type CoreResult<T> = Result<T, CoreError>;

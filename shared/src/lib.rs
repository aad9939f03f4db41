//! Core of the Living Earth natural-event dashboard
//!
//! Pure, I/O-free building blocks shared between the backend and the browser
//! (via WASM): geodetic projection, the coarse solar clock, feed
//! normalization and threat classification.

pub mod classification;
pub mod error;
pub mod feed;
pub mod geo;
pub mod models;
pub mod solar;
pub mod types;
pub mod validation;

pub use error::{CoreError, CoreResult};
pub use models::*;
pub use types::*;

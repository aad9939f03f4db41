//! HTTP handlers

pub mod events;
pub mod globe;
pub mod health;
pub mod selection;
pub mod weather;

pub use events::*;
pub use globe::*;
pub use health::*;
pub use selection::*;
pub use weather::*;

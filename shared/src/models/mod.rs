//! Domain models for the Living Earth event dashboard

mod analysis;
mod event;
mod weather;

pub use analysis::*;
pub use event::*;
pub use weather::*;

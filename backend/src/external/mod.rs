//! External API integrations

pub mod eonet;
pub mod weather;

pub use eonet::EventFeedClient;
pub use weather::WeatherClient;

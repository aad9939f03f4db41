//! Business logic services for the Living Earth server

pub mod analysis;
pub mod event_feed;
pub mod selection;
pub mod weather;

pub use analysis::AnalysisService;
pub use event_feed::{EventFeedService, FeedSnapshot};
pub use selection::{Selection, SelectionTracker};
pub use weather::WeatherGateway;

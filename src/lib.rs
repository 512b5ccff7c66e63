pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod fonts;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::{HttpFetcher, LogProgress, StaticPageRenderer, TicketStore};
pub use config::DiscoveryOptions;
pub use core::{DiscoveryResponse, FontDiscovery};
pub use domain::model::FontCatalog;
pub use utils::cancel::CancelToken;
pub use utils::error::{ErrorRecord, FontGrabError, Result};

pub mod aggregator;
pub mod catalog;
pub mod classifier;
pub mod decoder;
pub mod discovery;
pub mod extractor;
pub mod resolver;
pub mod sniffer;

pub use crate::domain::model::{FontCatalog, FontEntry, FontVariant};
pub use crate::domain::ports::{Fetcher, FontDecoder, PageRenderer, ProgressReporter};
pub use crate::utils::error::Result;
pub use discovery::{DiscoveryResponse, FontDiscovery};

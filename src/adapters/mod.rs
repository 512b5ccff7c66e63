pub mod http;
pub mod progress;
pub mod renderer;

pub use http::HttpFetcher;
pub use progress::{LogProgress, TicketStore};
pub use renderer::StaticPageRenderer;

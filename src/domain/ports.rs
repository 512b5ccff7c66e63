use crate::domain::model::{DiscoveryStatus, FileType, PageStyles};
use crate::utils::error::{FontDecodeError, Result};
use async_trait::async_trait;

/// Navigates to a page and reports the CSS it carries.
#[async_trait]
pub trait PageRenderer: Send + Sync {
    async fn render(&self, url: &str) -> Result<PageStyles>;

    /// Fetch a stylesheet through the renderer's own networking context.
    async fn fetch_stylesheet(&self, url: &str) -> Result<String>;
}

/// Response metadata from a HEAD request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadResponse {
    pub status: u16,
    pub content_type: Option<String>,
}

#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch_text(&self, url: &str) -> Result<String>;
    async fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>>;

    /// Non-2xx statuses are returned, not raised; only transport failures are errors.
    async fn head(&self, url: &str) -> Result<HeadResponse>;
}

/// One binary font format able to yield a full display name.
pub trait FontDecoder: Send + Sync {
    fn label(&self) -> &'static str;
    fn handles(&self, file_type: FileType) -> bool;
    fn decode(&self, bytes: &[u8]) -> std::result::Result<String, FontDecodeError>;
}

pub trait ProgressReporter: Send + Sync {
    fn report(&self, ticket: &str, status: DiscoveryStatus);
}

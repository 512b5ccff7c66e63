use crate::config::DiscoveryOptions;
use crate::core::aggregator::CssAggregator;
use crate::core::catalog::CatalogBuilder;
use crate::core::decoder::NameDecoder;
use crate::core::extractor;
use crate::domain::model::{DiscoveryStatus, FontCatalog};
use crate::domain::ports::{Fetcher, PageRenderer, ProgressReporter};
use crate::utils::cancel::CancelToken;
use crate::utils::error::{ErrorRecord, Result};
use crate::utils::validation::{normalize_target_url, validate_url};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// What a discovery run hands back: always one of the two, never a bare error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DiscoveryResponse {
    Catalog(FontCatalog),
    Error(ErrorRecord),
}

impl DiscoveryResponse {
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }

    pub fn catalog(&self) -> Option<&FontCatalog> {
        match self {
            Self::Catalog(catalog) => Some(catalog),
            Self::Error(_) => None,
        }
    }
}

/// Runs the whole pipeline for one page: render, aggregate CSS, extract, build the catalog.
pub struct FontDiscovery<R, F> {
    renderer: R,
    fetcher: F,
    decoder: NameDecoder,
    options: DiscoveryOptions,
    progress: Option<Arc<dyn ProgressReporter>>,
}

impl<R: PageRenderer, F: Fetcher> FontDiscovery<R, F> {
    pub fn new(renderer: R, fetcher: F, options: DiscoveryOptions) -> Self {
        Self {
            renderer,
            fetcher,
            decoder: NameDecoder::default(),
            options,
            progress: None,
        }
    }

    pub fn with_progress(mut self, reporter: Arc<dyn ProgressReporter>) -> Self {
        self.progress = Some(reporter);
        self
    }

    pub fn with_decoder(mut self, decoder: NameDecoder) -> Self {
        self.decoder = decoder;
        self
    }

    /// Never fails: problems come back as an [`ErrorRecord`].
    pub async fn discover(
        &self,
        target: &str,
        ticket: Option<&str>,
        cancel: &CancelToken,
    ) -> DiscoveryResponse {
        let url = normalize_target_url(target);
        if let Err(e) = validate_url("url", &url) {
            tracing::warn!("❌ Rejected target: {}", e);
            return DiscoveryResponse::Error(ErrorRecord::invalid_url());
        }

        tracing::info!("🔍 Discovering fonts on {}", url);
        match self.run(&url, ticket, cancel).await {
            Ok(catalog) => DiscoveryResponse::Catalog(catalog),
            Err(e) => {
                tracing::error!("❌ Discovery failed for {} ({:?}): {}", url, e.category(), e);
                DiscoveryResponse::Error(ErrorRecord::from_error(&e))
            }
        }
    }

    async fn run(&self, url: &str, ticket: Option<&str>, cancel: &CancelToken) -> Result<FontCatalog> {
        self.report(ticket, DiscoveryStatus::LoadingWebsite);
        let styles = self.renderer.render(url).await?;
        cancel.check()?;

        self.report(ticket, DiscoveryStatus::LoadingStylesheets);
        let sources = CssAggregator::new(&self.renderer, &self.fetcher)
            .with_max_import_depth(self.options.max_import_depth)
            .with_cancel(cancel.clone())
            .aggregate(url, &styles)
            .await?;

        self.report(ticket, DiscoveryStatus::ParsingStylesheets);
        let mut font_faces = Vec::new();
        let mut font_families = Vec::new();
        for source in &sources {
            let extraction = extractor::extract(&source.text, &source.url);
            tracing::debug!(
                "{:?} source {}: {} @font-face, {} font-family",
                source.origin,
                source.url,
                extraction.font_faces.len(),
                extraction.font_families.len()
            );
            font_faces.extend(extraction.font_faces);
            font_families.extend(extraction.font_families);
        }

        self.report(ticket, DiscoveryStatus::GrabbingFonts);
        CatalogBuilder::new(&self.fetcher, &self.decoder)
            .with_cancel(cancel.clone())
            .build(&font_faces, &font_families, styles.counts())
            .await
    }

    fn report(&self, ticket: Option<&str>, status: DiscoveryStatus) {
        tracing::debug!("{}", status.as_str());
        if let (Some(reporter), Some(ticket)) = (&self.progress, ticket) {
            reporter.report(ticket, status);
        }
    }
}

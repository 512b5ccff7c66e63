//! Non-scripting page renderer: downloads the HTML and reads its styles
//! straight from the markup.

use crate::adapters::http::HttpFetcher;
use crate::domain::model::PageStyles;
use crate::domain::ports::{Fetcher, PageRenderer};
use crate::utils::error::{FontGrabError, Result};
use async_trait::async_trait;
use scraper::{Html, Selector};
use std::time::Duration;
use url::Url;

pub struct StaticPageRenderer {
    http: HttpFetcher,
}

impl StaticPageRenderer {
    pub fn new(user_agent: &str, timeout: Duration) -> Result<Self> {
        Ok(Self {
            http: HttpFetcher::new(user_agent, timeout)?,
        })
    }
}

#[async_trait]
impl PageRenderer for StaticPageRenderer {
    async fn render(&self, url: &str) -> Result<PageStyles> {
        let html = self.http.fetch_text(url).await?;
        let styles = collect_page_styles(&html, url)?;
        tracing::debug!(
            "Page {} has {} linked, {} embedded and {} inline styles",
            url,
            styles.external.len(),
            styles.internal.len(),
            styles.inline.len()
        );
        Ok(styles)
    }

    async fn fetch_stylesheet(&self, url: &str) -> Result<String> {
        self.http.fetch_text(url).await
    }
}

fn selector(css: &'static str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| FontGrabError::RenderError {
        message: format!("bad selector '{}': {:?}", css, e),
    })
}

/// Linked stylesheets resolved against `page_url`, `<style>` texts, and one
/// `#inlineElement<i>` rule per element with a `style` attribute, `i` counting
/// every element in document order.
pub fn collect_page_styles(html: &str, page_url: &str) -> Result<PageStyles> {
    let document = Html::parse_document(html);
    let base = Url::parse(page_url).map_err(|e| FontGrabError::RenderError {
        message: format!("cannot use {} as a base URL: {}", page_url, e),
    })?;

    let external = document
        .select(&selector("link[href]")?)
        .filter(|link| {
            link.value()
                .attr("rel")
                .is_some_and(|rel| rel.split_whitespace().any(|token| token.eq_ignore_ascii_case("stylesheet")))
        })
        .filter_map(|link| link.value().attr("href"))
        .filter_map(|href| base.join(href.trim()).ok())
        .map(String::from)
        .collect();

    let internal = document
        .select(&selector("style")?)
        .map(|style| style.text().collect::<String>())
        .collect();

    let inline = document
        .select(&selector("*")?)
        .enumerate()
        .filter_map(|(index, element)| {
            element
                .value()
                .attr("style")
                .map(|style| format!("#inlineElement{} {{\n{}\n}}", index, style))
        })
        .collect();

    Ok(PageStyles {
        external,
        internal,
        inline,
    })
}

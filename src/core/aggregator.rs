//! Collects every CSS source reachable from a rendered page.
//!
//! Order: external stylesheets, `<style>` blocks, the import queue drained
//! breadth-first, inline element rules, then whatever imports those added.
//! A stylesheet that fails to load is logged and skipped.

use crate::core::{extractor, resolver};
use crate::domain::model::{CssOrigin, CssSource, PageStyles};
use crate::domain::ports::{Fetcher, PageRenderer};
use crate::utils::cancel::CancelToken;
use crate::utils::error::Result;
use std::collections::{HashSet, VecDeque};
use url::Url;

pub const GOOGLE_FONTS_HOST: &str = "fonts.googleapis.com";
pub const DEFAULT_MAX_IMPORT_DEPTH: usize = 8;

pub struct CssAggregator<'a, R: ?Sized, F: ?Sized> {
    renderer: &'a R,
    fetcher: &'a F,
    max_import_depth: usize,
    cancel: CancelToken,
}

/// Work state of one aggregation pass.
#[derive(Default)]
struct Pass {
    sources: Vec<CssSource>,
    visited: HashSet<String>,
    queue: VecDeque<(String, usize)>,
}

impl<'a, R, F> CssAggregator<'a, R, F>
where
    R: PageRenderer + ?Sized,
    F: Fetcher + ?Sized,
{
    pub fn new(renderer: &'a R, fetcher: &'a F) -> Self {
        Self {
            renderer,
            fetcher,
            max_import_depth: DEFAULT_MAX_IMPORT_DEPTH,
            cancel: CancelToken::new(),
        }
    }

    pub fn with_max_import_depth(mut self, depth: usize) -> Self {
        self.max_import_depth = depth;
        self
    }

    pub fn with_cancel(mut self, cancel: CancelToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// Only cancellation is an error; per-source failures are skipped.
    pub async fn aggregate(&self, page_url: &str, styles: &PageStyles) -> Result<Vec<CssSource>> {
        let mut pass = Pass::default();

        for url in &styles.external {
            self.cancel.check()?;
            if !pass.visited.insert(url.clone()) {
                tracing::debug!("Stylesheet already loaded, skipping: {}", url);
                continue;
            }
            if let Some(text) = self.load(url).await {
                self.accept(&mut pass, url, text, CssOrigin::External, 0);
            }
        }

        for text in &styles.internal {
            self.accept(&mut pass, page_url, text.clone(), CssOrigin::Internal, 0);
        }
        self.drain(&mut pass).await?;

        for text in &styles.inline {
            self.accept(&mut pass, page_url, text.clone(), CssOrigin::Inline, 0);
        }
        self.drain(&mut pass).await?;

        tracing::debug!(
            "Aggregated {} CSS sources ({} stylesheet URLs visited)",
            pass.sources.len(),
            pass.visited.len()
        );
        Ok(pass.sources)
    }

    async fn drain(&self, pass: &mut Pass) -> Result<()> {
        while let Some((url, depth)) = pass.queue.pop_front() {
            self.cancel.check()?;
            if !pass.visited.insert(url.clone()) {
                tracing::debug!("Import already visited, skipping: {}", url);
                continue;
            }
            if let Some(text) = self.load(&url).await {
                self.accept(pass, &url, text, CssOrigin::External, depth);
            }
        }
        Ok(())
    }

    /// Records a source and queues its imports one level deeper.
    fn accept(&self, pass: &mut Pass, url: &str, text: String, origin: CssOrigin, depth: usize) {
        let next_depth = depth + 1;
        for target in extractor::extract_imports(&text) {
            let resolved = resolver::resolve(&target, url);
            if next_depth > self.max_import_depth {
                tracing::debug!(
                    "Import depth {} exceeds limit {}, skipping: {}",
                    next_depth,
                    self.max_import_depth,
                    resolved
                );
                continue;
            }
            pass.queue.push_back((resolved, next_depth));
        }

        pass.sources.push(CssSource {
            url: url.to_string(),
            text,
            origin,
        });
    }

    async fn load(&self, url: &str) -> Option<String> {
        let result = if is_google_fonts(url) {
            self.fetcher.fetch_text(url).await
        } else {
            self.renderer.fetch_stylesheet(url).await
        };

        match result {
            Ok(text) => {
                tracing::debug!("Loaded stylesheet {} ({} bytes)", url, text.len());
                Some(text)
            }
            Err(e) => {
                tracing::warn!("⚠️  Skipping stylesheet {}: {}", url, e);
                None
            }
        }
    }
}

/// Google Fonts CSS is fetched directly; its content depends on the user agent.
pub fn is_google_fonts(url: &str) -> bool {
    Url::parse(url)
        .ok()
        .and_then(|parsed| parsed.host_str().map(|host| host.eq_ignore_ascii_case(GOOGLE_FONTS_HOST)))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::HeadResponse;
    use crate::utils::error::FontGrabError;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::Mutex;

    #[derive(Default)]
    struct StubWeb {
        sheets: HashMap<String, String>,
        rendered: Mutex<Vec<String>>,
        direct: Mutex<Vec<String>>,
    }

    impl StubWeb {
        fn with(mut self, url: &str, css: &str) -> Self {
            self.sheets.insert(url.to_string(), css.to_string());
            self
        }

        fn lookup(&self, url: &str) -> Result<String> {
            self.sheets
                .get(url)
                .cloned()
                .ok_or_else(|| FontGrabError::HttpStatusError {
                    url: url.to_string(),
                    status: 404,
                })
        }
    }

    #[async_trait]
    impl PageRenderer for StubWeb {
        async fn render(&self, _url: &str) -> Result<PageStyles> {
            Ok(PageStyles::default())
        }

        async fn fetch_stylesheet(&self, url: &str) -> Result<String> {
            self.rendered.lock().unwrap().push(url.to_string());
            self.lookup(url)
        }
    }

    #[async_trait]
    impl Fetcher for StubWeb {
        async fn fetch_text(&self, url: &str) -> Result<String> {
            self.direct.lock().unwrap().push(url.to_string());
            self.lookup(url)
        }

        async fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>> {
            self.lookup(url).map(String::into_bytes)
        }

        async fn head(&self, _url: &str) -> Result<HeadResponse> {
            Ok(HeadResponse {
                status: 404,
                content_type: None,
            })
        }
    }

    const PAGE: &str = "https://site.test/index.html";

    fn urls(sources: &[CssSource]) -> Vec<(&str, CssOrigin)> {
        sources.iter().map(|s| (s.url.as_str(), s.origin)).collect()
    }

    #[tokio::test]
    async fn test_processing_order() {
        let web = StubWeb::default()
            .with("https://site.test/css/main.css", "@import url(parts/type.css); body{}")
            .with("https://site.test/css/parts/type.css", "h1{font-family:A;}")
            .with("https://site.test/inline-import.css", "p{}");

        let styles = PageStyles {
            external: vec!["https://site.test/css/main.css".to_string()],
            internal: vec!["div{font-family:B;}".to_string()],
            inline: vec!["#inlineElement3 {\n@import '/inline-import.css';\n}".to_string()],
        };

        let sources = CssAggregator::new(&web, &web).aggregate(PAGE, &styles).await.unwrap();
        assert_eq!(
            urls(&sources),
            vec![
                ("https://site.test/css/main.css", CssOrigin::External),
                (PAGE, CssOrigin::Internal),
                ("https://site.test/css/parts/type.css", CssOrigin::External),
                (PAGE, CssOrigin::Inline),
                ("https://site.test/inline-import.css", CssOrigin::External),
            ]
        );
    }

    #[tokio::test]
    async fn test_import_cycle_terminates() {
        let web = StubWeb::default()
            .with("https://site.test/a.css", "@import url(b.css);")
            .with("https://site.test/b.css", "@import url(a.css); @import url(b.css);");

        let styles = PageStyles {
            external: vec!["https://site.test/a.css".to_string()],
            ..PageStyles::default()
        };

        let sources = CssAggregator::new(&web, &web).aggregate(PAGE, &styles).await.unwrap();
        assert_eq!(sources.len(), 2);
        assert_eq!(web.rendered.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_depth_limit() {
        let web = StubWeb::default()
            .with("https://site.test/0.css", "@import url(1.css);")
            .with("https://site.test/1.css", "@import url(2.css);")
            .with("https://site.test/2.css", "@import url(3.css);")
            .with("https://site.test/3.css", "");

        let styles = PageStyles {
            external: vec!["https://site.test/0.css".to_string()],
            ..PageStyles::default()
        };

        let sources = CssAggregator::new(&web, &web)
            .with_max_import_depth(2)
            .aggregate(PAGE, &styles)
            .await
            .unwrap();
        let loaded: Vec<_> = sources.iter().map(|s| s.url.as_str()).collect();
        assert_eq!(
            loaded,
            vec!["https://site.test/0.css", "https://site.test/1.css", "https://site.test/2.css"]
        );
    }

    #[tokio::test]
    async fn test_failed_stylesheet_is_skipped() {
        let web = StubWeb::default().with("https://site.test/ok.css", "a{}");
        let styles = PageStyles {
            external: vec![
                "https://site.test/missing.css".to_string(),
                "https://site.test/ok.css".to_string(),
            ],
            ..PageStyles::default()
        };

        let sources = CssAggregator::new(&web, &web).aggregate(PAGE, &styles).await.unwrap();
        assert_eq!(urls(&sources), vec![("https://site.test/ok.css", CssOrigin::External)]);
    }

    #[tokio::test]
    async fn test_google_fonts_fetched_directly() {
        let google = "https://fonts.googleapis.com/css?family=Roboto";
        let web = StubWeb::default().with(google, "@font-face{font-family:'Roboto';}");
        let styles = PageStyles {
            external: vec![google.to_string()],
            ..PageStyles::default()
        };

        CssAggregator::new(&web, &web).aggregate(PAGE, &styles).await.unwrap();
        assert_eq!(*web.direct.lock().unwrap(), vec![google.to_string()]);
        assert!(web.rendered.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_cancelled_before_first_source() {
        let web = StubWeb::default().with("https://site.test/a.css", "");
        let styles = PageStyles {
            external: vec!["https://site.test/a.css".to_string()],
            ..PageStyles::default()
        };
        let cancel = CancelToken::new();
        cancel.cancel();

        let result = CssAggregator::new(&web, &web)
            .with_cancel(cancel)
            .aggregate(PAGE, &styles)
            .await;
        assert!(matches!(result, Err(FontGrabError::Cancelled)));
        assert!(web.rendered.lock().unwrap().is_empty());
    }

    #[test]
    fn test_is_google_fonts() {
        assert!(is_google_fonts("https://fonts.googleapis.com/css2?family=Inter"));
        assert!(!is_google_fonts("https://fonts.gstatic.com/s/inter.woff2"));
        assert!(!is_google_fonts("https://evil.test/?u=fonts.googleapis.com"));
        assert!(!is_google_fonts("not a url"));
    }
}

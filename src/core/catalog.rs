//! Merges extracted declarations into the primary/fallback font catalog.

use crate::core::decoder::NameDecoder;
use crate::core::{classifier, extractor, resolver, sniffer};
use crate::domain::model::{
    FontBuckets, FontCatalog, FontEntry, FontFaceDeclaration, FontFamilyDeclaration, FontVariant,
    StylesheetCounts,
};
use crate::domain::ports::Fetcher;
use crate::utils::cancel::CancelToken;
use crate::utils::error::Result;

/// Bucket bookkeeping for one build. Names are unique across both buckets and
/// `total` always equals the number of variants held.
#[derive(Debug, Default)]
pub struct CatalogState {
    primary: Vec<FontEntry>,
    fallback: Vec<FontEntry>,
    total: usize,
}

impl CatalogState {
    pub fn contains(&self, name: &str) -> bool {
        self.primary.iter().any(|entry| entry.name == name)
            || self.fallback.iter().any(|entry| entry.name == name)
    }

    pub fn has_primary_source(&self, name: &str, url: &str) -> bool {
        self.primary
            .iter()
            .any(|entry| entry.name == name && entry.has_source(url))
    }

    /// Adds a name-only entry unless the name is already catalogued.
    pub fn add_fallback(&mut self, name: &str) -> bool {
        if self.contains(name) {
            return false;
        }
        self.fallback
            .push(FontEntry::new(name, FontVariant::named(name)));
        self.total += 1;
        true
    }

    /// Appends to or creates a primary entry. A same-named fallback entry is
    /// promoted away; a variant whose source URL is already present is dropped.
    pub fn add_primary_variant(&mut self, name: &str, variant: FontVariant) -> bool {
        if let Some(entry) = self.primary.iter_mut().find(|entry| entry.name == name) {
            if let Some(url) = variant.source_url.as_deref() {
                if entry.has_source(url) {
                    return false;
                }
            }
            entry.variants.push(variant);
            self.total += 1;
            return true;
        }

        if let Some(index) = self.fallback.iter().position(|entry| entry.name == name) {
            let demoted = self.fallback.remove(index);
            self.total -= demoted.variants.len();
        }
        self.primary.push(FontEntry::new(name, variant));
        self.total += 1;
        true
    }

    pub fn into_catalog(self, stylesheet_counts: StylesheetCounts) -> FontCatalog {
        FontCatalog {
            stylesheet_counts,
            fonts: FontBuckets {
                primary: self.primary,
                fallback: self.fallback,
            },
            total_fonts_found: self.total,
        }
    }
}

/// Decoded names that carry no information.
pub fn is_garbage_name(name: &str) -> bool {
    let trimmed = name.trim();
    trimmed.is_empty()
        || trimmed.eq_ignore_ascii_case("undefined")
        || trimmed
            .chars()
            .any(|c| c == char::REPLACEMENT_CHARACTER || c.is_control())
}

pub struct CatalogBuilder<'a, F: ?Sized> {
    fetcher: &'a F,
    decoder: &'a NameDecoder,
    cancel: CancelToken,
}

impl<'a, F: Fetcher + ?Sized> CatalogBuilder<'a, F> {
    pub fn new(fetcher: &'a F, decoder: &'a NameDecoder) -> Self {
        Self {
            fetcher,
            decoder,
            cancel: CancelToken::new(),
        }
    }

    pub fn with_cancel(mut self, cancel: CancelToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// `@font-face` evidence first, then bare `font-family` lists.
    pub async fn build(
        &self,
        font_faces: &[FontFaceDeclaration],
        font_families: &[FontFamilyDeclaration],
        stylesheet_counts: StylesheetCounts,
    ) -> Result<FontCatalog> {
        let mut state = CatalogState::default();

        for face in font_faces {
            self.cancel.check()?;
            self.add_font_face(&mut state, face).await;
        }

        for declaration in font_families {
            add_family_list(&mut state, declaration);
        }

        let catalog = state.into_catalog(stylesheet_counts);
        tracing::info!(
            "✅ Catalog built: {} primary, {} fallback, {} total",
            catalog.fonts.primary.len(),
            catalog.fonts.fallback.len(),
            catalog.total_fonts_found
        );
        Ok(catalog)
    }

    async fn add_font_face(&self, state: &mut CatalogState, face: &FontFaceDeclaration) {
        let name = face.declared_name.as_str();
        if !classifier::is_real_font(name) {
            tracing::debug!("Ignoring @font-face '{}': not a real font", name);
            return;
        }

        let Some(raw_url) = face.primary_url() else {
            if state.add_fallback(name) {
                tracing::debug!("@font-face '{}' has no source, added as fallback", name);
            }
            return;
        };

        let url = resolver::resolve(raw_url, &face.source_css_url);
        if state.has_primary_source(name, &url) {
            tracing::debug!("Variant {} of '{}' already recorded", url, name);
            return;
        }

        let weight = face.weight();
        let file_type = match sniffer::sniff(self.fetcher, &url).await {
            Ok(file_type) => Some(file_type),
            Err(e) => {
                tracing::debug!("Could not determine type of {}: {}", url, e);
                None
            }
        };

        let full_name = match self.decoder.decode_with_hint(self.fetcher, &url, file_type).await {
            Ok(decoded) if !is_garbage_name(&decoded) => decoded.trim().to_string(),
            Ok(decoded) => {
                tracing::debug!("Discarding unusable decoded name {:?} for {}", decoded, url);
                synthetic_name(name, &weight)
            }
            Err(e) => {
                tracing::debug!("Name decode failed for {}: {}", url, e);
                synthetic_name(name, &weight)
            }
        };

        // 解出的內部名稱可能揭露這其實是圖示字型
        if !classifier::is_real_font(&full_name) {
            tracing::debug!("Dropping variant '{}' of '{}': not a real font", full_name, name);
            return;
        }

        tracing::debug!("Adding '{}' ({}) to '{}'", full_name, url, name);
        state.add_primary_variant(
            name,
            FontVariant {
                full_name,
                source_url: Some(url),
                weight: Some(weight),
                file_type,
            },
        );
    }
}

fn synthetic_name(declared_name: &str, weight: &str) -> String {
    format!("{} ({})", declared_name, weight)
}

/// Every real token goes to the fallback bucket, including the first-listed one.
fn add_family_list(state: &mut CatalogState, declaration: &FontFamilyDeclaration) {
    for token in extractor::split_family_list(&declaration.raw_family_list) {
        if classifier::is_real_font(&token) && state.add_fallback(&token) {
            tracing::debug!("Fallback font '{}' from {}", token, declaration.source_css_url);
        }
    }
}

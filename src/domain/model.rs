use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CssOrigin {
    External,
    Internal,
    Inline,
}

/// One CSS text blob together with the URL its relative references resolve against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CssSource {
    pub url: String,
    pub text: String,
    pub origin: CssOrigin,
}

/// What the page renderer reports for a navigated page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageStyles {
    /// Absolute URLs of linked stylesheets.
    pub external: Vec<String>,
    /// Text of each `<style>` element.
    pub internal: Vec<String>,
    /// One synthesized `#inlineElement<i> { ... }` rule per element with a `style` attribute.
    pub inline: Vec<String>,
}

impl PageStyles {
    pub fn counts(&self) -> StylesheetCounts {
        StylesheetCounts {
            external: self.external.len(),
            internal: self.internal.len(),
            inline: self.inline.len(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontFaceDeclaration {
    pub declared_name: String,
    pub raw_urls: Vec<String>,
    pub raw_weight: Option<String>,
    pub source_css_url: String,
}

impl FontFaceDeclaration {
    /// Normalized weight, `"400"` when the block has none.
    pub fn weight(&self) -> String {
        self.raw_weight
            .as_deref()
            .map(normalize_weight)
            .unwrap_or_else(|| "400".to_string())
    }

    /// Only the first `src` URL is used for catalog building.
    pub fn primary_url(&self) -> Option<&str> {
        self.raw_urls.first().map(String::as_str)
    }
}

/// `regular`/`normal` become `400`, `bold` becomes `700`, anything else is kept verbatim.
pub fn normalize_weight(raw: &str) -> String {
    let trimmed = raw.trim();
    match trimmed.to_ascii_lowercase().as_str() {
        "" | "regular" | "normal" => "400".to_string(),
        "bold" => "700".to_string(),
        _ => trimmed.to_string(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontFamilyDeclaration {
    pub raw_family_list: String,
    pub source_css_url: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileType {
    Otf,
    Ttf,
    Woff,
    Woff2,
}

impl FileType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Otf => "otf",
            Self::Ttf => "ttf",
            Self::Woff => "woff",
            Self::Woff2 => "woff2",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "otf" => Some(Self::Otf),
            "ttf" => Some(Self::Ttf),
            "woff" => Some(Self::Woff),
            "woff2" => Some(Self::Woff2),
            _ => None,
        }
    }
}

impl fmt::Display for FileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FontVariant {
    pub full_name: String,
    #[serde(rename = "src", skip_serializing_if = "Option::is_none", default)]
    pub source_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub weight: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub file_type: Option<FileType>,
}

impl FontVariant {
    /// A variant known only by name.
    pub fn named(full_name: impl Into<String>) -> Self {
        Self {
            full_name: full_name.into(),
            source_url: None,
            weight: None,
            file_type: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FontEntry {
    pub name: String,
    pub variants: Vec<FontVariant>,
}

impl FontEntry {
    pub fn new(name: impl Into<String>, first_variant: FontVariant) -> Self {
        Self {
            name: name.into(),
            variants: vec![first_variant],
        }
    }

    pub fn has_source(&self, url: &str) -> bool {
        self.variants
            .iter()
            .any(|variant| variant.source_url.as_deref() == Some(url))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StylesheetCounts {
    pub external: usize,
    pub internal: usize,
    pub inline: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FontBuckets {
    pub primary: Vec<FontEntry>,
    pub fallback: Vec<FontEntry>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FontCatalog {
    #[serde(rename = "stylesheets")]
    pub stylesheet_counts: StylesheetCounts,
    pub fonts: FontBuckets,
    #[serde(rename = "total")]
    pub total_fonts_found: usize,
}

impl FontCatalog {
    pub fn primary(&self, name: &str) -> Option<&FontEntry> {
        self.fonts.primary.iter().find(|entry| entry.name == name)
    }

    pub fn fallback(&self, name: &str) -> Option<&FontEntry> {
        self.fonts.fallback.iter().find(|entry| entry.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.primary(name).is_some() || self.fallback(name).is_some()
    }
}

/// Progress checkpoints reported during a discovery run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiscoveryStatus {
    LoadingWebsite,
    LoadingStylesheets,
    ParsingStylesheets,
    GrabbingFonts,
}

impl DiscoveryStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::LoadingWebsite => "Loading website...",
            Self::LoadingStylesheets => "Loading stylesheets...",
            Self::ParsingStylesheets => "Parsing stylesheets...",
            Self::GrabbingFonts => "Grabbing fonts...",
        }
    }
}

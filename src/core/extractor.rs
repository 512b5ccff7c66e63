//! Pattern-based extraction of font declarations from raw CSS text.
//!
//! CSS is treated as independently matched fragments rather than a parsed
//! stylesheet. A fragment that does not match is skipped; it never aborts the
//! rest of the blob.

use crate::domain::model::{FontFaceDeclaration, FontFamilyDeclaration};
use crate::utils::error::{FontGrabError, Result};
use once_cell::sync::Lazy;
use regex::Regex;

static FONT_FACE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)@font-face\s*\{(.*?)\}").expect("valid @font-face regex"));
static FACE_FAMILY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)font-family\s*:\s*([^;]*)").expect("valid font-family regex"));
static FACE_URL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)url\(\s*([^)]*?)\s*\)").expect("valid url() regex"));
static FACE_WEIGHT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)font-weight\s*:\s*([^;]*)").expect("valid font-weight regex"));
// 前綴排除 `--font-family` 之類的自訂屬性；值的結尾另外檢查
static FAMILY_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(?:^|[^\w-])font-family\s*:\s*([^;{}]*)").expect("valid font-family regex")
});
static IMPORT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)@import\s+(?:url\(\s*([^)]*?)\s*\)|"([^"]*)"|'([^']*)')"#)
        .expect("valid @import regex")
});

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extraction {
    pub font_faces: Vec<FontFaceDeclaration>,
    pub font_families: Vec<FontFamilyDeclaration>,
    pub imports: Vec<String>,
}

pub fn extract(css_text: &str, source_url: &str) -> Extraction {
    Extraction {
        font_faces: extract_font_faces(css_text, source_url),
        font_families: extract_font_families(css_text, source_url),
        imports: extract_imports(css_text),
    }
}

pub fn extract_font_faces(css_text: &str, source_url: &str) -> Vec<FontFaceDeclaration> {
    FONT_FACE_RE
        .captures_iter(css_text)
        .filter_map(|caps| {
            let body = caps.get(1).map(|m| m.as_str()).unwrap_or_default();
            match parse_font_face(body, source_url) {
                Ok(declaration) => Some(declaration),
                Err(e) => {
                    tracing::debug!("⏭️  Skipping @font-face: {}", e);
                    None
                }
            }
        })
        .collect()
}

fn parse_font_face(body: &str, source_url: &str) -> Result<FontFaceDeclaration> {
    let declared_name = FACE_FAMILY_RE
        .captures(body)
        .and_then(|caps| caps.get(1))
        .map(|m| clean_family_name(m.as_str()))
        .filter(|name| !name.is_empty())
        .ok_or_else(|| FontGrabError::ExtractionError {
            message: format!("@font-face without a font-family in {}", source_url),
        })?;

    let raw_urls = FACE_URL_RE
        .captures_iter(body)
        .filter_map(|caps| caps.get(1))
        .map(|m| clean_url(m.as_str()))
        .filter(|url| !url.is_empty())
        .collect();

    let raw_weight = if body.contains("font-weight") {
        FACE_WEIGHT_RE
            .captures(body)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().trim().to_string())
            .filter(|weight| !weight.is_empty())
    } else {
        None
    };

    Ok(FontFaceDeclaration {
        declared_name,
        raw_urls,
        raw_weight,
        source_css_url: source_url.to_string(),
    })
}

/// Bare `font-family` declarations outside `@font-face` blocks.
pub fn extract_font_families(css_text: &str, source_url: &str) -> Vec<FontFamilyDeclaration> {
    let without_faces = FONT_FACE_RE.replace_all(css_text, "");

    FAMILY_RE
        .captures_iter(&without_faces)
        .filter_map(|caps| {
            let value = caps.get(1)?;
            // 值必須以 `;` 或 `}` 結束，否則視為截斷的片段
            match without_faces[value.end()..].chars().next() {
                Some(';') | Some('}') => {}
                _ => return None,
            }
            let raw = value.as_str().trim();
            if raw.is_empty() {
                return None;
            }
            Some(FontFamilyDeclaration {
                raw_family_list: raw.to_string(),
                source_css_url: source_url.to_string(),
            })
        })
        .collect()
}

pub fn extract_imports(css_text: &str) -> Vec<String> {
    IMPORT_RE
        .captures_iter(css_text)
        .filter_map(|caps| caps.get(1).or_else(|| caps.get(2)).or_else(|| caps.get(3)))
        .map(|m| clean_url(m.as_str()))
        .filter(|target| !target.is_empty())
        .collect()
}

/// Splits a `font-family` value into unquoted, trimmed names.
pub fn split_family_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(clean_family_name)
        .filter(|name| !name.is_empty())
        .collect()
}

pub fn clean_family_name(raw: &str) -> String {
    raw.replace(['\'', '"'], "").trim().to_string()
}

fn clean_url(raw: &str) -> String {
    raw.trim()
        .trim_matches(['\'', '"'])
        .trim()
        .replace("\\ ", "%20")
}

use crate::domain::model::FileType;
use crate::domain::ports::Fetcher;
use crate::utils::error::SniffError;

/// Content-type subtypes some servers send instead of the registered ones.
const SUBTYPE_CORRECTIONS: &[(&str, &str)] = &[
    ("font-woff2", "woff2"),
    ("font-woff", "woff"),
    ("x-font-woff2", "woff2"),
    ("x-font-woff", "woff"),
    ("x-font-ttf", "ttf"),
    ("x-font-truetype", "ttf"),
    ("font-ttf", "ttf"),
    ("x-font-otf", "otf"),
    ("x-font-opentype", "otf"),
    ("font-otf", "otf"),
    ("vnd.ms-opentype", "otf"),
];

/// Extension check first, then a HEAD request for the declared content type.
pub async fn sniff<F: Fetcher + ?Sized>(fetcher: &F, url: &str) -> Result<FileType, SniffError> {
    if let Some(file_type) = type_from_extension(url) {
        return Ok(file_type);
    }

    let response = fetcher
        .head(url)
        .await
        .map_err(|e| SniffError::Transport(e.to_string()))?;

    if !(200..300).contains(&response.status) {
        return Err(SniffError::BadStatus(response.status));
    }

    let content_type = response.content_type.ok_or(SniffError::NoContentType)?;
    let file_type = type_from_content_type(&content_type)?;
    tracing::debug!("Sniffed {} as {} from '{}'", url, file_type, content_type);
    Ok(file_type)
}

pub fn type_from_extension(url: &str) -> Option<FileType> {
    let path = url.split(['?', '#']).next().unwrap_or(url).to_ascii_lowercase();

    // `.woff2` 要在 `.woff` 之前檢查
    if path.ends_with(".otf") {
        Some(FileType::Otf)
    } else if path.ends_with(".ttf") {
        Some(FileType::Ttf)
    } else if path.ends_with(".woff2") {
        Some(FileType::Woff2)
    } else if path.ends_with(".woff") {
        Some(FileType::Woff)
    } else {
        None
    }
}

pub fn type_from_content_type(content_type: &str) -> Result<FileType, SniffError> {
    let essence = content_type.split(';').next().unwrap_or_default();
    let subtype = essence
        .split_once('/')
        .map(|(_, subtype)| subtype)
        .unwrap_or(essence)
        .trim()
        .to_ascii_lowercase();

    let corrected = SUBTYPE_CORRECTIONS
        .iter()
        .find(|(mismatched, _)| *mismatched == subtype)
        .map(|(_, fixed)| *fixed)
        .unwrap_or(subtype.as_str());

    FileType::from_name(corrected).ok_or_else(|| SniffError::InvalidType(subtype.clone()))
}

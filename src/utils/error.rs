use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FontGrabError {
    #[error("HTTP request failed: {0}")]
    TransportError(#[from] reqwest::Error),

    #[error("HTTP {status} when fetching {url}")]
    HttpStatusError { url: String, status: u16 },

    #[error("Page rendering failed: {message}")]
    RenderError { message: String },

    #[error("CSS extraction error: {message}")]
    ExtractionError { message: String },

    #[error("Font decoding failed: {message}")]
    DecodeError { message: String },

    #[error("Invalid {field} '{value}': {reason}")]
    ValidationError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Discovery cancelled")]
    Cancelled,

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, FontGrabError>;

/// Why a font file's format could not be determined.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SniffError {
    #[error("no content-type header")]
    NoContentType,

    #[error("HEAD request returned HTTP {0}")]
    BadStatus(u16),

    #[error("unrecognized font type '{0}'")]
    InvalidType(String),

    #[error("HEAD request failed: {0}")]
    Transport(String),
}

/// Failure of a single binary decoder.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FontDecodeError {
    #[error("unsupported or malformed font data: {0}")]
    Format(String),

    #[error("font has no full name record")]
    MissingName,

    #[error("table decompression failed: {0}")]
    Decompress(String),

    #[error("font data is truncated")]
    Truncated,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Transport,
    Decode,
    Extraction,
    Validation,
    Cancelled,
    Internal,
}

const DNS_FAILURE_MARKERS: &[&str] = &[
    "err_name_not_resolved",
    "dns error",
    "failed to lookup address",
    "name or service not known",
    "nodename nor servname",
    "no such host",
];

impl FontGrabError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::TransportError(_) | Self::HttpStatusError { .. } | Self::RenderError { .. } => {
                ErrorCategory::Transport
            }
            Self::DecodeError { .. } => ErrorCategory::Decode,
            Self::ExtractionError { .. } => ErrorCategory::Extraction,
            Self::ValidationError { .. } | Self::ConfigError { .. } => ErrorCategory::Validation,
            Self::Cancelled => ErrorCategory::Cancelled,
            Self::IoError(_) | Self::SerializationError(_) => ErrorCategory::Internal,
        }
    }

    /// 檢查錯誤鏈中是否包含 DNS 解析失敗
    pub fn is_dns_failure(&self) -> bool {
        let mut current: Option<&dyn std::error::Error> = Some(self);
        while let Some(err) = current {
            let text = err.to_string().to_lowercase();
            if DNS_FAILURE_MARKERS.iter().any(|marker| text.contains(marker)) {
                return true;
            }
            current = err.source();
        }
        false
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        if self.is_dns_failure() {
            return "檢查網址拼寫與網路連線";
        }
        match self.category() {
            ErrorCategory::Transport => "確認網站可連線，或以 --timeout-seconds 延長逾時",
            ErrorCategory::Decode => "字型檔可能損壞或格式不支援",
            ErrorCategory::Extraction => "樣式表內容可能不完整",
            ErrorCategory::Validation => "請提供 http:// 或 https:// 開頭的網址並檢查設定檔",
            ErrorCategory::Cancelled => "重新執行即可",
            ErrorCategory::Internal => "請以 --verbose 重新執行並回報問題",
        }
    }
}

/// Structured failure returned to the caller instead of a catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorRecord {
    pub error: String,
    #[serde(rename = "errorMessage")]
    pub error_message: String,
}

impl ErrorRecord {
    pub const LOADING_WEBPAGE: &'static str = "Error loading webpage";
    pub const GRABBING_FONTS: &'static str = "Error grabbing fonts";

    pub fn from_error(err: &FontGrabError) -> Self {
        let error = if err.is_dns_failure() {
            Self::LOADING_WEBPAGE
        } else {
            Self::GRABBING_FONTS
        };
        Self {
            error: error.to_string(),
            error_message: err.to_string(),
        }
    }

    pub fn invalid_url() -> Self {
        Self {
            error: Self::GRABBING_FONTS.to_string(),
            error_message: "Invalid URL".to_string(),
        }
    }
}

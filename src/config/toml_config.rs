use crate::utils::error::{FontGrabError, Result};
use crate::utils::validation::{validate_non_empty_string, validate_positive_number, Validate};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

static ENV_VAR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\$\{([^}]+)\}").expect("valid env var regex"));

/// Optional settings file; every table and key may be omitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileConfig {
    pub http: Option<HttpConfig>,
    pub discovery: Option<DiscoverySettings>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpConfig {
    pub timeout_seconds: Option<u64>,
    pub user_agent: Option<String>,
    pub google_fonts_user_agent: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscoverySettings {
    pub max_import_depth: Option<usize>,
}

impl FileConfig {
    /// 從 TOML 檔案載入設定
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(|e| FontGrabError::ConfigError {
            message: format!("cannot read {}: {}", path.as_ref().display(), e),
        })?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析設定
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed = substitute_env_vars(content);
        let config: Self = toml::from_str(&processed).map_err(|e| FontGrabError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })?;
        config.validate()?;
        Ok(config)
    }
}

/// 替換環境變數 (例如 ${FONT_GRABBER_UA})，未設定的保持原樣
fn substitute_env_vars(content: &str) -> String {
    ENV_VAR_RE
        .replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        })
        .into_owned()
}

impl Validate for FileConfig {
    fn validate(&self) -> Result<()> {
        if let Some(http) = &self.http {
            if let Some(timeout) = http.timeout_seconds {
                validate_positive_number("http.timeout_seconds", timeout, 1)?;
            }
            if let Some(agent) = &http.user_agent {
                validate_non_empty_string("http.user_agent", agent)?;
            }
            if let Some(agent) = &http.google_fonts_user_agent {
                validate_non_empty_string("http.google_fonts_user_agent", agent)?;
            }
        }
        if let Some(depth) = self.discovery.as_ref().and_then(|d| d.max_import_depth) {
            validate_positive_number("discovery.max_import_depth", depth as u64, 1)?;
        }
        Ok(())
    }
}

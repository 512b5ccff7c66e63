#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli::CliConfig;
pub use toml_config::FileConfig;

use crate::core::aggregator::DEFAULT_MAX_IMPORT_DEPTH;
use crate::utils::error::Result;
use crate::utils::validation::{validate_non_empty_string, validate_positive_number, Validate};
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;
/// 載入頁面與樣式表用的瀏覽器 UA
pub const DEFAULT_BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_14_1) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/73.0.3683.75 Safari/537.36";
/// Google Fonts 依 UA 決定字型格式，這個 UA 會拿到 ttf
pub const DEFAULT_FETCH_USER_AGENT: &str = "Mozilla/5.0";

/// Settings shared by every collaborator of one discovery run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscoveryOptions {
    pub timeout_seconds: u64,
    pub max_import_depth: usize,
    /// Sent when loading the page and its stylesheets.
    pub browser_user_agent: String,
    /// Sent on direct fetches: Google Fonts CSS, HEAD sniffs and font binaries.
    pub fetch_user_agent: String,
}

impl Default for DiscoveryOptions {
    fn default() -> Self {
        Self {
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            max_import_depth: DEFAULT_MAX_IMPORT_DEPTH,
            browser_user_agent: DEFAULT_BROWSER_USER_AGENT.to_string(),
            fetch_user_agent: DEFAULT_FETCH_USER_AGENT.to_string(),
        }
    }
}

impl DiscoveryOptions {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    /// Overwrites every field the settings file sets.
    pub fn merge_file(&mut self, file: &FileConfig) {
        if let Some(http) = &file.http {
            if let Some(timeout) = http.timeout_seconds {
                self.timeout_seconds = timeout;
            }
            if let Some(agent) = &http.user_agent {
                self.browser_user_agent = agent.clone();
            }
            if let Some(agent) = &http.google_fonts_user_agent {
                self.fetch_user_agent = agent.clone();
            }
        }
        if let Some(depth) = file.discovery.as_ref().and_then(|d| d.max_import_depth) {
            self.max_import_depth = depth;
        }
    }
}

impl Validate for DiscoveryOptions {
    fn validate(&self) -> Result<()> {
        validate_positive_number("timeout_seconds", self.timeout_seconds, 1)?;
        validate_positive_number("max_import_depth", self.max_import_depth as u64, 1)?;
        validate_non_empty_string("user_agent", &self.browser_user_agent)?;
        validate_non_empty_string("google_fonts_user_agent", &self.fetch_user_agent)?;
        Ok(())
    }
}

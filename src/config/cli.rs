use crate::config::{DiscoveryOptions, FileConfig};
use crate::utils::error::Result;
use crate::utils::validation::{normalize_target_url, validate_url, Validate};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "font-grabber")]
#[command(about = "Discover the typefaces a web page uses")]
pub struct CliConfig {
    /// Page to inspect; `example.com` is read as `http://example.com`
    pub url: String,

    #[arg(long, help = "TOML settings file")]
    pub config: Option<PathBuf>,

    #[arg(long, help = "Per-request timeout in seconds [default: 30]")]
    pub timeout_seconds: Option<u64>,

    #[arg(long, help = "How many @import levels to follow [default: 8]")]
    pub max_import_depth: Option<usize>,

    #[arg(long, help = "User agent for the page and its stylesheets")]
    pub user_agent: Option<String>,

    #[arg(long, help = "User agent for Google Fonts CSS and font downloads")]
    pub google_fonts_user_agent: Option<String>,

    #[arg(long, help = "Progress ticket to report status under")]
    pub ticket: Option<String>,

    #[arg(long, help = "Pretty-print the JSON result")]
    pub pretty: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub log_json: bool,
}

impl CliConfig {
    pub fn target_url(&self) -> String {
        normalize_target_url(&self.url)
    }

    /// Defaults, then the settings file, then flags given on the command line.
    pub fn discovery_options(&self) -> Result<DiscoveryOptions> {
        let mut options = DiscoveryOptions::default();

        if let Some(path) = &self.config {
            tracing::debug!("Loading settings from {}", path.display());
            options.merge_file(&FileConfig::from_file(path)?);
        }

        if let Some(timeout) = self.timeout_seconds {
            options.timeout_seconds = timeout;
        }
        if let Some(depth) = self.max_import_depth {
            options.max_import_depth = depth;
        }
        if let Some(agent) = &self.user_agent {
            options.browser_user_agent = agent.clone();
        }
        if let Some(agent) = &self.google_fonts_user_agent {
            options.fetch_user_agent = agent.clone();
        }

        options.validate()?;
        Ok(options)
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_url("url", &self.target_url())
    }
}

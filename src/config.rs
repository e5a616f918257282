use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Site-wide metadata defaults merged into every page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteConfig {
    /// Brand name appended to page titles
    #[serde(default = "default_brand_name")]
    pub brand_name: String,

    /// Title used when a page declares a blank one
    #[serde(default = "default_title")]
    pub default_title: String,

    /// Description used when a page declares a blank one
    #[serde(default = "default_description")]
    pub default_description: String,

    /// Keywords appended after every page's own keywords
    #[serde(default = "default_keywords")]
    pub default_keywords: Vec<String>,

    /// Public origin of the site, used for canonical links
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,

    /// Route regexes that are never indexed (private SaaS pages)
    #[serde(default = "default_no_index_patterns")]
    pub no_index_patterns: Vec<String>,

    /// Real-time backend URL, overridden by `HAUS_REALTIME_URL`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub realtime_url: Option<String>,
}

/// Configuration for auditing a deployed site
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditConfig {
    /// Origin the registered routes are appended to
    pub base_url: String,

    /// Maximum number of concurrent browser sessions
    #[serde(default = "default_max_concurrency")]
    pub max_concurrency: usize,

    /// URL for the WebDriver instance
    #[serde(default = "default_webdriver_url")]
    pub webdriver_url: String,

    /// Base time allowed for a single page, in milliseconds
    #[serde(default = "default_page_timeout_ms")]
    pub page_timeout_ms: u64,
}

fn default_brand_name() -> String {
    "HAUS".to_string()
}

fn default_title() -> String {
    "HAUS - Find Your Perfect Home".to_string()
}

fn default_description() -> String {
    "HAUS is a modern real estate platform to search, buy, sell and rent homes with trusted local agents."
        .to_string()
}

fn default_keywords() -> Vec<String> {
    vec!["HAUS".to_string(), "real estate".to_string()]
}

fn default_no_index_patterns() -> Vec<String> {
    vec![
        r"^/dashboard(/|$)".to_string(),
        r"^/messages(/|$)".to_string(),
        r"^/favorites(/|$)".to_string(),
        r"^/settings(/|$)".to_string(),
        r"^/finance(/|$)".to_string(),
    ]
}

/// Default value for max_concurrency
fn default_max_concurrency() -> usize {
    4
}

/// Default value for webdriver_url
fn default_webdriver_url() -> String {
    "http://localhost:4444".to_string()
}

fn default_page_timeout_ms() -> u64 {
    30_000
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            brand_name: default_brand_name(),
            default_title: default_title(),
            default_description: default_description(),
            default_keywords: default_keywords(),
            base_url: None,
            no_index_patterns: default_no_index_patterns(),
            realtime_url: None,
        }
    }
}

impl SiteConfig {
    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut file = File::open(path)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;

        Self::from_json(&contents)
    }

    /// Load configuration from a JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        Ok(config)
    }

    /// Set the public origin used for canonical links
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = Some(base_url.to_string());
        self
    }
}

impl AuditConfig {
    /// Create a new configuration with default values
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.to_string(),
            max_concurrency: default_max_concurrency(),
            webdriver_url: default_webdriver_url(),
            page_timeout_ms: default_page_timeout_ms(),
        }
    }

    /// Set the per-page timeout in whole seconds, saturating on overflow
    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.page_timeout_ms = secs.saturating_mul(1000);
        self
    }
}

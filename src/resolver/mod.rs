//! Merges a page's declared metadata with the site-wide defaults.
//!
//! Resolution is pure: the same `SiteConfig` and `PageMetadataConfig` always
//! produce the same `ResolvedMetadata`, and nothing is cached between calls.

use crate::config::SiteConfig;
use crate::error::HeadError;
use crate::metadata::{PageMetadataConfig, ResolvedMetadata, Robots};
use crate::text;
use crate::utils;
use url::Url;


/// Last resort when neither the page nor the site supplies a title
pub const FALLBACK_TITLE: &str = "Untitled";
/// Last resort when neither the page nor the site supplies a description
pub const FALLBACK_DESCRIPTION: &str = "No description available.";

/// Resolves page metadata against a fixed set of site defaults
#[derive(Debug, Clone)]
pub struct MetadataResolver {
    site: SiteConfig,
}

impl MetadataResolver {
    pub fn new(site: SiteConfig) -> Self {
        Self { site }
    }

    pub fn site(&self) -> &SiteConfig {
        &self.site
    }

    /// Resolve a page configuration into head metadata.
    ///
    /// Blank titles and descriptions fall back to the site defaults instead
    /// of producing empty tags.
    pub fn resolve(&self, config: &PageMetadataConfig) -> ResolvedMetadata {
        let title = self.compose_title(&config.title);
        let description = self.pick_description(&config.description);
        let keywords = text::merge_keywords([
            config.keywords.as_slice(),
            self.site.default_keywords.as_slice(),
        ]);

        ResolvedMetadata {
            title,
            description,
            keywords,
            robots: Robots::from_no_index(config.no_index),
            canonical: None,
            site_name: self.site.brand_name.clone(),
        }
    }

    /// Resolve metadata for a specific route, filling in the canonical URL
    /// when the site declares a base URL.
    pub fn resolve_route(&self, route: &str, config: &PageMetadataConfig) -> ResolvedMetadata {
        let mut resolved = self.resolve(config);
        resolved.canonical = self.canonical_url(route);
        resolved
    }

    /// Absolute URL for a route under the site's base URL
    pub fn canonical_url(&self, route: &str) -> Option<String> {
        let base_url = self.site.base_url.as_deref()?;
        let base = match Url::parse(base_url) {
            Ok(base) => base,
            Err(e) => {
                ::log::warn!("Ignoring unparseable base URL {}: {}", base_url, e);
                return None;
            }
        };

        match utils::join_route(&base, route) {
            Ok(url) => Some(url.to_string()),
            Err(e) => {
                ::log::warn!("Cannot build canonical URL for {}: {}", route, e);
                None
            }
        }
    }

    fn compose_title(&self, title: &str) -> String {
        let mut title = title;
        if text::is_blank(title) {
            log_recovered(HeadError::MissingRequiredField { field: "title" });
            title = self.site.default_title.as_str();
        }

        let brand = self.site.brand_name.trim();
        if text::is_blank(title) {
            // Site default is blank too
            if brand.is_empty() {
                ::log::warn!("Site has no default title or brand name");
                return FALLBACK_TITLE.to_string();
            }
            return brand.to_string();
        }

        if text::contains_ignore_case(title, brand) {
            title.to_string()
        } else {
            format!("{} | {}", title, brand)
        }
    }

    fn pick_description(&self, description: &str) -> String {
        if !text::is_blank(description) {
            return description.to_string();
        }

        log_recovered(HeadError::MissingRequiredField {
            field: "description",
        });
        if text::is_blank(&self.site.default_description) {
            ::log::warn!("Site has no default description");
            return FALLBACK_DESCRIPTION.to_string();
        }
        self.site.default_description.clone()
    }
}

impl Default for MetadataResolver {
    fn default() -> Self {
        Self::new(SiteConfig::default())
    }
}

fn log_recovered(error: HeadError) {
    ::log::warn!("{}; substituting site default", error);
}

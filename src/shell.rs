//! Document shell: the real-time provider and navigation frame composed
//! around every page body.

use crate::error::{HeadError, Result};
use crate::head;
use crate::metadata::ResolvedMetadata;
use crate::policy::IndexPolicy;
use crate::registry::RouteRegistry;
use crate::text;
use url::Url;

/// Environment variable holding the real-time backend URL
pub const REALTIME_URL_ENV: &str = "HAUS_REALTIME_URL";

/// Handle to the real-time data backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RealtimeClient {
    url: Url,
}

impl RealtimeClient {
    /// Create a client handle for an absolute http(s) or ws(s) URL
    pub fn new(url: &str) -> Result<Self> {
        let url = url.trim();
        if url.is_empty() {
            return Err(HeadError::MisconfiguredEnvironment(
                "real-time connection URL is empty".to_string(),
            ));
        }

        let parsed = Url::parse(url).map_err(|e| {
            HeadError::MisconfiguredEnvironment(format!("invalid real-time URL {:?}: {}", url, e))
        })?;
        match parsed.scheme() {
            "http" | "https" | "ws" | "wss" => Ok(Self { url: parsed }),
            scheme => Err(HeadError::MisconfiguredEnvironment(format!(
                "unsupported real-time URL scheme {:?}",
                scheme
            ))),
        }
    }

    pub fn url(&self) -> &Url {
        &self.url
    }
}

/// Real-time provider state for the shell. Without a usable URL the site
/// still renders, just without live data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RealtimeProvider {
    Connected(RealtimeClient),
    Disabled,
}

impl RealtimeProvider {
    /// Build a provider from an optional URL, degrading on any problem
    pub fn from_url(url: Option<&str>) -> Self {
        let Some(url) = url else {
            warn_disabled(&HeadError::MisconfiguredEnvironment(format!(
                "{} is not set",
                REALTIME_URL_ENV
            )));
            return RealtimeProvider::Disabled;
        };

        match RealtimeClient::new(url) {
            Ok(client) => {
                ::log::info!("Real-time provider using {}", client.url());
                RealtimeProvider::Connected(client)
            }
            Err(e) => {
                warn_disabled(&e);
                RealtimeProvider::Disabled
            }
        }
    }

    /// Build a provider from `HAUS_REALTIME_URL`
    pub fn from_env() -> Self {
        Self::from_env_or(None)
    }

    /// Build a provider from `HAUS_REALTIME_URL`, falling back to a configured URL
    pub fn from_env_or(fallback: Option<&str>) -> Self {
        let from_env = std::env::var(REALTIME_URL_ENV)
            .ok()
            .filter(|url| !url.trim().is_empty());
        Self::from_url(from_env.as_deref().or(fallback))
    }

    pub fn client(&self) -> Option<&RealtimeClient> {
        match self {
            RealtimeProvider::Connected(client) => Some(client),
            RealtimeProvider::Disabled => None,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.client().is_some()
    }
}

fn warn_disabled(error: &HeadError) {
    ::log::warn!("{}; rendering without real-time features", error);
}

/// One entry in the navigation shell
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavLink {
    pub href: String,
    pub label: String,
}

impl NavLink {
    pub fn new(href: &str, label: &str) -> Self {
        Self {
            href: href.to_string(),
            label: label.to_string(),
        }
    }
}

/// Wraps page bodies in a full document with head, navigation and provider
#[derive(Debug, Clone)]
pub struct Shell {
    provider: RealtimeProvider,
    nav: Vec<NavLink>,
    lang: String,
}

impl Shell {
    pub fn new(provider: RealtimeProvider, nav: Vec<NavLink>) -> Self {
        Self {
            provider,
            nav,
            lang: "en".to_string(),
        }
    }

    pub fn with_lang(mut self, lang: &str) -> Self {
        self.lang = lang.to_string();
        self
    }

    pub fn provider(&self) -> &RealtimeProvider {
        &self.provider
    }

    pub fn nav(&self) -> &[NavLink] {
        &self.nav
    }

    /// Navigation links for every public, static route
    pub fn nav_from_registry(registry: &RouteRegistry, policy: &IndexPolicy) -> Vec<NavLink> {
        registry
            .routes()
            .filter(|(route, config)| {
                !config.no_index && !policy.forces_no_index(route) && !route.contains('[')
            })
            .map(|(route, config)| {
                let label = if route == "/" {
                    "Home".to_string()
                } else {
                    text::normalize_whitespace(&config.title)
                };
                NavLink {
                    href: route.to_string(),
                    label,
                }
            })
            .collect()
    }

    /// Compose a complete HTML document around a page body
    pub fn compose(&self, metadata: &ResolvedMetadata, body: &str) -> String {
        let realtime = match &self.provider {
            RealtimeProvider::Connected(client) => client.url().to_string(),
            RealtimeProvider::Disabled => "off".to_string(),
        };

        let nav = self
            .nav
            .iter()
            .map(|link| {
                format!(
                    r#"<a href="{}">{}</a>"#,
                    head::escape(&link.href),
                    head::escape(&link.label)
                )
            })
            .collect::<Vec<_>>()
            .join("\n");

        let mut document = String::new();
        document.push_str("<!DOCTYPE html>\n");
        document.push_str(&format!(r#"<html lang="{}">"#, head::escape(&self.lang)));
        document.push_str("\n<head>\n<meta charset=\"utf-8\">\n");
        document.push_str(
            "<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n",
        );
        document.push_str(&head::render(metadata));
        document.push_str("\n</head>\n<body>\n");
        document.push_str(&format!(
            r#"<div id="haus-root" data-realtime="{}">"#,
            head::escape(&realtime)
        ));
        document.push_str("\n<nav>\n");
        document.push_str(&nav);
        document.push_str("\n</nav>\n<main>\n");
        document.push_str(body);
        document.push_str("\n</main>\n</div>\n</body>\n</html>\n");
        document
    }
}

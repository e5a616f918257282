pub mod audit;
pub mod config;
pub mod error;
pub mod head;
pub mod lint;
pub mod metadata;
pub mod policy;
pub mod registry;
pub mod resolver;
pub mod routes;
pub mod shell;
pub mod text;
pub mod utils;

// Re-export commonly used types for convenience
pub use config::{AuditConfig, SiteConfig};
pub use error::{HeadError, Result};
pub use metadata::{PageMetadataConfig, ResolvedMetadata, Robots};
pub use registry::RouteRegistry;
pub use resolver::MetadataResolver;

use audit::AuditReport;
use lint::LintWarning;
use policy::IndexPolicy;
use shell::{RealtimeProvider, Shell};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tokio::sync::mpsc;

/// A site: its defaults, its route table and everything derived from them
#[derive(Debug, Clone)]
pub struct Site {
    registry: RouteRegistry,
    policy: IndexPolicy,
    resolver: MetadataResolver,
}

impl Site {
    /// Create a site from its configuration and route table
    pub fn new(config: SiteConfig, registry: RouteRegistry) -> Result<Self> {
        let policy = IndexPolicy::new(&config.no_index_patterns)?;
        Ok(Self {
            registry,
            policy,
            resolver: MetadataResolver::new(config),
        })
    }

    /// The HAUS site with its built-in routes and default configuration
    pub fn haus() -> Self {
        Self::new(SiteConfig::default(), routes::haus_routes())
            .expect("Default index policy patterns should be valid")
    }

    /// Replace the site configuration
    pub fn with_config(self, config: SiteConfig) -> Result<Self> {
        Self::new(config, self.registry)
    }

    /// Load the site configuration from a JSON file
    pub fn with_config_file(self, path: impl AsRef<Path>) -> Result<Self> {
        let config = SiteConfig::from_file(path)?;
        self.with_config(config)
    }

    /// Load the site configuration from a JSON string
    pub fn with_config_str(self, json: &str) -> Result<Self> {
        let config = SiteConfig::from_json(json)?;
        self.with_config(config)
    }

    /// Replace the route table
    pub fn with_routes(mut self, registry: RouteRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Load the route table from a JSON file
    pub fn with_routes_file(self, path: impl AsRef<Path>) -> Result<Self> {
        let registry = RouteRegistry::from_file(path)?;
        Ok(self.with_routes(registry))
    }

    /// Override the public origin used for canonical links
    pub fn with_base_url(self, base_url: &str) -> Result<Self> {
        let config = self.config().clone().with_base_url(base_url);
        self.with_config(config)
    }

    pub fn config(&self) -> &SiteConfig {
        self.resolver.site()
    }

    pub fn registry(&self) -> &RouteRegistry {
        &self.registry
    }

    pub fn policy(&self) -> &IndexPolicy {
        &self.policy
    }

    pub fn resolver(&self) -> &MetadataResolver {
        &self.resolver
    }

    /// Resolve the metadata for a registered route
    pub fn resolve(&self, route: &str) -> Result<ResolvedMetadata> {
        self.registry
            .resolve(route, &self.resolver, &self.policy)
            .ok_or_else(|| HeadError::UnknownRoute(route.to_string()))
    }

    /// Resolve every registered route in path order
    pub fn resolve_all(&self) -> Vec<(String, ResolvedMetadata)> {
        self.registry.resolve_all(&self.resolver, &self.policy)
    }

    /// Render the `<head>` tags for a registered route
    pub fn render_head(&self, route: &str) -> Result<String> {
        Ok(head::render(&self.resolve(route)?))
    }

    /// Build the document shell, taking the real-time URL from the
    /// environment or the site configuration
    pub fn shell(&self) -> Shell {
        let provider = RealtimeProvider::from_env_or(self.config().realtime_url.as_deref());
        let nav = Shell::nav_from_registry(&self.registry, &self.policy);
        Shell::new(provider, nav)
    }

    /// Render a full document for a registered route around the given body
    pub fn render_document(&self, route: &str, body: &str) -> Result<String> {
        let metadata = self.resolve(route)?;
        Ok(self.shell().compose(&metadata, body))
    }

    /// Check the route table for metadata problems
    pub fn lint(&self) -> Vec<LintWarning> {
        lint::lint(&self.registry, self.config())
    }

    /// Write every route's rendered head fragment under `dir`, returning the
    /// paths written. Nothing is written if two routes map to the same file,
    /// compared case-insensitively.
    pub fn export(&self, dir: impl AsRef<Path>) -> Result<Vec<PathBuf>> {
        let dir = dir.as_ref();
        let resolved = self.resolve_all();

        let mut claimed: HashMap<String, &str> = HashMap::new();
        let mut files = Vec::with_capacity(resolved.len());
        for (route, metadata) in &resolved {
            let path = utils::route_file_path(route);
            let key = path.to_string_lossy().to_lowercase();
            if let Some(first) = claimed.insert(key, route) {
                return Err(HeadError::ExportCollision {
                    first: first.to_string(),
                    second: route.clone(),
                    path: path.display().to_string(),
                });
            }
            files.push((dir.join(path), metadata));
        }

        let mut written = Vec::with_capacity(files.len());
        for (path, metadata) in files {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&path, head::render(metadata))?;
            ::log::debug!("Wrote {}", path.display());
            written.push(path);
        }

        ::log::info!(
            "Exported {} head fragments to {}",
            written.len(),
            dir.display()
        );
        Ok(written)
    }

    /// Audit a deployed copy of the site and stream a report per route
    pub async fn audit(&self, config: &AuditConfig) -> Result<mpsc::Receiver<AuditReport>> {
        let mut config = config.clone();

        // Override the WebDriver URL with an environment variable if provided
        if let Ok(webdriver_url) = std::env::var("WEBDRIVER_URL") {
            if !webdriver_url.is_empty() {
                config.webdriver_url = webdriver_url;
            }
        }

        audit::web::start(&config, self.resolve_all()).await
    }
}

impl Default for Site {
    fn default() -> Self {
        Self::haus()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_haus_site_resolves_routes() {
        let site = Site::haus();
        let about = site.resolve("/about").unwrap();
        assert_eq!(about.title, "About Us | HAUS");
        assert_eq!(about.robots, Robots::IndexFollow);

        let dashboard = site.resolve("/dashboard/").unwrap();
        assert_eq!(dashboard.robots, Robots::NoindexFollow);
    }

    #[test]
    fn test_unknown_route() {
        let err = Site::haus().resolve("/nowhere").unwrap_err();
        assert!(matches!(err, HeadError::UnknownRoute(route) if route == "/nowhere"));
    }

    #[test]
    fn test_with_base_url_sets_canonical() {
        let site = Site::haus().with_base_url("https://haus.example").unwrap();
        assert_eq!(
            site.resolve("/agents").unwrap().canonical.as_deref(),
            Some("https://haus.example/agents")
        );
    }

    #[test]
    fn test_with_config_str() {
        let site = Site::haus()
            .with_config_str(r#"{"brandName": "Acme", "noIndexPatterns": []}"#)
            .unwrap();

        let dashboard = site.resolve("/dashboard").unwrap();
        assert_eq!(dashboard.title, "Dashboard | Acme");
        assert_eq!(dashboard.robots, Robots::IndexFollow);
    }

    #[test]
    fn test_with_config_str_rejects_bad_pattern() {
        let result = Site::haus().with_config_str(r#"{"noIndexPatterns": ["("]}"#);
        assert!(matches!(result, Err(HeadError::InvalidPattern(_))));
    }

    #[test]
    fn test_with_routes_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"/open-house": {{"title": "Open House", "description": "Tour homes this weekend."}}}}"#
        )
        .unwrap();

        let site = Site::haus().with_routes_file(file.path()).unwrap();
        assert_eq!(site.registry().len(), 1);
        assert_eq!(site.resolve("/open-house").unwrap().title, "Open House | HAUS");
        assert!(site.resolve("/about").is_err());
    }

    #[test]
    fn test_render_head_and_document() {
        let site = Site::haus();
        let head = site.render_head("/contact").unwrap();
        assert!(head.starts_with("<title>Contact Us | HAUS</title>"));

        let document = site.render_document("/contact", "<p>Hi</p>").unwrap();
        assert!(document.contains(&head));
        assert!(document.contains(r#"<a href="/about">About Us</a>"#));
    }

    #[test]
    fn test_builtin_site_lints_clean() {
        assert!(Site::haus().lint().is_empty());
    }

    #[test]
    fn test_export_writes_nested_fragments() {
        let dir = tempfile::tempdir().unwrap();
        let routes = RouteRegistry::new()
            .with_route("/", PageMetadataConfig::new("Home", "Welcome home."))
            .unwrap()
            .with_route("/a/b", PageMetadataConfig::new("Nested", "Nested page."))
            .unwrap()
            .with_route("/a_b", PageMetadataConfig::new("Flat", "Flat page."))
            .unwrap();
        let site = Site::haus().with_routes(routes);

        let written = site.export(dir.path()).unwrap();
        assert_eq!(written.len(), 3);

        let nested = std::fs::read_to_string(dir.path().join("a/b.html")).unwrap();
        assert!(nested.starts_with("<title>Nested | HAUS</title>"));
        let flat = std::fs::read_to_string(dir.path().join("a_b.html")).unwrap();
        assert!(flat.starts_with("<title>Flat | HAUS</title>"));
        assert!(dir.path().join("index.html").is_file());
    }

    #[test]
    fn test_export_refuses_colliding_routes() {
        let dir = tempfile::tempdir().unwrap();
        let routes = RouteRegistry::new()
            .with_route("/", PageMetadataConfig::new("Home", "Welcome home."))
            .unwrap()
            .with_route("/index", PageMetadataConfig::new("Index", "Site index."))
            .unwrap();
        let site = Site::haus().with_routes(routes);

        let err = site.export(dir.path()).unwrap_err();
        assert!(matches!(
            err,
            HeadError::ExportCollision { ref first, ref second, .. }
                if first == "/" && second == "/index"
        ));
        assert!(!dir.path().join("index.html").exists());
    }

    #[test]
    fn test_export_builtin_routes() {
        let dir = tempfile::tempdir().unwrap();
        let site = Site::haus();
        let written = site.export(dir.path()).unwrap();
        assert_eq!(written.len(), site.registry().len());
    }

    #[tokio::test]
    async fn test_audit_rejects_bad_base_url() {
        let result = Site::haus().audit(&AuditConfig::new("not a url")).await;
        assert!(matches!(result, Err(HeadError::InvalidUrl(_))));
    }
}

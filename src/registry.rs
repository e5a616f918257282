use crate::error::{HeadError, Result};
use crate::metadata::{PageMetadataConfig, ResolvedMetadata};
use crate::policy::IndexPolicy;
use crate::resolver::MetadataResolver;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Static table of routes and the metadata each one declares
#[derive(Debug, Clone, Default)]
pub struct RouteRegistry {
    routes: BTreeMap<String, PageMetadataConfig>,
}

impl RouteRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a route's configuration
    pub fn register(&mut self, route: &str, config: PageMetadataConfig) -> Result<()> {
        let route = normalize_route(route)?;
        if self.routes.contains_key(&route) {
            return Err(HeadError::DuplicateRoute(route));
        }

        ::log::trace!("Registering route {}", route);
        self.routes.insert(route, config);
        Ok(())
    }

    /// Builder-style registration
    pub fn with_route(mut self, route: &str, config: PageMetadataConfig) -> Result<Self> {
        self.register(route, config)?;
        Ok(self)
    }

    /// Load a registry from a JSON file mapping routes to configurations
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut file = File::open(path)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;

        Self::from_json(&contents)
    }

    /// Load a registry from a JSON string mapping routes to configurations
    pub fn from_json(json: &str) -> Result<Self> {
        let entries: BTreeMap<String, PageMetadataConfig> = serde_json::from_str(json)?;

        let mut registry = Self::new();
        for (route, config) in entries {
            registry.register(&route, config)?;
        }

        ::log::debug!("Loaded {} routes", registry.len());
        Ok(registry)
    }

    /// Look up the configuration for a route
    pub fn get(&self, route: &str) -> Option<&PageMetadataConfig> {
        let route = normalize_route(route).ok()?;
        self.routes.get(&route)
    }

    /// Iterate routes in path order
    pub fn routes(&self) -> impl Iterator<Item = (&str, &PageMetadataConfig)> {
        self.routes
            .iter()
            .map(|(route, config)| (route.as_str(), config))
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Resolve one route, applying the index policy first
    pub fn resolve(
        &self,
        route: &str,
        resolver: &MetadataResolver,
        policy: &IndexPolicy,
    ) -> Option<ResolvedMetadata> {
        let route = normalize_route(route).ok()?;
        let config = self.routes.get(&route)?;
        Some(resolve_entry(&route, config, resolver, policy))
    }

    /// Resolve every route in path order
    pub fn resolve_all(
        &self,
        resolver: &MetadataResolver,
        policy: &IndexPolicy,
    ) -> Vec<(String, ResolvedMetadata)> {
        self.routes
            .iter()
            .map(|(route, config)| {
                (
                    route.clone(),
                    resolve_entry(route, config, resolver, policy),
                )
            })
            .collect()
    }
}

fn resolve_entry(
    route: &str,
    config: &PageMetadataConfig,
    resolver: &MetadataResolver,
    policy: &IndexPolicy,
) -> ResolvedMetadata {
    let config = policy.apply(route, config);
    resolver.resolve_route(route, &config)
}

/// Validate a route path and strip any trailing slash
pub fn normalize_route(route: &str) -> Result<String> {
    let trimmed = route.trim();

    if !trimmed.starts_with('/') {
        return Err(HeadError::InvalidRoute(format!(
            "{:?} must start with '/'",
            route
        )));
    }
    if trimmed.chars().any(|c| c.is_whitespace() || c == '?' || c == '#') {
        return Err(HeadError::InvalidRoute(format!(
            "{:?} must be a bare path",
            route
        )));
    }

    let normalized = if trimmed.len() > 1 {
        trimmed.trim_end_matches('/')
    } else {
        trimmed
    };
    if normalized.is_empty() {
        return Ok("/".to_string());
    }
    if normalized.contains("//") {
        return Err(HeadError::InvalidRoute(format!(
            "{:?} has an empty segment",
            route
        )));
    }

    Ok(normalized.to_string())
}

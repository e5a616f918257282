use crate::error::Result;
use crate::metadata::PageMetadataConfig;
use regex::Regex;

/// Route patterns that are never indexed, whatever the page declares
#[derive(Debug, Clone, Default)]
pub struct IndexPolicy {
    no_index_regexes: Vec<Regex>,
}

impl IndexPolicy {
    /// Compile a policy from regex patterns matched against route paths
    pub fn new<I, S>(patterns: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut no_index_regexes = Vec::new();
        for pattern in patterns {
            no_index_regexes.push(Regex::new(pattern.as_ref())?);
        }

        Ok(Self { no_index_regexes })
    }

    /// Policy that never forces no-index
    pub fn allow_all() -> Self {
        Self::default()
    }

    /// Determine if a route must be excluded from search indexes
    pub fn forces_no_index(&self, route: &str) -> bool {
        self.no_index_regexes.iter().any(|regex| regex.is_match(route))
    }

    /// Apply the policy to a route's configuration. A page that already opts
    /// out of indexing stays opted out.
    pub fn apply(&self, route: &str, config: &PageMetadataConfig) -> PageMetadataConfig {
        if config.no_index || !self.forces_no_index(route) {
            return config.clone();
        }

        ::log::debug!("Index policy marks {} as noindex", route);
        config.clone().with_no_index(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;

    #[test]
    fn test_default_site_policy() {
        let policy = IndexPolicy::new(&SiteConfig::default().no_index_patterns).unwrap();

        assert!(policy.forces_no_index("/dashboard"));
        assert!(policy.forces_no_index("/dashboard/listings"));
        assert!(policy.forces_no_index("/messages"));
        assert!(policy.forces_no_index("/finance"));

        // Prefix alone is not enough
        assert!(!policy.forces_no_index("/dashboards-explained"));
        assert!(!policy.forces_no_index("/about"));
        assert!(!policy.forces_no_index("/"));
    }

    #[test]
    fn test_apply_forces_no_index() {
        let policy = IndexPolicy::new([r"^/private"]).unwrap();
        let config = PageMetadataConfig::new("Private", "Private page.");

        assert!(policy.apply("/private/notes", &config).no_index);
        assert!(!policy.apply("/public", &config).no_index);
    }

    #[test]
    fn test_apply_keeps_page_opt_out() {
        let policy = IndexPolicy::allow_all();
        let config = PageMetadataConfig::new("Draft", "Draft page.").with_no_index(true);
        assert!(policy.apply("/draft", &config).no_index);
    }

    #[test]
    fn test_invalid_pattern() {
        assert!(IndexPolicy::new(["(unclosed"]).is_err());
    }
}

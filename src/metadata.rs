use serde::{Deserialize, Serialize};
use std::fmt;

/// Metadata a route declares for its page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageMetadataConfig {
    /// Page-specific title
    pub title: String,

    /// Page-specific description (50-160 characters reads best in search results)
    pub description: String,

    /// Page keywords, merged ahead of the site defaults
    #[serde(default)]
    pub keywords: Vec<String>,

    /// Ask crawlers not to index this page
    #[serde(default, alias = "noIndex")]
    pub no_index: bool,
}

impl PageMetadataConfig {
    pub fn new(title: &str, description: &str) -> Self {
        Self {
            title: title.to_string(),
            description: description.to_string(),
            keywords: Vec::new(),
            no_index: false,
        }
    }

    pub fn with_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.keywords = keywords.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_no_index(mut self, no_index: bool) -> Self {
        self.no_index = no_index;
        self
    }
}

/// Robots directive emitted for a page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Robots {
    IndexFollow,
    NoindexFollow,
}

impl Robots {
    pub fn from_no_index(no_index: bool) -> Self {
        if no_index {
            Robots::NoindexFollow
        } else {
            Robots::IndexFollow
        }
    }

    /// Value of the `<meta name="robots">` content attribute
    pub fn directive(&self) -> &'static str {
        match self {
            Robots::IndexFollow => "index, follow",
            Robots::NoindexFollow => "noindex, follow",
        }
    }

    /// Parse a robots content attribute, ignoring case and spacing
    pub fn from_directive(directive: &str) -> Option<Self> {
        let normalized = directive
            .split(',')
            .map(|part| part.trim().to_ascii_lowercase())
            .collect::<Vec<_>>();
        let follows = normalized.iter().any(|p| p == "follow");
        if !follows {
            return None;
        }
        if normalized.iter().any(|p| p == "noindex") {
            Some(Robots::NoindexFollow)
        } else if normalized.iter().any(|p| p == "index") {
            Some(Robots::IndexFollow)
        } else {
            None
        }
    }

    pub fn is_indexable(&self) -> bool {
        matches!(self, Robots::IndexFollow)
    }
}

impl fmt::Display for Robots {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.directive())
    }
}

/// Fully merged metadata for one page, ready for the document head
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedMetadata {
    pub title: String,
    pub description: String,
    /// Page keywords followed by site keywords, without case-insensitive duplicates
    pub keywords: Vec<String>,
    pub robots: Robots,
    /// Absolute canonical URL, when the site has a base URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub canonical: Option<String>,
    pub site_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_json_defaults() {
        let config: PageMetadataConfig =
            serde_json::from_str(r#"{"title": "About", "description": "About HAUS."}"#).unwrap();
        assert!(config.keywords.is_empty());
        assert!(!config.no_index);
    }

    #[test]
    fn test_config_accepts_camel_case_no_index() {
        let config: PageMetadataConfig = serde_json::from_str(
            r#"{"title": "Inbox", "description": "Messages.", "noIndex": true}"#,
        )
        .unwrap();
        assert!(config.no_index);
    }

    #[test]
    fn test_robots_serialization() {
        assert_eq!(
            serde_json::to_string(&Robots::IndexFollow).unwrap(),
            "\"INDEX_FOLLOW\""
        );
        assert_eq!(
            serde_json::to_string(&Robots::NoindexFollow).unwrap(),
            "\"NOINDEX_FOLLOW\""
        );
    }

    #[test]
    fn test_robots_directive_parsing() {
        assert_eq!(
            Robots::from_directive("index, follow"),
            Some(Robots::IndexFollow)
        );
        assert_eq!(
            Robots::from_directive("NOINDEX,FOLLOW"),
            Some(Robots::NoindexFollow)
        );
        assert_eq!(Robots::from_directive("noindex, nofollow"), None);
        assert_eq!(Robots::from_directive(""), None);
    }
}

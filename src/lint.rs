use crate::config::SiteConfig;
use crate::registry::RouteRegistry;
use crate::text::{self, DESCRIPTION_MAX_CHARS, DESCRIPTION_MIN_CHARS};
use serde::Serialize;
use std::fmt;

/// Problem found in a route's declared metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum LintKind {
    BlankTitle,
    BlankDescription,
    DescriptionTooShort(usize),
    DescriptionTooLong(usize),
    DuplicateKeyword(String),
    /// Keyword will be split into several at the comma
    KeywordContainsComma(String),
    /// Title already ends with a hand-written `| Brand` suffix
    RedundantBrand,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LintWarning {
    pub route: String,
    pub kind: LintKind,
}

impl fmt::Display for LintWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: ", self.route)?;
        match &self.kind {
            LintKind::BlankTitle => write!(f, "title is blank, site default will be used"),
            LintKind::BlankDescription => {
                write!(f, "description is blank, site default will be used")
            }
            LintKind::DescriptionTooShort(len) => write!(
                f,
                "description is {} characters, shorter than {}",
                len, DESCRIPTION_MIN_CHARS
            ),
            LintKind::DescriptionTooLong(len) => write!(
                f,
                "description is {} characters, longer than {}",
                len, DESCRIPTION_MAX_CHARS
            ),
            LintKind::DuplicateKeyword(keyword) => {
                write!(f, "keyword {:?} is listed more than once", keyword)
            }
            LintKind::KeywordContainsComma(keyword) => {
                write!(f, "keyword {:?} contains a comma and will be split", keyword)
            }
            LintKind::RedundantBrand => write!(f, "title already carries a brand suffix"),
        }
    }
}

/// Check every registered route for metadata that will not read well
pub fn lint(registry: &RouteRegistry, site: &SiteConfig) -> Vec<LintWarning> {
    let mut warnings = Vec::new();

    for (route, config) in registry.routes() {
        let mut push = |kind| {
            warnings.push(LintWarning {
                route: route.to_string(),
                kind,
            })
        };

        if text::is_blank(&config.title) {
            push(LintKind::BlankTitle);
        } else if has_brand_suffix(&config.title, &site.brand_name) {
            push(LintKind::RedundantBrand);
        }

        if text::is_blank(&config.description) {
            push(LintKind::BlankDescription);
        } else {
            let len = text::char_len(&text::normalize_whitespace(&config.description));
            if len < DESCRIPTION_MIN_CHARS {
                push(LintKind::DescriptionTooShort(len));
            } else if len > DESCRIPTION_MAX_CHARS {
                push(LintKind::DescriptionTooLong(len));
            }
        }

        for keyword in text::duplicate_keywords(&config.keywords) {
            push(LintKind::DuplicateKeyword(keyword));
        }
        for keyword in config.keywords.iter().filter(|k| k.contains(',')) {
            push(LintKind::KeywordContainsComma(keyword.clone()));
        }
    }

    ::log::debug!(
        "Lint found {} warnings across {} routes",
        warnings.len(),
        registry.len()
    );
    warnings
}

fn has_brand_suffix(title: &str, brand: &str) -> bool {
    let brand = brand.trim();
    if brand.is_empty() {
        return false;
    }
    let title = text::normalize_whitespace(title).to_lowercase();
    let suffix = format!("| {}", brand.to_lowercase());
    title.ends_with(&suffix)
}

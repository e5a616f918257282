use crate::metadata::{ResolvedMetadata, Robots};
use crate::text;
use scraper::{Html, Selector};
use serde::Serialize;

/// Renders resolved metadata as `<head>` tags
pub fn render(metadata: &ResolvedMetadata) -> String {
    let mut tags = Vec::with_capacity(8);

    tags.push(format!("<title>{}</title>", escape(&metadata.title)));
    tags.push(meta_name("description", &metadata.description));
    if !metadata.keywords.is_empty() {
        tags.push(meta_name("keywords", &metadata.keywords.join(", ")));
    }
    tags.push(meta_name("robots", metadata.robots.directive()));
    if let Some(canonical) = &metadata.canonical {
        tags.push(format!(r#"<link rel="canonical" href="{}">"#, escape(canonical)));
    }
    tags.push(meta_property("og:title", &metadata.title));
    tags.push(meta_property("og:description", &metadata.description));
    tags.push(meta_property("og:site_name", &metadata.site_name));

    tags.join("\n")
}

fn meta_name(name: &str, content: &str) -> String {
    format!(r#"<meta name="{}" content="{}">"#, name, escape(content))
}

fn meta_property(property: &str, content: &str) -> String {
    format!(r#"<meta property="{}" content="{}">"#, property, escape(content))
}

/// Escapes text for use in element content and quoted attribute values
pub fn escape(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Metadata found in a rendered HTML document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExtractedHead {
    pub title: Option<String>,
    pub description: Option<String>,
    pub keywords: Vec<String>,
    pub robots: Option<Robots>,
    pub canonical: Option<String>,
}

/// Difference between the expected metadata and what a page actually serves
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Mismatch {
    pub field: &'static str,
    pub expected: String,
    pub found: Option<String>,
}

/// Parses an HTML document (or head fragment) and pulls out its metadata
pub fn extract(html: &str) -> ExtractedHead {
    let doc = Html::parse_document(html);

    let title_selector = Selector::parse("title").unwrap();
    let title = doc
        .select(&title_selector)
        .next()
        .map(|e| text::normalize_whitespace(&e.text().collect::<String>()));

    let keywords = meta_content(&doc, r#"meta[name="keywords"]"#)
        .map(|content| {
            content
                .split(',')
                .map(str::trim)
                .filter(|k| !k.is_empty())
                .map(|k| k.to_string())
                .collect()
        })
        .unwrap_or_default();

    let robots = meta_content(&doc, r#"meta[name="robots"]"#)
        .and_then(|content| Robots::from_directive(&content));

    let canonical_selector = Selector::parse(r#"link[rel="canonical"]"#).unwrap();
    let canonical = doc
        .select(&canonical_selector)
        .filter_map(|e| e.value().attr("href"))
        .map(|s| s.to_string())
        .next();

    let extracted = ExtractedHead {
        title,
        description: meta_content(&doc, r#"meta[name="description"]"#),
        keywords,
        robots,
        canonical,
    };
    ::log::trace!("Extracted head: {:?}", extracted);
    extracted
}

fn meta_content(doc: &Html, css: &str) -> Option<String> {
    let selector = Selector::parse(css).unwrap();
    doc.select(&selector)
        .filter_map(|e| e.value().attr("content"))
        .map(text::normalize_whitespace)
        .next()
}

impl ExtractedHead {
    /// Compare against the metadata the page is expected to serve
    ///
    /// Title and description are compared with whitespace collapsed, the same
    /// way `extract` reads them.
    pub fn matches(&self, expected: &ResolvedMetadata) -> Vec<Mismatch> {
        let mut mismatches = Vec::new();

        let title = text::normalize_whitespace(&expected.title);
        if self.title.as_deref() != Some(title.as_str()) {
            mismatches.push(Mismatch {
                field: "title",
                expected: expected.title.clone(),
                found: self.title.clone(),
            });
        }

        let description = text::normalize_whitespace(&expected.description);
        if self.description.as_deref() != Some(description.as_str()) {
            mismatches.push(Mismatch {
                field: "description",
                expected: expected.description.clone(),
                found: self.description.clone(),
            });
        }

        if self.keywords != expected.keywords {
            mismatches.push(Mismatch {
                field: "keywords",
                expected: format!("{:?}", expected.keywords),
                found: if self.keywords.is_empty() {
                    None
                } else {
                    Some(format!("{:?}", self.keywords))
                },
            });
        }

        if self.robots != Some(expected.robots) {
            mismatches.push(Mismatch {
                field: "robots",
                expected: expected.robots.directive().to_string(),
                found: self.robots.map(|r| r.directive().to_string()),
            });
        }

        if let Some(canonical) = &expected.canonical {
            if self.canonical.as_ref() != Some(canonical) {
                mismatches.push(Mismatch {
                    field: "canonical",
                    expected: canonical.clone(),
                    found: self.canonical.clone(),
                });
            }
        }

        mismatches
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::PageMetadataConfig;
    use crate::resolver::MetadataResolver;
    use crate::config::SiteConfig;

    fn contact() -> ResolvedMetadata {
        MetadataResolver::new(SiteConfig::default().with_base_url("https://haus.example"))
            .resolve_route(
                "/contact",
                &PageMetadataConfig::new("Contact Us", "Get in touch.")
                    .with_keywords(["contact", "support"]),
            )
    }

    #[test]
    fn test_render_tags() {
        let head = render(&contact());
        let lines: Vec<&str> = head.lines().collect();

        assert_eq!(lines[0], "<title>Contact Us | HAUS</title>");
        assert_eq!(
            lines[1],
            r#"<meta name="description" content="Get in touch.">"#
        );
        assert_eq!(
            lines[2],
            r#"<meta name="keywords" content="contact, support, HAUS, real estate">"#
        );
        assert_eq!(lines[3], r#"<meta name="robots" content="index, follow">"#);
        assert_eq!(
            lines[4],
            r#"<link rel="canonical" href="https://haus.example/contact">"#
        );
        assert!(head.contains(r#"<meta property="og:site_name" content="HAUS">"#));
    }

    #[test]
    fn test_render_skips_optional_tags() {
        let mut metadata = contact();
        metadata.keywords.clear();
        metadata.canonical = None;

        let head = render(&metadata);
        assert!(!head.contains("keywords"));
        assert!(!head.contains("canonical"));
    }

    #[test]
    fn test_render_escapes() {
        let metadata = MetadataResolver::default().resolve(&PageMetadataConfig::new(
            "Buy & Sell <Homes>",
            r#"Say "hello" to your new home."#,
        ));
        let head = render(&metadata);

        assert!(head.contains("<title>Buy &amp; Sell &lt;Homes&gt; | HAUS</title>"));
        assert!(head.contains("content=\"Say &quot;hello&quot; to your new home.\""));
    }

    #[test]
    fn test_extract_rendered_head() {
        let expected = contact();
        let html = format!("<html><head>{}</head><body></body></html>", render(&expected));

        let extracted = extract(&html);
        assert_eq!(extracted.title.as_deref(), Some("Contact Us | HAUS"));
        assert_eq!(extracted.robots, Some(Robots::IndexFollow));
        assert!(extracted.matches(&expected).is_empty());
    }

    #[test]
    fn test_extract_escaped_values() {
        let metadata = MetadataResolver::default()
            .resolve(&PageMetadataConfig::new("Buy & Sell", "Homes \"for\" you."));
        let extracted = extract(&render(&metadata));
        assert!(extracted.matches(&metadata).is_empty());
    }

    #[test]
    fn test_round_trip_comma_keyword() {
        let metadata = MetadataResolver::default().resolve(
            &PageMetadataConfig::new("Listings", "All listings.")
                .with_keywords(["homes, condos", "lofts"]),
        );
        assert_eq!(
            metadata.keywords,
            vec!["homes", "condos", "lofts", "HAUS", "real estate"]
        );

        let extracted = extract(&render(&metadata));
        assert!(extracted.matches(&metadata).is_empty());
    }

    #[test]
    fn test_round_trip_keeps_declared_spacing() {
        let metadata = MetadataResolver::default()
            .resolve(&PageMetadataConfig::new("HAUS  -  Agents", "Get in  touch.\n"));
        let extracted = extract(&render(&metadata));
        assert!(extracted.matches(&metadata).is_empty());
    }

    #[test]
    fn test_keyword_mismatch_lists_both_sides() {
        let expected = contact();
        let mut served = expected.clone();
        served.keywords.pop();

        let mismatches = extract(&render(&served)).matches(&expected);
        assert_eq!(
            mismatches,
            vec![Mismatch {
                field: "keywords",
                expected: r#"["contact", "support", "HAUS", "real estate"]"#.to_string(),
                found: Some(r#"["contact", "support", "HAUS"]"#.to_string()),
            }]
        );
    }

    #[test]
    fn test_extract_missing_head() {
        let extracted = extract("<html><body><p>No head here</p></body></html>");
        assert_eq!(extracted, ExtractedHead::default());

        let mismatches = extracted.matches(&contact());
        let fields: Vec<&str> = mismatches.iter().map(|m| m.field).collect();
        assert_eq!(
            fields,
            vec!["title", "description", "keywords", "robots", "canonical"]
        );
    }

    #[test]
    fn test_matches_reports_wrong_robots() {
        let expected = contact();
        let mut served = expected.clone();
        served.robots = Robots::NoindexFollow;

        let mismatches = extract(&render(&served)).matches(&expected);
        assert_eq!(
            mismatches,
            vec![Mismatch {
                field: "robots",
                expected: "index, follow".to_string(),
                found: Some("noindex, follow".to_string()),
            }]
        );
    }
}

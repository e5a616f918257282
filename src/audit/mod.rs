//! Checks that a deployed site serves the metadata its registry declares.

pub mod web;

use crate::head::{self, Mismatch};
use crate::metadata::ResolvedMetadata;
use serde::Serialize;

/// Outcome of auditing one route
#[derive(Debug, Clone, Serialize)]
pub struct AuditReport {
    pub route: String,
    pub url: String,
    pub mismatches: Vec<Mismatch>,
    /// Set when the page could not be fetched at all
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl AuditReport {
    /// Report for a page that could not be loaded
    pub fn failed(route: &str, url: &str, error: impl Into<String>) -> Self {
        Self {
            route: route.to_string(),
            url: url.to_string(),
            mismatches: Vec::new(),
            error: Some(error.into()),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.error.is_none() && self.mismatches.is_empty()
    }
}

/// Compare a page's served HTML against its expected metadata
pub fn audit_html(route: &str, url: &str, html: &str, expected: &ResolvedMetadata) -> AuditReport {
    let mismatches = head::extract(html).matches(expected);
    if !mismatches.is_empty() {
        ::log::debug!("{} has {} metadata mismatches", url, mismatches.len());
    }

    AuditReport {
        route: route.to_string(),
        url: url.to_string(),
        mismatches,
        error: None,
    }
}

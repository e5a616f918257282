use std::collections::HashSet;

/// Description length bounds for search-result snippets, in characters
pub const DESCRIPTION_MIN_CHARS: usize = 50;
pub const DESCRIPTION_MAX_CHARS: usize = 160;

/// Returns true when the text has no visible characters
pub fn is_blank(text: &str) -> bool {
    text.trim().is_empty()
}

/// Collapses every run of whitespace (including newlines) into a single space
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Case-insensitive substring check
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Merges keyword lists in order, trimming entries and dropping blanks and
/// case-insensitive repeats. The first spelling seen wins. An entry holding
/// commas is split into separate keywords, since the keywords meta tag is
/// comma-separated.
pub fn merge_keywords<'a, I>(lists: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a [String]>,
{
    let mut seen = HashSet::new();
    let mut merged = Vec::new();

    for list in lists {
        for keyword in list.iter().flat_map(|entry| entry.split(',')) {
            let keyword = normalize_whitespace(keyword);
            if keyword.is_empty() {
                continue;
            }
            if seen.insert(keyword.to_lowercase()) {
                merged.push(keyword);
            }
        }
    }

    merged
}

/// Keywords that appear more than once in a single list, ignoring case
pub fn duplicate_keywords(keywords: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut reported = HashSet::new();
    let mut duplicates = Vec::new();

    for keyword in keywords {
        let key = normalize_whitespace(keyword).to_lowercase();
        if key.is_empty() {
            continue;
        }
        if !seen.insert(key.clone()) && reported.insert(key) {
            duplicates.push(keyword.clone());
        }
    }

    duplicates
}

/// Number of characters (not bytes) in the text
pub fn char_len(text: &str) -> usize {
    text.chars().count()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_blank() {
        assert!(is_blank(""));
        assert!(is_blank("   \n\t  "));
        assert!(!is_blank(" a "));
    }

    #[test]
    fn test_normalize_whitespace() {
        assert_eq!(normalize_whitespace("  Find   a\n home  "), "Find a home");
        assert_eq!(normalize_whitespace(""), "");
    }

    #[test]
    fn test_contains_ignore_case() {
        assert!(contains_ignore_case("About Haus", "HAUS"));
        assert!(!contains_ignore_case("About us", "HAUS"));
    }

    #[test]
    fn test_merge_keeps_first_seen_order() {
        let page = strings(&["contact", "Support", "haus"]);
        let site = strings(&["HAUS", "real estate", "support"]);
        let merged = merge_keywords([page.as_slice(), site.as_slice()]);
        assert_eq!(merged, strings(&["contact", "Support", "haus", "real estate"]));
    }

    #[test]
    fn test_merge_drops_blank_entries() {
        let page = strings(&["  ", "", " homes  for sale "]);
        let merged = merge_keywords([page.as_slice()]);
        assert_eq!(merged, strings(&["homes for sale"]));
    }

    #[test]
    fn test_merge_splits_comma_entries() {
        let page = strings(&["homes, condos", "Condos", ",, lofts,"]);
        let site = strings(&["HAUS"]);
        let merged = merge_keywords([page.as_slice(), site.as_slice()]);
        assert_eq!(merged, strings(&["homes", "condos", "lofts", "HAUS"]));
    }

    #[test]
    fn test_duplicate_keywords() {
        let keywords = strings(&["Rent", "buy", "rent", "RENT", "sell"]);
        assert_eq!(duplicate_keywords(&keywords), strings(&["rent"]));
    }

    #[test]
    fn test_char_len_counts_characters() {
        assert_eq!(char_len("café"), 4);
    }
}

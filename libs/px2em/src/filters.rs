//! # Filters
//!
//! Decide which selectors, properties and files the converter leaves alone.

use crate::options::{Exclude, SelectorMatcher};

// =============================================================================
// SELECTOR FILTER
// =============================================================================

/// True if any blacklist entry matches `selector`.
///
/// ## Example
///
/// ```rust
/// use px2em::filters::is_selector_blacklisted;
/// use px2em::SelectorMatcher;
///
/// let list = vec![SelectorMatcher::text(".rule2")];
/// assert!(is_selector_blacklisted(".rule2", &list));
/// assert!(!is_selector_blacklisted(".rule", &list));
/// ```
pub fn is_selector_blacklisted(selector: &str, blacklist: &[SelectorMatcher]) -> bool {
    blacklist.iter().any(|entry| entry.matches(selector))
}

// =============================================================================
// PROPERTY FILTER
// =============================================================================

/// True if the declaration for `prop` should be scanned.
///
/// Whitelist entries name properties exactly (an empty whitelist allows
/// every property); blacklist entries exclude any property containing them.
///
/// ## Example
///
/// ```rust
/// use px2em::filters::is_prop_eligible;
///
/// let font = vec!["font".to_string()];
/// assert!(!is_prop_eligible("font-size", &font, &[]));
/// assert!(!is_prop_eligible("font-size", &[], &font));
/// assert!(is_prop_eligible("margin", &[], &font));
/// ```
pub fn is_prop_eligible(prop: &str, white_list: &[String], black_list: &[String]) -> bool {
    let allowed = white_list.is_empty() || white_list.iter().any(|entry| entry == prop);
    let denied = black_list.iter().any(|entry| prop.contains(entry.as_str()));
    allowed && !denied
}

// =============================================================================
// FILE EXCLUSION
// =============================================================================

/// True if the stylesheet at `path` should pass through untouched.
///
/// Unknown paths are never excluded.
pub fn is_file_excluded(path: Option<&str>, exclude: Option<&Exclude>) -> bool {
    match (path, exclude) {
        (Some(path), Some(exclude)) => exclude.matches(path),
        _ => false,
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn test_text_entry_is_substring() {
        let list = vec![SelectorMatcher::text("body$")];
        assert!(!is_selector_blacklisted("body", &list));
        assert!(is_selector_blacklisted(".class-body$", &list));
        assert!(!is_selector_blacklisted(".simple-class", &list));
    }

    #[test]
    fn test_pattern_entry_is_exact_when_anchored() {
        let list = vec![SelectorMatcher::pattern("^body$").expect("valid")];
        assert!(is_selector_blacklisted("body", &list));
        assert!(!is_selector_blacklisted(".class-body", &list));
        assert!(!is_selector_blacklisted(".simple-class", &list));
    }

    #[test]
    fn test_entries_are_ored() {
        let list = vec![
            SelectorMatcher::text(".a"),
            SelectorMatcher::pattern("b$").expect("valid"),
        ];
        assert!(is_selector_blacklisted(".a", &list));
        assert!(is_selector_blacklisted(".b", &list));
        assert!(!is_selector_blacklisted(".c", &list));
        assert!(!is_selector_blacklisted(".c", &[]));
    }

    #[test]
    fn test_empty_white_list_allows_all() {
        assert!(is_prop_eligible("margin", &[], &[]));
        assert!(is_prop_eligible("font-size", &[], &[]));
    }

    #[test]
    fn test_white_list_is_exact() {
        let white = strings(&["margin"]);
        assert!(is_prop_eligible("margin", &white, &[]));
        assert!(!is_prop_eligible("margin-left", &white, &[]));
        assert!(!is_prop_eligible("padding", &white, &[]));
    }

    #[test]
    fn test_black_list_wins() {
        let white = strings(&["font-size"]);
        let black = strings(&["font"]);
        assert!(!is_prop_eligible("font-size", &white, &black));
    }

    #[test]
    fn test_file_exclusion() {
        let exclude = Exclude::Text("node_modules".to_string());
        assert!(is_file_excluded(Some("node_modules/a.css"), Some(&exclude)));
        assert!(!is_file_excluded(Some("src/a.css"), Some(&exclude)));
        assert!(!is_file_excluded(None, Some(&exclude)));
        assert!(!is_file_excluded(Some("node_modules/a.css"), None));
    }

    #[test]
    fn test_file_exclusion_predicate() {
        let exclude = Exclude::predicate(|path| path.starts_with("vendor/"));
        assert!(is_file_excluded(Some("vendor/x.css"), Some(&exclude)));
        assert!(!is_file_excluded(Some("app/vendor/x.css"), Some(&exclude)));
    }
}

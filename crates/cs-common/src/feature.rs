//! Feature metadata, scenario keys and credential pairs.

use serde::{Deserialize, Serialize};

/// Declared name used when a parsed feature document carries no name.
pub const FEATURE_NAME_MISSING: &str = "Feature name missing";

/// Folder names that say nothing about grouping and are suppressed.
const GENERIC_FOLDERS: [&str; 2] = ["feature", "features"];

/// Gherkin keywords whose scenarios are instantiated once per example row.
const OUTLINE_KEYWORDS: [&str; 2] = ["scenario outline", "scenario template"];

/// Static metadata for one feature file, keyed by its URI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureRecord {
    /// Source URI (unique key).
    pub uri: String,
    /// Folder immediately above the file, or empty when generic/absent.
    pub grouping_name: String,
    /// File name up to its first `.`.
    pub file_stem_name: String,
    /// `Feature:` name from the document, or [`FEATURE_NAME_MISSING`].
    pub declared_name: String,
}

impl FeatureRecord {
    /// Derive a record from a URI, its path segments and the names found on
    /// the parsed document's nodes (in document order).
    pub fn derive<S, N>(uri: &str, path_segments: &[S], declared_names: &[N]) -> Self
    where
        S: AsRef<str>,
        N: AsRef<str>,
    {
        let segments: Vec<&str> = path_segments
            .iter()
            .map(AsRef::as_ref)
            .filter(|s| !s.is_empty())
            .collect();

        let file_name = segments.last().map(|s| strip_scheme(s)).unwrap_or("");
        let file_stem_name = match file_name.split_once('.') {
            Some((stem, _)) if !stem.is_empty() => stem,
            _ => file_name,
        }
        .to_string();

        let grouping_name = if segments.len() >= 2 {
            let folder = strip_scheme(segments[segments.len() - 2]);
            if GENERIC_FOLDERS
                .iter()
                .any(|generic| folder.eq_ignore_ascii_case(generic))
            {
                String::new()
            } else {
                folder.to_string()
            }
        } else {
            String::new()
        };

        let declared_name = declared_names
            .iter()
            .map(|n| n.as_ref().trim())
            .find(|n| !n.is_empty())
            .unwrap_or(FEATURE_NAME_MISSING)
            .to_string();

        Self {
            uri: uri.to_string(),
            grouping_name,
            file_stem_name,
            declared_name,
        }
    }

    /// Derive a record, splitting the URI itself into path segments.
    pub fn from_uri<N: AsRef<str>>(uri: &str, declared_names: &[N]) -> Self {
        let segments = path_segments(uri);
        Self::derive(uri, &segments, declared_names)
    }
}

/// Split a feature URI into its `/`-separated segments.
pub fn path_segments(uri: &str) -> Vec<&str> {
    uri.split('/').collect()
}

fn strip_scheme(segment: &str) -> &str {
    match segment.split_once(':') {
        Some((_, rest)) => rest,
        None => segment,
    }
}

/// Key of one scenario row within a feature.
///
/// Outline instances share a display name, so their key carries the source
/// line (`"Add numbers #12"`). Within a feature, a repeated key overwrites
/// the earlier status.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScenarioKey(String);

impl ScenarioKey {
    /// Key for a plain scenario.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Key for a finished test case, disambiguating outline instances.
    pub fn for_case(name: &str, keyword: &str, line: u32) -> Self {
        if is_outline_keyword(keyword) {
            Self(format!("{name} #{line}"))
        } else {
            Self(name.to_string())
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ScenarioKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ScenarioKey {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

fn is_outline_keyword(keyword: &str) -> bool {
    let keyword = keyword.trim();
    OUTLINE_KEYWORDS
        .iter()
        .any(|k| keyword.eq_ignore_ascii_case(k))
}

/// Display-only credentials associated with a feature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialPair {
    pub username: String,
    pub password: String,
}

impl CredentialPair {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NO_NAMES: [&str; 0] = [];

    #[test]
    fn test_grouping_from_parent_folder() {
        let rec = FeatureRecord::from_uri("file:///repo/src/test/checkout/pay.feature", &["Pay"]);
        assert_eq!(rec.grouping_name, "checkout");
        assert_eq!(rec.file_stem_name, "pay");
        assert_eq!(rec.declared_name, "Pay");
    }

    #[test]
    fn test_generic_folder_suppressed_any_case() {
        for folder in ["features", "Features", "FEATURE", "feature"] {
            let uri = format!("file:///repo/{folder}/login.feature");
            let rec = FeatureRecord::from_uri(&uri, &NO_NAMES);
            assert_eq!(rec.grouping_name, "", "folder {folder} should be suppressed");
            assert_eq!(rec.file_stem_name, "login");
        }
    }

    #[test]
    fn test_scheme_prefix_stripped_from_folder() {
        let rec = FeatureRecord::from_uri("classpath:billing/invoice.feature", &NO_NAMES);
        assert_eq!(rec.grouping_name, "billing");

        let rec = FeatureRecord::from_uri("classpath:features/invoice.feature", &NO_NAMES);
        assert_eq!(rec.grouping_name, "");
    }

    #[test]
    fn test_single_segment_uri() {
        let rec = FeatureRecord::from_uri("classpath:login.feature", &NO_NAMES);
        assert_eq!(rec.grouping_name, "");
        assert_eq!(rec.file_stem_name, "login");
    }

    #[test]
    fn test_stem_stops_at_first_dot() {
        let rec = FeatureRecord::from_uri("file:///x/api/login.v2.feature", &NO_NAMES);
        assert_eq!(rec.file_stem_name, "login");
        assert_eq!(rec.grouping_name, "api");

        let rec = FeatureRecord::from_uri("x/.feature", &NO_NAMES);
        assert_eq!(rec.file_stem_name, ".feature");
    }

    #[test]
    fn test_declared_name_first_non_empty() {
        let rec = FeatureRecord::from_uri("a/b.feature", &["", "  ", "Checkout", "Other"]);
        assert_eq!(rec.declared_name, "Checkout");

        let rec = FeatureRecord::from_uri("a/b.feature", &NO_NAMES);
        assert_eq!(rec.declared_name, FEATURE_NAME_MISSING);
    }

    #[test]
    fn test_scenario_key_outline_disambiguation() {
        let a = ScenarioKey::for_case("Add numbers", "Scenario Outline", 10);
        let b = ScenarioKey::for_case("Add numbers", "Scenario Outline", 20);
        assert_ne!(a, b);
        assert_eq!(a.as_str(), "Add numbers #10");

        let t = ScenarioKey::for_case("Add numbers", "Scenario Template", 30);
        assert_eq!(t.as_str(), "Add numbers #30");
    }

    #[test]
    fn test_scenario_key_plain() {
        let k = ScenarioKey::for_case("Login", "Scenario", 4);
        assert_eq!(k.as_str(), "Login");
        assert_eq!(k, ScenarioKey::new("Login"));
    }
}

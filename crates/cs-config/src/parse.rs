//! Grammars for the argument string and the properties file.

use cs_common::FailureKind;
use tracing::{debug, warn};

/// Parse an argument string of `key=value` entries separated by `;` or `&`.
///
/// Keys and values are trimmed and each entry is split on its first `=`.
/// Entries without `=` (or with an empty key) are dropped individually.
/// Later duplicates win when the pairs are folded into a map.
pub fn parse_args(args: &str) -> Vec<(String, String)> {
    let mut pairs = Vec::new();
    if args.trim().is_empty() {
        return pairs;
    }

    for entry in args.split([';', '&']) {
        if entry.trim().is_empty() {
            continue;
        }
        match entry.split_once('=') {
            Some((key, value)) if !key.trim().is_empty() => {
                pairs.push((key.trim().to_string(), value.trim().to_string()));
            }
            _ => {
                warn!(
                    kind = %FailureKind::MalformedArgumentEntry,
                    entry = entry,
                    "Dropping argument entry without key=value"
                );
            }
        }
    }

    pairs
}

/// Parse a flat properties file.
///
/// Accepts `key=value` and `key: value` lines; `#` and `!` start comments.
/// Lines without a separator are skipped.
pub fn parse_properties(contents: &str) -> Vec<(String, String)> {
    let mut pairs = Vec::new();

    for (line_no, raw) in contents.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') || line.starts_with('!') {
            continue;
        }

        let split = line
            .find(['=', ':'])
            .map(|pos| (&line[..pos], &line[pos + 1..]));

        match split {
            Some((key, value)) if !key.trim().is_empty() => {
                pairs.push((key.trim().to_string(), value.trim().to_string()));
            }
            _ => {
                debug!(line = line_no + 1, "Skipping properties line without separator");
            }
        }
    }

    pairs
}

/// Normalize a prefixed environment variable name to a config key.
///
/// `CUCUMBER_SUMMARY_ENV_URL` → `env.url`. Returns `None` when the name does
/// not carry the prefix.
pub fn env_key(name: &str, prefix: &str) -> Option<String> {
    let rest = name.strip_prefix(prefix)?;
    if rest.is_empty() {
        return None;
    }
    Some(rest.to_lowercase().replace('_', "."))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(list: &[(&str, &str)]) -> Vec<(String, String)> {
        list.iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_parse_args_both_separators() {
        let parsed = parse_args("env.url=https://stg; show.env = true&report.title=Nightly");
        assert_eq!(
            parsed,
            pairs(&[
                ("env.url", "https://stg"),
                ("show.env", "true"),
                ("report.title", "Nightly"),
            ])
        );
    }

    #[test]
    fn test_parse_args_skips_malformed_entries() {
        let parsed = parse_args("broken;a=1;=nokey;also broken&b=2");
        assert_eq!(parsed, pairs(&[("a", "1"), ("b", "2")]));
    }

    #[test]
    fn test_parse_args_splits_on_first_equals() {
        let parsed = parse_args("env.url=https://host/?q=1");
        assert_eq!(parsed, pairs(&[("env.url", "https://host/?q=1")]));
    }

    #[test]
    fn test_parse_args_empty() {
        assert!(parse_args("").is_empty());
        assert!(parse_args("   ").is_empty());
        assert!(parse_args(";;&").is_empty());
    }

    #[test]
    fn test_parse_properties() {
        let text = "# comment\n! also comment\n\nreport.title = Smoke\nshow.env: true\nnoseparator\n";
        assert_eq!(
            parse_properties(text),
            pairs(&[("report.title", "Smoke"), ("show.env", "true")])
        );
    }

    #[test]
    fn test_env_key_normalization() {
        assert_eq!(
            env_key("CUCUMBER_SUMMARY_ENV_URL", "CUCUMBER_SUMMARY_"),
            Some("env.url".to_string())
        );
        assert_eq!(
            env_key("CUCUMBER_SUMMARY_SHOW_OS_BROWSER", "CUCUMBER_SUMMARY_"),
            Some("show.os.browser".to_string())
        );
        assert_eq!(env_key("PATH", "CUCUMBER_SUMMARY_"), None);
        assert_eq!(env_key("CUCUMBER_SUMMARY_", "CUCUMBER_SUMMARY_"), None);
    }
}

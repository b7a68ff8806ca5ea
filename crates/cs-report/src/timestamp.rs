//! Execution timestamp rendering with configurable zone and format.

use std::fmt::Write as _;

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, FixedOffset, Local, Utc};
use tracing::warn;

use crate::error::{ReportError, Result};

/// Common zone abbreviations and their offsets in minutes.
const ABBREVIATIONS: &[(&str, i32)] = &[
    ("IST", 5 * 60 + 30),
    ("EST", -5 * 60),
    ("EDT", -4 * 60),
    ("CST", -6 * 60),
    ("CDT", -5 * 60),
    ("MST", -7 * 60),
    ("MDT", -6 * 60),
    ("PST", -8 * 60),
    ("PDT", -7 * 60),
    ("CET", 60),
    ("CEST", 2 * 60),
    ("BST", 60),
    ("JST", 9 * 60),
    ("AEST", 10 * 60),
];

/// A zone the timestamp can be rendered in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Zone {
    Utc,
    Local,
    /// Fixed offset with the label printed for `%Z`.
    Fixed { offset: FixedOffset, label: String },
}

impl Zone {
    /// Parse `UTC`/`GMT`/`Z`, `Local`, `+HH:MM`/`-HH:MM`, or a known abbreviation.
    pub fn parse(text: &str) -> Result<Self> {
        let text = text.trim();
        let upper = text.to_ascii_uppercase();
        match upper.as_str() {
            "UTC" | "GMT" | "Z" => return Ok(Zone::Utc),
            "LOCAL" => return Ok(Zone::Local),
            _ => {}
        }

        if let Some(&(name, minutes)) = ABBREVIATIONS.iter().find(|(name, _)| *name == upper) {
            return fixed(minutes, name.to_string(), text);
        }

        if let Some(minutes) = parse_offset(text) {
            return fixed(minutes, text.to_string(), text);
        }

        Err(ReportError::InvalidConfig(format!("unknown time zone '{text}'")))
    }

    /// Like [`Zone::parse`], logging and falling back to UTC on failure.
    pub fn parse_or_utc(text: &str) -> Self {
        Self::parse(text).unwrap_or_else(|err| {
            warn!(zone = text, error = %err, "Falling back to UTC");
            Zone::Utc
        })
    }
}

fn fixed(minutes: i32, label: String, text: &str) -> Result<Zone> {
    FixedOffset::east_opt(minutes * 60)
        .map(|offset| Zone::Fixed { offset, label })
        .ok_or_else(|| ReportError::InvalidConfig(format!("offset out of range in '{text}'")))
}

/// `+HH:MM`, `-HH:MM`, `+HHMM` or `+HH`, optionally prefixed with `UTC`/`GMT`.
fn parse_offset(text: &str) -> Option<i32> {
    let upper = text.to_ascii_uppercase();
    let body = upper
        .strip_prefix("UTC")
        .or_else(|| upper.strip_prefix("GMT"))
        .unwrap_or(&upper);

    let (sign, digits) = match body.as_bytes().first()? {
        b'+' => (1, &body[1..]),
        b'-' => (-1, &body[1..]),
        _ => return None,
    };

    let (hours, minutes) = match digits.split_once(':') {
        Some((h, m)) => (h, m),
        None if digits.len() == 4 => digits.split_at(2),
        None => (digits, "0"),
    };
    let hours: i32 = hours.parse().ok()?;
    let minutes: i32 = minutes.parse().ok()?;
    if hours > 23 || minutes > 59 {
        return None;
    }
    Some(sign * (hours * 60 + minutes))
}

/// Render `at` in `zone` with a strftime-style `format`.
///
/// `%Z` prints the configured label for fixed zones. An invalid format is an
/// [`ReportError::InvalidConfig`].
pub fn render(at: DateTime<Utc>, zone: &Zone, format: &str) -> Result<String> {
    let invalid = || ReportError::InvalidConfig(format!("invalid time stamp format '{format}'"));

    let format = match zone {
        Zone::Fixed { label, .. } => format.replace("%Z", &label.replace('%', "%%")),
        _ => format.to_string(),
    };
    let items: Vec<Item<'_>> = StrftimeItems::new(&format).collect();
    if items.iter().any(|item| matches!(item, Item::Error)) {
        return Err(invalid());
    }

    let mut out = String::new();
    let written = match zone {
        Zone::Utc => write!(out, "{}", at.format_with_items(items.iter())),
        Zone::Local => write!(
            out,
            "{}",
            at.with_timezone(&Local).format_with_items(items.iter())
        ),
        Zone::Fixed { offset, .. } => write!(
            out,
            "{}",
            at.with_timezone(offset).format_with_items(items.iter())
        ),
    };
    written.map_err(|_| invalid())?;
    Ok(out)
}

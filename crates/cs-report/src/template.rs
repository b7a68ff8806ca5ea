//! Nested-fragment template engine.
//!
//! The skeleton contains three repeatable regions delimited by marker
//! tokens: a feature region, a testcase region nested inside it, and a
//! subtotal region. Extraction turns the skeleton into an outer document
//! with two slots plus three fragment strings; instantiation fills a
//! fragment's placeholder tokens by literal substitution.
//!
//! Markers are found with one left-to-right scan that keeps a stack of
//! open regions, so an inner region always closes (and is recorded)
//! before the region that contains it.

use crate::error::TemplateError;

/// Marker and slot tokens understood by the engine.
pub mod tokens {
    pub const FEATURE_START: &str = "FeatureDetailsStart";
    pub const FEATURE_END: &str = "FeatureDetailsEnd";
    pub const TESTCASE_START: &str = "TcDetailsStart";
    pub const TESTCASE_END: &str = "TcDetailsEnd";
    pub const SUBTOTAL_START: &str = "SubTotalDetailsStart";
    pub const SUBTOTAL_END: &str = "SubTotalDetailsEnd";

    /// Slot left in the feature fragment where testcase rows go.
    pub const INSERT_TESTCASES: &str = "$insertTc";
    /// Slot left in the outer document where feature blocks go.
    pub const INSERT_FEATURES: &str = "$insertFeat";
    /// Slot left in the outer document where the subtotal goes.
    pub const INSERT_SUBTOTAL: &str = "$insertSub";

    /// Suffix appended to a row container token to hide it.
    pub const HIDDEN_SUFFIX: &str = " hidden";
}

/// The three repeatable regions of a skeleton.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FragmentKind {
    Feature,
    Testcase,
    Subtotal,
}

impl FragmentKind {
    const ALL: [FragmentKind; 3] = [
        FragmentKind::Feature,
        FragmentKind::Testcase,
        FragmentKind::Subtotal,
    ];

    pub fn start_marker(&self) -> &'static str {
        match self {
            FragmentKind::Feature => tokens::FEATURE_START,
            FragmentKind::Testcase => tokens::TESTCASE_START,
            FragmentKind::Subtotal => tokens::SUBTOTAL_START,
        }
    }

    pub fn end_marker(&self) -> &'static str {
        match self {
            FragmentKind::Feature => tokens::FEATURE_END,
            FragmentKind::Testcase => tokens::TESTCASE_END,
            FragmentKind::Subtotal => tokens::SUBTOTAL_END,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            FragmentKind::Feature => "feature",
            FragmentKind::Testcase => "testcase",
            FragmentKind::Subtotal => "subtotal",
        }
    }

    fn index(&self) -> usize {
        match self {
            FragmentKind::Feature => 0,
            FragmentKind::Testcase => 1,
            FragmentKind::Subtotal => 2,
        }
    }
}

/// Result of extracting a skeleton.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateFragments {
    /// Document with the feature and subtotal regions collapsed to slots.
    pub outer: String,
    /// Feature region body with its testcase region collapsed to a slot.
    pub feature: String,
    /// Testcase region body.
    pub testcase: String,
    /// Subtotal region body.
    pub subtotal: String,
}

/// Byte offsets of one complete marked region.
#[derive(Debug, Clone, Copy)]
struct Region {
    /// Start of the start marker.
    open: usize,
    /// First byte after the start marker.
    body_start: usize,
    /// First byte of the end marker.
    body_end: usize,
    /// First byte after the end marker.
    close: usize,
}

impl Region {
    fn contains(&self, other: &Region) -> bool {
        self.body_start <= other.open && other.close <= self.body_end
    }

    fn disjoint(&self, other: &Region) -> bool {
        self.close <= other.open || other.close <= self.open
    }
}

/// Extract the outer document and the three fragments from `document`.
///
/// The first complete region of each kind is used. The testcase region must
/// sit inside the feature region; the subtotal region must not overlap it.
pub fn extract(document: &str) -> Result<TemplateFragments, TemplateError> {
    let [feature, testcase, subtotal] = scan_regions(document)?;

    if !feature.contains(&testcase) {
        return Err(TemplateError::Misplaced {
            kind: FragmentKind::Testcase,
            reason: "must be nested inside the feature region",
        });
    }
    if !feature.disjoint(&subtotal) {
        return Err(TemplateError::Misplaced {
            kind: FragmentKind::Subtotal,
            reason: "must not overlap the feature region",
        });
    }

    // Innermost first: the testcase body, then the feature body with the
    // whole testcase region (markers included) collapsed to one slot.
    let testcase_body = &document[testcase.body_start..testcase.body_end];
    let mut feature_body =
        String::with_capacity(feature.body_end - feature.body_start + tokens::INSERT_TESTCASES.len());
    feature_body.push_str(&document[feature.body_start..testcase.open]);
    feature_body.push_str(tokens::INSERT_TESTCASES);
    feature_body.push_str(&document[testcase.close..feature.body_end]);

    let subtotal_body = &document[subtotal.body_start..subtotal.body_end];

    // The outer splice uses the raw feature span so the original region,
    // nested markers and all, is replaced exactly once.
    let mut slots = [
        (feature, tokens::INSERT_FEATURES),
        (subtotal, tokens::INSERT_SUBTOTAL),
    ];
    slots.sort_by_key(|(region, _)| region.open);

    let mut outer = String::with_capacity(document.len());
    let mut cursor = 0;
    for (region, slot) in slots {
        outer.push_str(&document[cursor..region.open]);
        outer.push_str(slot);
        cursor = region.close;
    }
    outer.push_str(&document[cursor..]);

    Ok(TemplateFragments {
        outer,
        feature: feature_body,
        testcase: testcase_body.to_string(),
        subtotal: subtotal_body.to_string(),
    })
}

/// Find the first complete region of every kind with a depth-aware scan.
fn scan_regions(document: &str) -> Result<[Region; 3], TemplateError> {
    let mut open: Vec<(FragmentKind, usize)> = Vec::new();
    let mut found: [Option<Region>; 3] = [None; 3];
    let mut pos = 0;

    while let Some((kind, is_start, at)) = next_marker(document, pos) {
        if is_start {
            open.push((kind, at));
            pos = at + kind.start_marker().len();
        } else {
            let marker = kind.end_marker();
            match open.pop() {
                Some((open_kind, open_at)) if open_kind == kind => {
                    let slot = &mut found[kind.index()];
                    if slot.is_none() {
                        *slot = Some(Region {
                            open: open_at,
                            body_start: open_at + kind.start_marker().len(),
                            body_end: at,
                            close: at + marker.len(),
                        });
                    }
                }
                Some((open_kind, _)) => {
                    return Err(TemplateError::Mismatched {
                        expected: open_kind.end_marker(),
                        found: marker,
                        offset: at,
                    });
                }
                None => {
                    return Err(TemplateError::UnexpectedEnd { marker, offset: at });
                }
            }
            pos = at + marker.len();
        }

        if open.is_empty() && found.iter().all(Option::is_some) {
            break;
        }
    }

    for kind in FragmentKind::ALL {
        if found[kind.index()].is_none() {
            if let Some(&(open_kind, offset)) = open.last() {
                return Err(TemplateError::Unclosed {
                    marker: open_kind.start_marker(),
                    offset,
                });
            }
            return Err(TemplateError::MissingFragment(kind));
        }
    }

    match found {
        [Some(f), Some(t), Some(s)] => Ok([f, t, s]),
        _ => Err(TemplateError::MissingFragment(FragmentKind::Feature)),
    }
}

/// Earliest marker at or after `from`: (kind, is_start, byte offset).
fn next_marker(document: &str, from: usize) -> Option<(FragmentKind, bool, usize)> {
    let haystack = &document[from..];
    FragmentKind::ALL
        .iter()
        .flat_map(|kind| {
            [
                (*kind, true, kind.start_marker()),
                (*kind, false, kind.end_marker()),
            ]
        })
        .filter_map(|(kind, is_start, marker)| {
            haystack.find(marker).map(|at| (kind, is_start, from + at))
        })
        .min_by_key(|(_, _, at)| *at)
}

/// Replace every supplied placeholder token in `fragment` with its value.
///
/// Substitution is one left-to-right pass with longest-token-first
/// matching: inserted values are not rescanned within the same call, and
/// tokens without a binding are left verbatim. Running this twice over the
/// same text would substitute token text that arrived inside values, so each
/// fragment is instantiated exactly once per assembly level.
pub fn instantiate<V: AsRef<str>>(fragment: &str, bindings: &[(&str, V)]) -> String {
    let mut ordered: Vec<(&str, &str)> = bindings
        .iter()
        .filter(|(token, _)| !token.is_empty())
        .map(|(token, value)| (*token, value.as_ref()))
        .collect();
    ordered.sort_by(|a, b| b.0.len().cmp(&a.0.len()));

    let mut leads: Vec<char> = ordered
        .iter()
        .filter_map(|(token, _)| token.chars().next())
        .collect();
    leads.sort_unstable();
    leads.dedup();

    let mut out = String::with_capacity(fragment.len());
    let mut rest = fragment;
    while !rest.is_empty() {
        let Some(candidate) = rest.find(|c: char| leads.binary_search(&c).is_ok()) else {
            out.push_str(rest);
            break;
        };
        out.push_str(&rest[..candidate]);
        rest = &rest[candidate..];

        if let Some((token, value)) = ordered.iter().find(|(token, _)| rest.starts_with(token)) {
            out.push_str(value);
            rest = &rest[token.len()..];
        } else {
            let mut chars = rest.chars();
            if let Some(c) = chars.next() {
                out.push(c);
            }
            rest = chars.as_str();
        }
    }
    out
}

/// An optional document row: a container token on the row's markup and
/// the placeholder token for the value shown in it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConditionalRow {
    pub container: &'static str,
    pub value_token: &'static str,
}

pub const ENVIRONMENT_ROW: ConditionalRow = ConditionalRow {
    container: "environmentRow",
    value_token: "$enterUrl",
};

pub const OS_BROWSER_ROW: ConditionalRow = ConditionalRow {
    container: "OsBrowserRow",
    value_token: "$enterOsBrowserName",
};

pub const EXECUTED_BY_ROW: ConditionalRow = ConditionalRow {
    container: "executedByRow",
    value_token: "$executedBy",
};

pub const TIMESTAMP_ROW: ConditionalRow = ConditionalRow {
    container: "TimeStampRow",
    value_token: "$enterTimeStamp",
};

impl ConditionalRow {
    /// Show the row with `value`, or mark its container hidden when `None`.
    ///
    /// Hidden rows keep their markup; the container token gains a
    /// `hidden` class so the stylesheet suppresses it.
    pub fn apply(&self, document: &str, value: Option<&str>) -> String {
        match value {
            Some(value) => instantiate(document, &[(self.value_token, value)]),
            None => {
                let hidden = format!("{}{}", self.container, tokens::HIDDEN_SUFFIX);
                instantiate(document, &[(self.container, hidden.as_str())])
            }
        }
    }
}

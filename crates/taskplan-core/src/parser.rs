//! Free-text to structured-steps parser.
//!
//! The generator backend returns an arbitrary blob of text with no guaranteed
//! shape. This module turns it into an ordered list of discrete step strings,
//! stripping enumeration prefixes like `1.` or `2)`. It is deliberately a
//! pure function so it can be tested independently of the backend.

use regex::Regex;
use std::sync::OnceLock;

static ENUM_MARKER_RE: OnceLock<Regex> = OnceLock::new();

/// One or more digits followed by `.` or `)` and optional whitespace.
fn enum_marker_re() -> &'static Regex {
    ENUM_MARKER_RE.get_or_init(|| Regex::new(r"^\s*\d+[.)]\s*").unwrap())
}

/// Split raw generator output into ordered, non-empty step strings.
///
/// Lines that are empty after stripping their enumeration marker are
/// discarded; relative order is preserved. Never errors — an empty result
/// means the input was unusable and the caller should fall back.
pub fn parse_steps(raw: &str) -> Vec<String> {
    raw.lines()
        .map(|line| enum_marker_re().replace(line, "").trim().to_string())
        .filter(|line| !line.is_empty())
        .collect()
}

/// Whether a raw line already carries an enumeration prefix.
///
/// Used by the revision title heuristic: a first line that is *not* numbered
/// is treated as a replacement task title rather than a step.
pub fn starts_with_marker(line: &str) -> bool {
    enum_marker_re().is_match(line)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

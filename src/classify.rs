//! Mapping decision URLs to identifiers and board names.

use percent_encoding::percent_decode_str;
use regex::Regex;
use std::sync::LazyLock;
use url::{Position, Url};

/// First path segments that introduce a board slug, e.g. `/naevn/<board>/...`
const BOARD_PREFIXES: [&str; 2] = ["naevn", "nævn"];

static SEPARATOR_RUNS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[-_]+").expect("static separator pattern"));

/// Non-empty path segments of the URL, still percent-encoded
fn path_segments(url: &Url) -> Vec<&str> {
    url.path_segments()
        .map(|segments| segments.filter(|s| !s.is_empty()).collect())
        .unwrap_or_default()
}

/// Stable identifier of a decision: the last path segment.
///
/// Query string and fragment never take part. Returns `None` when the path
/// has no segments at all.
pub fn extract_identifier(url: &Url) -> Option<String> {
    let last = *path_segments(url).last()?;
    let candidate = last.split(['?', '#']).next().unwrap_or_default();

    if candidate.is_empty() {
        None
    } else {
        Some(candidate.to_string())
    }
}

/// Human-readable name of the board that issued the decision.
///
/// Total: every URL maps to some non-empty board string. Without path
/// segments the host is the slug, and the raw host is the last resort when a
/// slug cleans to nothing.
pub fn derive_board(url: &Url) -> String {
    let segments = path_segments(url);
    let host = host_of(url);

    let slug = match segments.as_slice() {
        [first, second, ..] if is_board_prefix(first) => *second,
        [first, ..] => *first,
        [] => host.as_str(),
    };

    let cleaned = clean_slug(slug);
    if cleaned.is_empty() {
        ::log::debug!("Board slug of {} is empty, using host", url);
        host
    } else {
        cleaned
    }
}

fn is_board_prefix(segment: &str) -> bool {
    let decoded = percent_decode_str(segment).decode_utf8_lossy().to_lowercase();
    BOARD_PREFIXES.contains(&decoded.as_str())
}

/// Host and port of the URL, or the whole URL for host-less schemes
fn host_of(url: &Url) -> String {
    let host = &url[Position::BeforeHost..Position::AfterPort];
    if host.is_empty() {
        url.as_str().to_string()
    } else {
        host.to_string()
    }
}

/// Turn a URL slug such as `ankenaevnet-for-x` into `Ankenævnet For X`
pub fn clean_slug(slug: &str) -> String {
    let decoded = percent_decode_str(slug).decode_utf8_lossy();
    let spaced = SEPARATOR_RUNS.replace_all(&decoded, " ");
    let corrected = spaced.replace("Naevn", "Nævn").replace("naevn", "nævn");

    corrected
        .split_whitespace()
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Upper-case the first character, lower-case the rest
fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

use crate::config::default_decision_markers;
use regex::{Regex, RegexBuilder};

/// Decides which `urlset` entries are decision pages.
///
/// A URL qualifies when it contains at least one marker path segment
/// (case-insensitive). Everything else in a sitemap (navigation, static
/// pages) is dropped before classification.
#[derive(Debug, Clone)]
pub struct DecisionFilter {
    markers: Vec<String>,
    pattern: Option<Regex>,
}

impl Default for DecisionFilter {
    fn default() -> Self {
        Self::new(default_decision_markers()).expect("Default decision markers should be valid")
    }
}

impl DecisionFilter {
    /// Create a filter from literal path markers such as `/afgoerelse/`
    pub fn new<I, S>(markers: I) -> Result<Self, regex::Error>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let markers: Vec<String> = markers.into_iter().map(Into::into).collect();
        // No markers matches nothing
        let pattern = if markers.is_empty() {
            None
        } else {
            let alternation = markers
                .iter()
                .map(|m| regex::escape(m))
                .collect::<Vec<_>>()
                .join("|");
            Some(RegexBuilder::new(&alternation).case_insensitive(true).build()?)
        };

        Ok(Self { markers, pattern })
    }

    pub fn markers(&self) -> &[String] {
        &self.markers
    }

    /// Whether the URL looks like a decision page
    pub fn is_decision(&self, url: &str) -> bool {
        let matched = self.pattern.as_ref().is_some_and(|p| p.is_match(url));
        if !matched {
            ::log::trace!("Skipping non-decision sitemap entry: {}", url);
        }
        matched
    }
}

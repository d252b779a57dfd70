use crate::results::{ExtractedPage, PublishedAt};

/// One archived decision.
///
/// Built only for identifiers missing from the archive and written once.
#[derive(Debug, Clone, PartialEq)]
pub struct Decision {
    pub guid: String,
    pub board: String,
    pub url: String,
    pub title: String,
    pub published: Option<PublishedAt>,
    pub body: String,
}

impl Decision {
    /// Combine an extracted page with its classification.
    ///
    /// Pages without a title get `Afgørelse <guid>`.
    pub fn from_page(guid: &str, board: &str, url: &str, page: ExtractedPage) -> Self {
        Self {
            title: page.title.unwrap_or_else(|| format!("Afgørelse {}", guid)),
            guid: guid.to_string(),
            board: board.to_string(),
            url: url.to_string(),
            published: page.published,
            body: page.body,
        }
    }

    /// Render the plain-text archive document
    pub fn as_text(&self) -> String {
        let published = self
            .published
            .map(|p| p.to_string())
            .unwrap_or_else(|| "Unknown".to_string());
        let underline = "=".repeat(self.title.chars().count());

        [
            format!("GUID: {}", self.guid),
            format!("Board: {}", self.board),
            format!("Published: {}", published),
            format!("Source: {}", self.url),
            String::new(),
            self.title.clone(),
            underline,
            String::new(),
            self.body.trim().to_string(),
            String::new(),
        ]
        .join("\n")
    }
}

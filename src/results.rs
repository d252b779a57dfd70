use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime};
use std::fmt;

/// Publication timestamp as found on a decision page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublishedAt {
    /// Timestamp carrying a UTC offset
    Offset(DateTime<FixedOffset>),
    /// Timestamp without offset; date-only values sit at midnight
    Naive(NaiveDateTime),
}

impl PublishedAt {
    /// Calendar date of the timestamp, in its own offset
    pub fn date(&self) -> NaiveDate {
        match self {
            PublishedAt::Offset(dt) => dt.date_naive(),
            PublishedAt::Naive(dt) => dt.date(),
        }
    }
}

impl fmt::Display for PublishedAt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PublishedAt::Offset(dt) => write!(f, "{}", dt.format("%Y-%m-%dT%H:%M:%S%:z")),
            PublishedAt::Naive(dt) => write!(f, "{}", dt.format("%Y-%m-%dT%H:%M:%S")),
        }
    }
}

/// What the extractor pulled out of one decision page
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExtractedPage {
    /// Title of the page (if any strategy found one)
    pub title: Option<String>,

    /// Publication timestamp (if a parseable `<time>` was found)
    pub published: Option<PublishedAt>,

    /// Extracted plain text content
    pub body: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn naive_display_has_no_offset() {
        let dt = NaiveDate::from_ymd_opt(2023, 5, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        assert_eq!(PublishedAt::Naive(dt).to_string(), "2023-05-01T00:00:00");
    }

    #[test]
    fn offset_display_keeps_offset() {
        let dt = DateTime::parse_from_rfc3339("2023-05-01T10:30:00+02:00").unwrap();
        let published = PublishedAt::Offset(dt);
        assert_eq!(published.to_string(), "2023-05-01T10:30:00+02:00");
        assert_eq!(published.date(), NaiveDate::from_ymd_opt(2023, 5, 1).unwrap());
    }
}

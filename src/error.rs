use std::path::PathBuf;
use thiserror::Error;

/// Fatal errors that abort a whole synchronisation run.
#[derive(Error, Debug)]
pub enum SyncError {
    #[error("failed to fetch sitemap {url}: {source}")]
    SitemapFetch {
        url: String,
        #[source]
        source: FetchError,
    },

    #[error("malformed sitemap XML at {url}: {source}")]
    SitemapParse {
        url: String,
        #[source]
        source: roxmltree::Error,
    },

    #[error("unsupported sitemap type '{tag}' at {url}")]
    SitemapFormat { url: String, tag: String },

    #[error("archive I/O failed at {}: {source}", .path.display())]
    Archive {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl SyncError {
    pub(crate) fn archive(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        SyncError::Archive {
            path: path.into(),
            source,
        }
    }
}

/// Errors from a single HTTP GET.
///
/// For decision pages these are logged and skipped; for sitemap documents
/// they are wrapped in [`SyncError::SitemapFetch`].
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("HTTP {status} from {url}")]
    Status { url: String, status: u16 },

    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("{url} unreachable: {reason}")]
    Unreachable { url: String, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sitemap_fetch_error_names_url_and_status() {
        let err = SyncError::SitemapFetch {
            url: "https://example.dk/sitemap.xml".into(),
            source: FetchError::Status {
                url: "https://example.dk/sitemap.xml".into(),
                status: 500,
            },
        };
        let msg = err.to_string();
        assert!(msg.contains("https://example.dk/sitemap.xml"));
        assert!(msg.contains("HTTP 500"));
    }

    #[test]
    fn archive_error_shows_path() {
        let err = SyncError::archive(
            "/tmp/knowledge_archive",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(err.to_string().contains("/tmp/knowledge_archive"));
    }
}

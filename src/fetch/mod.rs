pub mod http;
pub mod mock;

pub use http::HttpFetcher;
pub use mock::MockFetcher;

use crate::error::FetchError;

/// A fetched document, whatever its status
#[derive(Debug, Clone)]
pub struct FetchResponse {
    /// URL that was requested
    pub url: String,
    /// HTTP status code
    pub status: u16,
    /// Decoded response body
    pub body: String,
}

impl FetchResponse {
    pub fn new(url: impl Into<String>, status: u16, body: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            status,
            body: body.into(),
        }
    }

    /// Statuses of 400 and above count as failures
    pub fn is_failure(&self) -> bool {
        self.status >= 400
    }

    /// Turn a failure status into [`FetchError::Status`]
    pub fn error_for_status(self) -> Result<Self, FetchError> {
        if self.is_failure() {
            Err(FetchError::Status {
                url: self.url,
                status: self.status,
            })
        } else {
            Ok(self)
        }
    }
}

/// Blocking HTTP GET.
///
/// Every sitemap and decision request of a run goes through one `Fetch`,
/// one attempt per URL.
pub trait Fetch {
    /// Fetch a URL. Transport failures are errors; HTTP failure statuses are
    /// returned as a normal response for the caller to judge.
    fn get(&self, url: &str) -> Result<FetchResponse, FetchError>;
}

impl<F: Fetch + ?Sized> Fetch for &F {
    fn get(&self, url: &str) -> Result<FetchResponse, FetchError> {
        (**self).get(url)
    }
}

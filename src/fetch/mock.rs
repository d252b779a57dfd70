//! In-memory [`Fetch`] for tests and offline runs.

use crate::error::FetchError;
use crate::fetch::{Fetch, FetchResponse};
use std::cell::RefCell;
use std::collections::HashMap;

/// Canned outcome for one URL
#[derive(Debug, Clone)]
enum Canned {
    Response { status: u16, body: String },
    Unreachable(String),
}

/// Serves canned responses by exact URL and records every request.
///
/// Unknown URLs answer 404.
///
/// ```rust
/// use afgorelse_sync::fetch::{Fetch, MockFetcher};
///
/// let mock = MockFetcher::new().with_page("https://example.dk/a", "<html></html>");
/// assert_eq!(mock.get("https://example.dk/a").unwrap().status, 200);
/// assert_eq!(mock.get("https://example.dk/b").unwrap().status, 404);
/// assert_eq!(mock.request_count(), 2);
/// ```
#[derive(Debug, Default)]
pub struct MockFetcher {
    responses: HashMap<String, Canned>,
    requests: RefCell<Vec<String>>,
}

impl MockFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `url` with a 200 and the given body
    pub fn with_page(self, url: impl Into<String>, body: impl Into<String>) -> Self {
        self.with_response(url, 200, body)
    }

    /// Answer `url` with an arbitrary status and body
    pub fn with_response(
        mut self,
        url: impl Into<String>,
        status: u16,
        body: impl Into<String>,
    ) -> Self {
        self.responses.insert(
            url.into(),
            Canned::Response {
                status,
                body: body.into(),
            },
        );
        self
    }

    /// Fail `url` at the transport level
    pub fn with_unreachable(mut self, url: impl Into<String>, reason: impl Into<String>) -> Self {
        self.responses
            .insert(url.into(), Canned::Unreachable(reason.into()));
        self
    }

    /// URLs requested so far, in order
    pub fn requests(&self) -> Vec<String> {
        self.requests.borrow().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.borrow().len()
    }

    /// How many times `url` was requested
    pub fn requests_for(&self, url: &str) -> usize {
        self.requests.borrow().iter().filter(|u| *u == url).count()
    }
}

impl Fetch for MockFetcher {
    fn get(&self, url: &str) -> Result<FetchResponse, FetchError> {
        self.requests.borrow_mut().push(url.to_string());

        match self.responses.get(url) {
            Some(Canned::Response { status, body }) => {
                Ok(FetchResponse::new(url, *status, body.clone()))
            }
            Some(Canned::Unreachable(reason)) => Err(FetchError::Unreachable {
                url: url.to_string(),
                reason: reason.clone(),
            }),
            None => Ok(FetchResponse::new(url, 404, "")),
        }
    }
}

//! Diffing the portal against the archive and downloading what is missing.

use crate::archive::{Archive, BoardDir};
use crate::classify::{derive_board, extract_identifier};
use crate::config::SyncConfig;
use crate::decision::Decision;
use crate::error::{FetchError, SyncError};
use crate::fetch::{Fetch, HttpFetcher};
use crate::filter::DecisionFilter;
use crate::parsers;
use crate::sitemap::SitemapWalker;
use indexmap::IndexMap;
use std::collections::HashMap;
use url::Url;

/// Per-board outcome of a run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BoardTally {
    /// Decisions in the archive after the run
    pub total: usize,
    /// Decisions written during the run
    pub added: usize,
}

/// Board name to tally. Unordered; use [`Summary::sorted`] for display.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Summary {
    boards: HashMap<String, BoardTally>,
}

impl Summary {
    pub fn insert(&mut self, board: impl Into<String>, tally: BoardTally) {
        self.boards.insert(board.into(), tally);
    }

    pub fn get(&self, board: &str) -> Option<BoardTally> {
        self.boards.get(board).copied()
    }

    pub fn len(&self) -> usize {
        self.boards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boards.is_empty()
    }

    /// Boards in alphabetical order
    pub fn sorted(&self) -> Vec<(&str, BoardTally)> {
        let mut rows: Vec<_> = self
            .boards
            .iter()
            .map(|(board, tally)| (board.as_str(), *tally))
            .collect();
        rows.sort_by(|a, b| a.0.cmp(b.0));
        rows
    }

    pub fn total_known(&self) -> usize {
        self.boards.values().map(|t| t.total).sum()
    }

    pub fn total_added(&self) -> usize {
        self.boards.values().map(|t| t.added).sum()
    }
}

/// A decision URL with its identifier and board
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub url: String,
    pub guid: String,
    pub board: String,
}

impl Candidate {
    /// Classify a sitemap URL; `None` when it is unparsable or has no identifier
    pub fn classify(raw: &str) -> Option<Self> {
        let parsed = match Url::parse(raw) {
            Ok(url) => url,
            Err(e) => {
                ::log::debug!("Discarding unparsable URL {}: {}", raw, e);
                return None;
            }
        };
        let Some(guid) = extract_identifier(&parsed) else {
            ::log::debug!("Discarding URL without identifier: {}", raw);
            return None;
        };

        Some(Self {
            url: raw.to_string(),
            guid,
            board: derive_board(&parsed),
        })
    }
}

/// Group candidates by board.
///
/// Boards keep first-seen order and URLs keep discovery order within a board.
pub fn group_by_board<I, S>(urls: I) -> IndexMap<String, Vec<Candidate>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut grouped: IndexMap<String, Vec<Candidate>> = IndexMap::new();
    for url in urls {
        if let Some(candidate) = Candidate::classify(url.as_ref()) {
            grouped
                .entry(candidate.board.clone())
                .or_default()
                .push(candidate);
        }
    }
    grouped
}

/// Walk the whole sitemap tree of the configuration
pub fn discover<F: Fetch + ?Sized>(
    fetcher: &F,
    config: &SyncConfig,
) -> Result<Vec<String>, SyncError> {
    let filter = DecisionFilter::new(config.decision_markers.iter().cloned())
        .map_err(|e| SyncError::Config(e.to_string()))?;

    let urls = SitemapWalker::with_filter(fetcher, config.sitemap_url.clone(), filter)
        .collect::<Result<Vec<_>, _>>()?;
    ::log::info!("Discovered {} potential decision URLs", urls.len());

    Ok(urls)
}

/// Bring the archive up to date with the portal.
///
/// Discovery runs to completion before anything is written, so a failing
/// sitemap leaves the archive untouched. Individual decision pages that fail
/// are logged and skipped; they stay unknown and are retried next run.
pub fn reconcile<F: Fetch + ?Sized>(
    fetcher: &F,
    config: &SyncConfig,
) -> Result<Summary, SyncError> {
    let archive = Archive::open(&config.archive_root)?;
    let urls = discover(fetcher, config)?;
    let grouped = group_by_board(&urls);

    let mut summary = Summary::default();
    for (board, candidates) in &grouped {
        let mut dir = archive.open_board(board)?;
        let added = reconcile_board(fetcher, &mut dir, candidates)?;
        let tally = BoardTally {
            total: dir.known_count(),
            added,
        };
        ::log::info!(
            "Board '{}': {} decisions archived ({} new)",
            board,
            tally.total,
            tally.added
        );
        summary.insert(board.clone(), tally);
    }

    Ok(summary)
}

/// Reconcile with a real HTTP client built from the configuration
pub fn sync(config: &SyncConfig) -> Result<Summary, SyncError> {
    let fetcher = HttpFetcher::new(config)?;
    reconcile(&fetcher, config)
}

fn reconcile_board<F: Fetch + ?Sized>(
    fetcher: &F,
    dir: &mut BoardDir,
    candidates: &[Candidate],
) -> Result<usize, SyncError> {
    let mut added = 0;

    for candidate in candidates {
        if dir.contains(&candidate.guid) {
            ::log::trace!("Already archived: {}", candidate.guid);
            continue;
        }

        let decision = match download_decision(fetcher, candidate) {
            Ok(decision) => decision,
            Err(e) => {
                ::log::warn!("Failed to download decision {}: {}", candidate.url, e);
                continue;
            }
        };

        if dir.store(&decision)? {
            added += 1;
        }
    }

    Ok(added)
}

/// Fetch and extract one decision page
pub fn download_decision<F: Fetch + ?Sized>(
    fetcher: &F,
    candidate: &Candidate,
) -> Result<Decision, FetchError> {
    let response = fetcher.get(&candidate.url)?.error_for_status()?;
    let page = parsers::extract(&response.body);

    Ok(Decision::from_page(
        &candidate.guid,
        &candidate.board,
        &candidate.url,
        page,
    ))
}

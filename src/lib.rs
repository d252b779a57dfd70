//! Incremental mirror of Afgørelsesportalen into a plain-text knowledge archive.
//!
//! Decisions are discovered through the portal's sitemap tree, grouped by the
//! board that issued them and written as one `.txt` file per decision. The
//! archive directory itself is the record of what has been downloaded, so a
//! rerun only fetches decisions that are not on disk yet.

// Re-export modules
pub mod archive;
pub mod classify;
pub mod config;
pub mod decision;
pub mod error;
pub mod fetch;
pub mod filter;
pub mod parsers;
pub mod reconcile;
pub mod results;
pub mod sitemap;
pub mod trigger;

// Re-export commonly used types for convenience
pub use config::SyncConfig;
pub use decision::Decision;
pub use error::{FetchError, SyncError};
pub use reconcile::{BoardTally, Summary, reconcile, sync};
pub use results::{ExtractedPage, PublishedAt};
pub use sitemap::SitemapWalker;
pub use trigger::handle_prompt;

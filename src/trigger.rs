//! Free-text entry point for prompt-driven hosts.
//!
//! A prompt asking to "hent alle afgørelser fra afgørelsesportalerne" starts a
//! synchronisation; anything else gets a short instruction back.

use crate::config::SyncConfig;
use crate::error::SyncError;
use crate::fetch::{Fetch, HttpFetcher};
use crate::reconcile::{Summary, reconcile};
use std::path::Path;

/// Tokens that must all occur in the normalized prompt
pub const TRIGGER_TOKENS: [&str; 3] = ["hent", "afgørelser", "portalerne"];

/// Reply when the prompt is not a synchronisation request
pub const INSTRUCTION_MESSAGE: &str = "Ingen synkronisering udført. Skriv 'hent alle afgørelser fra \
afgørelsesportalerne' for at opdatere vidensarkivet.";

/// Lower-case the prompt and collapse whitespace runs to single spaces
pub fn normalize_prompt(prompt: &str) -> String {
    prompt
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Whether the prompt asks for a synchronisation
pub fn matches_trigger(prompt: &str) -> bool {
    let normalized = normalize_prompt(prompt);
    TRIGGER_TOKENS.iter().all(|token| normalized.contains(token))
}

/// Handle a prompt with default settings, optionally overriding the archive
/// root and sitemap URL.
pub fn handle_prompt(prompt: &str, archive_root: Option<&Path>, sitemap_url: Option<&str>) -> String {
    handle_prompt_with_config(prompt, &prompt_config(archive_root, sitemap_url))
}

/// Default configuration with the prompt-level overrides applied
pub fn prompt_config(archive_root: Option<&Path>, sitemap_url: Option<&str>) -> SyncConfig {
    let mut config = SyncConfig::default();
    if let Some(root) = archive_root {
        config = config.with_archive_root(root);
    }
    if let Some(url) = sitemap_url {
        config = config.with_sitemap_url(url);
    }
    config
}

/// Handle a prompt against an explicit configuration
pub fn handle_prompt_with_config(prompt: &str, config: &SyncConfig) -> String {
    if !matches_trigger(prompt) {
        ::log::debug!("Prompt did not match synchronization command: {}", prompt);
        return INSTRUCTION_MESSAGE.to_string();
    }

    match HttpFetcher::new(config) {
        Ok(fetcher) => run(&fetcher, config),
        Err(e) => failure_message(&e),
    }
}

/// Handle a prompt using the given fetcher
pub fn handle_prompt_with<F: Fetch + ?Sized>(
    fetcher: &F,
    prompt: &str,
    config: &SyncConfig,
) -> String {
    if !matches_trigger(prompt) {
        ::log::debug!("Prompt did not match synchronization command: {}", prompt);
        return INSTRUCTION_MESSAGE.to_string();
    }
    run(fetcher, config)
}

fn run<F: Fetch + ?Sized>(fetcher: &F, config: &SyncConfig) -> String {
    ::log::info!("Prompt matched decision synchronization request");
    match reconcile(fetcher, config) {
        Ok(summary) => format_summary(&summary),
        Err(e) => {
            ::log::error!("Synchronization failed: {}", e);
            failure_message(&e)
        }
    }
}

fn failure_message(error: &SyncError) -> String {
    format!("Synkronisering mislykkedes: {}", error)
}

/// Human-readable report of a run, boards in alphabetical order
pub fn format_summary(summary: &Summary) -> String {
    let mut lines = vec!["Synkronisering fuldført:".to_string()];
    for (board, tally) in summary.sorted() {
        lines.push(format!(
            "- {}: {} sager i alt ({} nye)",
            board, tally.total, tally.added
        ));
    }

    lines.push(String::new());
    lines.push(format!(
        "I alt {} sager i arkivet, {} nye",
        summary.total_known(),
        summary.total_added()
    ));
    lines.join("\n")
}

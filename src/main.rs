use afgorelse_sync::error::SyncError;
use afgorelse_sync::fetch::HttpFetcher;
use afgorelse_sync::reconcile::{Candidate, discover, reconcile};
use afgorelse_sync::trigger::{format_summary, handle_prompt_with_config};
use clap::Parser;
use std::process::ExitCode;

mod args;
use args::{Args, Command};

fn main() -> ExitCode {
    // Initialize logging
    env_logger::init();

    let args = Args::parse();

    match run(args.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            ::log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(command: Command) -> Result<(), SyncError> {
    match command {
        Command::Sync(sync) => {
            let config = sync.to_config()?;
            ::log::info!(
                "Synchronizing {} into {}",
                config.sitemap_url,
                config.archive_root.display()
            );

            let start_time = std::time::Instant::now();
            let fetcher = HttpFetcher::new(&config)?;
            let summary = reconcile(&fetcher, &config)?;
            ::log::info!(
                "Synchronization complete in {:.2} seconds",
                start_time.elapsed().as_secs_f64()
            );

            println!("{}", format_summary(&summary));
        }
        Command::Prompt { text, sync } => {
            let config = sync.to_config()?;
            println!("{}", handle_prompt_with_config(&text, &config));
        }
        Command::ListUrls(sync) => {
            let config = sync.to_config()?;
            let fetcher = HttpFetcher::new(&config)?;

            for url in discover(&fetcher, &config)? {
                match Candidate::classify(&url) {
                    Some(candidate) => {
                        println!("{}\t{}\t{}", candidate.board, candidate.guid, candidate.url)
                    }
                    None => ::log::debug!("No identifier in {}", url),
                }
            }
        }
    }

    Ok(())
}

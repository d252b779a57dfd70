use afgorelse_sync::SyncConfig;
use afgorelse_sync::error::SyncError;
use clap::{Args as ClapArgs, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "afgorelse-sync")]
#[command(about = "Mirror Afgørelsesportalen decisions into a local text archive")]
#[command(version)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Download all decisions missing from the archive
    Sync(SyncArgs),

    /// Run a free-text instruction through the prompt trigger
    Prompt {
        /// Instruction text, e.g. "hent alle afgørelser fra afgørelsesportalerne"
        text: String,

        #[command(flatten)]
        sync: SyncArgs,
    },

    /// Walk the sitemap and print candidate decisions without downloading them
    ListUrls(SyncArgs),
}

#[derive(ClapArgs, Debug, Clone, Default)]
pub struct SyncArgs {
    /// JSON configuration file; flags below override its values
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Archive root directory
    #[arg(short, long)]
    pub archive_root: Option<PathBuf>,

    /// Sitemap (index or leaf) to start from
    #[arg(short, long)]
    pub sitemap_url: Option<String>,

    /// Per-request timeout in seconds
    #[arg(short, long)]
    pub timeout: Option<u64>,

    /// User-Agent header sent with every request
    #[arg(long)]
    pub user_agent: Option<String>,
}

impl SyncArgs {
    /// Build the run configuration: file (or defaults), then flag overrides
    pub fn to_config(&self) -> Result<SyncConfig, SyncError> {
        let mut config = match &self.config {
            Some(path) => SyncConfig::from_file(path)?,
            None => SyncConfig::default(),
        };

        if let Some(root) = &self.archive_root {
            config = config.with_archive_root(root);
        }
        if let Some(url) = &self.sitemap_url {
            config = config.with_sitemap_url(url);
        }
        if let Some(timeout) = self.timeout {
            config = config.with_timeout_secs(timeout);
        }
        if let Some(agent) = &self.user_agent {
            config = config.with_user_agent(agent);
        }

        Ok(config)
    }
}

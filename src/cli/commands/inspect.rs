use colored::Colorize;
use eyre::{Result, eyre};

use crate::cfg::CompleterConfig;
use crate::ports::CacheStore;

/// Query the client once and show how its vocabulary was classified
#[derive(Debug, clap::Args)]
pub struct InspectCommand {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl InspectCommand {
    pub async fn execute(&self, config: &CompleterConfig) -> Result<()> {
        let mut engine = config.build_engine()?;
        let vocabulary = engine
            .vocabulary()
            .await
            .cloned()
            .ok_or_else(|| eyre!("'{} bash-completion' produced no usable vocabulary", config.client))?;

        if self.json {
            println!("{}", serde_json::to_string_pretty(&vocabulary)?);
            return Ok(());
        }

        println!("{} ({})", "Options".bold(), vocabulary.options.len());
        for option in &vocabulary.options {
            println!("  {option}");
        }
        println!("\n{} ({})", "Flags".bold(), vocabulary.flags.len());
        for flag in &vocabulary.flags {
            println!("  {flag}");
        }

        let cache = crate::ports::GlobCacheStore::new(config.cache_dir_path()?, &config.cache_pattern);
        let files = cache.files().unwrap_or_default();
        println!("\n{} ({})", "Cache files".bold(), files.len());
        for file in &files {
            println!("  {}", file.display().to_string().dimmed());
        }
        let tokens = cache.read_tokens();
        if !tokens.is_empty() {
            println!("  {} cached value(s)", tokens.len());
        }

        Ok(())
    }
}

use eyre::Result;

use crate::cfg::CompleterConfig;
use crate::complete::CompletionRequest;

/// Print candidates for one completion event, one per line
#[derive(Debug, clap::Args)]
pub struct CompleteCommand {
    /// Index of the word being completed (COMP_CWORD)
    #[arg(long, value_name = "N")]
    pub cword: usize,

    /// The command line split into words (COMP_WORDS)
    #[arg(last = true, value_name = "WORDS")]
    pub words: Vec<String>,
}

impl CompleteCommand {
    pub fn request(&self) -> CompletionRequest {
        CompletionRequest::new(self.words.clone(), self.cword)
    }

    pub async fn execute(&self, config: &CompleterConfig) -> Result<()> {
        let mut engine = config.build_engine()?;
        for candidate in engine.complete(&self.request()).await {
            println!("{candidate}");
        }
        Ok(())
    }
}

use eyre::Result;
use tokio::io::BufReader;

use crate::cfg::CompleterConfig;
use crate::shell::serve;

/// Answer completion requests on stdin for the lifetime of a shell
#[derive(Debug, clap::Args)]
pub struct ServeCommand {}

impl ServeCommand {
    pub async fn execute(&self, config: &CompleterConfig) -> Result<()> {
        let mut engine = config.build_engine()?;
        let stdin = BufReader::new(tokio::io::stdin());
        serve(&mut engine, stdin, tokio::io::stdout()).await?;
        Ok(())
    }
}

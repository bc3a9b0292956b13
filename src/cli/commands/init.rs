use eyre::Result;

use crate::shell::BashScript;

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum Shell {
    Bash,
}

/// Print the shell glue that registers completion
#[derive(Debug, clap::Args)]
pub struct InitCommand {
    /// Target shell
    #[arg(value_enum, default_value = "bash")]
    pub shell: Shell,

    /// Command to register completion for
    #[arg(long, default_value = "magnum")]
    pub command: String,

    /// Path of this tool as the shell should invoke it
    #[arg(long)]
    pub program: Option<String>,
}

impl InitCommand {
    pub fn script(&self) -> String {
        match self.shell {
            Shell::Bash => {
                let mut script = BashScript::new(&self.command);
                if let Some(program) = &self.program {
                    script = script.with_program(program);
                }
                script.generate()
            }
        }
    }

    pub fn execute(&self) -> Result<()> {
        print!("{}", self.script());
        Ok(())
    }
}

mod check;
mod completions;
mod generate;

use check::CheckCommand;
use clap::{Parser, Subcommand};
use completions::CompletionsCommand;
use eyre::Result;
use generate::GenerateCommand;
use tracing::Level;

/// Extension trait for exiting on manifest errors with pretty formatting
pub(crate) trait UnwrapOrExit<T> {
    fn unwrap_or_exit(self) -> T;
}

impl<T> UnwrapOrExit<T> for pluginfab_manifest::Result<T> {
    fn unwrap_or_exit(self) -> T {
        match self {
            Ok(v) => v,
            Err(e) => {
                eprintln!("{:?}", miette::Report::new(*e));
                std::process::exit(1);
            }
        }
    }
}

#[derive(Parser)]
#[command(name = "pluginfab")]
#[command(version)]
#[command(about = "Generate compiler plugin factories from intrinsics.toml")]
pub(crate) struct Cli {
    /// Log generator internals to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub fn run(&self) -> Result<()> {
        self.init_tracing()?;

        match &self.command {
            Commands::Generate(cmd) => cmd.run(),
            Commands::Check(cmd) => cmd.run(),
            Commands::Completions(cmd) => cmd.run(),
        }
    }

    fn init_tracing(&self) -> Result<()> {
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(if self.verbose {
                Level::DEBUG
            } else {
                Level::WARN
            })
            .with_writer(std::io::stderr)
            .finish();

        tracing::subscriber::set_global_default(subscriber)?;
        Ok(())
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Generate plugin factories from intrinsics.toml
    Generate(GenerateCommand),

    /// Validate intrinsics.toml and list the factories it produces
    Check(CheckCommand),

    /// Generate shell completions
    Completions(CompletionsCommand),
}

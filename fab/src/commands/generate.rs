use std::path::PathBuf;

use clap::Args;
use eyre::Result;
use pluginfab_manifest::IntrinsicsToml;

use super::UnwrapOrExit;
use crate::{
    ops,
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct GenerateCommand {
    /// Path to intrinsics.toml (defaults to ./intrinsics.toml)
    #[arg(short, long, default_value = "intrinsics.toml")]
    pub config: PathBuf,

    /// Output directory (overrides `[generator] output`)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Preview generated factories without writing to disk
    #[arg(long)]
    pub dry_run: bool,
}

impl GenerateCommand {
    pub fn run(&self) -> Result<()> {
        let intrinsics_toml = IntrinsicsToml::open(&self.config).unwrap_or_exit();
        let output_dir = self
            .output
            .clone()
            .unwrap_or_else(|| intrinsics_toml.output_dir());

        let report = ops::generate(
            intrinsics_toml.manifest(),
            ops::generate::GenerateOptions {
                output_dir: &output_dir,
                dry_run: self.dry_run,
            },
        )?;

        report.render(&mut TerminalOutput::new());

        if report.has_errors() {
            std::process::exit(1);
        }
        Ok(())
    }
}

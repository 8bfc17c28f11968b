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
pub struct CheckCommand {
    /// Path to intrinsics.toml (defaults to ./intrinsics.toml)
    #[arg(short, long, default_value = "intrinsics.toml")]
    pub config: PathBuf,
}

impl CheckCommand {
    /// Run the check command
    pub fn run(&self) -> Result<()> {
        let intrinsics_toml = IntrinsicsToml::open(&self.config).unwrap_or_exit();

        let report = ops::check(intrinsics_toml.manifest(), intrinsics_toml.path())?;
        report.render(&mut TerminalOutput::new());
        Ok(())
    }
}

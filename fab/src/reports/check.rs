//! Check command report data structures.

use std::path::PathBuf;

use super::output::{Output, Report};

/// Report data from manifest validation.
#[derive(Debug)]
pub struct CheckReport {
    /// Path to the config file.
    pub config_path: PathBuf,
    /// Factories the manifest produces, in generation order.
    pub groups: Vec<FactoryGroup>,
}

/// One top-level declaration and the intrinsics it owns.
#[derive(Debug)]
pub struct FactoryGroup {
    pub declaration: String,
    pub factory: String,
    pub methods: Vec<String>,
}

impl Report for CheckReport {
    fn render(&self, out: &mut dyn Output) {
        out.preformatted(&format!("✓ {} is valid", self.config_path.display()));
        out.newline();

        let count = self.groups.len();
        out.section(&format!(
            "{} factor{}",
            count,
            if count == 1 { "y" } else { "ies" }
        ));
        for group in &self.groups {
            out.key_value(&group.declaration, &group.factory);
            for method in &group.methods {
                out.list_item(method);
            }
        }
    }
}

//! Generate command report data structures.

use std::path::PathBuf;

use super::output::{Output, Report};

/// Report data from factory generation.
#[derive(Debug)]
pub struct GenerateReport {
    /// Number of intrinsics in the manifest.
    pub intrinsic_count: usize,

    /// Number of factories attempted, one per top-level declaration.
    pub factory_count: usize,

    /// Rendered error diagnostics, one per failed factory.
    pub errors: Vec<String>,

    /// Generation result (files written or preview).
    pub result: GenerationResult,
}

impl GenerateReport {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// Result of factory generation.
#[derive(Debug)]
pub enum GenerationResult {
    /// Files were written to disk.
    Written(WrittenResult),
    /// Dry-run preview.
    Preview(PreviewResult),
}

/// Result when files were written to disk.
#[derive(Debug)]
pub struct WrittenResult {
    /// Output directory.
    pub output_dir: PathBuf,
    /// Written files, relative to the output directory.
    pub files: Vec<String>,
}

/// Result of a dry-run preview.
#[derive(Debug)]
pub struct PreviewResult {
    /// Files that would be generated.
    pub files: Vec<PreviewFile>,
}

/// A file in preview mode.
#[derive(Debug)]
pub struct PreviewFile {
    /// Path relative to the output directory.
    pub path: String,
    /// File content.
    pub content: String,
}

impl Report for GenerateReport {
    fn render(&self, out: &mut dyn Output) {
        match &self.result {
            GenerationResult::Written(written) => self.render_written(out, written),
            GenerationResult::Preview(preview) => self.render_preview(out, preview),
        }
        self.render_errors(out);
    }
}

impl GenerateReport {
    fn render_written(&self, out: &mut dyn Output, written: &WrittenResult) {
        out.section(&format!(
            "Factories ({} of {}, {} intrinsics)",
            written.files.len(),
            self.factory_count,
            self.intrinsic_count
        ));
        for file in &written.files {
            out.added_item(file);
        }
        out.newline();
        out.key_value("Generated", &written.output_dir.display().to_string());
    }

    fn render_preview(&self, out: &mut dyn Output, preview: &PreviewResult) {
        for file in &preview.files {
            out.divider(&file.path);
            out.preformatted(&file.content);
        }

        out.divider("Summary");
        out.preformatted(&format!(
            "{} factories would be generated",
            preview.files.len()
        ));
    }

    fn render_errors(&self, out: &mut dyn Output) {
        if self.errors.is_empty() {
            return;
        }
        out.newline();
        for error in &self.errors {
            out.error(error);
        }
    }
}

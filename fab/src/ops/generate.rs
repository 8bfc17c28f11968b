//! Generate operation - plugin factories from a manifest.

use std::path::Path;

use eyre::{Context, Result};
use pluginfab_codegen::{DescriptorRegistry, Diagnostics, FactoryEmitter, lower};
use pluginfab_core::{FsFiler, MemoryFiler};
use pluginfab_manifest::Manifest;

use crate::reports::{GenerateReport, GenerationResult, PreviewFile, PreviewResult, WrittenResult};

/// Options for the generate operation.
pub struct GenerateOptions<'a> {
    /// Directory factories are written under.
    pub output_dir: &'a Path,
    /// Whether to preview without writing files.
    pub dry_run: bool,
}

/// Execute the generate operation.
///
/// Every declaration group is attempted; failures end up in the report's
/// errors rather than aborting the run.
pub fn generate(manifest: &Manifest, opts: GenerateOptions) -> Result<GenerateReport> {
    let lowered = lower(manifest).wrap_err("Failed to lower manifest")?;

    let mut registry = DescriptorRegistry::new(&lowered.symbols);
    registry.add_all(lowered.descriptors);

    let emitter = FactoryEmitter::new(manifest.factory.clone());
    let extension = &manifest.factory.extension;
    let mut diagnostics = Diagnostics::new();

    let result = if opts.dry_run {
        let mut filer = MemoryFiler::new();
        emitter.generate_all(&registry, &mut filer, &mut diagnostics);

        let files = filer
            .into_files()
            .into_iter()
            .map(|(name, content)| PreviewFile {
                path: name.relative_path(extension).display().to_string(),
                content,
            })
            .collect();
        GenerationResult::Preview(PreviewResult { files })
    } else {
        let mut filer = FsFiler::new(opts.output_dir, extension.as_str());
        let summary = emitter.generate_all(&registry, &mut filer, &mut diagnostics);

        GenerationResult::Written(WrittenResult {
            output_dir: opts.output_dir.to_path_buf(),
            files: summary
                .written
                .iter()
                .map(|name| name.relative_path(extension).display().to_string())
                .collect(),
        })
    };

    Ok(GenerateReport {
        intrinsic_count: registry.descriptor_count(),
        factory_count: registry.len(),
        errors: diagnostics.errors().map(ToString::to_string).collect(),
        result,
    })
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use tempfile::TempDir;

    use super::*;

    const MANIFEST: &str = r#"
[[intrinsic]]
kind = "fold"
namespace = "com.example"
owner = "MathUtil"
method = "max"
params = ["int", "int"]
returns = "int"

[[intrinsic]]
kind = "node-intrinsic"
namespace = "com.example.nodes"
owner = "Nodes"
method = "add"
params = ["int", "int"]
returns = "int"
node = "AddNode"
"#;

    #[test]
    fn test_generate_writes_factories() {
        let temp = TempDir::new().unwrap();
        let manifest = Manifest::from_str(MANIFEST).unwrap();

        let report = generate(
            &manifest,
            GenerateOptions {
                output_dir: temp.path(),
                dry_run: false,
            },
        )
        .unwrap();

        assert!(!report.has_errors());
        assert_eq!(report.factory_count, 2);
        assert_eq!(report.intrinsic_count, 2);
        assert!(
            temp.path()
                .join("com/example/PluginFactory_MathUtil.java")
                .exists()
        );
        assert!(
            temp.path()
                .join("com/example/nodes/PluginFactory_Nodes.java")
                .exists()
        );
    }

    #[test]
    fn test_dry_run_writes_nothing() {
        let temp = TempDir::new().unwrap();
        let output_dir = temp.path().join("generated");
        let manifest = Manifest::from_str(MANIFEST).unwrap();

        let report = generate(
            &manifest,
            GenerateOptions {
                output_dir: &output_dir,
                dry_run: true,
            },
        )
        .unwrap();

        assert!(!output_dir.exists());
        let GenerationResult::Preview(preview) = report.result else {
            panic!("expected a preview");
        };
        let paths: Vec<&str> = preview.files.iter().map(|f| f.path.as_str()).collect();
        assert_eq!(
            paths,
            [
                "com/example/PluginFactory_MathUtil.java",
                "com/example/nodes/PluginFactory_Nodes.java"
            ]
        );
    }

    #[test]
    fn test_unwritable_output_is_reported() {
        let temp = TempDir::new().unwrap();
        // A file where the namespace directory should go.
        std::fs::write(temp.path().join("com"), "").unwrap();
        let manifest = Manifest::from_str(MANIFEST).unwrap();

        let report = generate(
            &manifest,
            GenerateOptions {
                output_dir: temp.path(),
                dry_run: false,
            },
        )
        .unwrap();

        assert!(report.has_errors());
        assert_eq!(report.errors.len(), 2);
        assert!(report.errors[0].contains("(at com.example.MathUtil)"));
    }
}

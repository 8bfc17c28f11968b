//! Check operation - manifest validation and grouping overview.

use std::path::Path;

use eyre::{Context, Result};
use pluginfab_codegen::{DescriptorRegistry, FactoryEmitter, PluginDescriptor, lower};
use pluginfab_core::SymbolModel;
use pluginfab_manifest::Manifest;

use crate::reports::{CheckReport, FactoryGroup};

/// Execute the check operation.
///
/// The manifest has already been parsed and validated; this lowers it and
/// reports which factory each intrinsic would land in.
pub fn check(manifest: &Manifest, config_path: &Path) -> Result<CheckReport> {
    let lowered = lower(manifest).wrap_err("Validation failed")?;
    let symbols = &lowered.symbols;

    let mut registry = DescriptorRegistry::new(symbols);
    registry.add_all(lowered.descriptors);

    let emitter = FactoryEmitter::new(manifest.factory.clone());
    let groups = registry
        .groups()
        .map(|(declaration, group)| FactoryGroup {
            declaration: symbols.qualified_name(declaration),
            factory: emitter.source_name(symbols, declaration).qualified(),
            methods: group
                .iter()
                .map(|d| symbols.qualified_name(d.source_element()))
                .collect(),
        })
        .collect();

    Ok(CheckReport {
        config_path: config_path.to_path_buf(),
        groups,
    })
}

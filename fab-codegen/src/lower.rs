//! Lowering of a parsed manifest into symbols and descriptors.

use eyre::{OptionExt, Result, WrapErr};
use pluginfab_core::SymbolTable;
use pluginfab_manifest::{Intrinsic, IntrinsicKind, Manifest};

use crate::{
    PluginDescriptor,
    strategies::{FoldPlugin, MethodSignature, NodeIntrinsicPlugin},
};

/// Symbols declared by a manifest and one descriptor per intrinsic.
///
/// Descriptors are in manifest order and point into `symbols`.
pub struct Lowered {
    pub symbols: SymbolTable,
    pub descriptors: Vec<Box<dyn PluginDescriptor>>,
}

/// Declare every intrinsic's method in a fresh symbol table and build its
/// descriptor.
pub fn lower(manifest: &Manifest) -> Result<Lowered> {
    let mut symbols = SymbolTable::new();
    let mut descriptors = Vec::with_capacity(manifest.intrinsics.len());

    for (i, intrinsic) in manifest.intrinsics.iter().enumerate() {
        let descriptor = lower_intrinsic(&mut symbols, intrinsic)
            .wrap_err_with(|| format!("intrinsic[{}] {}", i, intrinsic.signature()))?;
        descriptors.push(descriptor);
    }

    tracing::debug!(
        intrinsics = descriptors.len(),
        elements = symbols.len(),
        "lowered manifest"
    );
    Ok(Lowered {
        symbols,
        descriptors,
    })
}

fn lower_intrinsic(
    symbols: &mut SymbolTable,
    intrinsic: &Intrinsic,
) -> Result<Box<dyn PluginDescriptor>> {
    let namespace = symbols.namespace(&intrinsic.namespace);
    let owner = symbols.declare_type_path(namespace, &intrinsic.owner);
    let element = symbols.declare_method(owner, &intrinsic.method);

    let signature = MethodSignature {
        namespace: intrinsic.namespace.clone(),
        owner: intrinsic.owner.clone(),
        method: intrinsic.method.clone(),
        params: intrinsic.params.clone(),
        returns: intrinsic.returns.clone(),
    };
    let imports = intrinsic.imports.iter().cloned();

    tracing::debug!(kind = %intrinsic.kind, element = %element, "lowering {}", intrinsic.signature());
    Ok(match intrinsic.kind {
        IntrinsicKind::NodeIntrinsic => {
            let node = intrinsic
                .node
                .as_deref()
                .ok_or_eyre("node intrinsic does not name a node class")?;
            Box::new(NodeIntrinsicPlugin::new(element, signature, node).with_imports(imports))
        }
        IntrinsicKind::Fold => Box::new(FoldPlugin::new(element, signature)?.with_imports(imports)),
    })
}

//! Grouping of descriptors by owning top-level declaration.

use indexmap::IndexMap;
use pluginfab_core::{ElementId, SymbolModel, top_level_declaration};

use crate::PluginDescriptor;

/// Append-only multimap from top-level declaration to its descriptors.
///
/// Each group keeps descriptors in insertion order, which is the order they
/// are emitted in. Groups themselves iterate in the order their first
/// descriptor was added.
///
/// # Example
///
/// ```ignore
/// let mut registry = DescriptorRegistry::new(&symbols);
/// registry.add(Box::new(NodeIntrinsicPlugin::new(...)));
/// registry.add(Box::new(FoldPlugin::new(...)));
///
/// FactoryEmitter::new(config).generate_all(&registry, &mut filer, &mut diagnostics);
/// ```
pub struct DescriptorRegistry<'s, S: SymbolModel + ?Sized> {
    symbols: &'s S,
    groups: IndexMap<ElementId, Vec<Box<dyn PluginDescriptor>>>,
}

impl<'s, S: SymbolModel + ?Sized> DescriptorRegistry<'s, S> {
    /// Create an empty registry resolving owners through `symbols`.
    pub fn new(symbols: &'s S) -> Self {
        Self {
            symbols,
            groups: IndexMap::new(),
        }
    }

    /// Append a descriptor to the group of its owning declaration.
    pub fn add(&mut self, descriptor: Box<dyn PluginDescriptor>) {
        let owner = top_level_declaration(self.symbols, descriptor.source_element());
        tracing::debug!(
            owner = %self.symbols.qualified_name(owner),
            element = %descriptor.source_element(),
            "registered plugin descriptor"
        );
        self.groups.entry(owner).or_default().push(descriptor);
    }

    /// Add every descriptor from `descriptors`, in order.
    pub fn add_all(&mut self, descriptors: impl IntoIterator<Item = Box<dyn PluginDescriptor>>) {
        for descriptor in descriptors {
            self.add(descriptor);
        }
    }

    /// All (declaration, group) pairs.
    pub fn groups(&self) -> impl Iterator<Item = (ElementId, &[Box<dyn PluginDescriptor>])> {
        self.groups.iter().map(|(k, v)| (*k, v.as_slice()))
    }

    /// The group owned by `declaration`, if any descriptor belongs to it.
    pub fn group(&self, declaration: ElementId) -> Option<&[Box<dyn PluginDescriptor>]> {
        self.groups.get(&declaration).map(Vec::as_slice)
    }

    pub fn symbols(&self) -> &'s S {
        self.symbols
    }

    /// Number of groups.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Number of descriptors across all groups.
    pub fn descriptor_count(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }
}

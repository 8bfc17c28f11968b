//! Import collection and deduplication.

use std::collections::BTreeSet;

/// De-duplicated set of fully qualified import identifiers.
///
/// Iterates in sorted order so emitted import blocks are stable across runs
/// no matter which descriptor contributed an import first.
///
/// # Example
///
/// ```
/// use pluginfab_codegen::ImportSet;
///
/// let mut imports = ImportSet::new();
/// imports.add("jdk.vm.ci.meta.JavaKind");
/// imports.add("com.example.AddNode");
/// imports.add("jdk.vm.ci.meta.JavaKind");
///
/// let lines: Vec<&str> = imports.iter().collect();
/// assert_eq!(lines, ["com.example.AddNode", "jdk.vm.ci.meta.JavaKind"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportSet {
    imports: BTreeSet<String>,
}

impl ImportSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an import. Returns false if it was already present.
    pub fn add(&mut self, import: impl Into<String>) -> bool {
        self.imports.insert(import.into())
    }

    /// Merge another set into this one.
    pub fn merge(&mut self, other: &ImportSet) {
        self.imports.extend(other.imports.iter().cloned());
    }

    pub fn contains(&self, import: &str) -> bool {
        self.imports.contains(import)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.imports.iter().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.imports.is_empty()
    }

    pub fn len(&self) -> usize {
        self.imports.len()
    }
}

impl<S: Into<String>> Extend<S> for ImportSet {
    fn extend<T: IntoIterator<Item = S>>(&mut self, iter: T) {
        for import in iter {
            self.add(import);
        }
    }
}

impl<S: Into<String>> FromIterator<S> for ImportSet {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

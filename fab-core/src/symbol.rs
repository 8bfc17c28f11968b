//! Symbol model used to attribute descriptors to their owning declaration.

use std::{collections::HashMap, fmt};

/// Opaque identity of an element in a [`SymbolModel`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(u32);

impl ElementId {
    /// Create an id from a raw index.
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// Get the raw index.
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Kind of program element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    /// A namespace (package). Never the owner of a descriptor.
    Namespace,
    /// A type declaration, top-level or nested.
    Type,
    /// A method declared in a type.
    Method,
}

impl ElementKind {
    pub fn is_namespace(&self) -> bool {
        matches!(self, ElementKind::Namespace)
    }
}

/// Read access to a symbol model.
///
/// Implementors only need to answer parent, kind and name lookups; every
/// walk over the model is expressed in terms of these.
pub trait SymbolModel {
    /// The lexically enclosing element, if any.
    fn enclosing(&self, id: ElementId) -> Option<ElementId>;

    /// The kind of the element.
    fn kind(&self, id: ElementId) -> ElementKind;

    /// The simple name of the element. For namespaces this is the full
    /// dotted name.
    fn simple_name(&self, id: ElementId) -> &str;

    /// The dotted qualified name of the element.
    fn qualified_name(&self, id: ElementId) -> String {
        let name = self.simple_name(id);
        if self.kind(id).is_namespace() {
            return name.to_string();
        }
        match self.enclosing(id) {
            Some(parent) => {
                let prefix = self.qualified_name(parent);
                if prefix.is_empty() {
                    name.to_string()
                } else {
                    format!("{}.{}", prefix, name)
                }
            }
            None => name.to_string(),
        }
    }
}

/// Find the top-level declaration that lexically contains `element`.
///
/// Walks the enclosing chain until the next element is a namespace or there
/// is none. An element without any enclosing element is its own top level.
pub fn top_level_declaration<S: SymbolModel + ?Sized>(symbols: &S, element: ElementId) -> ElementId {
    let mut current = element;
    while let Some(parent) = symbols.enclosing(current) {
        if symbols.kind(parent).is_namespace() {
            break;
        }
        current = parent;
    }
    current
}

/// The namespace directly enclosing `declaration`, if it has one.
pub fn enclosing_namespace<S: SymbolModel + ?Sized>(
    symbols: &S,
    declaration: ElementId,
) -> Option<ElementId> {
    symbols
        .enclosing(declaration)
        .filter(|parent| symbols.kind(*parent).is_namespace())
}

#[derive(Debug, Clone)]
struct Element {
    kind: ElementKind,
    name: String,
    enclosing: Option<ElementId>,
}

/// In-memory [`SymbolModel`].
///
/// Namespaces and types are interned by `(enclosing, name)`, so declaring the
/// same type twice yields the same id. Methods are always fresh
/// elements so overloads stay distinct.
///
/// # Example
///
/// ```
/// use pluginfab_core::{SymbolTable, SymbolModel, top_level_declaration};
///
/// let mut symbols = SymbolTable::new();
/// let pkg = symbols.namespace("com.example");
/// let outer = symbols.declare_type(pkg, "Outer");
/// let inner = symbols.declare_type(outer, "Inner");
/// let method = symbols.declare_method(inner, "add");
///
/// assert_eq!(top_level_declaration(&symbols, method), outer);
/// assert_eq!(symbols.qualified_name(method), "com.example.Outer.Inner.add");
/// ```
#[derive(Debug, Clone, Default)]
pub struct SymbolTable {
    elements: Vec<Element>,
    interned: HashMap<(Option<ElementId>, ElementKind, String), ElementId>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare (or look up) a namespace by its dotted name.
    ///
    /// The empty string is the unnamed namespace.
    pub fn namespace(&mut self, name: &str) -> ElementId {
        self.intern(ElementKind::Namespace, name, None)
    }

    /// Declare (or look up) a type inside `enclosing`.
    pub fn declare_type(&mut self, enclosing: ElementId, name: &str) -> ElementId {
        self.intern(ElementKind::Type, name, Some(enclosing))
    }

    /// Declare a top-level type with no enclosing element at all.
    pub fn declare_root_type(&mut self, name: &str) -> ElementId {
        self.intern(ElementKind::Type, name, None)
    }

    /// Declare a nested type path such as `Outer.Inner` inside `namespace`.
    ///
    /// Returns the innermost type.
    pub fn declare_type_path(&mut self, namespace: ElementId, path: &str) -> ElementId {
        path.split('.')
            .fold(namespace, |parent, segment| self.declare_type(parent, segment))
    }

    /// Declare a method inside `enclosing`.
    pub fn declare_method(&mut self, enclosing: ElementId, name: &str) -> ElementId {
        self.push(ElementKind::Method, name, Some(enclosing))
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    fn intern(&mut self, kind: ElementKind, name: &str, enclosing: Option<ElementId>) -> ElementId {
        let key = (enclosing, kind, name.to_string());
        if let Some(id) = self.interned.get(&key) {
            return *id;
        }
        let id = self.push(kind, name, enclosing);
        self.interned.insert(key, id);
        id
    }

    fn push(&mut self, kind: ElementKind, name: &str, enclosing: Option<ElementId>) -> ElementId {
        let id = ElementId::new(self.elements.len() as u32);
        self.elements.push(Element {
            kind,
            name: name.to_string(),
            enclosing,
        });
        id
    }

    fn element(&self, id: ElementId) -> &Element {
        &self.elements[id.index()]
    }
}

impl SymbolModel for SymbolTable {
    fn enclosing(&self, id: ElementId) -> Option<ElementId> {
        self.element(id).enclosing
    }

    fn kind(&self, id: ElementId) -> ElementKind {
        self.element(id).kind
    }

    fn simple_name(&self, id: ElementId) -> &str {
        &self.element(id).name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_top_level_of_method() {
        let mut symbols = SymbolTable::new();
        let pkg = symbols.namespace("com.example");
        let top = symbols.declare_type(pkg, "TopA");
        let method = symbols.declare_method(top, "run");

        assert_eq!(top_level_declaration(&symbols, method), top);
    }

    #[test]
    fn test_top_level_three_levels_deep() {
        let mut symbols = SymbolTable::new();
        let pkg = symbols.namespace("com.example");
        let top = symbols.declare_type(pkg, "Top");
        let inner = symbols.declare_type(top, "Inner");
        let innermost = symbols.declare_type(inner, "Innermost");
        let method = symbols.declare_method(innermost, "fold");

        assert_eq!(top_level_declaration(&symbols, method), top);
        assert_eq!(top_level_declaration(&symbols, innermost), top);
    }

    #[test]
    fn test_top_level_without_enclosing_is_itself() {
        let mut symbols = SymbolTable::new();
        let root = symbols.declare_root_type("Orphan");

        assert_eq!(top_level_declaration(&symbols, root), root);
        assert_eq!(enclosing_namespace(&symbols, root), None);
    }

    #[test]
    fn test_top_level_of_top_level_is_itself() {
        let mut symbols = SymbolTable::new();
        let pkg = symbols.namespace("com.example");
        let top = symbols.declare_type(pkg, "TopA");

        assert_eq!(top_level_declaration(&symbols, top), top);
        assert_eq!(enclosing_namespace(&symbols, top), Some(pkg));
    }

    #[test]
    fn test_types_are_interned() {
        let mut symbols = SymbolTable::new();
        let pkg = symbols.namespace("com.example");
        let a = symbols.declare_type_path(pkg, "Outer.Inner");
        let b = symbols.declare_type_path(pkg, "Outer.Inner");
        let other_pkg = symbols.namespace("org.example");
        let c = symbols.declare_type_path(other_pkg, "Outer.Inner");

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(symbols.namespace("com.example"), pkg);
    }

    #[test]
    fn test_methods_are_not_interned() {
        let mut symbols = SymbolTable::new();
        let pkg = symbols.namespace("com.example");
        let top = symbols.declare_type(pkg, "Math");

        let first = symbols.declare_method(top, "max");
        let second = symbols.declare_method(top, "max");
        assert_ne!(first, second);
    }

    #[test]
    fn test_qualified_names() {
        let mut symbols = SymbolTable::new();
        let pkg = symbols.namespace("com.example");
        let inner = symbols.declare_type_path(pkg, "Outer.Inner");
        let method = symbols.declare_method(inner, "count");

        assert_eq!(symbols.qualified_name(pkg), "com.example");
        assert_eq!(symbols.qualified_name(inner), "com.example.Outer.Inner");
        assert_eq!(symbols.qualified_name(method), "com.example.Outer.Inner.count");
    }

    #[test]
    fn test_qualified_name_in_unnamed_namespace() {
        let mut symbols = SymbolTable::new();
        let unnamed = symbols.namespace("");
        let top = symbols.declare_type(unnamed, "Top");

        assert_eq!(symbols.qualified_name(top), "Top");
    }
}

//! Core types for the pluginfab factory generator.
//!
//! This crate provides the symbol model that descriptors point into, the
//! output artifact abstraction generated factories are written through, and
//! the configuration shared by every generated factory.

mod config;
mod file;
mod symbol;

// Factory configuration
pub use config::FactoryConfig;
// Output artifacts
pub use file::{Filer, FsFiler, MemoryFiler, SourceName};
// Symbol model
pub use symbol::{
    ElementId, ElementKind, SymbolModel, SymbolTable, enclosing_namespace, top_level_declaration,
};

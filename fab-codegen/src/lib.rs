//! Plugin factory generation.
//!
//! Descriptors are collected into a [`DescriptorRegistry`] keyed by the
//! top-level declaration that contains them, then the [`FactoryEmitter`]
//! writes one factory source per declaration.
//!
//! # Module Organization
//!
//! - [`builder`] - Indented Java source building
//! - [`descriptor`] - The per-descriptor generation strategy trait
//! - [`registry`] - Grouping of descriptors by owning declaration
//! - [`factory`] - Factory file emission
//! - [`diagnostic`] - Diagnostics reported while emitting
//! - [`strategies`] - Built-in descriptor strategies
//! - [`lower`] - Manifest to symbols and descriptors

pub mod builder;
pub mod descriptor;
pub mod diagnostic;
pub mod factory;
pub mod imports;
pub mod lower;
pub mod registry;
pub mod strategies;

pub use builder::CodeBuilder;
pub use descriptor::PluginDescriptor;
pub use diagnostic::{Diagnostic, Diagnostics, Messager, Severity};
pub use factory::{FactoryEmitter, GenerateSummary};
pub use imports::ImportSet;
pub use lower::{Lowered, lower};
pub use registry::DescriptorRegistry;

//! Parsing and validation of `intrinsics.toml`.
//!
//! The manifest stands in for an annotation scanner: each `[[intrinsic]]`
//! entry describes one substitution rule and where it is declared.

// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

mod error;
mod manifest;
mod types;
mod validate;

pub use error::{Error, Result, SourceContext};
pub use manifest::{GeneratorConfig, Intrinsic, IntrinsicKind, IntrinsicsToml, Manifest};
pub use types::PrimitiveType;
pub use validate::ParseContext;

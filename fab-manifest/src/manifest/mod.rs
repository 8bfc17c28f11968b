//! Manifest types and parsing for intrinsics.toml files.

mod file;
mod parse;

use std::path::PathBuf;

pub use file::IntrinsicsToml;
use pluginfab_core::FactoryConfig;
use serde::Deserialize;

/// Root manifest for intrinsics.toml
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    /// Generator settings
    #[serde(default)]
    pub generator: GeneratorConfig,

    /// Overrides for the fixed parts of every factory
    #[serde(default)]
    pub factory: FactoryConfig,

    /// Intrinsic substitution rules, one per annotated method
    #[serde(default, rename = "intrinsic")]
    pub intrinsics: Vec<Intrinsic>,
}

/// `[generator]` table.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GeneratorConfig {
    /// Directory generated sources are written under
    #[serde(default = "default_output")]
    pub output: PathBuf,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            output: default_output(),
        }
    }
}

fn default_output() -> PathBuf {
    PathBuf::from("generated")
}

/// Shape of the plugin generated for an intrinsic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IntrinsicKind {
    /// Replace the call with a freshly constructed graph node
    NodeIntrinsic,
    /// Evaluate the call at compile time when all arguments are constant
    Fold,
}

impl IntrinsicKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            IntrinsicKind::NodeIntrinsic => "node-intrinsic",
            IntrinsicKind::Fold => "fold",
        }
    }
}

impl std::fmt::Display for IntrinsicKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One `[[intrinsic]]` entry.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Intrinsic {
    pub kind: IntrinsicKind,

    /// Dotted namespace of the owner; empty for the unnamed namespace
    #[serde(default)]
    pub namespace: String,

    /// Declaring type path within the namespace, e.g. `Outer.Inner`
    pub owner: String,

    /// Name of the intrinsified method
    pub method: String,

    /// Parameter types
    #[serde(default)]
    pub params: Vec<String>,

    /// Return type
    #[serde(default = "default_returns")]
    pub returns: String,

    /// Node class constructed by a node intrinsic
    pub node: Option<String>,

    /// Additional imports the generated plugin needs
    #[serde(default)]
    pub imports: Vec<String>,
}

fn default_returns() -> String {
    "void".to_string()
}

impl Intrinsic {
    /// Human-readable `Owner.method(params)` label.
    pub fn signature(&self) -> String {
        format!("{}.{}({})", self.owner, self.method, self.params.join(","))
    }

    pub fn returns_void(&self) -> bool {
        self.returns == "void"
    }
}

//! Manifest parsing from files and strings.

use std::{path::Path, str::FromStr};

use super::{Intrinsic, IntrinsicKind, Manifest};
use crate::{Error, PrimitiveType, Result, error::SourceContext, validate::ParseContext};

const DEFAULT_FILENAME: &str = "intrinsics.toml";

impl FromStr for Manifest {
    type Err = Box<Error>;

    fn from_str(s: &str) -> Result<Self> {
        parse_manifest(s, DEFAULT_FILENAME)
    }
}

impl Manifest {
    /// Parse an intrinsics.toml file from the given path.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            Box::new(Error::Io {
                path: path.to_path_buf(),
                source: e,
            })
        })?;
        parse_manifest(&content, &path.display().to_string())
    }

    /// Parse from a string with a custom filename for error reporting.
    pub fn from_str_with_filename(content: &str, filename: &str) -> Result<Self> {
        parse_manifest(content, filename)
    }
}

/// Parse a manifest from content with the given filename for error reporting.
pub fn parse_manifest(content: &str, filename: &str) -> Result<Manifest> {
    let source_ctx = SourceContext::new(content, filename);
    let manifest: Manifest = toml::from_str(content).map_err(|e| source_ctx.parse_error(e))?;
    validate_manifest(&manifest, content, filename)?;
    Ok(manifest)
}

fn validate_manifest(manifest: &Manifest, src: &str, filename: &str) -> Result<()> {
    let ctx = ParseContext::new(src, filename);

    for (index, intrinsic) in manifest.intrinsics.iter().enumerate() {
        validate_intrinsic(intrinsic, &ctx.push(format!("intrinsic[{}]", index)))?;
    }
    Ok(())
}

fn validate_intrinsic(intrinsic: &Intrinsic, ctx: &ParseContext) -> Result<()> {
    if !intrinsic.namespace.is_empty() {
        ctx.validate_dotted(&intrinsic.namespace, "namespace", "namespace")?;
    }
    ctx.validate_dotted(&intrinsic.owner, "owner type", "owner")?;
    ctx.validate_name(&intrinsic.method, "method name", "method")?;

    for param in &intrinsic.params {
        ctx.validate_type(param, "parameter type", "params")?;
    }
    ctx.validate_return_type(&intrinsic.returns, "returns")?;

    for import in &intrinsic.imports {
        let base = import.strip_suffix(".*").unwrap_or(import);
        ctx.validate_dotted(base, "import", "imports")?;
    }

    match intrinsic.kind {
        IntrinsicKind::NodeIntrinsic => {
            let Some(node) = &intrinsic.node else {
                return Err(ctx.error_at(
                    format!(
                        "node intrinsic {} is missing its `node` class",
                        intrinsic.signature()
                    ),
                    "method",
                    &intrinsic.method,
                ));
            };
            ctx.validate_dotted(node, "node class", "node")?;
        }
        IntrinsicKind::Fold => {
            if let Some(node) = &intrinsic.node {
                return Err(ctx.error_at(
                    "fold intrinsics do not construct a node; remove `node`",
                    "node",
                    node,
                ));
            }
            for param in &intrinsic.params {
                if param.parse::<PrimitiveType>().is_err() {
                    return Err(ctx.source_context().invalid_fold_type_error(
                        param,
                        ctx.context_for("parameter"),
                        ctx.find_span("params", param),
                    ));
                }
            }
            if intrinsic.returns.parse::<PrimitiveType>().is_err() {
                return Err(ctx.source_context().invalid_fold_type_error(
                    &intrinsic.returns,
                    ctx.context_for("return type"),
                    ctx.find_span("returns", &intrinsic.returns),
                ));
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID: &str = r#"
[generator]
output = "out/java"

[[intrinsic]]
kind = "node-intrinsic"
namespace = "com.example.nodes"
owner = "MathNodes.Inner"
method = "add"
params = ["int", "int"]
returns = "int"
node = "com.example.nodes.AddNode"

[[intrinsic]]
kind = "fold"
namespace = "com.example"
owner = "MathUtil"
method = "max"
params = ["long", "long"]
returns = "long"
imports = ["java.util.Objects"]
"#;

    #[test]
    fn test_parse_valid_manifest() {
        let manifest = Manifest::from_str(VALID).unwrap();

        assert_eq!(manifest.generator.output, Path::new("out/java"));
        assert_eq!(manifest.intrinsics.len(), 2);
        assert_eq!(manifest.intrinsics[0].kind, IntrinsicKind::NodeIntrinsic);
        assert_eq!(manifest.intrinsics[1].imports, vec!["java.util.Objects"]);
    }

    #[test]
    fn test_defaults() {
        let manifest = Manifest::from_str(
            r#"
[[intrinsic]]
kind = "node-intrinsic"
owner = "Top"
method = "barrier"
node = "BarrierNode"
"#,
        )
        .unwrap();

        let intrinsic = &manifest.intrinsics[0];
        assert!(intrinsic.namespace.is_empty());
        assert!(intrinsic.params.is_empty());
        assert!(intrinsic.returns_void());
        assert_eq!(manifest.generator.output, Path::new("generated"));
        assert_eq!(manifest.factory.class_prefix, "PluginFactory_");
    }

    #[test]
    fn test_factory_override() {
        let manifest = Manifest::from_str(
            r#"
[factory]
class_prefix = "Intrinsics_"
"#,
        )
        .unwrap();

        assert_eq!(manifest.factory.class_prefix, "Intrinsics_");
        assert_eq!(manifest.factory.extension, "java");
    }

    #[test]
    fn test_parse_error() {
        let err = Manifest::from_str("[[intrinsic]]\nkind = \"inline\"\n").unwrap_err();
        assert!(matches!(*err, Error::Parse { .. }));
    }

    #[test]
    fn test_unknown_field_rejected() {
        let err = Manifest::from_str(
            r#"
[[intrinsic]]
kind = "fold"
owner = "Math"
method = "max"
returns = "int"
inline = true
"#,
        )
        .unwrap_err();
        assert!(matches!(*err, Error::Parse { .. }));
    }

    #[test]
    fn test_node_intrinsic_requires_node() {
        let err = Manifest::from_str(
            r#"
[[intrinsic]]
kind = "node-intrinsic"
owner = "Math"
method = "add"
"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("missing its `node` class"));
    }

    #[test]
    fn test_fold_rejects_object_params() {
        let err = Manifest::from_str(
            r#"
[[intrinsic]]
kind = "fold"
owner = "Math"
method = "hash"
params = ["java.lang.Object"]
returns = "int"
"#,
        )
        .unwrap_err();
        assert!(matches!(*err, Error::InvalidFoldType { .. }));
    }

    #[test]
    fn test_fold_rejects_void_return() {
        let err = Manifest::from_str(
            r#"
[[intrinsic]]
kind = "fold"
owner = "Math"
method = "noop"
"#,
        )
        .unwrap_err();
        assert!(matches!(*err, Error::InvalidFoldType { .. }));
    }

    #[test]
    fn test_keyword_method_rejected() {
        let err = Manifest::from_str(
            r#"
[[intrinsic]]
kind = "node-intrinsic"
owner = "Math"
method = "new"
node = "NewNode"
"#,
        )
        .unwrap_err();
        assert!(matches!(*err, Error::ReservedKeyword { .. }));
    }

    #[test]
    fn test_invalid_owner_rejected() {
        let err = Manifest::from_str(
            r#"
[[intrinsic]]
kind = "node-intrinsic"
owner = "Math-Nodes"
method = "add"
node = "AddNode"
"#,
        )
        .unwrap_err();
        assert!(matches!(*err, Error::InvalidIdentifier { .. }));
        assert!(err.to_string().contains("owner type in 'intrinsic[0]'"));
    }

    #[test]
    fn test_void_array_param_rejected() {
        let err = Manifest::from_str(
            r#"
[[intrinsic]]
kind = "node-intrinsic"
owner = "Math"
method = "add"
params = ["void[]"]
node = "AddNode"
"#,
        )
        .unwrap_err();
        assert!(matches!(*err, Error::InvalidIdentifier { .. }));
        assert!(err.to_string().contains("parameter type in 'intrinsic[0]'"));
    }

    #[test]
    fn test_padded_type_rejected() {
        let err = Manifest::from_str(
            r#"
[[intrinsic]]
kind = "node-intrinsic"
owner = "Math"
method = "add"
params = ["int "]
returns = "int"
node = "AddNode"
"#,
        )
        .unwrap_err();
        assert!(matches!(*err, Error::InvalidIdentifier { .. }));
    }
}

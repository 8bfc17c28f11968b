//! End-to-end tests from manifest text to generated factories.
//!
//! Run `cargo insta review` to update snapshots when making intentional changes.

use std::{io, io::Write, str::FromStr};

use pluginfab_codegen::{DescriptorRegistry, Diagnostics, FactoryEmitter, GenerateSummary, lower};
use pluginfab_core::{Filer, FsFiler, MemoryFiler, SourceName};
use pluginfab_manifest::Manifest;

const MATH: &str = r#"
[[intrinsic]]
kind = "node-intrinsic"
namespace = "com.example"
owner = "MathNodes"
method = "add"
params = ["int", "int"]
returns = "int"
node = "com.example.nodes.AddNode"

[[intrinsic]]
kind = "fold"
namespace = "com.example"
owner = "MathNodes.Helpers"
method = "clamp"
params = ["int"]
returns = "int"
"#;

/// Generate every factory for `toml` through `filer`.
fn generate_into(toml: &str, filer: &mut dyn Filer) -> (GenerateSummary, Diagnostics) {
    let manifest = Manifest::from_str(toml).expect("Failed to parse manifest");
    let lowered = lower(&manifest).expect("Failed to lower manifest");

    let mut registry = DescriptorRegistry::new(&lowered.symbols);
    registry.add_all(lowered.descriptors);

    let mut diagnostics = Diagnostics::new();
    let summary = FactoryEmitter::new(manifest.factory.clone()).generate_all(
        &registry,
        filer,
        &mut diagnostics,
    );
    (summary, diagnostics)
}

fn generate(toml: &str) -> MemoryFiler {
    let mut filer = MemoryFiler::new();
    let (summary, diagnostics) = generate_into(toml, &mut filer);
    assert!(summary.is_success());
    assert!(diagnostics.is_empty());
    filer
}

#[test]
fn test_math_nodes_factory() {
    let filer = generate(MATH);
    assert_eq!(filer.len(), 1);

    let content = filer
        .get_qualified("com.example.PluginFactory_MathNodes")
        .expect("factory not generated");
    insta::assert_snapshot!("math_nodes_factory", content);
}

#[test]
fn test_one_factory_per_top_level_declaration() {
    let filer = generate(
        r#"
[[intrinsic]]
kind = "fold"
namespace = "com.example"
owner = "TopA"
method = "d1"
returns = "int"

[[intrinsic]]
kind = "fold"
namespace = "com.example"
owner = "TopB"
method = "d3"
returns = "int"

[[intrinsic]]
kind = "fold"
namespace = "com.example"
owner = "TopA.Nested"
method = "d2"
returns = "int"
"#,
    );

    let names: Vec<String> = filer.iter().map(|(name, _)| name.qualified()).collect();
    assert_eq!(
        names,
        [
            "com.example.PluginFactory_TopA",
            "com.example.PluginFactory_TopB"
        ]
    );

    let top_a = filer
        .get_qualified("com.example.PluginFactory_TopA")
        .unwrap();
    assert!(top_a.contains("private static final class Plugin_d1_0 "));
    assert!(top_a.contains("private static final class Plugin_d2_1 "));
    assert!(top_a.contains("plugins.register(new Plugin_d1_0(), TopA.class, \"d1\");"));
    assert!(top_a.contains("plugins.register(new Plugin_d2_1(), TopA.Nested.class, \"d2\");"));

    let top_b = filer
        .get_qualified("com.example.PluginFactory_TopB")
        .unwrap();
    assert!(top_b.contains("private static final class Plugin_d3_0 "));
    assert!(!top_b.contains("Plugin_d1"));
}

#[test]
fn test_identical_imports_are_emitted_once() {
    let filer = generate(
        r#"
[[intrinsic]]
kind = "fold"
namespace = "p"
owner = "T"
method = "f"
params = ["int"]
returns = "int"
imports = ["java.util.Objects"]

[[intrinsic]]
kind = "fold"
namespace = "p"
owner = "T"
method = "g"
params = ["long"]
returns = "long"
imports = ["java.util.Objects"]
"#,
    );

    let content = filer.get_qualified("p.PluginFactory_T").unwrap();
    assert_eq!(content.matches("import java.util.Objects;").count(), 1);
    assert_eq!(content.matches("import jdk.vm.ci.meta.JavaKind;").count(), 1);
    assert_eq!(
        content
            .matches("import com.oracle.graal.nodes.ConstantNode;")
            .count(),
        1
    );
}

#[test]
fn test_unnamed_namespace_has_no_package_line() {
    let filer = generate(
        r#"
[[intrinsic]]
kind = "fold"
owner = "Loose"
method = "id"
params = ["int"]
returns = "int"
"#,
    );

    let content = filer.get_qualified("PluginFactory_Loose").unwrap();
    assert!(!content.contains("package "));
    assert!(content.starts_with(
        "// CheckStyle: stop header check\n\
         // CheckStyle: stop line length check\n\
         // GENERATED CONTENT - DO NOT EDIT\n\
         \n\
         import jdk.vm.ci.meta.ResolvedJavaMethod;\n"
    ));
}

#[test]
fn test_factory_overrides_from_manifest() {
    let filer = generate(
        r#"
[factory]
class_prefix = "Intrinsics_"
header = ["generated, do not edit"]

[[intrinsic]]
kind = "fold"
namespace = "p"
owner = "T"
method = "f"
returns = "int"
"#,
    );

    let content = filer.get_qualified("p.Intrinsics_T").unwrap();
    assert!(content.starts_with("// generated, do not edit\npackage p;\n"));
    assert!(content.contains("public class Intrinsics_T implements NodeIntrinsicPluginFactory {"));
}

#[test]
fn test_writes_namespace_directories() {
    let temp = tempfile::tempdir().unwrap();
    let mut filer = FsFiler::new(temp.path(), "java");

    let (summary, diagnostics) = generate_into(MATH, &mut filer);
    assert!(summary.is_success());
    assert!(diagnostics.is_empty());

    let path = temp
        .path()
        .join("com/example/PluginFactory_MathNodes.java");
    let content = std::fs::read_to_string(path).unwrap();
    assert!(content.contains("public class PluginFactory_MathNodes"));
    assert!(content.ends_with("    }\n}\n"));
}

/// Filer that fails to create the artifacts it is told to, and records the
/// names it was asked for.
struct FlakyFiler {
    fail: &'static [&'static str],
    requested: Vec<String>,
    inner: MemoryFiler,
}

impl Filer for FlakyFiler {
    fn create_source(&mut self, name: &SourceName) -> io::Result<Box<dyn Write + '_>> {
        self.requested.push(name.qualified());
        if self.fail.iter().any(|fail| *fail == name.simple_name()) {
            return Err(io::Error::new(io::ErrorKind::AlreadyExists, "artifact exists"));
        }
        self.inner.create_source(name)
    }
}

#[test]
fn test_failure_for_one_declaration_does_not_stop_others() {
    let mut filer = FlakyFiler {
        fail: &["PluginFactory_First"],
        requested: Vec::new(),
        inner: MemoryFiler::new(),
    };

    let (summary, diagnostics) = generate_into(
        r#"
[[intrinsic]]
kind = "fold"
namespace = "p"
owner = "First"
method = "f"
returns = "int"

[[intrinsic]]
kind = "fold"
namespace = "p"
owner = "Second"
method = "g"
returns = "int"
"#,
        &mut filer,
    );

    assert_eq!(
        filer.requested,
        ["p.PluginFactory_First", "p.PluginFactory_Second"]
    );
    assert_eq!(summary.failed, ["p.First"]);
    assert_eq!(summary.written, [SourceName::new("p", "PluginFactory_Second")]);

    assert_eq!(diagnostics.len(), 1);
    let error = diagnostics.errors().next().unwrap();
    assert_eq!(error.location.as_deref(), Some("p.First"));
    assert!(error.message.contains("artifact exists"));

    assert!(filer.inner.get_qualified("p.PluginFactory_Second").is_some());
}

//! Built-in descriptor strategies.
//!
//! - [`NodeIntrinsicPlugin`] - Replace a call with a freshly constructed node
//! - [`FoldPlugin`] - Evaluate a static call when every argument is constant
//!
//! Both generate a `GeneratedInvocationPlugin` subclass named
//! `Plugin_<method>_<index>` and register it against the intrinsified method.

mod fold;
mod node_intrinsic;

pub use fold::FoldPlugin;
pub use node_intrinsic::NodeIntrinsicPlugin;

use crate::CodeBuilder;

/// Import needed whenever a plugin pushes a typed value.
pub(crate) const JAVA_KIND_IMPORT: &str = "jdk.vm.ci.meta.JavaKind";

const EXECUTE_SIGNATURE: &str = "public boolean execute(GraphBuilderContext b, ResolvedJavaMethod targetMethod, InvocationPlugin.Receiver receiver, ValueNode[] args)";

/// The intrinsified method a plugin is registered for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodSignature {
    /// Dotted namespace of the declaring type; empty for the unnamed namespace.
    pub namespace: String,
    /// Declaring type path inside the namespace, e.g. `Outer.Inner`.
    pub owner: String,
    pub method: String,
    pub params: Vec<String>,
    pub returns: String,
}

impl MethodSignature {
    /// Fully qualified declaring type.
    pub fn qualified_owner(&self) -> String {
        if self.namespace.is_empty() {
            self.owner.clone()
        } else {
            format!("{}.{}", self.namespace, self.owner)
        }
    }

    pub fn returns_void(&self) -> bool {
        self.returns == "void"
    }

    /// Name of the implementation class at `index`.
    pub fn plugin_class(&self, index: usize) -> String {
        format!("Plugin_{}_{}", self.method, index)
    }

    /// `method(int,long)` as shown in generated comments.
    fn display(&self) -> String {
        format!("{}({})", self.method, self.params.join(","))
    }
}

/// Descriptive comment block above an implementation unit.
fn emit_provenance(out: &mut CodeBuilder, signature: &MethodSignature, generator: &str) {
    out.push_comment(&format!("class:  {}", signature.qualified_owner()));
    out.push_comment(&format!("method: {}", signature.display()));
    out.push_comment(&format!("generated by: {}", generator));
}

/// Wrap `body` in the plugin class and its `execute` override.
fn emit_plugin_class<F>(out: &mut CodeBuilder, signature: &MethodSignature, index: usize, body: F)
where
    F: FnOnce(&mut CodeBuilder),
{
    let header = format!(
        "private static final class {} extends GeneratedInvocationPlugin {{",
        signature.plugin_class(index)
    );
    out.push_block(&header, "}", |out| {
        out.push_blank();
        out.push_line("@Override");
        out.push_block(&format!("{} {{", EXECUTE_SIGNATURE), "}", body);
    });
}

/// `plugins.register(new Plugin_m_0(), Owner.class, "m", int.class);`
fn emit_register_statement(out: &mut CodeBuilder, signature: &MethodSignature, index: usize) {
    let mut arguments = vec![
        format!("new {}()", signature.plugin_class(index)),
        format!("{}.class", signature.owner),
        format!("\"{}\"", signature.method),
    ];
    arguments.extend(signature.params.iter().map(|p| format!("{}.class", p)));
    out.push_line(&format!("plugins.register({});", arguments.join(", ")));
}

/// Simple name of a possibly qualified class name.
fn simple_class_name(name: &str) -> &str {
    name.rsplit('.').next().unwrap_or(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    pub(crate) fn signature(params: &[&str], returns: &str) -> MethodSignature {
        MethodSignature {
            namespace: "com.example".to_string(),
            owner: "Ops.Inner".to_string(),
            method: "add".to_string(),
            params: params.iter().map(|p| p.to_string()).collect(),
            returns: returns.to_string(),
        }
    }

    #[test]
    fn test_qualified_owner() {
        let mut sig = signature(&[], "void");
        assert_eq!(sig.qualified_owner(), "com.example.Ops.Inner");

        sig.namespace.clear();
        assert_eq!(sig.qualified_owner(), "Ops.Inner");
    }

    #[test]
    fn test_register_statement() {
        let mut out = CodeBuilder::new();
        emit_register_statement(&mut out, &signature(&["int", "long[]"], "int"), 3);
        assert_eq!(
            out.build(),
            "plugins.register(new Plugin_add_3(), Ops.Inner.class, \"add\", int.class, long[].class);\n"
        );
    }

    #[test]
    fn test_register_statement_without_params() {
        let mut out = CodeBuilder::new();
        emit_register_statement(&mut out, &signature(&[], "void"), 0);
        assert_eq!(
            out.build(),
            "plugins.register(new Plugin_add_0(), Ops.Inner.class, \"add\");\n"
        );
    }

    #[test]
    fn test_simple_class_name() {
        assert_eq!(simple_class_name("com.example.nodes.AddNode"), "AddNode");
        assert_eq!(simple_class_name("AddNode"), "AddNode");
    }
}

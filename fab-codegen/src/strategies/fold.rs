use eyre::{Result, bail};
use pluginfab_core::ElementId;
use pluginfab_manifest::PrimitiveType;

use super::{
    JAVA_KIND_IMPORT, MethodSignature, emit_plugin_class, emit_provenance, emit_register_statement,
};
use crate::{CodeBuilder, ImportSet, PluginDescriptor};

const CONSTANT_NODE_IMPORT: &str = "com.oracle.graal.nodes.ConstantNode";

/// Plugin that folds a static call whose arguments are all constants.
///
/// When any argument is not a constant the plugin declines and the call is
/// compiled normally.
#[derive(Debug, Clone)]
pub struct FoldPlugin {
    element: ElementId,
    signature: MethodSignature,
    params: Vec<PrimitiveType>,
    returns: PrimitiveType,
    imports: Vec<String>,
}

impl FoldPlugin {
    /// Fails unless every parameter and the return type are primitives.
    pub fn new(element: ElementId, signature: MethodSignature) -> Result<Self> {
        let params = signature
            .params
            .iter()
            .map(|p| primitive(p, &signature))
            .collect::<Result<Vec<_>>>()?;
        let returns = primitive(&signature.returns, &signature)?;

        Ok(Self {
            element,
            signature,
            params,
            returns,
            imports: Vec::new(),
        })
    }

    pub fn with_imports<I, S>(mut self, imports: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.imports.extend(imports.into_iter().map(Into::into));
        self
    }

    pub fn signature(&self) -> &MethodSignature {
        &self.signature
    }
}

fn primitive(ty: &str, signature: &MethodSignature) -> Result<PrimitiveType> {
    match ty.parse::<PrimitiveType>() {
        Ok(ty) => Ok(ty),
        Err(reason) => bail!(
            "cannot fold {}.{}: {}",
            signature.qualified_owner(),
            signature.method,
            reason
        ),
    }
}

impl PluginDescriptor for FoldPlugin {
    fn source_element(&self) -> ElementId {
        self.element
    }

    fn emit_implementation(&self, out: &mut CodeBuilder, index: usize) {
        emit_provenance(out, &self.signature, "FoldPlugin");
        emit_plugin_class(out, &self.signature, index, |out| {
            if !self.params.is_empty() {
                let condition = (0..self.params.len())
                    .map(|i| format!("!args[{}].isConstant()", i))
                    .collect::<Vec<_>>()
                    .join(" || ");
                out.push_block(&format!("if ({}) {{", condition), "}", |out| {
                    out.push_line("return false;");
                });
            }

            let mut args = Vec::with_capacity(self.params.len());
            for (i, ty) in self.params.iter().enumerate() {
                let read = format!("args[{}].asJavaConstant().{}", i, ty.constant_accessor());
                let value = if ty.needs_narrowing() {
                    format!("({}) {}", ty, read)
                } else {
                    read
                };
                out.push_line(&format!("{} arg{} = {};", ty, i, value));
                args.push(format!("arg{}", i));
            }

            out.push_line(&format!(
                "{} result = {}.{}({});",
                self.returns,
                self.signature.owner,
                self.signature.method,
                args.join(", ")
            ));
            out.push_line(&format!(
                "b.addPush(JavaKind.{}, {}(result));",
                self.returns.java_kind(),
                self.returns.constant_factory()
            ));
            out.push_line("return true;");
        });
    }

    fn emit_registration(&self, out: &mut CodeBuilder, index: usize) {
        emit_register_statement(out, &self.signature, index);
    }

    fn extra_imports(&self, imports: &mut ImportSet) {
        imports.add(JAVA_KIND_IMPORT);
        imports.add(CONSTANT_NODE_IMPORT);
        imports.extend(self.imports.iter().map(String::as_str));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategies::tests::signature;

    #[test]
    fn test_implementation() {
        let plugin = FoldPlugin::new(ElementId::new(1), signature(&["int", "byte"], "long")).unwrap();
        let mut out = CodeBuilder::new();
        plugin.emit_implementation(&mut out, 0);

        assert_eq!(
            out.build(),
            "// class:  com.example.Ops.Inner\n\
             // method: add(int,byte)\n\
             // generated by: FoldPlugin\n\
             private static final class Plugin_add_0 extends GeneratedInvocationPlugin {\n\
             \n\
             \x20   @Override\n\
             \x20   public boolean execute(GraphBuilderContext b, ResolvedJavaMethod targetMethod, InvocationPlugin.Receiver receiver, ValueNode[] args) {\n\
             \x20       if (!args[0].isConstant() || !args[1].isConstant()) {\n\
             \x20           return false;\n\
             \x20       }\n\
             \x20       int arg0 = args[0].asJavaConstant().asInt();\n\
             \x20       byte arg1 = (byte) args[1].asJavaConstant().asInt();\n\
             \x20       long result = Ops.Inner.add(arg0, arg1);\n\
             \x20       b.addPush(JavaKind.Long, ConstantNode.forLong(result));\n\
             \x20       return true;\n\
             \x20   }\n\
             }\n"
        );
    }

    #[test]
    fn test_no_params_skips_constant_check() {
        let plugin = FoldPlugin::new(ElementId::new(1), signature(&[], "boolean")).unwrap();
        let mut out = CodeBuilder::new();
        plugin.emit_implementation(&mut out, 0);
        let text = out.build();

        assert!(!text.contains("isConstant"));
        assert!(text.contains("boolean result = Ops.Inner.add();"));
        assert!(text.contains("ConstantNode.forBoolean(result)"));
    }

    #[test]
    fn test_rejects_non_primitive() {
        let err = FoldPlugin::new(ElementId::new(1), signature(&["String"], "int")).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("com.example.Ops.Inner.add"));
        assert!(message.contains("'String' is not a Java primitive type"));

        assert!(FoldPlugin::new(ElementId::new(1), signature(&["int"], "void")).is_err());
    }

    #[test]
    fn test_extra_imports() {
        let plugin = FoldPlugin::new(ElementId::new(1), signature(&["int"], "int"))
            .unwrap()
            .with_imports(["com.example.MathUtil"]);
        let mut imports = ImportSet::new();
        plugin.extra_imports(&mut imports);

        let all: Vec<_> = imports.iter().collect();
        assert_eq!(
            all,
            [
                "com.example.MathUtil",
                "com.oracle.graal.nodes.ConstantNode",
                "jdk.vm.ci.meta.JavaKind"
            ]
        );
    }

    #[test]
    fn test_registration() {
        let plugin = FoldPlugin::new(ElementId::new(1), signature(&["double"], "double")).unwrap();
        let mut out = CodeBuilder::new();
        plugin.emit_registration(&mut out, 4);
        assert_eq!(
            out.build(),
            "plugins.register(new Plugin_add_4(), Ops.Inner.class, \"add\", double.class);\n"
        );
    }
}

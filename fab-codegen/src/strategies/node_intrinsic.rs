use pluginfab_core::ElementId;
use pluginfab_manifest::PrimitiveType;

use super::{
    JAVA_KIND_IMPORT, MethodSignature, emit_plugin_class, emit_provenance, emit_register_statement,
    simple_class_name,
};
use crate::{CodeBuilder, ImportSet, PluginDescriptor};

/// Plugin that replaces a call with a node built from its arguments.
///
/// The node is pushed onto the stack typed by the method's return kind, or
/// just added to the graph when the method returns `void`.
#[derive(Debug, Clone)]
pub struct NodeIntrinsicPlugin {
    element: ElementId,
    signature: MethodSignature,
    node: String,
    imports: Vec<String>,
}

impl NodeIntrinsicPlugin {
    /// `node` may be qualified, in which case it is imported.
    pub fn new(element: ElementId, signature: MethodSignature, node: impl Into<String>) -> Self {
        Self {
            element,
            signature,
            node: node.into(),
            imports: Vec::new(),
        }
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

    fn push_kind(&self) -> &'static str {
        self.signature
            .returns
            .parse::<PrimitiveType>()
            .map(|ty| ty.java_kind())
            .unwrap_or("Object")
    }
}

impl PluginDescriptor for NodeIntrinsicPlugin {
    fn source_element(&self) -> ElementId {
        self.element
    }

    fn emit_implementation(&self, out: &mut CodeBuilder, index: usize) {
        let node = simple_class_name(&self.node);
        emit_provenance(out, &self.signature, "NodeIntrinsicPlugin");
        emit_plugin_class(out, &self.signature, index, |out| {
            let args: Vec<String> = (0..self.signature.params.len())
                .map(|i| format!("arg{}", i))
                .collect();
            for (i, arg) in args.iter().enumerate() {
                out.push_line(&format!("ValueNode {} = args[{}];", arg, i));
            }
            out.push_line(&format!("{} node = new {}({});", node, node, args.join(", ")));
            if self.signature.returns_void() {
                out.push_line("b.add(node);");
            } else {
                out.push_line(&format!("b.addPush(JavaKind.{}, node);", self.push_kind()));
            }
            out.push_line("return true;");
        });
    }

    fn emit_registration(&self, out: &mut CodeBuilder, index: usize) {
        emit_register_statement(out, &self.signature, index);
    }

    fn extra_imports(&self, imports: &mut ImportSet) {
        if self.node.contains('.') {
            imports.add(self.node.as_str());
        }
        if !self.signature.returns_void() {
            imports.add(JAVA_KIND_IMPORT);
        }
        imports.extend(self.imports.iter().map(String::as_str));
    }
}

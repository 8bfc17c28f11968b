//! Fixed parts of every generated factory.

use serde::Deserialize;

/// Configuration for the text every generated factory shares.
///
/// All fields default to the canonical node-intrinsic factory, so a
/// `[factory]` table only needs to name what it overrides.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FactoryConfig {
    /// Comment lines at the top of each file, without the `//` prefix.
    pub header: Vec<String>,
    /// Prefix of the generated class name; the owner's simple name follows.
    pub class_prefix: String,
    /// Imports every factory needs, in groups separated by a blank line.
    pub core_imports: Vec<Vec<String>>,
    /// Interface the factory implements.
    pub factory_interface: String,
    /// Annotation placed on the factory class.
    pub service_annotation: String,
    /// Signature line of the aggregate registration method, without the brace.
    pub register_signature: String,
    /// Extension of the generated files.
    pub extension: String,
}

impl FactoryConfig {
    /// Name of the factory generated for a declaration with `simple_name`.
    pub fn class_name(&self, simple_name: &str) -> String {
        format!("{}{}", self.class_prefix, simple_name)
    }
}

impl Default for FactoryConfig {
    fn default() -> Self {
        Self {
            header: vec![
                "CheckStyle: stop header check".to_string(),
                "CheckStyle: stop line length check".to_string(),
                "GENERATED CONTENT - DO NOT EDIT".to_string(),
            ],
            class_prefix: "PluginFactory_".to_string(),
            core_imports: vec![
                vec![
                    "jdk.vm.ci.meta.ResolvedJavaMethod".to_string(),
                    "jdk.vm.ci.service.ServiceProvider".to_string(),
                ],
                vec![
                    "com.oracle.graal.nodes.ValueNode".to_string(),
                    "com.oracle.graal.nodes.graphbuilderconf.GraphBuilderContext".to_string(),
                    "com.oracle.graal.nodes.graphbuilderconf.GeneratedInvocationPlugin".to_string(),
                    "com.oracle.graal.nodes.graphbuilderconf.InvocationPlugin".to_string(),
                    "com.oracle.graal.nodes.graphbuilderconf.InvocationPlugins".to_string(),
                    "com.oracle.graal.nodes.graphbuilderconf.NodeIntrinsicPluginFactory".to_string(),
                ],
            ],
            factory_interface: "NodeIntrinsicPluginFactory".to_string(),
            service_annotation: "@ServiceProvider(NodeIntrinsicPluginFactory.class)".to_string(),
            register_signature:
                "public void registerPlugins(InvocationPlugins plugins, InjectionProvider injection)"
                    .to_string(),
            extension: "java".to_string(),
        }
    }
}

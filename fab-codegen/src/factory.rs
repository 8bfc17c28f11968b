//! Factory file emission.
//!
//! One factory class is generated per top-level declaration. The emitter owns
//! the layout of that file (header, namespace, imports, class shell and the
//! aggregate registration method) and delegates everything descriptor
//! specific to [`PluginDescriptor`].

use std::io::Write;

use eyre::{Result, WrapErr};
use pluginfab_core::{
    ElementId, FactoryConfig, Filer, SourceName, SymbolModel, enclosing_namespace,
};

use crate::{CodeBuilder, Diagnostic, DescriptorRegistry, ImportSet, Messager, PluginDescriptor};

/// Outcome of [`FactoryEmitter::generate_all`].
#[derive(Debug, Default)]
pub struct GenerateSummary {
    /// Factories written, in emission order.
    pub written: Vec<SourceName>,
    /// Qualified names of declarations whose factory could not be written.
    pub failed: Vec<String>,
}

impl GenerateSummary {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Writes plugin factories for the groups of a [`DescriptorRegistry`].
#[derive(Debug, Clone, Default)]
pub struct FactoryEmitter {
    config: FactoryConfig,
}

impl FactoryEmitter {
    pub fn new(config: FactoryConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &FactoryConfig {
        &self.config
    }

    /// Emit a factory for every group in `registry`.
    ///
    /// A failure for one declaration is reported through `messager` as an
    /// error located at that declaration and does not stop the others.
    pub fn generate_all<S, F, M>(
        &self,
        registry: &DescriptorRegistry<'_, S>,
        filer: &mut F,
        messager: &mut M,
    ) -> GenerateSummary
    where
        S: SymbolModel + ?Sized,
        F: Filer + ?Sized,
        M: Messager + ?Sized,
    {
        let symbols = registry.symbols();
        let mut summary = GenerateSummary::default();

        for (declaration, group) in registry.groups() {
            match self.create_factory(symbols, declaration, group, filer) {
                Ok(name) => {
                    tracing::debug!(factory = %name, plugins = group.len(), "wrote plugin factory");
                    summary.written.push(name);
                }
                Err(err) => {
                    let location = symbols.qualified_name(declaration);
                    tracing::warn!(declaration = %location, "plugin factory emission failed: {:#}", err);
                    messager.report(Diagnostic::error(format!("{:#}", err)).at(&location));
                    summary.failed.push(location);
                }
            }
        }

        summary
    }

    /// Emit the factory for one declaration.
    ///
    /// The artifact writer is dropped, and so finalized, on every path out
    /// of this function.
    pub fn create_factory<S, F>(
        &self,
        symbols: &S,
        declaration: ElementId,
        group: &[Box<dyn PluginDescriptor>],
        filer: &mut F,
    ) -> Result<SourceName>
    where
        S: SymbolModel + ?Sized,
        F: Filer + ?Sized,
    {
        let name = self.source_name(symbols, declaration);
        let content = self.render_factory(&name, group);

        let mut out = filer
            .create_source(&name)
            .wrap_err_with(|| format!("failed to create {}", name))?;
        out.write_all(content.as_bytes())
            .and_then(|()| out.flush())
            .wrap_err_with(|| format!("failed to write {}", name))?;

        Ok(name)
    }

    /// Identity of the factory generated for `declaration`.
    ///
    /// A declaration outside any namespace gets a factory in the unnamed
    /// namespace.
    pub fn source_name<S>(&self, symbols: &S, declaration: ElementId) -> SourceName
    where
        S: SymbolModel + ?Sized,
    {
        let namespace = enclosing_namespace(symbols, declaration)
            .map(|ns| symbols.qualified_name(ns))
            .unwrap_or_default();
        SourceName::new(
            namespace,
            self.config.class_name(symbols.simple_name(declaration)),
        )
    }

    /// Render the complete factory source for a group.
    pub fn render_factory(&self, name: &SourceName, group: &[Box<dyn PluginDescriptor>]) -> String {
        let mut out = CodeBuilder::new();

        for line in &self.config.header {
            out.push_comment(line);
        }
        if !name.namespace().is_empty() {
            out.push_line(&format!("package {};", name.namespace()));
        }
        out.push_blank();
        self.render_imports(&mut out, group);
        out.push_blank();

        out.push_line(&self.config.service_annotation);
        out.push_line(&format!(
            "public class {} implements {} {{",
            name.simple_name(),
            self.config.factory_interface
        ));
        out.indented(|out| {
            for (index, descriptor) in group.iter().enumerate() {
                out.push_blank();
                descriptor.emit_implementation(out, index);
            }
            out.push_blank();
            self.render_register_method(out, group);
        });
        out.push_line("}");

        out.build()
    }

    /// Union of the extra imports every descriptor in `group` contributes.
    pub fn collect_imports(group: &[Box<dyn PluginDescriptor>]) -> ImportSet {
        let mut extra = ImportSet::new();
        for descriptor in group {
            descriptor.extra_imports(&mut extra);
        }
        extra
    }

    fn render_imports(&self, out: &mut CodeBuilder, group: &[Box<dyn PluginDescriptor>]) {
        for (i, imports) in self.config.core_imports.iter().enumerate() {
            if i > 0 {
                out.push_blank();
            }
            for import in imports {
                out.push_line(&format!("import {};", import));
            }
        }

        let extra = Self::collect_imports(group);
        if !extra.is_empty() {
            out.push_blank();
            for import in extra.iter() {
                out.push_line(&format!("import {};", import));
            }
        }
    }

    fn render_register_method(&self, out: &mut CodeBuilder, group: &[Box<dyn PluginDescriptor>]) {
        let header = format!("{} {{", self.config.register_signature);
        out.push_block(&header, "}", |out| {
            for (index, descriptor) in group.iter().enumerate() {
                descriptor.emit_registration(out, index);
            }
        });
    }
}

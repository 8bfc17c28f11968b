//! The per-descriptor generation strategy.

use pluginfab_core::ElementId;

use crate::{CodeBuilder, ImportSet};

/// One discovered intrinsic-substitution rule.
///
/// The factory emitter never looks at concrete descriptor kinds; everything
/// a factory needs from a descriptor goes through this trait. `index` is the
/// descriptor's zero-based position within its group and is passed
/// identically to [`emit_implementation`](Self::emit_implementation) and
/// [`emit_registration`](Self::emit_registration), so the two fragments can
/// refer to each other by names derived from it.
pub trait PluginDescriptor {
    /// Element the rule was discovered on. Used to find the owning declaration.
    fn source_element(&self) -> ElementId;

    /// Write the implementation unit, at class-member indentation.
    fn emit_implementation(&self, out: &mut CodeBuilder, index: usize);

    /// Write the statement registering the implementation from the same `index`,
    /// at method-body indentation.
    fn emit_registration(&self, out: &mut CodeBuilder, index: usize);

    /// Add imports the emitted fragments need beyond the core imports.
    #[allow(unused_variables)]
    fn extra_imports(&self, imports: &mut ImportSet) {}
}

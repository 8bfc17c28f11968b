//! Validation context and Java name checks.

use std::sync::Arc;

use miette::SourceSpan;

use crate::{Result, error::SourceContext};

/// Parsing and validation context that carries source information.
///
/// Carries the source for error reporting plus the path of the entry being
/// validated (e.g. `intrinsic[2]`), so nested checks can say where they are.
#[derive(Debug, Clone)]
pub struct ParseContext {
    source: Arc<SourceContext>,
    path: Vec<String>,
}

impl ParseContext {
    pub fn new(src: &str, filename: &str) -> Self {
        Self {
            source: Arc::new(SourceContext::new(src, filename)),
            path: Vec::new(),
        }
    }

    pub fn src(&self) -> &str {
        self.source.src()
    }

    pub fn filename(&self) -> &str {
        self.source.filename()
    }

    pub fn source_context(&self) -> &SourceContext {
        &self.source
    }

    /// Push a path segment and return a new context.
    pub fn push(&self, segment: impl Into<String>) -> Self {
        let mut path = self.path.clone();
        path.push(segment.into());
        Self {
            source: Arc::clone(&self.source),
            path,
        }
    }

    /// Current path as a dot-separated string.
    pub fn path_string(&self) -> String {
        self.path.join(".")
    }

    /// Context description for error messages, e.g. "method name in 'intrinsic[0]'".
    pub fn context_for(&self, kind: &str) -> String {
        if self.path.is_empty() {
            kind.to_string()
        } else {
            format!("{} in '{}'", kind, self.path_string())
        }
    }

    /// Find the span of `key = "value"` in the source.
    pub fn find_span(&self, key: &str, value: &str) -> Option<SourceSpan> {
        find_value_span(self.source.src(), key, value)
    }

    /// Validate that `name` is a Java identifier and not a keyword.
    pub fn validate_name(&self, name: &str, kind: &str, key: &str) -> Result<()> {
        if is_java_keyword(name) {
            return Err(self.source.reserved_keyword_error(
                name,
                self.context_for(kind),
                self.find_span(key, name),
            ));
        }

        if let Some(reason) = validate_identifier(name) {
            return Err(self.source.invalid_identifier_error(
                name,
                self.context_for(kind),
                reason,
                self.find_span(key, name),
            ));
        }

        Ok(())
    }

    /// Validate a dotted name such as a namespace or `Outer.Inner`.
    ///
    /// Spans point at the whole value, since that is what appears in the
    /// source.
    pub fn validate_dotted(&self, dotted: &str, kind: &str, key: &str) -> Result<()> {
        for segment in dotted.split('.') {
            if is_java_keyword(segment) {
                return Err(self.source.reserved_keyword_error(
                    segment,
                    self.context_for(kind),
                    self.find_span(key, dotted),
                ));
            }
            if let Some(reason) = validate_identifier(segment) {
                return Err(self.source.invalid_identifier_error(
                    dotted,
                    self.context_for(kind),
                    reason,
                    self.find_span(key, dotted),
                ));
            }
        }
        Ok(())
    }

    /// Validate a type name: a primitive, or a dotted name, with optional `[]` suffixes.
    ///
    /// The name is used verbatim in generated code, so surrounding whitespace
    /// is rejected rather than trimmed. `void` is not a value type.
    pub fn validate_type(&self, ty: &str, kind: &str, key: &str) -> Result<()> {
        let mut base = ty;
        while let Some(stripped) = base.strip_suffix("[]") {
            base = stripped;
        }
        if PRIMITIVES.contains(&base) {
            return Ok(());
        }
        if base == "void" {
            return Err(self.source.invalid_identifier_error(
                ty,
                self.context_for(kind),
                "'void' is only allowed as a return type",
                self.find_span(key, ty),
            ));
        }
        self.validate_dotted(base, kind, key).map_err(|_| {
            self.source.invalid_identifier_error(
                ty,
                self.context_for(kind),
                "type must be a primitive or a dotted class name",
                self.find_span(key, ty),
            )
        })
    }

    /// Validate a return type: `void`, or anything [`validate_type`](Self::validate_type) accepts.
    pub fn validate_return_type(&self, ty: &str, key: &str) -> Result<()> {
        if ty == "void" {
            return Ok(());
        }
        self.validate_type(ty, "return type", key)
    }

    /// Create a validation error at `key = "value"`.
    pub fn error_at(&self, message: impl Into<String>, key: &str, value: &str) -> Box<crate::Error> {
        self.source
            .validation_error(message, self.find_span(key, value))
    }
}

const PRIMITIVES: &[&str] = &[
    "boolean", "byte", "short", "char", "int", "long", "float", "double",
];

/// Java reserved keywords and literals that cannot be used as identifiers
pub(crate) const JAVA_KEYWORDS: &[&str] = &[
    "abstract", "assert", "boolean", "break", "byte", "case", "catch", "char", "class", "const",
    "continue", "default", "do", "double", "else", "enum", "extends", "final", "finally", "float",
    "for", "goto", "if", "implements", "import", "instanceof", "int", "interface", "long",
    "native", "new", "package", "private", "protected", "public", "return", "short", "static",
    "strictfp", "super", "switch", "synchronized", "this", "throw", "throws", "transient", "try",
    "void", "volatile", "while",
    // Literals
    "true", "false", "null",
    // Restricted identifier
    "_",
];

pub(crate) fn is_java_keyword(name: &str) -> bool {
    JAVA_KEYWORDS.contains(&name)
}

/// Find the span of a quoted value belonging to `key` in the TOML source.
///
/// Tries `key = "value"`, then `key = 'value'`, then the quoted value
/// anywhere (covers values inside arrays).
pub(crate) fn find_value_span(src: &str, key: &str, value: &str) -> Option<SourceSpan> {
    for quote in ['"', '\''] {
        let pattern = format!("{} = {}{}{}", key, quote, value, quote);
        if let Some(pos) = src.find(&pattern) {
            let start = pos + key.len() + 4;
            return Some(SourceSpan::from((start, value.len())));
        }
    }

    let quoted = format!("\"{}\"", value);
    if let Some(pos) = src.find(&quoted) {
        return Some(SourceSpan::from((pos + 1, value.len())));
    }

    None
}

/// Validate that a name is a Java identifier.
/// Returns None if valid, Some(reason) if invalid
pub(crate) fn validate_identifier(name: &str) -> Option<&'static str> {
    let mut chars = name.chars();

    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {}
        Some(_) => return Some("name must start with a letter, '_' or '$'"),
        None => return Some("name cannot be empty"),
    }

    if chars.any(|c| !(c.is_ascii_alphanumeric() || c == '_' || c == '$')) {
        return Some("name must contain only letters, digits, '_' and '$'");
    }

    None
}

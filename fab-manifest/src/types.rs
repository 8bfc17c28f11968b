//! Java type names used in intrinsic signatures.

use std::{fmt, str::FromStr};

/// A Java primitive type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveType {
    Boolean,
    Byte,
    Short,
    Char,
    Int,
    Long,
    Float,
    Double,
}

impl PrimitiveType {
    /// The Java keyword for this type.
    pub fn as_str(&self) -> &'static str {
        match self {
            PrimitiveType::Boolean => "boolean",
            PrimitiveType::Byte => "byte",
            PrimitiveType::Short => "short",
            PrimitiveType::Char => "char",
            PrimitiveType::Int => "int",
            PrimitiveType::Long => "long",
            PrimitiveType::Float => "float",
            PrimitiveType::Double => "double",
        }
    }

    /// Name of the matching `JavaKind` constant.
    pub fn java_kind(&self) -> &'static str {
        match self {
            PrimitiveType::Boolean => "Boolean",
            PrimitiveType::Byte => "Byte",
            PrimitiveType::Short => "Short",
            PrimitiveType::Char => "Char",
            PrimitiveType::Int => "Int",
            PrimitiveType::Long => "Long",
            PrimitiveType::Float => "Float",
            PrimitiveType::Double => "Double",
        }
    }

    /// Accessor reading this type out of a `JavaConstant`.
    pub fn constant_accessor(&self) -> &'static str {
        match self {
            PrimitiveType::Boolean => "asBoolean()",
            PrimitiveType::Byte => "asInt()",
            PrimitiveType::Short => "asInt()",
            PrimitiveType::Char => "asInt()",
            PrimitiveType::Int => "asInt()",
            PrimitiveType::Long => "asLong()",
            PrimitiveType::Float => "asFloat()",
            PrimitiveType::Double => "asDouble()",
        }
    }

    /// Whether reading via [`constant_accessor`](Self::constant_accessor)
    /// needs a narrowing cast.
    pub fn needs_narrowing(&self) -> bool {
        matches!(
            self,
            PrimitiveType::Byte | PrimitiveType::Short | PrimitiveType::Char
        )
    }

    /// `ConstantNode` factory for a value of this type.
    pub fn constant_factory(&self) -> &'static str {
        match self {
            PrimitiveType::Boolean => "ConstantNode.forBoolean",
            PrimitiveType::Byte => "ConstantNode.forByte",
            PrimitiveType::Short => "ConstantNode.forShort",
            PrimitiveType::Char => "ConstantNode.forChar",
            PrimitiveType::Int => "ConstantNode.forInt",
            PrimitiveType::Long => "ConstantNode.forLong",
            PrimitiveType::Float => "ConstantNode.forFloat",
            PrimitiveType::Double => "ConstantNode.forDouble",
        }
    }
}

impl fmt::Display for PrimitiveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PrimitiveType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "boolean" => Ok(PrimitiveType::Boolean),
            "byte" => Ok(PrimitiveType::Byte),
            "short" => Ok(PrimitiveType::Short),
            "char" => Ok(PrimitiveType::Char),
            "int" => Ok(PrimitiveType::Int),
            "long" => Ok(PrimitiveType::Long),
            "float" => Ok(PrimitiveType::Float),
            "double" => Ok(PrimitiveType::Double),
            _ => Err(format!("'{}' is not a Java primitive type", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_primitives() {
        assert_eq!("int".parse::<PrimitiveType>(), Ok(PrimitiveType::Int));
        assert_eq!("double".parse::<PrimitiveType>(), Ok(PrimitiveType::Double));
        assert!("Integer".parse::<PrimitiveType>().is_err());
        assert!("void".parse::<PrimitiveType>().is_err());
    }

    #[test]
    fn test_narrowing() {
        assert!(PrimitiveType::Char.needs_narrowing());
        assert!(!PrimitiveType::Long.needs_narrowing());
    }
}

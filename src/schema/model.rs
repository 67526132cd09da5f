//! In-memory schema representation
//!
//! Built once from a schema definition, read-only afterwards. Types are
//! unique by name and reference each other by name; field declaration order
//! is preserved because it drives default selection ordering.

use indexmap::IndexMap;
use serde_json::Value;
use std::collections::{HashMap, HashSet};
use std::fmt;

use crate::core::error::SchemaError;

/// Scalars every schema understands without declaring them
pub const BUILTIN_SCALARS: &[&str] = &["ID", "String", "Int", "Float", "Boolean"];

/// The name a schema's root query type defaults to
pub const DEFAULT_QUERY_TYPE: &str = "Query";

/// A field's declared return type
///
/// Nullability is tracked per layer: a `[Task!]!` is a non-null list of
/// non-null elements, `[Task]!` a non-null list of nullable elements.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeRef {
    Named { name: String, non_null: bool },
    List { element: Box<TypeRef>, non_null: bool },
}

impl TypeRef {
    /// The innermost named type
    pub fn name(&self) -> &str {
        match self {
            TypeRef::Named { name, .. } => name,
            TypeRef::List { element, .. } => element.name(),
        }
    }

    /// Whether the outermost layer rejects null
    pub fn non_null(&self) -> bool {
        match self {
            TypeRef::Named { non_null, .. } => *non_null,
            TypeRef::List { non_null, .. } => *non_null,
        }
    }

    pub fn is_list(&self) -> bool {
        matches!(self, TypeRef::List { .. })
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeRef::Named { name, non_null } => {
                write!(f, "{}{}", name, if *non_null { "!" } else { "" })
            }
            TypeRef::List { element, non_null } => {
                write!(f, "[{}]{}", element, if *non_null { "!" } else { "" })
            }
        }
    }
}

/// A single directive attached to a field or type
///
/// Immutable once parsed; arguments are literal JSON values.
#[derive(Debug, Clone, PartialEq)]
pub struct DirectiveInvocation {
    pub name: String,
    pub arguments: HashMap<String, Value>,
}

impl DirectiveInvocation {
    pub fn argument(&self, name: &str) -> Option<&Value> {
        self.arguments.get(name)
    }

    pub fn string_argument(&self, name: &str) -> Option<&str> {
        self.arguments.get(name).and_then(|v| v.as_str())
    }
}

/// A field declaration owned by exactly one schema type
#[derive(Debug, Clone)]
pub struct FieldDefinition {
    pub name: String,
    pub field_type: TypeRef,
    pub directives: Vec<DirectiveInvocation>,
}

/// An object type with its fields in declaration order
#[derive(Debug, Clone)]
pub struct SchemaType {
    pub name: String,
    pub fields: IndexMap<String, FieldDefinition>,
    pub directives: Vec<DirectiveInvocation>,
}

impl SchemaType {
    pub fn field(&self, name: &str) -> Option<&FieldDefinition> {
        self.fields.get(name)
    }
}

/// The full parsed schema
#[derive(Debug, Clone)]
pub struct SchemaModel {
    pub types: IndexMap<String, SchemaType>,
    pub query_type: String,
    pub(crate) scalars: HashSet<String>,
}

impl SchemaModel {
    /// Parse and validate a schema definition
    ///
    /// Fails on malformed SDL, duplicate type names, unresolved type
    /// references and a missing query root. Directive names are deliberately
    /// not checked here; the registry only arrives at bind time.
    pub fn parse(sdl: &str) -> Result<Self, SchemaError> {
        super::parser::parse_sdl(sdl)
    }

    pub fn object_type(&self, name: &str) -> Option<&SchemaType> {
        self.types.get(name)
    }

    /// Whether a type name denotes a leaf (built-in or declared scalar)
    pub fn is_scalar(&self, name: &str) -> bool {
        self.scalars.contains(name)
    }
}

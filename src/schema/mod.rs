//! Schema parsing and binding
//!
//! `model` is the in-memory representation built from SDL text, `parser`
//! fills it, and `bind` attaches directive-composed resolver pipelines to
//! every field. The bound schema is what the executor runs against.

pub mod bind;
pub mod model;
mod parser;

pub use bind::{BoundField, BoundSchema, BoundType, bind};
pub use model::{DirectiveInvocation, FieldDefinition, SchemaModel, SchemaType, TypeRef};

//! Field resolver binding
//!
//! Turns a parsed schema model into a bound schema whose fields carry
//! composed resolution pipelines. Binding happens once at startup; the
//! result is immutable and shared read-only by every request. Any directive
//! the registry does not know fails here, never at request time.

use indexmap::IndexMap;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info};

use super::model::{FieldDefinition, SchemaModel};
use crate::core::error::BindError;
use crate::directives::{AttributeStep, DirectiveRegistry, ResolutionStep};

/// A field plus its composed resolution pipeline
pub struct BoundField {
    pub definition: FieldDefinition,
    pub pipeline: Vec<Arc<dyn ResolutionStep>>,
}

/// A type whose fields are all bound
pub struct BoundType {
    pub name: String,
    pub fields: IndexMap<String, BoundField>,
}

impl BoundType {
    pub fn field(&self, name: &str) -> Option<&BoundField> {
        self.fields.get(name)
    }
}

/// A schema ready for execution
///
/// Immutable after binding; safe for unsynchronized concurrent reads.
pub struct BoundSchema {
    pub types: IndexMap<String, BoundType>,
    pub query_type: String,
    scalars: HashSet<String>,
}

impl BoundSchema {
    pub fn object_type(&self, name: &str) -> Option<&BoundType> {
        self.types.get(name)
    }

    pub fn is_scalar(&self, name: &str) -> bool {
        self.scalars.contains(name)
    }
}

/// Compose a resolver pipeline for every field in the model
///
/// A field without directives gets the default attribute accessor. A field
/// with directives gets exactly the directive steps in declaration order —
/// directives override the default accessor, they do not supplement it.
pub fn bind(model: &SchemaModel, registry: &DirectiveRegistry) -> Result<BoundSchema, BindError> {
    let mut types = IndexMap::new();
    let mut field_count = 0usize;

    for schema_type in model.types.values() {
        let mut fields = IndexMap::new();

        for field in schema_type.fields.values() {
            let pipeline: Vec<Arc<dyn ResolutionStep>> = if field.directives.is_empty() {
                vec![Arc::new(AttributeStep::new(&field.name))]
            } else {
                field
                    .directives
                    .iter()
                    .map(|invocation| registry.resolve(invocation, &schema_type.name, field))
                    .collect::<Result<_, _>>()?
            };

            debug!(
                type_name = %schema_type.name,
                field = %field.name,
                steps = pipeline.len(),
                "bound field"
            );
            field_count += 1;

            fields.insert(
                field.name.clone(),
                BoundField {
                    definition: field.clone(),
                    pipeline,
                },
            );
        }

        types.insert(
            schema_type.name.clone(),
            BoundType {
                name: schema_type.name.clone(),
                fields,
            },
        );
    }

    info!(
        types = types.len(),
        fields = field_count,
        "schema bound"
    );

    Ok(BoundSchema {
        types,
        query_type: model.query_type.clone(),
        scalars: model.scalars.clone(),
    })
}

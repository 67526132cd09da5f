//! SDL parsing into the schema model
//!
//! Two passes: collect every definition, then resolve type references.
//! Forward references are legal, which is why resolution waits for the
//! full document.

use graphql_parser::parse_schema;
use graphql_parser::schema::{Definition, Type as ParsedType, TypeDefinition};
use indexmap::IndexMap;
use std::collections::HashSet;
use tracing::debug;

use super::model::{
    BUILTIN_SCALARS, DEFAULT_QUERY_TYPE, DirectiveInvocation, FieldDefinition, SchemaModel,
    SchemaType, TypeRef,
};
use crate::core::error::SchemaError;
use crate::core::value::literal_to_json;

pub(crate) fn parse_sdl(sdl: &str) -> Result<SchemaModel, SchemaError> {
    let document = parse_schema::<String>(sdl).map_err(|e| SchemaError::Syntax {
        message: e.to_string(),
    })?;

    let mut types: IndexMap<String, SchemaType> = IndexMap::new();
    let mut scalars: HashSet<String> = BUILTIN_SCALARS.iter().map(|s| s.to_string()).collect();
    let mut query_type = DEFAULT_QUERY_TYPE.to_string();

    for definition in &document.definitions {
        match definition {
            Definition::TypeDefinition(TypeDefinition::Object(object)) => {
                if types.contains_key(object.name.as_str()) {
                    return Err(SchemaError::DuplicateType {
                        type_name: object.name.clone(),
                    });
                }

                let mut fields = IndexMap::new();
                for field in &object.fields {
                    fields.insert(
                        field.name.clone(),
                        FieldDefinition {
                            name: field.name.clone(),
                            field_type: convert_type(&field.field_type),
                            directives: convert_directives(&field.directives),
                        },
                    );
                }

                types.insert(
                    object.name.clone(),
                    SchemaType {
                        name: object.name.clone(),
                        fields,
                        directives: convert_directives(&object.directives),
                    },
                );
            }
            Definition::TypeDefinition(TypeDefinition::Scalar(scalar)) => {
                scalars.insert(scalar.name.clone());
            }
            Definition::SchemaDefinition(schema_def) => {
                if let Some(query) = &schema_def.query {
                    query_type = query.clone();
                }
            }
            other => {
                // Interfaces, unions, enums and input objects are outside the
                // directive-driven object model.
                debug!(definition = ?other, "skipping unsupported schema definition");
            }
        }
    }

    // Second pass: every named reference must land on a known type or scalar.
    for schema_type in types.values() {
        for field in schema_type.fields.values() {
            let referenced = field.field_type.name();
            if !types.contains_key(referenced) && !scalars.contains(referenced) {
                return Err(SchemaError::UnknownType {
                    type_name: referenced.to_string(),
                    field: field.name.clone(),
                    owner: schema_type.name.clone(),
                });
            }
        }
    }

    if !types.contains_key(query_type.as_str()) {
        return Err(SchemaError::MissingQueryRoot {
            expected: query_type,
        });
    }

    debug!(
        types = types.len(),
        query_type = %query_type,
        "parsed schema definition"
    );

    Ok(SchemaModel {
        types,
        query_type,
        scalars,
    })
}

fn convert_type(parsed: &ParsedType<'_, String>) -> TypeRef {
    match parsed {
        ParsedType::NamedType(name) => TypeRef::Named {
            name: name.clone(),
            non_null: false,
        },
        ParsedType::ListType(inner) => TypeRef::List {
            element: Box::new(convert_type(inner)),
            non_null: false,
        },
        ParsedType::NonNullType(inner) => match convert_type(inner) {
            TypeRef::Named { name, .. } => TypeRef::Named {
                name,
                non_null: true,
            },
            TypeRef::List { element, .. } => TypeRef::List {
                element,
                non_null: true,
            },
        },
    }
}

fn convert_directives(
    directives: &[graphql_parser::schema::Directive<'_, String>],
) -> Vec<DirectiveInvocation> {
    directives
        .iter()
        .map(|directive| DirectiveInvocation {
            name: directive.name.clone(),
            arguments: directive
                .arguments
                .iter()
                .map(|(name, value)| (name.clone(), literal_to_json(value)))
                .collect(),
        })
        .collect()
}

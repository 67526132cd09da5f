//! Query execution against a bound schema
//!
//! The executor walks a parsed query document depth-first, left-to-right in
//! the order selections were written, running each field's resolution
//! pipeline and assembling a response tree that mirrors the query's shape.
//!
//! Error containment follows the usual GraphQL read-model contract:
//! - a query referencing an undefined field is fatal for the whole response
//!   (`data: null`),
//! - a failing resolution step nullifies its own field only, and
//!   nullability rules decide how far the null propagates (null-bubbling),
//! - sibling fields and list elements are never aborted by each other's
//!   failures.
//!
//! Cancellation is cooperative: dropping the future returned by [`execute`]
//! abandons all in-flight resolution, and no state survives outside it.

pub mod context;
pub mod response;

use futures::future::{BoxFuture, FutureExt};
use graphql_parser::query::{Definition, OperationDefinition, Selection, parse_query};
use serde_json::Value;
use tracing::debug;

use crate::core::value::coerce_arguments;
use crate::schema::bind::BoundSchema;
use crate::schema::model::TypeRef;

pub use context::ExecutionContext;
pub use response::{ErrorExtensions, ExecutionError, ExecutionResponse, PathSegment};

/// Execute one query document against a bound schema
///
/// Never fails: every outcome, including a malformed query, is expressed as
/// an [`ExecutionResponse`] with `data` and `errors` keys.
pub async fn execute(
    schema: &BoundSchema,
    query: &str,
    ctx: &ExecutionContext,
) -> ExecutionResponse {
    let document = match parse_query::<String>(query) {
        Ok(document) => document,
        Err(e) => {
            return ExecutionResponse::request_failed(ExecutionError::parse_error(format!(
                "Failed to parse query: {}",
                e
            )));
        }
    };

    let Some(operation) = document.definitions.iter().find_map(|definition| {
        if let Definition::Operation(operation) = definition {
            Some(operation)
        } else {
            None
        }
    }) else {
        return ExecutionResponse::request_failed(ExecutionError::validation(
            "No operation found in query document",
            vec![],
        ));
    };

    let selections = match operation {
        OperationDefinition::Query(query) => &query.selection_set.items,
        OperationDefinition::SelectionSet(selection_set) => &selection_set.items,
        OperationDefinition::Mutation(_) => {
            return ExecutionResponse::request_failed(ExecutionError::operation_not_supported(
                "Mutations are not supported",
            ));
        }
        OperationDefinition::Subscription(_) => {
            return ExecutionResponse::request_failed(ExecutionError::operation_not_supported(
                "Subscriptions are not supported",
            ));
        }
    };

    debug!(
        selections = selections.len(),
        variables = ctx.variables.len(),
        "executing query document"
    );

    let mut execution = Execution {
        schema,
        ctx,
        errors: Vec::new(),
    };

    let data = match execution
        .execute_selection_set(&ctx.root, &schema.query_type, selections, Vec::new())
        .await
    {
        Ok(Completed::Value(value)) => value,
        Ok(Completed::Poisoned) => Value::Null,
        Err(failure) => {
            execution.errors.push(failure.0);
            Value::Null
        }
    };

    ExecutionResponse {
        data,
        errors: execution.errors,
    }
}

/// A request-fatal failure: the query itself is malformed
struct RequestFailure(ExecutionError);

/// Outcome of completing a value against its declared type
enum Completed {
    Value(Value),
    /// A non-nullable position resolved to null; the parent must absorb it
    Poisoned,
}

/// State for one traversal: the bound schema, the request context, and the
/// errors collected so far in encounter order
struct Execution<'a> {
    schema: &'a BoundSchema,
    ctx: &'a ExecutionContext,
    errors: Vec<ExecutionError>,
}

impl<'a> Execution<'a> {
    /// Resolve a selection set against one parent value
    fn execute_selection_set<'s, 'doc: 's>(
        &'s mut self,
        parent: &'s Value,
        type_name: &'s str,
        selections: &'s [Selection<'doc, String>],
        path: Vec<PathSegment>,
    ) -> BoxFuture<'s, Result<Completed, RequestFailure>> {
        async move {
            let schema = self.schema;
            let ctx = self.ctx;

            let Some(bound_type) = schema.object_type(type_name) else {
                return Err(RequestFailure(ExecutionError::validation(
                    format!("Unknown type '{}'", type_name),
                    path,
                )));
            };

            let mut output = serde_json::Map::new();

            for selection in selections {
                let Selection::Field(field) = selection else {
                    // Fragments are outside this engine's query model.
                    continue;
                };

                let response_key = field.alias.clone().unwrap_or_else(|| field.name.clone());
                let mut field_path = path.clone();
                field_path.push(PathSegment::Field(response_key.clone()));

                let Some(bound_field) = bound_type.field(field.name.as_str()) else {
                    return Err(RequestFailure(ExecutionError::validation(
                        format!(
                            "Cannot query field '{}' on type '{}'",
                            field.name, type_name
                        ),
                        field_path,
                    )));
                };

                let args = coerce_arguments(&field.arguments, &ctx.variables);

                // Run the pipeline: each step consumes the previous step's
                // output, the first one gets the raw parent value. A step
                // error nullifies the field and is recorded, nothing more.
                let mut resolved: Option<Value> = None;
                let mut failed = false;
                for step in &bound_field.pipeline {
                    let input = resolved.as_ref().unwrap_or(parent);
                    match step.resolve(input, &args, ctx).await {
                        Ok(value) => resolved = Some(value),
                        Err(err) => {
                            debug!(field = %field.name, error = %err, "resolution step failed");
                            self.errors
                                .push(ExecutionError::from_field_error(&err, field_path.clone()));
                            resolved = Some(Value::Null);
                            failed = true;
                            break;
                        }
                    }
                }
                let value = resolved.unwrap_or(Value::Null);

                match self
                    .complete_value(
                        value,
                        &bound_field.definition.field_type,
                        &field.selection_set.items,
                        field_path,
                        failed,
                    )
                    .await?
                {
                    Completed::Value(completed) => {
                        output.insert(response_key, completed);
                    }
                    Completed::Poisoned => return Ok(Completed::Poisoned),
                }
            }

            Ok(Completed::Value(Value::Object(output)))
        }
        .boxed()
    }

    /// Complete a resolved value against its declared type
    ///
    /// `had_error` marks a null that already carries a recorded cause, so a
    /// non-null violation is not double-reported.
    fn complete_value<'s, 'doc: 's>(
        &'s mut self,
        value: Value,
        field_type: &'s TypeRef,
        selections: &'s [Selection<'doc, String>],
        path: Vec<PathSegment>,
        had_error: bool,
    ) -> BoxFuture<'s, Result<Completed, RequestFailure>> {
        async move {
            match field_type {
                TypeRef::Named { name, non_null } => {
                    if value.is_null() {
                        return Ok(self.nullified(
                            *non_null,
                            had_error,
                            &field_type.to_string(),
                            &path,
                        ));
                    }

                    if self.schema.is_scalar(name) {
                        if !selections.is_empty() {
                            return Err(RequestFailure(ExecutionError::validation(
                                format!(
                                    "Field of scalar type '{}' must not have a selection of subfields",
                                    name
                                ),
                                path,
                            )));
                        }
                        return Ok(Completed::Value(value));
                    }

                    if selections.is_empty() {
                        return Err(RequestFailure(ExecutionError::validation(
                            format!("Field of type '{}' must have a selection of subfields", name),
                            path,
                        )));
                    }

                    if !value.is_object() {
                        self.errors.push(ExecutionError::new(
                            format!("Expected an object for type '{}'", name),
                            "DATA_SHAPE_ERROR",
                            path.clone(),
                        ));
                        return Ok(self.nullified(
                            *non_null,
                            true,
                            &field_type.to_string(),
                            &path,
                        ));
                    }

                    match self
                        .execute_selection_set(&value, name, selections, path.clone())
                        .await?
                    {
                        Completed::Value(object) => Ok(Completed::Value(object)),
                        // A non-nullable child nullified this object; its
                        // cause is already recorded.
                        Completed::Poisoned => Ok(self.nullified(
                            *non_null,
                            true,
                            &field_type.to_string(),
                            &path,
                        )),
                    }
                }
                TypeRef::List { element, non_null } => {
                    if value.is_null() {
                        return Ok(self.nullified(
                            *non_null,
                            had_error,
                            &field_type.to_string(),
                            &path,
                        ));
                    }

                    let Value::Array(items) = value else {
                        self.errors.push(ExecutionError::new(
                            format!("Expected a list for type '{}'", field_type),
                            "DATA_SHAPE_ERROR",
                            path.clone(),
                        ));
                        return Ok(self.nullified(
                            *non_null,
                            true,
                            &field_type.to_string(),
                            &path,
                        ));
                    };

                    // Elements complete independently and in order; a
                    // poisoned element nullifies the whole list.
                    let mut completed_items = Vec::with_capacity(items.len());
                    let mut poisoned = false;
                    for (index, item) in items.into_iter().enumerate() {
                        let mut item_path = path.clone();
                        item_path.push(PathSegment::Index(index));

                        match self
                            .complete_value(item, element, selections, item_path, false)
                            .await?
                        {
                            Completed::Value(completed) => completed_items.push(completed),
                            Completed::Poisoned => {
                                poisoned = true;
                                break;
                            }
                        }
                    }

                    if poisoned {
                        return Ok(self.nullified(
                            *non_null,
                            true,
                            &field_type.to_string(),
                            &path,
                        ));
                    }

                    Ok(Completed::Value(Value::Array(completed_items)))
                }
            }
        }
        .boxed()
    }

    /// Express a null result under the position's nullability
    fn nullified(
        &mut self,
        non_null: bool,
        had_error: bool,
        type_display: &str,
        path: &[PathSegment],
    ) -> Completed {
        if non_null {
            if !had_error {
                self.errors
                    .push(ExecutionError::non_null_violation(type_display, path.to_vec()));
            }
            Completed::Poisoned
        } else {
            Completed::Value(Value::Null)
        }
    }
}

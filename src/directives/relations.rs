//! Relation-loading directives
//!
//! `@hasMany` and `@belongsTo` bind a field to the storage collaborator.
//! The relation name defaults to the field name and can be overridden with
//! the `relation` argument.

use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

use super::{ResolutionStep, StepFactory};
use crate::core::error::{BindError, FieldError};
use crate::executor::context::ExecutionContext;
use crate::schema::model::{DirectiveInvocation, FieldDefinition};
use crate::storage::{RelationKind, RelationLoader};

/// Loads the one-to-many relation named by the field
pub struct HasManyStep {
    relation: String,
    loader: Arc<dyn RelationLoader>,
}

#[async_trait]
impl ResolutionStep for HasManyStep {
    async fn resolve(
        &self,
        input: &Value,
        _args: &HashMap<String, Value>,
        _ctx: &ExecutionContext,
    ) -> Result<Value, FieldError> {
        self.loader
            .load_relation(input, &self.relation, RelationKind::ToMany)
            .await
            .map_err(FieldError::from)
    }
}

/// Loads the owning single related value
pub struct BelongsToStep {
    relation: String,
    loader: Arc<dyn RelationLoader>,
}

#[async_trait]
impl ResolutionStep for BelongsToStep {
    async fn resolve(
        &self,
        input: &Value,
        _args: &HashMap<String, Value>,
        _ctx: &ExecutionContext,
    ) -> Result<Value, FieldError> {
        self.loader
            .load_relation(input, &self.relation, RelationKind::ToOne)
            .await
            .map_err(FieldError::from)
    }
}

pub(crate) fn has_many_factory(loader: Arc<dyn RelationLoader>) -> StepFactory {
    Arc::new(move |invocation, field| {
        Ok(Arc::new(HasManyStep {
            relation: relation_name(invocation, field)?,
            loader: loader.clone(),
        }) as Arc<dyn ResolutionStep>)
    })
}

pub(crate) fn belongs_to_factory(loader: Arc<dyn RelationLoader>) -> StepFactory {
    Arc::new(move |invocation, field| {
        Ok(Arc::new(BelongsToStep {
            relation: relation_name(invocation, field)?,
            loader: loader.clone(),
        }) as Arc<dyn ResolutionStep>)
    })
}

/// The `relation` argument when present, the field name otherwise
fn relation_name(
    invocation: &DirectiveInvocation,
    field: &FieldDefinition,
) -> Result<String, BindError> {
    match invocation.argument("relation") {
        None => Ok(field.name.clone()),
        Some(Value::String(name)) => Ok(name.clone()),
        Some(other) => Err(BindError::InvalidArgument {
            directive: invocation.name.clone(),
            argument: "relation".to_string(),
            message: format!("expected a string, got {}", other),
        }),
    }
}

//! Directive registry and resolution steps
//!
//! A directive is a name bound to a factory producing [`ResolutionStep`]s.
//! The binder resolves every directive once at startup; nothing dispatches
//! by name at request time. Registering a new directive is the extension
//! point — the executor never changes.
//!
//! Steps compose left-to-right: each consumes the previous step's output,
//! the first one gets the raw parent value. Returning an error is the
//! short-circuit signal; the executor records it and nullifies the field.

mod auth;
mod relations;

use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

use crate::core::error::{BindError, FieldError};
use crate::core::value::camel_to_snake;
use crate::executor::context::ExecutionContext;
use crate::schema::model::{DirectiveInvocation, FieldDefinition};
use crate::storage::RelationLoader;

pub use auth::AuthStep;
pub use relations::{BelongsToStep, HasManyStep};

/// One stage of a field's resolution pipeline
///
/// Steps are pure with respect to request data: they read the context, they
/// never store it. A step built at bind time is shared by every request.
#[async_trait]
pub trait ResolutionStep: Send + Sync {
    async fn resolve(
        &self,
        input: &Value,
        args: &HashMap<String, Value>,
        ctx: &ExecutionContext,
    ) -> Result<Value, FieldError>;
}

/// Builds a resolution step for one directive invocation on one field
pub type StepFactory = Arc<
    dyn Fn(&DirectiveInvocation, &FieldDefinition) -> Result<Arc<dyn ResolutionStep>, BindError>
        + Send
        + Sync,
>;

/// Name-keyed mapping from directive to step factory
pub struct DirectiveRegistry {
    factories: HashMap<String, StepFactory>,
}

impl DirectiveRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }

    /// Create a registry with the built-in directives over the given loader
    ///
    /// Registers `hasMany`, `belongsTo` and `auth`.
    pub fn with_builtins(loader: Arc<dyn RelationLoader>) -> Self {
        let mut registry = Self::new();
        registry.register("hasMany", relations::has_many_factory(loader.clone()));
        registry.register("belongsTo", relations::belongs_to_factory(loader));
        registry.register("auth", auth::auth_factory());
        registry
    }

    /// Register a directive by name, replacing any previous registration
    pub fn register(&mut self, name: &str, factory: StepFactory) {
        self.factories.insert(name.to_string(), factory);
    }

    /// Resolve one directive invocation into a resolution step
    pub fn resolve(
        &self,
        invocation: &DirectiveInvocation,
        type_name: &str,
        field: &FieldDefinition,
    ) -> Result<Arc<dyn ResolutionStep>, BindError> {
        let factory =
            self.factories
                .get(&invocation.name)
                .ok_or_else(|| BindError::UnknownDirective {
                    directive: invocation.name.clone(),
                    type_name: type_name.to_string(),
                    field: field.name.clone(),
                })?;

        factory(invocation, field)
    }

    /// Whether a directive name is registered
    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }
}

impl Default for DirectiveRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Default accessor: read the same-named attribute off the parent value
///
/// Used for every field without directives. Falls back to the snake_case
/// spelling so `createdAt` finds a `created_at` attribute; missing
/// attributes resolve to null.
pub struct AttributeStep {
    attribute: String,
    snake_case: String,
}

impl AttributeStep {
    pub fn new(attribute: &str) -> Self {
        Self {
            attribute: attribute.to_string(),
            snake_case: camel_to_snake(attribute),
        }
    }
}

#[async_trait]
impl ResolutionStep for AttributeStep {
    async fn resolve(
        &self,
        input: &Value,
        _args: &HashMap<String, Value>,
        _ctx: &ExecutionContext,
    ) -> Result<Value, FieldError> {
        let Some(object) = input.as_object() else {
            return Ok(Value::Null);
        };

        Ok(object
            .get(&self.attribute)
            .or_else(|| object.get(&self.snake_case))
            .cloned()
            .unwrap_or(Value::Null))
    }
}

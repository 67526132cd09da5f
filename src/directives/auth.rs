//! The `@auth` directive
//!
//! Guards a field on the presence of an actor in the execution context.
//! When an actor is present, the actor itself becomes the field's value,
//! which is how root fields resolve "the current user".

use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

use super::{ResolutionStep, StepFactory};
use crate::core::error::FieldError;
use crate::executor::context::ExecutionContext;

/// Short-circuits with an authorization error when no actor is present
pub struct AuthStep;

#[async_trait]
impl ResolutionStep for AuthStep {
    async fn resolve(
        &self,
        _input: &Value,
        _args: &HashMap<String, Value>,
        ctx: &ExecutionContext,
    ) -> Result<Value, FieldError> {
        match &ctx.actor {
            Some(actor) => Ok(actor.clone()),
            None => Err(FieldError::unauthenticated()),
        }
    }
}

pub(crate) fn auth_factory() -> StepFactory {
    Arc::new(|_invocation, _field| Ok(Arc::new(AuthStep) as Arc<dyn ResolutionStep>))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn no_args() -> HashMap<String, Value> {
        HashMap::new()
    }

    #[tokio::test]
    async fn test_auth_with_actor_yields_actor() {
        let step = AuthStep;
        let ctx = ExecutionContext::new(
            Value::Null,
            Some(json!({"id": "u1", "email": "x@y.com"})),
            HashMap::new(),
        );

        let value = step.resolve(&Value::Null, &no_args(), &ctx).await.unwrap();
        assert_eq!(value, json!({"id": "u1", "email": "x@y.com"}));
    }

    #[tokio::test]
    async fn test_auth_without_actor_short_circuits() {
        let step = AuthStep;
        let ctx = ExecutionContext::anonymous();

        let err = step
            .resolve(&Value::Null, &no_args(), &ctx)
            .await
            .expect_err("absent actor should short-circuit");
        assert_eq!(err.error_code(), "UNAUTHORIZED");
    }
}

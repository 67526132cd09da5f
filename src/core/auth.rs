//! Actor identity for query execution
//!
//! The engine never authenticates anything itself. Whatever session mechanism
//! fronts the engine implements [`ActorProvider`] and hands over the current
//! actor (an opaque JSON value, typically the logged-in user record) when an
//! execution context is built. The `@auth` directive only checks presence.

use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;

/// Supplies the current actor at execution-context construction time
#[async_trait]
pub trait ActorProvider: Send + Sync {
    /// Resolve the actor for the request being served, if any
    async fn current_actor(&self) -> Result<Option<Value>>;
}

/// Provider that never yields an actor (public access, development)
pub struct NoActorProvider;

#[async_trait]
impl ActorProvider for NoActorProvider {
    async fn current_actor(&self) -> Result<Option<Value>> {
        Ok(None)
    }
}

/// Provider with a fixed actor, for tests and single-tenant tools
pub struct StaticActorProvider {
    actor: Value,
}

impl StaticActorProvider {
    pub fn new(actor: Value) -> Self {
        Self { actor }
    }
}

#[async_trait]
impl ActorProvider for StaticActorProvider {
    async fn current_actor(&self) -> Result<Option<Value>> {
        Ok(Some(self.actor.clone()))
    }
}

//! # Beacon
//!
//! A directive-driven GraphQL execution engine. Schemas declare behavior
//! instead of code: fields annotated with `@hasMany`, `@belongsTo` or
//! `@auth` resolve through pipelines composed at bind time, so a schema
//! needs no hand-written resolvers at all.
//!
//! ## Features
//!
//! - **Declarative Resolution**: Directives bind fields to data access and
//!   access control
//! - **Bind Once, Execute Many**: Directive lookup happens at startup; the
//!   bound schema is immutable and shared across concurrent requests
//! - **Pluggable Directives**: Register new directives without touching the
//!   executor
//! - **Storage Agnostic**: Relations load through a narrow collaborator
//!   trait; an in-memory store ships for tests and development
//! - **Faithful Error Model**: Null-bubbling, per-field isolation, and a
//!   response that always carries `data` and `errors`
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use beacon::prelude::*;
//!
//! let store = Arc::new(InMemoryRelationStore::new());
//! let registry = DirectiveRegistry::with_builtins(store.clone());
//!
//! let engine = Engine::from_sdl(
//!     r#"
//!     type User {
//!         email: String!
//!         tasks: [Task!]! @hasMany
//!     }
//!     type Task { name: String! }
//!     type Query { user: User @auth }
//!     "#,
//!     &registry,
//! )?;
//!
//! let ctx = ExecutionContext::with_actor(user_json);
//! let response = engine.execute("{ user { email tasks { name } } }", &ctx).await;
//! ```

pub mod config;
pub mod core;
pub mod directives;
pub mod engine;
pub mod executor;
pub mod schema;
pub mod server;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core Traits ===
    pub use crate::core::{
        auth::{ActorProvider, NoActorProvider, StaticActorProvider},
        error::{BindError, ConfigError, DataAccessError, EngineError, FieldError, SchemaError},
    };

    // === Schema ===
    pub use crate::schema::{
        BoundField, BoundSchema, BoundType, DirectiveInvocation, FieldDefinition, SchemaModel,
        SchemaType, TypeRef, bind,
    };

    // === Directives ===
    pub use crate::directives::{
        AttributeStep, AuthStep, BelongsToStep, DirectiveRegistry, HasManyStep, ResolutionStep,
        StepFactory,
    };

    // === Execution ===
    pub use crate::engine::Engine;
    pub use crate::executor::{
        ExecutionContext, ExecutionError, ExecutionResponse, PathSegment, execute,
    };

    // === Storage ===
    pub use crate::storage::{InMemoryRelationStore, RelationKind, RelationLoader};

    // === Config ===
    pub use crate::config::{EngineConfig, SchemaSource};

    // === Server ===
    pub use crate::server::{EngineState, GraphQLExposure};

    // === External dependencies ===
    pub use anyhow::Result;
    pub use async_trait::async_trait;
    pub use serde::{Deserialize, Serialize};
    pub use serde_json::{Value, json};
    pub use std::sync::Arc;
    pub use uuid::Uuid;
}

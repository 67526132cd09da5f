//! Core module containing fundamental traits and types for the engine

pub mod auth;
pub mod error;
pub mod value;

pub use auth::{ActorProvider, NoActorProvider, StaticActorProvider};
pub use error::{
    BindError, ConfigError, DataAccessError, EngineError, FieldError, SchemaError,
};

//! Typed error handling for the beacon engine
//!
//! Build-time and request-time failures are kept strictly apart. Everything
//! that can go wrong while parsing or binding a schema is fatal at startup
//! and never reaches a live request:
//!
//! - [`SchemaError`]: the schema text is malformed or inconsistent
//! - [`BindError`]: a directive cannot be resolved against the registry
//! - [`ConfigError`]: the engine configuration cannot be loaded
//!
//! Request-time failures are recoverable per field and are collected into the
//! response's `errors` sequence instead of being thrown:
//!
//! - [`FieldError`]: a resolution step short-circuited (authorization denied,
//!   relation loading failed)
//!
//! # Example
//!
//! ```rust,ignore
//! use beacon::prelude::*;
//!
//! match Engine::from_sdl(sdl, &registry) {
//!     Ok(engine) => { /* serve */ }
//!     Err(EngineError::Bind(BindError::UnknownDirective { directive, .. })) => {
//!         eprintln!("schema uses @{} but nothing registered it", directive);
//!     }
//!     Err(e) => eprintln!("engine startup failed: {}", e),
//! }
//! ```

use std::fmt;
use thiserror::Error;

/// The main build-time error type for the beacon engine
///
/// Aggregates every failure that can abort engine construction. Each variant
/// wraps the more specific error for that stage.
#[derive(Debug)]
pub enum EngineError {
    /// Schema parsing or validation failed
    Schema(SchemaError),

    /// Directive binding failed
    Bind(BindError),

    /// Configuration loading failed
    Config(ConfigError),
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::Schema(e) => write!(f, "{}", e),
            EngineError::Bind(e) => write!(f, "{}", e),
            EngineError::Config(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for EngineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            EngineError::Schema(e) => Some(e),
            EngineError::Bind(e) => Some(e),
            EngineError::Config(e) => Some(e),
        }
    }
}

impl From<SchemaError> for EngineError {
    fn from(err: SchemaError) -> Self {
        EngineError::Schema(err)
    }
}

impl From<BindError> for EngineError {
    fn from(err: BindError) -> Self {
        EngineError::Bind(err)
    }
}

impl From<ConfigError> for EngineError {
    fn from(err: ConfigError) -> Self {
        EngineError::Config(err)
    }
}

// =============================================================================
// Schema Errors
// =============================================================================

/// Errors raised while parsing and validating a schema definition
#[derive(Debug)]
pub enum SchemaError {
    /// The schema text is not valid GraphQL SDL
    Syntax { message: String },

    /// A field references a type name that is neither defined nor a scalar
    UnknownType {
        type_name: String,
        field: String,
        owner: String,
    },

    /// Two type definitions share the same name
    DuplicateType { type_name: String },

    /// The schema does not define a root query type
    MissingQueryRoot { expected: String },
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchemaError::Syntax { message } => {
                write!(f, "Failed to parse schema: {}", message)
            }
            SchemaError::UnknownType {
                type_name,
                field,
                owner,
            } => {
                write!(
                    f,
                    "Unknown type '{}' referenced by field '{}.{}'",
                    type_name, owner, field
                )
            }
            SchemaError::DuplicateType { type_name } => {
                write!(f, "Type '{}' is defined more than once", type_name)
            }
            SchemaError::MissingQueryRoot { expected } => {
                write!(f, "Schema does not define a '{}' root type", expected)
            }
        }
    }
}

impl std::error::Error for SchemaError {}

// =============================================================================
// Bind Errors
// =============================================================================

/// Errors raised while composing resolver pipelines from directives
#[derive(Debug)]
pub enum BindError {
    /// A field uses a directive name absent from the registry
    UnknownDirective {
        directive: String,
        type_name: String,
        field: String,
    },

    /// A directive argument has the wrong shape
    InvalidArgument {
        directive: String,
        argument: String,
        message: String,
    },
}

impl fmt::Display for BindError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BindError::UnknownDirective {
                directive,
                type_name,
                field,
            } => {
                write!(
                    f,
                    "Unknown directive '@{}' on field '{}.{}'",
                    directive, type_name, field
                )
            }
            BindError::InvalidArgument {
                directive,
                argument,
                message,
            } => {
                write!(
                    f,
                    "Invalid argument '{}' for directive '@{}': {}",
                    argument, directive, message
                )
            }
        }
    }
}

impl std::error::Error for BindError {}

// =============================================================================
// Field Errors (request-time, recoverable)
// =============================================================================

/// A resolution step short-circuited
///
/// Field errors never abort the request. The executor records them in the
/// response's `errors` sequence, nullifies the field, and lets nullability
/// rules decide how far the null propagates.
#[derive(Debug)]
pub enum FieldError {
    /// The execution context carries no actor
    Authorization { message: String },

    /// The storage collaborator failed to load a relation
    DataAccess(DataAccessError),
}

impl FieldError {
    /// Machine-readable code surfaced under `extensions.code`
    pub fn error_code(&self) -> &'static str {
        match self {
            FieldError::Authorization { .. } => "UNAUTHORIZED",
            FieldError::DataAccess(_) => "DATA_ACCESS_ERROR",
        }
    }

    /// Authorization failure with the conventional message
    pub fn unauthenticated() -> Self {
        FieldError::Authorization {
            message: "Request is not authenticated".to_string(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldError::Authorization { message } => write!(f, "Unauthorized: {}", message),
            FieldError::DataAccess(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for FieldError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FieldError::Authorization { .. } => None,
            FieldError::DataAccess(e) => Some(e),
        }
    }
}

impl From<DataAccessError> for FieldError {
    fn from(err: DataAccessError) -> Self {
        FieldError::DataAccess(err)
    }
}

/// A relation could not be loaded from the storage collaborator
#[derive(Debug)]
pub struct DataAccessError {
    pub relation: String,
    pub message: String,
}

impl fmt::Display for DataAccessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Failed to load relation '{}': {}",
            self.relation, self.message
        )
    }
}

impl std::error::Error for DataAccessError {}

// =============================================================================
// Config Errors
// =============================================================================

/// Errors related to engine configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Failed to read schema file '{path}': {source}")]
    SchemaIo {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

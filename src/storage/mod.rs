//! Storage collaborator interface for relation loading
//!
//! The engine never talks to a database itself. Relation-loading directives
//! delegate to a [`RelationLoader`] supplied at registry construction; the
//! loader's concurrency and timeout policy is its own responsibility.

pub mod in_memory;

use async_trait::async_trait;
use serde_json::Value;

use crate::core::error::DataAccessError;

pub use in_memory::InMemoryRelationStore;

/// Cardinality of a relation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelationKind {
    /// The parent owns at most one related value
    ToOne,
    /// The parent owns an ordered collection of related values
    ToMany,
}

/// Loads related values for a parent value
///
/// A to-many load yields an ordered JSON array; a to-one load yields a single
/// value, or null when the related value is absent.
#[async_trait]
pub trait RelationLoader: Send + Sync {
    async fn load_relation(
        &self,
        parent: &Value,
        relation: &str,
        kind: RelationKind,
    ) -> Result<Value, DataAccessError>;
}

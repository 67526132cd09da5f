//! In-memory implementation of RelationLoader for testing and development

use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use uuid::Uuid;

use super::{RelationKind, RelationLoader};
use crate::core::error::DataAccessError;

/// In-memory relation store
///
/// Useful for testing and development. Relations are keyed by parent id and
/// relation name; values keep insertion order. Uses RwLock for thread-safe
/// access.
#[derive(Clone)]
pub struct InMemoryRelationStore {
    relations: Arc<RwLock<HashMap<(Uuid, String), Vec<Value>>>>,
}

impl InMemoryRelationStore {
    /// Create a new in-memory relation store
    pub fn new() -> Self {
        Self {
            relations: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Record a related value for a parent
    ///
    /// Repeated calls append; a to-many load returns values in the order
    /// they were related, a to-one load returns the first.
    pub fn relate(&self, parent_id: Uuid, relation: &str, value: Value) {
        let mut relations = self.relations.write().expect("lock poisoned");
        relations
            .entry((parent_id, relation.to_string()))
            .or_default()
            .push(value);
    }

    fn parent_id(parent: &Value, relation: &str) -> Result<Uuid, DataAccessError> {
        let id = parent
            .get("id")
            .and_then(|v| v.as_str())
            .ok_or_else(|| DataAccessError {
                relation: relation.to_string(),
                message: "parent value has no 'id' attribute".to_string(),
            })?;

        Uuid::parse_str(id).map_err(|e| DataAccessError {
            relation: relation.to_string(),
            message: format!("parent id '{}' is not a valid UUID: {}", id, e),
        })
    }
}

impl Default for InMemoryRelationStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RelationLoader for InMemoryRelationStore {
    async fn load_relation(
        &self,
        parent: &Value,
        relation: &str,
        kind: RelationKind,
    ) -> Result<Value, DataAccessError> {
        let parent_id = Self::parent_id(parent, relation)?;

        let relations = self.relations.read().map_err(|e| DataAccessError {
            relation: relation.to_string(),
            message: format!("failed to acquire read lock: {}", e),
        })?;

        let related = relations.get(&(parent_id, relation.to_string()));

        match kind {
            RelationKind::ToMany => Ok(Value::Array(related.cloned().unwrap_or_default())),
            RelationKind::ToOne => Ok(related
                .and_then(|values| values.first())
                .cloned()
                .unwrap_or(Value::Null)),
        }
    }
}

//! Per-request execution state

use serde_json::Value;
use std::collections::HashMap;

/// State for one query execution
///
/// Created fresh per request and never mutated afterwards; the executor and
/// every resolution step share it by reference. Nothing request-scoped is
/// ever captured at bind time, so one bound schema serves any number of
/// concurrent contexts.
pub struct ExecutionContext {
    /// Root value the first selection set resolves against
    pub root: Value,

    /// Current actor, absent for unauthenticated requests
    pub actor: Option<Value>,

    /// Variable bindings for the query document
    pub variables: HashMap<String, Value>,
}

impl ExecutionContext {
    pub fn new(root: Value, actor: Option<Value>, variables: HashMap<String, Value>) -> Self {
        Self {
            root,
            actor,
            variables,
        }
    }

    /// Context with no root value, no actor and no variables
    pub fn anonymous() -> Self {
        Self::new(Value::Null, None, HashMap::new())
    }

    /// Context carrying only an actor
    pub fn with_actor(actor: Value) -> Self {
        Self::new(Value::Null, Some(actor), HashMap::new())
    }
}

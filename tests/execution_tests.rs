//! End-to-end tests for directive-driven query execution
//!
//! These tests run complete scenarios through the engine: schema text in,
//! response tree out, with relations served by the in-memory store and the
//! actor supplied through the execution context.

use beacon::prelude::*;
use std::collections::HashMap;
use uuid::Uuid;

// =============================================================================
// Fixtures
// =============================================================================

const SCHEMA: &str = r#"
type User {
    id: ID!
    email: String!
    tasks: [Task!]! @hasMany
}
type Task {
    id: ID!
    name: String!
    user: User! @belongsTo
}
type Query {
    user: User @auth
}
"#;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("beacon=debug")
        .try_init();
}

/// A user with the given number of tasks named "T0".."Tn"
fn user_with_tasks(store: &InMemoryRelationStore, task_count: usize) -> Value {
    let user_id = Uuid::new_v4();
    let user = json!({"id": user_id.to_string(), "email": "x@y.com"});

    for i in 0..task_count {
        store.relate(
            user_id,
            "tasks",
            json!({"id": Uuid::new_v4().to_string(), "name": format!("T{}", i)}),
        );
    }

    user
}

fn engine_with_store() -> (Engine, Arc<InMemoryRelationStore>) {
    let store = Arc::new(InMemoryRelationStore::new());
    let registry = DirectiveRegistry::with_builtins(store.clone());
    let engine = Engine::from_sdl(SCHEMA, &registry).expect("engine should build");
    (engine, store)
}

// =============================================================================
// The full scenario: @auth root, plain accessors, @hasMany relation
// =============================================================================

#[tokio::test]
async fn test_user_with_tasks_scenario() {
    init_tracing();
    let (engine, store) = engine_with_store();

    let user_id = Uuid::new_v4();
    let user = json!({"id": user_id.to_string(), "email": "x@y.com"});
    store.relate(user_id, "tasks", json!({"name": "A"}));
    store.relate(user_id, "tasks", json!({"name": "B"}));

    let ctx = ExecutionContext::with_actor(user);
    let response = engine
        .execute("{ user { email tasks { name } } }", &ctx)
        .await;

    assert_eq!(
        serde_json::to_value(&response).expect("response should serialize"),
        json!({
            "data": {
                "user": {
                    "email": "x@y.com",
                    "tasks": [{"name": "A"}, {"name": "B"}]
                }
            },
            "errors": []
        })
    );
}

// =============================================================================
// Plain accessor fields
// =============================================================================

#[tokio::test]
async fn test_defined_fields_match_parent_attributes_exactly() {
    let (engine, store) = engine_with_store();
    let user = user_with_tasks(&store, 0);

    let ctx = ExecutionContext::with_actor(user.clone());
    let response = engine.execute("{ user { id email } }", &ctx).await;

    assert!(response.errors.is_empty(), "errors: {:?}", response.errors);
    assert_eq!(
        response.data["user"]["id"],
        user["id"],
        "id should pass through untouched"
    );
    assert_eq!(response.data["user"]["email"], user["email"]);
}

#[tokio::test]
async fn test_aliased_fields_rename_response_keys() {
    let (engine, _store) = engine_with_store();

    let ctx = ExecutionContext::with_actor(json!({
        "id": Uuid::new_v4().to_string(),
        "email": "a@b.com"
    }));
    let response = engine.execute("{ u: user { e: email } }", &ctx).await;

    assert!(response.errors.is_empty(), "errors: {:?}", response.errors);
    assert_eq!(response.data, json!({"u": {"e": "a@b.com"}}));
}

// =============================================================================
// @hasMany
// =============================================================================

#[tokio::test]
async fn test_has_many_matches_store_order_and_length() {
    for count in [0usize, 1, 5] {
        let (engine, store) = engine_with_store();
        let user = user_with_tasks(&store, count);

        let ctx = ExecutionContext::with_actor(user);
        let response = engine.execute("{ user { tasks { name } } }", &ctx).await;

        assert!(response.errors.is_empty(), "errors: {:?}", response.errors);
        let tasks = response.data["user"]["tasks"]
            .as_array()
            .expect("tasks should be a list");
        assert_eq!(tasks.len(), count, "length should match the relation");

        let names: Vec<String> = tasks
            .iter()
            .map(|t| t["name"].as_str().expect("name should be a string").to_string())
            .collect();
        let expected: Vec<String> = (0..count).map(|i| format!("T{}", i)).collect();
        assert_eq!(names, expected, "order should match the store");
    }
}

// =============================================================================
// @belongsTo and null-bubbling
// =============================================================================

const TASK_SCHEMA_NULLABLE: &str = r#"
type User { email: String! }
type Task {
    id: ID!
    name: String!
    user: User @belongsTo
}
type Query { task: Task }
"#;

const TASK_SCHEMA_NON_NULL: &str = r#"
type User { email: String! }
type Task {
    id: ID!
    name: String!
    user: User! @belongsTo
}
type Query { task: Task }
"#;

#[tokio::test]
async fn test_belongs_to_absent_is_null_when_nullable() {
    let store = Arc::new(InMemoryRelationStore::new());
    let registry = DirectiveRegistry::with_builtins(store.clone());
    let engine = Engine::from_sdl(TASK_SCHEMA_NULLABLE, &registry).expect("engine should build");

    let task = json!({"id": Uuid::new_v4().to_string(), "name": "orphan"});
    let ctx = ExecutionContext::new(json!({"task": task}), None, HashMap::new());

    let response = engine
        .execute("{ task { name user { email } } }", &ctx)
        .await;

    assert!(response.errors.is_empty(), "errors: {:?}", response.errors);
    assert_eq!(response.data, json!({"task": {"name": "orphan", "user": null}}));
}

#[tokio::test]
async fn test_belongs_to_absent_poisons_parent_when_non_null() {
    let store = Arc::new(InMemoryRelationStore::new());
    let registry = DirectiveRegistry::with_builtins(store.clone());
    let engine = Engine::from_sdl(TASK_SCHEMA_NON_NULL, &registry).expect("engine should build");

    let task = json!({"id": Uuid::new_v4().to_string(), "name": "orphan"});
    let ctx = ExecutionContext::new(json!({"task": task}), None, HashMap::new());

    let response = engine
        .execute("{ task { name user { email } } }", &ctx)
        .await;

    assert_eq!(
        response.data,
        json!({"task": null}),
        "non-null user should poison the task object"
    );
    assert_eq!(response.errors.len(), 1);
    assert_eq!(response.errors[0].extensions.code, "NON_NULL_VIOLATION");
}

#[tokio::test]
async fn test_belongs_to_present_resolves_owner() {
    let store = Arc::new(InMemoryRelationStore::new());
    let registry = DirectiveRegistry::with_builtins(store.clone());
    let engine = Engine::from_sdl(TASK_SCHEMA_NON_NULL, &registry).expect("engine should build");

    let task_id = Uuid::new_v4();
    store.relate(task_id, "user", json!({"email": "owner@y.com"}));
    let task = json!({"id": task_id.to_string(), "name": "owned"});
    let ctx = ExecutionContext::new(json!({"task": task}), None, HashMap::new());

    let response = engine.execute("{ task { user { email } } }", &ctx).await;

    assert!(response.errors.is_empty(), "errors: {:?}", response.errors);
    assert_eq!(
        response.data,
        json!({"task": {"user": {"email": "owner@y.com"}}})
    );
}

// =============================================================================
// @auth
// =============================================================================

#[tokio::test]
async fn test_auth_with_absent_actor_yields_null_and_one_error() {
    let (engine, _store) = engine_with_store();
    let ctx = ExecutionContext::anonymous();

    let response = engine.execute("{ user { email } }", &ctx).await;

    assert_eq!(response.data, json!({"user": null}));
    assert_eq!(response.errors.len(), 1, "exactly one authorization error");
    assert_eq!(response.errors[0].extensions.code, "UNAUTHORIZED");
}

#[tokio::test]
async fn test_auth_with_present_actor_yields_actor_value() {
    let (engine, _store) = engine_with_store();

    let ctx = ExecutionContext::with_actor(json!({
        "id": Uuid::new_v4().to_string(),
        "email": "me@y.com"
    }));
    let response = engine.execute("{ user { email } }", &ctx).await;

    assert!(response.errors.is_empty(), "errors: {:?}", response.errors);
    assert_eq!(response.data, json!({"user": {"email": "me@y.com"}}));
}

// =============================================================================
// Bind-time failures never reach execution
// =============================================================================

#[tokio::test]
async fn test_unregistered_directive_fails_at_bind_time() {
    // A registry without the relation directives: binding must fail before
    // any query could run.
    let registry = DirectiveRegistry::new();
    let result = Engine::from_sdl(SCHEMA, &registry);

    match result {
        Err(EngineError::Bind(BindError::UnknownDirective { directive, .. })) => {
            assert!(["hasMany", "belongsTo", "auth"].contains(&directive.as_str()));
        }
        other => panic!("expected bind-time failure, got {:?}", other.err()),
    }
}

// =============================================================================
// Storage failures are per-field and isolated
// =============================================================================

/// Loader that fails every load, to exercise the data-access error path
struct FailingLoader;

#[async_trait]
impl RelationLoader for FailingLoader {
    async fn load_relation(
        &self,
        _parent: &Value,
        relation: &str,
        _kind: RelationKind,
    ) -> std::result::Result<Value, DataAccessError> {
        Err(DataAccessError {
            relation: relation.to_string(),
            message: "backend unavailable".to_string(),
        })
    }
}

#[tokio::test]
async fn test_data_access_failure_nullifies_and_bubbles() {
    let registry = DirectiveRegistry::with_builtins(Arc::new(FailingLoader));
    let engine = Engine::from_sdl(SCHEMA, &registry).expect("engine should build");

    let ctx = ExecutionContext::with_actor(json!({
        "id": Uuid::new_v4().to_string(),
        "email": "x@y.com"
    }));
    let response = engine
        .execute("{ user { email tasks { name } } }", &ctx)
        .await;

    // tasks is [Task!]!, so the failed load poisons the user object; user
    // itself is nullable and absorbs the null.
    assert_eq!(response.data, json!({"user": null}));
    assert_eq!(response.errors.len(), 1);
    assert_eq!(response.errors[0].extensions.code, "DATA_ACCESS_ERROR");
}

#[tokio::test]
async fn test_data_access_failure_does_not_abort_siblings() {
    const SIBLING_SCHEMA: &str = r#"
    type Task { name: String! }
    type User {
        email: String!
        tasks: [Task!] @hasMany
    }
    type Query { user: User @auth }
    "#;

    let registry = DirectiveRegistry::with_builtins(Arc::new(FailingLoader));
    let engine = Engine::from_sdl(SIBLING_SCHEMA, &registry).expect("engine should build");

    let ctx = ExecutionContext::with_actor(json!({
        "id": Uuid::new_v4().to_string(),
        "email": "x@y.com"
    }));
    let response = engine
        .execute("{ user { email tasks { name } } }", &ctx)
        .await;

    // tasks is nullable here, so only the field nullifies; email survives.
    assert_eq!(
        response.data,
        json!({"user": {"email": "x@y.com", "tasks": null}})
    );
    assert_eq!(response.errors.len(), 1);
}

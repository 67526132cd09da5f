//! End-to-end tests through the HTTP exposure
//!
//! These tests verify the complete flow from HTTP request to response:
//! request body in, `{data, errors}` body out, actor supplied by the
//! configured provider, relations served by the in-memory store.

use axum_test::TestServer;
use beacon::prelude::*;
use uuid::Uuid;

const SCHEMA: &str = r#"
type User {
    id: ID!
    email: String!
    tasks: [Task!]! @hasMany
}
type Task {
    name: String!
}
type Query {
    user: User @auth
}
"#;

fn build_server(actors: Arc<dyn ActorProvider>, store: Arc<InMemoryRelationStore>) -> TestServer {
    let registry = DirectiveRegistry::with_builtins(store);
    let engine = Engine::from_sdl(SCHEMA, &registry).expect("engine should build");
    let state = Arc::new(EngineState { engine, actors });
    TestServer::new(GraphQLExposure::build_router(state))
}

#[tokio::test]
async fn test_authenticated_query_over_http() {
    let store = Arc::new(InMemoryRelationStore::new());
    let user_id = Uuid::new_v4();
    store.relate(user_id, "tasks", json!({"name": "A"}));
    store.relate(user_id, "tasks", json!({"name": "B"}));

    let actor = json!({"id": user_id.to_string(), "email": "x@y.com"});
    let server = build_server(Arc::new(StaticActorProvider::new(actor)), store);

    let response = server
        .post("/graphql")
        .json(&json!({"query": "{ user { email tasks { name } } }"}))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(
        body,
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

#[tokio::test]
async fn test_anonymous_query_over_http_reports_error_in_body() {
    let store = Arc::new(InMemoryRelationStore::new());
    let server = build_server(Arc::new(NoActorProvider), store);

    let response = server
        .post("/graphql")
        .json(&json!({"query": "{ user { email } }"}))
        .await;

    // Partial failure is still HTTP 200; the error lives in the body.
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["data"], json!({"user": null}));
    assert_eq!(body["errors"][0]["extensions"]["code"], json!("UNAUTHORIZED"));
    assert_eq!(body["errors"][0]["path"], json!(["user"]));
}

#[tokio::test]
async fn test_malformed_query_over_http_is_still_200() {
    let store = Arc::new(InMemoryRelationStore::new());
    let server = build_server(Arc::new(NoActorProvider), store);

    let response = server
        .post("/graphql")
        .json(&json!({"query": "this is not graphql {{"}))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["data"], Value::Null);
    assert_eq!(
        body["errors"][0]["extensions"]["code"],
        json!("GRAPHQL_PARSE_ERROR")
    );
}

//! HTTP exposure for the engine
//!
//! A deliberately thin layer: one `POST /graphql` route that deserializes
//! the standard request body, builds an execution context from the actor
//! provider, and returns the executor's `{data, errors}` body. Always
//! HTTP 200 — partial failure lives in `errors`, not in the status code.

use axum::{
    Json, Router,
    extract::Extension,
    response::IntoResponse,
    routing::post,
};
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::core::auth::ActorProvider;
use crate::engine::Engine;
use crate::executor::context::ExecutionContext;

/// Shared state for the GraphQL route
pub struct EngineState {
    pub engine: Engine,
    pub actors: Arc<dyn ActorProvider>,
}

#[derive(Debug, Deserialize)]
struct GraphQLRequestBody {
    query: String,
    variables: Option<HashMap<String, Value>>,
    #[allow(dead_code)]
    operation_name: Option<String>,
}

/// GraphQL API exposure
pub struct GraphQLExposure;

impl GraphQLExposure {
    /// Build the GraphQL router over an engine and actor provider
    pub fn build_router(state: Arc<EngineState>) -> Router {
        Router::new()
            .route("/graphql", post(graphql_handler))
            .layer(TraceLayer::new_for_http())
            .layer(Extension(state))
    }
}

/// Handler for GraphQL queries
async fn graphql_handler(
    Extension(state): Extension<Arc<EngineState>>,
    Json(request): Json<GraphQLRequestBody>,
) -> impl IntoResponse {
    // A failing actor provider degrades to an anonymous request; @auth
    // fields then answer with their usual authorization error.
    let actor = match state.actors.current_actor().await {
        Ok(actor) => actor,
        Err(e) => {
            warn!(error = %e, "actor provider failed, treating request as anonymous");
            None
        }
    };

    let ctx = ExecutionContext::new(Value::Null, actor, request.variables.unwrap_or_default());

    Json(state.engine.execute(&request.query, &ctx).await)
}

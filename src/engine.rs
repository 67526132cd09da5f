//! Engine facade: parse once, bind once, execute many
//!
//! The engine owns the bound schema behind an `Arc`, so it is cheap to clone
//! and safe to share across tasks. Construction is the startup-fatal part;
//! execution never fails past the response's `errors` sequence.

use std::sync::Arc;
use tracing::info;

use crate::config::EngineConfig;
use crate::core::error::EngineError;
use crate::directives::DirectiveRegistry;
use crate::executor;
use crate::executor::context::ExecutionContext;
use crate::executor::response::ExecutionResponse;
use crate::schema::bind::{BoundSchema, bind};
use crate::schema::model::SchemaModel;

/// A schema bound and ready to serve queries
#[derive(Clone)]
pub struct Engine {
    schema: Arc<BoundSchema>,
}

impl Engine {
    /// Parse a schema definition and bind it against the registry
    ///
    /// Any schema or directive problem surfaces here, at startup, never at
    /// request time.
    pub fn from_sdl(sdl: &str, registry: &DirectiveRegistry) -> Result<Self, EngineError> {
        let model = SchemaModel::parse(sdl)?;
        let schema = bind(&model, registry)?;

        info!(
            types = schema.types.len(),
            query_type = %schema.query_type,
            "engine ready"
        );

        Ok(Self {
            schema: Arc::new(schema),
        })
    }

    /// Load the schema source from configuration, then build as `from_sdl`
    pub fn from_config(
        config: &EngineConfig,
        registry: &DirectiveRegistry,
    ) -> Result<Self, EngineError> {
        let sdl = config.schema.load()?;
        Self::from_sdl(&sdl, registry)
    }

    /// Execute one query document
    pub async fn execute(&self, query: &str, ctx: &ExecutionContext) -> ExecutionResponse {
        executor::execute(&self.schema, query, ctx).await
    }

    /// The bound schema this engine serves
    pub fn schema(&self) -> &BoundSchema {
        &self.schema
    }
}

use async_trait::async_trait;
use axum::Router;

/// What a module sees while it is brought up
pub struct InitCtx<'a> {
    pub settings: &'a crate::settings::Settings,
}

/// One SQL script, applied once and recorded under `id`
#[derive(Debug, Clone)]
pub struct Migration {
    pub id: &'static str,
    pub up: &'static str,
}

/// A feature area of the server: its routes, schema and lifecycle hooks.
///
/// Only `name` is required. The registry drives the hooks in order:
/// migrations, `init`, `start`, then `stop` on shutdown.
#[async_trait]
pub trait Module: Sync + Send {
    /// Mount point and log label, unique per registry
    fn name(&self) -> &'static str;

    /// Runs once the schema is migrated
    async fn init(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        Ok(())
    }

    /// Mounted under `/{name}`
    fn routes(&self) -> Router {
        Router::new()
    }

    /// `paths` and `components` to merge into `/docs/openapi.json`.
    /// Paths are relative to the mount point.
    fn openapi(&self) -> Option<serde_json::Value> {
        None
    }

    /// Schema scripts, applied sorted by id
    fn migrations(&self) -> Vec<Migration> {
        vec![]
    }

    /// Hook for work that must run alongside the server, such as a
    /// periodic task. Called after every module has initialized; no-op
    /// unless overridden.
    async fn start(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        Ok(())
    }

    /// Called in reverse registration order once the server has drained
    async fn stop(&self) -> anyhow::Result<()> {
        Ok(())
    }
}

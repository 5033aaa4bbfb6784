use anyhow::Context;
use bookshelf_app::modules;
use bookshelf_kernel::settings::Settings;
use bookshelf_kernel::{InitCtx, ModuleRegistry};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::load().with_context(|| "failed to load bookshelf settings")?;
    bookshelf_telemetry::init(&settings.telemetry)?;

    tracing::info!(
        env = ?settings.environment,
        db = %settings.database.url,
        "bookshelf-server bootstrap starting"
    );

    let pool = bookshelf_db::connect(&settings.database).await?;

    let mut registry = ModuleRegistry::new();
    modules::register_all(&mut registry, &pool);

    let served = serve(&registry, &settings, &pool).await;

    let stopped = registry.stop_modules().await;
    bookshelf_db::close(pool).await;

    served.and(stopped)
}

async fn serve(
    registry: &ModuleRegistry,
    settings: &Settings,
    pool: &sqlx::SqlitePool,
) -> anyhow::Result<()> {
    let applied = bookshelf_db::migrate(pool, &registry.collect_migrations()).await?;
    tracing::info!(applied, "migrations complete");

    let ctx = InitCtx { settings };
    registry.init_modules(&ctx).await?;
    registry.start_modules(&ctx).await?;

    tracing::info!("bookshelf-server bootstrap complete");
    bookshelf_http::start_server(registry, settings).await
}

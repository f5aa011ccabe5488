use anyhow::Context as _;
use sea_orm::Database;
use tracing::info;

use bookmind_core::tracing::init_tracing;
use bookmind_reading::config::ReadingConfig;
use bookmind_reading::infra::google_books::GoogleBooksClient;
use bookmind_reading::router::build_router;
use bookmind_reading::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = ReadingConfig::from_env()?;

    let db = Database::connect(&config.database_url)
        .await
        .context("failed to connect to database")?;

    let catalog = GoogleBooksClient::new(
        &config.google_books_base_url,
        config.google_books_lang_restrict.clone(),
        config.google_books_timeout,
    )?;

    let state = AppState { db, catalog };

    let router = build_router(state);
    let addr = format!("0.0.0.0:{}", config.reading_port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    info!("reading service listening on {addr}");
    axum::serve(listener, router).await.context("server error")?;
    Ok(())
}

use std::sync::Arc;

use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use reelseat::{AppState, config::Config, db, routes, store::MovieStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "info,reelseat=debug,sqlx=warn".to_string()),
        )
        .init();

    let config = Config::from_env()?;

    // fatal: the service cannot run without a migrated store
    let db = db::connect_and_migrate(&config.database_url).await?;
    tracing::info!("database connected, schema up to date");

    let store = MovieStore::new(db);
    store.seed_if_empty(&db::SEED_MOVIES).await?;

    let state = Arc::new(AppState { store });

    let app = routes::router(state)
        .layer(CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any))
        .layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    tracing::info!(addr = %config.addr, "listening");
    axum::serve(listener, app).await?;

    Ok(())
}

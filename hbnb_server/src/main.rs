//! HBnB API server: loads settings, connects, creates tables, serves.
//!
//! Run from repo root: `cargo run -p hbnb-server`
//! `ENV=development` uses a local SQLite file; otherwise `DATABASE_URL` is required.

use hbnb_api::{apply_migrations, build_app, connect, AppState, DataManager, Settings};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let settings = Settings::from_env()?;
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("hbnb_api=info,tower_http=info")),
        )
        .init();

    tracing::info!(environment = settings.environment.as_str(), "starting");
    let pool = connect(&settings).await?;
    apply_migrations(&pool).await?;

    let state = AppState::new(DataManager::new(pool));
    let app = build_app(state, settings.body_limit);

    let listener = TcpListener::bind(settings.bind_addr).await?;
    tracing::info!("listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}

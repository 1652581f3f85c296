mod catalog;
mod config;
mod errors;
mod matching;
mod routes;
mod state;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::catalog::SkillCatalog;
use crate::config::Config;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting RoleFit API v{}", env!("CARGO_PKG_VERSION"));

    // Catalog is built once and never mutated; handlers share it through AppState.
    let catalog = SkillCatalog::load(
        config.role_catalog_path.as_deref(),
        config.synonym_table_path.as_deref(),
    )
    .context("Failed to load skill catalog")?;
    info!(
        "Skill catalog loaded: {} roles (default '{}'), {} synonym entries",
        catalog.roles.roles.len(),
        catalog.roles.default_role.name,
        catalog.synonyms.len()
    );

    if catalog.synonyms.is_empty() {
        warn!("Synonym table is empty; only role-level aliases will be recognized");
    }

    let state = AppState::new(config.clone(), catalog);
    info!("Fit scorer backend: {}", state.fit_scorer.backend());

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    axum::serve(listener, app).await?;

    Ok(())
}

mod advice;
mod config;
mod errors;
mod llm_client;
mod quiz;
mod reference;
mod routes;
mod state;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::advice::AdviceService;
use crate::config::Config;
use crate::llm_client::{CompletionProvider, LlmClient};
use crate::quiz::QuestionBank;
use crate::reference::catalog::CatalogStore;
use crate::reference::postgres::PgReferenceStore;
use crate::reference::ReferenceStore;
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

    info!("Starting Compass API v{}", env!("CARGO_PKG_VERSION"));

    let bank = QuestionBank::standard().context("Built-in question bank is invalid")?;
    info!("Question bank loaded ({} questions)", bank.len());

    let reference = build_reference_store(&config).await?;
    let advice = build_advice_service(&config)?;

    let state = AppState {
        bank: Arc::new(bank),
        reference,
        advice,
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Postgres when `DATABASE_URL` is set, otherwise the JSON catalogue (from
/// `REFERENCE_DATA_PATH`, or the one compiled in). The catalogue also supplies
/// the cluster careers and colleges the Postgres tables don't carry.
async fn build_reference_store(config: &Config) -> Result<Arc<dyn ReferenceStore>> {
    let catalogue = match &config.reference_data_path {
        Some(path) => CatalogStore::from_path(path)?,
        None => CatalogStore::bundled()?,
    };
    if let Some(url) = &config.database_url {
        let store = PgReferenceStore::connect(url, catalogue).await?;
        info!("Reference data: PostgreSQL");
        return Ok(Arc::new(store));
    }
    info!("Reference data: JSON catalogue");
    Ok(Arc::new(catalogue))
}

fn build_advice_service(config: &Config) -> Result<AdviceService> {
    let provider = match &config.openai_api_key {
        Some(key) => {
            let client = LlmClient::new(key.clone(), config.advice_api_url.clone())?;
            info!("Advice client initialized (model: {})", llm_client::MODEL);
            Some(Arc::new(client) as Arc<dyn CompletionProvider>)
        }
        None => {
            tracing::warn!("OPENAI_API_KEY not set; advice requests will return the fallback message");
            None
        }
    };
    Ok(AdviceService::new(provider, config.advice_timeout))
}

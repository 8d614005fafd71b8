//! Binary entry point: configuration, store wiring, HTTP server.

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

use connect_gateway::domain::config::GatewayConfig;
use connect_gateway::service::build_router;
use ton_proof::adapters::rest::RestWalletStore;
use ton_proof::{ProofVerificationService, VerifierConfig};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = GatewayConfig::from_env().context("configuration")?;

    let store = RestWalletStore::new(&config.store_url, &config.store_service_key)
        .context("store client")?;
    let service = Arc::new(ProofVerificationService::new(
        VerifierConfig::new(config.expected_domain.clone(), config.session_ttl_secs),
        Arc::new(store),
    ));

    let router = build_router(service);

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("binding {}", config.bind_addr))?;

    info!(
        addr = %config.bind_addr,
        expected_domain = %config.expected_domain,
        session_ttl_secs = config.session_ttl_secs,
        "connect gateway listening"
    );

    axum::serve(listener, router).await.context("serving")?;
    Ok(())
}

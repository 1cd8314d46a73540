use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use replica_shim::{
    server,
    services::build_kubernetes::Kubernetes,
    utilities::{
        app_state::AppState,
        config::{Cli, Config},
    },
};
use tracing::info;
use tracing_subscriber::{
    EnvFilter, filter::LevelFilter, layer::SubscriberExt, util::SubscriberInitExt,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let config = Config::init(cli)
        .await
        .context("failed to load configuration")?;

    tracing_subscriber::registry()
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::from_level(config.tracing_level).into())
                .from_env_lossy(),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // kube's rustls connector needs a process-wide crypto provider
    let _ = rustls::crypto::ring::default_provider().install_default();

    let kubernetes = Kubernetes::new(&config)
        .await
        .context("failed to resolve Kubernetes credentials")?;
    kubernetes
        .verify_access(&config.startup_namespace)
        .await
        .with_context(|| format!("failed to list deployments in {}", config.startup_namespace))?;

    info!(address = %config.server_address, "starting replica-shim");
    let state = AppState::new(Arc::new(kubernetes), config);

    server::serve(state).await.context("HTTP server failed")?;

    Ok(())
}

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Path, State},
    response::IntoResponse,
};
use tracing::debug;

use crate::{
    features::deployments::implementations::DeploymentService,
    services::kubernetes::Orchestrator,
    utilities::{config::Config, errors::AppError},
};

pub async fn health_handler() -> impl IntoResponse {
    "OK"
}

pub async fn list_deployments_handler(
    State(orchestrator): State<Arc<dyn Orchestrator>>,
    Path(namespace): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let listing = DeploymentService::listing(orchestrator.as_ref(), &namespace).await?;

    Ok(listing)
}

pub async fn scale_deployment_handler(
    State(orchestrator): State<Arc<dyn Orchestrator>>,
    State(config): State<Config>,
    Path((namespace, deployment)): Path<(String, String)>,
    body: Bytes,
) -> Result<impl IntoResponse, AppError> {
    debug!(%namespace, %deployment, body_len = body.len(), "scale request");

    let scaled_to = DeploymentService::scale(
        orchestrator.as_ref(),
        &config,
        &namespace,
        &deployment,
        &body,
    )
    .await?;

    Ok(format!("Scaled to {scaled_to}\n"))
}

use k8s_openapi::api::apps::v1::Deployment;
use tracing::{info, warn};

use crate::{
    features::deployments::schemas::ReplicaCounts,
    services::kubernetes::Orchestrator,
    utilities::{config::Config, errors::AppError},
};

pub struct DeploymentService;

impl DeploymentService {
    /// Render a namespace as `name: observed, desired` lines, in API order.
    pub async fn listing(
        orchestrator: &dyn Orchestrator,
        namespace: &str,
    ) -> Result<String, AppError> {
        let deployments = orchestrator.list_deployments(namespace).await?;

        Ok(render_listing(&deployments))
    }

    /// Set the desired replica count through the scale sub-resource.
    ///
    /// Returns the replica count the API server reports after the update.
    pub async fn scale(
        orchestrator: &dyn Orchestrator,
        config: &Config,
        namespace: &str,
        name: &str,
        body: &[u8],
    ) -> Result<i32, AppError> {
        // Existence check; the API server's not-found error is the response.
        orchestrator.get_deployment(namespace, name).await?;

        let replicas = desired_replicas(body, config.strict_replicas)?;

        let mut scale = orchestrator.get_scale(namespace, name).await?;
        scale.spec.get_or_insert_with(Default::default).replicas = Some(replicas);
        if !config.optimistic_concurrency {
            scale.metadata.resource_version = None;
        }

        let updated = orchestrator.update_scale(namespace, name, scale).await?;
        let scaled_to = updated
            .spec
            .and_then(|spec| spec.replicas)
            .unwrap_or(0);

        info!("Scaled deployment/{namespace}/{name} to {scaled_to} replica(s).");
        Ok(scaled_to)
    }
}

pub fn render_listing(deployments: &[Deployment]) -> String {
    deployments
        .iter()
        .map(|deployment| format!("{}\n", ReplicaCounts::from(deployment)))
        .collect()
}

/// Parse a request body as a non-negative replica count.
///
/// The body must be the bare decimal number; surrounding whitespace, such as
/// a trailing newline, makes it invalid.
pub fn parse_replicas(body: &[u8]) -> Result<i32, AppError> {
    let text = std::str::from_utf8(body)
        .map_err(|_| AppError::InvalidReplicas("body is not valid UTF-8".to_string()))?;

    let replicas: i32 = text
        .parse()
        .map_err(|e| AppError::InvalidReplicas(format!("{text:?}: {e}")))?;

    if replicas < 0 {
        return Err(AppError::InvalidReplicas(format!("{replicas} is negative")));
    }

    Ok(replicas)
}

/// Strict mode rejects a bad body; otherwise it scales to zero.
pub fn desired_replicas(body: &[u8], strict: bool) -> Result<i32, AppError> {
    match parse_replicas(body) {
        Ok(replicas) => Ok(replicas),
        Err(e) if strict => Err(e),
        Err(e) => {
            warn!("{e}, scaling to 0");
            Ok(0)
        }
    }
}

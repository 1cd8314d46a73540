use async_trait::async_trait;
use k8s_openapi::api::{apps::v1::Deployment, autoscaling::v1::Scale};
use kube::{
    Api,
    api::{ListParams, PostParams},
};
use tracing::debug;

use crate::{services::build_kubernetes::Kubernetes, utilities::errors::AppError};

/// The orchestrator calls the HTTP handlers depend on.
///
/// Every error carries the API server's message unchanged; callers turn it
/// into a response body as-is.
#[async_trait]
pub trait Orchestrator: Send + Sync {
    async fn list_deployments(&self, namespace: &str) -> Result<Vec<Deployment>, AppError>;

    async fn get_deployment(&self, namespace: &str, name: &str) -> Result<Deployment, AppError>;

    async fn get_scale(&self, namespace: &str, name: &str) -> Result<Scale, AppError>;

    async fn update_scale(
        &self,
        namespace: &str,
        name: &str,
        scale: Scale,
    ) -> Result<Scale, AppError>;
}

impl Kubernetes {
    fn deployments(&self, namespace: &str) -> Api<Deployment> {
        Api::namespaced(self.client.clone(), namespace)
    }
}

#[async_trait]
impl Orchestrator for Kubernetes {
    async fn list_deployments(&self, namespace: &str) -> Result<Vec<Deployment>, AppError> {
        let list = self.deployments(namespace).list(&ListParams::default()).await?;
        debug!(namespace, count = list.items.len(), "listed deployments");

        Ok(list.items)
    }

    async fn get_deployment(&self, namespace: &str, name: &str) -> Result<Deployment, AppError> {
        Ok(self.deployments(namespace).get(name).await?)
    }

    async fn get_scale(&self, namespace: &str, name: &str) -> Result<Scale, AppError> {
        Ok(self.deployments(namespace).get_scale(name).await?)
    }

    async fn update_scale(
        &self,
        namespace: &str,
        name: &str,
        scale: Scale,
    ) -> Result<Scale, AppError> {
        let data = serde_json::to_vec(&scale)?;
        let updated = self
            .deployments(namespace)
            .replace_scale(name, &PostParams::default(), data)
            .await?;

        Ok(updated)
    }
}

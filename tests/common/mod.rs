#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode},
};
use k8s_openapi::api::{
    apps::v1::{Deployment, DeploymentSpec, DeploymentStatus},
    autoscaling::v1::{Scale, ScaleSpec, ScaleStatus},
};
use kube::api::ObjectMeta;
use replica_shim::{
    server,
    services::kubernetes::Orchestrator,
    utilities::{app_state::AppState, config::Config, errors::AppError},
};
use tower::ServiceExt;
use tracing::Level;

struct FakeDeployment {
    namespace: String,
    name: String,
    observed: i32,
    desired: i32,
    resource_version: u64,
}

#[derive(Default)]
struct FakeCluster {
    deployments: Vec<FakeDeployment>,
    unreachable: bool,
    failing_scale_read: bool,
    concurrent_writer: bool,
    submitted: Vec<Scale>,
}

/// In-memory stand-in for the API server, keeping deployments in insertion order.
#[derive(Default)]
pub struct FakeOrchestrator {
    cluster: Mutex<FakeCluster>,
}

impl FakeOrchestrator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_deployment(self, namespace: &str, name: &str, observed: i32, desired: i32) -> Self {
        self.cluster.lock().unwrap().deployments.push(FakeDeployment {
            namespace: namespace.to_string(),
            name: name.to_string(),
            observed,
            desired,
            resource_version: 1,
        });
        self
    }

    /// Every call fails as if the API server were down.
    pub fn unreachable(self) -> Self {
        self.cluster.lock().unwrap().unreachable = true;
        self
    }

    /// Deployments resolve but reading their scale sub-resource is forbidden.
    pub fn failing_scale_read(self) -> Self {
        self.cluster.lock().unwrap().failing_scale_read = true;
        self
    }

    /// Another client bumps the scale between every read and write.
    pub fn with_concurrent_writer(self) -> Self {
        self.cluster.lock().unwrap().concurrent_writer = true;
        self
    }

    pub fn desired(&self, namespace: &str, name: &str) -> Option<i32> {
        let cluster = self.cluster.lock().unwrap();
        cluster
            .deployments
            .iter()
            .find(|d| d.namespace == namespace && d.name == name)
            .map(|d| d.desired)
    }

    /// Scales handed to `update_scale`, in call order.
    pub fn submitted(&self) -> Vec<Scale> {
        self.cluster.lock().unwrap().submitted.clone()
    }
}

fn not_found(name: &str) -> AppError {
    AppError::InternalError(format!("deployments.apps \"{name}\" not found"))
}

fn connection_refused() -> AppError {
    AppError::InternalError("error trying to connect: Connection refused".to_string())
}

impl FakeCluster {
    fn check_reachable(&self) -> Result<(), AppError> {
        if self.unreachable {
            return Err(connection_refused());
        }
        Ok(())
    }

    fn find(&mut self, namespace: &str, name: &str) -> Result<&mut FakeDeployment, AppError> {
        self.deployments
            .iter_mut()
            .find(|d| d.namespace == namespace && d.name == name)
            .ok_or_else(|| not_found(name))
    }
}

fn to_deployment(d: &FakeDeployment) -> Deployment {
    Deployment {
        metadata: ObjectMeta {
            name: Some(d.name.clone()),
            namespace: Some(d.namespace.clone()),
            resource_version: Some(d.resource_version.to_string()),
            ..Default::default()
        },
        spec: Some(DeploymentSpec {
            replicas: Some(d.desired),
            ..Default::default()
        }),
        status: Some(DeploymentStatus {
            replicas: Some(d.observed),
            ..Default::default()
        }),
    }
}

fn to_scale(d: &FakeDeployment) -> Scale {
    Scale {
        metadata: ObjectMeta {
            name: Some(d.name.clone()),
            namespace: Some(d.namespace.clone()),
            resource_version: Some(d.resource_version.to_string()),
            ..Default::default()
        },
        spec: Some(ScaleSpec {
            replicas: Some(d.desired),
        }),
        status: Some(ScaleStatus {
            replicas: d.observed,
            ..Default::default()
        }),
    }
}

#[async_trait]
impl Orchestrator for FakeOrchestrator {
    async fn list_deployments(&self, namespace: &str) -> Result<Vec<Deployment>, AppError> {
        let cluster = self.cluster.lock().unwrap();
        cluster.check_reachable()?;

        Ok(cluster
            .deployments
            .iter()
            .filter(|d| d.namespace == namespace)
            .map(to_deployment)
            .collect())
    }

    async fn get_deployment(&self, namespace: &str, name: &str) -> Result<Deployment, AppError> {
        let mut cluster = self.cluster.lock().unwrap();
        cluster.check_reachable()?;

        Ok(to_deployment(cluster.find(namespace, name)?))
    }

    async fn get_scale(&self, namespace: &str, name: &str) -> Result<Scale, AppError> {
        let mut cluster = self.cluster.lock().unwrap();
        cluster.check_reachable()?;
        if cluster.failing_scale_read {
            return Err(AppError::InternalError(format!(
                "deployments.apps \"{name}\" is forbidden: cannot get resource \"deployments/scale\""
            )));
        }
        let concurrent_writer = cluster.concurrent_writer;

        let deployment = cluster.find(namespace, name)?;
        let scale = to_scale(deployment);
        if concurrent_writer {
            deployment.resource_version += 1;
        }

        Ok(scale)
    }

    async fn update_scale(
        &self,
        namespace: &str,
        name: &str,
        scale: Scale,
    ) -> Result<Scale, AppError> {
        let mut cluster = self.cluster.lock().unwrap();
        cluster.check_reachable()?;
        cluster.submitted.push(scale.clone());

        let deployment = cluster.find(namespace, name)?;
        if let Some(version) = &scale.metadata.resource_version
            && *version != deployment.resource_version.to_string()
        {
            return Err(AppError::InternalError(format!(
                "Operation cannot be fulfilled on deployments.apps \"{name}\": the object has been modified; please apply your changes to the latest version and try again"
            )));
        }

        deployment.desired = scale.spec.and_then(|spec| spec.replicas).unwrap_or(0);
        deployment.resource_version += 1;

        Ok(to_scale(deployment))
    }
}

pub fn test_config() -> Config {
    Config {
        server_address: "127.0.0.1:0".to_string(),
        k8s_in_cluster: false,
        k8s_config_path: "./config".into(),
        startup_namespace: "default".to_string(),
        strict_replicas: false,
        optimistic_concurrency: false,
        tracing_level: Level::INFO,
    }
}

pub fn router(orchestrator: Arc<FakeOrchestrator>, config: Config) -> Router {
    server::app(AppState::new(orchestrator, config))
}

pub async fn send(app: Router, method: &str, uri: &str, body: &str) -> (StatusCode, String) {
    let response = app
        .oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();

    (status, String::from_utf8(body.to_vec()).unwrap())
}

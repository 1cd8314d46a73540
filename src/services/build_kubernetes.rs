use k8s_openapi::api::apps::v1::Deployment;
use kube::{
    Api, Client, Config as KubeConfig,
    api::ListParams,
    config::{KubeConfigOptions, Kubeconfig},
};
use tracing::info;

use crate::utilities::{config::Config, errors::AppError};

#[derive(Clone)]
pub struct Kubernetes {
    pub client: Client,
}

impl Kubernetes {
    pub async fn new(config: &Config) -> Result<Self, AppError> {
        let kube_config = if config.k8s_in_cluster {
            // Running inside Kubernetes cluster
            info!("Using in-cluster configuration");
            KubeConfig::incluster()?
        } else {
            // Running outside cluster - use kubeconfig
            info!(
                kubeconfig = %config.k8s_config_path.display(),
                "Using out-of-cluster configuration"
            );
            let kubeconfig = Kubeconfig::read_from(&config.k8s_config_path)?;
            KubeConfig::from_custom_kubeconfig(kubeconfig, &KubeConfigOptions::default()).await?
        };

        let client = Client::try_from(kube_config)?;

        Ok(Self { client })
    }

    /// Lists Deployments once so bad credentials fail at startup, not on the first request.
    pub async fn verify_access(&self, namespace: &str) -> Result<(), AppError> {
        let deployments: Api<Deployment> = Api::namespaced(self.client.clone(), namespace);
        deployments.list(&ListParams::default().limit(1)).await?;

        info!("Config found, starting HTTP server");
        Ok(())
    }
}

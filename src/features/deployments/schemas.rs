use std::fmt;

use k8s_openapi::api::apps::v1::Deployment;

/// One line of a namespace listing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReplicaCounts {
    pub name: String,
    pub observed: i32,
    pub desired: i32,
}

impl From<&Deployment> for ReplicaCounts {
    fn from(deployment: &Deployment) -> Self {
        Self {
            name: deployment.metadata.name.clone().unwrap_or_default(),
            observed: deployment
                .status
                .as_ref()
                .and_then(|status| status.replicas)
                .unwrap_or(0),
            desired: deployment
                .spec
                .as_ref()
                .and_then(|spec| spec.replicas)
                .unwrap_or(0),
        }
    }
}

impl fmt::Display for ReplicaCounts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}, {}", self.name, self.observed, self.desired)
    }
}

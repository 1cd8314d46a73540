use axum::{http::StatusCode, response::IntoResponse, response::Response};
use tracing::error;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("In-cluster configuration error: {0}")]
    InClusterConfigError(#[from] kube::config::InClusterError),
    #[error("Kubeconfig error: {0}")]
    KubeconfigError(#[from] kube::config::KubeconfigError),
    #[error("{0}")]
    KubeError(#[from] kube::Error),
    #[error("Serde json error: {0}")]
    SerdejsonError(#[from] serde_json::Error),
    #[error("IO error, {0}")]
    IoError(#[from] std::io::Error),
    #[error("{0}")]
    FileReadError(String),
    #[error("Invalid address {0}")]
    InvalidAddress(String),
    #[error("Invalid replica count, {0}")]
    InvalidReplicas(String),
    #[error("{0}")]
    InternalError(String),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidReplicas(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let error_message = match self {
            // Raw API server message, as the server sent it
            Self::KubeError(kube::Error::Api(response)) => response.message,
            Self::KubeError(e) => e.to_string(),
            Self::InternalError(e) => e,
            Self::InvalidReplicas(e) => format!("Invalid replica count, {e}"),
            other => other.to_string(),
        };

        if status.is_server_error() {
            error!(%status, "{error_message}");
        }

        (status, error_message).into_response()
    }
}

pub mod handlers;
pub mod implementations;
pub mod schemas;

use axum::{
    Router,
    routing::{get, put},
};

use crate::utilities::app_state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::health_handler))
        .route("/{namespace}", get(handlers::list_deployments_handler))
        .route(
            "/{namespace}/{deployment}",
            put(handlers::scale_deployment_handler),
        )
}

pub mod deployments;

use axum::Router;

use crate::utilities::app_state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().merge(deployments::routes())
}

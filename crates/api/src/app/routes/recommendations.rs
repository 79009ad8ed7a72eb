use std::sync::Arc;

use axum::{extract::Extension, response::IntoResponse, routing::post, Json, Router};

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new().route("/", post(recommend))
}

pub async fn recommend(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(tenant): Extension<crate::context::TenantContext>,
    Json(body): Json<dto::RecommendRequest>,
) -> axum::response::Response {
    match services.recommend(tenant.tenant_id(), &body.answers) {
        Ok(outcome) => Json(outcome).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

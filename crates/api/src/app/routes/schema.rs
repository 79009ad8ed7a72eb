use std::sync::Arc;

use axum::{
    extract::Extension,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};

use eduforge_schema::BuilderSchema;

use crate::app::errors;
use crate::app::services::AppServices;

pub fn router() -> Router {
    Router::new().route("/", get(get_schema).put(put_schema))
}

pub async fn get_schema(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(tenant): Extension<crate::context::TenantContext>,
) -> axum::response::Response {
    match services.builder_schema(tenant.tenant_id()) {
        Some(schema) => Json(schema).into_response(),
        None => errors::json_error(
            StatusCode::NOT_FOUND,
            "not_found",
            "no schema defined for this organization",
        ),
    }
}

pub async fn put_schema(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(tenant): Extension<crate::context::TenantContext>,
    Json(body): Json<BuilderSchema>,
) -> axum::response::Response {
    match services.save_schema(tenant.tenant_id(), &body) {
        Ok(field_count) => (
            StatusCode::OK,
            Json(serde_json::json!({ "fieldCount": field_count })),
        )
            .into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

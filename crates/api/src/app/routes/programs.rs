use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Extension, Path, Query},
    http::{header, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde_json::json;

use eduforge_core::ProgramId;
use eduforge_programs::NewProgram;

use crate::app::services::{AppServices, ImportResult};
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_programs).post(create_program))
        .route("/template", get(download_template))
        .route("/import", axum::routing::post(import_programs))
        .route("/:id", get(get_program).delete(delete_program))
}

pub async fn list_programs(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(tenant): Extension<crate::context::TenantContext>,
) -> axum::response::Response {
    Json(services.list_programs(tenant.tenant_id())).into_response()
}

pub async fn create_program(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(tenant): Extension<crate::context::TenantContext>,
    Json(body): Json<dto::CreateProgramRequest>,
) -> axum::response::Response {
    let new = NewProgram {
        name: body.name,
        data: body.data.unwrap_or_else(|| json!({})),
    };

    match services.create_program(tenant.tenant_id(), new) {
        Ok(program) => (StatusCode::CREATED, Json(program)).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn get_program(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(tenant): Extension<crate::context::TenantContext>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: ProgramId = match id.parse() {
        Ok(v) => v,
        Err(_) => return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid program id"),
    };

    match services.get_program(tenant.tenant_id(), id) {
        Some(program) => Json(program).into_response(),
        None => errors::json_error(StatusCode::NOT_FOUND, "not_found", "program not found"),
    }
}

pub async fn delete_program(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(tenant): Extension<crate::context::TenantContext>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: ProgramId = match id.parse() {
        Ok(v) => v,
        Err(_) => return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid program id"),
    };

    if services.delete_program(tenant.tenant_id(), id) {
        StatusCode::NO_CONTENT.into_response()
    } else {
        errors::json_error(StatusCode::NOT_FOUND, "not_found", "program not found")
    }
}

/// Download the upload template. `?sheet=instructions` selects the
/// column-guide sheet; anything else gets the fill-in data sheet.
pub async fn download_template(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(tenant): Extension<crate::context::TenantContext>,
    Query(query): Query<dto::TemplateQuery>,
) -> axum::response::Response {
    let template = match services.template(tenant.tenant_id()) {
        Ok(t) => t,
        Err(e) => return errors::domain_error_to_response(e),
    };

    let instructions = query.sheet.as_deref() == Some("instructions");
    let mut buffer = Vec::new();
    let written = if instructions {
        template.write_instructions_csv(&mut buffer)
    } else {
        template.write_data_csv(&mut buffer)
    };
    if let Err(e) = written {
        return errors::domain_error_to_response(e);
    }

    let filename = if instructions {
        "program-import-instructions.csv"
    } else {
        "program-import-template.csv"
    };

    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "text/csv".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        buffer,
    )
        .into_response()
}

/// Upload a filled-in template. The batch is all-or-nothing: any invalid row
/// rejects the whole file with per-row errors.
pub async fn import_programs(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(tenant): Extension<crate::context::TenantContext>,
    body: Bytes,
) -> axum::response::Response {
    match services.import_programs(tenant.tenant_id(), &body) {
        Ok(ImportResult::Created(count)) => {
            (StatusCode::CREATED, Json(json!({ "created": count }))).into_response()
        }
        Ok(ImportResult::Rejected(failures)) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({
                "error": "import_rejected",
                "message": "one or more rows failed validation",
                "rows": failures,
            })),
        )
            .into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

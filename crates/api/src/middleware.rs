use axum::{
    http::{HeaderMap, StatusCode},
    middleware::Next,
    response::Response,
};

use eduforge_core::TenantId;

use crate::context::TenantContext;

/// Header the upstream identity layer forwards after authenticating the
/// caller. Session/invitation handling itself lives outside this service.
pub const ORGANIZATION_HEADER: &str = "x-organization-id";

pub async fn tenant_middleware(
    mut req: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Result<Response, StatusCode> {
    let tenant_id = extract_tenant(req.headers())?;

    req.extensions_mut().insert(TenantContext::new(tenant_id));

    Ok(next.run(req).await)
}

fn extract_tenant(headers: &HeaderMap) -> Result<TenantId, StatusCode> {
    let header = headers
        .get(ORGANIZATION_HEADER)
        .ok_or(StatusCode::UNAUTHORIZED)?;

    let header = header.to_str().map_err(|_| StatusCode::UNAUTHORIZED)?;

    header.trim().parse().map_err(|_| StatusCode::UNAUTHORIZED)
}

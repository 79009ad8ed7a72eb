use axum::Router;

pub mod programs;
pub mod recommendations;
pub mod schema;
pub mod system;

/// Router for all tenant-scoped endpoints.
pub fn router() -> Router {
    Router::new()
        .nest("/schema", schema::router())
        .nest("/programs", programs::router())
        .nest("/recommendations", recommendations::router())
}

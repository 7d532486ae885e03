//! Route registration

use super::handlers;
use crate::domain::session::IdentityProvider;
use crate::domain::Service;
use axum::{
    routing::{get, post},
    Extension, Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Mount point of the personnel API
pub const API_PREFIX: &str = "/api/personnel/v1";

/// Build the personnel router, nested under [`API_PREFIX`]
pub fn register_routes(
    router: Router,
    service: Arc<Service>,
    identity: Arc<dyn IdentityProvider>,
) -> Router {
    let api = Router::new()
        .route("/pegawai", get(handlers::list_employees))
        .route("/pendidikan", get(handlers::list_education))
        .route("/pendidikan/validate", post(handlers::validate_education))
        .route("/penjenjangan", get(handlers::list_training))
        .route("/catatan-karir", get(handlers::list_career_notes))
        .route("/struktur", get(handlers::list_structure))
        .route("/organigram", get(handlers::get_organigram))
        .route("/beranda", get(handlers::get_dashboard))
        .layer(Extension(service))
        .layer(Extension(identity));

    router
        .nest(API_PREFIX, api)
        .layer(TraceLayer::new_for_http())
}

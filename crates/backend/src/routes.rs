use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::api::handlers;
use crate::shared::config::UploadConfig;

/// Конфигурация всех роутов приложения
pub fn configure_routes(upload: &UploadConfig) -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        // U501 Import from CSV
        .route(
            &upload.route,
            post(handlers::u501_import_from_csv::upload),
        )
        .layer(DefaultBodyLimit::max(upload.max_body_bytes))
}

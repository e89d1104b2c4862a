//! Route tree assembly.

pub mod admin;
pub mod content;
pub mod health;

use axum::Router;
use bulletin_core::content::ALL_SCHEMAS;
use tower_http::services::ServeDir;

use crate::config::ServerConfig;
use crate::state::AppState;

/// Build the application route tree (without middleware).
///
/// Route hierarchy:
///
/// ```text
/// /health                                  health check
///
/// /admin/signup                            admin sign-up (public)
/// /admin/login                             admin login (public)
///
/// /notifications/...                       notification CRUD
/// /tenders/...                             tender CRUD
/// /events/...                              event CRUD
///
/// /notification_images/*                   stored media (read-only)
/// /tender_images/*
/// /event_images/*
/// ```
pub fn api_routes(config: &ServerConfig) -> Router<AppState> {
    let mut router = Router::new()
        .merge(health::router())
        .nest("/admin", admin::router());

    for schema in ALL_SCHEMAS {
        router = router.nest(&format!("/{}", schema.plural), content::router(schema));
    }

    // Read-only static mounts for the disk/blob backends. Under the inline
    // backend these directories stay empty and the mounts just 404.
    for schema in ALL_SCHEMAS {
        let namespace = schema.media_namespace();
        router = router.nest_service(
            &format!("/{namespace}"),
            ServeDir::new(config.media_root.join(&namespace)),
        );
    }

    router
}

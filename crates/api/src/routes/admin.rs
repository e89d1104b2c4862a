//! Route definitions for the `/admin` resource.

use axum::routing::post;
use axum::Router;

use crate::handlers::admin;
use crate::state::AppState;

/// Routes mounted at `/admin`.
///
/// ```text
/// POST /signup -> signup
/// POST /login  -> login
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/signup", post(admin::signup))
        .route("/login", post(admin::login))
}

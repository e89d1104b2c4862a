//! Route definitions shared by the three content resources.
//!
//! One builder produces the route tree for a given [`ContentSchema`]; the
//! handlers are partially applied with the schema so the same code serves
//! `/notifications`, `/tenders`, and `/events`.

use axum::extract::{Multipart, Path, Query, State};
use axum::routing::{delete, get, post, put};
use axum::Router;
use bulletin_core::content::ContentSchema;
use bulletin_core::types::DbId;

use crate::handlers::content;
use crate::middleware::auth::AuthUser;
use crate::query::PageParams;
use crate::state::AppState;

/// Routes mounted at `/{plural}` (e.g. `/tenders`).
///
/// ```text
/// POST   /add{Pascal}           -> create      (auth, multipart)
/// GET    /getAll{Pascal}s       -> list        (public, paginated)
/// GET    /get{Pascal}/{id}      -> get_by_id   (public)
/// PUT    /update{Pascal}/{id}   -> update      (auth, multipart, partial)
/// DELETE /delete{Pascal}/{id}   -> delete      (auth)
/// ```
pub fn router(schema: &'static ContentSchema) -> Router<AppState> {
    Router::new()
        .route(
            &format!("/add{}", schema.pascal),
            post(
                move |state: State<AppState>, user: AuthUser, multipart: Multipart| {
                    content::create(schema, state, user, multipart)
                },
            ),
        )
        .route(
            &format!("/getAll{}", schema.pascal_plural),
            get(move |state: State<AppState>, params: Query<PageParams>| {
                content::list(schema, state, params)
            }),
        )
        .route(
            &format!("/get{}/{{id}}", schema.pascal),
            get(move |state: State<AppState>, id: Path<DbId>| {
                content::get_by_id(schema, state, id)
            }),
        )
        .route(
            &format!("/update{}/{{id}}", schema.pascal),
            put(
                move |state: State<AppState>,
                      user: AuthUser,
                      id: Path<DbId>,
                      multipart: Multipart| {
                    content::update(schema, state, user, id, multipart)
                },
            ),
        )
        .route(
            &format!("/delete{}/{{id}}", schema.pascal),
            delete(move |state: State<AppState>, user: AuthUser, id: Path<DbId>| {
                content::delete(schema, state, user, id)
            }),
        )
}

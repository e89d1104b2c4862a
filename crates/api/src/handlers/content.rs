//! Generic CRUD handlers shared by notifications, tenders, and events.
//!
//! Every handler takes a `&'static ContentSchema` as its first argument; the
//! route modules partially apply it, so one set of handlers serves all three
//! content kinds. Create/update read multipart form bodies (the admin
//! frontend posts `FormData` with an optional file per slot).

use axum::extract::multipart::MultipartError;
use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use bulletin_core::content::ContentSchema;
use bulletin_core::error::CoreError;
use bulletin_core::media::resolve_media;
use bulletin_core::types::{DbId, Timestamp};
use bulletin_core::validation::validate_min_len;
use bulletin_db::models::content::{
    ContentEntry, CreateContentEntry, MediaColumns, UpdateContentEntry,
};
use bulletin_db::repositories::ContentRepo;
use serde_json::{json, Value};

use crate::error::{AppError, AppResult};
use crate::media::UploadedFile;
use crate::middleware::auth::AuthUser;
use crate::query::{total_pages, PageParams};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Multipart form reading
// ---------------------------------------------------------------------------

/// Raw fields pulled from a create/update multipart body.
///
/// Text fields are kept as sent (including empty strings); the handlers
/// apply the truthy-overwrite rule themselves.
#[derive(Debug, Default)]
struct ContentForm {
    title: Option<String>,
    body: Option<String>,
    video_url: Option<String>,
    date: Option<String>,
    image: Option<UploadedFile>,
    video: Option<UploadedFile>,
}

/// Map a multipart read error onto the right status.
///
/// Bodies over the configured limit surface as 413; everything else is a
/// plain bad request.
fn multipart_error(err: MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge
    } else {
        AppError::BadRequest(err.to_string())
    }
}

/// Read the fields this schema understands from a multipart body.
///
/// Unknown fields are skipped. A file part with no filename and no bytes
/// (an empty file input) counts as "no upload".
async fn read_form(schema: &ContentSchema, mut multipart: Multipart) -> AppResult<ContentForm> {
    let mut form = ContentForm::default();

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };

        match name.as_str() {
            "title" => form.title = Some(field.text().await.map_err(multipart_error)?),
            "body" => form.body = Some(field.text().await.map_err(multipart_error)?),
            "videoURL" if schema.allows_video_url => {
                form.video_url = Some(field.text().await.map_err(multipart_error)?);
            }
            "image" => form.image = read_file(field).await?,
            "video" if schema.allows_video_upload => {
                form.video = read_file(field).await?;
            }
            other if Some(other) == schema.date_field => {
                form.date = Some(field.text().await.map_err(multipart_error)?);
            }
            _ => {}
        }
    }

    Ok(form)
}

/// Read one file part into memory.
async fn read_file(field: axum::extract::multipart::Field<'_>) -> AppResult<Option<UploadedFile>> {
    let filename = field.file_name().unwrap_or_default().to_string();
    let mime = field
        .content_type()
        .unwrap_or("application/octet-stream")
        .to_string();
    let bytes = field.bytes().await.map_err(multipart_error)?.to_vec();

    if filename.is_empty() && bytes.is_empty() {
        return Ok(None);
    }
    Ok(Some(UploadedFile {
        filename,
        mime,
        bytes,
    }))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Treat absent and empty-string fields identically (truthy-overwrite rule).
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}

/// Parse a client-supplied date: RFC 3339 first, then plain `YYYY-MM-DD`
/// (interpreted as midnight UTC).
fn parse_date(field: &str, raw: &str) -> AppResult<Timestamp> {
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.with_timezone(&chrono::Utc));
    }
    chrono::NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map(|d| d.and_time(chrono::NaiveTime::MIN).and_utc())
        .map_err(|_| {
            AppError::Core(CoreError::Validation(format!(
                "{field} must be a valid date"
            )))
        })
}

/// Ingest an optional upload, or pass `None` through.
async fn ingest_optional(
    state: &AppState,
    schema: &ContentSchema,
    file: Option<UploadedFile>,
) -> AppResult<Option<MediaColumns>> {
    match file {
        Some(file) => {
            let media = state.media.ingest(&schema.media_namespace(), file).await?;
            Ok(Some(MediaColumns::from(media)))
        }
        None => Ok(None),
    }
}

/// Serialize an entry for API output, resolving media references.
///
/// Keys follow the frontend's expectations: `_id`, camelCase field names,
/// and the schema's own date key (`tenderDate` / `eventDate`).
fn entry_to_json(schema: &ContentSchema, entry: &ContentEntry, base_url: &str) -> Value {
    let mut obj = serde_json::Map::new();
    obj.insert("_id".into(), json!(entry.id));
    obj.insert("title".into(), json!(entry.title));
    obj.insert("body".into(), json!(entry.body));
    obj.insert("userId".into(), json!(entry.user_id));
    if let Some(date_field) = schema.date_field {
        obj.insert(date_field.into(), json!(entry.happens_at));
    }
    if schema.allows_video_url {
        obj.insert("videoURL".into(), json!(entry.video_url));
    }
    obj.insert(
        "image".into(),
        json!(resolve_media(entry.image_ref().as_ref(), base_url)),
    );
    if schema.allows_video_upload {
        obj.insert(
            "video".into(),
            json!(resolve_media(entry.video_ref().as_ref(), base_url)),
        );
    }
    obj.insert("createdAt".into(), json!(entry.created_at));
    obj.insert("updatedAt".into(), json!(entry.updated_at));
    Value::Object(obj)
}

fn not_found(schema: &'static ContentSchema, id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: schema.pascal,
        id,
    })
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /{plural}/add{Pascal}
///
/// Validation runs before media ingestion, so a rejected request never
/// leaves orphaned bytes behind; a failed media write aborts before the
/// entity row is inserted.
pub async fn create(
    schema: &'static ContentSchema,
    State(state): State<AppState>,
    user: AuthUser,
    multipart: Multipart,
) -> AppResult<(StatusCode, Json<Value>)> {
    let form = read_form(schema, multipart).await?;

    let title = form.title.unwrap_or_default();
    let body = form.body.unwrap_or_default();
    validate_min_len("Title", &title)?;
    validate_min_len("Body", &body)?;

    let happens_at = match schema.date_field {
        Some(date_field) => match non_empty(form.date) {
            Some(raw) => Some(parse_date(date_field, &raw)?),
            None if schema.date_required => {
                return Err(AppError::Core(CoreError::Validation(format!(
                    "{date_field} is required"
                ))));
            }
            None => None,
        },
        None => None,
    };

    let image = ingest_optional(&state, schema, form.image).await?;
    let video = ingest_optional(&state, schema, form.video).await?;

    let input = CreateContentEntry {
        kind: schema.kind.name(),
        title,
        body,
        user_id: user.user_id,
        video_url: non_empty(form.video_url),
        happens_at,
        image: image.unwrap_or_else(MediaColumns::none),
        video: video.unwrap_or_else(MediaColumns::none),
    };
    ContentRepo::create(&state.pool, &input).await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": format!("{} created successfully", schema.pascal) })),
    ))
}

/// GET /{plural}/getAll{Pascal}s?page=&perPage=
pub async fn list(
    schema: &'static ContentSchema,
    State(state): State<AppState>,
    Query(params): Query<PageParams>,
) -> AppResult<Json<Value>> {
    let kind = schema.kind.name();
    let per_page = params.per_page();

    let total = ContentRepo::count(&state.pool, kind).await?;
    let entries = ContentRepo::list(&state.pool, kind, per_page, params.offset()).await?;

    let base_url = &state.config.public_base_url;
    let items: Vec<Value> = entries
        .iter()
        .map(|entry| entry_to_json(schema, entry, base_url))
        .collect();

    let mut obj = serde_json::Map::new();
    obj.insert(format!("total{}", schema.pascal_plural), json!(total));
    obj.insert("currentPage".into(), json!(params.page()));
    obj.insert("totalPages".into(), json!(total_pages(total, per_page)));
    obj.insert(schema.plural.into(), json!(items));
    Ok(Json(Value::Object(obj)))
}

/// GET /{plural}/get{Pascal}/{id}
pub async fn get_by_id(
    schema: &'static ContentSchema,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Value>> {
    let entry = ContentRepo::find_by_id(&state.pool, schema.kind.name(), id)
        .await?
        .ok_or_else(|| not_found(schema, id))?;

    let mut obj = serde_json::Map::new();
    obj.insert(
        schema.singular.into(),
        entry_to_json(schema, &entry, &state.config.public_base_url),
    );
    Ok(Json(Value::Object(obj)))
}

/// PUT /{plural}/update{Pascal}/{id}
///
/// Truthy partial update: only non-empty supplied fields overwrite, so an
/// explicit empty string leaves the stored value untouched. A new upload
/// replaces the slot's media wholesale.
pub async fn update(
    schema: &'static ContentSchema,
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<DbId>,
    multipart: Multipart,
) -> AppResult<Json<Value>> {
    let form = read_form(schema, multipart).await?;

    let title = non_empty(form.title);
    let body = non_empty(form.body);
    if let Some(title) = &title {
        validate_min_len("Title", title)?;
    }
    if let Some(body) = &body {
        validate_min_len("Body", body)?;
    }

    let happens_at = match (schema.date_field, non_empty(form.date)) {
        (Some(date_field), Some(raw)) => Some(parse_date(date_field, &raw)?),
        _ => None,
    };

    let image = ingest_optional(&state, schema, form.image).await?;
    let video = ingest_optional(&state, schema, form.video).await?;

    let input = UpdateContentEntry {
        title,
        body,
        video_url: non_empty(form.video_url),
        happens_at,
        image,
        video,
    };

    ContentRepo::update(&state.pool, schema.kind.name(), id, &input)
        .await?
        .ok_or_else(|| not_found(schema, id))?;

    Ok(Json(
        json!({ "message": format!("{} updated successfully", schema.pascal) }),
    ))
}

/// DELETE /{plural}/delete{Pascal}/{id}
///
/// Hard delete. Stored media bytes/files are intentionally left behind.
pub async fn delete(
    schema: &'static ContentSchema,
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<Value>> {
    let deleted = ContentRepo::delete(&state.pool, schema.kind.name(), id).await?;
    if !deleted {
        return Err(not_found(schema, id));
    }
    Ok(Json(
        json!({ "message": format!("{} deleted successfully", schema.pascal) }),
    ))
}

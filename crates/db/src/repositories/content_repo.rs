//! Repository for the `content_entries` table.
//!
//! One repository serves all three content kinds; every query filters on the
//! `kind` column so notifications, tenders, and events never see each other.

use bulletin_core::types::DbId;
use sqlx::PgPool;

use crate::models::content::{ContentEntry, CreateContentEntry, UpdateContentEntry};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, kind, title, body, user_id, video_url, happens_at, \
                       image_data, image_mime, image_key, \
                       video_data, video_mime, video_key, \
                       created_at, updated_at";

/// Provides CRUD + pagination for content entries.
pub struct ContentRepo;

impl ContentRepo {
    /// Insert a new entry, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateContentEntry,
    ) -> Result<ContentEntry, sqlx::Error> {
        let query = format!(
            "INSERT INTO content_entries
                 (kind, title, body, user_id, video_url, happens_at,
                  image_data, image_mime, image_key,
                  video_data, video_mime, video_key)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ContentEntry>(&query)
            .bind(input.kind)
            .bind(&input.title)
            .bind(&input.body)
            .bind(input.user_id)
            .bind(&input.video_url)
            .bind(input.happens_at)
            .bind(&input.image.data)
            .bind(&input.image.mime)
            .bind(&input.image.key)
            .bind(&input.video.data)
            .bind(&input.video.mime)
            .bind(&input.video.key)
            .fetch_one(pool)
            .await
    }

    /// Count entries of one kind.
    pub async fn count(pool: &PgPool, kind: &str) -> Result<i64, sqlx::Error> {
        let count: Option<i64> =
            sqlx::query_scalar("SELECT COUNT(*) FROM content_entries WHERE kind = $1")
                .bind(kind)
                .fetch_one(pool)
                .await?;
        Ok(count.unwrap_or(0))
    }

    /// List one page of entries of one kind, newest first.
    ///
    /// A page past the end simply returns an empty vec.
    pub async fn list(
        pool: &PgPool,
        kind: &str,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<ContentEntry>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM content_entries
             WHERE kind = $1
             ORDER BY created_at DESC, id DESC
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, ContentEntry>(&query)
            .bind(kind)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Find one entry by kind and id.
    pub async fn find_by_id(
        pool: &PgPool,
        kind: &str,
        id: DbId,
    ) -> Result<Option<ContentEntry>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM content_entries WHERE kind = $1 AND id = $2");
        sqlx::query_as::<_, ContentEntry>(&query)
            .bind(kind)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Partially update an entry. Only non-`None` scalar fields overwrite;
    /// a supplied media group replaces that slot's three columns wholesale
    /// (so a new upload clears a stale representation from another backend).
    ///
    /// Returns `None` if no row with the given kind and id exists.
    pub async fn update(
        pool: &PgPool,
        kind: &str,
        id: DbId,
        input: &UpdateContentEntry,
    ) -> Result<Option<ContentEntry>, sqlx::Error> {
        let query = format!(
            "UPDATE content_entries SET
                title      = COALESCE($3, title),
                body       = COALESCE($4, body),
                video_url  = COALESCE($5, video_url),
                happens_at = COALESCE($6, happens_at),
                image_data = CASE WHEN $7 THEN $8  ELSE image_data END,
                image_mime = CASE WHEN $7 THEN $9  ELSE image_mime END,
                image_key  = CASE WHEN $7 THEN $10 ELSE image_key  END,
                video_data = CASE WHEN $11 THEN $12 ELSE video_data END,
                video_mime = CASE WHEN $11 THEN $13 ELSE video_mime END,
                video_key  = CASE WHEN $11 THEN $14 ELSE video_key  END,
                updated_at = NOW()
             WHERE kind = $1 AND id = $2
             RETURNING {COLUMNS}"
        );
        let image = input.image.clone().unwrap_or_default();
        let video = input.video.clone().unwrap_or_default();
        sqlx::query_as::<_, ContentEntry>(&query)
            .bind(kind)
            .bind(id)
            .bind(&input.title)
            .bind(&input.body)
            .bind(&input.video_url)
            .bind(input.happens_at)
            .bind(input.image.is_some())
            .bind(&image.data)
            .bind(&image.mime)
            .bind(&image.key)
            .bind(input.video.is_some())
            .bind(&video.data)
            .bind(&video.mime)
            .bind(&video.key)
            .fetch_optional(pool)
            .await
    }

    /// Hard-delete an entry. Returns `true` if a row was removed.
    ///
    /// Stored media bytes/files are NOT cleaned up; see DESIGN.md.
    pub async fn delete(pool: &PgPool, kind: &str, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM content_entries WHERE kind = $1 AND id = $2")
            .bind(kind)
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

//! Content entry model and DTOs shared by notifications, tenders, and
//! events.

use bulletin_core::media::MediaRef;
use bulletin_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `content_entries` table.
///
/// The three media column groups hold whichever representation the storage
/// backend active at write time produced; [`ContentEntry::image_ref`] and
/// [`ContentEntry::video_ref`] reconstruct the [`MediaRef`] regardless.
#[derive(Debug, Clone, FromRow)]
pub struct ContentEntry {
    pub id: DbId,
    pub kind: String,
    pub title: String,
    pub body: String,
    pub user_id: DbId,
    pub video_url: Option<String>,
    pub happens_at: Option<Timestamp>,
    pub image_data: Option<Vec<u8>>,
    pub image_mime: Option<String>,
    pub image_key: Option<String>,
    pub video_data: Option<Vec<u8>>,
    pub video_mime: Option<String>,
    pub video_key: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Reconstruct a media reference from its column group.
///
/// Inline rows (data + mime) win over key rows; a row with neither is
/// "no media". Absent and NULL are indistinguishable here on purpose.
fn columns_to_ref(
    data: &Option<Vec<u8>>,
    mime: &Option<String>,
    key: &Option<String>,
) -> Option<MediaRef> {
    if let Some(data) = data {
        return Some(MediaRef::Inline {
            data: data.clone(),
            mime: mime.clone().unwrap_or_default(),
        });
    }
    key.as_ref().map(|key| MediaRef::Stored { key: key.clone() })
}

impl ContentEntry {
    pub fn image_ref(&self) -> Option<MediaRef> {
        columns_to_ref(&self.image_data, &self.image_mime, &self.image_key)
    }

    pub fn video_ref(&self) -> Option<MediaRef> {
        columns_to_ref(&self.video_data, &self.video_mime, &self.video_key)
    }
}

/// Flattened media columns for binding into INSERT/UPDATE statements.
#[derive(Debug, Default, Clone)]
pub struct MediaColumns {
    pub data: Option<Vec<u8>>,
    pub mime: Option<String>,
    pub key: Option<String>,
}

impl From<MediaRef> for MediaColumns {
    fn from(media: MediaRef) -> Self {
        match media {
            MediaRef::Inline { data, mime } => Self {
                data: Some(data),
                mime: Some(mime),
                key: None,
            },
            MediaRef::Stored { key } => Self {
                data: None,
                mime: None,
                key: Some(key),
            },
        }
    }
}

impl MediaColumns {
    /// Columns for "nothing uploaded": all NULL.
    pub fn none() -> Self {
        Self::default()
    }

    pub fn from_ref(media: Option<MediaRef>) -> Self {
        media.map(Into::into).unwrap_or_default()
    }
}

/// DTO for inserting a content entry. Validation happens before this is
/// built; the repository binds it verbatim.
#[derive(Debug)]
pub struct CreateContentEntry {
    pub kind: &'static str,
    pub title: String,
    pub body: String,
    pub user_id: DbId,
    pub video_url: Option<String>,
    pub happens_at: Option<Timestamp>,
    pub image: MediaColumns,
    pub video: MediaColumns,
}

/// DTO for a partial update. `None` fields leave the stored value untouched;
/// a `Some` media group replaces that slot's three columns wholesale.
#[derive(Debug, Default)]
pub struct UpdateContentEntry {
    pub title: Option<String>,
    pub body: Option<String>,
    pub video_url: Option<String>,
    pub happens_at: Option<Timestamp>,
    pub image: Option<MediaColumns>,
    pub video: Option<MediaColumns>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inline_columns_roundtrip() {
        let columns = MediaColumns::from_ref(Some(MediaRef::Inline {
            data: vec![1, 2, 3],
            mime: "image/png".into(),
        }));
        assert_eq!(columns.data.as_deref(), Some(&[1u8, 2, 3][..]));
        assert_eq!(columns.mime.as_deref(), Some("image/png"));
        assert_eq!(columns.key, None);
    }

    #[test]
    fn stored_columns_roundtrip() {
        let columns = MediaColumns::from_ref(Some(MediaRef::Stored {
            key: "event_images/x.png".into(),
        }));
        assert_eq!(columns.data, None);
        assert_eq!(columns.key.as_deref(), Some("event_images/x.png"));
    }

    #[test]
    fn absent_media_is_all_null() {
        let columns = MediaColumns::from_ref(None);
        assert_eq!(columns.data, None);
        assert_eq!(columns.mime, None);
        assert_eq!(columns.key, None);
    }
}

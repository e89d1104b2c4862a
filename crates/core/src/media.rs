//! Media references and their pure resolution logic.
//!
//! A [`MediaRef`] is the stable output of the upload path: either the raw
//! bytes themselves (inline policy) or a storage key under a per-kind
//! namespace (disk and blob policies). Resolution turns a reference into the
//! externally consumable form — a base64 data URI or an absolute URL under
//! the static mount — and never fails: an unreadable reference resolves to
//! `None` so a listing degrades to `image: null` instead of erroring.
//!
//! Actual byte persistence (filesystem writes) lives in the API crate; this
//! module only computes keys and representations.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use sha2::{Digest, Sha256};

/// Reference to previously ingested file bytes.
///
/// Exactly one representation is produced per deployment, selected by the
/// configured storage backend. Rows written under a historical policy may
/// hold the other representation; both resolve.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaRef {
    /// Bytes embedded alongside the entity (no external storage).
    Inline { data: Vec<u8>, mime: String },
    /// A filename or blob key under a static mount, e.g.
    /// `tender_images/1691312345678-a3f2c1.png`.
    Stored { key: String },
}

/// Maximum length of a sanitized file extension (without the dot).
const MAX_EXT_LEN: usize = 10;

/// Extract and sanitize the extension of an uploaded filename.
///
/// Returns `".png"`-style suffixes, or an empty string when the filename has
/// no usable extension. Only ASCII alphanumerics survive sanitization so a
/// hostile filename cannot inject path separators into the key.
fn sanitized_extension(filename: &str) -> String {
    let ext: String = std::path::Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .take(MAX_EXT_LEN)
        .collect::<String>()
        .to_lowercase();
    if ext.is_empty() {
        String::new()
    } else {
        format!(".{ext}")
    }
}

/// Generate a collision-resistant storage key for the disk backend.
///
/// Key shape: `<namespace>/<unix_millis>-<6 hex rand><.ext>`. The random
/// suffix keeps two uploads in the same millisecond from colliding.
pub fn disk_key(namespace: &str, original_filename: &str) -> String {
    let millis = chrono::Utc::now().timestamp_millis();
    let suffix = rand::random::<u32>() & 0x00ff_ffff;
    format!(
        "{namespace}/{millis}-{suffix:06x}{}",
        sanitized_extension(original_filename)
    )
}

/// Generate a content-addressed storage key for the blob backend.
///
/// Key shape: `<namespace>/<sha256 hex><.ext>`. Identical bytes map to the
/// same key, so duplicate uploads dedupe.
pub fn blob_key(namespace: &str, data: &[u8], original_filename: &str) -> String {
    let digest = Sha256::digest(data);
    format!(
        "{namespace}/{:x}{}",
        digest,
        sanitized_extension(original_filename)
    )
}

/// Resolve a media reference to its externally consumable form.
///
/// - `None` in, `None` out.
/// - Inline bytes become `data:<mime>;base64,<encoded>`; a row missing its
///   MIME resolves to `None` rather than producing a malformed URI.
/// - Stored keys become `<public_base_url>/<key>`; an empty key resolves to
///   `None`.
pub fn resolve_media(media: Option<&MediaRef>, public_base_url: &str) -> Option<String> {
    match media? {
        MediaRef::Inline { data, mime } => {
            if mime.is_empty() {
                return None;
            }
            Some(format!("data:{mime};base64,{}", BASE64.encode(data)))
        }
        MediaRef::Stored { key } => {
            if key.is_empty() {
                return None;
            }
            Some(format!("{}/{key}", public_base_url.trim_end_matches('/')))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inline_resolves_to_data_uri_roundtrip() {
        let bytes = b"\x89PNG\r\n\x1a\nfakeimagedata".to_vec();
        let media = MediaRef::Inline {
            data: bytes.clone(),
            mime: "image/png".into(),
        };
        let uri = resolve_media(Some(&media), "http://localhost:3000").unwrap();

        let (prefix, encoded) = uri.split_once(";base64,").expect("data URI shape");
        assert_eq!(prefix, "data:image/png");
        assert_eq!(BASE64.decode(encoded).unwrap(), bytes);
    }

    #[test]
    fn absent_media_resolves_to_none() {
        assert_eq!(resolve_media(None, "http://localhost:3000"), None);
    }

    #[test]
    fn inline_without_mime_resolves_to_none() {
        let media = MediaRef::Inline {
            data: vec![1, 2, 3],
            mime: String::new(),
        };
        assert_eq!(resolve_media(Some(&media), "http://localhost:3000"), None);
    }

    #[test]
    fn stored_resolves_to_absolute_url() {
        let media = MediaRef::Stored {
            key: "tender_images/123-abc.png".into(),
        };
        assert_eq!(
            resolve_media(Some(&media), "https://cdn.example.com"),
            Some("https://cdn.example.com/tender_images/123-abc.png".into())
        );
    }

    #[test]
    fn stored_url_handles_trailing_slash_base() {
        let media = MediaRef::Stored {
            key: "event_images/x.jpg".into(),
        };
        assert_eq!(
            resolve_media(Some(&media), "http://localhost:3000/"),
            Some("http://localhost:3000/event_images/x.jpg".into())
        );
    }

    #[test]
    fn stored_with_empty_key_resolves_to_none() {
        let media = MediaRef::Stored { key: String::new() };
        assert_eq!(resolve_media(Some(&media), "http://localhost:3000"), None);
    }

    #[test]
    fn disk_keys_carry_namespace_and_extension() {
        let key = disk_key("notification_images", "photo.PNG");
        assert!(key.starts_with("notification_images/"));
        assert!(key.ends_with(".png"));
    }

    #[test]
    fn disk_keys_are_unique_per_call() {
        let a = disk_key("tender_images", "a.jpg");
        let b = disk_key("tender_images", "a.jpg");
        assert_ne!(a, b);
    }

    #[test]
    fn disk_key_without_extension() {
        let key = disk_key("event_images", "upload");
        assert!(!key.contains('.'));
    }

    #[test]
    fn hostile_extension_is_sanitized() {
        let key = disk_key("event_images", "evil.p/../ng");
        // Only the alphanumeric characters of the final extension survive.
        assert_eq!(key.matches('/').count(), 1, "key must stay in its namespace: {key}");
    }

    #[test]
    fn blob_key_is_content_addressed() {
        let a = blob_key("event_images", b"same bytes", "a.mp4");
        let b = blob_key("event_images", b"same bytes", "b.mp4");
        let c = blob_key("event_images", b"other bytes", "a.mp4");
        // Same content, same digest; extension comes from the filename.
        assert_eq!(a.split('/').nth(1).unwrap().split('.').next().unwrap(),
                   b.split('/').nth(1).unwrap().split('.').next().unwrap());
        assert_ne!(a, c);
        assert!(a.ends_with(".mp4"));
    }
}

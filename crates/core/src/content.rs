//! Content kind enum and per-kind schema descriptors.
//!
//! Notifications, tenders, and events share one entity shape; the
//! differences (date field, video handling) live in a static
//! [`ContentSchema`] so the repository and handlers are written once and
//! instantiated three times.

use crate::error::CoreError;

/// The three supported content kinds, stored in the `kind` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind {
    Notification,
    Tender,
    Event,
}

impl ContentKind {
    /// Parse from the database `kind` column.
    pub fn from_name(name: &str) -> Result<Self, CoreError> {
        match name {
            "notification" => Ok(Self::Notification),
            "tender" => Ok(Self::Tender),
            "event" => Ok(Self::Event),
            other => Err(CoreError::Validation(format!(
                "Unknown content kind '{other}'"
            ))),
        }
    }

    /// Database column value.
    pub fn name(self) -> &'static str {
        match self {
            Self::Notification => "notification",
            Self::Tender => "tender",
            Self::Event => "event",
        }
    }
}

/// Static description of one content kind's shape and endpoint naming.
///
/// `date_field` is the client-facing form/JSON key for the kind's domain
/// date (`tenderDate`, `eventDate`); kinds without a date carry `None`.
#[derive(Debug)]
pub struct ContentSchema {
    pub kind: ContentKind,
    /// Lowercase singular, used in JSON keys: `"notification"`.
    pub singular: &'static str,
    /// Lowercase plural, used in JSON keys: `"notifications"`.
    pub plural: &'static str,
    /// PascalCase singular, used in route names and messages: `"Notification"`.
    pub pascal: &'static str,
    /// PascalCase plural, used in route names and the `total*` key: `"Notifications"`.
    pub pascal_plural: &'static str,
    pub date_field: Option<&'static str>,
    pub date_required: bool,
    pub allows_video_url: bool,
    pub allows_video_upload: bool,
}

impl ContentSchema {
    /// Static mount path for this kind's stored media files, e.g.
    /// `"notification_images"`. Doubles as the storage-key namespace.
    pub fn media_namespace(&self) -> String {
        format!("{}_images", self.singular)
    }
}

/// Notifications: no date, external video URLs allowed, no video upload.
pub static NOTIFICATION: ContentSchema = ContentSchema {
    kind: ContentKind::Notification,
    singular: "notification",
    plural: "notifications",
    pascal: "Notification",
    pascal_plural: "Notifications",
    date_field: None,
    date_required: false,
    allows_video_url: true,
    allows_video_upload: false,
};

/// Tenders: required tender date, external video URLs allowed.
pub static TENDER: ContentSchema = ContentSchema {
    kind: ContentKind::Tender,
    singular: "tender",
    plural: "tenders",
    pascal: "Tender",
    pascal_plural: "Tenders",
    date_field: Some("tenderDate"),
    date_required: true,
    allows_video_url: true,
    allows_video_upload: false,
};

/// Events: required event date, uploaded video files instead of URLs.
pub static EVENT: ContentSchema = ContentSchema {
    kind: ContentKind::Event,
    singular: "event",
    plural: "events",
    pascal: "Event",
    pascal_plural: "Events",
    date_field: Some("eventDate"),
    date_required: true,
    allows_video_url: false,
    allows_video_upload: true,
};

/// All schemas, in mount order.
pub static ALL_SCHEMAS: [&ContentSchema; 3] = [&NOTIFICATION, &TENDER, &EVENT];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_from_name_roundtrip() {
        for kind in [
            ContentKind::Notification,
            ContentKind::Tender,
            ContentKind::Event,
        ] {
            assert_eq!(ContentKind::from_name(kind.name()).unwrap(), kind);
        }
        assert!(ContentKind::from_name("article").is_err());
        assert!(ContentKind::from_name("").is_err());
    }

    #[test]
    fn media_namespace_uses_singular() {
        assert_eq!(NOTIFICATION.media_namespace(), "notification_images");
        assert_eq!(TENDER.media_namespace(), "tender_images");
        assert_eq!(EVENT.media_namespace(), "event_images");
    }

    #[test]
    fn only_events_take_video_uploads() {
        assert!(!NOTIFICATION.allows_video_upload);
        assert!(!TENDER.allows_video_upload);
        assert!(EVENT.allows_video_upload);
        assert!(!EVENT.allows_video_url);
    }
}

//! Attachment handles and the upload policy for document slots.
//!
//! Files picked by the applicant are held as [`AttachmentHandle`]s: a display
//! name, size, MIME type and an opaque reference to content owned by the
//! caller. Content is never serialized into drafts; only the display name
//! survives a draft save, and a restored draft always comes back with empty
//! file slots.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use uuid::Uuid;

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Maximum attachment size (5 MiB).
pub const MAX_ATTACHMENT_BYTES: u64 = 5 * 1024 * 1024;

/// Extensions accepted by document slots.
pub const DOCUMENT_EXTENSIONS: &[&str] = &["pdf", "jpg", "jpeg", "png"];

/// Extensions accepted by the applicant photo slot.
pub const PHOTO_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png"];

// ---------------------------------------------------------------------------
// Handles
// ---------------------------------------------------------------------------

/// Opaque reference to attachment content held outside the form data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContentRef(Uuid);

impl ContentRef {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ContentRef {
    fn default() -> Self {
        Self::new()
    }
}

/// A file attached to a form slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttachmentHandle {
    pub display_name: String,
    pub size_bytes: u64,
    pub mime_type: String,
    pub content_ref: ContentRef,
}

impl AttachmentHandle {
    pub fn new(display_name: impl Into<String>, size_bytes: u64, mime_type: impl Into<String>) -> Self {
        Self {
            display_name: display_name.into(),
            size_bytes,
            mime_type: mime_type.into(),
            content_ref: ContentRef::new(),
        }
    }

    /// Lower-cased extension of the display name, if any.
    pub fn extension(&self) -> Option<String> {
        let (stem, ext) = self.display_name.rsplit_once('.')?;
        if stem.is_empty() || ext.is_empty() {
            return None;
        }
        Some(ext.to_ascii_lowercase())
    }
}

/// JSON key that identifies a serialized [`AttachmentHandle`].
pub(crate) const CONTENT_REF_KEY: &str = "contentRef";

/// JSON key holding an attachment's display name.
pub(crate) const DISPLAY_NAME_KEY: &str = "displayName";

/// A form slot that may hold one attachment.
///
/// Serializes as the full handle or `null`. Deserializing a bare string (the
/// file name left behind in a draft) yields an empty slot, because the
/// content cannot be reconstructed from a name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileField(Option<AttachmentHandle>);

impl FileField {
    pub fn empty() -> Self {
        Self(None)
    }

    pub fn attached(handle: AttachmentHandle) -> Self {
        Self(Some(handle))
    }

    pub fn is_attached(&self) -> bool {
        self.0.is_some()
    }

    pub fn handle(&self) -> Option<&AttachmentHandle> {
        self.0.as_ref()
    }

    pub fn display_name(&self) -> Option<&str> {
        self.0.as_ref().map(|h| h.display_name.as_str())
    }
}

impl Serialize for FileField {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for FileField {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Handle(AttachmentHandle),
            DetachedName(String),
        }

        Ok(match Option::<Repr>::deserialize(deserializer)? {
            Some(Repr::Handle(handle)) => FileField(Some(handle)),
            Some(Repr::DetachedName(_)) | None => FileField(None),
        })
    }
}

// ---------------------------------------------------------------------------
// Policy
// ---------------------------------------------------------------------------

/// File-type and size constraints for one kind of slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttachmentPolicy {
    pub allowed_extensions: &'static [&'static str],
    pub max_bytes: u64,
}

impl AttachmentPolicy {
    /// Certificates, proofs and other uploaded documents.
    pub const DOCUMENT: AttachmentPolicy = AttachmentPolicy {
        allowed_extensions: DOCUMENT_EXTENSIONS,
        max_bytes: MAX_ATTACHMENT_BYTES,
    };

    /// Passport-style applicant photo.
    pub const PHOTO: AttachmentPolicy = AttachmentPolicy {
        allowed_extensions: PHOTO_EXTENSIONS,
        max_bytes: MAX_ATTACHMENT_BYTES,
    };

    /// Policy applied to the slot at a dotted field path.
    pub fn for_path(path: &str) -> AttachmentPolicy {
        if path == "photo" {
            Self::PHOTO
        } else {
            Self::DOCUMENT
        }
    }

    /// Check a handle against the policy. The error message is meant to be
    /// shown to the applicant as-is.
    pub fn check(&self, handle: &AttachmentHandle) -> Result<(), CoreError> {
        let allowed = || {
            self.allowed_extensions
                .iter()
                .map(|e| format!(".{e}"))
                .collect::<Vec<_>>()
                .join(", ")
        };

        match handle.extension() {
            Some(ext) if self.allowed_extensions.contains(&ext.as_str()) => {}
            _ => {
                return Err(CoreError::AttachmentRejected(format!(
                    "'{}' is not an accepted file type. Accepted types: {}",
                    handle.display_name,
                    allowed()
                )));
            }
        }

        if handle.size_bytes > self.max_bytes {
            return Err(CoreError::AttachmentRejected(format!(
                "'{}' is {} bytes; the maximum allowed size is {} MB",
                handle.display_name,
                handle.size_bytes,
                self.max_bytes / (1024 * 1024)
            )));
        }

        Ok(())
    }
}

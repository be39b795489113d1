//! Multipart body for store create/update requests.
//!
//! One JSON part carries the [`StoreDraft`]; each newly selected image becomes
//! its own `images` file part, in selection order so that `thumbnailIndex`
//! lines up with the server's view of the upload list.

use pinup_core::{ImageFile, StoreDraft};
use reqwest::multipart::{Form, Part};

use crate::error::ClientError;

/// Form field that carries every uploaded image.
pub const IMAGES_PART: &str = "images";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionKind {
    Create,
    Update,
}

impl SubmissionKind {
    /// Name of the JSON metadata part expected by the server for this kind.
    #[must_use]
    pub fn metadata_part(self) -> &'static str {
        match self {
            SubmissionKind::Create => "storeRequest",
            SubmissionKind::Update => "request",
        }
    }
}

/// Everything one store request sends: the metadata and the new image files.
#[derive(Debug, Clone)]
pub struct StoreSubmission {
    pub draft: StoreDraft,
    pub images: Vec<ImageFile>,
}

impl StoreSubmission {
    /// Builds the multipart form for `kind`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Encode`] if the draft cannot be encoded, or
    /// [`ClientError::Http`] if a part carries an unparseable MIME type.
    pub fn into_form(self, kind: SubmissionKind) -> Result<Form, ClientError> {
        let json = serde_json::to_string(&self.draft).map_err(|e| ClientError::Encode {
            context: format!("{} part", kind.metadata_part()),
            source: e,
        })?;

        let metadata = Part::text(json).mime_str("application/json")?;
        let mut form = Form::new().part(kind.metadata_part(), metadata);

        for image in self.images {
            let part = Part::bytes(image.bytes)
                .file_name(image.file_name)
                .mime_str(&image.content_type)?;
            form = form.part(IMAGES_PART, part);
        }

        Ok(form)
    }
}

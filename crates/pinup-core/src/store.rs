//! Store listing model: the editable fields, operating hours, image files and
//! the per-submission `StoreDraft` that is sent as the JSON metadata part.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::ids::{CategoryId, ImageId, LocationId};

/// Maximum number of operating-hour rows a store listing may carry.
pub const MAX_OPERATING_HOURS: usize = 5;

/// One operating-hours row. Any field may still be empty at submission time;
/// the server is responsible for rejecting incomplete rows.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperatingInterval {
    /// Free-text day or day range, e.g. `"Mon"` or `"Mon~Thu"`.
    #[serde(alias = "day")]
    pub days: String,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
}

impl OperatingInterval {
    #[must_use]
    pub fn new(days: impl Into<String>, start_time: NaiveTime, end_time: NaiveTime) -> Self {
        Self {
            days: days.into(),
            start_time: Some(start_time),
            end_time: Some(end_time),
        }
    }
}

/// Identifying and contact fields of a store listing as typed into the form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreFields {
    pub name: String,
    pub description: String,
    pub category_id: Option<CategoryId>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sns_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_number: Option<String>,
}

impl StoreFields {
    /// Trims the optional contact fields and drops the ones left empty so
    /// they are omitted from the request instead of sent as `""`.
    #[must_use]
    pub fn normalized(mut self) -> Self {
        for field in [
            &mut self.website_url,
            &mut self.sns_url,
            &mut self.contact_number,
        ] {
            *field = field
                .take()
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty());
        }
        self
    }
}

/// Which image is the listing thumbnail.
///
/// New files are referenced by their position in the upload list, persisted
/// images by id. On the wire the variant becomes either `thumbnailIndex` or
/// `thumbnailId`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ThumbnailRef {
    #[serde(rename = "thumbnailIndex")]
    New(usize),
    #[serde(rename = "thumbnailId")]
    Existing(ImageId),
}

/// JSON metadata part of a store create/update request.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreDraft {
    #[serde(flatten)]
    pub fields: StoreFields,
    pub location_id: LocationId,
    pub operating_hours: Vec<OperatingInterval>,
    #[serde(flatten)]
    pub thumbnail: Option<ThumbnailRef>,
    /// Only present on update.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted_image_ids: Option<Vec<ImageId>>,
}

/// A user-selected image file.
#[derive(Clone, PartialEq, Eq)]
pub struct ImageFile {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl ImageFile {
    /// Wraps raw bytes, inferring the content type from the file extension.
    #[must_use]
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let file_name = file_name.into();
        let content_type = content_type_for(&file_name).to_string();
        Self {
            file_name,
            content_type,
            bytes,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl std::fmt::Debug for ImageFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageFile")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

fn content_type_for(file_name: &str) -> &'static str {
    let ext = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        _ => "application/octet-stream",
    }
}

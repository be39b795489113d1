//! Wire types for the marketplace REST API.

use chrono::NaiveDate;
use pinup_core::{
    CategoryId, ImageId, LocationDraft, LocationId, LocationRecord, OperatingInterval, StoreFields,
    StoreId,
};
use serde::{Deserialize, Serialize};

/// Body of `POST /api/locations` and `PUT /api/locations/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationRequest {
    pub name: String,
    pub zone_code: String,
    pub state: Option<String>,
    pub district: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub address: String,
    pub address_detail: Option<String>,
}

impl LocationRequest {
    #[must_use]
    pub fn from_draft(name: &str, draft: &LocationDraft) -> Self {
        Self {
            name: name.to_string(),
            zone_code: draft.zone_code.trim().to_string(),
            state: draft.state.clone(),
            district: draft.district.clone(),
            latitude: draft.coordinates.map(|c| c.latitude),
            longitude: draft.coordinates.map(|c| c.longitude),
            address: draft.address.trim().to_string(),
            address_detail: draft
                .address_detail
                .as_deref()
                .map(str::trim)
                .filter(|d| !d.is_empty())
                .map(str::to_string),
        }
    }
}

/// A location as returned by the server. Every field but `id` is lenient so
/// that partial responses still decode.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationResponse {
    pub id: Option<LocationId>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub zone_code: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub district: Option<String>,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub address_detail: Option<String>,
}

impl LocationResponse {
    /// Converts into a [`LocationRecord`], or `None` when the id is absent.
    #[must_use]
    pub fn into_record(self) -> Option<LocationRecord> {
        Some(LocationRecord {
            id: self.id?,
            name: self.name,
            zone_code: self.zone_code,
            state: self.state,
            district: self.district,
            latitude: self.latitude,
            longitude: self.longitude,
            address: self.address,
            address_detail: self.address_detail,
        })
    }
}

/// Minimal success body of a store create/update: only the id matters.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatedResource {
    pub id: Option<StoreId>,
}

/// Structured error body. Other fields the server sends are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}

/// Only the id feeds back into [`StoreFields`].
#[derive(Debug, Clone, Deserialize)]
pub struct CategoryResponse {
    pub id: CategoryId,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreImageResponse {
    pub id: ImageId,
    pub image_url: String,
    #[serde(default)]
    pub is_thumbnail: bool,
}

/// `GET /api/stores/{id}`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreResponse {
    pub id: StoreId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: Option<CategoryResponse>,
    #[serde(default)]
    pub location: Option<LocationResponse>,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub website_url: Option<String>,
    #[serde(default)]
    pub sns_url: Option<String>,
    #[serde(default)]
    pub contact_number: Option<String>,
    #[serde(default)]
    pub operating_hours: Vec<OperatingInterval>,
    #[serde(default, alias = "storeImages")]
    pub images: Vec<StoreImageResponse>,
}

impl StoreResponse {
    /// The editable fields of this store, as they would prefill an edit form.
    #[must_use]
    pub fn fields(&self) -> StoreFields {
        StoreFields {
            name: self.name.clone(),
            description: self.description.clone(),
            category_id: self.category.as_ref().map(|c| c.id),
            start_date: self.start_date,
            end_date: self.end_date,
            website_url: self.website_url.clone(),
            sns_url: self.sns_url.clone(),
            contact_number: self.contact_number.clone(),
        }
        .normalized()
    }
}

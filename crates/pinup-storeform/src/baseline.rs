//! Persisted state an update form starts from.

use pinup_client::StoreResponse;
use pinup_core::{ImageId, LocationRecord, OperatingInterval, StoreFields, StoreId};

use crate::images::ExistingImage;

/// What an update diffs against: the store being edited and the location it
/// currently points at.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateBaseline {
    pub store_id: StoreId,
    pub location: LocationRecord,
}

/// Everything needed to open an edit form for an existing store.
#[derive(Debug, Clone, PartialEq)]
pub struct PersistedStore {
    pub baseline: UpdateBaseline,
    pub fields: StoreFields,
    pub operating_hours: Vec<OperatingInterval>,
    pub images: Vec<ExistingImage>,
    pub thumbnail: Option<ImageId>,
}

impl PersistedStore {
    /// Builds the edit seed from `GET /api/stores/{id}`. Returns `None` when
    /// the store has no location with an id.
    #[must_use]
    pub fn from_response(store: &StoreResponse) -> Option<Self> {
        let location = store.location.clone()?.into_record()?;

        let images = store
            .images
            .iter()
            .map(|image| ExistingImage {
                id: image.id,
                url: image.image_url.clone(),
            })
            .collect();
        let thumbnail = store
            .images
            .iter()
            .find(|image| image.is_thumbnail)
            .map(|image| image.id);

        Some(Self {
            baseline: UpdateBaseline {
                store_id: store.id,
                location,
            },
            fields: store.fields(),
            operating_hours: store.operating_hours.clone(),
            images,
            thumbnail,
        })
    }
}

//! Address drafts produced by the lookup provider and the persisted
//! location records they turn into.

use serde::{Deserialize, Serialize};

use crate::ids::LocationId;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// The result of the last completed address lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationDraft {
    /// Postal zone code.
    pub zone_code: String,
    /// Normalized road address.
    pub address: String,
    pub address_detail: Option<String>,
    /// Region (province / metropolitan city).
    pub state: Option<String>,
    /// Sub-region (city / county / district).
    pub district: Option<String>,
    /// Geocoded position, when the lookup provider supplied one.
    pub coordinates: Option<Coordinates>,
}

/// A location as persisted by the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationRecord {
    pub id: LocationId,
    pub name: Option<String>,
    pub zone_code: Option<String>,
    pub state: Option<String>,
    pub district: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub address: Option<String>,
    pub address_detail: Option<String>,
}

/// Trims a field and folds empty strings into `None`.
#[must_use]
pub fn normalize_field(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

impl LocationDraft {
    /// Returns `true` when any address field differs from `record` after
    /// trimming and treating empty strings as absent.
    ///
    /// Coordinates are derived from the address and are not compared.
    #[must_use]
    pub fn differs_from(&self, record: &LocationRecord) -> bool {
        let pairs = [
            (Some(self.zone_code.as_str()), record.zone_code.as_deref()),
            (Some(self.address.as_str()), record.address.as_deref()),
            (
                self.address_detail.as_deref(),
                record.address_detail.as_deref(),
            ),
            (self.state.as_deref(), record.state.as_deref()),
            (self.district.as_deref(), record.district.as_deref()),
        ];

        pairs
            .iter()
            .any(|(draft, stored)| normalize_field(*draft) != normalize_field(*stored))
    }

    /// Builds a draft mirroring a persisted record, e.g. to prefill the
    /// address inputs of an edit form.
    #[must_use]
    pub fn from_record(record: &LocationRecord) -> Self {
        let coordinates = match (record.latitude, record.longitude) {
            (Some(latitude), Some(longitude)) => Some(Coordinates {
                latitude,
                longitude,
            }),
            _ => None,
        };

        Self {
            zone_code: record.zone_code.clone().unwrap_or_default(),
            address: record.address.clone().unwrap_or_default(),
            address_detail: record.address_detail.clone(),
            state: record.state.clone(),
            district: record.district.clone(),
            coordinates,
        }
    }
}

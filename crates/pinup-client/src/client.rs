//! HTTP client for the marketplace location and store endpoints.
//!
//! Wraps `reqwest` with typed request/response bodies. Every non-2xx status
//! is surfaced as [`ClientError::Api`] carrying the `message` field of the
//! error body when the server sent one.

use std::time::Duration;

use pinup_core::{AppConfig, LocationDraft, LocationId, LocationRecord, StoreId};
use reqwest::{Client, Response, Url};
use serde::de::DeserializeOwned;

use crate::error::ClientError;
use crate::multipart::{StoreSubmission, SubmissionKind};
use crate::types::{CreatedResource, ErrorBody, LocationRequest, LocationResponse, StoreResponse};

const DEFAULT_USER_AGENT: &str = "pinup/0.1 (store-form)";
const DEFAULT_LOCATION_NAME: &str = "Registered address";

/// Client for the marketplace REST API.
///
/// Use [`PinupClient::new`] with the loaded [`AppConfig`], or
/// [`PinupClient::with_base_url`] to point at a mock server in tests.
pub struct PinupClient {
    client: Client,
    base_url: Url,
    location_name: String,
}

impl PinupClient {
    /// Creates a client from application configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`ClientError::InvalidBaseUrl`] if the
    /// configured base URL does not parse.
    pub fn new(config: &AppConfig) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.http_timeout_secs))
            .connect_timeout(Duration::from_secs(config.http_connect_timeout_secs))
            .user_agent(config.http_user_agent.as_str())
            .build()?;

        Ok(Self {
            client,
            base_url: parse_base_url(&config.api_base_url)?,
            location_name: config.location_name.clone(),
        })
    }

    /// Creates a client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Same as [`PinupClient::new`].
    pub fn with_base_url(base_url: &str, timeout_secs: u64) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(DEFAULT_USER_AGENT)
            .build()?;

        Ok(Self {
            client,
            base_url: parse_base_url(base_url)?,
            location_name: DEFAULT_LOCATION_NAME.to_string(),
        })
    }

    /// Overrides the display name sent with newly registered locations.
    #[must_use]
    pub fn with_location_name(mut self, name: impl Into<String>) -> Self {
        self.location_name = name.into();
        self
    }

    /// Registers a new location for `draft` (`POST /api/locations`).
    ///
    /// # Errors
    ///
    /// - [`ClientError::Api`] on a non-2xx status.
    /// - [`ClientError::Http`] on network failure.
    /// - [`ClientError::Deserialize`] / [`ClientError::MissingIdentifier`]
    ///   if the response does not describe a location.
    pub async fn create_location(
        &self,
        draft: &LocationDraft,
    ) -> Result<LocationRecord, ClientError> {
        let url = self.endpoint("api/locations")?;
        let body = LocationRequest::from_draft(&self.location_name, draft);
        tracing::debug!(%url, zone_code = %body.zone_code, "registering location");

        let response = self.client.post(url).json(&body).send().await?;
        let location: LocationResponse = decode(response, "create location").await?;
        location
            .into_record()
            .ok_or_else(|| ClientError::MissingIdentifier {
                context: "create location".to_string(),
            })
    }

    /// Replaces the address of an existing location (`PUT /api/locations/{id}`).
    ///
    /// # Errors
    ///
    /// Same as [`PinupClient::create_location`].
    pub async fn update_location(
        &self,
        id: LocationId,
        draft: &LocationDraft,
    ) -> Result<LocationRecord, ClientError> {
        let url = self.endpoint(&format!("api/locations/{id}"))?;
        let body = LocationRequest::from_draft(&self.location_name, draft);
        tracing::debug!(%url, location_id = %id, "updating location");

        let context = format!("update location {id}");
        let response = self.client.put(url).json(&body).send().await?;
        let location: LocationResponse = decode(response, &context).await?;
        location
            .into_record()
            .ok_or(ClientError::MissingIdentifier { context })
    }

    /// Creates a store listing (`POST /api/stores`, multipart).
    ///
    /// # Errors
    ///
    /// - [`ClientError::Api`] on a non-2xx status.
    /// - [`ClientError::Http`] on network failure.
    /// - [`ClientError::MissingIdentifier`] if the success body has no `id`.
    pub async fn create_store(&self, submission: StoreSubmission) -> Result<StoreId, ClientError> {
        let url = self.endpoint("api/stores")?;
        tracing::debug!(%url, image_count = submission.images.len(), "creating store");

        let form = submission.into_form(SubmissionKind::Create)?;
        let response = self.client.post(url).multipart(form).send().await?;
        let created: CreatedResource = decode(response, "create store").await?;
        created.id.ok_or_else(|| ClientError::MissingIdentifier {
            context: "create store".to_string(),
        })
    }

    /// Patches an existing store listing (`PATCH /api/stores/{id}`, multipart).
    ///
    /// # Errors
    ///
    /// Same as [`PinupClient::create_store`].
    pub async fn update_store(
        &self,
        id: StoreId,
        submission: StoreSubmission,
    ) -> Result<StoreId, ClientError> {
        let url = self.endpoint(&format!("api/stores/{id}"))?;
        tracing::debug!(
            %url,
            store_id = %id,
            image_count = submission.images.len(),
            "updating store"
        );

        let context = format!("update store {id}");
        let form = submission.into_form(SubmissionKind::Update)?;
        let response = self.client.patch(url).multipart(form).send().await?;
        let updated: CreatedResource = decode(response, &context).await?;
        updated.id.ok_or(ClientError::MissingIdentifier { context })
    }

    /// Fetches a store listing (`GET /api/stores/{id}`).
    ///
    /// # Errors
    ///
    /// - [`ClientError::Api`] on a non-2xx status (e.g. 404).
    /// - [`ClientError::Http`] on network failure.
    /// - [`ClientError::Deserialize`] if the body does not match.
    pub async fn get_store(&self, id: StoreId) -> Result<StoreResponse, ClientError> {
        let url = self.endpoint(&format!("api/stores/{id}"))?;
        let response = self.client.get(url).send().await?;
        decode(response, &format!("get store {id}")).await
    }

    /// Deletes a store listing (`DELETE /api/stores/{id}`).
    ///
    /// # Errors
    ///
    /// - [`ClientError::Api`] on a non-2xx status.
    /// - [`ClientError::Http`] on network failure.
    pub async fn delete_store(&self, id: StoreId) -> Result<(), ClientError> {
        let url = self.endpoint(&format!("api/stores/{id}"))?;
        tracing::debug!(%url, store_id = %id, "deleting store");
        let response = self.client.delete(url).send().await?;
        ensure_success(response).await.map(|_| ())
    }

    /// Resolves `path` against the base URL.
    fn endpoint(&self, path: &str) -> Result<Url, ClientError> {
        self.base_url
            .join(path)
            .map_err(|e| ClientError::InvalidBaseUrl {
                base_url: self.base_url.to_string(),
                reason: e.to_string(),
            })
    }
}

/// Parses the base URL, normalising it to end with exactly one slash so that
/// relative joins append to the path instead of replacing its last segment.
fn parse_base_url(base_url: &str) -> Result<Url, ClientError> {
    let normalised = format!("{}/", base_url.trim_end_matches('/'));
    Url::parse(&normalised).map_err(|e| ClientError::InvalidBaseUrl {
        base_url: base_url.to_string(),
        reason: e.to_string(),
    })
}

/// Reads the body and maps a non-2xx status to [`ClientError::Api`].
async fn ensure_success(response: Response) -> Result<String, ClientError> {
    let status = response.status();
    let url = response.url().clone();
    let body = response.text().await?;

    if !status.is_success() {
        let message = error_message(&body);
        tracing::warn!(
            status = status.as_u16(),
            %url,
            message = message.as_deref().unwrap_or(""),
            "request rejected"
        );
        return Err(ClientError::Api {
            status: status.as_u16(),
            message,
        });
    }

    Ok(body)
}

/// Asserts a 2xx status and parses the body as `T`.
async fn decode<T: DeserializeOwned>(response: Response, context: &str) -> Result<T, ClientError> {
    let body = ensure_success(response).await?;
    serde_json::from_str(&body).map_err(|e| ClientError::Deserialize {
        context: context.to_string(),
        source: e,
    })
}

/// Extracts a non-blank `message` from a JSON error body.
fn error_message(body: &str) -> Option<String> {
    serde_json::from_str::<ErrorBody>(body)
        .ok()?
        .message
        .map(|m| m.trim().to_string())
        .filter(|m| !m.is_empty())
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;

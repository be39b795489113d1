//! Collaborators the store form talks to.
//!
//! [`PinupClient`] implements both persistence traits; tests substitute
//! in-memory fakes.

use async_trait::async_trait;
use pinup_client::{ClientError, PinupClient, StoreSubmission};
use pinup_core::{LocationDraft, LocationId, LocationRecord, StoreId};

#[async_trait]
pub trait LocationService: Send + Sync {
    /// Persists a new location for `draft`.
    async fn create_location(&self, draft: &LocationDraft) -> Result<LocationRecord, ClientError>;

    /// Overwrites the address of location `id`.
    async fn patch_location(
        &self,
        id: LocationId,
        draft: &LocationDraft,
    ) -> Result<LocationRecord, ClientError>;
}

#[async_trait]
pub trait StoreService: Send + Sync {
    async fn create_store(&self, submission: StoreSubmission) -> Result<StoreId, ClientError>;

    async fn update_store(
        &self,
        id: StoreId,
        submission: StoreSubmission,
    ) -> Result<StoreId, ClientError>;
}

/// Shows a one-line message to the user.
pub trait Notifier: Send + Sync {
    fn alert(&self, message: &str);
}

#[async_trait]
impl LocationService for PinupClient {
    async fn create_location(&self, draft: &LocationDraft) -> Result<LocationRecord, ClientError> {
        PinupClient::create_location(self, draft).await
    }

    async fn patch_location(
        &self,
        id: LocationId,
        draft: &LocationDraft,
    ) -> Result<LocationRecord, ClientError> {
        self.update_location(id, draft).await
    }
}

#[async_trait]
impl StoreService for PinupClient {
    async fn create_store(&self, submission: StoreSubmission) -> Result<StoreId, ClientError> {
        PinupClient::create_store(self, submission).await
    }

    async fn update_store(
        &self,
        id: StoreId,
        submission: StoreSubmission,
    ) -> Result<StoreId, ClientError> {
        PinupClient::update_store(self, id, submission).await
    }
}

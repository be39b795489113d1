//! The store form and its submission state machine.
//!
//! A submission walks `ResolvingLocation → BuildingRequest → Submitting` and
//! ends in `Succeeded` or `Failed`. A create with no address fails straight
//! from `Idle`. Only one run is in flight per form; the
//! form model stays editable meanwhile and is snapshotted once, when the
//! request is built.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use pinup_client::{PinupClient, StoreSubmission};
use pinup_core::{
    ImageFile, ImageId, LocationDraft, LocationId, OperatingInterval, StoreDraft, StoreFields,
    StoreId, ThumbnailRef,
};
use tokio::sync::watch;

use crate::address::AddressSource;
use crate::baseline::{PersistedStore, UpdateBaseline};
use crate::error::{SubmitError, SubmitErrorKind};
use crate::hours::{OperatingHoursEditor, RowId};
use crate::images::{AssetView, ImagePreviewManager, SubmittedImages};
use crate::ports::{LocationService, Notifier, StoreService};
use crate::preview::PreviewUrls;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitAction {
    Create,
    Update,
}

/// Observable progress of the current (or last) submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitState {
    Idle,
    ResolvingLocation,
    BuildingRequest,
    Submitting,
    Succeeded(StoreId),
    Failed(SubmitErrorKind),
}

#[derive(Debug)]
pub enum SubmitOutcome {
    Succeeded { store_id: StoreId },
    Failed(SubmitError),
    /// Another submission was already running.
    Ignored,
}

impl SubmitOutcome {
    #[must_use]
    pub fn store_id(&self) -> Option<StoreId> {
        match self {
            SubmitOutcome::Succeeded { store_id } => Some(*store_id),
            _ => None,
        }
    }
}

/// The collaborators a form needs.
#[derive(Clone)]
pub struct FormServices {
    pub locations: Arc<dyn LocationService>,
    pub stores: Arc<dyn StoreService>,
    pub address: Arc<dyn AddressSource>,
    pub notifier: Arc<dyn Notifier>,
    pub previews: Arc<dyn PreviewUrls>,
}

impl FormServices {
    /// Wires both persistence services to one HTTP client.
    #[must_use]
    pub fn from_client(
        client: Arc<PinupClient>,
        address: Arc<dyn AddressSource>,
        notifier: Arc<dyn Notifier>,
        previews: Arc<dyn PreviewUrls>,
    ) -> Self {
        Self {
            locations: client.clone(),
            stores: client,
            address,
            notifier,
            previews,
        }
    }
}

struct FormModel {
    fields: StoreFields,
    hours: OperatingHoursEditor,
    images: ImagePreviewManager,
    baseline: Option<UpdateBaseline>,
}

/// A create or edit form for one store listing.
pub struct StoreForm {
    services: FormServices,
    model: Mutex<FormModel>,
    in_flight: tokio::sync::Mutex<()>,
    state: watch::Sender<SubmitState>,
    torn_down: watch::Sender<bool>,
}

impl StoreForm {
    /// An empty form for a new listing.
    #[must_use]
    pub fn new(services: FormServices) -> Self {
        let images = ImagePreviewManager::new(Arc::clone(&services.previews));
        Self::with_model(
            services,
            FormModel {
                fields: StoreFields::default(),
                hours: OperatingHoursEditor::new(),
                images,
                baseline: None,
            },
        )
    }

    /// An edit form prefilled from a persisted store.
    ///
    /// # Errors
    ///
    /// Returns [`SubmitError::LimitExceeded`] if the store carries more
    /// operating-hour rows than the editor allows.
    pub fn for_update(services: FormServices, store: PersistedStore) -> Result<Self, SubmitError> {
        let hours = OperatingHoursEditor::with_intervals(store.operating_hours)?;
        let images = ImagePreviewManager::with_existing(
            Arc::clone(&services.previews),
            store.images,
            store.thumbnail,
        );

        Ok(Self::with_model(
            services,
            FormModel {
                fields: store.fields,
                hours,
                images,
                baseline: Some(store.baseline),
            },
        ))
    }

    /// Replaces the whole model with a freshly fetched store. Needed after an
    /// update that uploaded files, since their ids only exist server-side.
    ///
    /// # Errors
    ///
    /// Returns [`SubmitError::LimitExceeded`] if the store carries more
    /// operating-hour rows than the editor allows; the model is untouched.
    pub fn reseed(&self, store: PersistedStore) -> Result<(), SubmitError> {
        let hours = OperatingHoursEditor::with_intervals(store.operating_hours)?;
        let images = ImagePreviewManager::with_existing(
            Arc::clone(&self.services.previews),
            store.images,
            store.thumbnail,
        );

        let mut model = self.lock_model();
        model.fields = store.fields;
        model.hours = hours;
        model.images = images;
        tracing::debug!(store_id = %store.baseline.store_id, "form reseeded");
        model.baseline = Some(store.baseline);
        Ok(())
    }

    fn with_model(services: FormServices, model: FormModel) -> Self {
        Self {
            services,
            model: Mutex::new(model),
            in_flight: tokio::sync::Mutex::new(()),
            state: watch::Sender::new(SubmitState::Idle),
            torn_down: watch::Sender::new(false),
        }
    }

    #[must_use]
    pub fn state(&self) -> SubmitState {
        *self.state.borrow()
    }

    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<SubmitState> {
        self.state.subscribe()
    }

    #[must_use]
    pub fn baseline(&self) -> Option<UpdateBaseline> {
        self.lock_model().baseline.clone()
    }

    pub fn set_fields(&self, fields: StoreFields) {
        self.lock_model().fields = fields;
    }

    #[must_use]
    pub fn fields(&self) -> StoreFields {
        self.lock_model().fields.clone()
    }

    /// Appends an operating-hours row. At the cap the user is alerted and
    /// `None` is returned.
    pub fn add_interval(&self) -> Option<RowId> {
        let result = self.lock_model().hours.add_interval();
        result.inspect_err(|e| self.alert(&SubmitError::from(*e))).ok()
    }

    pub fn remove_interval(&self, row: RowId) -> bool {
        self.lock_model().hours.remove_interval(row)
    }

    pub fn set_interval(&self, row: RowId, value: OperatingInterval) -> bool {
        self.lock_model().hours.set_interval(row, value)
    }

    #[must_use]
    pub fn operating_hours(&self) -> Vec<OperatingInterval> {
        self.lock_model().hours.snapshot()
    }

    pub fn set_files(&self, files: Vec<ImageFile>) {
        self.lock_model().images.set_files(files);
    }

    /// Returns `false` (after alerting the user) if `thumbnail` is not a
    /// live asset.
    pub fn select_thumbnail(&self, thumbnail: ThumbnailRef) -> bool {
        let result = self.lock_model().images.select_thumbnail(thumbnail);
        result.inspect_err(|e| self.alert(&SubmitError::from(*e))).is_ok()
    }

    #[must_use]
    pub fn current_thumbnail(&self) -> Option<ThumbnailRef> {
        self.lock_model().images.current_thumbnail()
    }

    #[must_use]
    pub fn assets(&self) -> Vec<AssetView> {
        self.lock_model().images.assets()
    }

    /// Marks an existing image for deletion. Returns `false` (after alerting
    /// the user) if it is the thumbnail or unknown.
    pub fn mark_deleted(&self, id: ImageId) -> bool {
        let result = self.lock_model().images.mark_deleted(id);
        result.inspect_err(|e| self.alert(&SubmitError::from(*e))).is_ok()
    }

    pub fn restore_image(&self, id: ImageId) -> bool {
        self.lock_model().images.restore(id)
    }

    /// Releases every preview and cancels a running submission, which then
    /// ends as `Failed(Cancelled)`. Later submissions fail the same way.
    pub fn teardown(&self) {
        self.torn_down.send_replace(true);
        self.lock_model().images.dispose();
        tracing::debug!("store form torn down");
    }

    /// Runs one submission to completion. Never fails: every outcome,
    /// including a duplicate call while another run is in flight, is
    /// reported through [`SubmitOutcome`].
    pub async fn submit(&self, action: SubmitAction) -> SubmitOutcome {
        let Ok(_running) = self.in_flight.try_lock() else {
            tracing::debug!(?action, "submission already in flight, ignoring");
            return SubmitOutcome::Ignored;
        };

        let mut run = RunGuard {
            state: &self.state,
            finished: false,
        };
        let mut torn_down = self.torn_down.subscribe();

        let result = if *torn_down.borrow_and_update() {
            Err(SubmitError::Cancelled)
        } else {
            tokio::select! {
                result = self.run(action) => result,
                () = wait_for_teardown(&mut torn_down) => Err(SubmitError::Cancelled),
            }
        };
        run.finished = true;

        match result {
            Ok((store_id, submitted)) => {
                self.settle_images(action, &submitted);
                tracing::info!(?action, %store_id, "store submitted");
                self.transition(SubmitState::Succeeded(store_id));
                SubmitOutcome::Succeeded { store_id }
            }
            Err(err) => {
                tracing::warn!(?action, error = %err, "store submission failed");
                if !matches!(err, SubmitError::Cancelled) {
                    self.alert(&err);
                }
                self.transition(SubmitState::Failed(err.kind()));
                SubmitOutcome::Failed(err)
            }
        }
    }

    async fn run(&self, action: SubmitAction) -> Result<(StoreId, SubmittedImages), SubmitError> {
        let draft = self.services.address.last_completed();
        if action == SubmitAction::Create && draft.is_none() {
            return Err(SubmitError::MissingAddress);
        }
        self.transition(SubmitState::ResolvingLocation);

        let (location_id, store_id) = match action {
            SubmitAction::Create => (self.register_location(draft).await?, None),
            SubmitAction::Update => {
                let baseline = self.baseline().ok_or(SubmitError::NoBaseline)?;
                let location_id = self.reconcile_location(&baseline, draft).await?;
                (location_id, Some(baseline.store_id))
            }
        };

        self.transition(SubmitState::BuildingRequest);
        let (submission, submitted) = self.build_submission(action, location_id);

        self.transition(SubmitState::Submitting);
        let stores = &self.services.stores;
        let result = match store_id {
            None => stores.create_store(submission).await,
            Some(id) => stores.update_store(id, submission).await,
        };
        let store_id = result.map_err(SubmitError::StorePersist)?;
        Ok((store_id, submitted))
    }

    /// Brings the image state in line with what the server now holds.
    ///
    /// After an update that uploaded files the baseline is dropped, so the
    /// next update fails with [`SubmitError::NoBaseline`] until
    /// [`StoreForm::reseed`] is called.
    fn settle_images(&self, action: SubmitAction, submitted: &SubmittedImages) {
        let mut model = self.lock_model();
        match action {
            SubmitAction::Create => model.images.dispose(),
            SubmitAction::Update => {
                if !model.images.commit_update(submitted) {
                    model.baseline = None;
                    tracing::info!("uploaded images need a reseed before the next update");
                }
            }
        }
    }

    async fn register_location(
        &self,
        draft: Option<LocationDraft>,
    ) -> Result<LocationId, SubmitError> {
        let draft = draft.ok_or(SubmitError::MissingAddress)?;
        let record = self
            .services
            .locations
            .create_location(&draft)
            .await
            .map_err(SubmitError::LocationPersist)?;
        tracing::debug!(location_id = %record.id, "location registered");
        Ok(record.id)
    }

    /// Patches the baseline location only when the chosen address differs.
    async fn reconcile_location(
        &self,
        baseline: &UpdateBaseline,
        draft: Option<LocationDraft>,
    ) -> Result<LocationId, SubmitError> {
        let location_id = baseline.location.id;
        let Some(draft) = draft.filter(|d| d.differs_from(&baseline.location)) else {
            tracing::debug!(%location_id, "address unchanged, reusing location");
            return Ok(location_id);
        };

        let record = self
            .services
            .locations
            .patch_location(location_id, &draft)
            .await
            .map_err(SubmitError::LocationPersist)?;
        tracing::debug!(%location_id, "location patched");

        if let Some(current) = self.lock_model().baseline.as_mut() {
            current.location = record;
        }
        Ok(location_id)
    }

    fn build_submission(
        &self,
        action: SubmitAction,
        location_id: LocationId,
    ) -> (StoreSubmission, SubmittedImages) {
        let model = self.lock_model();
        let selection = model.images.selection();
        let submitted = selection.submitted();

        let deleted_image_ids = match action {
            SubmitAction::Create => None,
            SubmitAction::Update => Some(selection.deleted_ids),
        };

        let submission = StoreSubmission {
            draft: StoreDraft {
                fields: model.fields.clone().normalized(),
                location_id,
                operating_hours: model.hours.snapshot(),
                thumbnail: selection.thumbnail,
                deleted_image_ids,
            },
            images: selection.files,
        };
        (submission, submitted)
    }

    fn transition(&self, next: SubmitState) {
        tracing::debug!(state = ?next, "submission state");
        self.state.send_replace(next);
    }

    fn alert(&self, err: &SubmitError) {
        self.services.notifier.alert(&err.user_message());
    }

    fn lock_model(&self) -> MutexGuard<'_, FormModel> {
        self.model.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Marks the run as cancelled if the submit future is dropped mid-flight.
struct RunGuard<'a> {
    state: &'a watch::Sender<SubmitState>,
    finished: bool,
}

impl Drop for RunGuard<'_> {
    fn drop(&mut self) {
        if !self.finished {
            tracing::warn!("submission dropped before completion");
            self.state
                .send_replace(SubmitState::Failed(SubmitErrorKind::Cancelled));
        }
    }
}

async fn wait_for_teardown(torn_down: &mut watch::Receiver<bool>) {
    // The sender lives as long as the form, so this only returns on teardown.
    let _ = torn_down.wait_for(|torn| *torn).await;
}

#[cfg(test)]
#[path = "form_test.rs"]
mod tests;

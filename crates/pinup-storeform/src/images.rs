//! Image working set of a store form: newly selected files with live
//! previews, images already attached to the store, the single thumbnail and
//! the ids marked for deletion.

use std::collections::BTreeSet;
use std::sync::Arc;

use pinup_core::{ImageFile, ImageId, ThumbnailRef};

use crate::error::ImageError;
use crate::preview::{PreviewHandle, PreviewUrls};

/// An image already persisted on the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExistingImage {
    pub id: ImageId,
    pub url: String,
}

/// One visible asset in the working set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageAsset {
    NewFile {
        index: usize,
        file: ImageFile,
        preview_url: String,
    },
    Existing {
        id: ImageId,
        url: String,
    },
}

impl ImageAsset {
    #[must_use]
    pub fn thumbnail_ref(&self) -> ThumbnailRef {
        match self {
            ImageAsset::NewFile { index, .. } => ThumbnailRef::New(*index),
            ImageAsset::Existing { id, .. } => ThumbnailRef::Existing(*id),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetView {
    pub asset: ImageAsset,
    pub is_thumbnail: bool,
}

/// Point-in-time copy of what a store request needs from the image state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageSelection {
    pub files: Vec<ImageFile>,
    pub thumbnail: Option<ThumbnailRef>,
    pub deleted_ids: Vec<ImageId>,
}

/// The image part of a request that was sent, without the file bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmittedImages {
    pub uploaded: usize,
    pub thumbnail: Option<ThumbnailRef>,
    pub deleted_ids: Vec<ImageId>,
}

impl ImageSelection {
    #[must_use]
    pub fn submitted(&self) -> SubmittedImages {
        SubmittedImages {
            uploaded: self.files.len(),
            thumbnail: self.thumbnail,
            deleted_ids: self.deleted_ids.clone(),
        }
    }
}

#[derive(Debug)]
struct NewFile {
    file: ImageFile,
    preview: PreviewHandle,
}

/// Owns the preview handles of every newly selected file. Previews are
/// released when files are replaced, on [`ImagePreviewManager::dispose`] and
/// when the manager is dropped.
pub struct ImagePreviewManager {
    urls: Arc<dyn PreviewUrls>,
    new_files: Vec<NewFile>,
    existing: Vec<ExistingImage>,
    persisted_thumbnail: Option<ImageId>,
    thumbnail: Option<ThumbnailRef>,
    deleted: BTreeSet<ImageId>,
}

impl ImagePreviewManager {
    #[must_use]
    pub fn new(urls: Arc<dyn PreviewUrls>) -> Self {
        Self {
            urls,
            new_files: Vec::new(),
            existing: Vec::new(),
            persisted_thumbnail: None,
            thumbnail: None,
            deleted: BTreeSet::new(),
        }
    }

    /// Seeds the existing pool for an update form. `thumbnail` is the image
    /// the server currently flags; if it is absent or not part of `images`,
    /// the first image is selected instead.
    #[must_use]
    pub fn with_existing(
        urls: Arc<dyn PreviewUrls>,
        images: Vec<ExistingImage>,
        thumbnail: Option<ImageId>,
    ) -> Self {
        let persisted_thumbnail = thumbnail
            .filter(|id| images.iter().any(|image| image.id == *id))
            .or_else(|| images.first().map(|image| image.id));

        Self {
            urls,
            new_files: Vec::new(),
            existing: images,
            persisted_thumbnail,
            thumbnail: persisted_thumbnail.map(ThumbnailRef::Existing),
            deleted: BTreeSet::new(),
        }
    }

    /// Replaces the whole new-file pool.
    ///
    /// Old previews are revoked before new ones are allocated. A non-empty
    /// selection makes its first file the thumbnail; an empty one hands the
    /// thumbnail back to the existing pool if it was pointing at a new file.
    pub fn set_files(&mut self, files: Vec<ImageFile>) {
        self.new_files.clear();

        self.new_files = files
            .into_iter()
            .map(|file| NewFile {
                preview: PreviewHandle::allocate(&self.urls, &file),
                file,
            })
            .collect();

        if self.new_files.is_empty() {
            if matches!(self.thumbnail, Some(ThumbnailRef::New(_))) {
                self.thumbnail = self.fallback_thumbnail();
            }
        } else {
            self.thumbnail = Some(ThumbnailRef::New(0));
        }

        tracing::debug!(
            new_files = self.new_files.len(),
            thumbnail = ?self.thumbnail,
            "image selection replaced"
        );
    }

    /// Makes `thumbnail` the single thumbnail.
    ///
    /// # Errors
    ///
    /// Returns [`ImageError::UnknownImage`] if no live asset matches, which
    /// includes existing images marked for deletion.
    pub fn select_thumbnail(&mut self, thumbnail: ThumbnailRef) -> Result<(), ImageError> {
        if !self.is_live(thumbnail) {
            return Err(ImageError::UnknownImage(thumbnail));
        }
        self.thumbnail = Some(thumbnail);
        Ok(())
    }

    #[must_use]
    pub fn current_thumbnail(&self) -> Option<ThumbnailRef> {
        self.thumbnail
    }

    /// Every live asset, existing images first, each flagged with whether
    /// it is the thumbnail.
    #[must_use]
    pub fn assets(&self) -> Vec<AssetView> {
        let existing = self
            .existing
            .iter()
            .filter(|image| !self.deleted.contains(&image.id))
            .map(|image| ImageAsset::Existing {
                id: image.id,
                url: image.url.clone(),
            });
        let new_files = self
            .new_files
            .iter()
            .enumerate()
            .map(|(index, new_file)| ImageAsset::NewFile {
                index,
                file: new_file.file.clone(),
                preview_url: new_file.preview.url().to_string(),
            });

        existing
            .chain(new_files)
            .map(|asset| AssetView {
                is_thumbnail: Some(asset.thumbnail_ref()) == self.thumbnail,
                asset,
            })
            .collect()
    }

    /// Marks an existing image for deletion on the next update.
    ///
    /// # Errors
    ///
    /// - [`ImageError::ThumbnailProtected`] if `id` is the current thumbnail;
    ///   the deletion set is not touched.
    /// - [`ImageError::UnknownImage`] if `id` is not in the existing pool.
    pub fn mark_deleted(&mut self, id: ImageId) -> Result<(), ImageError> {
        if self.thumbnail == Some(ThumbnailRef::Existing(id)) {
            return Err(ImageError::ThumbnailProtected(id));
        }
        if !self.existing.iter().any(|image| image.id == id) {
            return Err(ImageError::UnknownImage(ThumbnailRef::Existing(id)));
        }
        self.deleted.insert(id);
        Ok(())
    }

    /// Undoes [`ImagePreviewManager::mark_deleted`]. Returns `false` if `id`
    /// was not marked.
    pub fn restore(&mut self, id: ImageId) -> bool {
        let restored = self.deleted.remove(&id);
        if restored && self.thumbnail.is_none() {
            self.thumbnail = Some(ThumbnailRef::Existing(id));
        }
        restored
    }

    #[must_use]
    pub fn deleted_ids(&self) -> Vec<ImageId> {
        self.deleted.iter().copied().collect()
    }

    #[must_use]
    pub fn selection(&self) -> ImageSelection {
        ImageSelection {
            files: self.new_files.iter().map(|n| n.file.clone()).collect(),
            thumbnail: self.thumbnail,
            deleted_ids: self.deleted_ids(),
        }
    }

    /// Number of preview URLs this manager currently holds.
    #[must_use]
    pub fn outstanding_previews(&self) -> usize {
        self.new_files.len()
    }

    /// Releases every preview and empties the new-file pool. Calling it again
    /// is a no-op.
    pub fn dispose(&mut self) {
        if self.new_files.is_empty() {
            return;
        }
        tracing::debug!(released = self.new_files.len(), "disposing previews");
        self.new_files.clear();
        if matches!(self.thumbnail, Some(ThumbnailRef::New(_))) {
            self.thumbnail = self.fallback_thumbnail();
        }
    }

    /// Folds a successful update into the working set.
    ///
    /// `submitted` is what the request carried. Images it deleted leave the
    /// existing pool and the deletion set, and the new-file pool is released.
    /// Returns `false` when the request uploaded files: the server now holds
    /// images whose ids are unknown here, so both pools are emptied and the
    /// caller must reseed from the persisted store before the next update.
    pub fn commit_update(&mut self, submitted: &SubmittedImages) -> bool {
        self.new_files.clear();
        self.existing
            .retain(|image| !submitted.deleted_ids.contains(&image.id));
        self.deleted.retain(|id| !submitted.deleted_ids.contains(id));

        if submitted.uploaded > 0 {
            self.existing.clear();
            self.deleted.clear();
            self.persisted_thumbnail = None;
            self.thumbnail = None;
            tracing::debug!(
                uploaded = submitted.uploaded,
                "image pool out of date after upload"
            );
            return false;
        }

        if let Some(ThumbnailRef::Existing(id)) = submitted.thumbnail {
            self.persisted_thumbnail = Some(id);
        }
        if !self.thumbnail.is_some_and(|t| self.is_live(t)) {
            self.thumbnail = self.fallback_thumbnail();
        }
        true
    }

    fn is_live(&self, thumbnail: ThumbnailRef) -> bool {
        match thumbnail {
            ThumbnailRef::New(index) => index < self.new_files.len(),
            ThumbnailRef::Existing(id) => {
                !self.deleted.contains(&id) && self.existing.iter().any(|image| image.id == id)
            }
        }
    }

    fn fallback_thumbnail(&self) -> Option<ThumbnailRef> {
        self.persisted_thumbnail
            .map(ThumbnailRef::Existing)
            .filter(|t| self.is_live(*t))
            .or_else(|| {
                self.existing
                    .iter()
                    .find(|image| !self.deleted.contains(&image.id))
                    .map(|image| ThumbnailRef::Existing(image.id))
            })
    }
}

impl std::fmt::Debug for ImagePreviewManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImagePreviewManager")
            .field("new_files", &self.new_files)
            .field("existing", &self.existing)
            .field("thumbnail", &self.thumbnail)
            .field("deleted", &self.deleted)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[path = "images_test.rs"]
mod tests;

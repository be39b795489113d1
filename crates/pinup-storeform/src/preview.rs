//! Revocable preview URLs for selected image files.
//!
//! A preview URL is a process-owned resource: each one handed out by
//! [`PreviewUrls::create`] must be passed back to [`PreviewUrls::revoke`]
//! exactly once. [`PreviewHandle`] ties that release to scope.

use std::collections::HashSet;
use std::sync::{Arc, Mutex, PoisonError};

use pinup_core::ImageFile;
use uuid::Uuid;

/// Allocator for preview URLs.
pub trait PreviewUrls: Send + Sync {
    fn create(&self, file: &ImageFile) -> String;
    fn revoke(&self, url: &str);
}

/// In-process registry minting `blob:<origin>/<uuid>` URLs and tracking
/// which are still live.
#[derive(Debug)]
pub struct BlobUrlRegistry {
    origin: String,
    live: Mutex<HashSet<String>>,
}

impl BlobUrlRegistry {
    #[must_use]
    pub fn new(origin: impl Into<String>) -> Self {
        Self {
            origin: origin.into().trim_end_matches('/').to_string(),
            live: Mutex::new(HashSet::new()),
        }
    }

    /// Number of URLs created and not yet revoked.
    #[must_use]
    pub fn live_count(&self) -> usize {
        self.live
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    #[must_use]
    pub fn is_live(&self, url: &str) -> bool {
        self.live
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(url)
    }
}

impl Default for BlobUrlRegistry {
    fn default() -> Self {
        Self::new("null")
    }
}

impl PreviewUrls for BlobUrlRegistry {
    fn create(&self, file: &ImageFile) -> String {
        let url = format!("blob:{}/{}", self.origin, Uuid::new_v4());
        tracing::trace!(%url, file_name = %file.file_name, "preview allocated");
        self.live
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(url.clone());
        url
    }

    fn revoke(&self, url: &str) {
        let removed = self
            .live
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(url);
        if !removed {
            tracing::warn!(%url, "revoking unknown or already revoked preview");
        }
    }
}

/// A preview URL that is revoked when the handle is dropped.
pub struct PreviewHandle {
    url: String,
    urls: Arc<dyn PreviewUrls>,
}

impl PreviewHandle {
    #[must_use]
    pub fn allocate(urls: &Arc<dyn PreviewUrls>, file: &ImageFile) -> Self {
        Self {
            url: urls.create(file),
            urls: Arc::clone(urls),
        }
    }

    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }
}

impl std::fmt::Debug for PreviewHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("PreviewHandle").field(&self.url).finish()
    }
}

impl Drop for PreviewHandle {
    fn drop(&mut self) {
        self.urls.revoke(&self.url);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handle_revokes_on_drop() {
        let registry = Arc::new(BlobUrlRegistry::new("https://pinup.example/"));
        let urls: Arc<dyn PreviewUrls> = registry.clone();
        let file = ImageFile::new("a.png", vec![1]);

        let handle = PreviewHandle::allocate(&urls, &file);
        assert!(handle.url().starts_with("blob:https://pinup.example/"));
        assert!(registry.is_live(handle.url()));
        assert_eq!(registry.live_count(), 1);

        let url = handle.url().to_string();
        drop(handle);
        assert!(!registry.is_live(&url));
        assert_eq!(registry.live_count(), 0);
    }

    #[test]
    fn urls_are_unique() {
        let registry = BlobUrlRegistry::default();
        let file = ImageFile::new("a.png", vec![1]);
        let a = registry.create(&file);
        let b = registry.create(&file);
        assert_ne!(a, b);
        assert_eq!(registry.live_count(), 2);
    }

    #[test]
    fn double_revoke_is_harmless() {
        let registry = BlobUrlRegistry::default();
        let url = registry.create(&ImageFile::new("a.png", vec![1]));
        registry.revoke(&url);
        registry.revoke(&url);
        assert_eq!(registry.live_count(), 0);
    }
}

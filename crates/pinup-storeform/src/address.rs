//! Source of the address the user picked in the external lookup widget.

use pinup_core::LocationDraft;
use tokio::sync::watch;

/// Yields the result of the last completed address lookup.
pub trait AddressSource: Send + Sync {
    /// `None` until the user has completed a lookup.
    fn last_completed(&self) -> Option<LocationDraft>;
}

/// The lookup provider publishes each completed search into the matching
/// [`watch::Sender`].
impl AddressSource for watch::Receiver<Option<LocationDraft>> {
    fn last_completed(&self) -> Option<LocationDraft> {
        self.borrow().clone()
    }
}

/// A fixed address, for forms whose address cannot change.
impl AddressSource for Option<LocationDraft> {
    fn last_completed(&self) -> Option<LocationDraft> {
        self.clone()
    }
}

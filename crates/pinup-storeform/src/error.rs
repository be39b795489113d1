use pinup_client::ClientError;
use pinup_core::{ImageId, ThumbnailRef};
use thiserror::Error;

/// Errors raised by [`crate::OperatingHoursEditor`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum HoursError {
    #[error("at most {max} operating-hour rows are allowed")]
    LimitExceeded { max: usize },
}

/// Errors raised by [`crate::ImagePreviewManager`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ImageError {
    #[error("no image matches {0:?}")]
    UnknownImage(ThumbnailRef),

    #[error("image {0} is the current thumbnail and cannot be deleted")]
    ThumbnailProtected(ImageId),
}

/// Why a submission (or a form mutation) did not go through.
///
/// Every variant maps to exactly one user-facing message via
/// [`SubmitError::user_message`].
#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("no address has been selected")]
    MissingAddress,

    #[error("failed to persist location: {0}")]
    LocationPersist(#[source] ClientError),

    #[error("failed to persist store: {0}")]
    StorePersist(#[source] ClientError),

    #[error("at most {max} operating-hour rows are allowed")]
    LimitExceeded { max: usize },

    #[error("image {0} is the current thumbnail and cannot be deleted")]
    ThumbnailProtected(ImageId),

    #[error("no image matches {0:?}")]
    UnknownImage(ThumbnailRef),

    #[error("submission was cancelled")]
    Cancelled,

    #[error("update requested on a form without persisted store state")]
    NoBaseline,
}

/// Fieldless mirror of [`SubmitError`], cheap to copy into observable state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SubmitErrorKind {
    MissingAddress,
    LocationPersist,
    StorePersist,
    LimitExceeded,
    ThumbnailProtected,
    UnknownImage,
    Cancelled,
    NoBaseline,
}

impl SubmitError {
    #[must_use]
    pub fn kind(&self) -> SubmitErrorKind {
        match self {
            SubmitError::MissingAddress => SubmitErrorKind::MissingAddress,
            SubmitError::LocationPersist(_) => SubmitErrorKind::LocationPersist,
            SubmitError::StorePersist(_) => SubmitErrorKind::StorePersist,
            SubmitError::LimitExceeded { .. } => SubmitErrorKind::LimitExceeded,
            SubmitError::ThumbnailProtected(_) => SubmitErrorKind::ThumbnailProtected,
            SubmitError::UnknownImage(_) => SubmitErrorKind::UnknownImage,
            SubmitError::Cancelled => SubmitErrorKind::Cancelled,
            SubmitError::NoBaseline => SubmitErrorKind::NoBaseline,
        }
    }

    /// The single message shown to the user for this failure.
    ///
    /// Persistence failures prefer the server's `message` and fall back to a
    /// generic sentence when the response carried none.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            SubmitError::MissingAddress => "Please search for and select an address.".to_string(),
            SubmitError::LocationPersist(e) => e
                .server_message()
                .unwrap_or("Could not save the address. Please try again.")
                .to_string(),
            SubmitError::StorePersist(e) => e
                .server_message()
                .unwrap_or("Could not save the store. Please try again.")
                .to_string(),
            SubmitError::LimitExceeded { max } => {
                format!("You can register up to {max} operating hours.")
            }
            SubmitError::ThumbnailProtected(_) => {
                "The thumbnail image cannot be deleted. Choose another thumbnail first."
                    .to_string()
            }
            SubmitError::UnknownImage(_) => "That image is no longer available.".to_string(),
            SubmitError::Cancelled => "The submission was cancelled.".to_string(),
            SubmitError::NoBaseline => "The store has not finished loading.".to_string(),
        }
    }
}

impl From<HoursError> for SubmitError {
    fn from(err: HoursError) -> Self {
        match err {
            HoursError::LimitExceeded { max } => SubmitError::LimitExceeded { max },
        }
    }
}

impl From<ImageError> for SubmitError {
    fn from(err: ImageError) -> Self {
        match err {
            ImageError::UnknownImage(r) => SubmitError::UnknownImage(r),
            ImageError::ThumbnailProtected(id) => SubmitError::ThumbnailProtected(id),
        }
    }
}

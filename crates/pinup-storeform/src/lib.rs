pub mod address;
pub mod baseline;
pub mod error;
pub mod form;
pub mod hours;
pub mod images;
pub mod ports;
pub mod preview;

pub use address::AddressSource;
pub use baseline::{PersistedStore, UpdateBaseline};
pub use error::{HoursError, ImageError, SubmitError, SubmitErrorKind};
pub use form::{FormServices, StoreForm, SubmitAction, SubmitOutcome, SubmitState};
pub use hours::{OperatingHoursEditor, RowId};
pub use images::{
    AssetView, ExistingImage, ImageAsset, ImagePreviewManager, ImageSelection, SubmittedImages,
};
pub use ports::{LocationService, Notifier, StoreService};
pub use preview::{BlobUrlRegistry, PreviewHandle, PreviewUrls};

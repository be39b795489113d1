pub mod client;
pub mod error;
pub mod multipart;
pub mod types;

pub use client::PinupClient;
pub use error::ClientError;
pub use multipart::{StoreSubmission, SubmissionKind};
pub use types::{
    CategoryResponse, CreatedResource, ErrorBody, LocationRequest, LocationResponse,
    StoreImageResponse, StoreResponse,
};

pub mod app_config;
pub mod config;
pub mod ids;
pub mod location;
pub mod store;

use thiserror::Error;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use ids::{CategoryId, ImageId, LocationId, StoreId};
pub use location::{Coordinates, LocationDraft, LocationRecord};
pub use store::{
    ImageFile, OperatingInterval, StoreDraft, StoreFields, ThumbnailRef, MAX_OPERATING_HOURS,
};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

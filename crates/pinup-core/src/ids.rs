//! Server-assigned identifiers.
//!
//! All ids are 64-bit integers on the wire and serialize transparently.

use serde::{Deserialize, Serialize};

macro_rules! id_type {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i64> for $name {
            fn from(value: i64) -> Self {
                Self(value)
            }
        }
    };
}

id_type!(
    /// Identifier of a persisted location record.
    LocationId
);
id_type!(
    /// Identifier of a store listing.
    StoreId
);
id_type!(
    /// Identifier of an image already attached to a store.
    ImageId
);
id_type!(CategoryId);

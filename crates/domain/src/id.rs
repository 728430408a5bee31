//! Typed identifier newtypes backed by positive database keys.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

macro_rules! define_id {
    ($(#[doc = $doc:expr])* $name:ident) => {
        $(#[doc = $doc])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(try_from = "i64", into = "i64")]
        pub struct $name(i64);

        impl $name {
            /// Wrap a raw key, rejecting zero and negative values.
            ///
            /// # Errors
            ///
            /// Returns [`ValidationError::InvalidId`] when `raw <= 0`.
            pub fn new(raw: i64) -> Result<Self, ValidationError> {
                if raw > 0 {
                    Ok(Self(raw))
                } else {
                    Err(ValidationError::InvalidId(raw.to_string()))
                }
            }

            /// Access the raw key.
            #[must_use]
            pub fn get(self) -> i64 {
                self.0
            }
        }

        impl TryFrom<i64> for $name {
            type Error = ValidationError;

            fn try_from(raw: i64) -> Result<Self, Self::Error> {
                Self::new(raw)
            }
        }

        impl From<$name> for i64 {
            fn from(id: $name) -> i64 {
                id.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }

        impl FromStr for $name {
            type Err = ValidationError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.trim()
                    .parse::<i64>()
                    .map_err(|_| ValidationError::InvalidId(s.to_owned()))
                    .and_then(Self::new)
            }
        }
    };
}

define_id!(
    /// Unique identifier for a [`User`](crate::user::User).
    UserId
);

define_id!(
    /// Unique identifier for a [`Sku`](crate::sku::Sku).
    SkuId
);

define_id!(
    /// Unique identifier for an [`Address`](crate::address::Address).
    AddressId
);

define_id!(
    /// Unique identifier for a catalog [`Category`](crate::homepage::Category).
    CategoryId
);

define_id!(
    /// Unique identifier for an advertising [`Content`](crate::homepage::Content).
    ContentId
);

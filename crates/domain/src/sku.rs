//! SKU: a concrete sellable item of the catalog.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::id::{CategoryId, SkuId};
use crate::time::Timestamp;

/// Price in the smallest currency unit (cents).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(i64);

impl Price {
    #[must_use]
    pub fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    #[must_use]
    pub fn cents(self) -> i64 {
        self.0
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{sign}{}.{:02}", abs / 100, abs % 100)
    }
}

/// A catalog item as stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sku {
    pub id: SkuId,
    pub category_id: CategoryId,
    pub name: String,
    pub caption: String,
    pub price: Price,
    pub default_image_url: String,
    /// Number of reviews.
    pub comments: i64,
    pub sales: i64,
    pub is_launched: bool,
    pub created_at: Timestamp,
}

impl Sku {
    /// Projection returned by list, search, and history endpoints.
    #[must_use]
    pub fn view(&self) -> SkuView {
        SkuView {
            id: self.id,
            name: self.name.clone(),
            price: self.price,
            default_image_url: self.default_image_url.clone(),
            comments: self.comments,
        }
    }
}

/// Public representation of a [`Sku`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkuView {
    pub id: SkuId,
    pub name: String,
    pub price: Price,
    pub default_image_url: String,
    pub comments: i64,
}

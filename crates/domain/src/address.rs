//! Addresses: a user's shipping address book.

use serde::{Deserialize, Serialize};

use crate::error::{StorefrontError, ValidationError};
use crate::id::{AddressId, UserId};
use crate::user::{validate_email, validate_mobile};

/// A stored shipping address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Address {
    pub id: AddressId,
    #[serde(skip)]
    pub user_id: UserId,
    pub title: String,
    pub receiver: String,
    pub province_id: i64,
    pub city_id: i64,
    pub district_id: i64,
    pub place: String,
    pub mobile: String,
    pub tel: Option<String>,
    pub email: Option<String>,
}

/// Client-submitted address fields, used for both create and update.
#[derive(Debug, Clone, Deserialize)]
pub struct AddressDraft {
    #[serde(default)]
    pub title: String,
    pub receiver: String,
    pub province_id: i64,
    pub city_id: i64,
    pub district_id: i64,
    pub place: String,
    pub mobile: String,
    #[serde(default)]
    pub tel: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

impl AddressDraft {
    /// Check required fields and formats, and normalise optional ones.
    ///
    /// An empty title falls back to the receiver name; blank `tel` and
    /// `email` become `None`.
    ///
    /// # Errors
    ///
    /// Returns [`StorefrontError::Validation`] for the first failing rule.
    pub fn validated(mut self) -> Result<Self, StorefrontError> {
        if self.receiver.trim().is_empty() {
            return Err(ValidationError::EmptyField { field: "receiver" }.into());
        }
        if self.place.trim().is_empty() {
            return Err(ValidationError::EmptyField { field: "place" }.into());
        }
        for (field, value) in [
            ("province_id", self.province_id),
            ("city_id", self.city_id),
            ("district_id", self.district_id),
        ] {
            if value <= 0 {
                return Err(ValidationError::EmptyField { field }.into());
            }
        }
        validate_mobile(&self.mobile)?;

        self.tel = self.tel.filter(|tel| !tel.trim().is_empty());
        self.email = self.email.filter(|email| !email.trim().is_empty());
        if let Some(email) = &self.email {
            validate_email(email)?;
        }
        if self.title.trim().is_empty() {
            self.title.clone_from(&self.receiver);
        }
        Ok(self)
    }
}

/// A user's address list as returned to clients.
#[derive(Debug, Clone, Serialize)]
pub struct AddressBook {
    pub user_id: UserId,
    pub default_address_id: Option<AddressId>,
    pub limit: usize,
    pub addresses: Vec<Address>,
}

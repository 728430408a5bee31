//! Users: registration rules, profile, and email binding.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{StorefrontError, ValidationError};
use crate::id::{AddressId, UserId};

static MOBILE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^1[3-9]\d{9}$").expect("mobile pattern is valid"));

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9-]+(\.[A-Za-z0-9-]+)+$")
        .expect("email pattern is valid")
});

const USERNAME_LEN: (usize, usize) = (5, 20);
const PASSWORD_LEN: (usize, usize) = (8, 20);

/// Check a mobile number against the accepted format.
///
/// # Errors
///
/// Returns [`ValidationError::InvalidMobile`] on mismatch.
pub fn validate_mobile(mobile: &str) -> Result<(), ValidationError> {
    if MOBILE.is_match(mobile) {
        Ok(())
    } else {
        Err(ValidationError::InvalidMobile(mobile.to_owned()))
    }
}

/// Check an email address is plausibly deliverable.
///
/// # Errors
///
/// Returns [`ValidationError::InvalidEmail`] on mismatch.
pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    if EMAIL.is_match(email) {
        Ok(())
    } else {
        Err(ValidationError::InvalidEmail(email.to_owned()))
    }
}

fn check_length(
    field: &'static str,
    value: &str,
    (min, max): (usize, usize),
) -> Result<(), ValidationError> {
    let len = value.chars().count();
    if (min..=max).contains(&len) {
        Ok(())
    } else {
        Err(ValidationError::Length { field, min, max })
    }
}

/// A registered user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub mobile: String,
    pub email: Option<String>,
    pub email_active: bool,
    pub default_address_id: Option<AddressId>,
}

/// A user row together with its stored password hash.
///
/// Only the login path reads this; it never leaves the application layer.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub user: User,
    pub password_hash: String,
}

/// Sign-up form as submitted by a client.
#[derive(Debug, Clone, Deserialize)]
pub struct Registration {
    pub username: String,
    pub password: String,
    pub password2: String,
    pub mobile: String,
    pub sms_code: String,
    pub allow: String,
}

impl Registration {
    /// Check field formats that need no external lookup.
    ///
    /// SMS code verification and uniqueness checks happen in the
    /// application service.
    ///
    /// # Errors
    ///
    /// Returns [`StorefrontError::Validation`] for the first failing rule.
    pub fn validate(&self) -> Result<(), StorefrontError> {
        check_length("username", &self.username, USERNAME_LEN)?;
        check_length("password", &self.password, PASSWORD_LEN)?;
        validate_mobile(&self.mobile)?;
        if self.allow != "true" {
            return Err(ValidationError::AgreementNotAccepted.into());
        }
        if self.password != self.password2 {
            return Err(ValidationError::PasswordMismatch.into());
        }
        if self.sms_code.trim().is_empty() {
            return Err(ValidationError::EmptyField { field: "sms_code" }.into());
        }
        Ok(())
    }
}

/// Data persisted when creating a user.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub mobile: String,
    pub password_hash: String,
}

//! User service: registration, login, profile, and email verification.

use storefront_domain::error::{NotFoundError, StorefrontError, ValidationError};
use storefront_domain::id::UserId;
use storefront_domain::user::{NewUser, Registration, User, validate_email};

use crate::ports::{
    ActivationMailer, PasswordHasher, TokenIssuer, UserRepository, VerificationCodeStore,
};

/// A user together with a freshly issued access token.
#[derive(Debug, Clone)]
pub struct SignedIn {
    pub user: User,
    pub token: String,
}

/// Application service for user accounts.
pub struct UserService<U, C, H, T, M> {
    users: U,
    codes: C,
    hasher: H,
    tokens: T,
    mailer: M,
    verify_url: String,
}

impl<U, C, H, T, M> UserService<U, C, H, T, M>
where
    U: UserRepository,
    C: VerificationCodeStore,
    H: PasswordHasher,
    T: TokenIssuer,
    M: ActivationMailer,
{
    /// Create a new service. `verify_url` is the base of the activation link
    /// mailed to users; the token is appended as `?token=`.
    pub fn new(
        users: U,
        codes: C,
        hasher: H,
        tokens: T,
        mailer: M,
        verify_url: impl Into<String>,
    ) -> Self {
        Self {
            users,
            codes,
            hasher,
            tokens,
            mailer,
            verify_url: verify_url.into(),
        }
    }

    /// Number of accounts using `username`.
    ///
    /// # Errors
    ///
    /// Returns a store error propagated from the repository.
    pub async fn username_count(&self, username: &str) -> Result<u64, StorefrontError> {
        self.users.count_by_username(username).await
    }

    /// Number of accounts using `mobile`.
    ///
    /// # Errors
    ///
    /// Returns a store error propagated from the repository.
    pub async fn mobile_count(&self, mobile: &str) -> Result<u64, StorefrontError> {
        self.users.count_by_mobile(mobile).await
    }

    /// Create an account and sign it in.
    ///
    /// # Errors
    ///
    /// Returns [`StorefrontError::Validation`] when a form rule fails, the
    /// SMS code is missing or wrong, or the username or mobile is taken.
    #[tracing::instrument(skip(self, form), fields(username = %form.username))]
    pub async fn register(&self, form: Registration) -> Result<SignedIn, StorefrontError> {
        form.validate()?;

        let Some(expected) = self.codes.sms_code(&form.mobile).await? else {
            return Err(ValidationError::SmsCodeExpired.into());
        };
        if expected != form.sms_code {
            return Err(ValidationError::SmsCodeMismatch.into());
        }

        if self.users.count_by_username(&form.username).await? > 0 {
            return Err(ValidationError::UsernameTaken(form.username).into());
        }
        if self.users.count_by_mobile(&form.mobile).await? > 0 {
            return Err(ValidationError::MobileTaken(form.mobile).into());
        }

        let password_hash = self.hasher.hash(&form.password).await?;
        let user = self
            .users
            .create(NewUser {
                username: form.username,
                mobile: form.mobile,
                password_hash,
            })
            .await?;
        let token = self.tokens.issue_access(user.id).await?;

        tracing::info!(user_id = %user.id, "user registered");
        Ok(SignedIn { user, token })
    }

    /// Sign in with a username or mobile and a password.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidCredentials`] for an unknown account
    /// or a wrong password.
    #[tracing::instrument(skip(self, password))]
    pub async fn login(&self, account: &str, password: &str) -> Result<SignedIn, StorefrontError> {
        let Some(credentials) = self.users.find_credentials(account).await? else {
            return Err(ValidationError::InvalidCredentials.into());
        };
        if !self
            .hasher
            .verify(password, &credentials.password_hash)
            .await?
        {
            return Err(ValidationError::InvalidCredentials.into());
        }
        let token = self.tokens.issue_access(credentials.user.id).await?;
        Ok(SignedIn {
            user: credentials.user,
            token,
        })
    }

    /// Resolve a bearer token to the user it was issued for.
    ///
    /// # Errors
    ///
    /// Returns [`StorefrontError::Unauthorized`] when the token is unknown
    /// or expired.
    pub async fn authenticate(&self, token: &str) -> Result<UserId, StorefrontError> {
        self.tokens
            .verify_access(token)
            .await?
            .ok_or(StorefrontError::Unauthorized)
    }

    /// Profile of the signed-in user.
    ///
    /// # Errors
    ///
    /// Returns [`StorefrontError::NotFound`] when the user no longer exists.
    pub async fn profile(&self, id: UserId) -> Result<User, StorefrontError> {
        self.users.get_by_id(id).await?.ok_or_else(|| {
            NotFoundError {
                entity: "User",
                id: id.to_string(),
            }
            .into()
        })
    }

    /// Attach an email to the account and mail an activation link.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidEmail`] for a malformed address, or
    /// an upstream error when the link cannot be issued or mailed.
    #[tracing::instrument(skip(self))]
    pub async fn bind_email(&self, id: UserId, email: &str) -> Result<User, StorefrontError> {
        validate_email(email)?;
        self.users.update_email(id, email).await?;

        let token = self.tokens.issue_email_verification(id, email).await?;
        let link = format!("{}?token={token}", self.verify_url);
        self.mailer.send_activation(email, &link).await?;

        self.profile(id).await
    }

    /// Activate the email an activation token was issued for.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidVerificationToken`] when the token is
    /// unknown, expired, or the account's email changed since it was issued.
    #[tracing::instrument(skip(self, token))]
    pub async fn verify_email(&self, token: &str) -> Result<User, StorefrontError> {
        let Some((id, email)) = self.tokens.verify_email(token).await? else {
            return Err(ValidationError::InvalidVerificationToken.into());
        };
        if !self.users.activate_email(id, &email).await? {
            return Err(ValidationError::InvalidVerificationToken.into());
        }
        tracing::info!(user_id = %id, "email verified");
        self.profile(id).await
    }
}

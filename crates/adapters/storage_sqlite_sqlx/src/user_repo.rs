//! `SQLite` implementation of [`UserRepository`].

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use storefront_app::ports::UserRepository;
use storefront_domain::error::{StorefrontError, ValidationError};
use storefront_domain::id::{AddressId, UserId};
use storefront_domain::time::now;
use storefront_domain::user::{Credentials, NewUser, User};

use crate::codec::{decode_id, encode_time};
use crate::error::{StorageError, unique_violation};

/// Wrapper for converting database rows into [`Credentials`].
struct Wrapper(Credentials);

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let default_address_id: Option<i64> = row.try_get("default_address_id")?;
        Ok(Self(Credentials {
            user: User {
                id: decode_id(row.try_get("id")?)?,
                username: row.try_get("username")?,
                mobile: row.try_get("mobile")?,
                email: row.try_get("email")?,
                email_active: row.try_get("email_active")?,
                default_address_id: default_address_id.map(decode_id).transpose()?,
            },
            password_hash: row.try_get("password_hash")?,
        }))
    }
}

const COUNT_BY_USERNAME: &str = "SELECT COUNT(*) FROM users WHERE username = ?";
const COUNT_BY_MOBILE: &str = "SELECT COUNT(*) FROM users WHERE mobile = ?";
const INSERT: &str =
    "INSERT INTO users (username, mobile, password_hash, created_at) VALUES (?, ?, ?, ?)";
const SELECT_BY_ID: &str = "SELECT * FROM users WHERE id = ?";
const SELECT_BY_ACCOUNT: &str = "SELECT * FROM users WHERE username = ?1 OR mobile = ?1 LIMIT 1";
const UPDATE_EMAIL: &str = "UPDATE users SET email = ?, email_active = 0 WHERE id = ?";
const ACTIVATE_EMAIL: &str = "UPDATE users SET email_active = 1 WHERE id = ? AND email = ?";
const UPDATE_DEFAULT_ADDRESS: &str = "UPDATE users SET default_address_id = ? WHERE id = ?";

/// `SQLite`-backed user repository.
#[derive(Clone)]
pub struct SqliteUserRepository {
    pool: SqlitePool,
}

impl SqliteUserRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    async fn count(&self, sql: &str, value: &str) -> Result<u64, StorefrontError> {
        let found: i64 = sqlx::query_scalar(sql)
            .bind(value)
            .fetch_one(&self.pool)
            .await
            .map_err(StorageError::from)?;
        Ok(u64::try_from(found).unwrap_or_default())
    }
}

impl UserRepository for SqliteUserRepository {
    async fn count_by_username(&self, username: &str) -> Result<u64, StorefrontError> {
        self.count(COUNT_BY_USERNAME, username).await
    }

    async fn count_by_mobile(&self, mobile: &str) -> Result<u64, StorefrontError> {
        self.count(COUNT_BY_MOBILE, mobile).await
    }

    async fn create(&self, user: NewUser) -> Result<User, StorefrontError> {
        let result = sqlx::query(INSERT)
            .bind(&user.username)
            .bind(&user.mobile)
            .bind(&user.password_hash)
            .bind(encode_time(now()))
            .execute(&self.pool)
            .await;

        let done = match result {
            Ok(done) => done,
            Err(err) if unique_violation(&err, "users.username") => {
                return Err(ValidationError::UsernameTaken(user.username).into());
            }
            Err(err) if unique_violation(&err, "users.mobile") => {
                return Err(ValidationError::MobileTaken(user.mobile).into());
            }
            Err(err) => return Err(StorageError::from(err).into()),
        };

        Ok(User {
            id: UserId::new(done.last_insert_rowid()).map_err(StorefrontError::store)?,
            username: user.username,
            mobile: user.mobile,
            email: None,
            email_active: false,
            default_address_id: None,
        })
    }

    async fn get_by_id(&self, id: UserId) -> Result<Option<User>, StorefrontError> {
        let row: Option<Wrapper> = sqlx::query_as(SELECT_BY_ID)
            .bind(id.get())
            .fetch_optional(&self.pool)
            .await
            .map_err(StorageError::from)?;
        Ok(row.map(|w| w.0.user))
    }

    async fn find_credentials(&self, account: &str) -> Result<Option<Credentials>, StorefrontError> {
        let row: Option<Wrapper> = sqlx::query_as(SELECT_BY_ACCOUNT)
            .bind(account)
            .fetch_optional(&self.pool)
            .await
            .map_err(StorageError::from)?;
        Ok(row.map(|w| w.0))
    }

    async fn update_email(&self, id: UserId, email: &str) -> Result<(), StorefrontError> {
        sqlx::query(UPDATE_EMAIL)
            .bind(email)
            .bind(id.get())
            .execute(&self.pool)
            .await
            .map_err(StorageError::from)?;
        Ok(())
    }

    async fn activate_email(&self, id: UserId, email: &str) -> Result<bool, StorefrontError> {
        let done = sqlx::query(ACTIVATE_EMAIL)
            .bind(id.get())
            .bind(email)
            .execute(&self.pool)
            .await
            .map_err(StorageError::from)?;
        Ok(done.rows_affected() > 0)
    }

    async fn set_default_address(
        &self,
        id: UserId,
        address: Option<AddressId>,
    ) -> Result<(), StorefrontError> {
        sqlx::query(UPDATE_DEFAULT_ADDRESS)
            .bind(address.map(AddressId::get))
            .bind(id.get())
            .execute(&self.pool)
            .await
            .map_err(StorageError::from)?;
        Ok(())
    }
}

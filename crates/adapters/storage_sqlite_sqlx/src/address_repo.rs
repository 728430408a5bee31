//! `SQLite` implementation of [`AddressRepository`].

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use storefront_app::ports::AddressRepository;
use storefront_domain::address::{Address, AddressDraft};
use storefront_domain::error::StorefrontError;
use storefront_domain::id::{AddressId, UserId};
use storefront_domain::time::now;

use crate::codec::{decode_id, encode_time};
use crate::error::StorageError;

/// Wrapper for converting database rows into domain [`Address`].
struct Wrapper(Address);

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self(Address {
            id: decode_id(row.try_get("id")?)?,
            user_id: decode_id(row.try_get("user_id")?)?,
            title: row.try_get("title")?,
            receiver: row.try_get("receiver")?,
            province_id: row.try_get("province_id")?,
            city_id: row.try_get("city_id")?,
            district_id: row.try_get("district_id")?,
            place: row.try_get("place")?,
            mobile: row.try_get("mobile")?,
            tel: row.try_get("tel")?,
            email: row.try_get("email")?,
        }))
    }
}

const COUNT_ACTIVE: &str = "SELECT COUNT(*) FROM addresses WHERE user_id = ? AND is_deleted = 0";
const INSERT: &str = r"
    INSERT INTO addresses
        (user_id, title, receiver, province_id, city_id, district_id, place, mobile, tel, email, created_at, updated_at)
    VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
";
const SELECT_ACTIVE: &str =
    "SELECT * FROM addresses WHERE user_id = ? AND is_deleted = 0 ORDER BY id ASC";
const SELECT_ONE: &str = "SELECT * FROM addresses WHERE id = ? AND user_id = ? AND is_deleted = 0";
const UPDATE: &str = r"
    UPDATE addresses
    SET title = ?, receiver = ?, province_id = ?, city_id = ?, district_id = ?,
        place = ?, mobile = ?, tel = ?, email = ?, updated_at = ?
    WHERE id = ? AND user_id = ? AND is_deleted = 0
";
const SOFT_DELETE: &str = r"
    UPDATE addresses SET is_deleted = 1, updated_at = ?
    WHERE id = ? AND user_id = ? AND is_deleted = 0
";
const UPDATE_TITLE: &str = r"
    UPDATE addresses SET title = ?, updated_at = ?
    WHERE id = ? AND user_id = ? AND is_deleted = 0
";

/// `SQLite`-backed address repository with soft deletion.
#[derive(Clone)]
pub struct SqliteAddressRepository {
    pool: SqlitePool,
}

impl SqliteAddressRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl AddressRepository for SqliteAddressRepository {
    async fn count_active(&self, user: UserId) -> Result<usize, StorefrontError> {
        let found: i64 = sqlx::query_scalar(COUNT_ACTIVE)
            .bind(user.get())
            .fetch_one(&self.pool)
            .await
            .map_err(StorageError::from)?;
        Ok(usize::try_from(found).unwrap_or_default())
    }

    async fn create(&self, user: UserId, draft: AddressDraft) -> Result<Address, StorefrontError> {
        let stamp = encode_time(now());
        let done = sqlx::query(INSERT)
            .bind(user.get())
            .bind(&draft.title)
            .bind(&draft.receiver)
            .bind(draft.province_id)
            .bind(draft.city_id)
            .bind(draft.district_id)
            .bind(&draft.place)
            .bind(&draft.mobile)
            .bind(&draft.tel)
            .bind(&draft.email)
            .bind(&stamp)
            .bind(&stamp)
            .execute(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(Address {
            id: AddressId::new(done.last_insert_rowid()).map_err(StorefrontError::store)?,
            user_id: user,
            title: draft.title,
            receiver: draft.receiver,
            province_id: draft.province_id,
            city_id: draft.city_id,
            district_id: draft.district_id,
            place: draft.place,
            mobile: draft.mobile,
            tel: draft.tel,
            email: draft.email,
        })
    }

    async fn list_active(&self, user: UserId) -> Result<Vec<Address>, StorefrontError> {
        let rows: Vec<Wrapper> = sqlx::query_as(SELECT_ACTIVE)
            .bind(user.get())
            .fetch_all(&self.pool)
            .await
            .map_err(StorageError::from)?;
        Ok(rows.into_iter().map(|w| w.0).collect())
    }

    async fn get(&self, user: UserId, id: AddressId) -> Result<Option<Address>, StorefrontError> {
        let row: Option<Wrapper> = sqlx::query_as(SELECT_ONE)
            .bind(id.get())
            .bind(user.get())
            .fetch_optional(&self.pool)
            .await
            .map_err(StorageError::from)?;
        Ok(row.map(|w| w.0))
    }

    async fn update(
        &self,
        user: UserId,
        id: AddressId,
        draft: AddressDraft,
    ) -> Result<Option<Address>, StorefrontError> {
        let done = sqlx::query(UPDATE)
            .bind(&draft.title)
            .bind(&draft.receiver)
            .bind(draft.province_id)
            .bind(draft.city_id)
            .bind(draft.district_id)
            .bind(&draft.place)
            .bind(&draft.mobile)
            .bind(&draft.tel)
            .bind(&draft.email)
            .bind(encode_time(now()))
            .bind(id.get())
            .bind(user.get())
            .execute(&self.pool)
            .await
            .map_err(StorageError::from)?;

        if done.rows_affected() == 0 {
            return Ok(None);
        }
        self.get(user, id).await
    }

    async fn soft_delete(&self, user: UserId, id: AddressId) -> Result<bool, StorefrontError> {
        let done = sqlx::query(SOFT_DELETE)
            .bind(encode_time(now()))
            .bind(id.get())
            .bind(user.get())
            .execute(&self.pool)
            .await
            .map_err(StorageError::from)?;
        Ok(done.rows_affected() > 0)
    }

    async fn update_title(
        &self,
        user: UserId,
        id: AddressId,
        title: &str,
    ) -> Result<bool, StorefrontError> {
        let done = sqlx::query(UPDATE_TITLE)
            .bind(title)
            .bind(encode_time(now()))
            .bind(id.get())
            .bind(user.get())
            .execute(&self.pool)
            .await
            .map_err(StorageError::from)?;
        Ok(done.rows_affected() > 0)
    }
}

//! `SQLite` implementation of [`HomepageSource`].

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use storefront_app::ports::HomepageSource;
use storefront_domain::error::StorefrontError;
use storefront_domain::homepage::{Category, Channel, Content};

use crate::codec::decode_id;
use crate::error::{StorageError, decode_error};

struct CategoryRow(Category);

impl<'r> FromRow<'r, SqliteRow> for CategoryRow {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let parent_id: Option<i64> = row.try_get("parent_id")?;
        Ok(Self(Category {
            id: decode_id(row.try_get("id")?)?,
            name: row.try_get("name")?,
            parent_id: parent_id.map(decode_id).transpose()?,
        }))
    }
}

struct ChannelRow(Channel);

impl<'r> FromRow<'r, SqliteRow> for ChannelRow {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let group_id: i64 = row.try_get("group_id")?;
        Ok(Self(Channel {
            group_id: u32::try_from(group_id).map_err(decode_error)?,
            category_id: decode_id(row.try_get("category_id")?)?,
            url: row.try_get("url")?,
            sequence: row.try_get("sequence")?,
        }))
    }
}

struct ContentRow(Content);

impl<'r> FromRow<'r, SqliteRow> for ContentRow {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self(Content {
            id: decode_id(row.try_get("id")?)?,
            category_key: row.try_get("category_key")?,
            title: row.try_get("title")?,
            url: row.try_get("url")?,
            image: row.try_get("image")?,
            text: row.try_get("text")?,
            sequence: row.try_get("sequence")?,
            status: row.try_get("status")?,
        }))
    }
}

const SELECT_CHANNELS: &str = "SELECT * FROM channels ORDER BY group_id ASC, sequence ASC";
const SELECT_CATEGORIES: &str = "SELECT * FROM categories ORDER BY id ASC";
const SELECT_CONTENTS: &str = "SELECT * FROM contents ORDER BY category_key ASC, sequence ASC";
const INSERT_CATEGORY: &str = "INSERT INTO categories (id, name, parent_id) VALUES (?, ?, ?)";
const INSERT_CHANNEL: &str =
    "INSERT INTO channels (group_id, category_id, url, sequence) VALUES (?, ?, ?, ?)";
const INSERT_CONTENT: &str = r"
    INSERT INTO contents (id, category_key, title, url, image, text, sequence, status)
    VALUES (?, ?, ?, ?, ?, ?, ?, ?)
";

/// `SQLite`-backed source of homepage rows.
#[derive(Clone)]
pub struct SqliteHomepageSource {
    pool: SqlitePool,
}

impl SqliteHomepageSource {
    /// Create a new source using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a category. Parents must be inserted before their children.
    ///
    /// # Errors
    ///
    /// Returns [`StorefrontError::StoreUnavailable`] when the insert fails.
    pub async fn insert_category(&self, category: &Category) -> Result<(), StorefrontError> {
        sqlx::query(INSERT_CATEGORY)
            .bind(category.id.get())
            .bind(&category.name)
            .bind(category.parent_id.map(i64::from))
            .execute(&self.pool)
            .await
            .map_err(StorageError::from)?;
        Ok(())
    }

    /// Insert a channel.
    ///
    /// # Errors
    ///
    /// Returns [`StorefrontError::StoreUnavailable`] when the insert fails.
    pub async fn insert_channel(&self, channel: &Channel) -> Result<(), StorefrontError> {
        sqlx::query(INSERT_CHANNEL)
            .bind(i64::from(channel.group_id))
            .bind(channel.category_id.get())
            .bind(&channel.url)
            .bind(channel.sequence)
            .execute(&self.pool)
            .await
            .map_err(StorageError::from)?;
        Ok(())
    }

    /// Insert an advertising content.
    ///
    /// # Errors
    ///
    /// Returns [`StorefrontError::StoreUnavailable`] when the insert fails.
    pub async fn insert_content(&self, content: &Content) -> Result<(), StorefrontError> {
        sqlx::query(INSERT_CONTENT)
            .bind(content.id.get())
            .bind(&content.category_key)
            .bind(&content.title)
            .bind(&content.url)
            .bind(&content.image)
            .bind(&content.text)
            .bind(content.sequence)
            .bind(content.status)
            .execute(&self.pool)
            .await
            .map_err(StorageError::from)?;
        Ok(())
    }
}

impl HomepageSource for SqliteHomepageSource {
    async fn channels(&self) -> Result<Vec<Channel>, StorefrontError> {
        let rows: Vec<ChannelRow> = sqlx::query_as(SELECT_CHANNELS)
            .fetch_all(&self.pool)
            .await
            .map_err(StorageError::from)?;
        Ok(rows.into_iter().map(|r| r.0).collect())
    }

    async fn categories(&self) -> Result<Vec<Category>, StorefrontError> {
        let rows: Vec<CategoryRow> = sqlx::query_as(SELECT_CATEGORIES)
            .fetch_all(&self.pool)
            .await
            .map_err(StorageError::from)?;
        Ok(rows.into_iter().map(|r| r.0).collect())
    }

    async fn contents(&self) -> Result<Vec<Content>, StorefrontError> {
        let rows: Vec<ContentRow> = sqlx::query_as(SELECT_CONTENTS)
            .fetch_all(&self.pool)
            .await
            .map_err(StorageError::from)?;
        Ok(rows.into_iter().map(|r| r.0).collect())
    }
}

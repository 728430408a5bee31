//! `SQLite` implementation of [`SkuRepository`] and [`SearchIndex`].

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, QueryBuilder, Row, Sqlite, SqlitePool};

use storefront_app::ports::{SearchIndex, SkuRepository};
use storefront_domain::catalog::{Page, Paginated, SkuOrdering, SkuSortKey};
use storefront_domain::error::StorefrontError;
use storefront_domain::id::{CategoryId, SkuId};
use storefront_domain::sku::{Price, Sku};

use crate::codec::{decode_id, decode_time, encode_time};
use crate::error::StorageError;

/// Wrapper for converting database rows into domain [`Sku`].
struct Wrapper(Sku);

impl Wrapper {
    fn maybe(value: Option<Self>) -> Option<Sku> {
        value.map(|w| w.0)
    }

    fn all(values: Vec<Self>) -> Vec<Sku> {
        values.into_iter().map(|w| w.0).collect()
    }
}

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let created_at: String = row.try_get("created_at")?;
        Ok(Self(Sku {
            id: decode_id(row.try_get("id")?)?,
            category_id: decode_id(row.try_get("category_id")?)?,
            name: row.try_get("name")?,
            caption: row.try_get("caption")?,
            price: Price::from_cents(row.try_get("price")?),
            default_image_url: row.try_get("default_image_url")?,
            comments: row.try_get("comments")?,
            sales: row.try_get("sales")?,
            is_launched: row.try_get("is_launched")?,
            created_at: decode_time(&created_at)?,
        }))
    }
}

const INSERT: &str = r"
    INSERT INTO skus (id, category_id, name, caption, price, default_image_url, comments, sales, is_launched, created_at)
    VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
";
const SELECT_BY_ID: &str = "SELECT * FROM skus WHERE id = ?";
const COUNT_BY_ID: &str = "SELECT COUNT(*) FROM skus WHERE id = ?";
const COUNT_BY_CATEGORY: &str =
    "SELECT COUNT(*) FROM skus WHERE category_id = ? AND is_launched = 1";
const COUNT_MATCHING: &str = r"
    SELECT COUNT(*) FROM skus
    WHERE is_launched = 1 AND (name LIKE ?1 ESCAPE '\' OR caption LIKE ?1 ESCAPE '\')
";
const SELECT_MATCHING: &str = r"
    SELECT * FROM skus
    WHERE is_launched = 1 AND (name LIKE ?1 ESCAPE '\' OR caption LIKE ?1 ESCAPE '\')
    ORDER BY sales DESC, id ASC
    LIMIT ?2 OFFSET ?3
";

fn order_clause(ordering: SkuOrdering) -> &'static str {
    match (ordering.key, ordering.descending) {
        (SkuSortKey::CreateTime, false) => "created_at ASC, id ASC",
        (SkuSortKey::CreateTime, true) => "created_at DESC, id DESC",
        (SkuSortKey::Price, false) => "price ASC, id ASC",
        (SkuSortKey::Price, true) => "price DESC, id DESC",
        (SkuSortKey::Sales, false) => "sales ASC, id ASC",
        (SkuSortKey::Sales, true) => "sales DESC, id DESC",
    }
}

/// `LIKE` pattern matching `text` anywhere, with wildcards in `text` escaped.
fn contains_pattern(text: &str) -> String {
    let mut pattern = String::with_capacity(text.len() + 2);
    pattern.push('%');
    for ch in text.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}

fn page_bounds(page: Page) -> (i64, i64) {
    (
        i64::from(page.page_size()),
        i64::try_from(page.offset()).unwrap_or(i64::MAX),
    )
}

fn count(raw: i64) -> u64 {
    u64::try_from(raw).unwrap_or_default()
}

/// `SQLite`-backed SKU repository and search index.
#[derive(Clone)]
pub struct SqliteSkuRepository {
    pool: SqlitePool,
}

impl SqliteSkuRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a SKU, as done by catalog imports and fixtures.
    ///
    /// # Errors
    ///
    /// Returns [`StorefrontError::StoreUnavailable`] when the insert fails.
    pub async fn insert(&self, sku: &Sku) -> Result<(), StorefrontError> {
        sqlx::query(INSERT)
            .bind(sku.id.get())
            .bind(sku.category_id.get())
            .bind(&sku.name)
            .bind(&sku.caption)
            .bind(sku.price.cents())
            .bind(&sku.default_image_url)
            .bind(sku.comments)
            .bind(sku.sales)
            .bind(sku.is_launched)
            .bind(encode_time(sku.created_at))
            .execute(&self.pool)
            .await
            .map_err(StorageError::from)?;
        Ok(())
    }
}

impl SkuRepository for SqliteSkuRepository {
    async fn get_by_id(&self, id: SkuId) -> Result<Option<Sku>, StorefrontError> {
        let row: Option<Wrapper> = sqlx::query_as(SELECT_BY_ID)
            .bind(id.get())
            .fetch_optional(&self.pool)
            .await
            .map_err(StorageError::from)?;
        Ok(Wrapper::maybe(row))
    }

    async fn exists(&self, id: SkuId) -> Result<bool, StorefrontError> {
        let found: i64 = sqlx::query_scalar(COUNT_BY_ID)
            .bind(id.get())
            .fetch_one(&self.pool)
            .await
            .map_err(StorageError::from)?;
        Ok(found > 0)
    }

    async fn get_many(&self, ids: &[SkuId]) -> Result<Vec<Sku>, StorefrontError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let mut query: QueryBuilder<Sqlite> = QueryBuilder::new("SELECT * FROM skus WHERE id IN (");
        let mut separated = query.separated(", ");
        for id in ids {
            separated.push_bind(id.get());
        }
        separated.push_unseparated(")");

        let rows: Vec<Wrapper> = query
            .build_query_as()
            .fetch_all(&self.pool)
            .await
            .map_err(StorageError::from)?;
        Ok(Wrapper::all(rows))
    }

    async fn list_by_category(
        &self,
        category: CategoryId,
        ordering: SkuOrdering,
        page: Page,
    ) -> Result<Paginated<Sku>, StorefrontError> {
        let total: i64 = sqlx::query_scalar(COUNT_BY_CATEGORY)
            .bind(category.get())
            .fetch_one(&self.pool)
            .await
            .map_err(StorageError::from)?;

        let (limit, offset) = page_bounds(page);
        let sql = format!(
            "SELECT * FROM skus WHERE category_id = ? AND is_launched = 1 ORDER BY {} LIMIT ? OFFSET ?",
            order_clause(ordering)
        );
        let rows: Vec<Wrapper> = sqlx::query_as(&sql)
            .bind(category.get())
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(Paginated::new(page, count(total), Wrapper::all(rows)))
    }
}

impl SearchIndex for SqliteSkuRepository {
    async fn search(&self, text: &str, page: Page) -> Result<Paginated<Sku>, StorefrontError> {
        let pattern = contains_pattern(text);
        let total: i64 = sqlx::query_scalar(COUNT_MATCHING)
            .bind(&pattern)
            .fetch_one(&self.pool)
            .await
            .map_err(StorageError::from)?;

        let (limit, offset) = page_bounds(page);
        let rows: Vec<Wrapper> = sqlx::query_as(SELECT_MATCHING)
            .bind(&pattern)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(Paginated::new(page, count(total), Wrapper::all(rows)))
    }
}

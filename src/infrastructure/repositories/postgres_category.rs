// src/infrastructure/repositories/postgres_category.rs
use super::map_sqlx;
use crate::domain::category::{Category, CategoryId, CategoryStore, SlugIndex};
use crate::domain::errors::{DomainError, DomainResult};
use async_trait::async_trait;
use sqlx::{FromRow, PgConnection};

/// Category storage bound to one connection, normally an open transaction.
pub struct PostgresCategoryStore<'c> {
    conn: &'c mut PgConnection,
}

impl<'c> PostgresCategoryStore<'c> {
    #[must_use]
    pub const fn new(conn: &'c mut PgConnection) -> Self {
        Self { conn }
    }
}

#[derive(Debug, FromRow)]
struct CategoryRow {
    id: i64,
    name: String,
    slug: String,
    parent_category_id: Option<i64>,
}

impl TryFrom<CategoryRow> for Category {
    type Error = DomainError;

    fn try_from(row: CategoryRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: CategoryId::new(row.id)?,
            name: row.name,
            slug: row.slug,
            parent_id: row.parent_category_id.map(CategoryId::new).transpose()?,
        })
    }
}

#[async_trait]
impl CategoryStore for PostgresCategoryStore<'_> {
    async fn load_all(&mut self) -> DomainResult<Vec<Category>> {
        let rows = sqlx::query_as::<_, CategoryRow>(
            "SELECT id::bigint AS id, name, slug, parent_category_id::bigint AS parent_category_id
             FROM categories
             ORDER BY id",
        )
        .fetch_all(&mut *self.conn)
        .await
        .map_err(map_sqlx)?;

        rows.into_iter().map(Category::try_from).collect()
    }

    async fn update_slug(&mut self, id: CategoryId, slug: &str) -> DomainResult<()> {
        let result = sqlx::query("UPDATE categories SET slug = $1 WHERE id = $2")
            .bind(slug)
            .bind(i64::from(id))
            .execute(&mut *self.conn)
            .await
            .map_err(map_sqlx)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::NotFound(format!("category {id} not found")));
        }
        Ok(())
    }

    async fn lowercase_all_slugs(&mut self) -> DomainResult<u64> {
        let result = sqlx::query("UPDATE categories SET slug = LOWER(slug)")
            .execute(&mut *self.conn)
            .await
            .map_err(map_sqlx)?;
        Ok(result.rows_affected())
    }

    async fn drop_slug_index(&mut self, index: SlugIndex) -> DomainResult<()> {
        sqlx::query(&index.drop_sql())
            .execute(&mut *self.conn)
            .await
            .map_err(map_sqlx)?;
        Ok(())
    }

    async fn create_slug_index(&mut self, index: SlugIndex) -> DomainResult<()> {
        sqlx::query(&index.create_sql())
            .execute(&mut *self.conn)
            .await
            .map_err(map_sqlx)?;
        Ok(())
    }

    async fn count_slug_conflicts(&mut self) -> DomainResult<u64> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COALESCE(SUM(n), 0)::bigint
             FROM (
                 SELECT COUNT(*) AS n
                 FROM categories
                 WHERE slug != ''
                 GROUP BY COALESCE(parent_category_id, -1), LOWER(slug)
                 HAVING COUNT(*) > 1
             ) AS duplicates",
        )
        .fetch_one(&mut *self.conn)
        .await
        .map_err(map_sqlx)?;

        Ok(u64::try_from(count).unwrap_or(0))
    }
}

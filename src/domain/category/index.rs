//! Definitions of the partial unique index guarding category slugs.

pub const SLUG_INDEX_NAME: &str = "unique_index_categories_on_slug";
pub const CATEGORIES_TABLE: &str = "categories";

/// Stand-in parent id for root categories so that `NULL` parents share one scope.
pub const ROOT_PARENT_SENTINEL: i64 = -1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlugIndex {
    /// Unique on `(parent, LOWER(slug))`.
    Lowered,
    /// Unique on `(parent, slug)`, compared with the stored casing.
    CaseSensitive,
}

impl SlugIndex {
    #[must_use]
    pub const fn name(self) -> &'static str {
        SLUG_INDEX_NAME
    }

    const fn slug_expression(self) -> &'static str {
        match self {
            Self::Lowered => "LOWER(slug)",
            Self::CaseSensitive => "slug",
        }
    }

    #[must_use]
    pub fn create_sql(self) -> String {
        format!(
            "CREATE UNIQUE INDEX {name} ON {table} ((COALESCE(parent_category_id, {sentinel})), ({slug})) WHERE slug != ''",
            name = self.name(),
            table = CATEGORIES_TABLE,
            sentinel = ROOT_PARENT_SENTINEL,
            slug = self.slug_expression(),
        )
    }

    #[must_use]
    pub fn drop_sql(self) -> String {
        format!("DROP INDEX {}", self.name())
    }
}

use crate::domain::category::value_objects::CategoryId;

/// One row of the `categories` table as seen by the slug migration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    pub slug: String,
    pub parent_id: Option<CategoryId>,
}

impl Category {
    #[must_use]
    pub fn new(
        id: CategoryId,
        name: impl Into<String>,
        slug: impl Into<String>,
        parent_id: Option<CategoryId>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            slug: slug.into(),
            parent_id,
        }
    }

    #[must_use]
    pub fn slug_key(&self) -> SlugKey {
        SlugKey::new(self.parent_id, &self.slug)
    }
}

/// Uniqueness partition of a slug: the parent scope plus the lowercased slug.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SlugKey {
    pub parent: Option<CategoryId>,
    pub slug: String,
}

impl SlugKey {
    #[must_use]
    pub fn new(parent: Option<CategoryId>, slug: &str) -> Self {
        Self {
            parent,
            slug: slug.to_lowercase(),
        }
    }
}

/// `true` when the slug is non-empty and lowercasing would change it.
#[must_use]
pub fn is_mixed_case(slug: &str) -> bool {
    !slug.is_empty() && slug != slug.to_lowercase()
}

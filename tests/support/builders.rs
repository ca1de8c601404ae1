// tests/support/builders.rs
use once_cell::sync::Lazy;

use category_slugs::domain::category::{Category, CategoryId};

pub struct CategoryBuilder {
    id: i64,
    name: String,
    slug: String,
    parent_id: Option<i64>,
}

impl CategoryBuilder {
    pub fn new(id: i64) -> Self {
        Self {
            id,
            name: format!("Category {id}"),
            slug: format!("category-{id}"),
            parent_id: None,
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn slug(mut self, slug: impl Into<String>) -> Self {
        self.slug = slug.into();
        self
    }

    pub fn parent(mut self, parent_id: i64) -> Self {
        self.parent_id = Some(parent_id);
        self
    }

    pub fn build(self) -> Category {
        Category::new(
            CategoryId(self.id),
            self.name,
            self.slug,
            self.parent_id.map(CategoryId),
        )
    }
}

/// A small forum's categories: one rename, one clear, a case-only slug in a
/// child scope, an empty slug and an already clean row.
pub static FORUM_CATEGORIES: Lazy<Vec<Category>> = Lazy::new(|| {
    vec![
        CategoryBuilder::new(1).name("Feature Requests").slug("Feature").build(),
        CategoryBuilder::new(2).name("Features").slug("feature").build(),
        CategoryBuilder::new(3).name("2021").slug("Archive").build(),
        CategoryBuilder::new(4).name("Archive").slug("ARCHIVE").build(),
        CategoryBuilder::new(5).name("Bugs").slug("Bugs").parent(2).build(),
        CategoryBuilder::new(6).name("bugs").slug("bugs").parent(1).build(),
        CategoryBuilder::new(7).name("Uncategorized").slug("").build(),
        CategoryBuilder::new(8).name("Staff").slug("staff").build(),
    ]
});

pub fn forum_categories() -> Vec<Category> {
    FORUM_CATEGORIES.clone()
}

// tests/support/mocks/category_store.rs
use std::collections::HashMap;

use async_trait::async_trait;

use category_slugs::domain::category::{Category, CategoryId, CategoryStore, SlugIndex};
use category_slugs::domain::errors::{DomainError, DomainResult};

/* -------------------------------- CategoryStore -------------------------------- */

/// In-memory category table that enforces whichever slug index is installed,
/// the way the database would.
pub struct InMemoryCategoryStore {
    pub rows: Vec<Category>,
    pub index: Option<SlugIndex>,
    pub fail_update_for: Option<CategoryId>,
    pub slug_updates: Vec<(CategoryId, String)>,
}

impl InMemoryCategoryStore {
    /// Store seeded with rows and the case-sensitive index already in place.
    pub fn with_rows(rows: Vec<Category>) -> Self {
        Self {
            rows,
            index: Some(SlugIndex::CaseSensitive),
            fail_update_for: None,
            slug_updates: Vec::new(),
        }
    }

    pub fn without_index(mut self) -> Self {
        self.index = None;
        self
    }

    pub fn failing_update_for(mut self, id: i64) -> Self {
        self.fail_update_for = Some(CategoryId(id));
        self
    }

    pub fn slug_of(&self, id: i64) -> &str {
        self.rows
            .iter()
            .find(|row| row.id == CategoryId(id))
            .map(|row| row.slug.as_str())
            .expect("category exists")
    }

    fn index_key(index: SlugIndex, row: &Category) -> (Option<CategoryId>, String) {
        match index {
            SlugIndex::Lowered => (row.parent_id, row.slug.to_lowercase()),
            SlugIndex::CaseSensitive => (row.parent_id, row.slug.clone()),
        }
    }

    fn check_index(&self, index: SlugIndex) -> DomainResult<()> {
        let mut seen = HashMap::new();
        for row in self.rows.iter().filter(|row| !row.slug.is_empty()) {
            if let Some(other) = seen.insert(Self::index_key(index, row), row.id) {
                return Err(DomainError::Conflict(format!(
                    "categories {other} and {} violate {}",
                    row.id,
                    index.name()
                )));
            }
        }
        Ok(())
    }

    fn enforce(&self) -> DomainResult<()> {
        self.index.map_or(Ok(()), |index| self.check_index(index))
    }
}

#[async_trait]
impl CategoryStore for InMemoryCategoryStore {
    async fn load_all(&mut self) -> DomainResult<Vec<Category>> {
        let mut rows = self.rows.clone();
        rows.sort_by_key(|row| row.id);
        Ok(rows)
    }

    async fn update_slug(&mut self, id: CategoryId, slug: &str) -> DomainResult<()> {
        if self.fail_update_for == Some(id) {
            return Err(DomainError::Persistence(format!("write to category {id} failed")));
        }
        let row = self
            .rows
            .iter_mut()
            .find(|row| row.id == id)
            .ok_or_else(|| DomainError::NotFound(format!("category {id} not found")))?;
        row.slug = slug.to_string();
        self.slug_updates.push((id, slug.to_string()));
        self.enforce()
    }

    async fn lowercase_all_slugs(&mut self) -> DomainResult<u64> {
        for row in &mut self.rows {
            row.slug = row.slug.to_lowercase();
        }
        self.enforce()?;
        Ok(self.rows.len() as u64)
    }

    async fn drop_slug_index(&mut self, index: SlugIndex) -> DomainResult<()> {
        if self.index.take().is_none() {
            return Err(DomainError::NotFound(format!(
                "index \"{}\" does not exist",
                index.name()
            )));
        }
        Ok(())
    }

    async fn create_slug_index(&mut self, index: SlugIndex) -> DomainResult<()> {
        if self.index.is_some() {
            return Err(DomainError::Persistence(format!(
                "relation \"{}\" already exists",
                index.name()
            )));
        }
        self.check_index(index)?;
        self.index = Some(index);
        Ok(())
    }

    async fn count_slug_conflicts(&mut self) -> DomainResult<u64> {
        let mut groups: HashMap<(Option<CategoryId>, String), u64> = HashMap::new();
        for row in self.rows.iter().filter(|row| !row.slug.is_empty()) {
            *groups
                .entry(Self::index_key(SlugIndex::Lowered, row))
                .or_insert(0) += 1;
        }
        Ok(groups.values().filter(|n| **n > 1).sum())
    }
}

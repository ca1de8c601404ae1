// src/application/migrations/set_category_slug_to_lower.rs
use std::sync::Arc;

use async_trait::async_trait;

use super::Migration;
use crate::application::error::{ApplicationError, ApplicationResult};
use crate::application::ports::util::SlugGenerator;
use crate::domain::category::{CategoryStore, MigrationVersion, SlugIndex, SlugNormalizer};

/// Lowercases every category slug and rebuilds the slug index on `LOWER(slug)`.
///
/// Case-insensitive duplicates within a parent are resolved first. `down` only
/// restores the case-sensitive index; lowercased data stays.
pub struct SetCategorySlugToLower {
    normalizer: SlugNormalizer,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SlugMigrationReport {
    pub loaded: usize,
    pub renamed: usize,
    pub cleared: usize,
    pub lowercased: u64,
}

impl SetCategorySlugToLower {
    #[allow(clippy::unreadable_literal)] // timestamp form, as recorded in the ledger
    pub const VERSION: MigrationVersion = MigrationVersion::new(20201117212328);
    pub const NAME: &'static str = "set_category_slug_to_lower";

    #[must_use]
    pub const fn new(generator: Arc<dyn SlugGenerator>) -> Self {
        Self {
            normalizer: SlugNormalizer::new(generator),
        }
    }

    /// # Errors
    ///
    /// Propagates any storage failure, and returns
    /// [`ApplicationError::Conflict`] when rows still share a lowercase slug
    /// within a parent after the rewrite.
    pub async fn apply(&self, store: &mut dyn CategoryStore) -> ApplicationResult<SlugMigrationReport> {
        store.drop_slug_index(SlugIndex::CaseSensitive).await?;

        let categories = store.load_all().await?;
        let plan = self.normalizer.plan(&categories);

        for (id, slug) in plan.updates() {
            store.update_slug(id, slug).await?;
        }
        let lowercased = store.lowercase_all_slugs().await?;

        let conflicts = store.count_slug_conflicts().await?;
        if conflicts > 0 {
            return Err(ApplicationError::conflict(format!(
                "{conflicts} categories still share a lowercase slug within their parent"
            )));
        }

        store.create_slug_index(SlugIndex::Lowered).await?;

        let report = SlugMigrationReport {
            loaded: categories.len(),
            renamed: plan.renamed(),
            cleared: plan.cleared(),
            lowercased,
        };
        tracing::info!(
            loaded = report.loaded,
            renamed = report.renamed,
            cleared = report.cleared,
            lowercased = report.lowercased,
            "category slugs lowercased"
        );
        Ok(report)
    }
}

#[async_trait]
impl Migration for SetCategorySlugToLower {
    fn version(&self) -> MigrationVersion {
        Self::VERSION
    }

    fn name(&self) -> &'static str {
        Self::NAME
    }

    async fn up(&self, store: &mut dyn CategoryStore) -> ApplicationResult<()> {
        self.apply(store).await.map(|_| ())
    }

    async fn down(&self, store: &mut dyn CategoryStore) -> ApplicationResult<()> {
        store.drop_slug_index(SlugIndex::Lowered).await?;
        store.create_slug_index(SlugIndex::CaseSensitive).await?;
        Ok(())
    }
}

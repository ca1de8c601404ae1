// src/application/migrations/mod.rs
mod set_category_slug_to_lower;

use async_trait::async_trait;

use crate::application::error::ApplicationResult;
use crate::domain::category::{CategoryStore, MigrationVersion};

pub use set_category_slug_to_lower::{SetCategorySlugToLower, SlugMigrationReport};

/// A reversible schema change applied exactly once against a category store.
///
/// # Errors
///
/// `up` and `down` fail with the first storage or consistency error; the
/// runner is expected to roll the surrounding transaction back.
#[async_trait]
pub trait Migration: Send + Sync {
    fn version(&self) -> MigrationVersion;
    fn name(&self) -> &'static str;
    async fn up(&self, store: &mut dyn CategoryStore) -> ApplicationResult<()>;
    async fn down(&self, store: &mut dyn CategoryStore) -> ApplicationResult<()>;
}

use crate::domain::category::entity::Category;
use crate::domain::category::index::SlugIndex;
use crate::domain::category::value_objects::CategoryId;
use crate::domain::errors::DomainResult;
use async_trait::async_trait;

/// Storage operations the slug migration performs. Implementations are bound
/// to a single unit of work; committing or rolling it back is the caller's job.
///
/// # Errors
///
/// Every operation surfaces storage failures as [`DomainError`](crate::domain::errors::DomainError);
/// `drop_slug_index` reports a missing index as `NotFound` and index creation
/// over duplicate rows as `Conflict`.
#[async_trait]
pub trait CategoryStore: Send {
    /// Every category row, ordered by id.
    async fn load_all(&mut self) -> DomainResult<Vec<Category>>;
    async fn update_slug(&mut self, id: CategoryId, slug: &str) -> DomainResult<()>;
    /// Returns the number of rows touched.
    async fn lowercase_all_slugs(&mut self) -> DomainResult<u64>;
    async fn drop_slug_index(&mut self, index: SlugIndex) -> DomainResult<()>;
    async fn create_slug_index(&mut self, index: SlugIndex) -> DomainResult<()>;
    /// Rows whose non-empty slug shares `(parent, LOWER(slug))` with another row.
    async fn count_slug_conflicts(&mut self) -> DomainResult<u64>;
}

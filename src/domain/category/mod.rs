pub mod entity;
pub mod index;
pub mod repository;
pub mod services;
pub mod value_objects;

pub use entity::{Category, SlugKey};
pub use index::SlugIndex;
pub use repository::CategoryStore;
pub use services::{SlugNormalizer, SlugPlan};
pub use value_objects::{CategoryId, MigrationVersion};
